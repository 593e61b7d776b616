//! Invoice data extracted from free text by a model.
//!
//! The payload mirrors what extraction prompts ask for: a client block plus
//! name/price/quantity items. Numeric fields use the lenient scalar because
//! models routinely quote numbers as strings.

use serde::{Deserialize, Serialize};

use ledgerline_core::RawNumeric;
use ledgerline_invoicing::{PartyDetails, RawLineItem};

/// One extracted item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedItem {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "RawNumeric::is_missing")]
    pub unit_price: RawNumeric,
    #[serde(default, skip_serializing_if = "RawNumeric::is_missing")]
    pub quantity: RawNumeric,
}

/// Everything the extraction prompt could recover from the source text.
///
/// Only `clientName` is promised by the prompt; the contact fields arrive
/// when the text happens to contain them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedInvoicePayload {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub items: Vec<ParsedItem>,
}

impl ParsedInvoicePayload {
    /// Items in raw form, ready for the totals calculator. Extracted items
    /// carry no tax information.
    pub fn raw_items(&self) -> Vec<RawLineItem> {
        self.items
            .iter()
            .map(|item| RawLineItem {
                name: item.name.clone(),
                unit_price: item.unit_price.clone(),
                quantity: item.quantity.clone(),
                tax_percentage: RawNumeric::Missing,
                tax_percent: RawNumeric::Missing,
            })
            .collect()
    }

    /// Pre-filled recipient block. Fields the text did not contain stay
    /// blank for the user to complete before the draft can validate.
    pub fn bill_to(&self) -> PartyDetails {
        PartyDetails {
            name: self.client_name.clone(),
            email: self.email.clone().unwrap_or_default(),
            address: self.address.clone().unwrap_or_default(),
            phone: String::new(),
        }
    }
}
