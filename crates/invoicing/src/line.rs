//! Line-item normalization and invoice totals.
//!
//! Everything here is deterministic arithmetic over already-decoded input.
//! Malformed numeric fields never abort a computation: they contribute zero,
//! so an invoice with one bad line still saves with sane figures.

use serde::{Deserialize, Serialize};

use ledgerline_core::RawNumeric;

/// One untrusted billable entry, as submitted by a client form, an API body,
/// or a parsed model response.
///
/// Every field is optional on the wire; unknown extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLineItem {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "RawNumeric::is_missing")]
    pub unit_price: RawNumeric,
    #[serde(default, skip_serializing_if = "RawNumeric::is_missing")]
    pub quantity: RawNumeric,
    /// Tax rate in percent. A present value (including an explicit 0 or null)
    /// wins over the legacy `taxPercent` spelling.
    #[serde(default, skip_serializing_if = "RawNumeric::is_missing")]
    pub tax_percentage: RawNumeric,
    /// Legacy spelling still sent by older clients.
    #[serde(default, skip_serializing_if = "RawNumeric::is_missing")]
    pub tax_percent: RawNumeric,
}

impl RawLineItem {
    pub fn new(
        name: impl Into<String>,
        unit_price: impl Into<RawNumeric>,
        quantity: impl Into<RawNumeric>,
    ) -> Self {
        Self {
            name: name.into(),
            unit_price: unit_price.into(),
            quantity: quantity.into(),
            tax_percentage: RawNumeric::Missing,
            tax_percent: RawNumeric::Missing,
        }
    }

    pub fn with_tax(mut self, tax_percentage: impl Into<RawNumeric>) -> Self {
        self.tax_percentage = tax_percentage.into();
        self
    }

    /// The tax field the calculator reads: `taxPercentage` when present,
    /// otherwise the legacy `taxPercent`.
    fn tax_source(&self) -> &RawNumeric {
        if self.tax_percentage.is_missing() {
            &self.tax_percent
        } else {
            &self.tax_percentage
        }
    }
}

/// A normalized line: plain finite numbers plus the computed line total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub name: String,
    pub unit_price: f64,
    pub quantity: f64,
    pub tax_percentage: f64,
    /// Line grand total: `unit_price * quantity * (1 + tax_percentage / 100)`.
    pub total: f64,
}

impl LineItem {
    /// Re-wrap as raw input. Feeding the result back through
    /// [`normalize_items`] reproduces this line exactly, which is what makes
    /// recomputing totals over stored items safe.
    pub fn as_raw(&self) -> RawLineItem {
        RawLineItem {
            name: self.name.clone(),
            unit_price: RawNumeric::Number(self.unit_price),
            quantity: RawNumeric::Number(self.quantity),
            tax_percentage: RawNumeric::Number(self.tax_percentage),
            tax_percent: RawNumeric::Missing,
        }
    }
}

/// Aggregate invoice figures.
///
/// Constructed only through [`InvoiceTotals::from_parts`], so
/// `total == subtotal + tax_total` holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    /// Sum of `unit_price * quantity` across lines, before tax.
    pub subtotal: f64,
    /// Sum of per-line tax amounts.
    pub tax_total: f64,
    /// Grand total.
    pub total: f64,
}

impl InvoiceTotals {
    pub fn from_parts(subtotal: f64, tax_total: f64) -> Self {
        Self {
            subtotal,
            tax_total,
            total: subtotal + tax_total,
        }
    }
}

/// Output of the calculator: normalized lines in input order plus the
/// aggregate figures computed in the same pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemizedTotals {
    pub items: Vec<LineItem>,
    pub totals: InvoiceTotals,
}

/// Which logical field of a line degraded to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineField {
    UnitPrice,
    Quantity,
    TaxPercentage,
}

/// Report that a raw field was garbage and contributed zero instead.
///
/// Warnings fire only for malformed values, never for fields that are
/// legitimately absent, null, or blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoercionWarning {
    /// Index of the line in the submitted order.
    pub item_index: usize,
    pub field: LineField,
    /// Rendering of the rejected value, for operator logs.
    pub given: String,
}

/// Normalize raw lines and compute invoice totals in one ordered pass.
///
/// This never fails and never drops a line: malformed numeric fields coerce
/// to zero, output order matches input order, and an empty slice yields
/// all-zero totals. Running the output back through the calculator (via
/// [`LineItem::as_raw`]) changes nothing.
pub fn normalize_items(raw: &[RawLineItem]) -> ItemizedTotals {
    normalize_items_checked(raw).0
}

/// Same arithmetic as [`normalize_items`], additionally reporting which
/// fields fell back to zero because the given value was garbage. The figures
/// are identical to the unchecked form for every input.
pub fn normalize_items_checked(raw: &[RawLineItem]) -> (ItemizedTotals, Vec<CoercionWarning>) {
    let mut items = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();
    let mut subtotal = 0.0_f64;
    let mut tax_total = 0.0_f64;

    for (item_index, item) in raw.iter().enumerate() {
        let unit_price = item.unit_price.coerce_lossy();
        let quantity = item.quantity.coerce_lossy();
        let tax_source = item.tax_source();
        let tax_percentage = tax_source.coerce_lossy();

        for (field, value) in [
            (LineField::UnitPrice, &item.unit_price),
            (LineField::Quantity, &item.quantity),
            (LineField::TaxPercentage, tax_source),
        ] {
            if value.is_malformed() {
                warnings.push(CoercionWarning {
                    item_index,
                    field,
                    given: value.to_string(),
                });
            }
        }

        let line_subtotal = unit_price * quantity;
        let line_tax = line_subtotal * tax_percentage / 100.0;

        subtotal += line_subtotal;
        tax_total += line_tax;

        items.push(LineItem {
            name: item.name.clone(),
            unit_price,
            quantity,
            tax_percentage,
            total: line_subtotal + line_tax,
        });
    }

    (
        ItemizedTotals {
            items,
            totals: InvoiceTotals::from_parts(subtotal, tax_total),
        },
        warnings,
    )
}
