//! Lenient numeric scalar for untrusted billing input.
//!
//! Raw invoice payloads come from web forms, scraped documents and model
//! output, so a "number" may arrive as a JSON number, a numeric string, or
//! garbage. [`RawNumeric`] accepts any JSON value at decode time and defers
//! interpretation to the caller: a lossy read that degrades to zero, or a
//! strict read that reports failure.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A numeric-like wire value.
///
/// Deserialization is total over JSON: a malformed `unitPrice` can never fail
/// decoding of the record that carries it. Absent fields decode as
/// [`RawNumeric::Missing`] via `#[serde(default)]` on the carrying struct,
/// which keeps "field not sent" distinguishable from "field sent as null".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumeric {
    /// A plain JSON number.
    Number(f64),
    /// A string that may or may not spell a number.
    Text(String),
    /// Any other JSON shape (null, bool, array, object).
    Other(JsonValue),
    /// Field absent from the payload.
    #[default]
    Missing,
}

impl RawNumeric {
    /// Lossy read: numbers and well-formed numeric strings pass through,
    /// booleans count as 1/0, everything else contributes 0. Non-finite
    /// values also degrade to 0 so one bad field cannot poison a sum.
    pub fn coerce_lossy(&self) -> f64 {
        match self {
            RawNumeric::Number(n) if n.is_finite() => *n,
            RawNumeric::Number(_) => 0.0,
            RawNumeric::Text(s) => parse_finite(s).unwrap_or(0.0),
            RawNumeric::Other(JsonValue::Bool(b)) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            RawNumeric::Other(_) | RawNumeric::Missing => 0.0,
        }
    }

    /// Strict read: `Some` only for a finite number or a string spelling one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawNumeric::Number(n) if n.is_finite() => Some(*n),
            RawNumeric::Text(s) => parse_finite(s),
            _ => None,
        }
    }

    /// Whether the lossy read falls back to zero because the value is
    /// garbage, as opposed to legitimately empty (absent, null, blank text)
    /// or a clean boolean.
    pub fn is_malformed(&self) -> bool {
        match self {
            RawNumeric::Number(n) => !n.is_finite(),
            RawNumeric::Text(s) => !s.trim().is_empty() && parse_finite(s).is_none(),
            RawNumeric::Other(JsonValue::Null) | RawNumeric::Missing => false,
            RawNumeric::Other(JsonValue::Bool(_)) => false,
            RawNumeric::Other(_) => true,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RawNumeric::Missing)
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl core::fmt::Display for RawNumeric {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RawNumeric::Number(n) => write!(f, "{n}"),
            RawNumeric::Text(s) => write!(f, "{s:?}"),
            RawNumeric::Other(v) => write!(f, "{v}"),
            RawNumeric::Missing => write!(f, "(missing)"),
        }
    }
}

impl From<f64> for RawNumeric {
    fn from(value: f64) -> Self {
        RawNumeric::Number(value)
    }
}

impl From<i64> for RawNumeric {
    fn from(value: i64) -> Self {
        RawNumeric::Number(value as f64)
    }
}

impl From<&str> for RawNumeric {
    fn from(value: &str) -> Self {
        RawNumeric::Text(value.to_string())
    }
}

impl From<String> for RawNumeric {
    fn from(value: String) -> Self {
        RawNumeric::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decoded(value: serde_json::Value) -> RawNumeric {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn numbers_pass_through() {
        assert_eq!(decoded(json!(12.5)).coerce_lossy(), 12.5);
        assert_eq!(decoded(json!(-3)).coerce_lossy(), -3.0);
        assert_eq!(decoded(json!(0)).coerce_lossy(), 0.0);
    }

    #[test]
    fn numeric_strings_parse_after_trimming() {
        assert_eq!(decoded(json!("12.5")).coerce_lossy(), 12.5);
        assert_eq!(decoded(json!("  42  ")).coerce_lossy(), 42.0);
        assert_eq!(decoded(json!("-1e2")).coerce_lossy(), -100.0);
    }

    #[test]
    fn garbage_degrades_to_zero() {
        assert_eq!(decoded(json!("abc")).coerce_lossy(), 0.0);
        assert_eq!(decoded(json!("12abc")).coerce_lossy(), 0.0);
        assert_eq!(decoded(json!({"nested": true})).coerce_lossy(), 0.0);
        assert_eq!(decoded(json!([1, 2])).coerce_lossy(), 0.0);
        assert_eq!(RawNumeric::Missing.coerce_lossy(), 0.0);
    }

    #[test]
    fn empty_and_null_are_zero_but_not_malformed() {
        for value in [decoded(json!("")), decoded(json!("   ")), decoded(json!(null))] {
            assert_eq!(value.coerce_lossy(), 0.0);
            assert!(!value.is_malformed());
        }
        assert!(!RawNumeric::Missing.is_malformed());
    }

    #[test]
    fn garbage_is_flagged_malformed() {
        assert!(decoded(json!("abc")).is_malformed());
        assert!(decoded(json!({"a": 1})).is_malformed());
        assert!(RawNumeric::Number(f64::NAN).is_malformed());
        assert!(decoded(json!("inf")).is_malformed());
        assert!(!decoded(json!("7")).is_malformed());
        assert!(!decoded(json!(7)).is_malformed());
    }

    #[test]
    fn booleans_coerce_like_flags() {
        assert_eq!(decoded(json!(true)).coerce_lossy(), 1.0);
        assert_eq!(decoded(json!(false)).coerce_lossy(), 0.0);
        assert!(!decoded(json!(true)).is_malformed());
    }

    #[test]
    fn non_finite_never_leaks() {
        assert_eq!(RawNumeric::Number(f64::INFINITY).coerce_lossy(), 0.0);
        assert_eq!(decoded(json!("Infinity")).coerce_lossy(), 0.0);
        assert_eq!(decoded(json!("NaN")).coerce_lossy(), 0.0);
        assert_eq!(RawNumeric::Number(f64::NAN).as_f64(), None);
    }

    #[test]
    fn strict_read_rejects_everything_lenient_rescues() {
        assert_eq!(decoded(json!("3.5")).as_f64(), Some(3.5));
        assert_eq!(decoded(json!("")).as_f64(), None);
        assert_eq!(decoded(json!(true)).as_f64(), None);
        assert_eq!(decoded(json!(null)).as_f64(), None);
    }

    #[test]
    fn display_is_debuggable() {
        assert_eq!(decoded(json!("abc")).to_string(), "\"abc\"");
        assert_eq!(decoded(json!(2)).to_string(), "2");
        assert_eq!(RawNumeric::Missing.to_string(), "(missing)");
    }
}
