//! Price values as transmitted by the backend
//!
//! Depending on the database driver, prices arrive either as JSON numbers
//! (`REAL`) or as strings (`DECIMAL`). The raw value is kept so that a
//! malformed price is visible to aggregations instead of being coerced to 0.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw price field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl PriceValue {
    /// Parse into a decimal amount. `None` when the field is not a number.
    pub fn parse(&self) -> Option<Decimal> {
        match self {
            PriceValue::Number(n) => Decimal::from_f64(*n),
            PriceValue::Text(s) => {
                let s = s.trim();
                Decimal::from_str(s)
                    .or_else(|_| Decimal::from_scientific(s))
                    .ok()
            }
        }
    }
}

impl From<Decimal> for PriceValue {
    fn from(amount: Decimal) -> Self {
        PriceValue::Text(amount.to_string())
    }
}

impl fmt::Display for PriceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceValue::Number(n) => write!(f, "{}", n),
            PriceValue::Text(s) => f.write_str(s),
        }
    }
}
