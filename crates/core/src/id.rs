//! Strongly-typed identifiers used across the domain.
//!
//! The clinic backend hands out auto-increment integer keys, so identifiers
//! wrap an `i64` rather than a UUID.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a medication (catalog entry).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MedicationId(i64);

/// Identifier of a single stock lot (inventory row).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockLotId(i64);

macro_rules! impl_int_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn get(&self) -> i64 {
                self.0
            }

            /// Backend keys start at 1; anything else was never issued.
            pub fn is_issued(&self) -> bool {
                self.0 >= 1
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_int_newtype!(MedicationId, "MedicationId");
impl_int_newtype!(StockLotId, "StockLotId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_form_input() {
        let id: MedicationId = " 12 ".parse().unwrap();
        assert_eq!(id.get(), 12);
        assert!(id.is_issued());
        assert!(!MedicationId::new(0).is_issued());
    }

    #[test]
    fn rejects_non_numeric_input() {
        let err = "abc".parse::<StockLotId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(msg) if msg.starts_with("StockLotId")));
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&StockLotId::new(4)).unwrap();
        assert_eq!(json, "4");
    }
}
