//! Stock quantities and on-hand totals.

use serde::{Deserialize, Serialize};

use clinic_core::{DomainError, DomainResult, ValueObject};

use crate::medication::StockLot;

/// A validated, non-negative unit count.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u64);

impl ValueObject for Quantity {}

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub fn new(units: u64) -> Self {
        Self(units)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Quantity) -> Option<Quantity> {
        self.0.checked_add(other.0).map(Quantity)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Quantity)
            .map_err(|_| DomainError::validation(format!("quantity cannot be negative (got {value})")))
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

pub(crate) fn lot_quantity(lot: &StockLot) -> DomainResult<Quantity> {
    let Some(raw) = lot.quantity else {
        tracing::warn!(inv_id = %lot.inv_id, "stock lot without quantity");
        return Err(DomainError::data_integrity(format!(
            "stock lot {} has no quantity",
            lot.inv_id
        )));
    };
    Quantity::try_from(raw).map_err(|_| {
        tracing::warn!(inv_id = %lot.inv_id, quantity = raw, "stock lot with negative quantity");
        DomainError::data_integrity(format!("stock lot {} has negative quantity {raw}", lot.inv_id))
    })
}

/// Total units on hand across `lots`, regardless of expiry status.
///
/// Fails with [`DomainError::DataIntegrity`] if any lot carries a negative or
/// missing quantity (or the sum overflows); a partial total is never returned.
pub fn total_quantity(lots: &[StockLot]) -> DomainResult<u64> {
    lots.iter()
        .try_fold(Quantity::ZERO, |acc, lot| {
            let qty = lot_quantity(lot)?;
            acc.checked_add(qty).ok_or_else(|| {
                DomainError::data_integrity(format!("stock total overflows at lot {}", lot.inv_id))
            })
        })
        .map(|total| total.get())
}
