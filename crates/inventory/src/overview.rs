//! Display-ready projection of medications for the medication overview view.
//!
//! Everything a medication card needs (per-lot status, aggregate warning,
//! total on hand) is computed here against an explicit reference date, so the
//! view only renders plain values.

use chrono::NaiveDate;
use serde::Serialize;

use clinic_core::{MedicationId, StockLotId};

use crate::expiry::{ExpiryPolicy, ExpiryStatus, days_until};
use crate::medication::{MedInfo, Medication, StockLot};
use crate::stock::total_quantity;

/// One stock lot as rendered in the expanded card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotRow {
    pub inv_id: StockLotId,
    pub quantity: Option<i64>,
    pub in_day: Option<NaiveDate>,
    pub exp_day: Option<NaiveDate>,
    pub status: ExpiryStatus,
    pub days_until_expiry: Option<i64>,
}

impl LotRow {
    fn build(lot: &StockLot, reference: NaiveDate, policy: &ExpiryPolicy) -> Self {
        Self {
            inv_id: lot.inv_id,
            quantity: lot.quantity,
            in_day: lot.in_day,
            exp_day: lot.exp_day,
            status: policy.classify(lot.exp_day, reference),
            days_until_expiry: lot.exp_day.map(|exp| days_until(exp, reference)),
        }
    }
}

/// Total on hand, or the reason it cannot be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StockTotal {
    Units { units: u64 },
    Unreliable { reason: String },
}

impl StockTotal {
    pub fn units(&self) -> Option<u64> {
        match self {
            StockTotal::Units { units } => Some(*units),
            StockTotal::Unreliable { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicationOverview {
    pub med_id: MedicationId,
    pub name: String,
    pub common_name: Option<String>,
    /// `None` when the backend sent a negative price.
    pub price: Option<u64>,
    pub warning: ExpiryStatus,
    pub total: StockTotal,
    pub lots: Vec<LotRow>,
    pub med_info: MedInfo,
}

impl MedicationOverview {
    pub fn build(med: &Medication, reference: NaiveDate, policy: &ExpiryPolicy) -> Self {
        let total = match total_quantity(&med.stock) {
            Ok(units) => StockTotal::Units { units },
            Err(err) => StockTotal::Unreliable {
                reason: err.to_string(),
            },
        };

        Self {
            med_id: med.med_id,
            name: med.name.clone(),
            common_name: med.common_name().map(str::to_string),
            price: med.checked_price().ok(),
            warning: policy.aggregate(&med.stock, reference),
            total,
            lots: med
                .stock
                .iter()
                .map(|lot| LotRow::build(lot, reference, policy))
                .collect(),
            med_info: med.med_info.clone(),
        }
    }

    /// Whether the card should show the "in stock" colouring.
    ///
    /// An unreliable total is never "in stock".
    pub fn in_stock(&self) -> bool {
        self.total.units().is_some_and(|units| units > 0)
    }

    /// Whether every displayed figure on the card can be trusted.
    pub fn is_reliable(&self) -> bool {
        self.price.is_some() && self.total.units().is_some()
    }
}

/// Build overviews for every medication. Each card is independent: one
/// corrupt medication does not affect the others.
pub fn summarize(
    meds: &[Medication],
    reference: NaiveDate,
    policy: &ExpiryPolicy,
) -> Vec<MedicationOverview> {
    meds.iter()
        .map(|med| MedicationOverview::build(med, reference, policy))
        .collect()
}

/// Header counts for the overview page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverviewTotals {
    pub medications: usize,
    pub expired: usize,
    pub expiring_soon: usize,
    pub out_of_stock: usize,
    pub unreliable: usize,
}

impl OverviewTotals {
    pub fn from_overviews(overviews: &[MedicationOverview]) -> Self {
        overviews.iter().fold(Self::default(), |mut acc, ov| {
            acc.medications += 1;
            match ov.warning {
                ExpiryStatus::Expired => acc.expired += 1,
                ExpiryStatus::ExpiringSoon => acc.expiring_soon += 1,
                ExpiryStatus::Ok => {}
            }
            if ov.total.units() == Some(0) {
                acc.out_of_stock += 1;
            }
            if !ov.is_reliable() {
                acc.unreliable += 1;
            }
            acc
        })
    }
}
