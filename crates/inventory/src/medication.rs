use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use clinic_core::{DomainError, DomainResult, Entity, MedicationId, StockLotId};

use crate::dates;
use crate::expiry::{ExpiryPolicy, ExpiryStatus};
use crate::stock::{self, Quantity};

/// A single batch of medication stock with its own quantity and expiry date.
///
/// `quantity` is kept exactly as received (including a missing value) so that
/// corrupt rows surface as integrity errors during aggregation instead of
/// being clamped away or failing the whole payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLot {
    pub inv_id: StockLotId,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default, with = "dates::lenient")]
    pub in_day: Option<NaiveDate>,
    #[serde(default, with = "dates::lenient")]
    pub exp_day: Option<NaiveDate>,
}

impl StockLot {
    pub fn new(inv_id: StockLotId, quantity: i64, in_day: NaiveDate, exp_day: NaiveDate) -> Self {
        Self {
            inv_id,
            quantity: Some(quantity),
            in_day: Some(in_day),
            exp_day: Some(exp_day),
        }
    }

    /// The lot's quantity, checked for presence and non-negativity.
    pub fn checked_quantity(&self) -> DomainResult<Quantity> {
        stock::lot_quantity(self)
    }

    pub fn expiry_status(&self, reference: NaiveDate) -> ExpiryStatus {
        ExpiryPolicy::default().classify(self.exp_day, reference)
    }
}

impl Entity for StockLot {
    type Id = StockLotId;

    fn id(&self) -> Self::Id {
        self.inv_id
    }
}

/// Free-text clinical notes attached to a medication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedInfo {
    #[serde(default)]
    pub guideline: Option<String>,
    #[serde(default)]
    pub warning: Option<String>,
}

impl MedInfo {
    pub fn guideline(&self) -> Option<&str> {
        non_blank(self.guideline.as_deref())
    }

    pub fn warning(&self) -> Option<&str> {
        non_blank(self.warning.as_deref())
    }

    /// True when neither note carries any text ("No info available").
    pub fn is_empty(&self) -> bool {
        self.guideline().is_none() && self.warning().is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Medication record as returned by the inventory view endpoint, with its
/// stock lots and notes nested in.
///
/// `price` is signed because the backend never validates it; use
/// [`Medication::checked_price`] before displaying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub med_id: MedicationId,
    pub name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    pub price: i64,
    #[serde(default)]
    pub stock: Vec<StockLot>,
    #[serde(default)]
    pub med_info: MedInfo,
}

impl Medication {
    pub fn common_name(&self) -> Option<&str> {
        non_blank(self.common_name.as_deref())
    }

    pub fn checked_price(&self) -> DomainResult<u64> {
        u64::try_from(self.price).map_err(|_| {
            tracing::warn!(med_id = %self.med_id, price = self.price, "medication with negative price");
            DomainError::data_integrity(format!(
                "medication {} has negative price {}",
                self.med_id, self.price
            ))
        })
    }

    pub fn total_quantity(&self) -> DomainResult<u64> {
        stock::total_quantity(&self.stock)
    }

    /// Worst-case expiry status across all lots.
    pub fn expiry_status(&self, reference: NaiveDate) -> ExpiryStatus {
        ExpiryPolicy::default().aggregate(&self.stock, reference)
    }
}

impl Entity for Medication {
    type Id = MedicationId;

    fn id(&self) -> Self::Id {
        self.med_id
    }
}
