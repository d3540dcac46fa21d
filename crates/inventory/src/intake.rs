//! Intake requests: the validated bodies sent when registering a medication,
//! receiving stock, or attaching clinical notes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use clinic_core::{DomainError, DomainResult, MedicationId};

use crate::stock::Quantity;

/// Body for registering a new medication in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMedication {
    pub name: String,
    pub common_name: Option<String>,
    pub price: i64,
}

impl NewMedication {
    pub fn new(name: impl Into<String>, common_name: Option<String>, price: i64) -> DomainResult<Self> {
        let name: String = name.into();
        let req = Self {
            name: name.trim().to_string(),
            common_name: common_name
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            price,
        };
        req.validate()?;
        Ok(req)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.price < 0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(())
    }
}

/// Body for receiving a stock lot against an existing medication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStockLot {
    pub med_id: MedicationId,
    pub in_day: NaiveDate,
    pub exp_day: NaiveDate,
    pub quantity: Quantity,
}

impl NewStockLot {
    /// Validate raw form values into a request.
    pub fn new(
        med_id: MedicationId,
        in_day: NaiveDate,
        exp_day: NaiveDate,
        quantity: i64,
    ) -> DomainResult<Self> {
        let req = Self {
            med_id,
            in_day,
            exp_day,
            quantity: Quantity::try_from(quantity)?,
        };
        req.validate()?;
        Ok(req)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.med_id.is_issued() {
            return Err(DomainError::validation("med_id must be at least 1"));
        }
        if self.quantity.is_zero() {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        if self.exp_day < self.in_day {
            return Err(DomainError::validation(format!(
                "exp_day {} is before in_day {}",
                self.exp_day, self.in_day
            )));
        }
        Ok(())
    }
}

/// Body for attaching guideline/warning notes to a medication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMedInfo {
    pub med_id: MedicationId,
    pub guideline: Option<String>,
    pub warning: Option<String>,
}

impl NewMedInfo {
    /// Both notes may be blank; the card then shows "No info available".
    pub fn validate(&self) -> DomainResult<()> {
        if !self.med_id.is_issued() {
            return Err(DomainError::validation("med_id must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_medication_trims_and_validates() {
        let req = NewMedication::new("  Ibuprofen ", Some("  ".to_string()), 80).unwrap();
        assert_eq!(req.name, "Ibuprofen");
        assert_eq!(req.common_name, None);

        assert!(NewMedication::new("   ", None, 10).is_err());
        assert!(NewMedication::new("Ibuprofen", None, -1).is_err());
    }

    #[test]
    fn stock_lot_serializes_to_backend_shape() {
        let req = NewStockLot::new(MedicationId::new(1), date(2024, 6, 1), date(2025, 6, 1), 20).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "med_id": 1,
                "in_day": "2024-06-01",
                "exp_day": "2025-06-01",
                "quantity": 20
            })
        );
    }

    #[test]
    fn stock_lot_rejects_bad_input() {
        let (in_day, exp_day) = (date(2024, 6, 1), date(2025, 6, 1));
        assert!(NewStockLot::new(MedicationId::new(0), in_day, exp_day, 5).is_err());
        assert!(NewStockLot::new(MedicationId::new(1), in_day, exp_day, 0).is_err());
        assert!(NewStockLot::new(MedicationId::new(1), in_day, exp_day, -5).is_err());
        assert!(NewStockLot::new(MedicationId::new(1), exp_day, in_day, 5).is_err());
        assert!(NewStockLot::new(MedicationId::new(1), in_day, in_day, 5).is_ok());
    }

    #[test]
    fn med_info_accepts_blank_notes() {
        let mut req = NewMedInfo {
            med_id: MedicationId::new(3),
            guideline: None,
            warning: Some(" ".to_string()),
        };
        assert!(req.validate().is_ok());

        req.warning = Some("May cause drowsiness".to_string());
        assert!(req.validate().is_ok());

        req.med_id = MedicationId::new(0);
        assert!(req.validate().is_err());
    }
}
