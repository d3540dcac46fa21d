//! Expiry classification of stock lots.
//!
//! Classification is a pure function of `(exp_day, reference)`. The reference
//! date is always supplied by the caller; nothing here reads the system clock,
//! and no status is ever cached on a lot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use clinic_core::ValueObject;

use crate::medication::StockLot;

/// Default look-ahead window for "expiring soon", in days.
pub const DEFAULT_WARNING_DAYS: u32 = 30;

/// Expiry status of a lot (or, aggregated, of a medication).
///
/// Variants are ordered by severity: `Ok < ExpiringSoon < Expired`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    Ok,
    ExpiringSoon,
    Expired,
}

impl ValueObject for ExpiryStatus {}

impl ExpiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryStatus::Ok => "ok",
            ExpiryStatus::ExpiringSoon => "soon",
            ExpiryStatus::Expired => "expired",
        }
    }

    pub fn is_warning(&self) -> bool {
        *self != ExpiryStatus::Ok
    }

    /// Badge shown next to a single stock lot.
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            ExpiryStatus::Ok => None,
            ExpiryStatus::ExpiringSoon => Some("EXPIRES SOON"),
            ExpiryStatus::Expired => Some("EXPIRED"),
        }
    }

    /// Badge shown on a medication card for its aggregate status.
    pub fn warning_badge(&self) -> Option<&'static str> {
        match self {
            ExpiryStatus::Ok => None,
            ExpiryStatus::ExpiringSoon => Some("STOCK EXPIRING SOON"),
            ExpiryStatus::Expired => Some("HAS EXPIRED STOCK"),
        }
    }
}

impl core::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification thresholds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryPolicy {
    warning_days: u32,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            warning_days: DEFAULT_WARNING_DAYS,
        }
    }
}

impl ExpiryPolicy {
    pub fn new(warning_days: u32) -> Self {
        Self { warning_days }
    }

    pub fn warning_days(&self) -> u32 {
        self.warning_days
    }

    /// Classify one expiry date against `reference`.
    ///
    /// - past expiry (strictly before `reference`) → `Expired`
    /// - expiry within `0..=warning_days` days → `ExpiringSoon`
    /// - later → `Ok`
    /// - unknown expiry → `Ok`
    pub fn classify(&self, exp_day: Option<NaiveDate>, reference: NaiveDate) -> ExpiryStatus {
        let Some(exp_day) = exp_day else {
            return ExpiryStatus::Ok;
        };

        let diff = days_until(exp_day, reference);
        if diff < 0 {
            ExpiryStatus::Expired
        } else if diff <= i64::from(self.warning_days) {
            ExpiryStatus::ExpiringSoon
        } else {
            ExpiryStatus::Ok
        }
    }

    /// Worst status across `lots`; `Ok` for no lots.
    pub fn aggregate<'a, I>(&self, lots: I, reference: NaiveDate) -> ExpiryStatus
    where
        I: IntoIterator<Item = &'a StockLot>,
    {
        lots.into_iter()
            .map(|lot| self.classify(lot.exp_day, reference))
            .max()
            .unwrap_or(ExpiryStatus::Ok)
    }
}

/// Whole days from `reference` until `exp_day` (negative once past).
pub fn days_until(exp_day: NaiveDate, reference: NaiveDate) -> i64 {
    exp_day.signed_duration_since(reference).num_days()
}

/// Classify with the default 30-day window.
pub fn classify(exp_day: Option<NaiveDate>, reference: NaiveDate) -> ExpiryStatus {
    ExpiryPolicy::default().classify(exp_day, reference)
}

/// Aggregate with the default 30-day window.
pub fn aggregate_status(lots: &[StockLot], reference: NaiveDate) -> ExpiryStatus {
    ExpiryPolicy::default().aggregate(lots, reference)
}
