//! Medication inventory domain module.
//!
//! Expiry classification, stock aggregation and intake validation for the
//! clinic's medication views, implemented purely as deterministic domain
//! logic (no IO, no HTTP, no clock reads). "Today" is always passed in.

pub mod dates;
pub mod expiry;
pub mod intake;
pub mod medication;
pub mod overview;
pub mod stock;

pub use expiry::{ExpiryPolicy, ExpiryStatus, aggregate_status, classify, days_until};
pub use intake::{NewMedInfo, NewMedication, NewStockLot};
pub use medication::{MedInfo, Medication, StockLot};
pub use overview::{LotRow, MedicationOverview, OverviewTotals, StockTotal, summarize};
pub use stock::{Quantity, total_quantity};
