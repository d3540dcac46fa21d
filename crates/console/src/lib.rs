//! `clinic-console` — command-line host for the clinic domain crates.
//!
//! Loads medication records from a saved inventory-view payload, renders the
//! expiry overview, and evaluates session gate decisions. HTTP fetching stays
//! outside: the console only reads what the backend already returned.

pub mod config;
pub mod report;
pub mod source;

pub use config::ConsoleConfig;
pub use report::OverviewReport;
pub use source::{JsonFileSource, MedicationSource, SourceError, StaticSource, decode_view};
