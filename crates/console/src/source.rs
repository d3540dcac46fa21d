//! Where medication records come from.

use std::path::{Path, PathBuf};

use thiserror::Error;

use clinic_inventory::Medication;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed inventory view payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Supplier of medication records (already fetched from the backend).
pub trait MedicationSource {
    fn fetch(&self) -> Result<Vec<Medication>, SourceError>;
}

/// Decode the JSON array returned by the inventory view endpoint.
pub fn decode_view(json: &str) -> Result<Vec<Medication>, SourceError> {
    Ok(serde_json::from_str(json)?)
}

/// A saved inventory-view response on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MedicationSource for JsonFileSource {
    fn fetch(&self) -> Result<Vec<Medication>, SourceError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        let meds = decode_view(&raw)?;
        tracing::debug!(path = %self.path.display(), count = meds.len(), "loaded medications");
        Ok(meds)
    }
}

/// Fixed in-memory records.
#[derive(Debug, Clone, Default)]
pub struct StaticSource(pub Vec<Medication>);

impl MedicationSource for StaticSource {
    fn fetch(&self) -> Result<Vec<Medication>, SourceError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_path() {
        let err = JsonFileSource::new("/definitely/not/here.json").fetch().unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn corrupt_medication_does_not_fail_the_payload() {
        let meds = decode_view(
            r#"[
                {"med_id": 1, "name": "Paracetamol", "price": 45, "stock": [
                    {"inv_id": 1, "in_day": "2024-01-01", "exp_day": "2025-01-01", "quantity": 10}
                ]},
                {"med_id": 2, "name": "Aspirin", "price": -1, "stock": []},
                {"med_id": 3, "name": "Ibuprofen", "price": 20, "stock": [
                    {"inv_id": 2, "in_day": "2024-01-01", "exp_day": "2025-01-01", "quantity": null}
                ]}
            ]"#,
        )
        .unwrap();

        assert_eq!(meds.len(), 3);
        assert_eq!(meds[0].name, "Paracetamol");
        assert_eq!(meds[0].checked_price().unwrap(), 45);
        assert_eq!(meds[0].total_quantity().unwrap(), 10);
        assert!(meds[1].checked_price().unwrap_err().is_data_integrity());
        assert!(meds[2].total_quantity().unwrap_err().is_data_integrity());
    }

    #[test]
    fn non_array_payload_is_a_decode_error() {
        let err = decode_view(r#"{"detail":"Not Found"}"#).unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }
}
