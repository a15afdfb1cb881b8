//! SeedDocument - `{ "calls": [...] }` collection document

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::Call;
use crate::domain::errors::DomainError;

/// On-disk shape of a call collection, used for seeding and file storage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub calls: Vec<Call>,
}

impl SeedDocument {
    pub fn new(calls: Vec<Call>) -> Self {
        Self { calls }
    }

    /// Parse a document and check every record: ids present and unique,
    /// field values within the same limits create and update enforce
    pub fn parse(json: &str) -> Result<Self, DomainError> {
        let doc: SeedDocument = serde_json::from_str(json)
            .map_err(|e| DomainError::Repository(format!("Invalid call document: {}", e)))?;
        doc.check_ids()?;
        for call in &doc.calls {
            call.validate()?;
        }
        Ok(doc)
    }

    fn check_ids(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::with_capacity(self.calls.len());
        for call in &self.calls {
            if call.id.is_empty() {
                return Err(DomainError::Repository(
                    "Call document contains a record without id".to_string(),
                ));
            }
            if !seen.insert(call.id.as_str()) {
                return Err(DomainError::Conflict(format!(
                    "Duplicate call id in document: {}",
                    call.id
                )));
            }
        }
        Ok(())
    }
}
