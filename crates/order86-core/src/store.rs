//! The wizard data store: an id → record map loaded once at startup.

use std::collections::HashMap;
use std::path::Path;

use crate::wizard::WizardRecord;

/// Read-only mapping from wizard id to attribute record.
///
/// Loaded synchronously at process start and never mutated afterwards.
/// A failed load yields an empty store; the server keeps running and
/// every wizard-dependent route answers 404.
#[derive(Debug, Default)]
pub struct WizardStore {
    records: HashMap<u32, WizardRecord>,
}

impl WizardStore {
    /// Build a store from already-parsed records.
    ///
    /// Duplicate ids keep the last record seen.
    pub fn from_records(records: Vec<WizardRecord>) -> Self {
        let mut map = HashMap::with_capacity(records.len());
        for record in records {
            let id = record.id;
            if map.insert(id, record).is_some() {
                tracing::warn!(id, "duplicate wizard id in data source, keeping last");
            }
        }
        Self { records: map }
    }

    /// Parse a JSON array of records.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let records: Vec<WizardRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Load the bundled data source from disk.
    ///
    /// A missing or malformed file is logged and leaves the store empty.
    pub fn load(path: &Path) -> Self {
        let loaded = std::fs::read_to_string(path)
            .map_err(crate::Error::from)
            .and_then(|json| Self::from_json(&json));
        match loaded {
            Ok(store) => {
                tracing::info!(
                    path = %path.display(),
                    wizards = store.len(),
                    "wizard data loaded"
                );
                store
            }
            Err(error) => {
                tracing::error!(
                    path = %path.display(),
                    %error,
                    "failed to load wizard data, continuing with empty store"
                );
                Self::default()
            }
        }
    }

    /// Look up a record by id.
    pub fn lookup(&self, id: u32) -> Option<&WizardRecord> {
        self.records.get(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
