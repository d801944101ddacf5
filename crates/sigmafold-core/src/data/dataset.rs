//! JSON dataset documents.
//!
//! A dataset holds an `ions` section (species symbol → record with at
//! least a `mass` field) and a `reactions` section (canonical key →
//! energy/cross-section columns). Tables are validated structurally while
//! the document is turned into a [`TableDataStore`].

use super::{DataStoreError, RawCrossSectionTable, TableDataStore};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct DatasetDocument {
    #[serde(default)]
    ions: BTreeMap<String, IonRecord>,
    #[serde(default)]
    reactions: BTreeMap<String, ReactionRecord>,
}

/// Persisted ion form; extra fields in the source JSON are ignored.
#[derive(Debug, Deserialize)]
pub(super) struct IonRecord {
    pub(super) mass: f64,
}

#[derive(Debug, Deserialize)]
struct ReactionRecord {
    energy_ev: Vec<f64>,
    cross_section_barns: Vec<f64>,
}

impl TableDataStore {
    /// Builds a store from a JSON dataset document.
    pub fn from_json_str(content: &str) -> Result<Self, DataStoreError> {
        let document: DatasetDocument =
            serde_json::from_str(content).map_err(|source| DataStoreError::Parse { source })?;

        let mut store = TableDataStore::new();
        for (symbol, record) in document.ions {
            store.insert_ion(&symbol, record.mass);
        }
        for (key, record) in document.reactions {
            let table = RawCrossSectionTable::new(record.energy_ev, record.cross_section_barns)?;
            store.insert_table(&key, table);
        }
        Ok(store)
    }

    /// Reads and parses a JSON dataset file.
    pub fn from_json_file(path: &Path) -> Result<Self, DataStoreError> {
        let content = fs::read_to_string(path).map_err(|source| DataStoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}

/// Parses the bare object-of-objects ion mapping (the persisted
/// `ions.json` form, without a surrounding dataset document).
pub(super) fn parse_ion_records(
    content: &str,
) -> Result<BTreeMap<String, IonRecord>, DataStoreError> {
    serde_json::from_str(content).map_err(|source| DataStoreError::Parse { source })
}
