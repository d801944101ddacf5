//! Cross-section data access.
//!
//! [`DataStore`] is the injectable seam between the engine and whatever
//! holds the tabulated data; [`TableDataStore`] is the in-memory
//! implementation backing both loaded JSON datasets and test fixtures.
//! [`builtin_store`] exposes the embedded default dataset, loaded once per
//! process.

mod builtin;
mod dataset;

pub use builtin::builtin_store;

use crate::reaction::ReactionKey;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("energy and cross-section lengths differ: {energy_len} vs {cross_section_len}")]
    LengthMismatch {
        energy_len: usize,
        cross_section_len: usize,
    },
    #[error("cross-section table requires at least 2 points, got {len}")]
    TooShort { len: usize },
    #[error("table energies must be strictly increasing at index {index}")]
    NonIncreasingEnergy { index: usize },
    #[error("table energy at index {index} is not finite")]
    NonFiniteEnergy { index: usize },
    #[error("table cross section at index {index} must be positive and finite")]
    NonPositiveCrossSection { index: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum DataStoreError {
    #[error("no cross-section table for reaction '{key}'")]
    UnknownReactionData { key: String },
    #[error("unknown species symbol '{symbol}'")]
    UnknownSpecies { symbol: String },
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("failed to read dataset file '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dataset document")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
}

/// Raw tabulated curve as the data source provides it: energies in eV
/// (lab or beam-target frame per source convention), cross sections in
/// barns. Validated on construction, immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCrossSectionTable {
    energy_ev: Vec<f64>,
    cross_section_barns: Vec<f64>,
}

impl RawCrossSectionTable {
    pub fn new(energy_ev: Vec<f64>, cross_section_barns: Vec<f64>) -> Result<Self, TableError> {
        if energy_ev.len() != cross_section_barns.len() {
            return Err(TableError::LengthMismatch {
                energy_len: energy_ev.len(),
                cross_section_len: cross_section_barns.len(),
            });
        }
        if energy_ev.len() < 2 {
            return Err(TableError::TooShort {
                len: energy_ev.len(),
            });
        }
        for (index, &value) in energy_ev.iter().enumerate() {
            if !value.is_finite() {
                return Err(TableError::NonFiniteEnergy { index });
            }
            if index > 0 && value <= energy_ev[index - 1] {
                return Err(TableError::NonIncreasingEnergy { index });
            }
        }
        for (index, &value) in cross_section_barns.iter().enumerate() {
            if !(value > 0.0) || !value.is_finite() {
                return Err(TableError::NonPositiveCrossSection { index });
            }
        }
        Ok(Self {
            energy_ev,
            cross_section_barns,
        })
    }

    pub fn energy_ev(&self) -> &[f64] {
        &self.energy_ev
    }

    pub fn cross_section_barns(&self) -> &[f64] {
        &self.cross_section_barns
    }

    pub fn point_count(&self) -> usize {
        self.energy_ev.len()
    }

    /// `(min, max)` of the tabulated energy column, in eV.
    pub fn energy_bounds_ev(&self) -> (f64, f64) {
        (
            self.energy_ev[0],
            self.energy_ev[self.energy_ev.len() - 1],
        )
    }
}

/// Source of tabulated cross sections and ion masses, injectable so the
/// engine can run against fixtures as easily as against the embedded or
/// file-loaded datasets.
pub trait DataStore {
    fn cross_section_data(&self, key: &ReactionKey) -> Result<RawCrossSectionTable, DataStoreError>;

    fn ion_mass(&self, symbol: &str) -> Result<f64, DataStoreError>;
}

/// In-memory store mapping canonical reaction keys to tables and species
/// symbols to masses.
#[derive(Debug, Clone, Default)]
pub struct TableDataStore {
    ions: HashMap<String, f64>,
    tables: HashMap<String, RawCrossSectionTable>,
}

impl TableDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_ion(&mut self, symbol: &str, mass_amu: f64) {
        self.ions.insert(symbol.to_string(), mass_amu);
    }

    pub fn insert_table(&mut self, key: &str, table: RawCrossSectionTable) {
        self.tables.insert(key.to_string(), table);
    }

    /// Canonical keys with backing tables, sorted for stable listings.
    pub fn reaction_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl DataStore for TableDataStore {
    fn cross_section_data(&self, key: &ReactionKey) -> Result<RawCrossSectionTable, DataStoreError> {
        self.tables
            .get(key.as_str())
            .cloned()
            .ok_or_else(|| DataStoreError::UnknownReactionData {
                key: key.as_str().to_string(),
            })
    }

    fn ion_mass(&self, symbol: &str) -> Result<f64, DataStoreError> {
        self.ions
            .get(symbol)
            .copied()
            .ok_or_else(|| DataStoreError::UnknownSpecies {
                symbol: symbol.to_string(),
            })
    }
}
