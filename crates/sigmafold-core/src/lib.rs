//! Fusion cross-section name resolution and interpolation.
//!
//! The crate resolves textual fusion-reaction descriptions (`"DT"`,
//! `"D+T→n+α"`, `"t(d,n)a"`) to one canonical [`ReactionKey`] per reaction
//! channel, then builds a continuous cross-section-vs-energy function from
//! tabulated data: a spline-based extrapolating interpolant in log-log
//! space, or a remeshed piecewise-linear variant with O(1) evaluation for
//! hot loops.
//!
//! ```
//! use sigmafold_core::{builtin_store, CrossSectionEngine};
//!
//! let engine = CrossSectionEngine::new("D+T→n+α", builtin_store()).unwrap();
//! let sigma_mb = engine.cross_section(64.0);
//! assert!(sigma_mb > 4.0e3);
//! ```

pub mod data;
pub mod engine;
pub mod numerics;
pub mod reaction;
pub mod species;

pub use data::{builtin_store, DataStore, DataStoreError, RawCrossSectionTable, TableDataStore, TableError};
pub use engine::{CrossSectionEngine, EngineError, InterpolationMode};
pub use numerics::{LogLogExtrapolation, LogLogGridEvaluator, LogLogReinterpolation};
pub use reaction::{resolve_reaction, ReactionKey, ReactionNameError};
pub use species::{Species, SpeciesError};
