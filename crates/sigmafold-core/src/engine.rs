//! Cross-section engine.
//!
//! Resolves a reaction name, converts the raw table into COM-frame keV
//! and millibarns, and builds one of the two interpolation strategies.
//! Engines are immutable after construction; a different configuration
//! means building a new engine.

use crate::data::{DataStore, DataStoreError};
use crate::numerics::{
    LogLogError, LogLogExtrapolation, LogLogGridEvaluator, LogLogReinterpolation,
};
use crate::reaction::{resolve_reaction, ReactionKey, ReactionNameError};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Name(#[from] ReactionNameError),
    #[error(transparent)]
    Store(#[from] DataStoreError),
    #[error(transparent)]
    Interpolation(#[from] LogLogError),
    #[error(
        "unknown interpolation mode '{requested}'; allowed values are \
         LogLogExtrapolation and LogLogReinterpolation"
    )]
    InvalidInterpolationMode { requested: String },
}

/// The two interpolation strategies the engine can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Quadratic spline in log-log space with a power-law tail.
    #[default]
    LogLogExtrapolation,
    /// Uniform log-grid remesh with O(1) piecewise-linear evaluation.
    LogLogReinterpolation,
}

impl InterpolationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterpolationMode::LogLogExtrapolation => "LogLogExtrapolation",
            InterpolationMode::LogLogReinterpolation => "LogLogReinterpolation",
        }
    }
}

impl fmt::Display for InterpolationMode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for InterpolationMode {
    type Err = EngineError;

    fn from_str(requested: &str) -> Result<Self, Self::Err> {
        match requested {
            "LogLogExtrapolation" => Ok(InterpolationMode::LogLogExtrapolation),
            "LogLogReinterpolation" => Ok(InterpolationMode::LogLogReinterpolation),
            _ => Err(EngineError::InvalidInterpolationMode {
                requested: requested.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
enum Interpolant {
    Spline(LogLogExtrapolation),
    Remeshed(LogLogReinterpolation),
}

/// Cross-section-vs-energy function for one reaction channel.
///
/// Energies are COM-frame keV, cross sections millibarns. Evaluation is
/// `&self` over immutable data, so a built engine may be shared across
/// threads freely.
#[derive(Debug, Clone)]
pub struct CrossSectionEngine {
    key: ReactionKey,
    bt_to_com: f64,
    energy_kev: Vec<f64>,
    mode: InterpolationMode,
    interpolant: Interpolant,
}

impl CrossSectionEngine {
    /// Builds an engine from any accepted reaction notation with the
    /// default interpolation mode.
    pub fn new(reaction: &str, store: &dyn DataStore) -> Result<Self, EngineError> {
        Self::with_mode(reaction, InterpolationMode::default(), store)
    }

    /// Builds an engine from any accepted reaction notation. Both
    /// reactant masses are fetched from the store to fix the beam→COM
    /// frame factor `m_target / (m_beam + m_target)`.
    pub fn with_mode(
        reaction: &str,
        mode: InterpolationMode,
        store: &dyn DataStore,
    ) -> Result<Self, EngineError> {
        let key = resolve_reaction(reaction)?;
        let (beam, target) = key.reactants();
        let mass_beam = store.ion_mass(beam.symbol())?;
        let mass_target = store.ion_mass(target.symbol())?;
        let bt_to_com = mass_target / (mass_beam + mass_target);
        Self::build(key, bt_to_com, mode, store)
    }

    /// Builds an engine from an existing one, copying its resolved key
    /// and frame factor without re-resolving the name. The interpolation
    /// mode may differ; the interpolant is always rebuilt.
    pub fn from_engine(
        other: &CrossSectionEngine,
        mode: InterpolationMode,
        store: &dyn DataStore,
    ) -> Result<Self, EngineError> {
        Self::build(other.key.clone(), other.bt_to_com, mode, store)
    }

    fn build(
        key: ReactionKey,
        bt_to_com: f64,
        mode: InterpolationMode,
        store: &dyn DataStore,
    ) -> Result<Self, EngineError> {
        let table = store.cross_section_data(&key)?;

        // eV beam-target → keV COM, barns → mb
        let energy_kev: Vec<f64> = table
            .energy_ev()
            .iter()
            .map(|&energy| energy * bt_to_com / 1.0e3)
            .collect();
        let sigma_mb: Vec<f64> = table
            .cross_section_barns()
            .iter()
            .map(|&sigma| sigma * 1.0e3)
            .collect();

        let extrapolation = LogLogExtrapolation::from_table(&energy_kev, &sigma_mb)?;
        let interpolant = match mode {
            InterpolationMode::LogLogExtrapolation => Interpolant::Spline(extrapolation),
            InterpolationMode::LogLogReinterpolation => {
                Interpolant::Remeshed(LogLogReinterpolation::from_extrapolation(&extrapolation))
            }
        };

        Ok(Self {
            key,
            bt_to_com,
            energy_kev,
            mode,
            interpolant,
        })
    }

    /// Cross section in mb at a COM energy in keV. Energies beyond the
    /// tabulated range return extrapolated values rather than failing.
    pub fn cross_section(&self, energy_kev: f64) -> f64 {
        match &self.interpolant {
            Interpolant::Spline(interp) => interp.value(energy_kev),
            Interpolant::Remeshed(interp) => interp.value(energy_kev),
        }
    }

    pub fn cross_sections(&self, energies_kev: &[f64]) -> Vec<f64> {
        energies_kev
            .iter()
            .map(|&energy| self.cross_section(energy))
            .collect()
    }

    /// `(min, max)` COM energy of the converted raw table in keV; outside
    /// this window the engine extrapolates instead of interpolating
    /// measured data.
    pub fn prescribed_range(&self) -> (f64, f64) {
        (
            self.energy_kev[0],
            self.energy_kev[self.energy_kev.len() - 1],
        )
    }

    pub fn key(&self) -> &ReactionKey {
        &self.key
    }

    pub fn bt_to_com(&self) -> f64 {
        self.bt_to_com
    }

    pub fn mode(&self) -> InterpolationMode {
        self.mode
    }

    /// Detached hot-path evaluator, available when the engine was built
    /// with the remeshed strategy. The returned value owns its grid data
    /// and stays valid after the engine is dropped.
    pub fn detached_evaluator(&self) -> Option<LogLogGridEvaluator> {
        match &self.interpolant {
            Interpolant::Spline(_) => None,
            Interpolant::Remeshed(interp) => Some(interp.evaluator()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CrossSectionEngine, EngineError, InterpolationMode};
    use crate::data::{RawCrossSectionTable, TableDataStore};

    /// Fixture with a pure power-law D+T table so converted values can be
    /// checked in closed form.
    fn fixture_store() -> TableDataStore {
        let mut store = TableDataStore::new();
        store.insert_ion("D", 2.0);
        store.insert_ion("T", 3.0);

        // sigma = 1e-4 * (E_ev)^0.5 barns over 1 keV..1 MeV
        let energy_ev: Vec<f64> = (0..13).map(|i| 1.0e3 * 10.0_f64.powf(i as f64 / 4.0)).collect();
        let sigma_barns: Vec<f64> = energy_ev.iter().map(|&e| 1.0e-4 * e.sqrt()).collect();
        store.insert_table(
            "D+T",
            RawCrossSectionTable::new(energy_ev, sigma_barns).expect("fixture table"),
        );
        store
    }

    #[test]
    fn frame_factor_comes_from_store_masses() {
        let store = fixture_store();
        let engine = CrossSectionEngine::new("DT", &store).expect("engine");
        assert_eq!(engine.bt_to_com(), 3.0 / 5.0);
        assert_eq!(engine.key().as_str(), "D+T");
        assert_eq!(engine.mode(), InterpolationMode::LogLogExtrapolation);
    }

    #[test]
    fn prescribed_range_is_the_converted_raw_bounds() {
        let store = fixture_store();
        let engine = CrossSectionEngine::new("D+T", &store).expect("engine");

        // 1e3 eV * 0.6 / 1e3 = 0.6 keV; 1e6 eV * 0.6 / 1e3 = 600 keV
        let (low, high) = engine.prescribed_range();
        assert!((low - 0.6).abs() < 1.0e-12);
        assert!((high - 600.0).abs() < 1.0e-9);

        let remeshed = CrossSectionEngine::with_mode(
            "D+T",
            InterpolationMode::LogLogReinterpolation,
            &store,
        )
        .expect("engine");
        assert_eq!(remeshed.prescribed_range(), engine.prescribed_range());
    }

    #[test]
    fn conversion_chain_reproduces_the_table_in_engine_units() {
        let store = fixture_store();
        let engine = CrossSectionEngine::new("D+T", &store).expect("engine");

        // at E_com = 0.6 E_ev/1e3: sigma_mb = 1e-1 * sqrt(E_com*1e3/0.6)
        for com_kev in [0.6_f64, 6.0, 60.0, 600.0] {
            let expected_mb = 1.0e-1 * (com_kev * 1.0e3 / 0.6).sqrt();
            let actual = engine.cross_section(com_kev);
            assert!(
                ((expected_mb - actual) / expected_mb).abs() < 1.0e-9,
                "{com_kev} keV: expected {expected_mb}, got {actual}"
            );
        }
    }

    #[test]
    fn bulk_evaluation_matches_pointwise() {
        let store = fixture_store();
        let engine = CrossSectionEngine::new("D+T", &store).expect("engine");
        let energies = [1.0, 10.0, 100.0];
        assert_eq!(
            engine.cross_sections(&energies),
            energies.map(|e| engine.cross_section(e)).to_vec()
        );
    }

    #[test]
    fn clone_by_identity_skips_name_resolution() {
        let store = fixture_store();
        let original = CrossSectionEngine::new("t(d,n)a", &store).expect("engine");
        let copy = CrossSectionEngine::from_engine(
            &original,
            InterpolationMode::LogLogReinterpolation,
            &store,
        )
        .expect("copy");

        assert_eq!(copy.key(), original.key());
        assert_eq!(copy.bt_to_com(), original.bt_to_com());
        assert_eq!(copy.prescribed_range(), original.prescribed_range());
        assert_eq!(copy.mode(), InterpolationMode::LogLogReinterpolation);

        for energy in [1.0, 20.0, 300.0] {
            let a = original.cross_section(energy);
            let b = copy.cross_section(energy);
            assert!(((a - b) / a).abs() < 1.0e-4, "{energy} keV: {a} vs {b}");
        }
    }

    #[test]
    fn detached_evaluator_exists_only_for_the_remeshed_mode() {
        let store = fixture_store();
        let spline = CrossSectionEngine::new("D+T", &store).expect("engine");
        assert!(spline.detached_evaluator().is_none());

        let remeshed = CrossSectionEngine::with_mode(
            "D+T",
            InterpolationMode::LogLogReinterpolation,
            &store,
        )
        .expect("engine");
        let evaluator = remeshed.detached_evaluator().expect("evaluator");
        let reference = remeshed.cross_section(50.0);
        drop(remeshed);
        assert_eq!(evaluator.value(50.0), reference);
    }

    #[test]
    fn mode_parsing_accepts_exactly_the_two_documented_names() {
        assert_eq!(
            "LogLogExtrapolation".parse::<InterpolationMode>().expect("default mode"),
            InterpolationMode::LogLogExtrapolation
        );
        assert_eq!(
            "LogLogReinterpolation".parse::<InterpolationMode>().expect("remeshed mode"),
            InterpolationMode::LogLogReinterpolation
        );

        let error = "bogus".parse::<InterpolationMode>().expect_err("unknown mode");
        let message = error.to_string();
        assert!(message.contains("bogus"));
        assert!(message.contains("LogLogExtrapolation"));
        assert!(message.contains("LogLogReinterpolation"));
    }

    #[test]
    fn unknown_names_masses_and_tables_propagate() {
        let store = fixture_store();
        assert!(matches!(
            CrossSectionEngine::new("not-a-reaction", &store).expect_err("bad name"),
            EngineError::Name(_)
        ));
        // resolvable name whose species masses are not in the store
        assert!(matches!(
            CrossSectionEngine::new("pB", &store).expect_err("missing masses"),
            EngineError::Store(_)
        ));
        // resolvable name with masses but no table
        assert!(matches!(
            CrossSectionEngine::new("2T", &fixture_store_with_triton_only())
                .expect_err("missing table"),
            EngineError::Store(_)
        ));
    }

    fn fixture_store_with_triton_only() -> TableDataStore {
        let mut store = TableDataStore::new();
        store.insert_ion("T", 3.0);
        store
    }
}
