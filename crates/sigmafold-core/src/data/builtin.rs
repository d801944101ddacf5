//! Embedded default dataset.
//!
//! Ion masses come from the persisted `ions.json` form; the sample D+T
//! table is generated from the Bosch-Hale cross-section parametrization
//! so the crate is usable without external data files. The store is built
//! once per process and shared behind [`builtin_store`].

use super::dataset::parse_ion_records;
use super::{RawCrossSectionTable, TableDataStore};
use crate::species::Species;
use once_cell::sync::Lazy;

const IONS_JSON: &str = include_str!("ions.json");

/// Bosch-Hale D+T fit coefficients (COM energy in keV, sigma in mb).
const DT_GAMOW_KEV_SQRT: f64 = 34.3827;
const DT_A: [f64; 5] = [6.927e4, 7.454e8, 2.050e6, 5.2002e4, 0.0];
const DT_B: [f64; 4] = [6.38e1, -9.95e-1, 6.981e-5, 1.728e-4];

/// Fit validity window, COM keV.
const DT_TABLE_LOW_KEV: f64 = 0.5;
const DT_TABLE_HIGH_KEV: f64 = 550.0;
const DT_TABLE_POINTS: usize = 160;

static BUILTIN: Lazy<TableDataStore> = Lazy::new(build_builtin_store);

/// Process-wide default store: loaded once, memoized, never reloaded.
pub fn builtin_store() -> &'static TableDataStore {
    &BUILTIN
}

fn build_builtin_store() -> TableDataStore {
    let ions = parse_ion_records(IONS_JSON).expect("embedded ions.json is well-formed");

    let mut store = TableDataStore::new();
    for (symbol, record) in ions {
        store.insert_ion(&symbol, record.mass);
    }
    store.insert_table("D+T", sample_dt_table());
    store
}

/// D+T table in the raw store convention: beam-target energies in eV,
/// cross sections in barns, log-spaced over the fit window.
fn sample_dt_table() -> RawCrossSectionTable {
    let bt_to_com = Species::Triton.mass_amu()
        / (Species::Deuteron.mass_amu() + Species::Triton.mass_amu());
    let ln_low = DT_TABLE_LOW_KEV.ln();
    let ln_high = DT_TABLE_HIGH_KEV.ln();

    let mut energy_ev = Vec::with_capacity(DT_TABLE_POINTS);
    let mut cross_section_barns = Vec::with_capacity(DT_TABLE_POINTS);
    for index in 0..DT_TABLE_POINTS {
        let fraction = index as f64 / (DT_TABLE_POINTS - 1) as f64;
        let com_kev = (ln_low + fraction * (ln_high - ln_low)).exp();
        energy_ev.push(com_kev * 1.0e3 / bt_to_com);
        cross_section_barns.push(bosch_hale_dt_mb(com_kev) * 1.0e-3);
    }
    RawCrossSectionTable::new(energy_ev, cross_section_barns)
        .expect("generated Bosch-Hale table is monotone and positive")
}

/// sigma(E) = S(E) / (E exp(B_G / sqrt(E))), S as a rational fit.
fn bosch_hale_dt_mb(com_kev: f64) -> f64 {
    let e = com_kev;
    let numerator = DT_A[0] + e * (DT_A[1] + e * (DT_A[2] + e * (DT_A[3] + e * DT_A[4])));
    let denominator = 1.0 + e * (DT_B[0] + e * (DT_B[1] + e * (DT_B[2] + e * DT_B[3])));
    let astrophysical_s = numerator / denominator;
    astrophysical_s / e * (-DT_GAMOW_KEV_SQRT / e.sqrt()).exp()
}
