//! Log-log cross-section interpolation.
//!
//! [`LogLogExtrapolation`] fits a quadratic spline through log-transformed
//! table points, with the tail continued as a straight line in log-log
//! space so queries beyond the table decay along the terminal power law.
//! [`LogLogReinterpolation`] resamples that spline onto a uniform log
//! grid for O(1) evaluation and can hand out a detached, self-contained
//! evaluator.

use super::spline::{QuadraticSpline, SplineError};

/// Shift added to energies before taking logs, and the floor returned to
/// the right of the remeshed grid.
pub const LOG_SHIFT_EPSILON: f64 = 1.0e-50;
/// Default remesh window in keV.
pub const REMESH_LOW_KEV: f64 = 0.010;
pub const REMESH_HIGH_KEV: f64 = 4.0e4;
/// Default remesh resolution.
pub const REMESH_POINT_COUNT: usize = 6_000;

const TAIL_EXTENSION_STEPS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogLogError {
    #[error("energy and cross-section lengths differ: {energy_len} vs {cross_section_len}")]
    LengthMismatch {
        energy_len: usize,
        cross_section_len: usize,
    },
    #[error("log-log interpolation requires at least 2 points, got {len}")]
    TooShort { len: usize },
    #[error("energy values must be strictly increasing at index {index}")]
    NonIncreasingEnergy { index: usize },
    #[error("energy value at index {index} is not finite")]
    NonFiniteEnergy { index: usize },
    #[error("cross-section value at index {index} must be positive and finite")]
    NonPositiveCrossSection { index: usize },
    #[error("remesh grid requires positive increasing bounds and at least 2 points")]
    InvalidRemeshGrid,
    #[error(transparent)]
    Spline(#[from] SplineError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogLogExtrapolation {
    spline: QuadraticSpline,
}

impl LogLogExtrapolation {
    /// Fits the interpolant to a tabulated curve. Energies must be
    /// strictly increasing; cross sections must be positive.
    pub fn from_table(energy: &[f64], cross_section: &[f64]) -> Result<Self, LogLogError> {
        validate_table(energy, cross_section)?;

        let mut ln_energy: Vec<f64> = energy
            .iter()
            .map(|&value| (value + LOG_SHIFT_EPSILON).ln())
            .collect();
        let mut ln_sigma: Vec<f64> = cross_section.iter().map(|&value| value.ln()).collect();
        extend_tail(&mut ln_energy, &mut ln_sigma);

        let spline = QuadraticSpline::interpolating(&ln_energy, &ln_sigma)?;
        Ok(Self { spline })
    }

    /// Interpolated (or extrapolated) value at `energy`. Any non-negative
    /// energy is accepted; far outside the fitted range the result follows
    /// the continued end pieces without further guarding.
    pub fn value(&self, energy: f64) -> f64 {
        self.spline
            .value((energy + LOG_SHIFT_EPSILON).ln())
            .exp()
    }

    pub fn values(&self, energies: &[f64]) -> Vec<f64> {
        energies.iter().map(|&energy| self.value(energy)).collect()
    }

    fn ln_value_at(&self, ln_energy: f64) -> f64 {
        self.spline.value(ln_energy)
    }
}

/// Appends three synthetic points continuing the final log-log segment,
/// so the fitted spline leaves the table along a straight line.
fn extend_tail(ln_energy: &mut Vec<f64>, ln_sigma: &mut Vec<f64>) {
    let n = ln_energy.len();
    let energy_step = ln_energy[n - 1] - ln_energy[n - 2];
    let sigma_step = ln_sigma[n - 1] - ln_sigma[n - 2];
    let last_energy = ln_energy[n - 1];
    let last_sigma = ln_sigma[n - 1];

    for k in 1..=TAIL_EXTENSION_STEPS {
        ln_energy.push(last_energy + k as f64 * energy_step);
        ln_sigma.push(last_sigma + k as f64 * sigma_step);
    }
}

fn validate_table(energy: &[f64], cross_section: &[f64]) -> Result<(), LogLogError> {
    if energy.len() != cross_section.len() {
        return Err(LogLogError::LengthMismatch {
            energy_len: energy.len(),
            cross_section_len: cross_section.len(),
        });
    }
    if energy.len() < 2 {
        return Err(LogLogError::TooShort { len: energy.len() });
    }
    for (index, &value) in energy.iter().enumerate() {
        if !value.is_finite() {
            return Err(LogLogError::NonFiniteEnergy { index });
        }
        if index > 0 && value <= energy[index - 1] {
            return Err(LogLogError::NonIncreasingEnergy { index });
        }
    }
    for (index, &value) in cross_section.iter().enumerate() {
        if !(value > 0.0) || !value.is_finite() {
            return Err(LogLogError::NonPositiveCrossSection { index });
        }
    }
    Ok(())
}

/// Uniform-log resampling of a [`LogLogExtrapolation`].
#[derive(Debug, Clone, PartialEq)]
pub struct LogLogReinterpolation {
    evaluator: LogLogGridEvaluator,
}

impl LogLogReinterpolation {
    /// Resamples onto the default grid ([`REMESH_LOW_KEV`],
    /// [`REMESH_HIGH_KEV`], [`REMESH_POINT_COUNT`] points).
    pub fn from_extrapolation(source: &LogLogExtrapolation) -> Self {
        Self {
            evaluator: build_evaluator(source, REMESH_LOW_KEV, REMESH_HIGH_KEV, REMESH_POINT_COUNT),
        }
    }

    /// Resamples onto a caller-chosen grid.
    pub fn with_grid(
        source: &LogLogExtrapolation,
        low: f64,
        high: f64,
        points: usize,
    ) -> Result<Self, LogLogError> {
        if !(low > 0.0) || !(high > low) || !high.is_finite() || points < 2 {
            return Err(LogLogError::InvalidRemeshGrid);
        }
        Ok(Self {
            evaluator: build_evaluator(source, low, high, points),
        })
    }

    pub fn value(&self, energy: f64) -> f64 {
        self.evaluator.value(energy)
    }

    pub fn values(&self, energies: &[f64]) -> Vec<f64> {
        self.evaluator.values(energies)
    }

    pub fn grid_len(&self) -> usize {
        self.evaluator.grid_len()
    }

    /// Detached copy of the resampled grid. The returned evaluator owns
    /// its data and keeps working after this builder is dropped.
    pub fn evaluator(&self) -> LogLogGridEvaluator {
        self.evaluator.clone()
    }
}

fn build_evaluator(
    source: &LogLogExtrapolation,
    low: f64,
    high: f64,
    points: usize,
) -> LogLogGridEvaluator {
    let ln_low = low.ln();
    let ln_high = high.ln();
    let ln_step = (ln_high - ln_low) / (points - 1) as f64;

    let mut ln_sigma = Vec::with_capacity(points);
    for index in 0..points {
        let ln_energy = if index == points - 1 {
            ln_high
        } else {
            ln_low + ln_step * index as f64
        };
        ln_sigma.push(source.ln_value_at(ln_energy));
    }

    LogLogGridEvaluator {
        ln_low,
        ln_high,
        ln_step,
        ln_sigma,
    }
}

/// Piecewise-linear log-log evaluator over a uniform log grid.
///
/// Left of the grid it clamps to the first grid value; right of the grid
/// it returns the [`LOG_SHIFT_EPSILON`] floor. Owns its data, so it is
/// freely clonable across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct LogLogGridEvaluator {
    ln_low: f64,
    ln_high: f64,
    ln_step: f64,
    ln_sigma: Vec<f64>,
}

impl LogLogGridEvaluator {
    pub fn value(&self, energy: f64) -> f64 {
        let ln_energy = (energy + LOG_SHIFT_EPSILON).ln();
        if ln_energy <= self.ln_low {
            return self.ln_sigma[0].exp();
        }
        if ln_energy > self.ln_high {
            return LOG_SHIFT_EPSILON;
        }

        let position = (ln_energy - self.ln_low) / self.ln_step;
        let mut index = position as usize;
        if index >= self.ln_sigma.len() - 1 {
            index = self.ln_sigma.len() - 2;
        }
        let fraction = position - index as f64;
        let ln_sigma =
            self.ln_sigma[index] + fraction * (self.ln_sigma[index + 1] - self.ln_sigma[index]);
        ln_sigma.exp()
    }

    pub fn values(&self, energies: &[f64]) -> Vec<f64> {
        energies.iter().map(|&energy| self.value(energy)).collect()
    }

    pub fn grid_len(&self) -> usize {
        self.ln_sigma.len()
    }

    /// Grid bounds in energy units.
    pub fn energy_bounds(&self) -> (f64, f64) {
        (self.ln_low.exp(), self.ln_high.exp())
    }
}
