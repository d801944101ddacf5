//! Quadratic interpolating B-spline on a clamped midpoint knot vector.
//!
//! The knot layout places triple knots at both data ends and one interior
//! knot at each midpoint of the inner data intervals, which makes the
//! collocation system tridiagonal. Evaluation clamps the knot span, so
//! queries beyond either end continue the outermost polynomial piece.

const DEGREE: usize = 2;
const SINGULAR_PIVOT_EPSILON: f64 = 1.0e-15;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplineError {
    #[error("abscissa and ordinate lengths differ: {x_len} vs {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },
    #[error("quadratic spline interpolation requires at least 3 points, got {len}")]
    TooFewPoints { len: usize },
    #[error("abscissa values must be strictly increasing at index {index}")]
    NonIncreasingAbscissa { index: usize },
    #[error("abscissa value at index {index} is not finite")]
    NonFiniteAbscissa { index: usize },
    #[error("ordinate value at index {index} is not finite")]
    NonFiniteOrdinate { index: usize },
    #[error("collocation system is singular at row {row}")]
    SingularSystem { row: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticSpline {
    knots: Vec<f64>,
    coefficients: Vec<f64>,
}

impl QuadraticSpline {
    /// Builds the spline passing through every `(x, y)` pair. `x` must be
    /// strictly increasing with at least 3 entries.
    pub fn interpolating(x: &[f64], y: &[f64]) -> Result<Self, SplineError> {
        validate_nodes(x, y)?;

        let knots = clamped_midpoint_knots(x);
        let (sub, diag, sup) = collocation_bands(x, &knots);
        let coefficients = solve_tridiagonal(&sub, &diag, &sup, y)?;

        Ok(Self {
            knots,
            coefficients,
        })
    }

    /// de Boor evaluation; outside the data range this continues the first
    /// or last polynomial piece.
    pub fn value(&self, u: f64) -> f64 {
        let span = self.span_for(u);
        let t = &self.knots;

        let mut d = [
            self.coefficients[span - 2],
            self.coefficients[span - 1],
            self.coefficients[span],
        ];
        for r in 1..=DEGREE {
            for j in (r..=DEGREE).rev() {
                let i = span - DEGREE + j;
                let alpha = (u - t[i]) / (t[i + DEGREE + 1 - r] - t[i]);
                d[j] = (1.0 - alpha) * d[j - 1] + alpha * d[j];
            }
        }
        d[DEGREE]
    }

    pub fn values(&self, us: &[f64]) -> Vec<f64> {
        us.iter().map(|&u| self.value(u)).collect()
    }

    /// First and last data abscissa.
    pub fn knot_range(&self) -> (f64, f64) {
        (
            self.knots[DEGREE],
            self.knots[self.knots.len() - DEGREE - 1],
        )
    }

    /// Span index clamped to `[DEGREE, m - 1]`, where `m` is the
    /// coefficient count. The clamping is what extends the end pieces.
    fn span_for(&self, u: f64) -> usize {
        let m = self.coefficients.len();
        if u <= self.knots[DEGREE] {
            return DEGREE;
        }
        if u >= self.knots[m] {
            return m - 1;
        }

        let mut low = DEGREE;
        let mut high = m;
        while high - low > 1 {
            let mid = (low + high) / 2;
            if u < self.knots[mid] {
                high = mid;
            } else {
                low = mid;
            }
        }
        low
    }
}

fn validate_nodes(x: &[f64], y: &[f64]) -> Result<(), SplineError> {
    if x.len() != y.len() {
        return Err(SplineError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.len() <= DEGREE {
        return Err(SplineError::TooFewPoints { len: x.len() });
    }
    for (index, &value) in x.iter().enumerate() {
        if !value.is_finite() {
            return Err(SplineError::NonFiniteAbscissa { index });
        }
        if index > 0 && value <= x[index - 1] {
            return Err(SplineError::NonIncreasingAbscissa { index });
        }
    }
    for (index, &value) in y.iter().enumerate() {
        if !value.is_finite() {
            return Err(SplineError::NonFiniteOrdinate { index });
        }
    }
    Ok(())
}

/// Knot vector of length `m + DEGREE + 1`: triple end knots plus interior
/// knots at the midpoints of the inner data intervals.
fn clamped_midpoint_knots(x: &[f64]) -> Vec<f64> {
    let m = x.len();
    let mut knots = Vec::with_capacity(m + DEGREE + 1);
    for _ in 0..=DEGREE {
        knots.push(x[0]);
    }
    for j in 1..(m - DEGREE) {
        knots.push(0.5 * (x[j] + x[j + 1]));
    }
    for _ in 0..=DEGREE {
        knots.push(x[m - 1]);
    }
    knots
}

/// Tridiagonal collocation bands. With the midpoint knot vector, data
/// point `i` lies in span `i + 1`, so its three basis values land on
/// columns `i - 1`, `i`, `i + 1`; the clamped ends reduce the first and
/// last rows to the diagonal alone.
fn collocation_bands(x: &[f64], knots: &[f64]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let m = x.len();
    let mut sub = vec![0.0; m];
    let mut diag = vec![0.0; m];
    let mut sup = vec![0.0; m];

    diag[0] = 1.0;
    diag[m - 1] = 1.0;
    for i in 1..(m - 1) {
        let basis = basis_at(knots, i + 1, x[i]);
        sub[i] = basis[0];
        diag[i] = basis[1];
        sup[i] = basis[2];
    }
    (sub, diag, sup)
}

/// Cox-de Boor basis values `[N_{span-2}, N_{span-1}, N_span]` at `u`.
fn basis_at(knots: &[f64], span: usize, u: f64) -> [f64; DEGREE + 1] {
    let mut values = [1.0, 0.0, 0.0];
    let mut left = [0.0; DEGREE];
    let mut right = [0.0; DEGREE];

    for j in 1..=DEGREE {
        left[j - 1] = u - knots[span + 1 - j];
        right[j - 1] = knots[span + j] - u;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = values[r] / (right[r] + left[j - 1 - r]);
            values[r] = saved + right[r] * temp;
            saved = left[j - 1 - r] * temp;
        }
        values[j] = saved;
    }
    values
}

fn solve_tridiagonal(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &[f64],
) -> Result<Vec<f64>, SplineError> {
    let n = diag.len();
    let mut reduced_diag = diag.to_vec();
    let mut reduced_rhs = rhs.to_vec();

    for row in 1..n {
        let pivot = reduced_diag[row - 1];
        if pivot.abs() <= SINGULAR_PIVOT_EPSILON {
            return Err(SplineError::SingularSystem { row: row - 1 });
        }
        let factor = sub[row] / pivot;
        reduced_diag[row] -= factor * sup[row - 1];
        reduced_rhs[row] -= factor * reduced_rhs[row - 1];
    }

    let last = n - 1;
    if reduced_diag[last].abs() <= SINGULAR_PIVOT_EPSILON {
        return Err(SplineError::SingularSystem { row: last });
    }

    let mut solution = vec![0.0; n];
    solution[last] = reduced_rhs[last] / reduced_diag[last];
    for row in (0..last).rev() {
        solution[row] = (reduced_rhs[row] - sup[row] * solution[row + 1]) / reduced_diag[row];
    }
    Ok(solution)
}
