//! Numeric kernels: the quadratic collocation spline and the log-log
//! interpolation layers built on top of it.

pub mod loglog;
pub mod spline;

pub use loglog::{
    LogLogError, LogLogExtrapolation, LogLogGridEvaluator, LogLogReinterpolation,
    LOG_SHIFT_EPSILON, REMESH_HIGH_KEV, REMESH_LOW_KEV, REMESH_POINT_COUNT,
};
pub use spline::{QuadraticSpline, SplineError};
