//! minimizer::types — shared numeric aliases, defaults, and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types and default constants used by the
//! minimizer. By defining these in one place, the rest of the optimization
//! code stays agnostic to `ndarray` and argmin generics.
//!
//! Conventions
//! -----------
//! - [`Weights`] and [`Grad`] are dense column vectors of equal length.
//!   Multi-class weight matrices are flattened row-major (`k × d` → `k·d`)
//!   before they reach the minimizer.
//! - [`Cost`] is the scalar objective value; for proximal runs it is the
//!   combined value `f(w) + λ‖w‖₁`.
//! - The `DEFAULT_*` constants document the baseline configuration of
//!   [`FindMinOptions`](super::traits::FindMinOptions).
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::Array1;

/// Parameter vector `w`.
pub type Weights = Array1<f64>;

/// Gradient vector `∇f(w)`, same length as [`Weights`].
pub type Grad = Array1<f64>;

/// Scalar objective value.
pub type Cost = f64;

/// Default evaluation budget for a single minimizer run.
pub const DEFAULT_MAX_EVALS: usize = 100;

/// Default absolute tolerance on the ∞-norm optimality measure.
pub const DEFAULT_OPT_TOL: f64 = 1e-5;

/// Default Armijo sufficient-decrease constant.
pub const DEFAULT_GAMMA: f64 = 1e-4;

/// Default cap on consecutive step halvings within one line search.
pub const DEFAULT_MAX_BACKTRACKS: usize = 50;

/// Step sizes below this are treated as numerically zero.
pub const DEFAULT_MIN_STEP: f64 = 1e-16;

/// Admissible range for the secant step estimate.
pub const DEFAULT_STEP_BOUNDS: (f64, f64) = (1e-10, 1e10);

/// Step size used when the secant estimate leaves [`DEFAULT_STEP_BOUNDS`].
pub const RESET_STEP: f64 = 1.0;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Hager–Zhang line search specialized to this crate’s numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Weights, Grad, Cost>;

/// More–Thuente line search specialized to this crate’s numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Weights, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Weights, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Weights, Grad, Cost>;
