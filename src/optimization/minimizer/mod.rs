//! minimizer — gradient-based minimization of classifier objectives.
//!
//! Purpose
//! -------
//! Drive a differentiable [`Objective`] to a stationary point. Every
//! classifier in the crate delegates here, either directly or through the
//! greedy L0 selector.
//!
//! Key behaviors
//! -------------
//! - [`minimize`]: steepest descent with Armijo backtracking and secant
//!   (Barzilai–Borwein) step sizes, bounded by an evaluation budget.
//! - [`minimize_l1`]: the same loop with a soft-threshold proximal step for
//!   an added `λ‖w‖₁` term; the objective only supplies the smooth part.
//! - [`minimize_with`]: choose between the find-min loop and argmin L-BFGS
//!   ([`adapter`] → [`builders`] → [`run`]) for smooth objectives.
//! - [`check_gradient`]: central-difference oracle for analytic gradients.
//!
//! Invariants & assumptions
//! ------------------------
//! - Gradient length always equals parameter length; every evaluation is
//!   checked and a mismatch fails fast with `GradientDimMismatch`.
//! - Objectives are pure; the minimizer owns its trace and keeps nothing
//!   between calls.
//! - Budget exhaustion and step underflow are normal terminations reported
//!   through [`Termination`], never errors.
//! - Verbosity only gates `log` output; it never changes the iterates.
//!
//! Conventions
//! -----------
//! - Parameters and gradients use the aliases [`Weights`] / [`Grad`]
//!   (`Array1<f64>`); multi-class weights are flattened row-major.
//! - Options are validated on construction and again on entry.
//! - Errors bubble up as [`OptResult<T>`](crate::optimization::errors::OptResult).
//!
//! Testing notes
//! -------------
//! - [`line_search`] tests convergence, monotonicity, budget accounting and
//!   the proximal lasso case; [`api`] tests backend agreement and the
//!   `λ = 0` trajectory equivalence.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod gradient_check;
pub mod line_search;
pub mod penalty;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{minimize, minimize_l1, minimize_with};
pub use self::gradient_check::{DEFAULT_GRAD_CHECK_TOL, check_gradient};
pub use self::penalty::{L1Penalty, NoPenalty, Proximal, soft_threshold};
pub use self::traits::{
    Backend, FindMinOptions, FnObjective, LbfgsOptions, LineSearcher, MinimizeOutcome, Objective,
    Termination, Tolerances, Verbosity,
};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, DEFAULT_MAX_EVALS, Grad, Weights};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::api::{minimize, minimize_l1, minimize_with};
    pub use super::gradient_check::check_gradient;
    pub use super::penalty::L1Penalty;
    pub use super::traits::{
        Backend, FindMinOptions, MinimizeOutcome, Objective, Termination, Verbosity,
    };
    pub use super::types::{Cost, Grad, Weights};
}
