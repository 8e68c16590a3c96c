//! optimization — minimizers, feature selection, numerics and errors.
//!
//! Purpose
//! -------
//! Provide the shared optimization core every classifier delegates to: a
//! budgeted descent minimizer for smooth objectives, its L1-proximal
//! variant, an optional argmin L-BFGS backend, and greedy L0 feature
//! selection built on top of them.
//!
//! Key behaviors
//! -------------
//! - [`minimizer`]: the [`Objective`](minimizer::Objective) capability,
//!   option types, the find-min loop, the L-BFGS bridge and the
//!   finite-difference gradient check.
//! - [`selection`]: forward stepwise selection scored by
//!   `f* + λ₀·|set|`.
//! - [`numerical_stability`]: overflow-safe softplus, logistic and
//!   log-sum-exp used by the classifier losses.
//! - [`errors`]: the single [`OptError`](errors::OptError) enum and
//!   [`OptResult`](errors::OptResult) alias.
//!
//! Invariants & assumptions
//! ------------------------
//! - Objectives are pure functions of `(w, data)`; nothing here keeps state
//!   between calls.
//! - Invalid options, shapes and non-finite values are reported as
//!   `OptError`, never as panics. Non-convergence is not an error.
//!
//! Conventions
//! -----------
//! - All objectives are minimized; logistic and cross-entropy losses are
//!   written as costs, not likelihoods.
//! - Progress output goes through the `log` facade, gated by
//!   [`Verbosity`](minimizer::Verbosity).
//!
//! Downstream usage
//! ----------------
//! - Classifiers implement `Objective` for their loss and call
//!   `minimize`, `minimize_l1` or `select_features`.
//! - Front-ends can import `optimization::prelude::*`.

pub mod errors;
pub mod minimizer;
pub mod numerical_stability;
pub mod selection;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use linreg_optim::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::minimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
    pub use super::selection::{GreedyOptions, SelectionOutcome, SubsetProblem, select_features};
}
