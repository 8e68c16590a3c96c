//! numerical_stability — overflow-safe scalar and row transforms.
//!
//! Purpose
//! -------
//! Collect the numerically stable building blocks used by the classifier
//! objectives: the softplus form of the logistic loss, the logistic link
//! used in its gradient, and the log-sum-exp / softmax pair behind the
//! multinomial cross-entropy.
//!
//! Invariants & assumptions
//! ------------------------
//! - All transforms assume finite `f64` inputs; shape and finiteness
//!   validation of design matrices happens in the classifier data layer.
//! - These helpers never log, perform I/O, or touch global state.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] cover agreement with naïve formulas
//!   on safe grids and finiteness in the tails.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{log_sum_exp, safe_logistic, safe_softplus, softmax_in_place};

pub mod prelude {
    pub use super::transformations::{
        log_sum_exp, safe_logistic, safe_softplus, softmax_in_place,
    };
}
