//! selection — L0-penalized feature selection on top of the minimizer.
//!
//! [`greedy`] implements forward stepwise selection: each sweep fits every
//! one-feature extension of the current set with
//! [`minimize`](crate::optimization::minimizer::minimize) and adopts the best
//! one while the penalized score keeps decreasing. Problems plug in through
//! the [`SubsetProblem`] capability, which restricts the data to a column
//! subset.

pub mod greedy;

pub use self::greedy::{
    DEFAULT_SELECTION_MAX_EVALS, GreedyOptions, SelectionOutcome, SubsetProblem, select_features,
};
