//! linreg_optim — linear classifiers on a shared gradient-descent core.
//!
//! Purpose
//! -------
//! Serve as the crate root. The numerical work lives in two layers:
//! [`optimization`] minimizes differentiable objectives (optionally with an
//! L1 proximal term or greedy L0 selection), and [`classifiers`] turns
//! logistic, least-squares and softmax losses into fitted linear models.
//!
//! Key behaviors
//! -------------
//! - Binary logistic regression, unregularized or with L2, L1 or L0
//!   penalties.
//! - Multi-class least squares (closed form), one-vs-all logistic and
//!   softmax regression.
//! - A budgeted find-min minimizer with Armijo backtracking and secant step
//!   sizes, plus an argmin L-BFGS backend for smooth objectives.
//!
//! Conventions
//! -----------
//! - Data are `ndarray` arrays: `n × d` design matrices, `±1` binary labels,
//!   `0..k` class ids.
//! - Errors are [`OptError`](optimization::errors::OptError) values;
//!   running out of budget is reported in the outcome, not as an error.
//! - Logging goes through the `log` facade; install any logger (e.g.
//!   `env_logger`) to see progress at the chosen
//!   [`Verbosity`](optimization::minimizer::Verbosity).
//!
//! Testing notes
//! -------------
//! - Unit tests sit next to each module; end-to-end classifier and
//!   selection scenarios live under `tests/`.

pub mod classifiers;
pub mod optimization;

pub use crate::classifiers::{
    BinaryLinearModel, DesignData, L0Model, LeastSquaresClassifier, LogLinearClassifier,
    LogisticRegression, LogisticRegressionL0, LogisticRegressionL1, LogisticRegressionL2,
    MulticlassData, MulticlassLinearModel, SoftmaxClassifier,
};
pub use crate::optimization::errors::{OptError, OptResult};
pub use crate::optimization::minimizer::{
    Backend, FindMinOptions, LbfgsOptions, MinimizeOutcome, Objective, Termination, Verbosity,
};
