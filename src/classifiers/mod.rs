//! classifiers — linear classifiers built on the minimizer.
//!
//! Purpose
//! -------
//! Compose the objectives in [`objectives`] with
//! [`minimizer`](crate::optimization::minimizer) and
//! [`selection`](crate::optimization::selection) into ready-to-fit models.
//!
//! Key behaviors
//! -------------
//! - Binary: [`LogisticRegression`], [`LogisticRegressionL2`],
//!   [`LogisticRegressionL1`] (proximal) and [`LogisticRegressionL0`]
//!   (greedy forward selection).
//! - Multi-class: [`LeastSquaresClassifier`] (closed form),
//!   [`LogLinearClassifier`] (one-vs-all) and [`SoftmaxClassifier`].
//!
//! Conventions
//! -----------
//! - Binary labels are `±1` in [`DesignData`]; class ids are `0..k` in
//!   [`MulticlassData`].
//! - Classifiers are configuration values. `fit` borrows the data and
//!   returns a new model; nothing is stored on the classifier.
//! - All fallible paths return
//!   [`OptResult`](crate::optimization::errors::OptResult).

pub mod data;
pub mod least_squares;
pub mod logistic;
pub mod model;
pub mod multiclass;
pub mod objectives;

pub use self::data::{ColumnSubsets, DesignData, MulticlassData};
pub use self::least_squares::{DEFAULT_RIDGE, LeastSquaresClassifier};
pub use self::logistic::{
    L0Model, LogisticRegression, LogisticRegressionL0, LogisticRegressionL1, LogisticRegressionL2,
};
pub use self::model::{BinaryLinearModel, MulticlassLinearModel};
pub use self::multiclass::{LogLinearClassifier, SoftmaxClassifier};
pub use self::objectives::{L2LogisticLoss, LogisticLoss, SoftmaxLoss};
