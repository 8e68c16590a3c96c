//! Binary logistic regression and its L2, L1 and L0 regularized variants.
//!
//! Each classifier is a configuration value; `fit` composes an objective
//! from [`objectives`](super::objectives) with the minimizer (or the greedy
//! selector) and returns an immutable model. When `check_gradient` is set,
//! the analytic gradient is verified against central differences at the
//! starting point before any optimization step.
use crate::{
    classifiers::{
        data::{ColumnSubsets, DesignData},
        model::BinaryLinearModel,
        objectives::{L2LogisticLoss, LogisticLoss},
    },
    optimization::{
        errors::{OptError, OptResult},
        minimizer::{
            api::{minimize_l1, minimize_with},
            gradient_check::{DEFAULT_GRAD_CHECK_TOL, check_gradient},
            penalty::L1Penalty,
            traits::{Backend, FindMinOptions, MinimizeOutcome, Objective, Verbosity},
            types::Weights,
            validation::verify_penalty,
        },
        selection::{GreedyOptions, SelectionOutcome, select_features},
    },
};
use log::{info, warn};
use ndarray::{Array1, Array2};
use std::collections::BTreeSet;

/// Unregularized logistic regression.
///
/// Default: find-min backend with a budget of 100 evaluations, silent,
/// gradient check enabled.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    pub backend: Backend,
    pub check_gradient: bool,
}

impl LogisticRegression {
    /// # Errors
    /// `InvalidMaxEvals` for a zero budget.
    pub fn new(max_evals: usize, verbosity: Verbosity) -> OptResult<Self> {
        Ok(Self {
            backend: Backend::FindMin(FindMinOptions::new(max_evals, verbosity)?),
            check_gradient: true,
        })
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_gradient_check(mut self, enabled: bool) -> Self {
        self.check_gradient = enabled;
        self
    }

    /// # Errors
    /// Gradient-check mismatches and minimizer errors.
    pub fn fit(&self, data: &DesignData) -> OptResult<BinaryLinearModel> {
        fit_smooth(&LogisticLoss, data, &self.backend, self.check_gradient)
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self {
            backend: Backend::FindMin(FindMinOptions::default()),
            check_gradient: true,
        }
    }
}

/// Logistic regression with a ridge penalty `½λ‖w‖²` (default `λ = 1`).
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegressionL2 {
    pub lambda: f64,
    pub backend: Backend,
    pub check_gradient: bool,
}

impl LogisticRegressionL2 {
    /// # Errors
    /// `InvalidPenalty` or `InvalidMaxEvals`.
    pub fn new(lambda: f64, max_evals: usize, verbosity: Verbosity) -> OptResult<Self> {
        verify_penalty("L2", lambda)?;
        Ok(Self {
            lambda,
            backend: Backend::FindMin(FindMinOptions::new(max_evals, verbosity)?),
            check_gradient: true,
        })
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_gradient_check(mut self, enabled: bool) -> Self {
        self.check_gradient = enabled;
        self
    }

    pub fn fit(&self, data: &DesignData) -> OptResult<BinaryLinearModel> {
        let loss = L2LogisticLoss::new(self.lambda)?;
        fit_smooth(&loss, data, &self.backend, self.check_gradient)
    }
}

impl Default for LogisticRegressionL2 {
    fn default() -> Self {
        Self { lambda: 1.0, backend: Backend::default(), check_gradient: true }
    }
}

/// Logistic regression with an L1 penalty `λ‖w‖₁` (default `λ = 1`),
/// solved with the proximal minimizer.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegressionL1 {
    pub lambda: f64,
    pub options: FindMinOptions,
    pub check_gradient: bool,
}

impl LogisticRegressionL1 {
    pub fn new(lambda: f64, max_evals: usize, verbosity: Verbosity) -> OptResult<Self> {
        verify_penalty("L1", lambda)?;
        Ok(Self { lambda, options: FindMinOptions::new(max_evals, verbosity)?, check_gradient: true })
    }

    pub fn with_gradient_check(mut self, enabled: bool) -> Self {
        self.check_gradient = enabled;
        self
    }

    /// # Errors
    /// Penalty validation, gradient-check mismatches and minimizer errors.
    pub fn fit(&self, data: &DesignData) -> OptResult<BinaryLinearModel> {
        let penalty = L1Penalty::new(self.lambda)?;
        let w0 = Weights::zeros(data.n_features());
        if self.check_gradient {
            check_gradient(&LogisticLoss, &w0, data, DEFAULT_GRAD_CHECK_TOL)?;
        }
        let out = minimize_l1(&LogisticLoss, w0, &penalty, data, &self.options)?;
        report_fit("L1 logistic regression", &out, self.options.verbosity);
        Ok(BinaryLinearModel::new(out.w))
    }
}

impl Default for LogisticRegressionL1 {
    fn default() -> Self {
        Self { lambda: 1.0, options: FindMinOptions::default(), check_gradient: true }
    }
}

/// Logistic regression with an L0 penalty via greedy forward selection.
///
/// Default: `λ₀ = 1`, 400 evaluations per candidate fit, feature 0 always
/// selected.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogisticRegressionL0 {
    pub options: GreedyOptions,
}

impl LogisticRegressionL0 {
    pub fn new(lambda: f64, max_evals: usize, verbosity: Verbosity) -> OptResult<Self> {
        Ok(Self { options: GreedyOptions::new(lambda, max_evals)?.with_verbosity(verbosity) })
    }

    pub fn with_options(options: GreedyOptions) -> Self {
        Self { options }
    }

    /// # Errors
    /// Selector configuration errors and candidate-fit errors.
    pub fn fit(&self, data: &DesignData) -> OptResult<L0Model> {
        let problem = ColumnSubsets::new(&LogisticLoss, data);
        let selection = select_features(&problem, &self.options)?;
        Ok(L0Model { model: BinaryLinearModel::new(selection.w.clone()), selection })
    }
}

/// Sparse logistic model produced by [`LogisticRegressionL0`].
#[derive(Debug, Clone, PartialEq)]
pub struct L0Model {
    pub model: BinaryLinearModel,
    pub selection: SelectionOutcome,
}

impl L0Model {
    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selection.selected
    }

    pub fn predict(&self, x: &Array2<f64>) -> OptResult<Array1<f64>> {
        self.model.predict(x)
    }
}

fn fit_smooth<O>(
    loss: &O, data: &DesignData, backend: &Backend, check: bool,
) -> OptResult<BinaryLinearModel>
where
    O: Objective<Data = DesignData> + ?Sized,
{
    let w0 = Weights::zeros(data.n_features());
    if check {
        check_gradient(loss, &w0, data, DEFAULT_GRAD_CHECK_TOL).inspect_err(|e| {
            if matches!(e, OptError::GradientCheckFailed { .. }) {
                warn!("gradient check failed: {e}");
            }
        })?;
    }
    let out = minimize_with(loss, w0, data, backend)?;
    report_fit("logistic regression", &out, backend.verbosity());
    Ok(BinaryLinearModel::new(out.w))
}

fn report_fit(name: &str, out: &MinimizeOutcome, verbosity: Verbosity) {
    if verbosity.summary() {
        info!(
            "{name}: loss {:.6} after {} evaluations ({})",
            out.f, out.fn_evals, out.termination
        );
    }
}
