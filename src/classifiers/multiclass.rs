//! Multi-class linear classifiers trained by gradient minimization.
//!
//! - [`LogLinearClassifier`]: one binary logistic regression per class
//!   ("class vs. rest"), stacked into a `k × d` model.
//! - [`SoftmaxClassifier`]: a single multinomial fit of the flattened
//!   `k × d` weights under [`SoftmaxLoss`].
use crate::{
    classifiers::{
        data::MulticlassData,
        model::MulticlassLinearModel,
        objectives::{LogisticLoss, SoftmaxLoss},
    },
    optimization::{
        errors::{OptError, OptResult},
        minimizer::{
            api::minimize_with,
            gradient_check::{DEFAULT_GRAD_CHECK_TOL, check_gradient},
            traits::{Backend, FindMinOptions, Verbosity},
            types::Weights,
        },
    },
};
use log::info;
use ndarray::Array2;

/// One-vs-all logistic regression.
#[derive(Debug, Clone, PartialEq)]
pub struct LogLinearClassifier {
    pub backend: Backend,
    pub check_gradient: bool,
}

impl LogLinearClassifier {
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

    /// Fit class `c` against the rest for every `c in 0..k`.
    ///
    /// # Errors
    /// Gradient-check mismatches and minimizer errors of any class fit.
    pub fn fit(&self, data: &MulticlassData) -> OptResult<MulticlassLinearModel> {
        let (k, d) = (data.n_classes(), data.n_features());
        let verbosity = self.backend.verbosity();
        let mut w = Array2::<f64>::zeros((k, d));
        for class in 0..k {
            let binary = data.one_vs_all(class);
            let w0 = Weights::zeros(d);
            if self.check_gradient {
                check_gradient(&LogisticLoss, &w0, &binary, DEFAULT_GRAD_CHECK_TOL)?;
            }
            let out = minimize_with(&LogisticLoss, w0, &binary, &self.backend)?;
            if verbosity.summary() {
                info!("class {class} vs rest: loss {:.6} ({})", out.f, out.termination);
            }
            w.row_mut(class).assign(&out.w);
        }
        Ok(MulticlassLinearModel::new(w))
    }
}

impl Default for LogLinearClassifier {
    fn default() -> Self {
        Self { backend: Backend::default(), check_gradient: true }
    }
}

/// Multinomial (softmax) logistic regression.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftmaxClassifier {
    pub backend: Backend,
    pub check_gradient: bool,
}

impl SoftmaxClassifier {
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
    pub fn fit(&self, data: &MulticlassData) -> OptResult<MulticlassLinearModel> {
        let (k, d) = (data.n_classes(), data.n_features());
        let w0 = Weights::zeros(k * d);
        if self.check_gradient {
            check_gradient(&SoftmaxLoss, &w0, data, DEFAULT_GRAD_CHECK_TOL)?;
        }
        let out = minimize_with(&SoftmaxLoss, w0, data, &self.backend)?;
        if self.backend.verbosity().summary() {
            info!(
                "softmax: loss {:.6} after {} evaluations ({})",
                out.f, out.fn_evals, out.termination
            );
        }
        let found = out.w.len();
        let w = out
            .w
            .into_shape((k, d))
            .map_err(|_| OptError::WeightsDimMismatch { expected: k * d, found })?;
        Ok(MulticlassLinearModel::new(w))
    }
}

impl Default for SoftmaxClassifier {
    fn default() -> Self {
        Self { backend: Backend::default(), check_gradient: true }
    }
}
