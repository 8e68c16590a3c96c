//! Classifier losses implementing [`Objective`].
//!
//! - [`LogisticLoss`]: `Σᵢ log(1 + exp(−yᵢ xᵢᵀw))` for labels `±1`.
//! - [`L2LogisticLoss`]: the same plus `½λ‖w‖²`.
//! - [`SoftmaxLoss`]: multinomial cross-entropy over `k × d` weights
//!   flattened row-major.
//!
//! The L1 penalty is never part of an objective; it is applied by the
//! proximal minimizer. All losses use the overflow-safe transforms from
//! [`numerical_stability`](crate::optimization::numerical_stability).
use crate::{
    classifiers::data::{DesignData, MulticlassData},
    optimization::{
        errors::{OptError, OptResult},
        minimizer::{
            traits::Objective,
            types::{Cost, Grad, Weights},
            validation::verify_penalty,
        },
        numerical_stability::{log_sum_exp, safe_logistic, safe_softplus, softmax_in_place},
    },
};
use ndarray::{Array1, ArrayView2};

/// Binary logistic loss.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogisticLoss;

impl Objective for LogisticLoss {
    type Data = DesignData;

    /// Loss `Σ softplus(−m)` with margins `m = y ⊙ Xw`; gradient
    /// `Xᵀ(−y ⊙ σ(−m))`.
    fn evaluate(&self, w: &Weights, data: &DesignData) -> OptResult<(Cost, Grad)> {
        check_len(w, data.n_features())?;
        let margins = data.x().dot(w) * data.y();
        let f = margins.iter().map(|&m| safe_softplus(-m)).sum();
        let residual = Array1::from_iter(
            margins.iter().zip(data.y().iter()).map(|(&m, &y)| -y * safe_logistic(-m)),
        );
        Ok((f, data.x().t().dot(&residual)))
    }

    fn check(&self, w: &Weights, data: &DesignData) -> OptResult<()> {
        check_len(w, data.n_features())
    }
}

/// Logistic loss with a ridge term `½λ‖w‖²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct L2LogisticLoss {
    lambda: f64,
}

impl L2LogisticLoss {
    /// # Errors
    /// `InvalidPenalty` for a negative or non-finite `lambda`.
    pub fn new(lambda: f64) -> OptResult<Self> {
        verify_penalty("L2", lambda)?;
        Ok(Self { lambda })
    }
}

impl Objective for L2LogisticLoss {
    type Data = DesignData;

    fn evaluate(&self, w: &Weights, data: &DesignData) -> OptResult<(Cost, Grad)> {
        let (f, g) = LogisticLoss.evaluate(w, data)?;
        Ok((f + 0.5 * self.lambda * w.dot(w), g + self.lambda * w))
    }

    fn check(&self, w: &Weights, data: &DesignData) -> OptResult<()> {
        check_len(w, data.n_features())
    }
}

/// Softmax cross-entropy `Σᵢ [log Σ_c exp(xᵢᵀw_c) − xᵢᵀw_{yᵢ}]`.
///
/// The parameter vector holds the `k × d` weight matrix row-major; the
/// gradient `(P − Y)ᵀX` is flattened the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SoftmaxLoss;

impl SoftmaxLoss {
    /// View a flat parameter vector as the `k × d` weight matrix.
    pub fn weight_matrix<'w>(w: &'w Weights, data: &MulticlassData) -> OptResult<ArrayView2<'w, f64>> {
        let (k, d) = (data.n_classes(), data.n_features());
        check_len(w, k * d)?;
        w.view()
            .into_shape((k, d))
            .map_err(|_| OptError::WeightsDimMismatch { expected: k * d, found: w.len() })
    }
}

impl Objective for SoftmaxLoss {
    type Data = MulticlassData;

    fn evaluate(&self, w: &Weights, data: &MulticlassData) -> OptResult<(Cost, Grad)> {
        let weights = Self::weight_matrix(w, data)?;
        let mut scores = data.x().dot(&weights.t());
        let mut f = 0.0;
        for (mut row, &label) in scores.rows_mut().into_iter().zip(data.y().iter()) {
            f += log_sum_exp(row.view()) - row[label];
            softmax_in_place(row.view_mut());
            row[label] -= 1.0;
        }
        let grad = scores.t().dot(data.x());
        Ok((f, grad.iter().copied().collect()))
    }

    fn check(&self, w: &Weights, data: &MulticlassData) -> OptResult<()> {
        check_len(w, data.n_classes() * data.n_features())
    }
}

fn check_len(w: &Weights, expected: usize) -> OptResult<()> {
    if w.len() != expected {
        return Err(OptError::WeightsDimMismatch { expected, found: w.len() });
    }
    Ok(())
}
