//! One-vs-all least-squares classifier solved in closed form.
//!
//! For every class `c` the weights solve the ridge-regularized normal
//! equations `(XᵀX + ρI) w_c = Xᵀy_c` with `y_c = ±1`. The small ridge `ρ`
//! (default `1e-4`) keeps the system positive definite; there is no
//! iterative optimization.
//!
//! The Gram matrix is copied into a `nalgebra::DMatrix` and factorized once
//! with Cholesky, falling back to LU when the factorization fails.
use crate::{
    classifiers::{data::MulticlassData, model::MulticlassLinearModel},
    optimization::{
        errors::{OptError, OptResult},
        minimizer::validation::verify_penalty,
    },
};
use nalgebra::DMatrix;
use ndarray::Array2;

/// Default diagonal regularization of the normal equations.
pub const DEFAULT_RIDGE: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeastSquaresClassifier {
    pub ridge: f64,
}

impl LeastSquaresClassifier {
    /// # Errors
    /// `InvalidPenalty` for a negative or non-finite ridge.
    pub fn new(ridge: f64) -> OptResult<Self> {
        verify_penalty("ridge", ridge)?;
        Ok(Self { ridge })
    }

    /// # Errors
    /// - `InvalidPenalty` for a bad ridge set through the public field.
    /// - [`OptError::SingularSystem`] when neither Cholesky nor LU can solve
    ///   the normal equations (only possible with `ridge = 0`).
    pub fn fit(&self, data: &MulticlassData) -> OptResult<MulticlassLinearModel> {
        verify_penalty("ridge", self.ridge)?;
        let (d, k) = (data.n_features(), data.n_classes());
        let x = data.x();

        let mut gram = x.t().dot(x);
        for j in 0..d {
            gram[[j, j]] += self.ridge;
        }
        let mut targets = Array2::<f64>::zeros((data.n_samples(), k));
        for c in 0..k {
            targets.column_mut(c).assign(&data.one_vs_all_labels(c));
        }
        let rhs = x.t().dot(&targets);

        let solution = solve_normal_equations(to_dmatrix(&gram), to_dmatrix(&rhs))?;
        let w = Array2::from_shape_fn((k, d), |(c, j)| solution[(j, c)]);
        Ok(MulticlassLinearModel::new(w))
    }
}

impl Default for LeastSquaresClassifier {
    fn default() -> Self {
        Self { ridge: DEFAULT_RIDGE }
    }
}

fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    let (rows, cols) = a.dim();
    let mut out = DMatrix::<f64>::zeros(rows, cols);
    for j in 0..cols {
        for i in 0..rows {
            out[(i, j)] = a[[i, j]];
        }
    }
    out
}

/// Solve `A X = B` for symmetric `A`, Cholesky first, LU second.
fn solve_normal_equations(a: DMatrix<f64>, b: DMatrix<f64>) -> OptResult<DMatrix<f64>> {
    let dim = a.nrows();
    if let Some(chol) = a.clone().cholesky() {
        return Ok(chol.solve(&b));
    }
    a.lu().solve(&b).ok_or(OptError::SingularSystem { dim })
}
