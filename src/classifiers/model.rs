//! Trained linear models returned by the classifiers.
//!
//! Models are plain immutable values: `fit` produces one, `predict` reads
//! it. Nothing is cached between calls.
use crate::{
    classifiers::data::{DesignData, MulticlassData},
    optimization::errors::{OptError, OptResult},
};
use ndarray::{Array1, Array2, ArrayView1};

/// Binary linear decision function `sign(x·w)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryLinearModel {
    w: Array1<f64>,
}

impl BinaryLinearModel {
    pub fn new(w: Array1<f64>) -> Self {
        Self { w }
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.w
    }

    pub fn n_features(&self) -> usize {
        self.w.len()
    }

    /// Raw scores `X w`.
    ///
    /// # Errors
    /// [`OptError::WeightsDimMismatch`] when `x` has a different column
    /// count than the model.
    pub fn decision_function(&self, x: &Array2<f64>) -> OptResult<Array1<f64>> {
        check_columns(self.n_features(), x)?;
        Ok(x.dot(&self.w))
    }

    /// Labels in `{-1, 0, +1}`; a score of exactly zero predicts `0`.
    pub fn predict(&self, x: &Array2<f64>) -> OptResult<Array1<f64>> {
        Ok(self.decision_function(x)?.mapv(sign))
    }

    /// Fraction of samples whose prediction differs from the label.
    pub fn error_rate(&self, data: &DesignData) -> OptResult<f64> {
        let predicted = self.predict(data.x())?;
        let wrong = predicted.iter().zip(data.y().iter()).filter(|(p, y)| p != y).count();
        Ok(wrong as f64 / data.n_samples() as f64)
    }

    /// Indices of non-zero weights.
    pub fn support(&self) -> Vec<usize> {
        self.w.iter().enumerate().filter(|(_, v)| **v != 0.0).map(|(i, _)| i).collect()
    }
}

/// Multi-class linear model with one weight row per class (`k × d`).
#[derive(Debug, Clone, PartialEq)]
pub struct MulticlassLinearModel {
    w: Array2<f64>,
}

impl MulticlassLinearModel {
    pub fn new(w: Array2<f64>) -> Self {
        Self { w }
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.w
    }

    pub fn n_classes(&self) -> usize {
        self.w.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.w.ncols()
    }

    /// Class scores `X Wᵀ` (`n × k`).
    pub fn decision_function(&self, x: &Array2<f64>) -> OptResult<Array2<f64>> {
        check_columns(self.n_features(), x)?;
        Ok(x.dot(&self.w.t()))
    }

    /// Row-wise argmax of the scores; the lowest class id wins ties.
    pub fn predict(&self, x: &Array2<f64>) -> OptResult<Array1<usize>> {
        let scores = self.decision_function(x)?;
        Ok(scores.rows().into_iter().map(argmax).collect())
    }

    pub fn error_rate(&self, data: &MulticlassData) -> OptResult<f64> {
        let predicted = self.predict(data.x())?;
        let wrong = predicted.iter().zip(data.y().iter()).filter(|(p, y)| p != y).count();
        Ok(wrong as f64 / data.n_samples() as f64)
    }
}

fn check_columns(expected: usize, x: &Array2<f64>) -> OptResult<()> {
    if x.ncols() != expected {
        return Err(OptError::WeightsDimMismatch { expected, found: x.ncols() });
    }
    Ok(())
}

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn argmax(row: ArrayView1<'_, f64>) -> usize {
    let mut best = 0;
    for (j, &v) in row.iter().enumerate() {
        if v > row[best] {
            best = j;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn binary_predict_uses_sign_with_zero_for_ties() {
        let model = BinaryLinearModel::new(array![1.0, -1.0]);
        let x = array![[2.0, 1.0], [1.0, 3.0], [1.0, 1.0]];
        assert_eq!(model.predict(&x).unwrap(), array![1.0, -1.0, 0.0]);
        assert_eq!(model.support(), vec![0, 1]);
    }

    #[test]
    fn multiclass_predict_takes_first_maximum() {
        let model = MulticlassLinearModel::new(array![[1.0, 0.0], [0.0, 1.0], [1.0, 0.0]]);
        let x = array![[3.0, 1.0], [0.0, 2.0], [1.0, 1.0]];
        assert_eq!(model.predict(&x).unwrap(), array![0, 1, 0]);
    }

    #[test]
    // Purpose
    // -------
    // Prediction refuses a design matrix with the wrong number of columns
    // and error rates count mismatches.
    //
    // Given
    // -----
    // - A two-feature model, a three-column matrix, and data with one
    //   misclassified sample out of four.
    //
    // Expect
    // ------
    // - `WeightsDimMismatch`; error rate 0.25.
    fn predict_checks_columns_and_error_rate_counts() {
        let model = BinaryLinearModel::new(array![1.0, 0.0]);
        assert_eq!(
            model.predict(&Array2::zeros((1, 3))),
            Err(OptError::WeightsDimMismatch { expected: 2, found: 3 })
        );
        let data = DesignData::new(
            array![[1.0, 0.0], [2.0, 0.0], [-1.0, 0.0], [-3.0, 0.0]],
            array![1.0, 1.0, -1.0, 1.0],
        )
        .unwrap();
        assert_eq!(model.error_rate(&data).unwrap(), 0.25);
    }
}
