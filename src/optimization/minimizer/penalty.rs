//! minimizer::penalty — proximal strategies for the descent loop.
//!
//! The find-min loop is written once and parameterized by a [`Proximal`]
//! strategy. [`NoPenalty`] yields the plain smooth minimizer; [`L1Penalty`]
//! adds `λ‖w‖₁` through the soft-threshold operator, so the non-smooth term
//! never needs a subgradient.
//!
//! With `λ = 0` the soft-threshold is the identity and both strategies
//! produce the same iterates.
use crate::optimization::{
    errors::OptResult,
    minimizer::{
        types::{Grad, Weights},
        validation::verify_penalty,
    },
};

/// Non-smooth term `h(w)` together with its proximal operator.
pub trait Proximal {
    /// Value of `h(w)`, added to the smooth loss in every acceptance test.
    fn value(&self, w: &Weights) -> f64;

    /// `prox_{step·h}(v)`, consuming `v`.
    fn prox(&self, v: Weights, step: f64) -> Weights;

    /// ∞-norm optimality measure at `w` with smooth gradient `g`.
    fn optimality(&self, w: &Weights, g: &Grad) -> f64;
}

/// Smooth problems: `h ≡ 0`, identity prox, measure `‖g‖∞`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoPenalty;

impl Proximal for NoPenalty {
    fn value(&self, _w: &Weights) -> f64 {
        0.0
    }

    fn prox(&self, v: Weights, _step: f64) -> Weights {
        v
    }

    fn optimality(&self, _w: &Weights, g: &Grad) -> f64 {
        inf_norm(g.iter().copied())
    }
}

/// `h(w) = λ‖w‖₁`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct L1Penalty {
    lambda: f64,
}

impl L1Penalty {
    /// # Errors
    /// [`OptError::InvalidPenalty`](crate::optimization::errors::OptError::InvalidPenalty)
    /// for negative or non-finite `lambda`.
    pub fn new(lambda: f64) -> OptResult<Self> {
        verify_penalty("L1", lambda)?;
        Ok(Self { lambda })
    }
}

impl Proximal for L1Penalty {
    fn value(&self, w: &Weights) -> f64 {
        self.lambda * w.iter().map(|v| v.abs()).sum::<f64>()
    }

    fn prox(&self, mut v: Weights, step: f64) -> Weights {
        let threshold = step * self.lambda;
        v.mapv_inplace(|x| soft_threshold(x, threshold));
        v
    }

    /// `‖w − prox_h(w − g)‖∞`, the fixed-point residual of a unit proximal
    /// gradient step. Zero exactly at minimizers of `f + h`.
    fn optimality(&self, w: &Weights, g: &Grad) -> f64 {
        let threshold = self.lambda;
        inf_norm(w.iter().zip(g.iter()).map(|(&wi, &gi)| wi - soft_threshold(wi - gi, threshold)))
    }
}

/// `sign(x) · max(|x| − t, 0)`.
#[inline]
pub fn soft_threshold(x: f64, t: f64) -> f64 {
    let shrunk = x.abs() - t;
    if shrunk > 0.0 { x.signum() * shrunk } else { 0.0 }
}

fn inf_norm<I: Iterator<Item = f64>>(values: I) -> f64 {
    values.fold(0.0, |acc, v| acc.max(v.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Soft-threshold arithmetic and the L1 prox/value/optimality triple.
    // - Equivalence of `L1Penalty(0)` and `NoPenalty`.
    // -------------------------------------------------------------------------

    #[test]
    fn soft_threshold_shrinks_towards_zero() {
        assert_eq!(soft_threshold(3.0, 1.0), 2.0);
        assert_eq!(soft_threshold(-3.0, 1.0), -2.0);
        assert_eq!(soft_threshold(0.5, 1.0), 0.0);
        assert_eq!(soft_threshold(-1.0, 1.0), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // The L1 prox applies the soft-threshold with threshold `step·λ`.
    //
    // Given
    // -----
    // - λ = 2, step = 0.25 (threshold 0.5), v = [1.0, -0.2, -2.0].
    //
    // Expect
    // ------
    // - prox(v) = [0.5, 0.0, -1.5]; value(v) = 2·3.2.
    fn l1_prox_uses_scaled_threshold() {
        let pen = L1Penalty::new(2.0).unwrap();
        let v = array![1.0, -0.2, -2.0];
        assert_relative_eq!(pen.value(&v), 6.4, epsilon = 1e-12);
        let out = pen.prox(v, 0.25);
        assert_eq!(out, array![0.5, 0.0, -1.5]);
    }

    #[test]
    // Purpose
    // -------
    // The L1 optimality measure vanishes at a lasso minimizer even though the
    // smooth gradient does not.
    //
    // Given
    // -----
    // - w = [0, 1], g = [0.5, -1] with λ = 1: coordinate 0 satisfies |g| ≤ λ
    //   at zero, coordinate 1 satisfies g = -λ·sign(w).
    //
    // Expect
    // ------
    // - optimality = 0 while ‖g‖∞ = 1.
    fn l1_optimality_is_zero_at_lasso_solution() {
        let pen = L1Penalty::new(1.0).unwrap();
        let w = array![0.0, 1.0];
        let g = array![0.5, -1.0];
        assert_relative_eq!(pen.optimality(&w, &g), 0.0, epsilon = 1e-15);
        assert_relative_eq!(NoPenalty.optimality(&w, &g), 1.0);
    }

    #[test]
    fn zero_l1_penalty_matches_no_penalty() {
        let pen = L1Penalty::new(0.0).unwrap();
        let v = array![0.3, -1.7, 0.0];
        assert_eq!(pen.prox(v.clone(), 0.7), NoPenalty.prox(v.clone(), 0.7));
        assert_eq!(pen.value(&v), 0.0);
        let g = array![0.1, -0.4, 2.0];
        assert_relative_eq!(pen.optimality(&v, &g), NoPenalty.optimality(&v, &g), epsilon = 1e-15);
    }

    #[test]
    fn negative_lambda_is_rejected() {
        assert!(matches!(L1Penalty::new(-1.0), Err(OptError::InvalidPenalty { .. })));
    }
}
