//! minimizer::gradient_check — finite-difference oracle for analytic gradients.
//!
//! Purpose
//! -------
//! Compare an [`Objective`]'s analytic gradient with a central-difference
//! approximation before an iterative fit. A mismatch means the objective is
//! wrong, not that optimization failed, so it is reported as
//! [`OptError::GradientCheckFailed`] and never retried.
//!
//! Conventions
//! -----------
//! - Entry `j` passes when `|g_fd[j] − g[j]| ≤ tol · max(1, |g_fd[j]|)`,
//!   an absolute test for small derivatives and a relative one otherwise.
//! - The finite-difference closure cannot return `Result`, so the first
//!   objective error is captured in a `RefCell` and re-raised afterwards.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{
        traits::Objective,
        types::Weights,
        validation::{validate_grad, validate_weights},
    },
};
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Default tolerance of [`check_gradient`].
pub const DEFAULT_GRAD_CHECK_TOL: f64 = 1e-4;

/// check_gradient — verify `objective`'s gradient at `w`.
///
/// Returns the largest scaled deviation
/// `max_j |g_fd[j] − g[j]| / max(1, |g_fd[j]|)` on success.
///
/// Errors
/// ------
/// - [`OptError::GradientCheckFailed`] for the first entry outside `tol`.
/// - [`OptError::GradientDimMismatch`] / [`OptError::InvalidGradient`] when
///   the analytic gradient is malformed.
/// - Any error the objective raises, including during differencing.
/// - [`OptError::InvalidOptTol`] for a non-positive or non-finite `tol`.
pub fn check_gradient<O: Objective + ?Sized>(
    objective: &O, w: &Weights, data: &O::Data, tol: f64,
) -> OptResult<f64> {
    if !tol.is_finite() || tol <= 0.0 {
        return Err(OptError::InvalidOptTol { tol, reason: "Gradient check tolerance must be positive." });
    }
    validate_weights(w)?;
    let (_, analytic) = objective.evaluate(w, data)?;
    validate_grad(&analytic, w.len())?;

    let closure_err: RefCell<Option<OptError>> = RefCell::new(None);
    let cost_func = |v: &Weights| -> f64 {
        match objective.evaluate(v, data) {
            Ok((f, _)) => f,
            Err(e) => {
                let mut slot = closure_err.borrow_mut();
                if slot.is_none() {
                    *slot = Some(e);
                }
                f64::NAN
            }
        }
    };
    let numeric = w.central_diff(&cost_func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }

    let mut worst = 0.0_f64;
    for (index, (&a, &n)) in analytic.iter().zip(numeric.iter()).enumerate() {
        let scaled = (n - a).abs() / n.abs().max(1.0);
        if !(scaled <= tol) {
            return Err(OptError::GradientCheckFailed { index, analytic: a, numeric: n });
        }
        worst = worst.max(scaled);
    }
    Ok(worst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::minimizer::traits::FnObjective;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Acceptance of a correct gradient and rejection of a wrong one.
    // - Propagation of objective errors raised inside the difference loop.
    //
    // They intentionally DO NOT cover:
    // - Classifier objectives; those are checked next to their definitions.
    // -------------------------------------------------------------------------

    #[test]
    fn correct_gradient_passes() {
        let obj = FnObjective::new(|w: &Weights, _: &()| {
            let f = w[0].powi(3) + (w[1] * w[0]).sin();
            let g = array![3.0 * w[0].powi(2) + w[1] * (w[1] * w[0]).cos(), w[0] * (w[1] * w[0]).cos()];
            Ok((f, g))
        });
        let worst = check_gradient(&obj, &array![0.7, -1.3], &(), DEFAULT_GRAD_CHECK_TOL).unwrap();
        assert!(worst < 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // A gradient with a wrong entry is reported with the offending index.
    //
    // Given
    // -----
    // - f(w) = w₀² + w₁², analytic gradient with entry 1 doubled.
    //
    // Expect
    // ------
    // - `GradientCheckFailed { index: 1, .. }`.
    fn wrong_gradient_reports_index() {
        let obj = FnObjective::new(|w: &Weights, _: &()| Ok((w.dot(w), array![2.0 * w[0], 4.0 * w[1]])));
        match check_gradient(&obj, &array![1.0, 2.0], &(), DEFAULT_GRAD_CHECK_TOL) {
            Err(OptError::GradientCheckFailed { index, analytic, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(analytic, 8.0);
            }
            other => panic!("Expected GradientCheckFailed, got {other:?}"),
        }
    }

    #[test]
    fn objective_errors_during_differencing_propagate() {
        let obj = FnObjective::new(|w: &Weights, _: &()| {
            if w[0] > 1.0 { Err(OptError::NonFiniteCost { value: f64::NAN }) } else { Ok((w[0], array![1.0])) }
        });
        assert!(matches!(
            check_gradient(&obj, &array![1.0], &(), DEFAULT_GRAD_CHECK_TOL),
            Err(OptError::NonFiniteCost { .. })
        ));
    }
}
