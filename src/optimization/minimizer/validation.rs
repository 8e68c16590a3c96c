//! Validation helpers for the minimizer.
//!
//! This module centralizes the consistency checks used across the
//! optimizer interface:
//!
//! - **Option checks**: [`verify_max_evals`], [`verify_opt_tol`],
//!   [`verify_gamma`], [`verify_step_bounds`], [`verify_min_step`] and the
//!   L-BFGS tolerances [`verify_tol_grad`], [`verify_tol_cost`].
//! - **Penalties**: [`verify_penalty`] for L0/L1/L2 strengths and ridges.
//! - **Evaluations**: [`validate_grad`], [`validate_cost`] and
//!   [`validate_weights`] enforce dimensions and finiteness.
//!
//! All helpers return domain-specific [`OptError`] variants so that option
//! mistakes fail before the first objective evaluation.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::types::{Grad, Weights},
};

/// Validate the evaluation budget (must be at least 1).
pub fn verify_max_evals(max_evals: usize) -> OptResult<()> {
    if max_evals == 0 {
        return Err(OptError::InvalidMaxEvals {
            max_evals,
            reason: "Evaluation budget must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate the optimality tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidOptTol`] if the value is non-finite or ≤ 0.0.
pub fn verify_opt_tol(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidOptTol { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidOptTol { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Validate the Armijo constant `γ ∈ (0, 1)`.
pub fn verify_gamma(gamma: f64) -> OptResult<()> {
    if !gamma.is_finite() || gamma <= 0.0 || gamma >= 1.0 {
        return Err(OptError::InvalidGamma {
            gamma,
            reason: "Sufficient-decrease constant must lie strictly between 0 and 1.",
        });
    }
    Ok(())
}

/// Validate the secant step bounds `0 < lower < upper < ∞`.
pub fn verify_step_bounds(bounds: (f64, f64)) -> OptResult<()> {
    let (lower, upper) = bounds;
    if !lower.is_finite() || !upper.is_finite() {
        return Err(OptError::InvalidStepBounds {
            lower,
            upper,
            reason: "Bounds must be finite.",
        });
    }
    if lower <= 0.0 {
        return Err(OptError::InvalidStepBounds {
            lower,
            upper,
            reason: "Lower bound must be positive.",
        });
    }
    if lower >= upper {
        return Err(OptError::InvalidStepBounds {
            lower,
            upper,
            reason: "Lower bound must be smaller than upper bound.",
        });
    }
    Ok(())
}

/// Validate the step underflow threshold.
pub fn verify_min_step(value: f64) -> OptResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(OptError::InvalidMinStep {
            value,
            reason: "Minimum step must be finite and positive.",
        });
    }
    Ok(())
}

/// Validate a regularization strength (finite, non-negative).
pub fn verify_penalty(name: &'static str, value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::InvalidPenalty { name, value, reason: "Penalty must be finite." });
    }
    if value < 0.0 {
        return Err(OptError::InvalidPenalty {
            name,
            value,
            reason: "Penalty must be non-negative.",
        });
    }
    Ok(())
}

/// Validate the optional gradient‐norm tolerance.
///
/// - Accepts `None` (no stopping rule on gradient).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost‐change tolerance (for convergence).
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// Checks:
/// - `grad.len() == dim`
/// - every element is finite (`NaN` or `±∞` are rejected)
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    validate_grad_dim(grad, dim)?;
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Dimension-only gradient check, used on line-search trial points where a
/// non-finite value is a rejection rather than an error.
pub fn validate_grad_dim(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    Ok(())
}

/// Validate that a scalar objective value is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_cost(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// Validate that every entry of a parameter vector is finite.
pub fn validate_weights(w: &Weights) -> OptResult<()> {
    for (index, &value) in w.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidWeights {
                index,
                value,
                reason: "Parameter vectors must be finite.",
            });
        }
    }
    Ok(())
}
