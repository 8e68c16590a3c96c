//! Overflow-safe transforms behind the logistic and softmax losses.
//!
//! - [`safe_softplus`]: `ln(1 + exp(x))`; the logistic loss of a margin `m`
//!   is `softplus(-m)`.
//! - [`safe_logistic`]: `1 / (1 + exp(-x))`, branching on the sign of `x`.
//! - [`log_sum_exp`]: `ln Σ exp(row)` shifted by the row maximum.
//! - [`softmax_in_place`]: max-shifted class probabilities, written back
//!   into the row.
//!
//! Every `exp` is evaluated at a non-positive argument or below the
//! softplus cutoff `x = 20`, so none of them overflow for finite input.
use ndarray::{ArrayView1, ArrayViewMut1};

/// `ln(1 + exp(x))`, rewritten as `x + ln(1 + exp(-x))` above the cutoff.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x + (-x).exp().ln_1p() } else { x.exp().ln_1p() }
}

/// Numerically stable logistic function `σ(x) = 1 / (1 + exp(-x))`.
///
/// Branches on the sign of `x` so that `exp` is only ever evaluated at a
/// non-positive argument.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Max-shifted `ln Σ_j exp(row[j])`.
///
/// Returns `-∞` for an empty row. Non-finite maxima are returned as-is so
/// that callers can surface them through their own validation.
pub fn log_sum_exp(row: ArrayView1<'_, f64>) -> f64 {
    let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    let sum: f64 = row.iter().map(|&v| (v - max).exp()).sum();
    max + sum.ln()
}

/// Overwrite `row` with its softmax probabilities.
pub fn softmax_in_place(mut row: ArrayViewMut1<'_, f64>) {
    let lse = log_sum_exp(row.view());
    row.mapv_inplace(|v| (v - lse).exp());
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the guarded transforms with naïve formulas on safe grids.
    // - Tail behaviour where the naïve formulas overflow.
    //
    // They intentionally DO NOT cover:
    // - Loss/gradient assembly; see `classifiers::objectives`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Guarded softplus and logistic agree with the textbook expressions where
    // those are well-conditioned.
    //
    // Given
    // -----
    // - A grid of inputs in [-10, 10].
    //
    // Expect
    // ------
    // - Relative agreement to 1e-9 (the naïve softplus loses digits near
    //   x = -10).
    fn transforms_match_naive_formulas_on_safe_grid() {
        for k in -20..=20 {
            let x = k as f64 * 0.5;
            assert_relative_eq!(safe_softplus(x), (1.0 + x.exp()).ln(), max_relative = 1e-9);
            assert_relative_eq!(safe_logistic(x), 1.0 / (1.0 + (-x).exp()), max_relative = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Extreme arguments must not overflow.
    //
    // Given
    // -----
    // - x = ±800, where `exp` overflows.
    //
    // Expect
    // ------
    // - softplus(800) = 800, softplus(-800) ≈ 0, logistic saturates at 0/1.
    fn transforms_stay_finite_in_tails() {
        assert_relative_eq!(safe_softplus(800.0), 800.0);
        assert!(safe_softplus(-800.0) >= 0.0 && safe_softplus(-800.0) < 1e-300);
        assert_relative_eq!(safe_logistic(800.0), 1.0);
        assert!(safe_logistic(-800.0) >= 0.0 && safe_logistic(-800.0) < 1e-300);
    }

    #[test]
    fn log_sum_exp_is_shift_invariant_and_finite() {
        let row = array![1000.0, 1000.0];
        assert_relative_eq!(log_sum_exp(row.view()), 1000.0 + 2.0_f64.ln(), max_relative = 1e-14);

        let small = array![0.1, -0.3, 0.7];
        let naive = small.iter().map(|v: &f64| v.exp()).sum::<f64>().ln();
        assert_relative_eq!(log_sum_exp(small.view()), naive, max_relative = 1e-14);
    }

    #[test]
    fn softmax_rows_sum_to_one() {
        let mut row = array![2.0, -1.0, 0.5, 700.0];
        softmax_in_place(row.view_mut());
        assert_relative_eq!(row.sum(), 1.0, epsilon = 1e-12);
        assert!(row.iter().all(|p| *p >= 0.0));
    }
}
