//! Adapter that exposes an [`Objective`] as an `argmin` problem.
//!
//! Objectives in this crate are already minimization problems, so the cost
//! is passed through unchanged. Every classifier objective supplies an
//! analytic gradient; there is no finite-difference fallback on this path
//! (finite differences are reserved for
//! [`check_gradient`](super::gradient_check::check_gradient)).
use crate::optimization::{
    errors::OptError,
    minimizer::{
        traits::Objective,
        types::{Cost, Grad, Weights},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};

/// Bridges an [`Objective`] and its data to `argmin`'s `CostFunction` and
/// `Gradient`.
///
/// Both trait methods call [`Objective::evaluate`] and keep the half they
/// need; argmin counts the two calls separately.
pub struct ArgMinAdapter<'a, O: Objective + ?Sized> {
    pub objective: &'a O,
    pub data: &'a O::Data,
}

impl<'a, O: Objective + ?Sized> ArgMinAdapter<'a, O> {
    pub fn new(objective: &'a O, data: &'a O::Data) -> Self {
        Self { objective, data }
    }
}

impl<O: Objective + ?Sized> Clone for ArgMinAdapter<'_, O> {
    fn clone(&self) -> Self {
        Self { objective: self.objective, data: self.data }
    }
}

impl<O: Objective + ?Sized> CostFunction for ArgMinAdapter<'_, O> {
    type Param = Weights;
    type Output = Cost;

    /// `+∞` is returned as is so that the line search can shrink an
    /// overlong trial step; accepted iterates are checked again when the
    /// outcome is built.
    ///
    /// # Errors
    /// Propagates objective errors and rejects NaN or `−∞` with
    /// `NonFiniteCost`.
    fn cost(&self, w: &Self::Param) -> Result<Self::Output, Error> {
        let (f, _) = self.objective.evaluate(w, self.data)?;
        if f.is_nan() || f == f64::NEG_INFINITY {
            return Err(OptError::NonFiniteCost { value: f }.into());
        }
        Ok(f)
    }
}

impl<O: Objective + ?Sized> Gradient for ArgMinAdapter<'_, O> {
    type Param = Weights;
    type Gradient = Grad;

    /// # Errors
    /// Propagates objective errors; a gradient of the wrong length or with
    /// non-finite entries is rejected.
    fn gradient(&self, w: &Self::Param) -> Result<Self::Gradient, Error> {
        let (_, g) = self.objective.evaluate(w, self.data)?;
        validate_grad(&g, w.len())?;
        Ok(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::minimizer::traits::FnObjective;
    use ndarray::array;

    #[test]
    fn cost_and_gradient_pass_through_without_sign_change() {
        let obj = FnObjective::new(|w: &Weights, _: &()| Ok((w.dot(w), 2.0 * w)));
        let adapter = ArgMinAdapter::new(&obj, &());
        let w = array![1.0, -2.0];
        assert_eq!(adapter.cost(&w).unwrap(), 5.0);
        assert_eq!(adapter.gradient(&w).unwrap(), array![2.0, -4.0]);
    }

    #[test]
    // Purpose
    // -------
    // Validation errors raised inside the adapter survive the round trip
    // through `argmin::core::Error` as the original `OptError`.
    //
    // Given
    // -----
    // - An objective returning NaN cost and a too-short gradient.
    //
    // Expect
    // ------
    // - `NonFiniteCost` from `cost`, `GradientDimMismatch` from `gradient`.
    fn invalid_evaluations_surface_as_opt_errors() {
        let obj = FnObjective::new(|_w: &Weights, _: &()| Ok((f64::NAN, array![1.0])));
        let adapter = ArgMinAdapter::new(&obj, &());
        let w = array![0.0, 0.0];

        let err: OptError = adapter.cost(&w).unwrap_err().into();
        assert!(matches!(err, OptError::NonFiniteCost { .. }));

        let err: OptError = adapter.gradient(&w).unwrap_err().into();
        assert_eq!(err, OptError::GradientDimMismatch { expected: 2, found: 1 });
    }

    #[test]
    fn infinite_trial_cost_is_passed_to_the_line_search() {
        let obj = FnObjective::new(|w: &Weights, _: &()| {
            let f = if w[0] > 10.0 { f64::INFINITY } else { w.dot(w) };
            Ok((f, 2.0 * w))
        });
        let adapter = ArgMinAdapter::new(&obj, &());
        assert_eq!(adapter.cost(&array![20.0]).unwrap(), f64::INFINITY);

        let negative = FnObjective::new(|w: &Weights, _: &()| Ok((f64::NEG_INFINITY, w.clone())));
        let adapter = ArgMinAdapter::new(&negative, &());
        let err: OptError = adapter.cost(&array![1.0]).unwrap_err().into();
        assert!(matches!(err, OptError::NonFiniteCost { .. }));
    }
}
