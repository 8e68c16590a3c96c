//! minimizer::line_search — the shared find-min descent loop.
//!
//! Purpose
//! -------
//! Drive an [`Objective`] (plus an optional non-smooth term expressed as a
//! [`Proximal`] strategy) to a stationary point with proximal steepest
//! descent, Armijo backtracking and secant (Barzilai–Borwein) step sizes.
//!
//! Key behaviors
//! -------------
//! - Evaluate `(f, g)` at `w0` (evaluation #1) and pick `α = 1/‖g‖₂`.
//! - Each iteration proposes `w⁺ = prox(w − α g, α)` and accepts it when
//!   `F(w⁺) ≤ F(w) + γ gᵀ(w⁺ − w)`, with `F = f + h`. For the smooth case
//!   `gᵀ(w⁺ − w) = −α gᵀg`. Rejected trials halve `α`; every trial costs one
//!   evaluation.
//! - After acceptance the next step is `α = sᵀy / yᵀy` with
//!   `s = w⁺ − w`, `y = g⁺ − g`, reset to 1 when it leaves `step_bounds`.
//! - Stops on: optimality measure `< opt_tol`, budget exhausted, or the step
//!   collapsing below `min_step` / more than `max_backtracks` halvings.
//!
//! Invariants & assumptions
//! ------------------------
//! - Accepted objective values are non-increasing; `cost_history` records
//!   them starting from `F(w0)`.
//! - Only accepted iterates are ever returned. Running out of budget inside
//!   a line search returns the last accepted point.
//! - A non-finite trial value fails the Armijo test and is backtracked; a
//!   non-finite value at `w0` or at an accepted point is an error.
//! - Logging is observational only and never changes the iterates.
use crate::optimization::{
    errors::OptResult,
    minimizer::{
        penalty::Proximal,
        traits::{FindMinOptions, MinimizeOutcome, Objective, Termination},
        types::{Cost, Grad, RESET_STEP, Weights},
        validation::{validate_cost, validate_grad, validate_grad_dim, validate_weights},
    },
};
use log::{debug, info};

/// Counts evaluations and enforces the gradient-length invariant.
struct Evaluator<'a, O: Objective + ?Sized> {
    objective: &'a O,
    data: &'a O::Data,
    dim: usize,
    evals: usize,
}

impl<'a, O: Objective + ?Sized> Evaluator<'a, O> {
    fn new(objective: &'a O, data: &'a O::Data, dim: usize) -> Self {
        Self { objective, data, dim, evals: 0 }
    }

    fn eval(&mut self, w: &Weights) -> OptResult<(Cost, Grad)> {
        let (f, g) = self.objective.evaluate(w, self.data)?;
        self.evals += 1;
        validate_grad_dim(&g, self.dim)?;
        Ok((f, g))
    }
}

/// Result of one backtracking line search.
enum LineSearch {
    Accepted { w: Weights, f: Cost, g: Grad, total: Cost },
    OutOfBudget,
    Underflow,
}

/// Current accepted point of the descent.
struct Iterate {
    w: Weights,
    f: Cost,
    g: Grad,
    total: Cost,
}

/// find_min — proximal steepest descent with Armijo backtracking.
///
/// Parameters
/// ----------
/// - `objective`: smooth part `f` of the problem.
/// - `w0`: finite starting point; its length fixes the problem dimension.
/// - `data`: payload passed through to every evaluation.
/// - `penalty`: non-smooth part `h` ([`NoPenalty`](super::penalty::NoPenalty)
///   for smooth problems).
/// - `opts`: loop configuration, validated on entry.
///
/// Returns
/// -------
/// `OptResult<MinimizeOutcome>` whose `f` is `f(w) + h(w)` at the returned
/// iterate. Budget exhaustion is a normal outcome, not an error.
///
/// Errors
/// ------
/// - Option validation errors from [`FindMinOptions::validate`].
/// - [`OptError::InvalidWeights`](crate::optimization::errors::OptError::InvalidWeights)
///   for a non-finite `w0`.
/// - [`OptError::GradientDimMismatch`](crate::optimization::errors::OptError::GradientDimMismatch)
///   whenever the objective returns a gradient of the wrong length.
/// - Non-finite cost or gradient at `w0` or at an accepted iterate.
/// - Any error raised by the objective itself.
pub fn find_min<O, P>(
    objective: &O, w0: Weights, data: &O::Data, penalty: &P, opts: &FindMinOptions,
) -> OptResult<MinimizeOutcome>
where
    O: Objective + ?Sized,
    P: Proximal + ?Sized,
{
    opts.validate()?;
    validate_weights(&w0)?;
    let verbosity = opts.verbosity;
    let mut evaluator = Evaluator::new(objective, data, w0.len());

    let (f0, g0) = evaluator.eval(&w0)?;
    validate_cost(f0)?;
    validate_grad(&g0, w0.len())?;
    let total0 = f0 + penalty.value(&w0);
    let mut current = Iterate { w: w0, f: f0, g: g0, total: total0 };
    let mut cost_history = vec![current.total];
    let mut opt_cond = penalty.optimality(&current.w, &current.g);
    let mut iterations = 0usize;

    let g_norm = current.g.dot(&current.g).sqrt();
    let mut alpha = if g_norm > 0.0 { 1.0 / g_norm } else { RESET_STEP };

    let termination = loop {
        if opt_cond < opts.opt_tol {
            break Termination::Optimal;
        }
        if evaluator.evals >= opts.max_evals {
            break Termination::BudgetExhausted;
        }

        let mut backtracks = 0usize;
        let outcome = loop {
            let step = &current.w - &(alpha * &current.g);
            let w_new = penalty.prox(step, alpha);
            let (f_new, g_new) = evaluator.eval(&w_new)?;
            let total_new = f_new + penalty.value(&w_new);
            let directional = current.g.dot(&(&w_new - &current.w));

            if total_new <= current.total + opts.gamma * directional {
                break LineSearch::Accepted { w: w_new, f: f_new, g: g_new, total: total_new };
            }
            if verbosity.detail() {
                debug!(
                    "backtracking: f_new = {total_new:.6e}, f = {:.6e}, alpha = {alpha:.3e}",
                    current.total
                );
            }
            if evaluator.evals >= opts.max_evals {
                break LineSearch::OutOfBudget;
            }
            backtracks += 1;
            alpha *= 0.5;
            if backtracks > opts.max_backtracks || alpha < opts.min_step {
                break LineSearch::Underflow;
            }
        };

        let (w_new, f_new, g_new, total_new) = match outcome {
            LineSearch::Accepted { w, f, g, total } => (w, f, g, total),
            LineSearch::OutOfBudget => break Termination::BudgetExhausted,
            LineSearch::Underflow => break Termination::StepUnderflow,
        };
        validate_cost(total_new)?;
        validate_grad(&g_new, current.w.len())?;

        if verbosity.summary() {
            info!(
                "{} - loss: {total_new:.6} - alpha: {alpha:.3e} - backtracks: {backtracks}",
                evaluator.evals
            );
        }

        alpha = secant_step(&(&w_new - &current.w), &(&g_new - &current.g), opts.step_bounds);
        if verbosity.detail() {
            debug!("next alpha: {alpha:.3e}");
        }

        current = Iterate { w: w_new, f: f_new, g: g_new, total: total_new };
        iterations += 1;
        cost_history.push(current.total);
        opt_cond = penalty.optimality(&current.w, &current.g);
    };

    if verbosity.summary() {
        info!(
            "find_min stopped ({termination}) after {iterations} iterations and {} evaluations: \
             loss {:.6}, optimality {opt_cond:.3e}",
            evaluator.evals, current.total
        );
    }
    if verbosity.detail() {
        debug!("smooth part of final objective: {:.6}", current.f);
    }

    MinimizeOutcome::new(
        current.w,
        current.total,
        termination,
        iterations,
        evaluator.evals,
        opt_cond,
        cost_history,
    )
}

/// Barzilai–Borwein step `sᵀy / yᵀy`, reset when outside `bounds`.
fn secant_step(s: &Weights, y: &Grad, bounds: (f64, f64)) -> f64 {
    let yy = y.dot(y);
    let step = s.dot(y) / yy;
    if step.is_finite() && step >= bounds.0 && step <= bounds.1 { step } else { RESET_STEP }
}
