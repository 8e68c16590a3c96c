//! High-level entry points for minimizing an [`Objective`].
//!
//! - [`minimize`]: smooth objectives with the find-min descent loop.
//! - [`minimize_l1`]: smooth objective plus `λ‖w‖₁`, handled by the
//!   soft-threshold proximal step of the same loop.
//! - [`minimize_with`]: smooth objectives with a selectable [`Backend`]
//!   (find-min or argmin L-BFGS).
//!
//! All entry points call [`Objective::check`] on `w0` before the first
//! evaluation.
use crate::optimization::{
    errors::OptResult,
    minimizer::{
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        line_search::find_min,
        penalty::{L1Penalty, NoPenalty},
        run::run_lbfgs,
        traits::{Backend, FindMinOptions, LineSearcher, MinimizeOutcome, Objective},
        types::Weights,
    },
};

/// Minimize a smooth objective from `w0` with the find-min loop.
///
/// # Errors
/// - Propagates `objective.check`.
/// - Option, dimension and finiteness errors from
///   [`find_min`](super::line_search::find_min).
///
/// Running out of `opts.max_evals` is not an error; inspect
/// `outcome.termination`.
///
/// # Example
/// ```
/// use linreg_optim::optimization::minimizer::{FindMinOptions, FnObjective, Verbosity, minimize};
/// use ndarray::array;
///
/// // f(w) = (w0 - 1)^2 + 4 (w1 + 2)^2
/// let obj = FnObjective::new(|w: &ndarray::Array1<f64>, _: &()| {
///     let f = (w[0] - 1.0).powi(2) + 4.0 * (w[1] + 2.0).powi(2);
///     Ok((f, array![2.0 * (w[0] - 1.0), 8.0 * (w[1] + 2.0)]))
/// });
/// let opts = FindMinOptions::new(200, Verbosity::Silent)?;
/// let out = minimize(&obj, array![0.0, 0.0], &(), &opts)?;
/// assert!(out.converged);
/// assert!((out.w[1] + 2.0).abs() < 1e-4);
/// # Ok::<(), linreg_optim::optimization::errors::OptError>(())
/// ```
pub fn minimize<O: Objective + ?Sized>(
    objective: &O, w0: Weights, data: &O::Data, opts: &FindMinOptions,
) -> OptResult<MinimizeOutcome> {
    objective.check(&w0, data)?;
    find_min(objective, w0, data, &NoPenalty, opts)
}

/// Minimize `f(w) + λ‖w‖₁` where `objective` supplies only the smooth `f`.
///
/// The reported `outcome.f` is the combined value. With `λ = 0` the iterates
/// are identical to [`minimize`].
///
/// # Errors
/// Same as [`minimize`].
pub fn minimize_l1<O: Objective + ?Sized>(
    objective: &O, w0: Weights, penalty: &L1Penalty, data: &O::Data, opts: &FindMinOptions,
) -> OptResult<MinimizeOutcome> {
    objective.check(&w0, data)?;
    find_min(objective, w0, data, penalty, opts)
}

/// Minimize a smooth objective with the chosen backend.
///
/// `Backend::FindMin` behaves exactly like [`minimize`]. `Backend::Lbfgs`
/// wraps the objective in an [`ArgMinAdapter`], builds L-BFGS with the
/// configured line search and runs it through argmin's executor.
///
/// # Errors
/// - Propagates `objective.check`.
/// - Builder errors (tolerances rejected by argmin).
/// - Runtime errors from either backend.
pub fn minimize_with<O: Objective + ?Sized>(
    objective: &O, w0: Weights, data: &O::Data, backend: &Backend,
) -> OptResult<MinimizeOutcome> {
    match backend {
        Backend::FindMin(opts) => minimize(objective, w0, data, opts),
        Backend::Lbfgs(opts) => {
            objective.check(&w0, data)?;
            let problem = ArgMinAdapter::new(objective, data);
            match opts.line_searcher {
                LineSearcher::MoreThuente => {
                    let solver = build_optimizer_more_thuente(opts)?;
                    run_lbfgs(w0, opts, problem, solver)
                }
                LineSearcher::HagerZhang => {
                    let solver = build_optimizer_hager_zhang(opts)?;
                    run_lbfgs(w0, opts, problem, solver)
                }
            }
        }
    }
}
