//! Execution helper that runs an `argmin` L-BFGS solver on an [`Objective`]
//! and normalizes the result into a [`MinimizeOutcome`].
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{
        adapter::ArgMinAdapter,
        traits::{LbfgsOptions, MinimizeOutcome, Objective, Termination},
        types::{Grad, Weights},
    },
};
use argmin::core::{Executor, State, TerminationReason, TerminationStatus};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;
use log::info;

/// Run an `argmin` solver over an [`ArgMinAdapter`].
///
/// Shared by both line-search variants. Sets `w0` as the initial parameter,
/// applies `max_iter` when configured, runs the executor and maps its final
/// state:
///
/// - `w`: best parameter found; `f`: best cost.
/// - `termination`: [`Termination::Backend`] carrying argmin's status;
///   converged when argmin reports `SolverConverged` or `TargetCostReached`.
/// - `fn_evals`: argmin's cost and gradient counters plus the one extra
///   evaluation used to compute `opt_cond = ‖∇f(w)‖∞` at the returned point.
/// - `cost_history`: empty; argmin keeps no per-iteration trace here.
///
/// # Feature flags
/// With `obs_slog` and verbosity ≥ `Summary`, the initial cost and gradient
/// norm are logged and a terminal slog observer is attached.
///
/// # Errors
/// - argmin runtime errors (line-search failures, objective errors) through
///   `From<argmin::core::Error>`.
/// - Objective errors from the final optimality evaluation.
/// - Validation errors from [`MinimizeOutcome::new`].
pub fn run_lbfgs<'a, O, S>(
    w0: Weights, opts: &LbfgsOptions, problem: ArgMinAdapter<'a, O>, solver: S,
) -> OptResult<MinimizeOutcome>
where
    O: Objective + ?Sized,
    S: argmin::core::Solver<
            ArgMinAdapter<'a, O>,
            argmin::core::IterState<Weights, Grad, (), (), (), f64>,
        >,
{
    let probe = problem.clone();
    #[cfg(feature = "obs_slog")]
    if opts.verbosity.summary() {
        log_initial_state(&w0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(w0));
    #[cfg(feature = "obs_slog")]
    if opts.verbosity.summary() {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter() as usize;
    let counts = result.get_func_counts();
    let backend_evals = counts.get("cost_count").copied().unwrap_or(0)
        + counts.get("gradient_count").copied().unwrap_or(0);
    let status = result.get_termination_status().clone();
    let f = result.get_best_cost();
    let w = result.take_best_param().ok_or_else(|| OptError::NotInitialized {
        text: "L-BFGS finished without a best parameter vector".to_string(),
    })?;

    let (_, g) = probe.objective.evaluate(&w, probe.data)?;
    let opt_cond = g.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let termination = map_status(&status);

    if opts.verbosity.summary() {
        info!(
            "L-BFGS stopped ({termination}) after {iterations} iterations: loss {f:.6}, \
             optimality {opt_cond:.3e}"
        );
    }

    MinimizeOutcome::new(
        w,
        f,
        termination,
        iterations,
        backend_evals as usize + 1,
        opt_cond,
        Vec::new(),
    )
}

fn map_status(status: &TerminationStatus) -> Termination {
    match status {
        TerminationStatus::NotTerminated => {
            Termination::Backend { status: "Not terminated".to_string(), converged: false }
        }
        TerminationStatus::Terminated(reason) => {
            let converged = matches!(
                reason,
                TerminationReason::SolverConverged | TerminationReason::TargetCostReached
            );
            Termination::Backend { status: format!("{reason:?}"), converged }
        }
    }
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<O>(w0: &Weights, problem: &ArgMinAdapter<'_, O>) -> OptResult<()>
where
    O: Objective + ?Sized,
{
    let f0 = problem.cost(w0)?;
    let g0n = problem.gradient(w0).ok().map(|g| g.l2_norm());
    info!(
        "init: f(w0) = {:.6}{}",
        f0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}
