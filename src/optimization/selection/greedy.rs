//! selection::greedy — forward stepwise L0 feature selection.
//!
//! Purpose
//! -------
//! Approximate `min_w f(w) + λ₀‖w‖₀` by growing a feature set one column at
//! a time. Every candidate set is scored by fully minimizing the smooth
//! objective restricted to its columns and adding `λ₀ · |set|`.
//!
//! Key behaviors
//! -------------
//! - The set starts as `{always_selected}` (feature 0 by default, the bias
//!   column) and never shrinks.
//! - A sweep fits `selected ∪ {i}` for every unselected `i` in increasing
//!   index order and keeps the lowest score; a strict `<` makes the first
//!   index win ties.
//! - The sweep's winner is adopted only when its score is below the best
//!   score of all previous sweeps (by more than `score_tol`). Otherwise the
//!   search stops. The first sweep always adopts since the running best
//!   starts at `+∞`.
//! - A final refit on the selected columns produces a length-`d` weight
//!   vector with zeros off the support.
//!
//! Invariants & assumptions
//! ------------------------
//! - Terminates after at most `d − 1` sweeps; each sweep adds one feature or
//!   ends the search.
//! - `O(d²)` minimizer calls in the worst case, evaluated sequentially so
//!   tie-breaking is deterministic.
//! - Column lists handed to [`SubsetProblem::restrict`] are ascending.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{
        api::minimize,
        traits::{FindMinOptions, MinimizeOutcome, Objective, Verbosity},
        types::Weights,
        validation::verify_penalty,
    },
};
use log::{debug, info};
use std::collections::BTreeSet;

/// Default per-fit evaluation budget of the selector.
pub const DEFAULT_SELECTION_MAX_EVALS: usize = 400;

/// A smooth objective whose data can be restricted to a subset of features.
///
/// - `n_features`: total number of columns `d`.
/// - `objective`: the loss minimized for every candidate set; its parameter
///   vector has one entry per retained column.
/// - `restrict`: data payload holding only `columns` (ascending, unique).
pub trait SubsetProblem {
    type Data;
    type Objective: Objective<Data = Self::Data> + ?Sized;

    fn n_features(&self) -> usize;

    fn objective(&self) -> &Self::Objective;

    fn restrict(&self, columns: &[usize]) -> OptResult<Self::Data>;
}

/// Configuration of [`select_features`].
///
/// Default: `l0_penalty = 1.0`, per-fit budget 400 (silent fits),
/// `score_tol = 0.0` (exact comparison), `always_selected = 0`, silent.
#[derive(Debug, Clone, PartialEq)]
pub struct GreedyOptions {
    pub l0_penalty: f64,
    pub fit: FindMinOptions,
    pub score_tol: f64,
    pub always_selected: usize,
    pub verbosity: Verbosity,
}

impl GreedyOptions {
    /// # Errors
    /// - `InvalidPenalty` for a negative or non-finite `l0_penalty`.
    /// - `InvalidMaxEvals` for a zero budget.
    pub fn new(l0_penalty: f64, max_evals_per_fit: usize) -> OptResult<Self> {
        verify_penalty("L0", l0_penalty)?;
        let fit = FindMinOptions::new(max_evals_per_fit, Verbosity::Silent)?;
        Ok(Self { l0_penalty, fit, ..Self::default() })
    }

    /// Minimum score decrease required to adopt a feature.
    pub fn with_score_tol(mut self, score_tol: f64) -> OptResult<Self> {
        if !score_tol.is_finite() || score_tol < 0.0 {
            return Err(OptError::InvalidScoreTol {
                tol: score_tol,
                reason: "Score tolerance must be finite and non-negative.",
            });
        }
        self.score_tol = score_tol;
        Ok(self)
    }

    pub fn with_always_selected(mut self, feature: usize) -> Self {
        self.always_selected = feature;
        self
    }

    pub fn with_fit_options(mut self, fit: FindMinOptions) -> Self {
        self.fit = fit;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
}

impl Default for GreedyOptions {
    fn default() -> Self {
        Self {
            l0_penalty: 1.0,
            fit: FindMinOptions { max_evals: DEFAULT_SELECTION_MAX_EVALS, ..FindMinOptions::default() },
            score_tol: 0.0,
            always_selected: 0,
            verbosity: Verbosity::Silent,
        }
    }
}

/// Result of a greedy selection run.
///
/// - `w`: refit weights of length `d`, zero outside `selected`.
/// - `selected`: final support in ascending order.
/// - `selection_order`: features in the order they were adopted, starting
///   with the always-selected one.
/// - `sweeps`: candidate sweeps performed (including the final
///   non-improving one).
/// - `min_score`: best penalized score `f* + λ₀·|set|` reached.
/// - `final_loss`: smooth loss of the final refit.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOutcome {
    pub w: Weights,
    pub selected: BTreeSet<usize>,
    pub selection_order: Vec<usize>,
    pub sweeps: usize,
    pub min_score: f64,
    pub final_loss: f64,
}

/// select_features — greedy forward selection under an L0 penalty.
///
/// Errors
/// ------
/// - [`OptError::InvalidFeatureIndex`] when `always_selected ≥ d`.
/// - Option errors for the penalty, tolerance or per-fit budget.
/// - Any error raised while restricting data or fitting a candidate.
pub fn select_features<P: SubsetProblem + ?Sized>(
    problem: &P, opts: &GreedyOptions,
) -> OptResult<SelectionOutcome> {
    verify_penalty("L0", opts.l0_penalty)?;
    opts.fit.validate()?;
    let n_features = problem.n_features();
    if opts.always_selected >= n_features {
        return Err(OptError::InvalidFeatureIndex { index: opts.always_selected, n_features });
    }

    let mut selected = BTreeSet::from([opts.always_selected]);
    let mut selection_order = vec![opts.always_selected];
    let mut min_score = f64::INFINITY;
    let mut sweeps = 0usize;

    while selected.len() < n_features {
        sweeps += 1;
        let mut best: Option<(usize, f64)> = None;
        for i in (0..n_features).filter(|i| !selected.contains(i)) {
            let mut candidate = selected.clone();
            candidate.insert(i);
            let columns: Vec<usize> = candidate.into_iter().collect();
            let fit = fit_subset(problem, &columns, &opts.fit)?;
            let score = fit.f + opts.l0_penalty * columns.len() as f64;
            if opts.verbosity.detail() {
                debug!("candidate {i}: loss {:.6}, score {score:.6}", fit.f);
            }
            if best.is_none_or(|(_, s)| score < s) {
                best = Some((i, score));
            }
        }

        match best {
            Some((feature, score)) if score < min_score - opts.score_tol => {
                selected.insert(feature);
                selection_order.push(feature);
                min_score = score;
                if opts.verbosity.summary() {
                    info!(
                        "Epoch {} - selected feature: {feature} - min score: {min_score:.3}",
                        selected.len()
                    );
                }
            }
            _ => break,
        }
    }

    let columns: Vec<usize> = selected.iter().copied().collect();
    let refit = fit_subset(problem, &columns, &opts.fit)?;
    let mut w = Weights::zeros(n_features);
    for (&col, &value) in columns.iter().zip(refit.w.iter()) {
        w[col] = value;
    }
    if !min_score.is_finite() {
        min_score = refit.f + opts.l0_penalty * columns.len() as f64;
    }
    if opts.verbosity.summary() {
        info!(
            "selection finished after {sweeps} sweeps: {} features, loss {:.6}",
            columns.len(),
            refit.f
        );
    }

    Ok(SelectionOutcome { w, selected, selection_order, sweeps, min_score, final_loss: refit.f })
}

fn fit_subset<P: SubsetProblem + ?Sized>(
    problem: &P, columns: &[usize], opts: &FindMinOptions,
) -> OptResult<MinimizeOutcome> {
    let data = problem.restrict(columns)?;
    minimize(problem.objective(), Weights::zeros(columns.len()), &data, opts)
}
