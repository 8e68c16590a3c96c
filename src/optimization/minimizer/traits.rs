//! Public API surface for objective minimization.
//!
//! - [`Objective`]: capability trait each classifier (or test) implements.
//! - [`FnObjective`]: closure adapter, with or without a data payload.
//! - [`FindMinOptions`], [`LbfgsOptions`], [`Tolerances`], [`Backend`]:
//!   configuration for the two minimization backends.
//! - [`Verbosity`], [`LineSearcher`]: string/integer-parsable knobs.
//! - [`MinimizeOutcome`], [`Termination`]: normalized result of every run.
//!
//! Convention: objectives return the *smooth* loss and its gradient. Non-smooth
//! L1 terms are never part of an [`Objective`]; they are handled by the
//! proximal step of [`minimize_l1`](super::api::minimize_l1).
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{
        types::{
            Cost, DEFAULT_GAMMA, DEFAULT_MAX_BACKTRACKS, DEFAULT_MAX_EVALS, DEFAULT_MIN_STEP,
            DEFAULT_OPT_TOL, DEFAULT_STEP_BOUNDS, Grad, Weights,
        },
        validation::{
            validate_cost, validate_weights, verify_gamma, verify_max_evals, verify_min_step,
            verify_opt_tol, verify_step_bounds, verify_tol_cost, verify_tol_grad,
        },
    },
};
use std::{fmt, marker::PhantomData, str::FromStr};

/// User-implemented objective interface.
///
/// `evaluate` returns the pair `(f(w), ∇f(w))` for a parameter vector and the
/// fixed data payload. Implementations must be pure: the same inputs always
/// produce the same outputs and no state is mutated between calls.
///
/// - `type Data`: per-problem data carried into `evaluate`/`check`, passed
///   through the minimizer unchanged.
///
/// Required:
/// - `evaluate(&Weights, &Data) -> OptResult<(Cost, Grad)>`.
///
/// Optional:
/// - `check(&Weights, &Data) -> OptResult<()>`: validation hook called once
///   before optimization, typically to reject a parameter vector whose length
///   does not match the data.
pub trait Objective {
    type Data;

    // Required methods
    fn evaluate(&self, w: &Weights, data: &Self::Data) -> OptResult<(Cost, Grad)>;

    // Optional methods
    fn check(&self, _w: &Weights, _data: &Self::Data) -> OptResult<()> {
        Ok(())
    }
}

impl<T: Objective + ?Sized> Objective for &T {
    type Data = T::Data;

    fn evaluate(&self, w: &Weights, data: &Self::Data) -> OptResult<(Cost, Grad)> {
        (**self).evaluate(w, data)
    }

    fn check(&self, w: &Weights, data: &Self::Data) -> OptResult<()> {
        (**self).check(w, data)
    }
}

/// Closure-backed [`Objective`]; the closure receives the data payload `D`
/// (`()` when there is none).
///
/// ```
/// use linreg_optim::optimization::minimizer::{FnObjective, FindMinOptions, minimize};
/// use ndarray::{Array1, array};
///
/// // f(w) = ½‖w − c‖² with the target c passed as data.
/// let shifted = FnObjective::new(|w: &Array1<f64>, c: &Array1<f64>| {
///     let r = w - c;
///     Ok((0.5 * r.dot(&r), r))
/// });
/// let target = array![3.0, -4.0];
/// let out = minimize(&shifted, array![0.0, 0.0], &target, &FindMinOptions::default())?;
/// assert!((out.w[0] - 3.0).abs() < 1e-4);
/// # Ok::<(), linreg_optim::optimization::errors::OptError>(())
/// ```
pub struct FnObjective<F, D = ()> {
    f: F,
    dim: Option<usize>,
    _data: PhantomData<fn(&D)>,
}

impl<F, D> FnObjective<F, D>
where
    F: Fn(&Weights, &D) -> OptResult<(Cost, Grad)>,
{
    pub fn new(f: F) -> Self {
        Self { f, dim: None, _data: PhantomData }
    }

    /// Reject initial vectors whose length differs from `dim`.
    pub fn with_dim(mut self, dim: usize) -> Self {
        self.dim = Some(dim);
        self
    }
}

impl<F, D> Objective for FnObjective<F, D>
where
    F: Fn(&Weights, &D) -> OptResult<(Cost, Grad)>,
{
    type Data = D;

    fn evaluate(&self, w: &Weights, data: &D) -> OptResult<(Cost, Grad)> {
        (self.f)(w, data)
    }

    fn check(&self, w: &Weights, _data: &D) -> OptResult<()> {
        match self.dim {
            Some(expected) if expected != w.len() => {
                Err(OptError::WeightsDimMismatch { expected, found: w.len() })
            }
            _ => Ok(()),
        }
    }
}

/// Progress-logging level.
///
/// - `Silent` (0): no output.
/// - `Summary` (1): one `info` line per accepted iteration plus termination.
/// - `Detail` (2): additionally `debug` lines for backtracking and step sizes.
///
/// Parses from `"0"/"1"/"2"` or the case-insensitive names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Verbosity {
    #[default]
    Silent,
    Summary,
    Detail,
}

impl Verbosity {
    pub fn summary(self) -> bool {
        self >= Verbosity::Summary
    }

    pub fn detail(self) -> bool {
        self >= Verbosity::Detail
    }
}

impl TryFrom<u8> for Verbosity {
    type Error = OptError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Verbosity::Silent),
            1 => Ok(Verbosity::Summary),
            2 => Ok(Verbosity::Detail),
            other => Err(OptError::InvalidVerbosity { value: other.to_string() }),
        }
    }
}

impl FromStr for Verbosity {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "0" | "silent" => Ok(Verbosity::Silent),
            "1" | "summary" => Ok(Verbosity::Summary),
            "2" | "detail" => Ok(Verbosity::Detail),
            _ => Err(OptError::InvalidVerbosity { value: s.to_string() }),
        }
    }
}

/// Choice of line search used inside the L-BFGS backend.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"MoreThuente"`, `"HagerZhang"`). Unknown names return
/// `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Configuration of the find-min descent loop.
///
/// Fields:
/// - `max_evals` — objective evaluations allowed, including the initial one.
/// - `opt_tol` — stop once the ∞-norm optimality measure drops below this.
/// - `gamma` — Armijo sufficient-decrease constant.
/// - `max_backtracks` — step halvings allowed in a single line search.
/// - `min_step` — step sizes below this count as numerically zero.
/// - `step_bounds` — admissible range for the secant step estimate.
/// - `verbosity` — progress logging level; never affects the iterates.
///
/// Default:
/// - `max_evals = 100`, `opt_tol = 1e-5`, `gamma = 1e-4`,
///   `max_backtracks = 50`, `min_step = 1e-16`, `step_bounds = (1e-10, 1e10)`,
///   `verbosity = Silent`.
#[derive(Debug, Clone, PartialEq)]
pub struct FindMinOptions {
    pub max_evals: usize,
    pub opt_tol: f64,
    pub gamma: f64,
    pub max_backtracks: usize,
    pub min_step: f64,
    pub step_bounds: (f64, f64),
    pub verbosity: Verbosity,
}

impl FindMinOptions {
    /// Options with the given budget and verbosity and default numerics.
    ///
    /// # Errors
    /// - [`OptError::InvalidMaxEvals`] if `max_evals == 0`.
    pub fn new(max_evals: usize, verbosity: Verbosity) -> OptResult<Self> {
        verify_max_evals(max_evals)?;
        Ok(Self { max_evals, verbosity, ..Self::default() })
    }

    pub fn with_opt_tol(mut self, opt_tol: f64) -> OptResult<Self> {
        verify_opt_tol(opt_tol)?;
        self.opt_tol = opt_tol;
        Ok(self)
    }

    pub fn with_gamma(mut self, gamma: f64) -> OptResult<Self> {
        verify_gamma(gamma)?;
        self.gamma = gamma;
        Ok(self)
    }

    pub fn with_step_bounds(mut self, lower: f64, upper: f64) -> OptResult<Self> {
        verify_step_bounds((lower, upper))?;
        self.step_bounds = (lower, upper);
        Ok(self)
    }

    pub fn with_backtracking(mut self, max_backtracks: usize, min_step: f64) -> OptResult<Self> {
        verify_min_step(min_step)?;
        self.max_backtracks = max_backtracks;
        self.min_step = min_step;
        Ok(self)
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Re-check every field; fields are public, so the loop calls this on
    /// entry.
    pub fn validate(&self) -> OptResult<()> {
        verify_max_evals(self.max_evals)?;
        verify_opt_tol(self.opt_tol)?;
        verify_gamma(self.gamma)?;
        verify_min_step(self.min_step)?;
        verify_step_bounds(self.step_bounds)
    }
}

impl Default for FindMinOptions {
    fn default() -> Self {
        Self {
            max_evals: DEFAULT_MAX_EVALS,
            opt_tol: DEFAULT_OPT_TOL,
            gamma: DEFAULT_GAMMA,
            max_backtracks: DEFAULT_MAX_BACKTRACKS,
            min_step: DEFAULT_MIN_STEP,
            step_bounds: DEFAULT_STEP_BOUNDS,
            verbosity: Verbosity::Silent,
        }
    }
}

/// Numerical tolerances and iteration limits used by the L-BFGS backend.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** of the three must be provided
/// (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Configuration of the argmin L-BFGS backend.
///
/// Default: `tol_grad = 1e-6`, `tol_cost = None`, `max_iter = 300`,
/// More–Thuente line search, default memory, silent.
#[derive(Debug, Clone, PartialEq)]
pub struct LbfgsOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub lbfgs_mem: Option<usize>,
    pub verbosity: Verbosity,
}

impl LbfgsOptions {
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, lbfgs_mem: Option<usize>,
        verbosity: Verbosity,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, lbfgs_mem, verbosity })
    }
}

impl Default for LbfgsOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: None, max_iter: Some(300) },
            line_searcher: LineSearcher::MoreThuente,
            lbfgs_mem: None,
            verbosity: Verbosity::Silent,
        }
    }
}

/// Which minimizer drives a smooth objective.
#[derive(Debug, Clone, PartialEq)]
pub enum Backend {
    /// Steepest descent with Armijo backtracking and secant step sizes.
    FindMin(FindMinOptions),
    /// argmin L-BFGS.
    Lbfgs(LbfgsOptions),
}

impl Backend {
    pub fn verbosity(&self) -> Verbosity {
        match self {
            Backend::FindMin(opts) => opts.verbosity,
            Backend::Lbfgs(opts) => opts.verbosity,
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Backend::FindMin(FindMinOptions::default())
    }
}

/// Why a minimizer run stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
    /// Optimality measure fell below `opt_tol`.
    Optimal,
    /// Line search drove the step to numerical zero; treated as converged.
    StepUnderflow,
    /// Evaluation budget used up; the best accepted iterate is returned.
    BudgetExhausted,
    /// Status reported by the argmin backend.
    Backend { status: String, converged: bool },
}

impl Termination {
    pub fn is_converged(&self) -> bool {
        match self {
            Termination::Optimal | Termination::StepUnderflow => true,
            Termination::BudgetExhausted => false,
            Termination::Backend { converged, .. } => *converged,
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Optimal => write!(f, "optimality tolerance reached"),
            Termination::StepUnderflow => write!(f, "step size underflow"),
            Termination::BudgetExhausted => write!(f, "evaluation budget exhausted"),
            Termination::Backend { status, .. } => write!(f, "{status}"),
        }
    }
}

/// Canonical result returned by every minimizer entry point.
///
/// - `w`: final accepted parameter vector.
/// - `f`: objective at `w` (combined smooth + L1 value for proximal runs).
/// - `converged`: `termination.is_converged()`.
/// - `iterations`: accepted steps.
/// - `fn_evals`: objective evaluations, including the initial one.
/// - `opt_cond`: ∞-norm optimality measure at `w`.
/// - `cost_history`: objective at `w0` and after every accepted step; empty
///   for the L-BFGS backend.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizeOutcome {
    pub w: Weights,
    pub f: Cost,
    pub converged: bool,
    pub termination: Termination,
    pub iterations: usize,
    pub fn_evals: usize,
    pub opt_cond: f64,
    pub cost_history: Vec<Cost>,
}

impl MinimizeOutcome {
    /// Build a validated outcome.
    ///
    /// # Errors
    /// - [`OptError::InvalidWeights`] if `w` has non-finite entries.
    /// - [`OptError::NonFiniteCost`] if `f` is not finite.
    pub fn new(
        w: Weights, f: Cost, termination: Termination, iterations: usize, fn_evals: usize,
        opt_cond: f64, cost_history: Vec<Cost>,
    ) -> OptResult<Self> {
        validate_weights(&w)?;
        validate_cost(f)?;
        let converged = termination.is_converged();
        Ok(Self { w, f, converged, termination, iterations, fn_evals, opt_cond, cost_history })
    }
}
