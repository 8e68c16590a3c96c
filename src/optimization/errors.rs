//! errors — unified error surface for optimization and model fitting.
//!
//! Every fallible entry point in the crate returns [`OptResult<T>`]. The
//! variants are grouped by the layer that raises them: option validation,
//! shape checks, objective evaluation, the gradient-check oracle, dense
//! linear algebra, and the argmin backend. Non-convergence within the
//! evaluation budget is never an error; it is reported through the
//! minimizer outcome instead.
use argmin::core::{ArgminError, Error};
use thiserror::Error;

/// Crate-wide result alias for optimizer and classifier operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptError {
    // ---- Minimizer options ----
    /// Evaluation budget must allow at least one evaluation.
    #[error("Invalid evaluation budget {max_evals}: {reason}")]
    InvalidMaxEvals { max_evals: usize, reason: &'static str },

    /// Optimality tolerance must be finite and strictly positive.
    #[error("Invalid optimality tolerance {tol}: {reason}")]
    InvalidOptTol { tol: f64, reason: &'static str },

    /// Sufficient-decrease constant must lie in (0, 1).
    #[error("Invalid sufficient-decrease constant {gamma}: {reason}")]
    InvalidGamma { gamma: f64, reason: &'static str },

    /// Step-size bounds must be finite, positive and ordered.
    #[error("Invalid step-size bounds ({lower}, {upper}): {reason}")]
    InvalidStepBounds { lower: f64, upper: f64, reason: &'static str },

    /// Step underflow threshold must be finite and strictly positive.
    #[error("Invalid minimum step {value}: {reason}")]
    InvalidMinStep { value: f64, reason: &'static str },

    /// Unknown verbosity level.
    #[error("Invalid verbosity '{value}': expected 0/1/2 or silent/summary/detail")]
    InvalidVerbosity { value: String },

    /// Regularization strengths must be finite and non-negative.
    #[error("Invalid {name} penalty {value}: {reason}")]
    InvalidPenalty { name: &'static str, value: f64, reason: &'static str },

    /// Selector score tolerance must be finite and non-negative.
    #[error("Invalid score tolerance {tol}: {reason}")]
    InvalidScoreTol { tol: f64, reason: &'static str },

    // ---- L-BFGS options ----
    /// Gradient tolerance needs to be positive and finite.
    #[error("Invalid gradient tolerance {tol}: {reason}")]
    InvalidTolGrad { tol: f64, reason: &'static str },

    /// Cost change tolerance needs to be positive and finite.
    #[error("Invalid cost function change tolerance {tol}: {reason}")]
    InvalidTolCost { tol: f64, reason: &'static str },

    /// Maximum iterations needs to be positive.
    #[error("Invalid maximum iterations {max_iter}: {reason}")]
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    /// At least one tolerance must be provided.
    #[error("No tolerances provided")]
    NoTolerancesProvided,

    /// Invalid line searcher name.
    #[error("Invalid line searcher '{name}': {reason}")]
    InvalidLineSearch { name: String, reason: &'static str },

    /// lbfgs_mem needs to be at least 1.
    #[error("Invalid L-BFGS memory {mem}: {reason}")]
    InvalidLBFGSMem { mem: usize, reason: &'static str },

    // ---- Dimensions ----
    /// Gradient dimensions do not match parameter dimensions.
    #[error("Gradient dimension mismatch: expected {expected}, found {found}")]
    GradientDimMismatch { expected: usize, found: usize },

    /// Parameter vector length does not match the problem.
    #[error("Weight dimension mismatch: expected {expected}, found {found}")]
    WeightsDimMismatch { expected: usize, found: usize },

    /// Design matrix rows and label count disagree.
    #[error("Sample count mismatch: design matrix has {rows} rows, labels have {labels} entries")]
    SampleCountMismatch { rows: usize, labels: usize },

    /// Design matrix has no samples or no features.
    #[error("Empty design matrix: {rows} x {cols}")]
    EmptyDesign { rows: usize, cols: usize },

    /// Feature index outside `0..n_features`.
    #[error("Feature index {index} out of range for {n_features} features")]
    InvalidFeatureIndex { index: usize, n_features: usize },

    // ---- Data ----
    /// Design matrix entries must be finite.
    #[error("Non-finite design entry at ({row}, {col}): {value}")]
    NonFiniteData { row: usize, col: usize, value: f64 },

    /// Binary labels must be exactly -1 or +1.
    #[error("Invalid binary label at index {index}: {value}, must be -1 or +1")]
    InvalidBinaryLabel { index: usize, value: f64 },

    /// Multi-class problems need at least two classes.
    #[error("Too few classes: found {n_classes}, need at least 2")]
    TooFewClasses { n_classes: usize },

    // ---- Objective ----
    /// Objective returned a non-finite value.
    #[error("Non-finite cost value: {value}")]
    NonFiniteCost { value: f64 },

    /// Gradient elements need to be finite.
    #[error("Invalid gradient at index {index}: {value}: {reason}")]
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    /// Parameter vectors must be finite.
    #[error("Invalid weight at index {index}: {value}: {reason}")]
    InvalidWeights { index: usize, value: f64, reason: &'static str },

    // ---- Gradient check ----
    /// Analytic and finite-difference gradients disagree.
    #[error(
        "Analytic and numerical derivatives differ at index {index}: analytic {analytic}, numerical {numeric}"
    )]
    GradientCheckFailed { index: usize, analytic: f64, numeric: f64 },

    // ---- Linear algebra ----
    /// Normal equations could not be factorized.
    #[error("Singular {dim}x{dim} system in closed-form solve")]
    SingularSystem { dim: usize },

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    #[error("Invalid parameter: {text}")]
    InvalidParameter { text: String },
    /// Wrapper for argmin::NotImplemented
    #[error("Not implemented: {text}")]
    NotImplemented { text: String },
    /// Wrapper for argmin::NotInitialized
    #[error("Not initialized: {text}")]
    NotInitialized { text: String },
    /// Wrapper for argmin::ConditionViolated
    #[error("Condition violated: {text}")]
    ConditionViolated { text: String },
    /// Wrapper for argmin::CheckPointNotFound
    #[error("Checkpoint not found: {text}")]
    CheckPointNotFound { text: String },
    /// Wrapper for argmin::PotentialBug
    #[error("Potential bug: {text}")]
    PotentialBug { text: String },
    /// Wrapper for argmin::ImpossibleError
    #[error("Impossible error: {text}")]
    ImpossibleError { text: String },
    /// Wrapper for other argmin::Error types
    #[error("Backend error: {text}")]
    BackendError { text: String },

    // ---- Fallback ----
    #[error("Unknown error")]
    UnknownError,
}

impl From<Error> for OptError {
    /// Recover the original [`OptError`] when one was raised inside an argmin
    /// callback, otherwise map argmin's own error kinds.
    fn from(original_err: Error) -> Self {
        let err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match err.downcast() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}
