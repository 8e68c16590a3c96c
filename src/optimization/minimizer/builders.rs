//! minimizer::builders — L-BFGS solver construction for the argmin backend.
//!
//! Builders create an L-BFGS solver with the requested line search and apply
//! the optional tolerances from [`LbfgsOptions`]. The initial parameter
//! vector and iteration cap are runtime concerns handled by
//! [`run_lbfgs`](super::run::run_lbfgs).
//!
//! Any tolerance argmin refuses is surfaced as an [`OptError`] through the
//! crate's `From<argmin::core::Error>` conversion.
//!
//! [`OptError`]: crate::optimization::errors::OptError
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    minimizer::{
        traits::LbfgsOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Weights,
        },
    },
};

/// L-BFGS with Hager–Zhang line search.
///
/// Memory is `opts.lbfgs_mem` or [`DEFAULT_LBFGS_MEM`].
///
/// # Errors
/// Tolerances rejected by argmin.
pub fn build_optimizer_hager_zhang(opts: &LbfgsOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsHagerZhang::new(HagerZhangLS::new(), mem), opts)
}

/// L-BFGS with More–Thuente line search.
///
/// # Errors
/// Tolerances rejected by argmin.
pub fn build_optimizer_more_thuente(opts: &LbfgsOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsMoreThuente::new(MoreThuenteLS::new(), mem), opts)
}

/// Apply `tol_grad` / `tol_cost` when present; `None` keeps argmin's
/// defaults. Generic over the line search so both builders share it.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Weights, Grad, Cost>, opts: &LbfgsOptions,
) -> OptResult<LBFGS<L, Weights, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}
