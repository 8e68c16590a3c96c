//! Integration tests for L0 feature selection and L1 sparsity.
//!
//! Purpose
//! -------
//! - Check that greedy forward selection recovers the informative columns
//!   of a planted logistic model and that the penalty controls the size of
//!   the selected set.
//!
//! Coverage
//! --------
//! - `classifiers::logistic::LogisticRegressionL0` over
//!   `optimization::selection::greedy`.
//! - `classifiers::logistic::LogisticRegressionL1` on the same data.
//!
//! Exclusions
//! ----------
//! - Tie-breaking and option validation; see the unit tests in
//!   `optimization::selection::greedy`.
use linreg_optim::{
    DesignData, LogisticRegressionL0, LogisticRegressionL1, Verbosity,
    optimization::selection::GreedyOptions,
};
use ndarray::{Array1, Array2};
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, StandardNormal};
use std::collections::BTreeSet;

const N: usize = 300;
const D: usize = 10;

/// Purpose
/// -------
/// Planted sparse model: column 0 is a bias, columns 1..10 are standard
/// normal, and `y = sign(2·x₃ − 2·x₇ + ε)` with `ε ~ N(0, 1)`.
fn planted() -> DesignData {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut x = Array2::<f64>::ones((N, D));
    for i in 0..N {
        for j in 1..D {
            x[[i, j]] = StandardNormal.sample(&mut rng);
        }
    }
    let y = Array1::from_shape_fn(N, |i| {
        let eps: f64 = StandardNormal.sample(&mut rng);
        if 2.0 * x[[i, 3]] - 2.0 * x[[i, 7]] + eps >= 0.0 { 1.0 } else { -1.0 }
    });
    DesignData::new(x, y).unwrap()
}

fn informative() -> BTreeSet<usize> {
    BTreeSet::from([0, 3, 7])
}

fn select(data: &DesignData, lambda: f64) -> BTreeSet<usize> {
    LogisticRegressionL0::new(lambda, 400, Verbosity::Silent)
        .unwrap()
        .fit(data)
        .unwrap()
        .selected()
        .clone()
}

#[test]
// Purpose
// -------
// A moderate penalty keeps exactly the planted support.
//
// Given
// -----
// - The planted data and λ₀ = 10, well above the loss decrease a noise
//   column can buy and well below that of the informative ones.
//
// Expect
// ------
// - Selected set {0, 3, 7}; refit weights on 3 and 7 have opposite signs
//   and every other weight is exactly zero.
fn moderate_penalty_recovers_planted_support() {
    let _ = env_logger::builder().is_test(true).try_init();
    let data = planted();
    let options = GreedyOptions::new(10.0, 400).unwrap().with_verbosity(Verbosity::Summary);
    let fitted = LogisticRegressionL0::with_options(options).fit(&data).unwrap();

    assert_eq!(fitted.selected(), &informative());
    assert_eq!(fitted.model.support(), vec![0, 3, 7]);
    let w = fitted.model.weights();
    assert!(w[3] > 0.0 && w[7] < 0.0);
    for j in (0..D).filter(|j| !informative().contains(j)) {
        assert_eq!(w[j], 0.0);
    }
    assert_eq!(fitted.selection.selection_order[0], 0);
    assert!(fitted.selection.min_score.is_finite());
}

#[test]
fn huge_penalty_keeps_a_subset_of_the_support() {
    let data = planted();
    let selected = select(&data, 1e4);
    assert!(selected.is_subset(&informative()));
    assert!(selected.contains(&0));
}

#[test]
// Purpose
// -------
// Without a penalty any strict loss decrease is adopted, so the planted
// columns are always among the selected ones.
//
// Given
// -----
// - The planted data and λ₀ = 0.
//
// Expect
// ------
// - A superset of {0, 3, 7} with at most D features.
fn zero_penalty_selects_a_superset() {
    let data = planted();
    let selected = select(&data, 0.0);
    assert!(selected.is_superset(&informative()));
    assert!(selected.len() <= D);
}

#[test]
// Purpose
// -------
// The L1 path is sparse on the same data: a strong penalty zeroes most noise
// columns while keeping the two informative slopes.
//
// Given
// -----
// - The planted data, λ = 20, 400 evaluations.
//
// Expect
// ------
// - w₃ > 0, w₇ < 0 and at least half of the noise columns exactly zero.
fn l1_penalty_zeroes_noise_columns() {
    let data = planted();
    let model = LogisticRegressionL1::new(20.0, 400, Verbosity::Silent).unwrap().fit(&data).unwrap();
    let w = model.weights();
    assert!(w[3] > 0.0 && w[7] < 0.0);
    let support = model.support();
    let zeros = (1..D).filter(|j| !informative().contains(j) && !support.contains(j)).count();
    assert!(zeros >= 4, "only {zeros} noise weights are zero: {w}");
}
