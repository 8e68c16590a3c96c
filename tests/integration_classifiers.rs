//! Integration tests for the classifiers.
//!
//! Purpose
//! -------
//! - Fit each classifier end to end on seeded synthetic data and check the
//!   model against properties that hold independently of the minimizer's
//!   exact path.
//!
//! Coverage
//! --------
//! - `classifiers::logistic`: two Gaussian clusters with a bias column,
//!   both backends, logging enabled.
//! - `classifiers::least_squares`: weights against an independent
//!   `nalgebra` LU solve of the ridge normal equations.
//! - `classifiers::multiclass`: one-vs-all and softmax on three clusters.
//!
//! Exclusions
//! ----------
//! - Minimizer internals and objective gradients; these are covered by unit
//!   tests.
//! - L0 selection; see `integration_selection.rs`.
use approx::assert_relative_eq;
use linreg_optim::{
    Backend, DesignData, FindMinOptions, LbfgsOptions, LeastSquaresClassifier,
    LogLinearClassifier, LogisticRegression, MulticlassData, SoftmaxClassifier, Verbosity,
    classifiers::{DEFAULT_RIDGE, LogisticLoss},
    optimization::minimizer::{LineSearcher, Objective},
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

/// Purpose
/// -------
/// Draw `n` points split evenly between clusters centred at `centres`,
/// each coordinate perturbed by `N(0, std²)`, with a leading bias column.
///
/// Returns
/// -------
/// The `n × (1 + dim)` design matrix and the cluster index of each row.
fn clusters(seed: u64, n: usize, centres: &[[f64; 2]], std: f64) -> (Array2<f64>, Array1<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, std).unwrap();
    let k = centres.len();
    let labels = Array1::from_shape_fn(n, |i| i % k);
    let mut x = Array2::<f64>::ones((n, 3));
    for i in 0..n {
        let centre = centres[labels[i]];
        x[[i, 1]] = centre[0] + noise.sample(&mut rng);
        x[[i, 2]] = centre[1] + noise.sample(&mut rng);
    }
    (x, labels)
}

fn binary_clusters(seed: u64, n: usize, std: f64) -> DesignData {
    let (x, labels) = clusters(seed, n, &[[2.0, 2.0], [-2.0, -2.0]], std);
    let y = labels.mapv(|c| if c == 0 { 1.0 } else { -1.0 });
    DesignData::new(x, y).unwrap()
}

fn three_clusters(seed: u64, n: usize) -> MulticlassData {
    let (x, y) = clusters(seed, n, &[[3.0, 0.0], [-1.5, 2.6], [-1.5, -2.6]], 0.5);
    MulticlassData::new(x, y).unwrap()
}

#[test]
// Purpose
// -------
// Unregularized logistic regression separates two well-separated Gaussian
// clusters within the default budget, with progress logged.
//
// Given
// -----
// - 100 points around ±(2, 2) with σ = 0.5 and a bias column.
// - Find-min backend, 100 evaluations, summary verbosity.
//
// Expect
// ------
// - 100% training accuracy.
// - Final loss well below the loss at w = 0 (100·ln 2).
fn logistic_regression_separates_gaussian_clusters() {
    let _ = env_logger::builder().is_test(true).try_init();
    let data = binary_clusters(42, 100, 0.5);
    let model = LogisticRegression::new(100, Verbosity::Summary).unwrap().fit(&data).unwrap();

    assert_eq!(model.error_rate(&data).unwrap(), 0.0);
    let (loss, _) = LogisticLoss.evaluate(model.weights(), &data).unwrap();
    assert!(loss < 5.0, "loss {loss} should be far below 100 ln 2");
}

#[test]
// Purpose
// -------
// The L-BFGS backend and the find-min loop reach comparable models on
// overlapping clusters, where the optimum is finite.
//
// Given
// -----
// - 200 points around ±(2, 2) with σ = 2.
// - Find-min, and L-BFGS with each line search.
//
// Expect
// ------
// - Every training error rate below 15%.
// - Both slopes positive for every backend, so L-BFGS left w = 0.
fn both_backends_classify_overlapping_clusters() {
    let data = binary_clusters(7, 200, 2.0);
    let find_min = LogisticRegression::default().fit(&data).unwrap();
    assert!(find_min.error_rate(&data).unwrap() < 0.15);
    assert!(find_min.weights()[1] > 0.0 && find_min.weights()[2] > 0.0);

    for line_searcher in [LineSearcher::MoreThuente, LineSearcher::HagerZhang] {
        let options = LbfgsOptions { line_searcher, ..LbfgsOptions::default() };
        let lbfgs_backend = Backend::Lbfgs(options);
        let lbfgs = LogisticRegression::default().with_backend(lbfgs_backend).fit(&data).unwrap();
        assert!(lbfgs.error_rate(&data).unwrap() < 0.15, "{line_searcher:?}");
        for j in 1..3 {
            assert!(lbfgs.weights()[j] > 0.0, "{line_searcher:?}: {}", lbfgs.weights());
        }
    }
}

#[test]
// Purpose
// -------
// The least-squares classifier solves the ridge normal equations exactly.
//
// Given
// -----
// - 90 points in three clusters.
// - An independent per-class LU solve of `(XᵀX + 1e-4·I) w = Xᵀy_c`.
//
// Expect
// ------
// - Weights agree to 1e-6 and predictions coincide.
fn least_squares_matches_independent_solve() {
    let data = three_clusters(5, 90);
    let model = LeastSquaresClassifier::default().fit(&data).unwrap();

    let x = data.x();
    let (n, d) = x.dim();
    let xm = DMatrix::from_fn(n, d, |i, j| x[[i, j]]);
    let mut gram = xm.transpose() * &xm;
    for j in 0..d {
        gram[(j, j)] += DEFAULT_RIDGE;
    }
    let lu = gram.lu();
    let mut reference = Array2::<f64>::zeros((data.n_classes(), d));
    for c in 0..data.n_classes() {
        let yc = data.one_vs_all_labels(c);
        let rhs = xm.transpose() * DMatrix::from_fn(n, 1, |i, _| yc[i]);
        let wc = lu.solve(&rhs).unwrap();
        for j in 0..d {
            reference[[c, j]] = wc[(j, 0)];
            assert_relative_eq!(model.weights()[[c, j]], wc[(j, 0)], epsilon = 1e-6);
        }
    }

    let predicted = model.predict(x).unwrap();
    let reference_scores = x.dot(&reference.t());
    for (i, row) in reference_scores.rows().into_iter().enumerate() {
        let mut best = 0;
        for c in 1..row.len() {
            if row[c] > row[best] {
                best = c;
            }
        }
        assert_eq!(predicted[i], best);
    }
    assert_eq!(model.error_rate(&data).unwrap(), 0.0);
}

#[test]
// Purpose
// -------
// Both iterative multi-class classifiers fit three separated clusters and
// generalize to fresh draws from the same distribution.
//
// Given
// -----
// - 90 training and 90 test points, default options.
//
// Expect
// ------
// - Zero training error for one-vs-all and softmax.
// - Test error below 5% for both.
fn multiclass_classifiers_fit_three_clusters() {
    let train = three_clusters(11, 90);
    let test = three_clusters(12, 90);

    let ova = LogLinearClassifier::default().fit(&train).unwrap();
    let softmax = SoftmaxClassifier::default().fit(&train).unwrap();

    assert_eq!(ova.weights().dim(), (3, 3));
    assert_eq!(softmax.weights().dim(), (3, 3));
    assert_eq!(ova.error_rate(&train).unwrap(), 0.0);
    assert_eq!(softmax.error_rate(&train).unwrap(), 0.0);
    assert!(ova.error_rate(&test).unwrap() < 0.05);
    assert!(softmax.error_rate(&test).unwrap() < 0.05);
}

#[test]
fn detail_logging_does_not_change_the_fit() {
    let _ = env_logger::builder().is_test(true).try_init();
    let data = binary_clusters(3, 40, 0.5);
    let quiet = LogisticRegression::default().fit(&data).unwrap();
    let loud = LogisticRegression::default()
        .with_backend(Backend::FindMin(FindMinOptions::new(100, Verbosity::Detail).unwrap()))
        .fit(&data)
        .unwrap();
    assert_eq!(quiet.weights(), loud.weights());
}
