//! Validated design matrices and label vectors for the classifiers.
//!
//! Purpose
//! -------
//! Centralize the shape and value checks every classifier needs, so that
//! objectives can index freely once a container exists.
//!
//! Key behaviors
//! -------------
//! - [`DesignData`]: `n × d` design matrix with binary labels in `{-1, +1}`.
//! - [`MulticlassData`]: `n × d` design matrix with class ids `0..k`, where
//!   `k = max(y) + 1 ≥ 2`.
//! - [`ColumnSubsets`]: adapts any objective over [`DesignData`] to the
//!   greedy selector by restricting columns.
//!
//! Invariants & assumptions
//! ------------------------
//! - `n ≥ 1`, `d ≥ 1`, every design entry finite, `x.nrows() == y.len()`.
//! - Containers are immutable after construction; column selection and
//!   one-vs-all relabelling produce new values.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::traits::Objective,
    selection::SubsetProblem,
};
use ndarray::{Array1, Array2, Axis};

/// Binary classification data with ±1 labels.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignData {
    x: Array2<f64>,
    y: Array1<f64>,
}

impl DesignData {
    /// # Errors
    /// - [`OptError::EmptyDesign`] for zero rows or columns.
    /// - [`OptError::SampleCountMismatch`] when `x.nrows() != y.len()`.
    /// - [`OptError::NonFiniteData`] for NaN/∞ design entries.
    /// - [`OptError::InvalidBinaryLabel`] for labels other than ±1.
    pub fn new(x: Array2<f64>, y: Array1<f64>) -> OptResult<Self> {
        validate_design(&x, y.len())?;
        for (index, &value) in y.iter().enumerate() {
            if value != 1.0 && value != -1.0 {
                return Err(OptError::InvalidBinaryLabel { index, value });
            }
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Copy of the data keeping only `columns`, in the given order.
    ///
    /// # Errors
    /// [`OptError::InvalidFeatureIndex`] for an out-of-range column and
    /// [`OptError::EmptyDesign`] for an empty list.
    pub fn select_columns(&self, columns: &[usize]) -> OptResult<Self> {
        let n_features = self.n_features();
        if let Some(&index) = columns.iter().find(|&&c| c >= n_features) {
            return Err(OptError::InvalidFeatureIndex { index, n_features });
        }
        if columns.is_empty() {
            return Err(OptError::EmptyDesign { rows: self.n_samples(), cols: 0 });
        }
        Ok(Self { x: self.x.select(Axis(1), columns), y: self.y.clone() })
    }
}

/// Multi-class data with integer class ids.
#[derive(Debug, Clone, PartialEq)]
pub struct MulticlassData {
    x: Array2<f64>,
    y: Array1<usize>,
    n_classes: usize,
}

impl MulticlassData {
    /// The class count is `max(y) + 1`; classes that never occur still get a
    /// weight row.
    ///
    /// # Errors
    /// - Shape and finiteness errors as for [`DesignData::new`].
    /// - [`OptError::TooFewClasses`] when fewer than two classes result.
    pub fn new(x: Array2<f64>, y: Array1<usize>) -> OptResult<Self> {
        validate_design(&x, y.len())?;
        let n_classes = y.iter().copied().max().map_or(0, |m| m + 1);
        if n_classes < 2 {
            return Err(OptError::TooFewClasses { n_classes });
        }
        Ok(Self { x, y, n_classes })
    }

    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array1<usize> {
        &self.y
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// `+1` where `y == class`, `-1` elsewhere.
    pub fn one_vs_all_labels(&self, class: usize) -> Array1<f64> {
        self.y.mapv(|c| if c == class { 1.0 } else { -1.0 })
    }

    /// Binary problem "class vs. rest" sharing this design matrix.
    pub fn one_vs_all(&self, class: usize) -> DesignData {
        DesignData { x: self.x.clone(), y: self.one_vs_all_labels(class) }
    }
}

fn validate_design(x: &Array2<f64>, n_labels: usize) -> OptResult<()> {
    let (rows, cols) = x.dim();
    if rows == 0 || cols == 0 {
        return Err(OptError::EmptyDesign { rows, cols });
    }
    if rows != n_labels {
        return Err(OptError::SampleCountMismatch { rows, labels: n_labels });
    }
    if let Some(((row, col), &value)) = x.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::NonFiniteData { row, col, value });
    }
    Ok(())
}

/// An objective over [`DesignData`] viewed as a column-subset problem.
pub struct ColumnSubsets<'a, O: ?Sized> {
    objective: &'a O,
    data: &'a DesignData,
}

impl<'a, O: Objective<Data = DesignData> + ?Sized> ColumnSubsets<'a, O> {
    pub fn new(objective: &'a O, data: &'a DesignData) -> Self {
        Self { objective, data }
    }
}

impl<O: Objective<Data = DesignData> + ?Sized> SubsetProblem for ColumnSubsets<'_, O> {
    type Data = DesignData;
    type Objective = O;

    fn n_features(&self) -> usize {
        self.data.n_features()
    }

    fn objective(&self) -> &O {
        self.objective
    }

    fn restrict(&self, columns: &[usize]) -> OptResult<DesignData> {
        self.data.select_columns(columns)
    }
}
