//! Lower-triangular matrix of pairwise curve dissimilarities.

use std::ops::Index;

use rayon::prelude::*;
use tracing::instrument;

use crate::curve::Curve;
use crate::distance::Dissimilarity;
use crate::error::MeasureError;
use crate::measure::CurveMeasure;

/// Symmetric dissimilarity matrix stored as a lower-triangular flat vector.
///
/// For `n` curves, stores `n*(n-1)/2` values. Access is symmetric:
/// `get(i, j) == get(j, i)`. Diagonal is always zero.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<Dissimilarity>,
}

impl DistanceMatrix {
    /// `data[row*(row-1)/2 + col]` holds the pair `row > col`.
    pub(crate) fn from_raw(n: usize, data: Vec<Dissimilarity>) -> Self {
        debug_assert_eq!(data.len(), n * n.saturating_sub(1) / 2);
        Self { n, data }
    }

    /// Compute the measure for every unique pair of curves in parallel.
    ///
    /// All supported measures are symmetric, so only `i > j` is evaluated.
    ///
    /// # Errors
    ///
    /// Returns the first [`MeasureError`] reported by any pair.
    #[instrument(skip(measure, curves), fields(n = curves.len()))]
    pub fn pairwise<M>(measure: &M, curves: &[Curve]) -> Result<Self, MeasureError>
    where
        M: CurveMeasure + Sync,
    {
        let n = curves.len();
        let pairs: Vec<(usize, usize)> = (1..n).flat_map(|i| (0..i).map(move |j| (i, j))).collect();

        let data = pairs
            .into_par_iter()
            .map(|(i, j)| measure.distance(curves[i].as_view(), curves[j].as_view()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_raw(n, data))
    }

    /// Return the number of curves in the matrix.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Return true if the matrix covers no curves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Return the dissimilarity between curve `i` and curve `j`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n` or `j >= n`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Dissimilarity {
        assert!(i < self.n, "row index {i} out of bounds for matrix of size {}", self.n);
        assert!(j < self.n, "column index {j} out of bounds for matrix of size {}", self.n);
        if i == j {
            return Dissimilarity::ZERO;
        }
        self.data[offset(i, j)]
    }

    /// Iterate over all unique pairs `(i, j, value)` with `i > j`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Dissimilarity)> + '_ {
        (1..self.n).flat_map(move |i| (0..i).map(move |j| (i, j, self.data[offset(i, j)])))
    }

    /// Return the dissimilarities from curve `i` to every curve, itself included.
    #[must_use]
    pub fn row(&self, i: usize) -> Vec<Dissimilarity> {
        (0..self.n).map(|j| self.get(i, j)).collect()
    }

    /// Return the rows as plain nested vectors.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.n)
            .map(|i| self.row(i).into_iter().map(Dissimilarity::value).collect())
            .collect()
    }
}

fn offset(i: usize, j: usize) -> usize {
    let (row, col) = if i > j { (i, j) } else { (j, i) };
    row * (row - 1) / 2 + col
}

impl Index<(usize, usize)> for DistanceMatrix {
    type Output = Dissimilarity;

    /// Off-diagonal access only; the diagonal is not stored, use [`DistanceMatrix::get`].
    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        assert!(i != j, "cannot index diagonal, use get() instead");
        &self.data[offset(i, j)]
    }
}
