//! Curve types with validation guarantees.

use std::ops::Index;
use std::slice::ChunksExact;

use crate::error::MeasureError;
use crate::point::Coordinates;

/// Owned, validated curve: an ordered sequence of points sharing one
/// dimensionality.
///
/// Guaranteed non-empty, at least one coordinate per point, all coordinates
/// finite. Points are stored flat in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    coords: Vec<f64>,
    dims: usize,
}

impl Curve {
    /// Create a curve from one coordinate vector per point.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MeasureError::EmptyCurve`] | `points` is empty |
    /// | [`MeasureError::ZeroDimension`] | the first point has no coordinates |
    /// | [`MeasureError::DimensionMismatch`] | a point's length differs from the first point's |
    /// | [`MeasureError::NonFiniteCoordinate`] | any coordinate is NaN or infinite |
    pub fn new(points: Vec<Vec<f64>>) -> Result<Self, MeasureError> {
        Self::from_points(&points)
    }

    /// Adapt any sequence of point-like values into a curve.
    ///
    /// Coordinates are copied; the caller's points are left untouched.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Curve::new`].
    pub fn from_points<P: Coordinates>(points: &[P]) -> Result<Self, MeasureError> {
        let first = points.first().ok_or(MeasureError::EmptyCurve)?;
        let dims = first.dims();
        if dims == 0 {
            return Err(MeasureError::ZeroDimension);
        }
        let mut coords = Vec::with_capacity(points.len() * dims);
        for point in points {
            let c = point.coordinates();
            if c.len() != dims {
                return Err(MeasureError::DimensionMismatch {
                    expected: dims,
                    found: c.len(),
                });
            }
            coords.extend_from_slice(c);
        }
        Self::from_flat(coords, dims)
    }

    /// Create a curve from row-major flat coordinates.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MeasureError::EmptyCurve`] | `coords` is empty |
    /// | [`MeasureError::ZeroDimension`] | `dims` is zero |
    /// | [`MeasureError::DimensionMismatch`] | `coords.len()` is not a multiple of `dims` |
    /// | [`MeasureError::NonFiniteCoordinate`] | any coordinate is NaN or infinite |
    pub fn from_flat(coords: Vec<f64>, dims: usize) -> Result<Self, MeasureError> {
        validate(&coords, dims)?;
        Ok(Self { coords, dims })
    }

    /// Borrow this curve as a zero-copy view.
    #[must_use]
    pub fn as_view(&self) -> CurveView<'_> {
        CurveView::new_unchecked(&self.coords, self.dims)
    }

    /// Return the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len() / self.dims
    }

    /// Return true if the curve has no points.
    ///
    /// Always `false` for a constructed [`Curve`]. Provided to satisfy the
    /// `len_without_is_empty` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Return the dimensionality of every point.
    #[must_use]
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Return the coordinates of point `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[must_use]
    pub fn point(&self, i: usize) -> &[f64] {
        self.as_view().point(i)
    }

    /// Iterate over the points in order.
    pub fn points(&self) -> ChunksExact<'_, f64> {
        self.coords.chunks_exact(self.dims)
    }

    /// Consume and return the flat coordinates and the dimensionality.
    #[must_use]
    pub fn into_flat(self) -> (Vec<f64>, usize) {
        (self.coords, self.dims)
    }
}

impl TryFrom<Vec<Vec<f64>>> for Curve {
    type Error = MeasureError;

    fn try_from(points: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

/// Borrowed, validated view of a curve. Zero-copy reference.
#[derive(Debug, Clone, Copy)]
pub struct CurveView<'a> {
    coords: &'a [f64],
    dims: usize,
}

impl<'a> CurveView<'a> {
    /// Create a view over row-major flat coordinates, validating them.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Curve::from_flat`].
    pub fn new(coords: &'a [f64], dims: usize) -> Result<Self, MeasureError> {
        validate(coords, dims)?;
        Ok(Self { coords, dims })
    }

    /// Create a view without validation. For internal use where data is already validated.
    pub(crate) fn new_unchecked(coords: &'a [f64], dims: usize) -> Self {
        Self { coords, dims }
    }

    /// Return the flat row-major coordinates.
    #[must_use]
    pub fn as_flat(&self) -> &'a [f64] {
        self.coords
    }

    /// Return the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len() / self.dims
    }

    /// Return true if the view has no points. Always `false` for a validated view.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Return the dimensionality of every point.
    #[must_use]
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Return the coordinates of point `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[must_use]
    pub fn point(&self, i: usize) -> &'a [f64] {
        &self.coords[i * self.dims..(i + 1) * self.dims]
    }

    /// Iterate over the points in order.
    pub fn points(&self) -> ChunksExact<'a, f64> {
        self.coords.chunks_exact(self.dims)
    }
}

impl Index<usize> for CurveView<'_> {
    type Output = [f64];

    fn index(&self, index: usize) -> &Self::Output {
        self.point(index)
    }
}

fn validate(coords: &[f64], dims: usize) -> Result<(), MeasureError> {
    if coords.is_empty() {
        return Err(MeasureError::EmptyCurve);
    }
    if dims == 0 {
        return Err(MeasureError::ZeroDimension);
    }
    let partial = coords.len() % dims;
    if partial != 0 {
        return Err(MeasureError::DimensionMismatch {
            expected: dims,
            found: partial,
        });
    }
    if let Some(index) = coords.iter().position(|c| !c.is_finite()) {
        return Err(MeasureError::NonFiniteCoordinate {
            point: index / dims,
            axis: index % dims,
        });
    }
    Ok(())
}
