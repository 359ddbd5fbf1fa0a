//! Result type shared by the three curve measures.

use std::cmp::Ordering;
use std::fmt;

/// A non-negative dissimilarity between two curves, in the units of the
/// point metric.
///
/// What the value means depends on the measure that produced it:
///
/// | Measure | Value |
/// |---|---|
/// | Fréchet | largest point distance along the best monotone coupling |
/// | Hausdorff | largest distance from any point to the nearest point of the other curve |
/// | DTW | sum of point distances along the cheapest warping path |
///
/// Fréchet and Hausdorff are bottleneck values and satisfy the triangle
/// inequality whenever the point metric does. A DTW value grows with curve
/// length and is not a metric, so compare DTW values only between curves of
/// similar length.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dissimilarity(f64);

impl Dissimilarity {
    /// Zero dissimilarity.
    pub const ZERO: Self = Self(0.0);

    /// Infinite dissimilarity. Returned by [`Dtw::distance_with_cutoff`] once
    /// the cutoff is exceeded, and by any measure whose point distances exceed
    /// the `f64` range.
    ///
    /// [`Dtw::distance_with_cutoff`]: crate::Dtw::distance_with_cutoff
    pub const INFINITY: Self = Self(f64::INFINITY);

    pub(crate) fn new(value: f64) -> Self {
        Self(value)
    }

    /// Return the raw value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Return false for an abandoned or overflowed result.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Total ordering comparison using [`f64::total_cmp`].
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<Dissimilarity> for f64 {
    fn from(d: Dissimilarity) -> Self {
        d.0
    }
}

impl fmt::Display for Dissimilarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}
