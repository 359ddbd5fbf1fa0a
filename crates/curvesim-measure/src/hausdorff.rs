//! Hausdorff distance between the point sets of two curves.
//!
//! Point order is ignored. The exact symmetric distance is computed with the
//! early-break algorithm of Aziz & Hanbury (2015): the inner scan for a point
//! stops as soon as it finds a neighbour closer than the running maximum
//! `cmax`, since that point can no longer raise the result. One `cmax`
//! accumulator is threaded through the A-to-B pass and then the B-to-A pass,
//! so the second pass starts from the first pass's bound.

use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;
use tracing::instrument;

use crate::curve::CurveView;
use crate::distance::Dissimilarity;
use crate::error::MeasureError;
use crate::metric::Metric;

/// Immutable Hausdorff configuration. Thread-safe and copyable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hausdorff {
    metric: Metric,
}

impl Hausdorff {
    /// Create a Hausdorff calculator using `metric` between points.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MeasureError::InvalidExponent`] | `metric` is Minkowski with an invalid `p` |
    pub fn new(metric: Metric) -> Result<Self, MeasureError> {
        metric.validate()?;
        Ok(Self { metric })
    }

    /// Return the point metric.
    #[must_use]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Compute the symmetric Hausdorff distance with early breaking.
    ///
    /// Worst case O(m * p); typically much less on real curves. Equal to
    /// [`distance_naive`][Self::distance_naive] for every input.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MeasureError::DimensionMismatch`] | curves differ in dimensionality, or haversine on non-2-D points |
    /// | [`MeasureError::DegenerateVector`] | cosine metric and a zero vector in either curve |
    #[instrument(skip(a, b), fields(m = a.len(), p = b.len()))]
    pub fn distance(
        &self,
        a: CurveView<'_>,
        b: CurveView<'_>,
    ) -> Result<Dissimilarity, MeasureError> {
        self.metric.check_operands(a, b)?;
        let cmax = self.early_break_pass(a, b, 0.0);
        let cmax = self.early_break_pass(b, a, cmax);
        Ok(Dissimilarity::new(cmax))
    }

    /// Compute the directed Hausdorff distance `max_{x in a} min_{y in b} d(x, y)`.
    ///
    /// Plain double loop, no early breaking.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Hausdorff::distance`].
    pub fn directed(
        &self,
        a: CurveView<'_>,
        b: CurveView<'_>,
    ) -> Result<Dissimilarity, MeasureError> {
        self.metric.check_operands(a, b)?;
        Ok(Dissimilarity::new(self.directed_unchecked(a, b)))
    }

    /// Compute `max(directed(a, b), directed(b, a))` without early breaking.
    ///
    /// Reference formulation; prefer [`distance`][Self::distance].
    ///
    /// # Errors
    ///
    /// Same conditions as [`Hausdorff::distance`].
    pub fn distance_naive(
        &self,
        a: CurveView<'_>,
        b: CurveView<'_>,
    ) -> Result<Dissimilarity, MeasureError> {
        self.metric.check_operands(a, b)?;
        let forward = self.directed_unchecked(a, b);
        let backward = self.directed_unchecked(b, a);
        Ok(Dissimilarity::new(forward.max(backward)))
    }

    /// Compute the symmetric Hausdorff distance with the outer loop spread
    /// across the rayon pool.
    ///
    /// The shared `cmax` lives in an atomic holding the bit pattern of a
    /// non-negative `f64`; for such values integer order matches float order,
    /// so `fetch_max` keeps it monotonically non-decreasing. Workers may read a
    /// stale (smaller) bound, which only weakens their early break.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Hausdorff::distance`].
    #[instrument(skip(a, b), fields(m = a.len(), p = b.len()))]
    pub fn distance_par(
        &self,
        a: CurveView<'_>,
        b: CurveView<'_>,
    ) -> Result<Dissimilarity, MeasureError> {
        self.metric.check_operands(a, b)?;
        let cmax = AtomicU64::new(0.0_f64.to_bits());
        self.par_early_break_pass(a, b, &cmax);
        self.par_early_break_pass(b, a, &cmax);
        Ok(Dissimilarity::new(f64::from_bits(cmax.into_inner())))
    }

    fn early_break_pass(&self, from: CurveView<'_>, to: CurveView<'_>, mut cmax: f64) -> f64 {
        for x in from.points() {
            let cmin = self.nearest_or_break(x, to, cmax);
            if cmin > cmax {
                cmax = cmin;
            }
        }
        cmax
    }

    fn par_early_break_pass(&self, from: CurveView<'_>, to: CurveView<'_>, cmax: &AtomicU64) {
        from.as_flat()
            .par_chunks_exact(from.dims())
            .for_each(|x| {
                let bound = f64::from_bits(cmax.load(Ordering::Relaxed));
                let cmin = self.nearest_or_break(x, to, bound);
                if cmin > bound {
                    cmax.fetch_max(cmin.to_bits(), Ordering::Relaxed);
                }
            });
    }

    /// Nearest-neighbour distance from `x` into `to`, abandoned as soon as a
    /// neighbour closer than `cmax` turns up. `to` is never empty, so an
    /// infinite result means every neighbour is infinitely far and must raise `cmax`.
    #[inline]
    fn nearest_or_break(&self, x: &[f64], to: CurveView<'_>, cmax: f64) -> f64 {
        let mut cmin = f64::INFINITY;
        for y in to.points() {
            let d = self.metric.eval(x, y);
            if d < cmin {
                cmin = d;
            }
            if cmin < cmax {
                break;
            }
        }
        cmin
    }

    fn directed_unchecked(&self, a: CurveView<'_>, b: CurveView<'_>) -> f64 {
        a.points()
            .map(|x| {
                b.points()
                    .map(|y| self.metric.eval(x, y))
                    .fold(f64::INFINITY, f64::min)
            })
            .fold(0.0, f64::max)
    }
}
