//! Dynamic Time Warping distance.
//!
//! Cumulative-cost recurrence over the local cost `c[i][j] = d(A[i], B[j])`:
//!
//! ```text
//! D[0][0] = c[0][0]
//! D[i][0] = D[i-1][0] + c[i][0]
//! D[0][j] = D[0][j-1] + c[0][j]
//! D[i][j] = c[i][j] + min(D[i-1][j], D[i][j-1], D[i-1][j-1])
//! ```
//!
//! DTW is not a metric: it does not satisfy the triangle inequality, and
//! `DTW(A, B) == 0` does not imply `A == B` (repeated points warp for free).

use tracing::instrument;

use crate::curve::CurveView;
use crate::distance::Dissimilarity;
use crate::error::MeasureError;
use crate::metric::Metric;
use crate::path::Alignment;

/// Immutable DTW configuration. Thread-safe and copyable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dtw {
    metric: Metric,
}

impl Dtw {
    /// Create a DTW calculator using `metric` as the local cost.
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

    /// Compute the DTW distance between two curves.
    ///
    /// Uses a rolling two-row buffer rather than the full cumulative matrix.
    /// O(m * p) time, O(p) space.
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
        Ok(Dissimilarity::new(self.rolling_cutoff(a, b, None)))
    }

    /// Compute DTW distance with early abandoning.
    ///
    /// Returns [`Dissimilarity::INFINITY`] as soon as the distance is known to
    /// exceed `cutoff`. Exact otherwise: a finite result equals
    /// [`Dtw::distance`].
    ///
    /// # Errors
    ///
    /// Same conditions as [`Dtw::distance`].
    #[instrument(skip(a, b), fields(m = a.len(), p = b.len()))]
    pub fn distance_with_cutoff(
        &self,
        a: CurveView<'_>,
        b: CurveView<'_>,
        cutoff: f64,
    ) -> Result<Dissimilarity, MeasureError> {
        self.metric.check_operands(a, b)?;
        Ok(Dissimilarity::new(self.rolling_cutoff(a, b, Some(cutoff))))
    }

    /// Compute the DTW distance and the optimal warping path.
    ///
    /// Allocates the full cumulative matrix for traceback. Use
    /// [`distance`][Dtw::distance] when only the scalar is needed.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Dtw::distance`].
    #[instrument(skip(a, b), fields(m = a.len(), p = b.len()))]
    pub fn distance_and_path(
        &self,
        a: CurveView<'_>,
        b: CurveView<'_>,
    ) -> Result<(Dissimilarity, Alignment), MeasureError> {
        self.metric.check_operands(a, b)?;
        let (n, m) = (a.len(), b.len());
        let table = self.cumulative_table(a, b);
        let dist = table[n * m - 1];
        Ok((Dissimilarity::new(dist), Alignment::traceback(&table, n, m)))
    }

    /// Rolling DTW with optional early abandoning.
    ///
    /// Every warping path visits at least one cell per row and costs are
    /// non-negative, so a row minimum above `cutoff` bounds the result from below.
    fn rolling_cutoff(&self, a: CurveView<'_>, b: CurveView<'_>, cutoff: Option<f64>) -> f64 {
        let n = a.len();
        let m = b.len();
        let mut prev = vec![0.0; m];
        let mut curr = vec![0.0; m];

        for (i, pa) in a.points().enumerate() {
            let mut row_min = f64::INFINITY;
            for (j, pb) in b.points().enumerate() {
                let cost = self.metric.eval(pa, pb);
                let val = match (i, j) {
                    (0, 0) => cost,
                    (0, _) => curr[j - 1] + cost,
                    (_, 0) => prev[0] + cost,
                    _ => cost + prev[j].min(curr[j - 1]).min(prev[j - 1]),
                };
                curr[j] = val;
                row_min = row_min.min(val);
            }

            if let Some(c) = cutoff
                && i < n - 1
                && row_min > c
            {
                return f64::INFINITY;
            }

            std::mem::swap(&mut prev, &mut curr);
        }

        // After the final swap, `prev` holds the last completed row.
        let total = prev[m - 1];
        match cutoff {
            Some(c) if total > c => f64::INFINITY,
            _ => total,
        }
    }

    /// Full row-major `n x m` cumulative cost matrix.
    fn cumulative_table(&self, a: CurveView<'_>, b: CurveView<'_>) -> Vec<f64> {
        let (n, m) = (a.len(), b.len());
        let mut d = vec![0.0; n * m];

        for (i, pa) in a.points().enumerate() {
            for (j, pb) in b.points().enumerate() {
                let cost = self.metric.eval(pa, pb);
                d[i * m + j] = match (i, j) {
                    (0, 0) => cost,
                    (_, 0) => d[(i - 1) * m] + cost,
                    (0, _) => d[j - 1] + cost,
                    _ => {
                        cost + d[(i - 1) * m + j]
                            .min(d[i * m + j - 1])
                            .min(d[(i - 1) * m + j - 1])
                    }
                };
            }
        }

        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;
    use crate::path::AlignmentStep;

    fn curve(points: &[[f64; 2]]) -> Curve {
        Curve::from_points(points).unwrap()
    }

    fn line(values: &[f64]) -> Curve {
        Curve::from_flat(values.to_vec(), 1).unwrap()
    }

    fn dtw() -> Dtw {
        Dtw::new(Metric::Euclidean).unwrap()
    }

    #[test]
    fn identical_curves_distance_zero() {
        let a = curve(&[[1.0, 2.0], [3.0, 4.0], [5.0, 0.0]]);
        let d = dtw().distance(a.as_view(), a.as_view()).unwrap();
        assert_eq!(d.value(), 0.0);
    }

    #[test]
    fn hand_computed_2x2() {
        // a=[0,1], b=[1,0] with |x - y| cost
        // D[0][0] = 1, D[0][1] = 1 + 0 = 1, D[1][0] = 1 + 0 = 1
        // D[1][1] = 1 + min(1, 1, 1) = 2
        let d = dtw()
            .distance(line(&[0.0, 1.0]).as_view(), line(&[1.0, 0.0]).as_view())
            .unwrap();
        assert!((d.value() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn single_point_is_local_cost() {
        let d = dtw()
            .distance(line(&[5.0]).as_view(), line(&[3.0]).as_view())
            .unwrap();
        assert!((d.value() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn repeated_points_warp_for_free() {
        let a = line(&[0.0, 1.0, 2.0]);
        let b = line(&[0.0, 0.0, 1.0, 1.0, 2.0]);
        let d = dtw().distance(a.as_view(), b.as_view()).unwrap();
        assert_eq!(d.value(), 0.0);
    }

    #[test]
    fn violates_triangle_inequality() {
        // DTW(a, c) = 3 > DTW(a, b) + DTW(b, c) = 1 + 0
        let a = line(&[0.0]);
        let b = line(&[1.0]);
        let c = line(&[1.0, 1.0, 1.0]);
        let dtw = dtw();
        let ab = dtw.distance(a.as_view(), b.as_view()).unwrap().value();
        let bc = dtw.distance(b.as_view(), c.as_view()).unwrap().value();
        let ac = dtw.distance(a.as_view(), c.as_view()).unwrap().value();
        assert!(ac > ab + bc, "expected {ac} > {ab} + {bc}");
    }

    #[test]
    fn rolling_matches_full_matrix() {
        let a = curve(&[[0.0, 0.0], [1.0, 2.0], [3.0, 1.0], [4.0, 4.0]]);
        let b = curve(&[[0.5, 0.0], [2.0, 2.0], [4.0, 3.0]]);
        let dtw = Dtw::new(Metric::Chebyshev).unwrap();
        let rolling = dtw.distance(a.as_view(), b.as_view()).unwrap();
        let (full, _) = dtw.distance_and_path(a.as_view(), b.as_view()).unwrap();
        assert!((rolling.value() - full.value()).abs() < 1e-12);
    }

    #[test]
    fn warping_path_endpoints_and_continuity() {
        let a = line(&[1.0, 5.0, 2.0, 8.0, 3.0]);
        let b = line(&[2.0, 4.0, 7.0]);
        let (_, path) = dtw().distance_and_path(a.as_view(), b.as_view()).unwrap();
        let steps = path.steps();
        assert_eq!(steps.first(), Some(&AlignmentStep { a: 0, b: 0 }));
        assert_eq!(steps.last(), Some(&AlignmentStep { a: 4, b: 2 }));
        for pair in steps.windows(2) {
            let da = pair[1].a - pair[0].a;
            let db = pair[1].b - pair[0].b;
            assert!(da <= 1 && db <= 1 && da + db >= 1, "bad step {pair:?}");
        }
    }

    #[test]
    fn warping_path_cost_equals_distance() {
        let a = line(&[0.0, 2.0, 1.0, 3.0]);
        let b = line(&[1.0, 1.0, 3.0]);
        let (dist, path) = dtw().distance_and_path(a.as_view(), b.as_view()).unwrap();
        let cost: f64 = path
            .into_iter()
            .map(|s| Metric::Euclidean.eval(a.point(s.a), b.point(s.b)))
            .sum();
        assert!((cost - dist.value()).abs() < 1e-12);
    }

    #[test]
    fn early_abandon_returns_infinity() {
        let a = line(&[0.0, 0.0, 0.0, 0.0, 0.0]);
        let b = line(&[10.0, 10.0, 10.0, 10.0, 10.0]);
        let d = dtw().distance_with_cutoff(a.as_view(), b.as_view(), 1.0).unwrap();
        assert_eq!(d, Dissimilarity::INFINITY);
    }

    #[test]
    fn cutoff_around_exact_distance() {
        let a = line(&[0.0, 1.0, 3.0]);
        let b = line(&[1.0, 0.0, 2.0]);
        let dtw = dtw();
        let exact = dtw.distance(a.as_view(), b.as_view()).unwrap().value();

        let above = dtw
            .distance_with_cutoff(a.as_view(), b.as_view(), exact + 1e-3)
            .unwrap();
        assert!((above.value() - exact).abs() < 1e-12);

        let below = dtw
            .distance_with_cutoff(a.as_view(), b.as_view(), exact - 1e-3)
            .unwrap();
        assert!(!below.is_finite());
    }
}
