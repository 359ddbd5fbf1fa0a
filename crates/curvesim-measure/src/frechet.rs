//! Discrete Fréchet distance.
//!
//! Coupling-measure recurrence (Eiter & Mannila, 1994):
//!
//! ```text
//! ca[0][0] = d(A[0], B[0])
//! ca[i][0] = max(ca[i-1][0], d(A[i], B[0]))
//! ca[0][j] = max(ca[0][j-1], d(A[0], B[j]))
//! ca[i][j] = max(min(ca[i-1][j], ca[i][j-1], ca[i-1][j-1]), d(A[i], B[j]))
//! ```

use tracing::instrument;

use crate::curve::CurveView;
use crate::distance::Dissimilarity;
use crate::error::MeasureError;
use crate::metric::Metric;
use crate::path::Alignment;

/// Immutable discrete Fréchet configuration. Thread-safe and copyable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frechet {
    metric: Metric,
}

impl Frechet {
    /// Create a Fréchet calculator using `metric` between points.
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

    /// Compute the discrete Fréchet distance between two curves.
    ///
    /// Keeps two rows of the coupling table. O(m * p) time, O(p) space.
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
        Ok(Dissimilarity::new(self.coupling_rolling(a, b)))
    }

    /// Compute the Fréchet distance and one optimal coupling.
    ///
    /// Allocates the full table for traceback. The largest point distance
    /// along the returned coupling equals the Fréchet distance.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Frechet::distance`].
    #[instrument(skip(a, b), fields(m = a.len(), p = b.len()))]
    pub fn distance_and_coupling(
        &self,
        a: CurveView<'_>,
        b: CurveView<'_>,
    ) -> Result<(Dissimilarity, Alignment), MeasureError> {
        self.metric.check_operands(a, b)?;
        let (n, m) = (a.len(), b.len());
        let table = self.coupling_table(a, b);
        let dist = table[n * m - 1];
        Ok((Dissimilarity::new(dist), Alignment::traceback(&table, n, m)))
    }

    fn coupling_rolling(&self, a: CurveView<'_>, b: CurveView<'_>) -> f64 {
        let m = b.len();
        let mut prev = vec![0.0; m];
        let mut curr = vec![0.0; m];

        let head = a.point(0);
        prev[0] = self.metric.eval(head, b.point(0));
        for j in 1..m {
            prev[j] = prev[j - 1].max(self.metric.eval(head, b.point(j)));
        }

        for pa in a.points().skip(1) {
            curr[0] = prev[0].max(self.metric.eval(pa, b.point(0)));
            for j in 1..m {
                let reach = prev[j].min(curr[j - 1]).min(prev[j - 1]);
                curr[j] = reach.max(self.metric.eval(pa, b.point(j)));
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        prev[m - 1]
    }

    /// Full row-major `n x m` coupling table.
    fn coupling_table(&self, a: CurveView<'_>, b: CurveView<'_>) -> Vec<f64> {
        let (n, m) = (a.len(), b.len());
        let mut ca = vec![0.0; n * m];

        for (i, pa) in a.points().enumerate() {
            for (j, pb) in b.points().enumerate() {
                let d = self.metric.eval(pa, pb);
                ca[i * m + j] = match (i, j) {
                    (0, 0) => d,
                    (_, 0) => ca[(i - 1) * m].max(d),
                    (0, _) => ca[j - 1].max(d),
                    _ => ca[(i - 1) * m + j]
                        .min(ca[i * m + j - 1])
                        .min(ca[(i - 1) * m + j - 1])
                        .max(d),
                };
            }
        }

        ca
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;

    fn curve(points: &[[f64; 2]]) -> Curve {
        Curve::from_points(points).unwrap()
    }

    #[test]
    fn identical_curves_distance_zero() {
        let a = curve(&[[0.0, 0.0], [1.0, 3.0], [4.0, 2.0]]);
        let d = Frechet::new(Metric::Euclidean)
            .unwrap()
            .distance(a.as_view(), a.as_view())
            .unwrap();
        assert_eq!(d.value(), 0.0);
    }

    #[test]
    fn parallel_lines_one_apart() {
        let a = curve(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);
        let b = curve(&[[0.0, 1.0], [1.0, 1.0], [2.0, 1.0]]);
        let d = Frechet::new(Metric::Euclidean)
            .unwrap()
            .distance(a.as_view(), b.as_view())
            .unwrap();
        assert!((d.value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn repeated_endpoint_does_not_change_distance() {
        let a = curve(&[[0.0, 0.0], [2.0, 1.0], [3.0, 5.0]]);
        let b = curve(&[[0.0, 0.0], [2.0, 1.0], [3.0, 5.0], [3.0, 5.0]]);
        let d = Frechet::new(Metric::Euclidean)
            .unwrap()
            .distance(a.as_view(), b.as_view())
            .unwrap();
        assert_eq!(d.value(), 0.0);
    }

    #[test]
    fn order_matters() {
        // Same point set, reversed order: Fréchet sees the reversal.
        let a = curve(&[[0.0, 0.0], [10.0, 0.0]]);
        let b = curve(&[[10.0, 0.0], [0.0, 0.0]]);
        let d = Frechet::new(Metric::Euclidean)
            .unwrap()
            .distance(a.as_view(), b.as_view())
            .unwrap();
        assert!((d.value() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn rolling_matches_full_table() {
        let a = curve(&[[0.0, 0.0], [1.0, 2.0], [3.0, 1.0], [4.0, 4.0]]);
        let b = curve(&[[0.5, 0.0], [2.0, 2.0], [4.0, 3.0]]);
        let frechet = Frechet::new(Metric::Manhattan).unwrap();
        let rolling = frechet.distance(a.as_view(), b.as_view()).unwrap();
        let (full, _) = frechet
            .distance_and_coupling(a.as_view(), b.as_view())
            .unwrap();
        assert!((rolling.value() - full.value()).abs() < 1e-12);
    }

    #[test]
    fn coupling_attains_distance() {
        let a = curve(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]);
        let b = curve(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);
        let frechet = Frechet::new(Metric::Euclidean).unwrap();
        let (dist, coupling) = frechet
            .distance_and_coupling(a.as_view(), b.as_view())
            .unwrap();

        let steps = coupling.steps();
        assert_eq!(steps.first(), Some(&crate::path::AlignmentStep { a: 0, b: 0 }));
        assert_eq!(steps.last(), Some(&crate::path::AlignmentStep { a: 2, b: 2 }));

        let leash = steps
            .iter()
            .map(|s| Metric::Euclidean.eval(a.point(s.a), b.point(s.b)))
            .fold(0.0, f64::max);
        assert!((leash - dist.value()).abs() < 1e-12);
    }

    #[test]
    fn rejects_dimension_mismatch() {
        let a = curve(&[[0.0, 0.0]]);
        let b = Curve::from_points(&[[0.0, 0.0, 0.0]]).unwrap();
        let result = Frechet::new(Metric::Euclidean)
            .unwrap()
            .distance(a.as_view(), b.as_view());
        assert_eq!(
            result,
            Err(MeasureError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn rejects_invalid_minkowski() {
        assert!(matches!(
            Frechet::new(Metric::Minkowski { p: 0.0 }),
            Err(MeasureError::InvalidExponent { .. })
        ));
    }
}
