//! Error types for curve construction and distance computation.

/// Errors from curve validation, metric selection, and distance computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeasureError {
    /// Returned when a curve has no points.
    #[error("curve must contain at least one point")]
    EmptyCurve,

    /// Returned when a curve's points have zero coordinates.
    #[error("points must have at least one coordinate")]
    ZeroDimension,

    /// Returned when two coordinate vectors differ in length, or when a metric
    /// requires a fixed dimensionality the inputs do not have.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Dimensionality required by the first operand or by the metric.
        expected: usize,
        /// Dimensionality actually supplied.
        found: usize,
    },

    /// Returned when a coordinate is NaN or infinite.
    #[error("non-finite coordinate at point {point}, axis {axis}")]
    NonFiniteCoordinate {
        /// Index of the offending point within its curve.
        point: usize,
        /// Index of the offending coordinate within the point.
        axis: usize,
    },

    /// Returned when a Minkowski exponent is not a finite positive number.
    #[error("minkowski exponent must be finite and > 0, got {p}")]
    InvalidExponent {
        /// The rejected exponent.
        p: f64,
    },

    /// Returned by strict metric parsing for an unknown selector.
    #[error("unrecognized metric: {name}")]
    UnrecognizedMetric {
        /// The selector as supplied by the caller.
        name: String,
    },

    /// Returned when a measure selector does not name a known algorithm.
    #[error("unrecognized measure: {name} (expected frechet, dtw, or hausdorff)")]
    UnrecognizedMeasure {
        /// The selector as supplied by the caller.
        name: String,
    },

    /// Returned by the cosine metric when a point has zero norm.
    #[error("cosine distance undefined for zero vector (curve {curve}, point {point})")]
    DegenerateVector {
        /// Which operand held the zero vector: 0 for the first, 1 for the second.
        curve: usize,
        /// Index of the zero vector within that curve.
        point: usize,
    },
}
