//! Measure selection and the convenience entry points over raw point sequences.

use std::fmt;
use std::str::FromStr;

use crate::curve::{Curve, CurveView};
use crate::distance::Dissimilarity;
use crate::dtw::Dtw;
use crate::error::MeasureError;
use crate::frechet::Frechet;
use crate::hausdorff::Hausdorff;
use crate::metric::Metric;
use crate::point::Coordinates;

/// A configured curve-to-curve measure.
pub trait CurveMeasure {
    /// Point metric the measure is built on.
    fn metric(&self) -> Metric;

    /// Dissimilarity between two curves.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError`] when the curves are incompatible with each
    /// other or with the metric.
    fn distance(&self, a: CurveView<'_>, b: CurveView<'_>) -> Result<Dissimilarity, MeasureError>;
}

impl CurveMeasure for Frechet {
    fn metric(&self) -> Metric {
        Frechet::metric(self)
    }

    fn distance(&self, a: CurveView<'_>, b: CurveView<'_>) -> Result<Dissimilarity, MeasureError> {
        Frechet::distance(self, a, b)
    }
}

impl CurveMeasure for Dtw {
    fn metric(&self) -> Metric {
        Dtw::metric(self)
    }

    fn distance(&self, a: CurveView<'_>, b: CurveView<'_>) -> Result<Dissimilarity, MeasureError> {
        Dtw::distance(self, a, b)
    }
}

impl CurveMeasure for Hausdorff {
    fn metric(&self) -> Metric {
        Hausdorff::metric(self)
    }

    fn distance(&self, a: CurveView<'_>, b: CurveView<'_>) -> Result<Dissimilarity, MeasureError> {
        Hausdorff::distance(self, a, b)
    }
}

/// Which curve measure to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    /// Discrete Fréchet distance.
    Frechet,
    /// Dynamic Time Warping distance.
    DynamicTimeWarping,
    /// Symmetric Hausdorff distance.
    Hausdorff,
}

impl Measure {
    /// All measures, in reporting order.
    pub const ALL: [Self; 3] = [Self::Frechet, Self::Hausdorff, Self::DynamicTimeWarping];

    /// Return the selector name of this measure.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Frechet => "frechet",
            Self::DynamicTimeWarping => "dtw",
            Self::Hausdorff => "hausdorff",
        }
    }

    /// Bind this measure to a point metric.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MeasureError::InvalidExponent`] | `metric` is Minkowski with an invalid `p` |
    pub fn with_metric(self, metric: Metric) -> Result<Calculator, MeasureError> {
        Ok(match self {
            Self::Frechet => Calculator::Frechet(Frechet::new(metric)?),
            Self::DynamicTimeWarping => Calculator::Dtw(Dtw::new(metric)?),
            Self::Hausdorff => Calculator::Hausdorff(Hausdorff::new(metric)?),
        })
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Measure {
    type Err = MeasureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frechet" | "fréchet" => Ok(Self::Frechet),
            "dtw" | "dynamic-time-warping" => Ok(Self::DynamicTimeWarping),
            "hausdorff" => Ok(Self::Hausdorff),
            _ => Err(MeasureError::UnrecognizedMeasure { name: s.to_owned() }),
        }
    }
}

/// A [`Measure`] bound to a metric, for choosing the algorithm at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Calculator {
    /// Discrete Fréchet.
    Frechet(Frechet),
    /// Dynamic Time Warping.
    Dtw(Dtw),
    /// Hausdorff.
    Hausdorff(Hausdorff),
}

impl Calculator {
    /// Return which measure this calculator computes.
    #[must_use]
    pub fn measure(&self) -> Measure {
        match self {
            Self::Frechet(_) => Measure::Frechet,
            Self::Dtw(_) => Measure::DynamicTimeWarping,
            Self::Hausdorff(_) => Measure::Hausdorff,
        }
    }
}

impl CurveMeasure for Calculator {
    fn metric(&self) -> Metric {
        match self {
            Self::Frechet(f) => f.metric(),
            Self::Dtw(d) => d.metric(),
            Self::Hausdorff(h) => h.metric(),
        }
    }

    fn distance(&self, a: CurveView<'_>, b: CurveView<'_>) -> Result<Dissimilarity, MeasureError> {
        match self {
            Self::Frechet(f) => f.distance(a, b),
            Self::Dtw(d) => d.distance(a, b),
            Self::Hausdorff(h) => h.distance(a, b),
        }
    }
}

fn evaluate<P: Coordinates>(
    measure: Measure,
    a: &[P],
    b: &[P],
    metric: Metric,
) -> Result<f64, MeasureError> {
    let calculator = measure.with_metric(metric)?;
    let a = Curve::from_points(a)?;
    let b = Curve::from_points(b)?;
    Ok(calculator.distance(a.as_view(), b.as_view())?.value())
}

/// Discrete Fréchet distance between two point sequences.
///
/// Accepts raw coordinate vectors (`Vec<f64>`, `[f64; N]`, `&[f64]`) or
/// [`Point`](crate::Point)s.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`MeasureError::EmptyCurve`] | either sequence is empty |
/// | [`MeasureError::DimensionMismatch`] | ragged points, curves of different dimensionality, or haversine on non-2-D points |
/// | [`MeasureError::NonFiniteCoordinate`] | a coordinate is NaN or infinite |
/// | [`MeasureError::InvalidExponent`] | Minkowski `p` is invalid |
/// | [`MeasureError::DegenerateVector`] | cosine metric and a zero vector |
pub fn frechet_distance<P: Coordinates>(
    a: &[P],
    b: &[P],
    metric: Metric,
) -> Result<f64, MeasureError> {
    evaluate(Measure::Frechet, a, b, metric)
}

/// Dynamic Time Warping distance between two point sequences.
///
/// # Errors
///
/// Same conditions as [`frechet_distance`].
pub fn dynamic_time_warping_distance<P: Coordinates>(
    a: &[P],
    b: &[P],
    metric: Metric,
) -> Result<f64, MeasureError> {
    evaluate(Measure::DynamicTimeWarping, a, b, metric)
}

/// Symmetric Hausdorff distance between two point sequences.
///
/// # Errors
///
/// Same conditions as [`frechet_distance`].
pub fn hausdorff_distance<P: Coordinates>(
    a: &[P],
    b: &[P],
    metric: Metric,
) -> Result<f64, MeasureError> {
    evaluate(Measure::Hausdorff, a, b, metric)
}
