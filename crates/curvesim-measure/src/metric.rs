//! Point-to-point distance metrics.
//!
//! Every curve measure is built on one [`Metric`]. The raw kernels
//! ([`euclidean`], [`minkowski`], ...) are exposed for callers that have already
//! validated their inputs; [`Metric::distance`] is the checked entry point.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::curve::CurveView;
use crate::error::MeasureError;

/// Earth radius used by [`Metric::Haversine`], in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Point-to-point distance used by the curve measures.
///
/// Closed set of supported metrics. [`Metric::Euclidean`] is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Metric {
    /// `sqrt(sum((x_i - y_i)^2))`.
    #[default]
    Euclidean,

    /// `(sum(|x_i - y_i|^p))^(1/p)`. Computed independently of
    /// [`Metric::Manhattan`] and [`Metric::Euclidean`] even at `p = 1` or `p = 2`.
    Minkowski {
        /// Exponent; must be finite and strictly positive.
        p: f64,
    },

    /// `sum(|x_i - y_i|)`.
    Manhattan,

    /// `max(|x_i - y_i|)`.
    Chebyshev,

    /// `1 - (x . y) / (|x| |y|)`. Zero vectors are rejected with
    /// [`MeasureError::DegenerateVector`].
    Cosine,

    /// Great-circle distance in kilometres between `[latitude, longitude]`
    /// pairs given in degrees, on a sphere of radius [`EARTH_RADIUS_KM`].
    Haversine,
}

impl Metric {
    /// Create a validated Minkowski metric.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MeasureError::InvalidExponent`] | `p` is NaN, infinite, or `<= 0` |
    pub fn minkowski(p: f64) -> Result<Self, MeasureError> {
        let metric = Self::Minkowski { p };
        metric.validate()?;
        Ok(metric)
    }

    /// Every supported metric, with `p` used for the Minkowski entry.
    #[must_use]
    pub fn all(p: f64) -> [Self; 6] {
        [
            Self::Minkowski { p },
            Self::Manhattan,
            Self::Euclidean,
            Self::Chebyshev,
            Self::Cosine,
            Self::Haversine,
        ]
    }

    /// Parse a metric selector, using `p` when the selector is `minkowski`.
    ///
    /// Matching is case-insensitive. `euclidian` is accepted as a spelling of
    /// `euclidean`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MeasureError::UnrecognizedMetric`] | `name` is not a supported metric |
    /// | [`MeasureError::InvalidExponent`] | `name` is `minkowski` and `p` is invalid |
    pub fn from_selector(name: &str, p: f64) -> Result<Self, MeasureError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "euclidian" => Ok(Self::Euclidean),
            "minkowski" => Self::minkowski(p),
            "manhattan" => Ok(Self::Manhattan),
            "chebyshev" => Ok(Self::Chebyshev),
            "cosine" => Ok(Self::Cosine),
            "haversine" => Ok(Self::Haversine),
            _ => Err(MeasureError::UnrecognizedMetric {
                name: name.to_owned(),
            }),
        }
    }

    /// Parse a metric selector, falling back to [`Metric::Euclidean`] for
    /// unknown names.
    ///
    /// Compatibility mode for callers that relied on unknown selectors meaning
    /// Euclidean. A warning is logged on every fallback.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MeasureError::InvalidExponent`] | `name` is `minkowski` and `p` is invalid |
    pub fn from_selector_or_euclidean(name: &str, p: f64) -> Result<Self, MeasureError> {
        match Self::from_selector(name, p) {
            Err(MeasureError::UnrecognizedMetric { name }) => {
                warn!(metric = %name, "unrecognized metric, falling back to euclidean");
                Ok(Self::Euclidean)
            }
            other => other,
        }
    }

    /// Return the selector name of this metric.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Minkowski { .. } => "minkowski",
            Self::Manhattan => "manhattan",
            Self::Chebyshev => "chebyshev",
            Self::Cosine => "cosine",
            Self::Haversine => "haversine",
        }
    }

    /// Dimensionality this metric requires, if fixed.
    #[must_use]
    pub fn required_dims(&self) -> Option<usize> {
        match self {
            Self::Haversine => Some(2),
            _ => None,
        }
    }

    /// Check the metric's own parameters.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MeasureError::InvalidExponent`] | Minkowski `p` is NaN, infinite, or `<= 0` |
    pub fn validate(&self) -> Result<(), MeasureError> {
        match *self {
            Self::Minkowski { p } if !(p.is_finite() && p > 0.0) => {
                Err(MeasureError::InvalidExponent { p })
            }
            _ => Ok(()),
        }
    }

    /// Distance between two coordinate vectors.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MeasureError::InvalidExponent`] | Minkowski `p` is invalid |
    /// | [`MeasureError::DimensionMismatch`] | `x` and `y` differ in length, or haversine input is not 2-D |
    /// | [`MeasureError::DegenerateVector`] | cosine with a zero vector |
    pub fn distance(&self, x: &[f64], y: &[f64]) -> Result<f64, MeasureError> {
        self.validate()?;
        self.check_dims(x.len(), y.len())?;
        if *self == Self::Cosine {
            if is_zero(x) {
                return Err(MeasureError::DegenerateVector { curve: 0, point: 0 });
            }
            if is_zero(y) {
                return Err(MeasureError::DegenerateVector { curve: 1, point: 0 });
            }
        }
        Ok(self.eval(x, y))
    }

    /// Validate a pair of curves against this metric once, so that the
    /// per-cell kernel can run unchecked.
    pub(crate) fn check_operands(
        &self,
        a: CurveView<'_>,
        b: CurveView<'_>,
    ) -> Result<(), MeasureError> {
        self.validate()?;
        self.check_dims(a.dims(), b.dims())?;
        if *self == Self::Cosine {
            for (curve, view) in [a, b].into_iter().enumerate() {
                if let Some(point) = view.points().position(is_zero) {
                    return Err(MeasureError::DegenerateVector { curve, point });
                }
            }
        }
        Ok(())
    }

    fn check_dims(&self, left: usize, right: usize) -> Result<(), MeasureError> {
        if left != right {
            return Err(MeasureError::DimensionMismatch {
                expected: left,
                found: right,
            });
        }
        if let Some(expected) = self.required_dims()
            && left != expected
        {
            return Err(MeasureError::DimensionMismatch {
                expected,
                found: left,
            });
        }
        Ok(())
    }

    /// Unchecked kernel dispatch. Inputs must already satisfy [`Self::check_operands`].
    #[inline]
    pub(crate) fn eval(&self, x: &[f64], y: &[f64]) -> f64 {
        match *self {
            Self::Euclidean => euclidean(x, y),
            Self::Minkowski { p } => minkowski(x, y, p),
            Self::Manhattan => manhattan(x, y),
            Self::Chebyshev => chebyshev(x, y),
            Self::Cosine => cosine(x, y),
            Self::Haversine => haversine(x, y),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minkowski { p } => write!(f, "minkowski(p={p})"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Metric {
    type Err = MeasureError;

    /// Strict parse. `minkowski` gets `p = 2`; use [`Metric::from_selector`]
    /// for another exponent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_selector(s, 2.0)
    }
}

fn is_zero(v: &[f64]) -> bool {
    v.iter().all(|&c| c == 0.0)
}

fn abs_diffs<'a>(x: &'a [f64], y: &'a [f64]) -> impl Iterator<Item = f64> + 'a {
    x.iter().zip(y).map(|(a, b)| (a - b).abs())
}

/// `(sum(d_i^p))^(1/p)` evaluated as `m * (sum((d_i / m)^p))^(1/p)` with
/// `m = max(d_i)`. Every ratio lies in `[0, 1]` and the sum in `[1, n]`.
/// A single difference beyond `f64::MAX` makes the norm infinite.
fn scaled_norm(x: &[f64], y: &[f64], pow: impl Fn(f64) -> f64, root: impl Fn(f64) -> f64) -> f64 {
    let m = abs_diffs(x, y).fold(0.0, f64::max);
    if m == 0.0 || m.is_infinite() {
        return m;
    }
    let sum: f64 = abs_diffs(x, y).map(|d| pow(d / m)).sum();
    m * root(sum)
}

/// Euclidean distance between equal-length slices.
///
/// Scaled by the largest coordinate difference, so finite inputs never
/// overflow or underflow in the squares.
#[must_use]
pub fn euclidean(x: &[f64], y: &[f64]) -> f64 {
    scaled_norm(x, y, |r| r * r, f64::sqrt)
}

/// Minkowski distance of order `p` between equal-length slices.
///
/// Scaled like [`euclidean`], so large `p` stays finite.
#[must_use]
pub fn minkowski(x: &[f64], y: &[f64], p: f64) -> f64 {
    scaled_norm(x, y, |r| r.powf(p), |s| s.powf(p.recip()))
}

/// Manhattan (L1) distance between equal-length slices.
#[must_use]
pub fn manhattan(x: &[f64], y: &[f64]) -> f64 {
    abs_diffs(x, y).sum()
}

/// Chebyshev (L-infinity) distance between equal-length slices.
#[must_use]
pub fn chebyshev(x: &[f64], y: &[f64]) -> f64 {
    abs_diffs(x, y).fold(0.0, f64::max)
}

/// Cosine distance between equal-length, non-zero slices.
///
/// Each vector is divided by its largest absolute component first, so the
/// norms stay in `[1, sqrt(n)]` whatever the magnitude of the input.
/// Clamped to `[0, 2]` so rounding never yields a negative distance.
#[must_use]
pub fn cosine(x: &[f64], y: &[f64]) -> f64 {
    let sx = max_abs(x);
    let sy = max_abs(y);
    let (dot, nx, ny) = x
        .iter()
        .zip(y)
        .fold((0.0, 0.0, 0.0), |(dot, nx, ny), (a, b)| {
            let (a, b) = (a / sx, b / sy);
            (dot + a * b, nx + a * a, ny + b * b)
        });
    (1.0 - dot / (nx * ny).sqrt()).clamp(0.0, 2.0)
}

fn max_abs(v: &[f64]) -> f64 {
    v.iter().fold(0.0_f64, |m, c| m.max(c.abs()))
}

/// Great-circle distance in kilometres between two `[latitude, longitude]`
/// points in degrees.
#[must_use]
pub fn haversine(x: &[f64], y: &[f64]) -> f64 {
    let (lat_x, lon_x) = (x[0].to_radians(), x[1].to_radians());
    let (lat_y, lon_y) = (y[0].to_radians(), y[1].to_radians());
    let half_dlat = (lat_y - lat_x) / 2.0;
    let half_dlon = (lon_y - lon_x) / 2.0;
    let h = half_dlat.sin().powi(2) + lat_x.cos() * lat_y.cos() * half_dlon.sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}
