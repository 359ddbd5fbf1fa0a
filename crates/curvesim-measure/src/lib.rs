//! Curve similarity measures: discrete Fréchet, Dynamic Time Warping, and Hausdorff.
//!
//! Pure math library, zero I/O. Curves are ordered sequences of points in
//! N-dimensional space; every measure is built on a pluggable point
//! [`Metric`]. Inputs are validated once at the boundary, after which the
//! recurrences run without per-cell checks.
//!
//! ```
//! use curvesim_measure::{Metric, frechet_distance};
//!
//! let a = [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
//! let b = [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]];
//! let d = frechet_distance(&a, &b, Metric::Euclidean).unwrap();
//! assert!((d - 2.0).abs() < 1e-12);
//! ```

mod curve;
mod distance;
mod dtw;
mod error;
mod frechet;
mod hausdorff;
mod matrix;
mod measure;
mod metric;
mod path;
mod point;

pub use curve::{Curve, CurveView};
pub use distance::Dissimilarity;
pub use dtw::Dtw;
pub use error::MeasureError;
pub use frechet::Frechet;
pub use hausdorff::Hausdorff;
pub use matrix::DistanceMatrix;
pub use measure::{
    Calculator, CurveMeasure, Measure, dynamic_time_warping_distance, frechet_distance,
    hausdorff_distance,
};
pub use metric::{
    EARTH_RADIUS_KM, Metric, chebyshev, cosine, euclidean, haversine, manhattan, minkowski,
};
pub use path::{Alignment, AlignmentStep};
pub use point::{Coordinates, Point};
