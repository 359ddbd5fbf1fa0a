//! Point value type and the adapter trait that turns point sequences into curves.

use std::fmt;

/// Anything that exposes an ordered coordinate vector.
///
/// Implemented for raw coordinate containers and for [`Point`], so every
/// point abstraction reaches the measures through [`Curve::from_points`].
///
/// [`Curve::from_points`]: crate::Curve::from_points
pub trait Coordinates {
    /// Borrow the coordinates.
    fn coordinates(&self) -> &[f64];

    /// Number of coordinates.
    fn dims(&self) -> usize {
        self.coordinates().len()
    }
}

impl Coordinates for [f64] {
    fn coordinates(&self) -> &[f64] {
        self
    }
}

impl<const N: usize> Coordinates for [f64; N] {
    fn coordinates(&self) -> &[f64] {
        self
    }
}

impl Coordinates for Vec<f64> {
    fn coordinates(&self) -> &[f64] {
        self
    }
}

impl<T: Coordinates + ?Sized> Coordinates for &T {
    fn coordinates(&self) -> &[f64] {
        (**self).coordinates()
    }
}

/// A point in N-dimensional space.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    coordinates: Vec<f64>,
}

impl Point {
    /// Create a point from its coordinates.
    #[must_use]
    pub fn new(coordinates: Vec<f64>) -> Self {
        Self { coordinates }
    }

    /// Create a 2-D point.
    #[must_use]
    pub fn planar(x: f64, y: f64) -> Self {
        Self {
            coordinates: vec![x, y],
        }
    }

    /// Consume and return the coordinates.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.coordinates
    }
}

impl Coordinates for Point {
    fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }
}

impl From<Vec<f64>> for Point {
    fn from(coordinates: Vec<f64>) -> Self {
        Self::new(coordinates)
    }
}

impl<const N: usize> From<[f64; N]> for Point {
    fn from(coordinates: [f64; N]) -> Self {
        Self::new(coordinates.to_vec())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, c) in self.coordinates.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;

    #[test]
    fn planar_has_two_dims() {
        let p = Point::planar(3.0, 4.0);
        assert_eq!(p.dims(), 2);
        assert_eq!(p.coordinates(), &[3.0, 4.0]);
    }

    #[test]
    fn display_lists_coordinates() {
        assert_eq!(Point::new(vec![1.0, 2.5, -3.0]).to_string(), "(1, 2.5, -3)");
    }

    #[test]
    fn points_adapt_to_curve() {
        let points = vec![Point::planar(0.0, 0.0), Point::planar(1.0, 2.0)];
        let curve = Curve::from_points(&points).unwrap();
        assert_eq!(curve.len(), 2);
        assert_eq!(curve.point(1), &[1.0, 2.0]);
        // Source points are unchanged.
        assert_eq!(points[1], Point::planar(1.0, 2.0));
    }

    #[test]
    fn references_adapt_too() {
        let raw = [vec![0.0], vec![1.0]];
        let refs: Vec<&Vec<f64>> = raw.iter().collect();
        let curve = Curve::from_points(&refs).unwrap();
        assert_eq!(curve.dims(), 1);
    }

    #[test]
    fn from_array() {
        let p: Point = [1.0, 2.0, 3.0].into();
        assert_eq!(p.into_inner(), vec![1.0, 2.0, 3.0]);
    }
}
