//! Ray type for path tracing.
//!
//! A ray is defined by an origin point, a direction vector, and the
//! parametric range along which intersections are accepted.

use crate::Interval;
use glam::Vec3;

/// A ray with origin, direction, and parametric range.
///
/// The direction is stored as given (not necessarily unit length);
/// callers normalize before handing rays to the intersection engine.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray
    origin: Vec3,
    /// Direction vector (not necessarily normalized)
    direction: Vec3,
    /// Accepted parametric range along the ray
    range: Interval,
}

impl Ray {
    /// Create a new ray accepting hits anywhere in [0, +inf).
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            range: Interval::FORWARD,
        }
    }

    /// Create a ray with an explicit parametric range.
    #[inline]
    pub fn with_range(origin: Vec3, direction: Vec3, range: Interval) -> Self {
        Self {
            origin,
            direction,
            range,
        }
    }

    /// Get the ray's origin point.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the ray's direction vector.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the ray's accepted parametric range.
    #[inline]
    pub fn range(&self) -> Interval {
        self.range
    }

    /// Compute a point along the ray at parameter t.
    /// P(t) = origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));

        assert_eq!(ray.at(0.0), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(ray.at(1.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(ray.at(2.5), Vec3::new(2.5, 0.0, 0.0));
    }

    #[test]
    fn test_ray_accessors() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let direction = Vec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin(), origin);
        assert_eq!(ray.direction(), direction);
        assert_eq!(ray.range().min, 0.0);
        assert_eq!(ray.range().max, f32::INFINITY);
    }

    #[test]
    fn test_ray_with_range() {
        let ray = Ray::with_range(Vec3::ZERO, Vec3::Z, Interval::new(0.5, 2.0));
        assert!(ray.range().contains(1.0));
        assert!(!ray.range().contains(3.0));
    }
}
