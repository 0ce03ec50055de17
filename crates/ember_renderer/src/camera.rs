//! Film camera: maps film coordinates to world-space rays.

use ember_math::Ray;
use glam::{Mat4, Vec2, Vec3};

/// Vertical gate sizes are authored in inches.
const INCH_TO_CM: f32 = 2.54;
/// Focal lengths are authored in millimeters.
const MM_TO_CM: f32 = 0.1;

/// A pinhole camera over a physical film gate.
///
/// Built once from the scene's camera description; read-only afterwards,
/// so worker threads generate rays concurrently without synchronization.
#[derive(Debug, Clone)]
pub struct FilmCamera {
    /// Vertical gate size in centimeters
    gate: f32,
    /// Focal length in centimeters
    focal: f32,
    /// Image aspect ratio (width / height)
    aspect: f32,
    /// Camera-to-world rigid transform
    to_world: Mat4,
}

impl FilmCamera {
    /// Build the camera from its scene description.
    ///
    /// Basis: the up vector is local Y, the negated look direction is
    /// local Z, and X = cross(Y, Z).
    pub fn new(desc: &ember_core::Camera) -> Self {
        let y = desc.up.normalize();
        let z = (-desc.look).normalize();
        let x = y.cross(z);
        let to_world = Mat4::from_cols(
            x.extend(0.0),
            y.extend(0.0),
            z.extend(0.0),
            desc.eye.extend(1.0),
        );

        Self {
            gate: desc.gate * INCH_TO_CM,
            focal: desc.focal * MM_TO_CM,
            aspect: desc.aspect,
            to_world,
        }
    }

    /// Generate the ray through a film coordinate.
    ///
    /// The film center is (0,0), the lower-left corner (-1,-1) and the
    /// upper-right (1,1). The ray starts at the eye and passes through
    /// the film plane one focal length in front of it.
    pub fn generate_ray(&self, film: Vec2) -> Ray {
        let plane_point = Vec3::new(
            film.x * 0.5 * self.aspect * self.gate,
            film.y * 0.5 * self.gate,
            -self.focal,
        );

        let origin = self.to_world.transform_point3(Vec3::ZERO);
        let direction = self.to_world.transform_vector3(plane_point).normalize();

        Ray::new(origin, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> FilmCamera {
        FilmCamera::new(&ember_core::Camera {
            gate: 1.0,
            focal: 35.0,
            aspect: 2.0,
            eye: Vec3::new(1.0, 2.0, 3.0),
            look: Vec3::new(0.0, 0.0, -2.0),
            up: Vec3::new(0.0, 1.0, 0.0),
        })
    }

    #[test]
    fn test_center_ray_along_look() {
        let camera = test_camera();
        let ray = camera.generate_ray(Vec2::ZERO);

        assert_eq!(ray.origin(), Vec3::new(1.0, 2.0, 3.0));
        // Center-of-frame ray points where the camera looks
        assert!((ray.direction() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_ray_directions_are_unit() {
        let camera = test_camera();
        for film in [
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.3, -0.7),
        ] {
            assert!((camera.generate_ray(film).direction().length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_corner_ray_offsets() {
        let camera = test_camera();
        let ray = camera.generate_ray(Vec2::new(1.0, 1.0));

        // Upper-right film corner: positive X and Y in a look-down-Z frame
        assert!(ray.direction().x > 0.0);
        assert!(ray.direction().y > 0.0);
        assert!(ray.direction().z < 0.0);
        // Horizontal spread dominates with aspect > 1
        assert!(ray.direction().x > ray.direction().y);
    }
}
