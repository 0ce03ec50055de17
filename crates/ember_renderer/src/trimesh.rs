//! Triangle mesh intersection engine.
//!
//! A self-contained `Intersector` over indexed triangle meshes, using
//! the Möller-Trumbore intersection algorithm. It stands in where a
//! third-party kernel is not available; anything implementing the
//! engine trait can replace it.

use ember_core::Geometry;
use ember_math::Ray;
use glam::Vec3;

use crate::engine::{Hit, Intersector, SurfacePoint};

/// One triangle mesh per scene geometry.
struct TriMesh {
    vertices: Vec<Vec3>,
    indices: Vec<[u32; 3]>,
}

impl TriMesh {
    fn corners(&self, primitive: usize) -> (Vec3, Vec3, Vec3) {
        let [i0, i1, i2] = self.indices[primitive];
        (
            self.vertices[i0 as usize],
            self.vertices[i1 as usize],
            self.vertices[i2 as usize],
        )
    }
}

/// Intersection engine over the scene's triangle meshes.
pub struct MeshEngine {
    meshes: Vec<TriMesh>,
}

impl MeshEngine {
    /// Build the engine from loaded scene geometry.
    pub fn new(geometries: &[Geometry]) -> Self {
        let meshes = geometries
            .iter()
            .map(|g| TriMesh {
                vertices: g.vertices.clone(),
                indices: g.indices.clone(),
            })
            .collect();
        Self { meshes }
    }
}

impl Intersector for MeshEngine {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let mut closest = ray.range().max;
        let mut best = None;

        for (geometry, mesh) in self.meshes.iter().enumerate() {
            for primitive in 0..mesh.indices.len() {
                let (v0, v1, v2) = mesh.corners(primitive);
                if let Some((t, u, v)) = intersect_triangle(ray, v0, v1, v2) {
                    if ray.range().surrounds(t) && t < closest {
                        closest = t;
                        best = Some(Hit {
                            geometry,
                            primitive,
                            u,
                            v,
                        });
                    }
                }
            }
        }

        best
    }

    fn interpolate(&self, geometry: usize, primitive: usize, u: f32, v: f32) -> SurfacePoint {
        let (v0, v1, v2) = self.meshes[geometry].corners(primitive);
        SurfacePoint {
            point: (1.0 - u - v) * v0 + u * v1 + v * v2,
            dpdu: v1 - v0,
            dpdv: v2 - v0,
        }
    }
}

/// Möller-Trumbore ray-triangle intersection.
///
/// Returns (t, u, v) for an intersection inside the triangle, ignoring
/// the ray's parametric range (the caller applies it).
fn intersect_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<(f32, f32, f32)> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction().cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < 1e-8 {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin() - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction().dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    Some((t, u, v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_math::Interval;

    fn single_triangle() -> MeshEngine {
        MeshEngine::new(&[Geometry {
            vertices: vec![
                Vec3::new(-1.0, -1.0, -1.0),
                Vec3::new(1.0, -1.0, -1.0),
                Vec3::new(0.0, 1.0, -1.0),
            ],
            indices: vec![[0, 1, 2]],
        }])
    }

    #[test]
    fn test_triangle_hit() {
        let engine = single_triangle();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let hit = engine.intersect(&ray).unwrap();
        assert_eq!(hit.geometry, 0);
        assert_eq!(hit.primitive, 0);

        let sp = engine.interpolate(hit.geometry, hit.primitive, hit.u, hit.v);
        assert!((sp.point - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_triangle_miss() {
        let engine = single_triangle();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert!(engine.intersect(&ray).is_none());
    }

    #[test]
    fn test_range_excludes_hit() {
        let engine = single_triangle();
        let ray = Ray::with_range(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Interval::new(0.0, 0.5),
        );
        assert!(engine.intersect(&ray).is_none());
    }

    #[test]
    fn test_closest_hit_wins() {
        let engine = MeshEngine::new(&[
            Geometry {
                vertices: vec![
                    Vec3::new(-2.0, -2.0, -5.0),
                    Vec3::new(2.0, -2.0, -5.0),
                    Vec3::new(0.0, 2.0, -5.0),
                ],
                indices: vec![[0, 1, 2]],
            },
            Geometry {
                vertices: vec![
                    Vec3::new(-2.0, -2.0, -2.0),
                    Vec3::new(2.0, -2.0, -2.0),
                    Vec3::new(0.0, 2.0, -2.0),
                ],
                indices: vec![[0, 1, 2]],
            },
        ]);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let hit = engine.intersect(&ray).unwrap();
        assert_eq!(hit.geometry, 1);
    }

    #[test]
    fn test_interpolate_derivatives_span_triangle() {
        let engine = single_triangle();
        let sp = engine.interpolate(0, 0, 0.25, 0.25);

        assert_eq!(sp.dpdu, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(sp.dpdv, Vec3::new(1.0, 2.0, 0.0));
        // Barycentric: 0.5*v0 + 0.25*v1 + 0.25*v2
        assert!((sp.point - Vec3::new(-0.25, -0.5, -1.0)).length() < 1e-6);
    }
}
