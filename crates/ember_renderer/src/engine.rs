//! Intersection engine contract.
//!
//! The integrator treats scene intersection as a black box behind this
//! trait, so a third-party kernel (Embree-class) can supply the
//! acceleration structure and primitive tests. Engines are built once
//! before rendering and queried concurrently by all worker threads.

use ember_math::Ray;
use glam::Vec3;

/// A ray-scene intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Which geometry was hit; also indexes the scene's material list
    pub geometry: usize,
    /// Which primitive within the geometry
    pub primitive: usize,
    /// Surface parameters of the hit within the primitive
    pub u: f32,
    pub v: f32,
}

/// Interpolated surface attributes at a hit.
///
/// The positional derivatives span the surface at the hit point; the
/// shading frame is derived from them.
#[derive(Debug, Clone, Copy)]
pub struct SurfacePoint {
    pub point: Vec3,
    pub dpdu: Vec3,
    pub dpdv: Vec3,
}

/// The scene intersection engine.
pub trait Intersector: Send + Sync {
    /// Find the closest hit along a ray, if any.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;

    /// Interpolate surface position and derivatives at a hit.
    fn interpolate(&self, geometry: usize, primitive: usize, u: f32, v: f32) -> SurfacePoint;
}
