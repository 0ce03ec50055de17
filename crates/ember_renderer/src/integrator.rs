//! Path integrator.
//!
//! Estimates outgoing radiance for one camera ray by walking a light
//! path through the scene. The walk is an explicit loop over bounce
//! depth carrying a throughput multiplier, so the call stack does not
//! grow with the bounce budget. Termination is fixed-depth truncation,
//! not Russian roulette.

use ember_core::Material;
use ember_math::{Frame, Ray};

use crate::engine::Intersector;
use crate::recorder::PathLog;
use crate::reflectance::Reflectance;
use crate::sampler::{cosine_hemisphere, Sampler};
use crate::Color;

/// Continuation rays start this far along the shading normal to avoid
/// re-intersecting the surface they left.
pub const HIT_OFFSET: f32 = 1e-3;

/// Radiance estimation over a read-only scene.
///
/// Shared by reference across worker threads; all mutable state (the
/// sampler and the path log) is owned by the calling thread.
pub struct PathIntegrator<'a> {
    engine: &'a dyn Intersector,
    materials: &'a [Material],
    reflectance: &'a dyn Reflectance,
}

impl<'a> PathIntegrator<'a> {
    pub fn new(
        engine: &'a dyn Intersector,
        materials: &'a [Material],
        reflectance: &'a dyn Reflectance,
    ) -> Self {
        Self {
            engine,
            materials,
            reflectance,
        }
    }

    /// Estimate radiance arriving along `ray`.
    ///
    /// Returns `None` when the ray escapes the scene without hitting
    /// anything; escaped samples contribute nothing to their pixel.
    /// Each hit point along the walk is reported to the path log, which
    /// never affects the estimate itself.
    pub fn estimate_radiance(
        &self,
        ray: Ray,
        bounces: u32,
        sampler: &mut Sampler,
        log: &mut PathLog,
    ) -> Option<Color> {
        let mut radiance = Color::ZERO;
        let mut throughput = Color::ONE;
        let mut ray = ray;

        for depth in 0..=bounces {
            let hit = match self.engine.intersect(&ray) {
                Some(hit) => hit,
                // A miss on the camera ray means the sample escaped; a
                // miss later ends the walk with the emission gathered
                // so far (an escaped continuation adds no indirect
                // light).
                None => return if depth == 0 { None } else { Some(radiance) },
            };

            let surface = self
                .engine
                .interpolate(hit.geometry, hit.primitive, hit.u, hit.v);
            let frame = Frame::from_derivatives(surface.dpdu, surface.dpdv);
            log.vertex(surface.point);

            let material = &self.materials[hit.geometry];
            radiance += throughput * material.emittance;

            if depth == bounces {
                break;
            }

            let (r0, r1) = sampler.uniform_pair();
            let outgoing = cosine_hemisphere(frame.n, r0, r1);
            let incoming = ray.direction().normalize();
            throughput *=
                self.reflectance
                    .scatter_weight(&frame, incoming, outgoing, material, sampler);

            ray = Ray::new(surface.point + HIT_OFFSET * frame.n, outgoing);
        }

        Some(radiance)
    }
}
