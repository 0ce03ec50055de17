//! Reflectance models.
//!
//! Two strategies share one interface; the scene settings pick which is
//! active. Both evaluate the scatter weight `w` of the estimator
//! `L = ke + w * Li(o)` at a bounce; emission is added by the
//! integrator itself.

use ember_core::{Material, ShadingModel};
use ember_math::Frame;
use glam::Vec3;
use std::f32::consts::PI;

use crate::sampler::Sampler;
use crate::Color;

/// Denominators below this are treated as grazing and contribute zero.
const GRAZING_EPS: f32 = 1e-6;

/// Weighting of indirect radiance at a surface interaction.
pub trait Reflectance: Send + Sync {
    /// Compute the scatter weight for one bounce.
    ///
    /// `wi` is the unit direction of the incoming ray (pointing toward
    /// the surface), `wo` the sampled continuation direction, and
    /// `frame` the shading frame derived from the surface derivatives
    /// at the hit.
    fn scatter_weight(
        &self,
        frame: &Frame,
        wi: Vec3,
        wo: Vec3,
        material: &Material,
        sampler: &mut Sampler,
    ) -> Color;
}

/// Select the reflectance strategy for a shading model.
pub fn from_model(model: ShadingModel) -> Box<dyn Reflectance> {
    match model {
        ShadingModel::Lambertian => Box::new(Lambertian),
        ShadingModel::Microfacet => Box::new(GgxMicrofacet::default()),
    }
}

/// Diffuse-only weighting: `|n.o| * kd`.
pub struct Lambertian;

impl Reflectance for Lambertian {
    fn scatter_weight(
        &self,
        frame: &Frame,
        _wi: Vec3,
        wo: Vec3,
        material: &Material,
        _sampler: &mut Sampler,
    ) -> Color {
        frame.n.dot(wo).abs() * material.albedo
    }
}

/// Diffuse plus GGX microfacet specular with dielectric Fresnel:
/// `|n.o| * (kd + pi * F * brdf * kd)`.
pub struct GgxMicrofacet {
    /// GGX roughness
    pub alpha: f32,
    /// Incident index of refraction
    pub ior_i: f32,
    /// Transmitted index of refraction
    pub ior_t: f32,
}

impl Default for GgxMicrofacet {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            ior_i: 1.0,
            ior_t: 1.2,
        }
    }
}

impl Reflectance for GgxMicrofacet {
    fn scatter_weight(
        &self,
        frame: &Frame,
        wi: Vec3,
        wo: Vec3,
        material: &Material,
        sampler: &mut Sampler,
    ) -> Color {
        let kd = material.albedo;
        let cos_o = frame.n.dot(wo).abs();

        // GGX-distributed half vector, sampled in the shading frame:
        // theta_m = atan(alpha*sqrt(xi1)/sqrt(1-xi1)), phi_m = 2*pi*xi2
        let (xi1, xi2) = sampler.uniform_pair();
        let theta_m = (self.alpha * xi1.sqrt() / (1.0 - xi1).sqrt()).atan();
        let phi_m = 2.0 * PI * xi2;
        let (sin_m, cos_m) = theta_m.sin_cos();
        let m = frame.to_world(Vec3::new(sin_m * phi_m.cos(), sin_m * phi_m.sin(), cos_m));

        let i_dot_n = wi.dot(frame.n);
        let o_dot_n = wo.dot(frame.n);
        let m_dot_n = m.dot(frame.n);
        let i_dot_m = wi.dot(m);
        let o_dot_m = wo.dot(m);

        let f = self.fresnel(i_dot_m.abs());
        let d = self.distribution(m_dot_n, sin_m, cos_m);
        let g = self.masking(i_dot_m, i_dot_n) * self.masking(o_dot_m, o_dot_n);

        let denom = 4.0 * i_dot_n.abs() * o_dot_n.abs();
        let mut brdf = if denom > GRAZING_EPS { g * d / denom } else { 0.0 };
        if !brdf.is_finite() {
            brdf = 0.0;
        }

        cos_o * (kd + PI * f * brdf * kd)
    }
}

impl GgxMicrofacet {
    /// Exact dielectric Fresnel term for the cosine between the
    /// incoming ray and the half vector.
    fn fresnel(&self, c: f32) -> f32 {
        let g2 = (self.ior_t * self.ior_t) / (self.ior_i * self.ior_i) - 1.0 + c * c;
        if g2 <= 0.0 {
            // Total internal reflection
            return 1.0;
        }
        let g = g2.sqrt();
        let ratio = (g - c) / (g + c);
        let correction = (c * (g + c) - 1.0) / (c * (g - c) + 1.0);
        0.5 * ratio * ratio * (1.0 + correction * correction)
    }

    /// GGX normal distribution, zero for half vectors below the surface.
    fn distribution(&self, m_dot_n: f32, sin_m: f32, cos_m: f32) -> f32 {
        if m_dot_n <= 0.0 || cos_m <= GRAZING_EPS {
            return 0.0;
        }
        let alpha2 = self.alpha * self.alpha;
        let tan_m = sin_m / cos_m;
        let cos2_m = cos_m * cos_m;
        let quad = alpha2 + tan_m * tan_m;
        alpha2 / (PI * cos2_m * cos2_m * quad * quad)
    }

    /// Smith G1 masking term, gated to zero when the direction is on
    /// the wrong side of the microfacet.
    fn masking(&self, v_dot_m: f32, v_dot_n: f32) -> f32 {
        if v_dot_n.abs() < GRAZING_EPS || v_dot_m / v_dot_n <= 0.0 {
            return 0.0;
        }
        let theta_v = v_dot_n.clamp(-1.0, 1.0).acos();
        let tan_v = theta_v.tan();
        2.0 / (1.0 + (1.0 + self.alpha * self.alpha * tan_v * tan_v).sqrt())
    }
}
