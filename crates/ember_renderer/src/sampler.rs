//! Per-thread random sampling.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A uniform random number source owned by one worker thread.
///
/// No sampler state is ever shared: each worker constructs its own,
/// either from the configured base seed plus its thread index (for
/// reproducible renders) or from OS entropy.
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    /// Create a deterministic sampler from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a sampler seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Draw a uniform sample in [0, 1).
    #[inline]
    pub fn uniform(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Draw two independent uniform samples in [0, 1).
    #[inline]
    pub fn uniform_pair(&mut self) -> (f32, f32) {
        (self.rng.gen(), self.rng.gen())
    }
}

/// Sample a cosine-weighted direction on the hemisphere around `n`.
///
/// `z = sqrt(r0)`, `r = sqrt(1 - z^2)`, `phi = 2*pi*r1`; the local
/// direction `(z, r*cos(phi), r*sin(phi))` is expressed in an
/// orthonormal basis whose first axis is `n`. The cosine-weighted
/// density cancels the cosine factor of the diffuse estimator, so no
/// separate pdf division is applied downstream.
pub fn cosine_hemisphere(n: Vec3, r0: f32, r1: f32) -> Vec3 {
    let z = r0.sqrt();
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * std::f32::consts::PI * r1;

    let (u, v) = basis_around(n);
    z * n + r * phi.cos() * u + r * phi.sin() * v
}

/// Build two unit vectors orthogonal to `n` (and to each other).
fn basis_around(n: Vec3) -> (Vec3, Vec3) {
    let helper = if n.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
    let u = n.cross(helper).normalize();
    let v = n.cross(u);
    (u, v)
}
