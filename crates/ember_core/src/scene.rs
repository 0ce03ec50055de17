//! Scene types for Ember.
//!
//! Everything here is immutable once the scene is loaded: rendering
//! threads share the scene by reference without locking.

use ember_math::Vec3;
use serde::Deserialize;

/// A surface material: diffuse reflectance plus emitted radiance.
///
/// One material per geometry, looked up by the geometry id the
/// intersection engine reports.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Material {
    /// Diffuse reflectance (RGB, components in [0, 1])
    pub albedo: Vec3,

    /// Emitted radiance (RGB, components >= 0)
    #[serde(default = "Vec3::default")]
    pub emittance: Vec3,
}

impl Material {
    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emittance.length_squared() > 0.0
    }
}

/// Physical camera description, as authored in the scene file.
///
/// The gate is a vertical sensor size in inches and the focal length is
/// in millimeters; the film camera converts both to centimeters.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Camera {
    /// Vertical gate (sensor) size, in inches
    pub gate: f32,
    /// Focal length, in millimeters
    pub focal: f32,
    /// Image aspect ratio (width / height)
    pub aspect: f32,
    /// Eye position in world space
    pub eye: Vec3,
    /// Viewing direction
    pub look: Vec3,
    /// Up vector
    pub up: Vec3,
}

/// Which reflectance model the integrator evaluates at each bounce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingModel {
    /// Diffuse term only
    Lambertian,
    /// Diffuse plus GGX microfacet specular with dielectric Fresnel
    #[default]
    Microfacet,
}

fn default_bounces() -> u32 {
    4
}

/// Render configuration shared by all worker threads.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct RenderSettings {
    /// Output image width in pixels
    pub width: u32,
    /// Output image height in pixels
    pub height: u32,
    /// Samples per pixel
    pub spp: u32,
    /// Path bounce budget (fixed-depth truncation, no Russian roulette)
    #[serde(default = "default_bounces")]
    pub bounces: u32,
    /// Base sampler seed; thread i uses seed + i. Entropy-seeded if unset.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Worker thread count; defaults to the hardware concurrency.
    #[serde(default)]
    pub threads: Option<usize>,
    /// Active reflectance model
    #[serde(default)]
    pub shading: ShadingModel,
}

/// An indexed triangle mesh.
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    /// Vertex positions
    pub vertices: Vec<Vec3>,
    /// Triangles as vertex index triples
    pub indices: Vec<[u32; 3]>,
}

impl Geometry {
    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }
}

/// A complete scene: camera, settings, geometry, and materials.
///
/// `materials[i]` applies to `geometries[i]`; the intersection engine
/// reports geometry ids that index both lists.
#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: Camera,
    pub settings: RenderSettings,
    pub geometries: Vec<Geometry>,
    pub materials: Vec<Material>,
}

impl Scene {
    /// Get total triangle count across all geometries.
    pub fn total_triangle_count(&self) -> usize {
        self.geometries.iter().map(|g| g.triangle_count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_emissive() {
        let light = Material {
            albedo: Vec3::ZERO,
            emittance: Vec3::ONE,
        };
        let diffuse = Material {
            albedo: Vec3::splat(0.8),
            emittance: Vec3::ZERO,
        };

        assert!(light.is_emissive());
        assert!(!diffuse.is_emissive());
    }

    #[test]
    fn test_settings_defaults() {
        let settings: RenderSettings =
            serde_json::from_str(r#"{"width": 64, "height": 32, "spp": 4}"#).unwrap();

        assert_eq!(settings.bounces, 4);
        assert_eq!(settings.seed, None);
        assert_eq!(settings.threads, None);
        assert_eq!(settings.shading, ShadingModel::Microfacet);
    }

    #[test]
    fn test_shading_model_names() {
        let m: ShadingModel = serde_json::from_str(r#""lambertian""#).unwrap();
        assert_eq!(m, ShadingModel::Lambertian);

        let m: ShadingModel = serde_json::from_str(r#""microfacet""#).unwrap();
        assert_eq!(m, ShadingModel::Microfacet);
    }

    #[test]
    fn test_triangle_count() {
        let geometry = Geometry {
            vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE],
            indices: vec![[0, 1, 2], [1, 3, 2]],
        };
        assert_eq!(geometry.triangle_count(), 2);
    }
}
