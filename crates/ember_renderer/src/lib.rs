//! Ember Renderer - CPU path tracing.
//!
//! A Monte Carlo path tracer: camera rays are jittered over each pixel,
//! traced through an intersection engine, and shaded by a configurable
//! reflectance model. The image is partitioned into vertical strips
//! rendered by one worker thread each.

mod camera;
mod engine;
mod integrator;
mod raster;
mod recorder;
mod reflectance;
mod renderer;
mod sampler;
mod strip;
mod trimesh;

pub use camera::FilmCamera;
pub use engine::{Hit, Intersector, SurfacePoint};
pub use raster::{linear_to_gamma, RenderTarget};
pub use integrator::{PathIntegrator, HIT_OFFSET};
pub use recorder::{JsonSink, NullSink, PathLog, PathSink, RecordedPath, SamplePoint};
pub use reflectance::{GgxMicrofacet, Lambertian, Reflectance};
pub use renderer::{film_space, Renderer};
pub use sampler::{cosine_hemisphere, Sampler};
pub use strip::{generate_strips, Strip, StripResult};
pub use trimesh::MeshEngine;

/// Re-export Vec3 and common math types from ember_math
pub use ember_math::{Frame, Interval, Ray, Vec3};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;
