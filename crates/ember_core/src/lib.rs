//! Ember Core - immutable scene model and scene loading.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Geometry`, `Material`, `Camera`,
//!   `RenderSettings`
//! - **Scene loading**: JSON scene descriptions with a binary buffer
//!   sidecar (`.bin` next to the `.json`)
//!
//! # Example
//!
//! ```ignore
//! let scene = ember_core::load_scene("scene.json".as_ref())?;
//! println!("Loaded {} geometries at {}x{}",
//!     scene.geometries.len(),
//!     scene.settings.width,
//!     scene.settings.height);
//! ```

pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, SceneError};
pub use scene::{Camera, Geometry, Material, RenderSettings, Scene, ShadingModel};
