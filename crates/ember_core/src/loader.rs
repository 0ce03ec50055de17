//! Scene loading.
//!
//! A scene is a JSON description plus a binary sidecar holding the raw
//! geometry buffers. The sidecar shares the description's path with a
//! `.bin` extension; buffer payloads are stored back to back, in the
//! order the description declares them.
//!
//! All loading failures are fatal: they are reported to the caller
//! before any render thread is spawned.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use ember_math::Vec3;
use serde::Deserialize;
use thiserror::Error;

use crate::scene::{Camera, Geometry, Material, RenderSettings, Scene};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("could not open \"{path}\": {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("scene description error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("buffer error: {0}")]
    Buffer(String),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, SceneError>;

/// On-disk scene description.
#[derive(Debug, Deserialize)]
struct SceneFile {
    camera: Camera,
    settings: RenderSettings,
    geometries: Vec<GeometryFile>,
}

#[derive(Debug, Deserialize)]
struct GeometryFile {
    material: Material,
    buffers: Vec<BufferDesc>,
}

/// A buffer payload in the binary sidecar; `size` is in bytes.
#[derive(Debug, Deserialize)]
struct BufferDesc {
    #[serde(rename = "type")]
    kind: BufferKind,
    size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum BufferKind {
    Indices,
    Vertices,
}

/// Load a scene description and its binary buffer sidecar.
///
/// The sidecar path is the description path with a `.bin` extension.
pub fn load_scene(path: &Path) -> LoadResult<Scene> {
    log::info!("Loading scene \"{}\"", path.display());

    let json_file = File::open(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let description: SceneFile = serde_json::from_reader(BufReader::new(json_file))?;

    let sidecar = path.with_extension("bin");
    let buffers_file = File::open(&sidecar).map_err(|source| SceneError::Io {
        path: sidecar.clone(),
        source,
    })?;

    build_scene(description, &mut BufReader::new(buffers_file))
}

/// Assemble a scene from a parsed description and its buffer stream.
fn build_scene(description: SceneFile, buffers: &mut impl Read) -> LoadResult<Scene> {
    validate_settings(&description.settings)?;

    let mut geometries = Vec::with_capacity(description.geometries.len());
    let mut materials = Vec::with_capacity(description.geometries.len());

    for (id, entry) in description.geometries.into_iter().enumerate() {
        log::info!("Loading geometry #{id}");

        let mut geometry = Geometry::default();
        for buffer in &entry.buffers {
            let bytes = read_payload(buffers, buffer.size as usize)?;
            match buffer.kind {
                BufferKind::Indices => geometry.indices = decode_indices(&bytes)?,
                BufferKind::Vertices => geometry.vertices = decode_vertices(&bytes)?,
            }
        }

        if geometry.vertices.is_empty() || geometry.indices.is_empty() {
            return Err(SceneError::Buffer(format!(
                "geometry #{id} is missing an index or vertex buffer"
            )));
        }
        let vertex_count = geometry.vertices.len() as u32;
        if let Some(bad) = geometry
            .indices
            .iter()
            .flatten()
            .find(|&&i| i >= vertex_count)
        {
            return Err(SceneError::Buffer(format!(
                "geometry #{id} references vertex {bad} of {vertex_count}"
            )));
        }

        log::info!(
            "Geometry #{id}: {} triangles, {} vertices",
            geometry.triangle_count(),
            geometry.vertices.len()
        );

        geometries.push(geometry);
        materials.push(entry.material);
    }

    Ok(Scene {
        camera: description.camera,
        settings: description.settings,
        geometries,
        materials,
    })
}

fn validate_settings(settings: &RenderSettings) -> LoadResult<()> {
    if settings.width == 0 || settings.height == 0 {
        return Err(SceneError::Invalid(format!(
            "image size {}x{}",
            settings.width, settings.height
        )));
    }
    if settings.spp == 0 {
        return Err(SceneError::Invalid("samples per pixel is 0".into()));
    }
    Ok(())
}

fn read_payload(buffers: &mut impl Read, size: usize) -> LoadResult<Vec<u8>> {
    let mut bytes = vec![0u8; size];
    buffers
        .read_exact(&mut bytes)
        .map_err(|source| SceneError::Buffer(format!("sidecar truncated: {source}")))?;
    Ok(bytes)
}

/// Decode little-endian u32 index triples.
fn decode_indices(bytes: &[u8]) -> LoadResult<Vec<[u32; 3]>> {
    if bytes.len() % 12 != 0 {
        return Err(SceneError::Buffer(format!(
            "index buffer of {} bytes is not a whole number of triangles",
            bytes.len()
        )));
    }
    let words: Vec<u32> = bytemuck::pod_collect_to_vec(bytes);
    Ok(words
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect())
}

/// Decode little-endian f32 position triples.
fn decode_vertices(bytes: &[u8]) -> LoadResult<Vec<Vec3>> {
    if bytes.len() % 12 != 0 {
        return Err(SceneError::Buffer(format!(
            "vertex buffer of {} bytes is not a whole number of positions",
            bytes.len()
        )));
    }
    let floats: Vec<f32> = bytemuck::pod_collect_to_vec(bytes);
    Ok(floats
        .chunks_exact(3)
        .map(|c| Vec3::new(c[0], c[1], c[2]))
        .collect())
}
