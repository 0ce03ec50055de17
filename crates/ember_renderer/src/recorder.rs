//! Path recording.
//!
//! A debug/visualization trace of the stochastic paths: each worker
//! thread fills its own `PathLog` while tracing, and a `PathSink`
//! serializes every log after the render joins. Recording never
//! affects rendered pixel values; the `NullSink` drops everything.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::Serialize;

use crate::Color;

/// Where on the film a recorded path originated.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SamplePoint {
    /// Pixel coordinates
    pub pixel: [u32; 2],
    /// Sub-pixel jitter in [0, 1)^2
    pub jitter: [f32; 2],
}

/// One completed path: its vertices in trace order plus the sample
/// metadata and resulting radiance (absent when the sample escaped).
#[derive(Debug, Clone, Serialize)]
pub struct RecordedPath {
    pub sample: SamplePoint,
    pub vertices: Vec<[f32; 3]>,
    pub radiance: Option<[f32; 3]>,
}

/// Per-thread buffer of recorded paths.
///
/// Owned exclusively by one worker; aggregation happens only after the
/// join barrier.
#[derive(Default)]
pub struct PathLog {
    current: Vec<[f32; 3]>,
    paths: Vec<RecordedPath>,
}

impl PathLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vertex to the path currently being traced.
    pub fn vertex(&mut self, point: Vec3) {
        self.current.push(point.to_array());
    }

    /// Close the current path with its sample metadata and result.
    pub fn finish(&mut self, radiance: Option<Color>, sample: SamplePoint) {
        self.paths.push(RecordedPath {
            sample,
            vertices: std::mem::take(&mut self.current),
            radiance: radiance.map(|c| c.to_array()),
        });
    }

    /// All completed paths.
    pub fn paths(&self) -> &[RecordedPath] {
        &self.paths
    }

    /// Vertices recorded on the path still being traced.
    pub fn current_vertex_count(&self) -> usize {
        self.current.len()
    }
}

/// Serializes the per-thread path logs once rendering is done.
pub trait PathSink: Send + Sync {
    /// Persist all logs; index i belongs to worker thread i.
    fn flush(&self, logs: &[PathLog]) -> io::Result<()>;
}

/// Discards all recorded paths.
pub struct NullSink;

impl PathSink for NullSink {
    fn flush(&self, _logs: &[PathLog]) -> io::Result<()> {
        Ok(())
    }
}

/// Writes one JSON-lines file per worker thread into a directory.
pub struct JsonSink {
    dir: PathBuf,
}

impl JsonSink {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }
}

impl PathSink for JsonSink {
    fn flush(&self, logs: &[PathLog]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        for (thread_id, log) in logs.iter().enumerate() {
            let path = self.dir.join(format!("paths_{thread_id:03}.jsonl"));
            let mut writer = BufWriter::new(File::create(&path)?);
            for recorded in log.paths() {
                serde_json::to_writer(&mut writer, recorded)?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
            log::debug!(
                "Wrote {} paths for thread #{} to \"{}\"",
                log.paths().len(),
                thread_id,
                path.display()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SamplePoint {
        SamplePoint {
            pixel: [3, 7],
            jitter: [0.25, 0.75],
        }
    }

    #[test]
    fn test_log_accumulates_paths() {
        let mut log = PathLog::new();

        log.vertex(Vec3::ZERO);
        log.vertex(Vec3::ONE);
        log.finish(Some(Vec3::splat(0.5)), sample());

        // An escaped sample closes an empty path with no radiance
        log.finish(None, sample());

        assert_eq!(log.paths().len(), 2);
        assert_eq!(log.current_vertex_count(), 0);
        assert_eq!(log.paths()[0].vertices.len(), 2);
        assert_eq!(log.paths()[0].radiance, Some([0.5, 0.5, 0.5]));
        assert!(log.paths()[1].vertices.is_empty());
        assert_eq!(log.paths()[1].radiance, None);
    }

    #[test]
    fn test_null_sink() {
        let mut log = PathLog::new();
        log.vertex(Vec3::ZERO);
        log.finish(None, sample());
        assert!(NullSink.flush(&[log]).is_ok());
    }

    #[test]
    fn test_json_sink_writes_one_file_per_thread() {
        let dir = std::env::temp_dir().join(format!("ember_recorder_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let mut log = PathLog::new();
        log.vertex(Vec3::new(1.0, 2.0, 3.0));
        log.finish(Some(Vec3::ONE), sample());

        let sink = JsonSink::new(&dir);
        sink.flush(&[log, PathLog::new()]).unwrap();

        let first = fs::read_to_string(dir.join("paths_000.jsonl")).unwrap();
        assert_eq!(first.lines().count(), 1);
        assert!(first.contains("\"pixel\":[3,7]"));

        let second = fs::read_to_string(dir.join("paths_001.jsonl")).unwrap();
        assert!(second.is_empty());

        let _ = fs::remove_dir_all(&dir);
    }
}
