//! Render scheduler.
//!
//! Spawns one worker thread per image strip, joins them all, then
//! assembles the strip results into the render target and hands the
//! path logs to the recording sink. Workers share the scene read-only;
//! samplers, path logs, and strip pixels are thread-owned, so no pixel
//! is ever written by two threads.

use std::thread;

use ember_core::Scene;
use ember_math::Vec3;
use glam::Vec2;

use crate::camera::FilmCamera;
use crate::engine::Intersector;
use crate::integrator::PathIntegrator;
use crate::raster::RenderTarget;
use crate::recorder::{PathSink, SamplePoint};
use crate::reflectance::{self, Reflectance};
use crate::sampler::Sampler;
use crate::strip::{generate_strips, Strip, StripResult};

/// Map a jittered pixel position to film coordinates.
///
/// Film space is [-1, 1] on both axes with a vertical flip: row index
/// grows downward in the image but upward in film Y.
pub fn film_space(x: u32, y: u32, jitter: (f32, f32), width: u32, height: u32) -> Vec2 {
    let fx = (x as f32 + jitter.0) / width as f32;
    let fy = (y as f32 + jitter.1) / height as f32;
    Vec2::new(2.0 * fx - 1.0, 1.0 - 2.0 * fy)
}

/// A configured render over one scene.
pub struct Renderer<'a> {
    camera: FilmCamera,
    engine: &'a dyn Intersector,
    scene: &'a Scene,
    reflectance: Box<dyn Reflectance>,
    sink: Box<dyn PathSink>,
}

impl<'a> Renderer<'a> {
    pub fn new(scene: &'a Scene, engine: &'a dyn Intersector, sink: Box<dyn PathSink>) -> Self {
        Self {
            camera: FilmCamera::new(&scene.camera),
            engine,
            scene,
            reflectance: reflectance::from_model(scene.settings.shading),
            sink,
        }
    }

    /// Render the whole image.
    ///
    /// Blocks until every worker has finished; the sink's flush runs
    /// after the join, serialized on the calling thread.
    pub fn render(&self) -> RenderTarget {
        let settings = &self.scene.settings;
        let nthreads = settings.threads.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });
        let strips = generate_strips(settings.width, nthreads);

        log::info!(
            "Rendering {}x{} @ {} spp, {} bounces, {} threads",
            settings.width,
            settings.height,
            settings.spp,
            settings.bounces,
            strips.len()
        );

        let results: Vec<StripResult> = thread::scope(|scope| {
            let workers: Vec<_> = strips
                .iter()
                .map(|&strip| scope.spawn(move || self.render_strip(strip)))
                .collect();
            workers
                .into_iter()
                .map(|w| w.join().expect("render worker panicked"))
                .collect()
        });

        let mut target = RenderTarget::new(settings.width, settings.height);
        for result in &results {
            blit_strip(&mut target, result);
        }

        let logs: Vec<_> = results.into_iter().map(|r| r.log).collect();
        if let Err(err) = self.sink.flush(&logs) {
            // Recording is a debug aid; its failure never fails a render
            log::warn!("Path recording flush failed: {err}");
        }

        target
    }

    /// Render one strip on the calling worker thread.
    fn render_strip(&self, strip: Strip) -> StripResult {
        let settings = &self.scene.settings;
        let mut sampler = match settings.seed {
            Some(seed) => Sampler::seeded(seed + strip.index as u64),
            None => Sampler::from_entropy(),
        };
        let mut log = crate::recorder::PathLog::new();
        let integrator = PathIntegrator::new(
            self.engine,
            &self.scene.materials,
            self.reflectance.as_ref(),
        );

        log::debug!(
            "Render thread #{} started: columns {}..{}",
            strip.index,
            strip.x0,
            strip.x0 + strip.width
        );

        let mut pixels = Vec::with_capacity(strip.pixel_count(settings.height) as usize);
        for y in 0..settings.height {
            for x in strip.x0..strip.x0 + strip.width {
                let mut sum = Vec3::ZERO;
                for _ in 0..settings.spp {
                    let jitter = (sampler.uniform(), sampler.uniform());
                    let film = film_space(x, y, jitter, settings.width, settings.height);
                    let ray = self.camera.generate_ray(film);

                    let radiance =
                        integrator.estimate_radiance(ray, settings.bounces, &mut sampler, &mut log);
                    log.finish(
                        radiance,
                        SamplePoint {
                            pixel: [x, y],
                            jitter: [jitter.0, jitter.1],
                        },
                    );

                    // Escaped samples contribute zero, not undefined
                    if let Some(color) = radiance {
                        sum += color;
                    }
                }
                pixels.push(sum / settings.spp as f32);
            }
        }

        log::debug!("Render thread #{} finished", strip.index);
        StripResult {
            strip,
            pixels,
            log,
        }
    }
}

/// Copy a strip's pixels into their place in the target.
fn blit_strip(target: &mut RenderTarget, result: &StripResult) {
    let strip = result.strip;
    for (i, &color) in result.pixels.iter().enumerate() {
        let y = i as u32 / strip.width;
        let x = strip.x0 + i as u32 % strip.width;
        target.set(x, y, color);
    }
}
