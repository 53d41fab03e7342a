// Copyright @yucwang 2026

use crate::core::integrator::{IntegratorFactory, PathSample};
use crate::core::scene::WorldQuery;
use crate::core::sensor::Sensor;
use crate::math::bitmap::Bitmap;
use crate::math::constants::Vector2i;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

pub use super::renderer::Renderer;

const BLOCK_SIZE: usize = 32;

/// Tile-parallel renderer. Workers pull pixel blocks off a shared counter;
/// every worker owns one integrator built by the factory, so no sampler or
/// interface-stack state ever crosses a thread. Completed blocks travel
/// over a channel to a single gather loop, which is the only writer of the
/// sensor — per-pixel results are independent of the worker count because
/// all stochastic state is keyed on (seed pair, pixel, sample index).
pub struct BlockRenderer {
    factory: Box<dyn IntegratorFactory>,
    seed: (u32, u32),
}

impl BlockRenderer {
    pub fn new(factory: Box<dyn IntegratorFactory>, seed: (u32, u32)) -> Self {
        Self { factory, seed }
    }
}

impl Renderer for BlockRenderer {
    fn render(&self, scene: &dyn WorldQuery, sensor: &mut dyn Sensor) -> Bitmap {
        let resolution = sensor.resolution();
        let (width, height) = (resolution.x as usize, resolution.y as usize);
        if width == 0 || height == 0 {
            return Bitmap::new(0, 0);
        }

        let spp = match self.factory.samples_per_pixel() {
            0 => 1,
            v => v,
        };

        let blocks_x = (width + BLOCK_SIZE - 1) / BLOCK_SIZE;
        let blocks_y = (height + BLOCK_SIZE - 1) / BLOCK_SIZE;
        let total_blocks = blocks_x * blocks_y;

        let progress = ProgressBar::new(total_blocks as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} blocks")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let next_block = Arc::new(AtomicUsize::new(0));
        let thread_count = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let (tx, rx) = mpsc::channel::<Vec<PathSample>>();
        let sensor_ref: &dyn Sensor = sensor;
        let mut finished: Vec<Vec<PathSample>> = Vec::with_capacity(total_blocks);

        thread::scope(|scope| {
            for _ in 0..thread_count {
                let next_block = Arc::clone(&next_block);
                let tx = tx.clone();
                let mut integrator = self.factory.create_integrator(self.seed);
                scope.spawn(move || {
                    loop {
                        let block_index = next_block.fetch_add(1, Ordering::Relaxed);
                        if block_index >= total_blocks {
                            break;
                        }

                        let bx = block_index % blocks_x;
                        let by = block_index / blocks_x;
                        let x0 = bx * BLOCK_SIZE;
                        let y0 = by * BLOCK_SIZE;
                        let x1 = (x0 + BLOCK_SIZE).min(width);
                        let y1 = (y0 + BLOCK_SIZE).min(height);

                        let mut block = Vec::with_capacity((x1 - x0) * (y1 - y0) * spp);
                        for y in y0..y1 {
                            for x in x0..x1 {
                                let pixel = Vector2i::new(x as i32, y as i32);
                                for index in 0..spp {
                                    match integrator.render_sample(scene, sensor_ref, pixel, index) {
                                        Ok(sample) => block.push(sample),
                                        Err(e) => {
                                            log::error!("dropping sample {:?}/{}: {}", pixel, index, e);
                                        }
                                    }
                                }
                            }
                        }
                        if tx.send(block).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for _ in 0..total_blocks {
                if let Ok(block) = rx.recv() {
                    finished.push(block);
                    progress.inc(1);
                }
            }
        });
        progress.finish_and_clear();

        for block in finished {
            for sample in block {
                sensor.add_sample(sample.camera.pixel, &sample.camera,
                                  sample.radiance, sample.opacity);
            }
        }
        sensor.develop()
    }
}
