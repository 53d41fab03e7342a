// Copyright @yucwang 2026

use crate::core::sampler::{CameraSample, SampleError};
use crate::core::scene::WorldQuery;
use crate::core::sensor::Sensor;
use crate::math::constants::{Float, Vector2i};
use crate::math::spectrum::RGBSpectrum;

/// Outcome of one completed path: the camera sample it started from, the
/// radiance estimate and the auxiliary opacity signal.
#[derive(Debug, Clone, Copy)]
pub struct PathSample {
    pub camera: CameraSample,
    pub radiance: RGBSpectrum,
    pub opacity: Float,
}

/// A light-transport estimator with mutable per-path state (generator,
/// interface stack). One instance per worker; never shared.
pub trait Integrator: Send {
    /// Run one full path for `(pixel, index)` and return its estimate.
    /// Fails only on a caller precondition violation (sample index out of
    /// range); per-path sampling anomalies terminate the path with whatever
    /// radiance it has accumulated.
    fn render_sample(&mut self, scene: &dyn WorldQuery, sensor: &dyn Sensor,
                     pixel: Vector2i, index: usize) -> Result<PathSample, SampleError>;
}

/// Builds one fresh integrator per concurrent worker, each owning its own
/// generator and interface stack.
pub trait IntegratorFactory: Send + Sync {
    fn create_integrator(&self, worker_seed: (u32, u32)) -> Box<dyn Integrator>;

    /// Hard bounce cutoff; lets callers size buffers and statistics up
    /// front.
    fn max_sample_depth(&self) -> u32;

    fn samples_per_pixel(&self) -> usize;
}
