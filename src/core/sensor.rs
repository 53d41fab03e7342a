// Copyright @yucwang 2026

use crate::core::sampler::CameraSample;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector2i};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Camera plus accumulation film. `add_sample` is called once per completed
/// path; write concurrency is the caller's discipline — the block renderer
/// funnels all writes through its single gather loop.
pub trait Sensor: Send + Sync {
    /// Generate the primary ray for one camera sample.
    fn sample_ray(&self, sample: &CameraSample) -> Ray3f;

    fn resolution(&self) -> Vector2i;

    fn add_sample(&mut self, pixel: Vector2i, sample: &CameraSample,
                  radiance: RGBSpectrum, opacity: Float);

    /// Averaged film contents.
    fn develop(&self) -> Bitmap;

    fn describe(&self) -> String {
        String::from("Sensor")
    }
}
