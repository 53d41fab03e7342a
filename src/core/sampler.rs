// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f, Vector2i};

use std::error::Error;
use std::fmt;

/// Everything the camera needs to place one primary ray: the integer pixel,
/// the sub-pixel offset, the lens offset for depth of field and the shutter
/// time. Built once per requested sample, then immutable.
#[derive(Debug, Clone, Copy)]
pub struct CameraSample {
    pub pixel: Vector2i,
    pub pixel_uv: Vector2f,
    pub lens_uv: Vector2f,
    pub time: Float,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleError {
    /// The caller asked for a sample index at or beyond the configured
    /// sample count. This is a precondition violation, not a render error.
    IndexExhausted { index: usize, count: usize },
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleError::IndexExhausted { index, count } => {
                write!(f, "sample index {} out of range (sample count {})", index, count)
            }
        }
    }
}

impl Error for SampleError {}

/// Deterministic per-path sample source. One instance per worker; internal
/// dimension counters are sequential state and must never be shared.
///
/// Call order is the contract: `start_sample` pins (pixel, index) and resets
/// the dimension counters, after which every `next_1d`/`next_2d` call
/// consumes the next dimension of that path. The same seeds, pixel, index
/// and call order always reproduce the same values.
pub trait Sampler: Send {
    fn sample_count(&self) -> usize;

    /// Pure function of (seed pair, pixel, index); does not touch the
    /// dimension counters.
    fn camera_sample(&self, pixel: Vector2i, index: usize) -> CameraSample;

    fn start_sample(&mut self, pixel: Vector2i, index: usize) -> Result<(), SampleError>;

    fn next_1d(&mut self) -> Float;

    fn next_2d(&mut self) -> Vector2f;
}
