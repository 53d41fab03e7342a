// Copyright @yucwang 2026

use crate::core::rng::{LcgRng, mix_bits};
use crate::core::sampler::{CameraSample, SampleError, Sampler};
use crate::math::constants::{Float, Vector2f, Vector2i};
use crate::samplers::lowdiscrepancy::sample02;

// Dimension tags. Camera samples own dimensions 0 and 1; per-bounce 2D
// requests start above them so a path never reuses a camera dimension.
const DIM_PIXEL: u32 = 0;
const DIM_TIME: u32 = 1;
const DIM_PATH_BASE: u32 = 2;

/// Seed-indexed deterministic sample source. Every pixel gets its own
/// scramble of the same (0,2)-sequence, so sequences are decorrelated
/// across pixels while each keeps its low-discrepancy structure.
pub struct SequenceSampler {
    seed: (u32, u32),
    sample_count: usize,
    pixel: Vector2i,
    index: u32,
    dim_2d: u32,
    rng: LcgRng,
}

impl SequenceSampler {
    pub fn new(seed: (u32, u32), sample_count: usize) -> Self {
        Self {
            seed,
            sample_count,
            pixel: Vector2i::new(0, 0),
            index: 0,
            dim_2d: DIM_PATH_BASE,
            rng: LcgRng::new(mix_bits(((seed.0 as u64) << 32) | seed.1 as u64)),
        }
    }

    fn key(&self, pixel: Vector2i, dim: u32) -> u64 {
        let s = ((self.seed.0 as u64) << 32) | self.seed.1 as u64;
        let p = ((pixel.x as u32 as u64) << 32) | pixel.y as u32 as u64;
        mix_bits(s ^ mix_bits(p ^ mix_bits(dim as u64)))
    }

    fn scramble_pair(&self, pixel: Vector2i, dim: u32) -> (u32, u32) {
        let k = self.key(pixel, dim);
        ((k >> 32) as u32, k as u32)
    }
}

impl Sampler for SequenceSampler {
    fn sample_count(&self) -> usize {
        self.sample_count
    }

    fn camera_sample(&self, pixel: Vector2i, index: usize) -> CameraSample {
        let point = sample02(index as u32, self.scramble_pair(pixel, DIM_PIXEL));
        // The same stratified point, axis-swapped, covers the lens.
        let lens_uv = Vector2f::new(point.y, point.x);
        let time = LcgRng::new(self.key(pixel, DIM_TIME) ^ mix_bits(index as u64)).next_f32();
        CameraSample { pixel, pixel_uv: point, lens_uv, time }
    }

    fn start_sample(&mut self, pixel: Vector2i, index: usize) -> Result<(), SampleError> {
        if index >= self.sample_count {
            return Err(SampleError::IndexExhausted { index, count: self.sample_count });
        }
        self.pixel = pixel;
        self.index = index as u32;
        self.dim_2d = DIM_PATH_BASE;
        self.rng = LcgRng::new(self.key(pixel, u32::MAX) ^ mix_bits(index as u64));
        Ok(())
    }

    fn next_1d(&mut self) -> Float {
        self.rng.next_f32()
    }

    fn next_2d(&mut self) -> Vector2f {
        let dim = self.dim_2d;
        self.dim_2d += 1;
        sample02(self.index, self.scramble_pair(self.pixel, dim))
    }
}

/* Tests for the sequence sampler */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_sample_pure_and_deterministic() {
        let sampler = SequenceSampler::new((17, 23), 64);
        let pixel = Vector2i::new(12, 34);
        for index in 0..64 {
            let a = sampler.camera_sample(pixel, index);
            let b = sampler.camera_sample(pixel, index);
            assert_eq!(a.pixel_uv, b.pixel_uv);
            assert_eq!(a.lens_uv, b.lens_uv);
            assert_eq!(a.time, b.time);
        }
    }

    #[test]
    fn test_camera_sample_components_in_unit_interval() {
        let sampler = SequenceSampler::new((1, 2), 256);
        for index in 0..256 {
            let s = sampler.camera_sample(Vector2i::new(3, 5), index);
            assert!(s.pixel_uv.x >= 0.0 && s.pixel_uv.x < 1.0);
            assert!(s.pixel_uv.y >= 0.0 && s.pixel_uv.y < 1.0);
            assert!(s.lens_uv.x >= 0.0 && s.lens_uv.x < 1.0);
            assert!(s.time >= 0.0 && s.time < 1.0);
        }
    }

    #[test]
    fn test_lens_is_axis_swapped_pixel_point() {
        let sampler = SequenceSampler::new((7, 9), 16);
        let s = sampler.camera_sample(Vector2i::new(0, 0), 5);
        assert_eq!(s.lens_uv.x, s.pixel_uv.y);
        assert_eq!(s.lens_uv.y, s.pixel_uv.x);
    }

    #[test]
    fn test_path_dimensions_replay_after_reset() {
        let mut sampler = SequenceSampler::new((5, 5), 8);
        sampler.start_sample(Vector2i::new(2, 2), 3).unwrap();
        let first: Vec<_> = (0..6).map(|_| sampler.next_2d()).collect();
        let ones: Vec<_> = (0..6).map(|_| sampler.next_1d()).collect();

        sampler.start_sample(Vector2i::new(2, 2), 3).unwrap();
        let replay: Vec<_> = (0..6).map(|_| sampler.next_2d()).collect();
        let ones_replay: Vec<_> = (0..6).map(|_| sampler.next_1d()).collect();

        assert_eq!(first, replay);
        assert_eq!(ones, ones_replay);
    }

    #[test]
    fn test_successive_dimensions_differ() {
        let mut sampler = SequenceSampler::new((11, 13), 8);
        sampler.start_sample(Vector2i::new(0, 0), 1).unwrap();
        let a = sampler.next_2d();
        let b = sampler.next_2d();
        let c = sampler.next_2d();
        assert!(a != b || b != c);
    }

    #[test]
    fn test_seed_pairs_decorrelate() {
        let a = SequenceSampler::new((100, 200), 32);
        let b = SequenceSampler::new((100, 201), 32);
        let pixel = Vector2i::new(8, 8);
        let differs = (0..32).any(|i| {
            a.camera_sample(pixel, i).pixel_uv != b.camera_sample(pixel, i).pixel_uv
        });
        assert!(differs);
    }

    #[test]
    fn test_pixels_decorrelate() {
        let sampler = SequenceSampler::new((1, 1), 32);
        let differs = (0..32).any(|i| {
            sampler.camera_sample(Vector2i::new(0, 0), i).pixel_uv
                != sampler.camera_sample(Vector2i::new(0, 1), i).pixel_uv
        });
        assert!(differs);
    }

    #[test]
    fn test_index_exhaustion_is_surfaced() {
        let mut sampler = SequenceSampler::new((0, 0), 4);
        assert!(sampler.start_sample(Vector2i::new(0, 0), 3).is_ok());
        assert_eq!(
            sampler.start_sample(Vector2i::new(0, 0), 4),
            Err(SampleError::IndexExhausted { index: 4, count: 4 })
        );
    }
}
