// Copyright @yucwang 2026

use crate::math::constants::{Float, ONE_MINUS_EPSILON};

/// Plain 64-bit LCG. Fast, stateful, not low-discrepancy; used wherever
/// stratification matters less (time, roulette decisions).
pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    pub fn next_f32(&mut self) -> Float {
        let v = (self.next_u32() as Float) / (u32::MAX as Float + 1.0);
        v.min(ONE_MINUS_EPSILON)
    }
}

/// SplitMix64 finalizer. Decorrelates nearby integer keys; used to derive
/// scramble words and per-path LCG seeds from (seed pair, pixel, dimension).
pub fn mix_bits(mut v: u64) -> u64 {
    v = v.wrapping_add(0x9e3779b97f4a7c15);
    v = (v ^ (v >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    v = (v ^ (v >> 27)).wrapping_mul(0x94d049bb133111eb);
    v ^ (v >> 31)
}

/* Tests for the rng */
