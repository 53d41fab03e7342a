// Copyright @yucwang 2026

use crate::math::constants::{Float, ONE_MINUS_EPSILON, Vector2f};

/// Base-2 radical inverse of `i`, XOR-scrambled: bit reversal folds the
/// integer across the binary point, producing the van der Corput sequence.
pub fn van_der_corput_u32(i: u32, scramble: u32) -> u32 {
    i.reverse_bits() ^ scramble
}

/// Second axis of the (0,2)-sequence: Sobol' direction numbers for the
/// first nontrivial dimension, applied bit by bit, XOR-scrambled.
pub fn sobol_u32(mut i: u32, scramble: u32) -> u32 {
    let mut r = scramble;
    let mut v: u32 = 1 << 31;
    while i != 0 {
        if i & 1 == 1 {
            r ^= v;
        }
        i >>= 1;
        v ^= v >> 1;
    }
    r
}

/// Map the high bits of a 32-bit sample word into [0, 1).
pub fn u32_to_unit_float(v: u32) -> Float {
    let f = (v >> 8) as Float * (1.0 / (1u32 << 24) as Float);
    f.min(ONE_MINUS_EPSILON)
}

/// The `index`-th point of a scrambled (0,2)-sequence. For a fixed scramble
/// pair the point set over indices 0..N is stratified on every elementary
/// interval of area 1/N (N a power of two).
pub fn sample02(index: u32, scramble: (u32, u32)) -> Vector2f {
    Vector2f::new(
        u32_to_unit_float(van_der_corput_u32(index, scramble.0)),
        u32_to_unit_float(sobol_u32(index, scramble.1)),
    )
}

/* Tests for the low-discrepancy primitives */
