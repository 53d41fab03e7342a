// Copyright @yucwang 2026

pub mod path;

use crate::math::constants::Float;

/// Veach power heuristic (beta = 2) for weighting one sampling strategy
/// against another.
pub fn power_heuristic(f: Float, g: Float) -> Float {
    let f2 = f * f;
    let g2 = g * g;
    if f2 + g2 > 0.0 {
        f2 / (f2 + g2)
    } else {
        0.0
    }
}
