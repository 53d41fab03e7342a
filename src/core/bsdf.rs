// Copyright @yucwang 2023

use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::spectrum::RGBSpectrum;

// Definitions of types used in BSDF sampling and eval
// processes. All directions live in the local shading frame (z up);
// `wi` points toward the viewer, `wo` is the scattered direction.
pub type BSDFValue = RGBSpectrum;

#[derive(Debug, PartialEq)]
pub struct BSDFEvalResult {
    pub value: BSDFValue,
    pub pdf: Float,
}

impl Default for BSDFEvalResult {
    fn default() -> Self {
        Self {
            value: RGBSpectrum::default(),
            pdf: 0.0,
        }
    }
}

/// One importance-sampled scattering event. `value` carries the BSDF value
/// without the cosine term; a zero pdf marks a sampling dead end.
#[derive(Debug, PartialEq)]
pub struct LobeSample {
    pub wo: Vector3f,
    pub value: BSDFValue,
    pub pdf: Float,
    pub specular: bool,
    pub transmission: bool,
}

impl Default for LobeSample {
    fn default() -> Self {
        Self {
            wo: Vector3f::zeros(),
            value: RGBSpectrum::default(),
            pdf: 0.0,
            specular: false,
            transmission: false,
        }
    }
}

/// What a transmissive surface encloses. Captured into the interface stack
/// when a path enters the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediumProperties {
    pub ior: Float,
    pub absorption: RGBSpectrum,
}

pub trait BSDF: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// True when every lobe is a delta distribution; next-event estimation
    /// skips such surfaces because `eval` can never match a sampled light
    /// direction.
    fn is_delta(&self) -> bool {
        false
    }

    fn eval(&self, wi: Vector3f, wo: Vector3f) -> BSDFEvalResult;

    /// Draw a scattered direction. `eta` is the (exterior, interior) pair of
    /// refractive indices for the crossing the integrator resolved from its
    /// interface stack; opaque materials ignore it.
    fn sample(&self, u1: Vector2f, u2: Vector2f, wi: Vector3f, eta: (Float, Float)) -> LobeSample;

    /// `Some` for transmissive materials that bound a medium.
    fn interior_medium(&self) -> Option<MediumProperties> {
        None
    }
}
