// Copyright @yucwang 2023

use crate::core::bsdf::BSDF;
use crate::core::tangent_frame::ShadingFrame;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

/// Opaque identity of a scene surface. Interface-stack matching compares
/// this together with the part index, never positions or uv.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u32);

/// Nearest-intersection record handed from the scene query to the
/// integrator.
#[derive(Clone)]
pub struct SurfaceHit {
    pub surface: SurfaceId,
    pub part: u32,
    pub p: Vector3f,
    pub geo_normal: Vector3f,
    pub frame: ShadingFrame,
    pub uv: Vector2f,
    pub t: Float,
    pub le: RGBSpectrum,
    pub material: Option<Arc<dyn BSDF>>,
    /// Area pdf of the surface under emitter sampling, `None` when the
    /// surface is not an emitter.
    pub area_pdf: Option<Float>,
}

impl SurfaceHit {
    pub fn material(&self) -> Option<&dyn BSDF> {
        self.material.as_deref()
    }

    /// True when the geometric normal faces the given viewing direction
    /// (a direction pointing away from the surface toward the viewer).
    pub fn front_facing(&self, toward_viewer: &Vector3f) -> bool {
        self.geo_normal.dot(toward_viewer) > 0.0
    }
}
