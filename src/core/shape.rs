// Copyright @yucwang 2023

use crate::core::computation_node::ComputationNode;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

/// Geometric part of an intersection, before the scene attaches material
/// and emission.
#[derive(Debug, Clone, Copy)]
pub struct ShapeHit {
    pub p: Vector3f,
    pub geo_normal: Vector3f,
    pub uv: Vector2f,
    pub t: Float,
    pub part: u32,
}

/// A point drawn uniformly by area on a shape's surface.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceSample {
    pub p: Vector3f,
    pub normal: Vector3f,
    pub pdf_area: Float,
}

pub trait Shape: ComputationNode + Send + Sync {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<ShapeHit>;
    fn ray_intersection_t(&self, ray: &Ray3f) -> bool;
    fn sample(&self, u: &Vector2f) -> SurfaceSample;
    fn surface_area(&self) -> Float;
}
