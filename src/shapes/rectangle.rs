// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::shape::{Shape, ShapeHit, SurfaceSample};
use crate::math::constants::{EPSILON, Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

/// Planar parallelogram spanned by two edge vectors. The normal follows
/// `edge_u x edge_v`.
pub struct Rectangle {
    origin: Vector3f,
    edge_u: Vector3f,
    edge_v: Vector3f,
    normal: Vector3f,
    area: Float,
}

impl Rectangle {
    pub fn new(origin: Vector3f, edge_u: Vector3f, edge_v: Vector3f) -> Self {
        let cross = edge_u.cross(&edge_v);
        let area = cross.norm();
        let normal = if area > 0.0 {
            cross / area
        } else {
            Vector3f::new(0.0, 0.0, 1.0)
        };
        Self { origin, edge_u, edge_v, normal, area }
    }

    fn intersect_plane(&self, ray: &Ray3f) -> Option<(Float, Vector2f)> {
        let denom = ray.dir().dot(&self.normal);
        if denom.abs() < EPSILON {
            return None;
        }

        let t = (self.origin - ray.origin()).dot(&self.normal) / denom;
        if !ray.test_segment(t) {
            return None;
        }

        let local = ray.at(t) - self.origin;
        let uu = self.edge_u.norm_squared();
        let vv = self.edge_v.norm_squared();
        let u = local.dot(&self.edge_u) / uu;
        let v = local.dot(&self.edge_v) / vv;
        if u < 0.0 || u > 1.0 || v < 0.0 || v > 1.0 {
            return None;
        }
        Some((t, Vector2f::new(u, v)))
    }
}

impl ComputationNode for Rectangle {
    fn to_string(&self) -> String {
        format!("Rectangle [area={}]", self.area)
    }
}

impl Shape for Rectangle {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<ShapeHit> {
        let (t, uv) = self.intersect_plane(ray)?;
        Some(ShapeHit {
            p: ray.at(t),
            geo_normal: self.normal,
            uv,
            t,
            part: 0,
        })
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.intersect_plane(ray).is_some()
    }

    fn sample(&self, u: &Vector2f) -> SurfaceSample {
        SurfaceSample {
            p: self.origin + self.edge_u * u.x + self.edge_v * u.y,
            normal: self.normal,
            pdf_area: if self.area > 0.0 { 1.0 / self.area } else { 0.0 },
        }
    }

    fn surface_area(&self) -> Float {
        self.area
    }
}

/* Tests for the rectangle */

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_rect_at_z(z: Float) -> Rectangle {
        Rectangle::new(
            Vector3f::new(-0.5, -0.5, z),
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_center_hit_and_uv() {
        let rect = unit_rect_at_z(-2.0);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let hit = rect.ray_intersection(&ray).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-5);
        assert!((hit.uv.x - 0.5).abs() < 1e-5);
        assert!((hit.uv.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_misses_outside_bounds() {
        let rect = unit_rect_at_z(-2.0);
        let ray = Ray3f::new(Vector3f::new(2.0, 0.0, 0.0),
                             Vector3f::new(0.0, 0.0, -1.0), None, None);
        assert!(rect.ray_intersection(&ray).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let rect = unit_rect_at_z(-2.0);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, 0.0, 0.0), None, None);
        assert!(rect.ray_intersection(&ray).is_none());
    }

    #[test]
    fn test_sample_covers_surface() {
        let rect = unit_rect_at_z(0.0);
        let s = rect.sample(&Vector2f::new(0.25, 0.75));
        assert!((s.p.x - (-0.25)).abs() < 1e-5);
        assert!((s.p.y - 0.25).abs() < 1e-5);
        assert!((s.pdf_area - 1.0).abs() < 1e-5);
    }
}
