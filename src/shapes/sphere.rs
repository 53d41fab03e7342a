// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::shape::{Shape, ShapeHit, SurfaceSample};
use crate::math::constants::{Float, PI, Vector2f, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::warp::sample_uniform_hemisphere;

pub struct Sphere {
    center: Vector3f,
    radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius }
    }

    fn nearest_t(&self, ray: &Ray3f) -> Option<Float> {
        let oc = ray.origin() - self.center;
        let b = 2.0 * oc.dot(&ray.dir());
        let c = oc.norm_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();

        // Nearer root first; fall back to the far one when the origin is
        // inside the sphere.
        let t0 = 0.5 * (-b - root);
        if ray.test_segment(t0) {
            return Some(t0);
        }
        let t1 = 0.5 * (-b + root);
        if ray.test_segment(t1) {
            return Some(t1);
        }
        None
    }

    fn uv_at(&self, normal: &Vector3f) -> Vector2f {
        let mut phi = normal.y.atan2(normal.x);
        if phi < 0.0 {
            phi += 2.0 * PI;
        }
        let theta = normal.z.max(-1.0).min(1.0).acos();
        Vector2f::new(phi / (2.0 * PI), theta / PI)
    }
}

impl ComputationNode for Sphere {
    fn to_string(&self) -> String {
        format!("Sphere [radius={}]", self.radius)
    }
}

impl Shape for Sphere {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<ShapeHit> {
        let t = self.nearest_t(ray)?;
        let p = ray.at(t);
        let geo_normal = (p - self.center) / self.radius;
        Some(ShapeHit {
            p,
            geo_normal,
            uv: self.uv_at(&geo_normal),
            t,
            part: 0,
        })
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.nearest_t(ray).is_some()
    }

    fn sample(&self, u: &Vector2f) -> SurfaceSample {
        // Uniform over the full sphere: mirror the hemisphere warp with the
        // leftover stratum of u.x.
        let flip = u.x >= 0.5;
        let u_folded = Vector2f::new((u.x * 2.0) % 1.0, u.y);
        let mut normal = sample_uniform_hemisphere(&u_folded);
        if flip {
            normal.z = -normal.z;
        }
        SurfaceSample {
            p: self.center + normal * self.radius,
            normal,
            pdf_area: 1.0 / self.surface_area(),
        }
    }

    fn surface_area(&self) -> Float {
        4.0 * PI * self.radius * self.radius
    }
}

/* Tests for the sphere */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hits_front_of_sphere() {
        let sphere = Sphere::new(Vector3f::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let hit = sphere.ray_intersection(&ray).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-4);
        assert!((hit.geo_normal.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_ray_from_inside_hits_far_wall() {
        let sphere = Sphere::new(Vector3f::zeros(), 1.0);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, 0.0, 0.0), None, None);
        let hit = sphere.ray_intersection(&ray).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-4);
        // Geometric normal still points outward.
        assert!((hit.geo_normal.x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_miss_returns_none() {
        let sphere = Sphere::new(Vector3f::new(0.0, 5.0, -5.0), 1.0);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0), None, None);
        assert!(sphere.ray_intersection(&ray).is_none());
        assert!(!sphere.ray_intersection_t(&ray));
    }

    #[test]
    fn test_sample_lies_on_surface() {
        let sphere = Sphere::new(Vector3f::new(1.0, 2.0, 3.0), 2.0);
        for i in 0..8 {
            for j in 0..8 {
                let u = Vector2f::new((i as Float + 0.5) / 8.0, (j as Float + 0.5) / 8.0);
                let s = sphere.sample(&u);
                assert!(((s.p - Vector3f::new(1.0, 2.0, 3.0)).norm() - 2.0).abs() < 1e-4);
                assert!((s.pdf_area - 1.0 / sphere.surface_area()).abs() < 1e-6);
            }
        }
    }
}
