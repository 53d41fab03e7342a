// Copyright @yucwang 2026

use crate::core::bsdf::BSDF;
use crate::core::interaction::{SurfaceHit, SurfaceId};
use crate::core::shape::Shape;
use crate::core::tangent_frame::ShadingFrame;
use crate::math::constants::{EPSILON, Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

/// One next-event-estimation candidate: a direction toward an emitter, the
/// radiance arriving along it and the solid-angle pdf of having chosen it
/// (emitter pick probability already folded in).
#[derive(Debug, Clone, Copy)]
pub struct DirectSample {
    pub wi: Vector3f,
    pub distance: Float,
    pub radiance: RGBSpectrum,
    pub pdf: Float,
}

/// Nearest-intersection and occlusion queries. Blocking, callable from any
/// worker thread.
pub trait SceneQuery: Send + Sync {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceHit>;
    fn occluded(&self, ray: &Ray3f) -> bool;

    /// Radiance arriving from an escaped direction.
    fn background(&self, _dir: &Vector3f) -> RGBSpectrum {
        RGBSpectrum::default()
    }
}

/// Emitter sampling for next-event estimation.
pub trait EmitterSampler: Send + Sync {
    fn sample_direct(&self, p: Vector3f, time: Float,
                     u_pick: Float, u_pos: Vector2f) -> Option<DirectSample>;

    /// Solid-angle pdf that next-event estimation from `origin` would have
    /// produced the emitter surface in `hit`. Zero for non-emitters; feeds
    /// the MIS weight of BSDF-sampled emitter hits.
    fn direct_pdf(&self, hit: &SurfaceHit, origin: Vector3f) -> Float;
}

/// The integrator depends only on the combined capability contract, never
/// on a concrete scene type.
pub trait WorldQuery: SceneQuery + EmitterSampler {}

impl<T: SceneQuery + EmitterSampler> WorldQuery for T {}

pub struct SceneObject {
    pub shape: Arc<dyn Shape>,
    pub material: Arc<dyn BSDF>,
    pub emission: RGBSpectrum,
    pub name: Option<String>,
}

impl SceneObject {
    pub fn new(shape: Arc<dyn Shape>, material: Arc<dyn BSDF>) -> Self {
        Self { shape, material, emission: RGBSpectrum::default(), name: None }
    }

    pub fn with_emission(shape: Arc<dyn Shape>, material: Arc<dyn BSDF>,
                         emission: RGBSpectrum) -> Self {
        Self { shape, material, emission, name: None }
    }

    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }
}

/// Linear-scan scene. Acceleration structures live behind the same
/// `SceneQuery` contract and are interchangeable with this one.
pub struct Scene {
    objects: Vec<SceneObject>,
    emitters: Vec<usize>,
    background: RGBSpectrum,
}

impl Scene {
    pub fn with_objects(objects: Vec<SceneObject>) -> Self {
        let emitters = objects.iter().enumerate()
            .filter(|(_, o)| !o.emission.is_black())
            .map(|(i, _)| i)
            .collect();
        Self { objects, emitters, background: RGBSpectrum::default() }
    }

    pub fn with_background(mut self, background: RGBSpectrum) -> Self {
        self.background = background;
        self
    }

    pub fn object(&self, id: SurfaceId) -> Option<&SceneObject> {
        self.objects.get(id.0 as usize)
    }

    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    fn to_surface_hit(&self, index: usize, hit: crate::core::shape::ShapeHit) -> SurfaceHit {
        let object = &self.objects[index];
        let area_pdf = if object.emission.is_black() {
            None
        } else {
            let area = object.shape.surface_area();
            if area > 0.0 { Some(1.0 / area) } else { None }
        };
        SurfaceHit {
            surface: SurfaceId(index as u32),
            part: hit.part,
            p: hit.p,
            geo_normal: hit.geo_normal,
            frame: ShadingFrame::from_normal(hit.geo_normal),
            uv: hit.uv,
            t: hit.t,
            le: object.emission,
            material: Some(object.material.clone()),
            area_pdf,
        }
    }
}

impl SceneQuery for Scene {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceHit> {
        let mut nearest: Option<(usize, crate::core::shape::ShapeHit)> = None;
        let mut max_t = ray.max_t;
        for (index, object) in self.objects.iter().enumerate() {
            if let Some(hit) = object.shape.ray_intersection(ray) {
                if hit.t >= ray.min_t && hit.t <= max_t {
                    max_t = hit.t;
                    nearest = Some((index, hit));
                }
            }
        }
        nearest.map(|(index, hit)| self.to_surface_hit(index, hit))
    }

    fn occluded(&self, ray: &Ray3f) -> bool {
        self.objects.iter().any(|object| object.shape.ray_intersection_t(ray))
    }

    fn background(&self, _dir: &Vector3f) -> RGBSpectrum {
        self.background
    }
}

impl EmitterSampler for Scene {
    fn sample_direct(&self, p: Vector3f, _time: Float,
                     u_pick: Float, u_pos: Vector2f) -> Option<DirectSample> {
        if self.emitters.is_empty() {
            return None;
        }
        let pick = ((u_pick * self.emitters.len() as Float) as usize)
            .min(self.emitters.len() - 1);
        let index = self.emitters[pick];
        let object = &self.objects[index];
        let pick_pdf = 1.0 / self.emitters.len() as Float;

        let sample = object.shape.sample(&u_pos);
        if sample.pdf_area <= 0.0 {
            return None;
        }

        let to_light = sample.p - p;
        let dist2 = to_light.norm_squared();
        if dist2 <= EPSILON * EPSILON {
            return None;
        }
        let distance = dist2.sqrt();
        let wi = to_light / distance;

        // Convert the area pdf to solid angle at the receiving point.
        let cos_light = sample.normal.dot(&(-wi));
        if cos_light <= 0.0 {
            return None;
        }
        let pdf = sample.pdf_area * dist2 / cos_light * pick_pdf;
        if !pdf.is_finite() || pdf <= 0.0 {
            return None;
        }

        Some(DirectSample { wi, distance, radiance: object.emission, pdf })
    }

    fn direct_pdf(&self, hit: &SurfaceHit, origin: Vector3f) -> Float {
        let area_pdf = match hit.area_pdf {
            Some(pdf) => pdf,
            None => return 0.0,
        };
        if self.emitters.is_empty() {
            return 0.0;
        }
        let to_light = hit.p - origin;
        let dist2 = to_light.norm_squared();
        if dist2 <= 0.0 {
            return 0.0;
        }
        let wi = to_light / dist2.sqrt();
        let cos_light = hit.geo_normal.dot(&(-wi));
        if cos_light <= 0.0 {
            return 0.0;
        }
        area_pdf * dist2 / cos_light / self.emitters.len() as Float
    }
}

/* Tests for the linear scene */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::diffuse::DiffuseBSDF;
    use crate::shapes::rectangle::Rectangle;
    use crate::shapes::sphere::Sphere;

    fn unit_sphere_at(center: Vector3f) -> Arc<Sphere> {
        Arc::new(Sphere::new(center, 1.0))
    }

    fn grey() -> Arc<DiffuseBSDF> {
        Arc::new(DiffuseBSDF::new(RGBSpectrum::splat(0.5)))
    }

    #[test]
    fn test_nearest_intersection_wins() {
        let scene = Scene::with_objects(vec![
            SceneObject::new(unit_sphere_at(Vector3f::new(0.0, 0.0, -10.0)), grey()),
            SceneObject::new(unit_sphere_at(Vector3f::new(0.0, 0.0, -5.0)), grey()),
        ]);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let hit = scene.ray_intersection(&ray).unwrap();
        assert_eq!(hit.surface, SurfaceId(1));
        assert!((hit.t - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_occlusion_respects_segment() {
        let scene = Scene::with_objects(vec![
            SceneObject::new(unit_sphere_at(Vector3f::new(0.0, 0.0, -5.0)), grey()),
        ]);
        let blocked = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0),
                                 Some(EPSILON), Some(10.0));
        let short = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0),
                               Some(EPSILON), Some(2.0));
        assert!(scene.occluded(&blocked));
        assert!(!scene.occluded(&short));
    }

    #[test]
    fn test_direct_sampling_of_area_emitter() {
        // Edge order chosen so the normal faces -z, toward the receiver.
        let light = Rectangle::new(
            Vector3f::new(-1.0, -1.0, 4.0),
            Vector3f::new(0.0, 2.0, 0.0),
            Vector3f::new(2.0, 0.0, 0.0),
        );
        let scene = Scene::with_objects(vec![
            SceneObject::with_emission(Arc::new(light), grey(), RGBSpectrum::splat(5.0)),
        ]);
        assert_eq!(scene.emitter_count(), 1);

        let sample = scene
            .sample_direct(Vector3f::zeros(), 0.0, 0.3, Vector2f::new(0.5, 0.5))
            .unwrap();
        assert!(sample.pdf > 0.0);
        assert!(sample.wi.z > 0.0);
        assert!((sample.distance - 4.0).abs() < 1e-3);
        assert_eq!(sample.radiance, RGBSpectrum::splat(5.0));
    }

    #[test]
    fn test_direct_pdf_zero_for_non_emitter() {
        let scene = Scene::with_objects(vec![
            SceneObject::new(unit_sphere_at(Vector3f::new(0.0, 0.0, -5.0)), grey()),
        ]);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let hit = scene.ray_intersection(&ray).unwrap();
        assert_eq!(scene.direct_pdf(&hit, Vector3f::zeros()), 0.0);
    }
}
