// Copyright @yucwang 2023

use crate::core::bsdf::{BSDF, BSDFEvalResult, LobeSample};
use crate::core::computation_node::ComputationNode;
use crate::math::constants::{Float, INV_PI, Vector2f, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{sample_cosine_hemisphere, sample_cosine_hemisphere_pdf};

pub struct DiffuseBSDF {
    albedo: RGBSpectrum,
}

impl DiffuseBSDF {
    pub fn new(albedo: RGBSpectrum) -> Self {
        Self { albedo }
    }
}

impl ComputationNode for DiffuseBSDF {
    fn to_string(&self) -> String {
        String::from("DiffuseBSDF")
    }
}

impl BSDF for DiffuseBSDF {
    fn eval(&self, wi: Vector3f, wo: Vector3f) -> BSDFEvalResult {
        let mut eval_result = BSDFEvalResult::default();
        // Reflection only; opposite hemispheres contribute nothing.
        if wi.z * wo.z <= 0.0 {
            return eval_result;
        }
        eval_result.value = self.albedo * INV_PI;
        eval_result.pdf = sample_cosine_hemisphere_pdf(wo.z.abs());
        eval_result
    }

    fn sample(&self, u1: Vector2f, _u2: Vector2f, wi: Vector3f,
              _eta: (Float, Float)) -> LobeSample {
        let mut wo = sample_cosine_hemisphere(&u1);
        if wi.z < 0.0 {
            wo.z = -wo.z;
        }
        LobeSample {
            wo,
            value: self.albedo * INV_PI,
            pdf: sample_cosine_hemisphere_pdf(wo.z.abs()),
            specular: false,
            transmission: false,
        }
    }
}

/* Tests for the diffuse BSDF */

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "expected {} ≈ {}", a, b);
    }

    #[test]
    fn test_sample_stays_in_incident_hemisphere() {
        let bsdf = DiffuseBSDF::new(RGBSpectrum::splat(0.8));
        let wi = Vector3f::new(0.3, 0.1, 0.95).normalize();
        for i in 0..16 {
            let u = Vector2f::new((i as f32 + 0.5) / 16.0, 0.37);
            let sample = bsdf.sample(u, Vector2f::zeros(), wi, (1.0, 1.0));
            assert!(sample.wo.z > 0.0);
            assert!(sample.pdf > 0.0);
            assert!(!sample.specular);
            assert!(!sample.transmission);
        }
    }

    #[test]
    fn test_eval_matches_lambert() {
        let bsdf = DiffuseBSDF::new(RGBSpectrum::new(0.2, 0.4, 0.6));
        let wi = Vector3f::new(0.0, 0.0, 1.0);
        let wo = Vector3f::new(0.0, 0.6, 0.8);
        let result = bsdf.eval(wi, wo);
        assert_close(result.value[0], 0.2 * INV_PI);
        assert_close(result.value[2], 0.6 * INV_PI);
        assert_close(result.pdf, 0.8 * INV_PI);
    }

    #[test]
    fn test_eval_opposite_hemispheres_is_zero() {
        let bsdf = DiffuseBSDF::new(RGBSpectrum::splat(0.5));
        let result = bsdf.eval(
            Vector3f::new(0.0, 0.0, 1.0),
            Vector3f::new(0.0, 0.6, -0.8),
        );
        assert!(result.value.is_black());
        assert_close(result.pdf, 0.0);
    }

    #[test]
    fn test_no_interior_medium() {
        let bsdf = DiffuseBSDF::new(RGBSpectrum::splat(0.5));
        assert!(bsdf.interior_medium().is_none());
    }
}
