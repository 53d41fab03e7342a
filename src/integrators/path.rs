// Copyright @yucwang 2026

use crate::core::integrator::{Integrator, IntegratorFactory, PathSample};
use crate::core::interface_stack::{InterfaceEntry, InterfaceStack};
use crate::core::sampler::{SampleError, Sampler};
use crate::core::scene::WorldQuery;
use crate::core::sensor::Sensor;
use crate::integrators::power_heuristic;
use crate::math::constants::{EPSILON, Float, Vector2i};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use crate::samplers::sequence::SequenceSampler;

const RR_SURVIVAL_MIN: Float = 0.05;
const RR_SURVIVAL_MAX: Float = 0.95;

/// Russian-roulette survival probability: proportional to the strongest
/// throughput channel, clamped away from both certain death and certain
/// survival so the 1/q rescale stays bounded.
pub fn survival_probability(throughput: &RGBSpectrum) -> Float {
    throughput.max_channel().max(RR_SURVIVAL_MIN).min(RR_SURVIVAL_MAX)
}

/// Unidirectional surface path tracer with next-event estimation,
/// multiple-importance sampling and nested-medium tracking. One instance
/// per worker; the sampler and interface stack inside are sequential
/// per-path state.
pub struct PathIntegrator {
    max_depth: u32,
    rr_depth: u32,
    sampler: Box<dyn Sampler>,
    stack: InterfaceStack,
}

impl PathIntegrator {
    pub fn new(max_depth: u32, rr_depth: u32,
               sampler: Box<dyn Sampler>, stack: InterfaceStack) -> Self {
        Self { max_depth, rr_depth, sampler, stack }
    }

    fn trace_path(&mut self, scene: &dyn WorldQuery, mut ray: Ray3f) -> (RGBSpectrum, Float) {
        let mut radiance = RGBSpectrum::default();
        let mut throughput = RGBSpectrum::splat(1.0);
        let mut opacity = 0.0;
        // `None` after camera and specular events: emitter hits then count
        // in full because next-event estimation had no chance there.
        let mut prev_bsdf_pdf: Option<Float> = None;

        for depth in 0..self.max_depth {
            let hit = match scene.ray_intersection(&ray) {
                Some(hit) => hit,
                None => {
                    radiance += (throughput * scene.background(&ray.dir())).sanitized();
                    break;
                }
            };
            if depth == 0 {
                opacity = 1.0;
            }

            // Beer-Lambert attenuation over the segment just travelled
            // through the innermost open medium.
            if let Some(entry) = self.stack.top() {
                if !entry.absorption.is_black() {
                    throughput *= entry.absorption.transmittance(hit.t);
                }
            }

            let toward_viewer = -ray.dir();

            if !hit.le.is_black() && hit.front_facing(&toward_viewer) {
                let weight = match prev_bsdf_pdf {
                    None => 1.0,
                    Some(bsdf_pdf) => {
                        power_heuristic(bsdf_pdf, scene.direct_pdf(&hit, ray.origin()))
                    }
                };
                radiance += (throughput * hit.le * weight).sanitized();
            }

            let material = match hit.material() {
                Some(material) => material,
                None => break,
            };
            let frame = hit.frame;
            let wi = frame.to_local(&toward_viewer);

            // Next-event estimation. Delta materials never pass an eval, so
            // their shadow rays (and sampler dimensions) are skipped; the
            // skip is a deterministic function of the path.
            if !material.is_delta() {
                let u_pick = self.sampler.next_1d();
                let u_light = self.sampler.next_2d();
                if let Some(direct) = scene.sample_direct(hit.p, ray.time, u_pick, u_light) {
                    let wo = frame.to_local(&direct.wi);
                    let eval = material.eval(wi, wo);
                    let value = eval.value.sanitized();
                    if !value.is_black() && eval.pdf.is_finite() {
                        let side = if direct.wi.dot(&hit.geo_normal) >= 0.0 { 1.0 } else { -1.0 };
                        let shadow = Ray3f::new(
                            hit.p + hit.geo_normal * (EPSILON * side),
                            direct.wi,
                            Some(EPSILON),
                            Some(direct.distance - 2.0 * EPSILON),
                        ).with_time(ray.time);
                        if !scene.occluded(&shadow) {
                            let weight = power_heuristic(direct.pdf, eval.pdf.max(0.0));
                            let contribution = throughput * value * direct.radiance
                                * (wo.z.abs() * weight / direct.pdf);
                            radiance += contribution.sanitized();
                        }
                    }
                }
            }

            // Resolve the refractive indices of this crossing from the
            // interface stack before drawing the continuation.
            let interior = material.interior_medium();
            let eta = match interior {
                Some(medium) if wi.z < 0.0 => {
                    // Arriving from inside: the far side is whatever
                    // remains once this boundary's entry is gone.
                    (medium.ior, self.stack.ior_excluding(hit.surface, hit.part))
                }
                Some(medium) => (self.stack.top_ior(), medium.ior),
                None => (1.0, 1.0),
            };

            let u1 = self.sampler.next_2d();
            let u2 = self.sampler.next_2d();
            let lobe = material.sample(u1, u2, wi, eta);

            // Zero, negative or NaN density is a sampling dead end, not an
            // error.
            if !(lobe.pdf > 0.0) || !lobe.pdf.is_finite() {
                break;
            }
            let value = lobe.value.sanitized();
            if value.is_black() {
                break;
            }

            throughput *= value * (lobe.wo.z.abs() / lobe.pdf);
            prev_bsdf_pdf = if lobe.specular { None } else { Some(lobe.pdf) };

            if lobe.transmission {
                if wi.z >= 0.0 {
                    if let Some(medium) = interior {
                        self.stack.push(InterfaceEntry::new(
                            hit.surface, hit.part, hit.uv, medium.ior, medium.absorption,
                        ));
                    }
                } else if !self.stack.remove(hit.surface, hit.part) {
                    // Inconsistent transmissive topology (non-manifold or
                    // overlapping geometry); keep rendering with whatever
                    // is still on the stack.
                    log::warn!("transmissive exit with no open entry for surface {:?}",
                               hit.surface);
                }
            }

            if depth + 1 >= self.rr_depth {
                let q = survival_probability(&throughput);
                if self.sampler.next_1d() >= q {
                    break;
                }
                throughput = throughput / q;
            }

            let dir = frame.to_world(&lobe.wo).normalize();
            let side = if dir.dot(&hit.geo_normal) >= 0.0 { 1.0 } else { -1.0 };
            ray = Ray3f::new(hit.p + hit.geo_normal * (EPSILON * side), dir, None, None)
                .with_time(ray.time);
        }

        (radiance, opacity)
    }
}

impl Integrator for PathIntegrator {
    fn render_sample(&mut self, scene: &dyn WorldQuery, sensor: &dyn Sensor,
                     pixel: Vector2i, index: usize) -> Result<PathSample, SampleError> {
        self.sampler.start_sample(pixel, index)?;
        self.stack.clear();

        let camera = self.sampler.camera_sample(pixel, index);
        let ray = sensor.sample_ray(&camera);
        let (radiance, opacity) = self.trace_path(scene, ray);

        Ok(PathSample { camera, radiance, opacity })
    }
}

/// Builds one integrator per worker. All workers share the same seed pair;
/// decorrelation across pixels and samples happens inside the sequence
/// sampler, which keeps the render deterministic for any worker count.
pub struct PathIntegratorFactory {
    max_depth: u32,
    rr_depth: u32,
    samples_per_pixel: usize,
    ambient_ior: Float,
}

impl PathIntegratorFactory {
    pub fn new(max_depth: u32, rr_depth: u32, samples_per_pixel: usize) -> Self {
        Self { max_depth, rr_depth, samples_per_pixel, ambient_ior: 1.0 }
    }

    pub fn with_ambient_ior(mut self, ambient_ior: Float) -> Self {
        self.ambient_ior = ambient_ior;
        self
    }
}

impl IntegratorFactory for PathIntegratorFactory {
    fn create_integrator(&self, worker_seed: (u32, u32)) -> Box<dyn Integrator> {
        Box::new(PathIntegrator::new(
            self.max_depth,
            self.rr_depth,
            Box::new(SequenceSampler::new(worker_seed, self.samples_per_pixel)),
            InterfaceStack::new(self.ambient_ior),
        ))
    }

    fn max_sample_depth(&self) -> u32 {
        self.max_depth
    }

    fn samples_per_pixel(&self) -> usize {
        self.samples_per_pixel
    }
}

/* Tests for the path integrator */
