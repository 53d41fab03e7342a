// Copyright @yucwang 2026

use crate::core::sampler::CameraSample;
use crate::core::sensor::Sensor;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector2i, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::sample_uniform_disk_concentric;

/// Thin-lens perspective camera with an accumulation film. A zero aperture
/// radius degenerates to a pinhole and ignores the lens sample.
pub struct PerspectiveCamera {
    origin: Vector3f,
    forward: Vector3f,
    right: Vector3f,
    up: Vector3f,
    tan_half_fov_y: Float,
    aspect: Float,
    aperture_radius: Float,
    focal_distance: Float,
    width: usize,
    height: usize,
    accum: Bitmap,
    weights: Vec<Float>,
    alpha: Vec<Float>,
}

impl PerspectiveCamera {
    pub fn new(origin: Vector3f,
               target: Vector3f,
               up: Vector3f,
               fov_y_radians: Float,
               width: usize,
               height: usize) -> Self {
        let forward = (target - origin).normalize();
        let right = forward.cross(&up).normalize();
        let up = right.cross(&forward).normalize();

        Self {
            origin,
            forward,
            right,
            up,
            tan_half_fov_y: (0.5 * fov_y_radians).tan(),
            aspect: width as Float / height as Float,
            aperture_radius: 0.0,
            focal_distance: 1.0,
            width,
            height,
            accum: Bitmap::new(width, height),
            weights: vec![0.0; width * height],
            alpha: vec![0.0; width * height],
        }
    }

    pub fn with_lens(mut self, aperture_radius: Float, focal_distance: Float) -> Self {
        self.aperture_radius = aperture_radius;
        self.focal_distance = focal_distance;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Mean accumulated opacity of a pixel.
    pub fn average_opacity(&self, pixel: Vector2i) -> Float {
        let i = pixel.x as usize + self.width * pixel.y as usize;
        if self.weights[i] > 0.0 {
            self.alpha[i] / self.weights[i]
        } else {
            0.0
        }
    }
}

impl Sensor for PerspectiveCamera {
    fn sample_ray(&self, sample: &CameraSample) -> Ray3f {
        let u = (sample.pixel.x as Float + sample.pixel_uv.x) / self.width as Float;
        let v = (sample.pixel.y as Float + sample.pixel_uv.y) / self.height as Float;

        let px = (2.0 * u - 1.0) * self.aspect * self.tan_half_fov_y;
        let py = (1.0 - 2.0 * v) * self.tan_half_fov_y;

        let d_camera = Vector3f::new(px, py, 1.0).normalize();
        let dir = (self.right * d_camera.x + self.up * d_camera.y
                   + self.forward * d_camera.z).normalize();

        if self.aperture_radius <= 0.0 {
            return Ray3f::new(self.origin, dir, Some(0.0), None).with_time(sample.time);
        }

        // Thin lens: shear the origin over the aperture disk, keep the
        // focal-plane point fixed.
        let lens = sample_uniform_disk_concentric(&sample.lens_uv) * self.aperture_radius;
        let focus_t = self.focal_distance / d_camera.z;
        let p_focus = self.origin + dir * focus_t;
        let origin = self.origin + self.right * lens.x + self.up * lens.y;
        Ray3f::new(origin, (p_focus - origin).normalize(), Some(0.0), None)
            .with_time(sample.time)
    }

    fn resolution(&self) -> Vector2i {
        Vector2i::new(self.width as i32, self.height as i32)
    }

    fn add_sample(&mut self, pixel: Vector2i, _sample: &CameraSample,
                  radiance: RGBSpectrum, opacity: Float) {
        let i = pixel.x as usize + self.width * pixel.y as usize;
        self.accum[(pixel.x as usize, pixel.y as usize)] += radiance.to_vector();
        self.weights[i] += 1.0;
        self.alpha[i] += opacity;
    }

    fn develop(&self) -> Bitmap {
        let mut bitmap = Bitmap::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let w = self.weights[x + self.width * y];
                bitmap[(x, y)] = if w > 0.0 {
                    self.accum[(x, y)] / w
                } else {
                    Vector3f::zeros()
                };
            }
        }
        bitmap
    }

    fn describe(&self) -> String {
        format!("PerspectiveCamera [{}x{}, aperture={}]",
                self.width, self.height, self.aperture_radius)
    }
}

/* Tests for the perspective camera */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constants::Vector2f;

    fn center_sample(width: usize, height: usize) -> CameraSample {
        CameraSample {
            pixel: Vector2i::new(width as i32 / 2, height as i32 / 2),
            pixel_uv: Vector2f::new(0.0, 0.0),
            lens_uv: Vector2f::new(0.5, 0.5),
            time: 0.0,
        }
    }

    #[test]
    fn test_center_ray_looks_forward() {
        let cam = PerspectiveCamera::new(
            Vector3f::zeros(),
            Vector3f::new(0.0, 0.0, -1.0),
            Vector3f::new(0.0, 1.0, 0.0),
            std::f32::consts::FRAC_PI_2,
            4, 4,
        );
        let ray = cam.sample_ray(&center_sample(4, 4));
        let dir = ray.dir();
        assert!(dir.x.abs() < 0.5);
        assert!((dir.z + 1.0).abs() < 0.5);
    }

    #[test]
    fn test_pinhole_rays_share_origin() {
        let cam = PerspectiveCamera::new(
            Vector3f::new(1.0, 2.0, 3.0),
            Vector3f::new(0.0, 0.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
            1.0,
            8, 8,
        );
        let a = cam.sample_ray(&CameraSample {
            pixel: Vector2i::new(0, 0),
            pixel_uv: Vector2f::new(0.2, 0.8),
            lens_uv: Vector2f::new(0.9, 0.1),
            time: 0.5,
        });
        let b = cam.sample_ray(&center_sample(8, 8));
        assert_eq!(a.origin(), b.origin());
        assert_eq!(a.time, 0.5);
    }

    #[test]
    fn test_lens_spreads_origins() {
        let cam = PerspectiveCamera::new(
            Vector3f::zeros(),
            Vector3f::new(0.0, 0.0, -1.0),
            Vector3f::new(0.0, 1.0, 0.0),
            1.0,
            8, 8,
        ).with_lens(0.25, 5.0);
        let mut s = center_sample(8, 8);
        s.lens_uv = Vector2f::new(0.05, 0.5);
        let a = cam.sample_ray(&s);
        s.lens_uv = Vector2f::new(0.95, 0.5);
        let b = cam.sample_ray(&s);
        assert!((a.origin() - b.origin()).norm() > 1e-3);
    }

    #[test]
    fn test_film_accumulates_average() {
        let mut cam = PerspectiveCamera::new(
            Vector3f::zeros(),
            Vector3f::new(0.0, 0.0, -1.0),
            Vector3f::new(0.0, 1.0, 0.0),
            1.0,
            2, 2,
        );
        let pixel = Vector2i::new(1, 1);
        let s = center_sample(2, 2);
        cam.add_sample(pixel, &s, RGBSpectrum::splat(1.0), 1.0);
        cam.add_sample(pixel, &s, RGBSpectrum::splat(3.0), 0.0);
        let film = cam.develop();
        assert!((film[(1, 1)][0] - 2.0).abs() < 1e-5);
        assert!((cam.average_opacity(pixel) - 0.5).abs() < 1e-5);
        // Untouched pixels develop to black.
        assert_eq!(film[(0, 0)][1], 0.0);
    }
}
