// Copyright 2020 TwoCookingMice

use praline::core::scene::{Scene, SceneObject};
use praline::core::sensor::Sensor;
use praline::integrators::path::PathIntegratorFactory;
use praline::io::exr_utils;
use praline::materials::dielectric::DielectricBSDF;
use praline::materials::diffuse::DiffuseBSDF;
use praline::math::constants::Vector3f;
use praline::math::spectrum::RGBSpectrum;
use praline::renderers::block::{BlockRenderer, Renderer};
use praline::sensors::perspective::PerspectiveCamera;
use praline::shapes::rectangle::Rectangle;
use praline::shapes::sphere::Sphere;

use std::env;
use std::sync::Arc;

// A closed box with an area light, a diffuse ball and a glass ball; enough
// to exercise direct lighting, indirect bounces and nested-medium
// refraction in one frame.
fn build_scene() -> Scene {
    let white = Arc::new(DiffuseBSDF::new(RGBSpectrum::splat(0.75)));
    let red = Arc::new(DiffuseBSDF::new(RGBSpectrum::new(0.65, 0.08, 0.08)));
    let green = Arc::new(DiffuseBSDF::new(RGBSpectrum::new(0.08, 0.55, 0.12)));
    let glass = Arc::new(
        DielectricBSDF::new(1.5).with_absorption(RGBSpectrum::new(0.02, 0.01, 0.0)),
    );

    let mut objects = Vec::new();

    // Floor, ceiling, back wall, side walls. Edge order keeps every normal
    // pointing into the box.
    objects.push(SceneObject::new(
        Arc::new(Rectangle::new(Vector3f::new(-2.0, 0.0, -6.0),
                                Vector3f::new(4.0, 0.0, 0.0),
                                Vector3f::new(0.0, 0.0, 4.0))),
        white.clone(),
    ).with_name(String::from("floor")));
    objects.push(SceneObject::new(
        Arc::new(Rectangle::new(Vector3f::new(-2.0, 4.0, -6.0),
                                Vector3f::new(0.0, 0.0, 4.0),
                                Vector3f::new(4.0, 0.0, 0.0))),
        white.clone(),
    ).with_name(String::from("ceiling")));
    objects.push(SceneObject::new(
        Arc::new(Rectangle::new(Vector3f::new(-2.0, 0.0, -6.0),
                                Vector3f::new(0.0, 4.0, 0.0),
                                Vector3f::new(4.0, 0.0, 0.0))),
        white.clone(),
    ).with_name(String::from("back")));
    objects.push(SceneObject::new(
        Arc::new(Rectangle::new(Vector3f::new(-2.0, 0.0, -6.0),
                                Vector3f::new(0.0, 0.0, 4.0),
                                Vector3f::new(0.0, 4.0, 0.0))),
        red,
    ).with_name(String::from("left")));
    objects.push(SceneObject::new(
        Arc::new(Rectangle::new(Vector3f::new(2.0, 0.0, -6.0),
                                Vector3f::new(0.0, 4.0, 0.0),
                                Vector3f::new(0.0, 0.0, 4.0))),
        green,
    ).with_name(String::from("right")));

    // Area light just under the ceiling, facing down.
    objects.push(SceneObject::with_emission(
        Arc::new(Rectangle::new(Vector3f::new(-0.6, 3.98, -4.6),
                                Vector3f::new(0.0, 0.0, 1.2),
                                Vector3f::new(1.2, 0.0, 0.0))),
        white.clone(),
        RGBSpectrum::splat(12.0),
    ).with_name(String::from("light")));

    objects.push(SceneObject::new(
        Arc::new(Sphere::new(Vector3f::new(-0.9, 0.8, -4.6), 0.8)),
        white,
    ).with_name(String::from("matte_ball")));
    objects.push(SceneObject::new(
        Arc::new(Sphere::new(Vector3f::new(0.9, 0.8, -3.6), 0.8)),
        glass,
    ).with_name(String::from("glass_ball")));

    Scene::with_objects(objects)
}

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <output.exr> [--spp N] [--max-depth N] [--seed N] [--size WxH]",
                  args[0]);
        std::process::exit(1);
    }

    let output_path = &args[1];
    let mut spp: usize = 64;
    let mut max_depth: u32 = 16;
    let mut seed: u64 = 0;
    let mut width: usize = 512;
    let mut height: usize = 512;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--spp" => {
                i += 1;
                spp = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(spp);
            }
            "--max-depth" => {
                i += 1;
                max_depth = args.get(i).and_then(|v| v.parse::<u32>().ok()).unwrap_or(max_depth);
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|v| v.parse::<u64>().ok()).unwrap_or(0);
            }
            "--size" => {
                i += 1;
                if let Some(dims) = args.get(i) {
                    let mut parts = dims.splitn(2, 'x');
                    if let (Some(w), Some(h)) = (parts.next(), parts.next()) {
                        width = w.parse().unwrap_or(width);
                        height = h.parse().unwrap_or(height);
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }

    let scene = build_scene();
    let mut camera = PerspectiveCamera::new(
        Vector3f::new(0.0, 2.0, 1.0),
        Vector3f::new(0.0, 1.6, -4.0),
        Vector3f::new(0.0, 1.0, 0.0),
        std::f32::consts::FRAC_PI_4,
        width,
        height,
    );

    let factory = Box::new(PathIntegratorFactory::new(max_depth, 4, spp));
    let renderer = BlockRenderer::new(factory, ((seed >> 32) as u32, seed as u32));
    log::info!("Rendering {}x{} at {} spp with {}.", width, height, spp, camera.describe());

    let image = renderer.render(&scene, &mut camera);
    exr_utils::write_exr_to_file(&image.raw_copy(), image.width(), image.height(), output_path);
}
