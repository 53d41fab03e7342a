// Copyright @yucwang 2021

use crate::core::scene::WorldQuery;
use crate::core::sensor::Sensor;
use crate::math::bitmap::Bitmap;

pub trait Renderer {
    fn render(&self, scene: &dyn WorldQuery, sensor: &mut dyn Sensor) -> Bitmap;
}
