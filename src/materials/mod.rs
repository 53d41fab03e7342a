// Copyright @yucwang 2023

pub mod dielectric;
pub mod diffuse;
pub mod fresnel;
