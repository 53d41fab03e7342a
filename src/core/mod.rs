// Copyright @yucwang 2021

pub mod bsdf;
pub mod computation_node;
pub mod integrator;
pub mod interaction;
pub mod interface_stack;
pub mod rng;
pub mod sampler;
pub mod scene;
pub mod sensor;
pub mod shape;
pub mod tangent_frame;
