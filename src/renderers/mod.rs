// Copyright @yucwang 2021

pub mod block;
pub mod renderer;
