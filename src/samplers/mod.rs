// Copyright @yucwang 2026

pub mod lowdiscrepancy;
pub mod sequence;
