// Copyright @yucwang 2021

/// Identity and debug description shared by shapes and materials.
pub trait ComputationNode {
    // Output string for a single computation node.
    fn to_string(&self) -> String;
}
