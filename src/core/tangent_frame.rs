// Copyright @yucwang 2026

use crate::math::constants::Vector3f;

/// Orthonormal shading frame with `n` as the z axis of the local space.
#[derive(Debug, Clone, Copy)]
pub struct ShadingFrame {
    pub tangent: Vector3f,
    pub bitangent: Vector3f,
    pub n: Vector3f,
}

impl ShadingFrame {
    pub fn from_normal(n: Vector3f) -> Self {
        let up = if n.z.abs() < 0.999 {
            Vector3f::new(0.0, 0.0, 1.0)
        } else {
            Vector3f::new(1.0, 0.0, 0.0)
        };
        let tangent = n.cross(&up).normalize();
        let bitangent = n.cross(&tangent).normalize();
        Self { tangent, bitangent, n }
    }

    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.tangent), v.dot(&self.bitangent), v.dot(&self.n))
    }

    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        self.tangent * v.x + self.bitangent * v.y + self.n * v.z
    }
}

/* Tests for the shading frame */
