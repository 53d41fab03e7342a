// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};

/// Unpolarized Fresnel reflectance for a dielectric boundary. `cos_i` is
/// the absolute cosine on the incident side, `eta_i`/`eta_t` the incident
/// and transmitted indices. Returns 1.0 under total internal reflection.
pub fn fresnel_dielectric(cos_i: Float, eta_i: Float, eta_t: Float) -> Float {
    let cos_i = cos_i.abs().min(1.0);
    let sin2_i = (1.0 - cos_i * cos_i).max(0.0);
    let eta = eta_i / eta_t;
    let sin2_t = eta * eta * sin2_i;
    if sin2_t >= 1.0 {
        return 1.0;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    let r_parl = (eta_t * cos_i - eta_i * cos_t) / (eta_t * cos_i + eta_i * cos_t);
    let r_perp = (eta_i * cos_i - eta_t * cos_t) / (eta_i * cos_i + eta_t * cos_t);
    0.5 * (r_parl * r_parl + r_perp * r_perp)
}

/// Mirror reflection of `wi` about the local z axis.
pub fn reflect_local(wi: &Vector3f) -> Vector3f {
    Vector3f::new(-wi.x, -wi.y, wi.z)
}

/// Refraction of `wi` across the local z plane with relative index
/// `eta_rel = eta_i / eta_t`. `None` under total internal reflection. The
/// result lies in the hemisphere opposite `wi`.
pub fn refract_local(wi: &Vector3f, eta_rel: Float) -> Option<Vector3f> {
    let cos_i = wi.z;
    let sin2_i = (1.0 - cos_i * cos_i).max(0.0);
    let sin2_t = eta_rel * eta_rel * sin2_i;
    if sin2_t >= 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    // Keep the tangential component scaled, flip to the far hemisphere.
    let z = if cos_i >= 0.0 { -cos_t } else { cos_t };
    Some(Vector3f::new(-wi.x * eta_rel, -wi.y * eta_rel, z).normalize())
}

/* Tests for the fresnel helpers */
