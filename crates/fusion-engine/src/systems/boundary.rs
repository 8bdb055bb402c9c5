//! Spherical boundary math shared by the particle integrator and trail animator.

use glam::Vec3;

/// Fraction of the boundary radius that entities are held inside.
pub const BOUNDARY_MARGIN: f32 = 0.95;

/// Unit direction of `v`, or `+X` when `v` has no usable length.
#[inline]
pub fn direction_or_default(v: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(Vec3::X)
}

/// If `point` lies farther than `radius` from the origin, return it pulled
/// back onto the sphere along the same direction.
#[inline]
pub fn clamp_to_sphere(point: Vec3, radius: f32) -> Option<Vec3> {
    if point.length() > radius {
        Some(direction_or_default(point) * radius)
    } else {
        None
    }
}

/// Mirror `v` about the plane with unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside_point_is_untouched() {
        assert_eq!(clamp_to_sphere(Vec3::new(1.0, 0.0, 0.0), 2.0), None);
    }

    #[test]
    fn outside_point_lands_on_sphere() {
        let p = clamp_to_sphere(Vec3::new(3.0, 4.0, 0.0), 2.5).unwrap();
        assert!((p.length() - 2.5).abs() < 1e-5);
        assert!((p - Vec3::new(1.5, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn non_finite_point_falls_back() {
        let p = clamp_to_sphere(Vec3::new(f32::INFINITY, 0.0, 0.0), 1.0).unwrap();
        assert_eq!(p, Vec3::X);
    }

    #[test]
    fn reflect_flips_normal_component_only() {
        let v = reflect(Vec3::new(2.0, 1.0, 0.0), Vec3::X);
        assert_eq!(v, Vec3::new(-2.0, 1.0, 0.0));
    }

    #[test]
    fn reflect_preserves_speed() {
        let n = Vec3::new(1.0, 1.0, 1.0).normalize();
        let v = Vec3::new(0.3, -2.0, 5.0);
        assert!((reflect(v, n).length() - v.length()).abs() < 1e-5);
    }

    #[test]
    fn zero_vector_direction_is_x() {
        assert_eq!(direction_or_default(Vec3::ZERO), Vec3::X);
    }
}
