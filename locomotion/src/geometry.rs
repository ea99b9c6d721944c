//! Capsule and vector helpers shared by the locomotion components. No state.

use crate::collision::{CapsulePose, Vec3, settings::DIST_EPS};

/// The controller's up axis.
#[inline]
pub fn up() -> Vec3 {
    Vec3::y()
}

/// Shape of the character capsule.
///
/// The character position is the capsule's feet point; the capsule grows upward from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleGeometry {
    radius: f32,
    /// Current (smoothed) height in meters.
    pub height: f32,
    /// Camera height above the feet in meters.
    pub camera_offset: f32,
}

impl CapsuleGeometry {
    pub fn new(radius: f32, height: f32, camera_offset: f32) -> Self {
        Self {
            radius,
            height,
            camera_offset,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Offset from the feet to the capsule center.
    #[inline]
    pub fn center_offset(&self) -> Vec3 {
        up() * (self.height * 0.5)
    }

    /// Center of the bottom hemisphere.
    #[inline]
    pub fn bottom_hemisphere(&self, feet: Vec3) -> Vec3 {
        feet + up() * self.radius
    }

    /// Center of the top hemisphere for a capsule of `height`.
    #[inline]
    pub fn top_hemisphere(&self, feet: Vec3, height: f32) -> Vec3 {
        feet + up() * (height - self.radius).max(self.radius)
    }

    /// The capsule at its current height.
    #[inline]
    pub fn pose(&self, feet: Vec3) -> CapsulePose {
        self.pose_at_height(feet, self.height)
    }

    /// The capsule as it would be at `height`, keeping the feet in place.
    #[inline]
    pub fn pose_at_height(&self, feet: Vec3, height: f32) -> CapsulePose {
        CapsulePose {
            bottom: self.bottom_hemisphere(feet),
            top: self.top_hemisphere(feet, height),
            radius: self.radius,
        }
    }
}

/// Interpolation factor for an exponential approach at `sharpness` over `dt`.
///
/// Clamped to [0, 1] so a large `dt` lands on the target instead of overshooting it.
#[inline]
pub fn approach_factor(sharpness: f32, dt: f32) -> f32 {
    let t = sharpness * dt;
    if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 }
}

/// Linear interpolation with `t` clamped to [0, 1].
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

#[inline]
pub fn lerp_vec(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// `v` without its component along `normal`.
#[inline]
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    let n_len_sq = normal.norm_squared();
    if n_len_sq <= DIST_EPS * DIST_EPS {
        return v;
    }
    v - normal * (v.dot(&normal) / n_len_sq)
}

/// `v` scaled down so its length does not exceed `max_len`.
#[inline]
pub fn clamp_magnitude(v: Vec3, max_len: f32) -> Vec3 {
    let max_len = max_len.max(0.0);
    let len_sq = v.norm_squared();
    if len_sq > max_len * max_len {
        v * (max_len / len_sq.sqrt())
    } else {
        v
    }
}

/// Unit vector of `v`, or zero when `v` is too short to have a direction.
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    v.try_normalize(DIST_EPS).unwrap_or_else(Vec3::zeros)
}

/// Reorient `direction` so it runs tangent to a slope with `slope_normal`, keeping its
/// heading. The result is unit length, or zero for a zero direction.
#[inline]
pub fn reorient_on_slope(direction: Vec3, slope_normal: Vec3) -> Vec3 {
    let right = direction.cross(&up());
    normalize_or_zero(slope_normal.cross(&right))
}

/// Angle between two vectors in degrees.
#[inline]
pub fn angle_deg(a: Vec3, b: Vec3) -> f32 {
    a.angle(&b).to_degrees()
}

/// Each component clamped to [-limit, limit]; non-finite components become zero.
#[inline]
pub fn clamp_axes(v: Vec3, limit: f32) -> Vec3 {
    v.map(|c| clamp_axis(c, limit))
}

#[inline]
pub fn clamp_axis(value: f32, limit: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-limit, limit)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).norm() < 1.0e-5
    }

    #[test]
    fn capsule_points_follow_the_feet() {
        let capsule = CapsuleGeometry::new(0.5, 1.8, 1.62);
        let feet = Vec3::new(1.0, 2.0, 3.0);

        assert!(close(capsule.bottom_hemisphere(feet), Vec3::new(1.0, 2.5, 3.0)));
        assert!(close(capsule.top_hemisphere(feet, 1.8), Vec3::new(1.0, 3.3, 3.0)));
        assert!(close(capsule.center_offset(), Vec3::new(0.0, 0.9, 0.0)));

        let pose = capsule.pose_at_height(feet, 1.0);
        assert!(close(pose.top, pose.bottom));
    }

    #[test]
    fn approach_factor_clamps_instead_of_overshooting() {
        // 15 * 0.1 = 1.5 must not overshoot the target.
        let t = approach_factor(15.0, 0.1);
        assert_eq!(t, 1.0);

        let v = lerp_vec(Vec3::zeros(), Vec3::new(15.0, 0.0, 0.0), t);
        assert_eq!(v, Vec3::new(15.0, 0.0, 0.0));

        assert!((approach_factor(10.0, 0.02) - 0.2).abs() < 1.0e-6);
        assert_eq!(approach_factor(10.0, f32::NAN), 0.0);
    }

    #[test]
    fn projecting_an_in_plane_vector_is_a_no_op() {
        let normal = Vec3::new(0.0, 1.0, 1.0).normalize();
        let tangent = Vec3::new(3.0, 1.0, -1.0);
        assert!(tangent.dot(&normal).abs() < 1.0e-6);

        let projected = project_on_plane(tangent, normal);
        assert!(close(projected, tangent));
        assert!(close(project_on_plane(projected, normal), projected));
    }

    #[test]
    fn projection_removes_the_normal_component() {
        let projected = project_on_plane(Vec3::new(2.0, -5.0, 1.0), up());
        assert!(close(projected, Vec3::new(2.0, 0.0, 1.0)));
    }

    #[test]
    fn clamp_magnitude_only_shrinks() {
        let long = clamp_magnitude(Vec3::new(30.0, 0.0, 40.0), 5.0);
        assert!(close(long, Vec3::new(3.0, 0.0, 4.0)));

        let short = clamp_magnitude(Vec3::new(1.0, 0.0, 0.0), 5.0);
        assert!(close(short, Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn slope_reorientation_is_tangent_and_keeps_heading() {
        // 30 degree ramp rising toward +X.
        let normal = Vec3::new(-0.5, 3.0_f32.sqrt() * 0.5, 0.0);
        let dir = reorient_on_slope(Vec3::x(), normal);

        assert!((dir.norm() - 1.0).abs() < 1.0e-5);
        assert!(dir.dot(&normal).abs() < 1.0e-5);
        assert!(dir.x > 0.0 && dir.y > 0.0);

        assert_eq!(reorient_on_slope(Vec3::zeros(), normal), Vec3::zeros());
        assert!(close(reorient_on_slope(Vec3::z(), up()), Vec3::z()));
    }

    #[test]
    fn axis_clamp_handles_out_of_range_and_nan() {
        let v = clamp_axes(Vec3::new(3.0, -7.0, f32::NAN), 1.0);
        assert_eq!(v, Vec3::new(1.0, -1.0, 0.0));
    }
}
