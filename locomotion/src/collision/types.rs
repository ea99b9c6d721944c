/*!
Core collision types and math aliases shared by the collision submodules and the
locomotion components.

This module intentionally contains no algorithms. It defines the data exchanged
between the locomotion components (ground detector, stance controller, collision
resolver) and whatever implements [`super::CollisionWorld`].

Conventions
- Units are meters and seconds.
- The controller axis is +Y. Capsules are always upright.
*/

use nalgebra as na;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// Stable identifier of a collider inside a collision world.
///
/// # Bit layout
/// - bits 0..=31  : arena index
/// - bits 32..=63 : arena generation
///
/// Two live colliders never share an id; a removed collider's slot gets a new generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(pub u64);

impl ColliderId {
    #[inline]
    pub fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self((index as u64) | ((generation as u64) << u32::BITS))
    }

    #[inline]
    pub fn index(self) -> u32 {
        (self.0 & u32::MAX as u64) as u32
    }

    #[inline]
    pub fn generation(self) -> u32 {
        (self.0 >> u32::BITS) as u32
    }
}

/// An upright capsule placed in world space.
///
/// `bottom` and `top` are the centers of the two hemispheres, so the full height of the
/// shape is `top.y - bottom.y + 2 * radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsulePose {
    pub bottom: Vec3,
    pub top: Vec3,
    pub radius: f32,
}

impl CapsulePose {
    /// Midpoint between the hemisphere centers.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.bottom + self.top) * 0.5
    }

    /// Half of the cylinder section length.
    #[inline]
    pub fn half_segment(&self) -> f32 {
        ((self.top - self.bottom).norm() * 0.5).max(0.0)
    }

    /// A capsule query is only meaningful with a positive, finite radius and finite points.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.radius.is_finite() && self.radius > 0.0)
            || !self.bottom.iter().all(|c| c.is_finite())
            || !self.top.iter().all(|c| c.is_finite())
    }
}

/// The earliest contact found by a capsule sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepHit {
    /// Distance travelled along the sweep direction before contact (meters).
    pub distance: f32,
    /// World-space surface normal of the obstacle at the contact, pointing away from it.
    pub normal: Vec3,
    /// Collider that was hit.
    pub collider: ColliderId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collider_id_packs_index_and_generation() {
        let id = ColliderId::from_raw_parts(42, 7);
        assert_eq!(id.index(), 42);
        assert_eq!(id.generation(), 7);
        assert_ne!(id, ColliderId::from_raw_parts(42, 8));
    }

    #[test]
    fn capsule_pose_reports_degenerate_shapes() {
        let ok = CapsulePose {
            bottom: Vec3::new(0.0, 0.5, 0.0),
            top: Vec3::new(0.0, 1.3, 0.0),
            radius: 0.5,
        };
        assert!(!ok.is_degenerate());
        assert!((ok.half_segment() - 0.4).abs() < 1.0e-6);
        assert!((ok.center().y - 0.9).abs() < 1.0e-6);

        let flat = CapsulePose { radius: 0.0, ..ok };
        assert!(flat.is_degenerate());

        let nan = CapsulePose {
            top: Vec3::new(0.0, f32::NAN, 0.0),
            ..ok
        };
        assert!(nan.is_degenerate());
    }
}
