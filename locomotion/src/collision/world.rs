use super::types::{CapsulePose, ColliderId, SweepHit, Vec3};
use crate::layers::LayerMask;

/// The collision world as seen by one character controller.
///
/// Every query is synchronous and answers for the world as it is right now. Implementations
/// must fail open: a degenerate capsule, a zero-length sweep, or any inconclusive query is
/// reported as "no hit" / "no overlap", never as an error.
///
/// `ignore` names the character's own collider (if it lives in the same world) so sweeps and
/// movement do not collide with it.
pub trait CollisionWorld {
    /// Sweep `capsule` along the unit vector `direction` for up to `max_distance` meters and
    /// return the earliest hit among colliders whose layers intersect `layers`.
    fn cast_capsule(
        &self,
        capsule: &CapsulePose,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
        ignore: Option<ColliderId>,
    ) -> Option<SweepHit>;

    /// All colliders whose layers intersect `layers` and that overlap `capsule`.
    ///
    /// The character's own collider is reported like any other; callers filter it.
    fn overlap_capsule(&self, capsule: &CapsulePose, layers: LayerMask) -> Vec<ColliderId>;

    /// Movement primitive: apply `desired` to `capsule`, resolving penetration, and return
    /// the translation that was actually applied.
    fn move_capsule(
        &self,
        capsule: &CapsulePose,
        desired: Vec3,
        dt: f32,
        ignore: Option<ColliderId>,
    ) -> Vec3;
}

impl<W: CollisionWorld + ?Sized> CollisionWorld for &W {
    fn cast_capsule(
        &self,
        capsule: &CapsulePose,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
        ignore: Option<ColliderId>,
    ) -> Option<SweepHit> {
        (**self).cast_capsule(capsule, direction, max_distance, layers, ignore)
    }

    fn overlap_capsule(&self, capsule: &CapsulePose, layers: LayerMask) -> Vec<ColliderId> {
        (**self).overlap_capsule(capsule, layers)
    }

    fn move_capsule(
        &self,
        capsule: &CapsulePose,
        desired: Vec3,
        dt: f32,
        ignore: Option<ColliderId>,
    ) -> Vec3 {
        (**self).move_capsule(capsule, desired, dt, ignore)
    }
}
