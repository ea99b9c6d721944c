//! Scripted collision world for unit tests.

use std::cell::Cell;

use crate::{
    collision::{CapsulePose, ColliderId, CollisionWorld, SweepHit, Vec3},
    layers::LayerMask,
};

/// Answers queries from fixed data instead of geometry.
///
/// Downward sweeps report `ground`, every other direction reports `obstacle`; both only when
/// the hit lies within the sweep distance. Movement is applied unresolved.
#[derive(Default)]
pub(crate) struct FakeWorld {
    pub ground: Option<SweepHit>,
    pub obstacle: Option<SweepHit>,
    pub overlaps: Vec<ColliderId>,
    pub casts: Cell<usize>,
    pub last_cast_layers: Cell<Option<LayerMask>>,
}

impl FakeWorld {
    pub fn with_ground(distance: f32, normal: Vec3) -> Self {
        Self {
            ground: Some(SweepHit {
                distance,
                normal: normal.normalize(),
                collider: ColliderId(1),
            }),
            ..Self::default()
        }
    }
}

impl CollisionWorld for FakeWorld {
    fn cast_capsule(
        &self,
        _capsule: &CapsulePose,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
        _ignore: Option<ColliderId>,
    ) -> Option<SweepHit> {
        self.casts.set(self.casts.get() + 1);
        self.last_cast_layers.set(Some(layers));

        let hit = if direction.y < -0.99 {
            self.ground
        } else {
            self.obstacle
        };
        hit.filter(|h| h.distance <= max_distance)
    }

    fn overlap_capsule(&self, _capsule: &CapsulePose, _layers: LayerMask) -> Vec<ColliderId> {
        self.overlaps.clone()
    }

    fn move_capsule(
        &self,
        _capsule: &CapsulePose,
        desired: Vec3,
        _dt: f32,
        _ignore: Option<ColliderId>,
    ) -> Vec3 {
        desired
    }
}
