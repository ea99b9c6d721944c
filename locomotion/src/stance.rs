//! Crouch/stand stance and capsule height blending.

use log::debug;

use crate::{
    collision::{ColliderId, CollisionWorld, Vec3},
    config::ControllerSettings,
    events::LocomotionEvent,
    geometry::{CapsuleGeometry, approach_factor, lerp},
    layers::LayerMask,
};

/// Owns the capsule shape and the stance that drives its height.
#[derive(Clone, Debug)]
pub struct StanceController {
    geometry: CapsuleGeometry,
    is_crouching: bool,
    target_height: f32,
    standing_height: f32,
    crouching_height: f32,
    camera_height_ratio: f32,
    sharpness: f32,
}

impl StanceController {
    /// A standing capsule at full height.
    pub fn new(settings: &ControllerSettings) -> Self {
        let height = settings.capsule_height_standing;
        let mut stance = Self {
            geometry: CapsuleGeometry::new(settings.capsule_radius, height, 0.0),
            is_crouching: false,
            target_height: height,
            standing_height: height,
            crouching_height: settings.capsule_height_crouching,
            camera_height_ratio: settings.camera_height_ratio,
            sharpness: settings.crouching_sharpness,
        };
        stance.update_height(0.0, true);
        stance
    }

    #[inline]
    pub fn geometry(&self) -> &CapsuleGeometry {
        &self.geometry
    }

    #[inline]
    pub fn is_crouching(&self) -> bool {
        self.is_crouching
    }

    #[inline]
    pub fn target_height(&self) -> f32 {
        self.target_height
    }

    /// Ask to crouch (`want_crouch`) or stand.
    ///
    /// Crouching always succeeds. Standing fails when the standing capsule at `feet` would
    /// overlap anything other than `self_collider`, unless `ignore_obstruction` is set. A
    /// failed request changes nothing. Returns whether the requested stance is now in effect.
    ///
    /// The controller always checks obstruction. `ignore_obstruction` is for callers that
    /// place the character themselves, such as a respawn into a spot known to be clear.
    pub fn request_crouch<W: CollisionWorld + ?Sized>(
        &mut self,
        world: &W,
        feet: Vec3,
        want_crouch: bool,
        ignore_obstruction: bool,
        self_collider: Option<ColliderId>,
        events: &mut Vec<LocomotionEvent>,
    ) -> bool {
        if want_crouch {
            self.target_height = self.crouching_height;
        } else {
            if !ignore_obstruction && self.is_obstructed(world, feet, self_collider) {
                return false;
            }
            self.target_height = self.standing_height;
        }

        if self.is_crouching != want_crouch {
            debug!(
                "stance -> {}",
                if want_crouch { "crouching" } else { "standing" }
            );
            self.is_crouching = want_crouch;
            events.push(LocomotionEvent::StanceChanged {
                crouching: want_crouch,
            });
        }
        true
    }

    fn is_obstructed<W: CollisionWorld + ?Sized>(
        &self,
        world: &W,
        feet: Vec3,
        self_collider: Option<ColliderId>,
    ) -> bool {
        let standing = self.geometry.pose_at_height(feet, self.standing_height);
        world
            .overlap_capsule(&standing, LayerMask::all())
            .into_iter()
            .any(|id| Some(id) != self_collider)
    }

    /// Move the capsule height and camera offset toward the target height.
    ///
    /// With `instant` the target is applied directly; otherwise the approach is exponential
    /// at the crouching sharpness.
    pub fn update_height(&mut self, dt: f32, instant: bool) {
        let target_camera = self.target_height * self.camera_height_ratio;

        if instant {
            self.geometry.height = self.target_height;
            self.geometry.camera_offset = target_camera;
            return;
        }

        if self.geometry.height != self.target_height {
            let t = approach_factor(self.sharpness, dt);
            self.geometry.height = lerp(self.geometry.height, self.target_height, t);
            self.geometry.camera_offset = lerp(self.geometry.camera_offset, target_camera, t);
        }
    }
}
