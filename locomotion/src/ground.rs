//! Ground detection: a short downward capsule sweep that decides whether the character
//! stands on walkable ground, and how far it must drop to touch it.

use log::trace;

use crate::{
    collision::{ColliderId, CollisionWorld, Vec3},
    config::ControllerSettings,
    geometry::{CapsuleGeometry, angle_deg, up},
    layers::LayerMask,
};

/// Result of one ground probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundProbe {
    pub grounded: bool,
    /// Walkable ground normal, or up when not grounded.
    pub normal: Vec3,
    /// Drop needed to touch the ground; zero when already within the skin.
    pub snap_displacement: Vec3,
}

impl GroundProbe {
    pub fn airborne() -> Self {
        Self {
            grounded: false,
            normal: up(),
            snap_displacement: Vec3::zeros(),
        }
    }
}

/// Ground probe parameters, taken from the controller settings.
#[derive(Clone, Copy, Debug)]
pub struct GroundDetector {
    grounded_distance: f32,
    air_distance: f32,
    skin_width: f32,
    slope_limit_deg: f32,
    layers: LayerMask,
}

impl GroundDetector {
    pub fn new(settings: &ControllerSettings) -> Self {
        Self {
            grounded_distance: settings.skin_width + settings.ground_check_distance,
            air_distance: settings.air_ground_check_distance,
            skin_width: settings.skin_width,
            slope_limit_deg: settings.slope_limit_deg,
            layers: settings.ground_layers,
        }
    }

    /// Sweep distance for the given grounding state of the previous step.
    ///
    /// Airborne probes are kept short so passing over ground does not snap onto it.
    #[inline]
    pub fn probe_distance(&self, previous_grounded: bool) -> f32 {
        if previous_grounded {
            self.grounded_distance
        } else {
            self.air_distance
        }
    }

    /// Whether `normal` is something the character can stand on.
    pub fn is_walkable(&self, normal: Vec3) -> bool {
        normal.dot(&up()) > 0.0 && angle_deg(up(), normal) <= self.slope_limit_deg
    }

    /// Probe for ground under the capsule standing at `feet`.
    ///
    /// `suppressed` is set for a short window after a jump; the probe then reports airborne
    /// without querying the world.
    pub fn detect<W: CollisionWorld + ?Sized>(
        &self,
        world: &W,
        feet: Vec3,
        capsule: &CapsuleGeometry,
        previous_grounded: bool,
        suppressed: bool,
        ignore: Option<ColliderId>,
    ) -> GroundProbe {
        if suppressed {
            return GroundProbe::airborne();
        }

        let distance = self.probe_distance(previous_grounded);
        let pose = capsule.pose(feet);
        let Some(hit) = world.cast_capsule(&pose, -up(), distance, self.layers, ignore) else {
            return GroundProbe::airborne();
        };

        if !self.is_walkable(hit.normal) {
            trace!(
                "ground probe rejected normal {:?} ({:.1} deg from up)",
                hit.normal,
                angle_deg(up(), hit.normal)
            );
            return GroundProbe::airborne();
        }

        let snap_displacement = if hit.distance > self.skin_width {
            -up() * hit.distance
        } else {
            Vec3::zeros()
        };

        trace!(
            "grounded on {:?} at {:.4} m, snap {:.4} m",
            hit.collider,
            hit.distance,
            snap_displacement.norm()
        );

        GroundProbe {
            grounded: true,
            normal: hit.normal,
            snap_displacement,
        }
    }
}
