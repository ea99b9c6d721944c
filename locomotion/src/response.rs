//! Applies a step's displacement and corrects velocity against whatever was hit.

use log::trace;

use crate::{
    collision::{ColliderId, CollisionWorld, Vec3, settings::MIN_MOVE_SQ},
    geometry::{CapsuleGeometry, project_on_plane},
    layers::LayerMask,
};

/// Outcome of moving the capsule for one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    /// Translation actually applied by the movement primitive.
    pub applied_displacement: Vec3,
    /// Velocity to carry into the next step.
    pub corrected_velocity: Vec3,
    /// Velocity before projection when something was hit, zero otherwise.
    pub last_impact_velocity: Vec3,
}

/// Move the capsule at `feet` by `velocity * dt`, then slide `velocity` along the first
/// obstruction on the intended path.
///
/// The obstruction sweep starts from the capsule before the move, so it sees what the
/// movement primitive collided with.
pub fn resolve<W: CollisionWorld + ?Sized>(
    world: &W,
    feet: Vec3,
    velocity: Vec3,
    capsule: &CapsuleGeometry,
    dt: f32,
    ignore: Option<ColliderId>,
) -> Resolution {
    let before = capsule.pose(feet);
    let applied_displacement = world.move_capsule(&before, velocity * dt, dt, ignore);

    let travel = velocity * dt;
    let hit = if travel.norm_squared() > MIN_MOVE_SQ {
        world.cast_capsule(
            &before,
            velocity.normalize(),
            travel.norm(),
            LayerMask::all(),
            ignore,
        )
    } else {
        None
    };

    match hit {
        Some(hit) => {
            trace!("impact on {:?}, normal {:?}", hit.collider, hit.normal);
            Resolution {
                applied_displacement,
                corrected_velocity: project_on_plane(velocity, hit.normal),
                last_impact_velocity: velocity,
            }
        }
        None => Resolution {
            applied_displacement,
            corrected_velocity: velocity,
            last_impact_velocity: Vec3::zeros(),
        },
    }
}
