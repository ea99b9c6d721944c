//! Velocity integration for grounded and airborne movement.

use crate::{
    collision::Vec3,
    config::ControllerSettings,
    geometry::{approach_factor, clamp_magnitude, lerp_vec, project_on_plane, reorient_on_slope, up},
};

/// Which movement rules apply this step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MovementMode {
    /// On walkable ground with the given surface normal.
    Grounded { normal: Vec3 },
    /// Airborne, steered by air control and pulled by gravity.
    Airborne,
    /// Airborne while the wall-run collaborator owns the velocity.
    WallRunning,
}

/// Speed multiplier for the current sprint state.
#[inline]
pub fn speed_modifier(settings: &ControllerSettings, sprinting: bool) -> f32 {
    if sprinting {
        settings.sprint_speed_modifier
    } else {
        1.0
    }
}

/// New velocity after one step of `dt` seconds.
///
/// `world_move` is the clamped move input already rotated into world space.
pub fn integrate(
    settings: &ControllerSettings,
    velocity: Vec3,
    world_move: Vec3,
    mode: MovementMode,
    dt: f32,
    speed_modifier: f32,
    crouching: bool,
) -> Vec3 {
    match mode {
        MovementMode::Grounded { normal } => {
            let mut target = world_move * settings.max_speed_on_ground * speed_modifier;
            if crouching {
                target *= settings.max_speed_crouched_ratio;
            }
            let target = reorient_on_slope(target, normal) * target.norm();
            lerp_vec(
                velocity,
                target,
                approach_factor(settings.movement_sharpness_on_ground, dt),
            )
        }

        MovementMode::WallRunning => velocity,

        MovementMode::Airborne => {
            let steered = velocity + world_move * settings.acceleration_speed_in_air * dt;

            let vertical = steered.y;
            let horizontal = clamp_magnitude(
                project_on_plane(steered, up()),
                settings.max_speed_in_air * speed_modifier,
            );

            let gravity_scale = if vertical < 0.0 {
                settings.fall_speed_multiplier
            } else {
                1.0
            };
            horizontal + up() * (vertical - settings.gravity_down_force * gravity_scale * dt)
        }
    }
}
