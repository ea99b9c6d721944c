use crate::{collision::Vec3, config::ControllerSettings, geometry::lerp};

/// One-shot notifications produced during a step, in the order they happened.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LocomotionEvent {
    /// An accepted stance change.
    StanceChanged { crouching: bool },
    /// A jump fired this step.
    Jumped { wall_jump: bool },
    /// The character touched ground after an airborne period.
    Landed(FallReport),
    /// The character dropped below the kill height. Emitted once per life.
    FellBelowKillHeight { y: f32 },
}

/// Impact metrics of a landing.
///
/// Damage is only computed, never applied; the health system decides what to do with it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FallReport {
    /// Downward speed at impact (m/s, positive when falling).
    pub fall_speed: f32,
    /// Where `fall_speed` sits between the configured min and max damage speeds. Unclamped.
    pub speed_ratio: f32,
    /// Damage suggested by the fall, when fall damage is enabled and the ratio is positive.
    pub damage: Option<f32>,
}

impl FallReport {
    /// Build the report from the velocity going into the landing step and the velocity last
    /// stopped by an obstruction. The faster of the two downward speeds counts.
    pub fn from_landing(
        velocity: Vec3,
        last_impact_velocity: Vec3,
        settings: &ControllerSettings,
    ) -> Self {
        let fall_speed = -velocity.y.min(last_impact_velocity.y);
        Self::from_fall_speed(fall_speed, settings)
    }

    pub fn from_fall_speed(fall_speed: f32, settings: &ControllerSettings) -> Self {
        let min = settings.min_speed_for_fall_damage;
        let max = settings.max_speed_for_fall_damage;
        let speed_ratio = (fall_speed - min) / (max - min);

        let damage = (settings.receives_fall_damage && speed_ratio > 0.0).then(|| {
            lerp(
                settings.fall_damage_at_min_speed,
                settings.fall_damage_at_max_speed,
                speed_ratio,
            )
        });

        Self {
            fall_speed,
            speed_ratio,
            damage,
        }
    }
}
