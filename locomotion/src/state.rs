use crate::{collision::Vec3, geometry::up};

/// Persistent motion state of one character, owned by its controller.
///
/// Stance and capsule height live in [`crate::stance::StanceController`].
#[derive(Clone, Debug, PartialEq)]
pub struct MotionState {
    /// Feet position in world space.
    pub position: Vec3,
    /// Yaw about the up axis (degrees).
    pub yaw_deg: f32,
    pub velocity: Vec3,
    pub is_grounded: bool,
    /// Unit normal of the supporting ground; up while airborne.
    pub ground_normal: Vec3,
    pub remaining_jump_count: u32,
    /// Steps left before another jump may fire.
    pub jump_cooldown: u32,
    /// Simulation time of the most recent jump (seconds).
    pub last_jump_time: Option<f32>,
    /// Camera pitch (degrees, clamped to [-89, 89]).
    pub camera_vertical_angle: f32,
    /// Velocity before the last obstruction projection; zero when the last move was clear.
    pub last_impact_velocity: Vec3,
    pub has_jumped_this_step: bool,
    /// Simulation time elapsed since the controller was created (seconds).
    pub time: f32,
}

impl MotionState {
    pub fn new(position: Vec3, max_air_jumps: u32, jump_cooldown: u32) -> Self {
        Self {
            position,
            yaw_deg: 0.0,
            velocity: Vec3::zeros(),
            is_grounded: false,
            ground_normal: up(),
            remaining_jump_count: max_air_jumps,
            jump_cooldown,
            last_jump_time: None,
            camera_vertical_angle: 0.0,
            last_impact_velocity: Vec3::zeros(),
            has_jumped_this_step: false,
            time: 0.0,
        }
    }

    /// Clear grounding, e.g. when a jump leaves the floor.
    #[inline]
    pub fn unground(&mut self) {
        self.is_grounded = false;
        self.ground_normal = up();
    }
}

/// Read-only view of a controller after a step, for observation and reward systems.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSnapshot {
    pub position: Vec3,
    pub velocity: Vec3,
    pub ground_normal: Vec3,
    pub yaw_deg: f32,
    pub camera_pitch_deg: f32,
    pub capsule_height: f32,
    pub remaining_jump_count: u32,
    pub jump_cooldown: u32,
    pub is_grounded: bool,
    pub is_crouching: bool,
    pub has_jumped_this_step: bool,
    pub is_dead: bool,
}
