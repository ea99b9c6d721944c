/// How long after a jump the ground detector is switched off (seconds of simulation time).
///
/// Without this window the downward probe would find the floor the character just left and
/// cancel the jump on the next step.
pub const JUMP_GROUNDING_PREVENTION_TIME_S: f32 = 0.2;

/// Ground probe distance used while airborne (meters).
///
/// Kept very small so the character does not suddenly snap to ground it is only passing over.
pub const AIR_GROUND_CHECK_DISTANCE: f32 = 0.07;

/// Camera pitch is clamped to +/- this many degrees.
pub const CAMERA_PITCH_LIMIT_DEG: f32 = 89.0;

/// Continuous jump actions above this value count as a press.
pub const JUMP_ACTION_THRESHOLD: f32 = 0.5;

/// Steps that must pass between two jumps when no decision period is configured.
pub const DEFAULT_JUMP_COOLDOWN_TICKS: u32 = 10;
