/*!
Collision tolerances and the movement-primitive (KCC) settings.

These constants centralize the tolerances used by the capsule queries. Keeping them
together makes tuning easier.

Notes
- Distances are in meters, time in seconds.
- Favor practical world-space tolerances over machine epsilon for robust behavior.
*/

use serde::{Deserialize, Serialize};

/// Minimum squared movement threshold to consider a step meaningful (m^2).
/// Movements below this are treated as zero to avoid tiny oscillations.
pub const MIN_MOVE_SQ: f32 = 1.0e-8;

/// Practical small distance for comparisons (meters).
/// Use for dot-product guards, equality checks in world space, etc.
pub const DIST_EPS: f32 = 1.0e-6;

/// Settings for Rapier's `KinematicCharacterController`, the movement primitive that
/// applies a requested displacement and resolves penetration.
///
/// Notes
/// - Values are expressed in meters and degrees (converted to radians at runtime).
/// - Ground snapping is left disabled here: the ground detector owns snapping.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KccSettings {
    /// Small gap preserved between the character and its surroundings (meters).
    /// Keep `offset` small but non-zero for numerical stability.
    pub offset: f32,

    /// Maximum climbable slope angle (degrees).
    pub max_slope_climb_deg: f32,

    /// Minimum slope angle (degrees) before automatic sliding starts.
    pub min_slope_slide_deg: f32,

    /// Autostep maximum height (meters). Zero disables autostep.
    pub autostep_max_height: f32,

    /// Autostep minimum width (meters).
    pub autostep_min_width: f32,

    /// Increase if the character gets stuck when sliding (small, meters).
    pub normal_nudge_factor: f32,
}

impl Default for KccSettings {
    fn default() -> Self {
        Self {
            offset: 0.01,
            max_slope_climb_deg: 45.0,
            min_slope_slide_deg: 30.0,
            autostep_max_height: 0.3,
            autostep_min_width: 0.2,
            normal_nudge_factor: 1.0e-4,
        }
    }
}
