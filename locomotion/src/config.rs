//! Controller tuning, loaded from TOML or built from defaults.
//!
//! Every value is read-only for the lifetime of a controller. Rates are per second, distances
//! are meters, angles are degrees.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        AIR_GROUND_CHECK_DISTANCE, DEFAULT_JUMP_COOLDOWN_TICKS, JUMP_GROUNDING_PREVENTION_TIME_S,
    },
    error::{ControllerError, Result},
    layers::LayerMask,
};

/// All tunable constants of a locomotion controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    // --- General ---
    /// Downward acceleration applied while airborne (m/s^2).
    pub gravity_down_force: f32,
    /// Layers the ground probe considers.
    pub ground_layers: LayerMask,
    /// Probe distance below the capsule while grounded, added to `skin_width` (meters).
    pub ground_check_distance: f32,
    /// Probe distance while airborne (meters).
    pub air_ground_check_distance: f32,
    /// Ground detection is suppressed this long after a jump (seconds).
    pub jump_grounding_prevention_time: f32,
    /// Contact tolerance of the capsule (meters).
    pub skin_width: f32,
    /// Steepest walkable slope (degrees from up).
    pub slope_limit_deg: f32,
    /// Below this height the character is reported as fallen off the map.
    pub kill_height: f32,

    // --- Movement ---
    /// Max speed when grounded and not sprinting (m/s).
    pub max_speed_on_ground: f32,
    /// How fast grounded velocity converges to its target (1/s).
    pub movement_sharpness_on_ground: f32,
    /// Fraction of ground speed kept while crouching, in [0, 1].
    pub max_speed_crouched_ratio: f32,
    /// Max horizontal speed while airborne (m/s).
    pub max_speed_in_air: f32,
    /// Horizontal acceleration while airborne (m/s^2).
    pub acceleration_speed_in_air: f32,
    /// Speed multiplier while sprinting.
    pub sprint_speed_modifier: f32,

    // --- Rotation ---
    /// Degrees of rotation per unit of look input.
    pub rotation_speed: f32,
    /// Rotation multiplier while aiming, in (0, 1].
    pub aiming_rotation_multiplier: f32,

    // --- Jump ---
    /// Gravity multiplier applied while descending.
    pub fall_speed_multiplier: f32,
    /// Upward speed given by a jump (m/s).
    pub jump_force: f32,
    /// Jumps available once airborne.
    pub max_air_jump_count: u32,
    /// Steps that must pass between two jumps.
    pub jump_cooldown_ticks: u32,

    // --- Stance ---
    /// Camera height as a fraction of the capsule height.
    pub camera_height_ratio: f32,
    pub capsule_radius: f32,
    pub capsule_height_standing: f32,
    pub capsule_height_crouching: f32,
    /// How fast the capsule height converges to its target (1/s).
    pub crouching_sharpness: f32,

    // --- Fall damage (report only) ---
    pub receives_fall_damage: bool,
    pub min_speed_for_fall_damage: f32,
    pub max_speed_for_fall_damage: f32,
    pub fall_damage_at_min_speed: f32,
    pub fall_damage_at_max_speed: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            gravity_down_force: 60.0,
            ground_layers: LayerMask::all(),
            ground_check_distance: 0.05,
            air_ground_check_distance: AIR_GROUND_CHECK_DISTANCE,
            jump_grounding_prevention_time: JUMP_GROUNDING_PREVENTION_TIME_S,
            skin_width: 0.08,
            slope_limit_deg: 45.0,
            kill_height: -50.0,

            max_speed_on_ground: 15.0,
            movement_sharpness_on_ground: 15.0,
            max_speed_crouched_ratio: 0.5,
            max_speed_in_air: 15.0,
            acceleration_speed_in_air: 25.0,
            sprint_speed_modifier: 2.0,

            rotation_speed: 200.0,
            aiming_rotation_multiplier: 0.4,

            fall_speed_multiplier: 1.0,
            jump_force: 24.0,
            max_air_jump_count: 1,
            jump_cooldown_ticks: DEFAULT_JUMP_COOLDOWN_TICKS,

            camera_height_ratio: 0.9,
            capsule_radius: 0.35,
            capsule_height_standing: 1.8,
            capsule_height_crouching: 0.9,
            crouching_sharpness: 10.0,

            receives_fall_damage: false,
            min_speed_for_fall_damage: 10.0,
            max_speed_for_fall_damage: 30.0,
            fall_damage_at_min_speed: 10.0,
            fall_damage_at_max_speed: 50.0,
        }
    }
}

impl ControllerSettings {
    /// Parse settings from TOML text. Missing keys take their default value.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ControllerError::SettingsIo(path.to_path_buf(), e))?;
        Self::from_toml_str(&content)
    }

    /// Reject settings a controller cannot run with.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("gravity_down_force", self.gravity_down_force),
            ("ground_check_distance", self.ground_check_distance),
            ("air_ground_check_distance", self.air_ground_check_distance),
            (
                "jump_grounding_prevention_time",
                self.jump_grounding_prevention_time,
            ),
            ("skin_width", self.skin_width),
            ("max_speed_on_ground", self.max_speed_on_ground),
            (
                "movement_sharpness_on_ground",
                self.movement_sharpness_on_ground,
            ),
            ("max_speed_in_air", self.max_speed_in_air),
            ("acceleration_speed_in_air", self.acceleration_speed_in_air),
            ("sprint_speed_modifier", self.sprint_speed_modifier),
            ("rotation_speed", self.rotation_speed),
            ("fall_speed_multiplier", self.fall_speed_multiplier),
            ("jump_force", self.jump_force),
            ("crouching_sharpness", self.crouching_sharpness),
            ("camera_height_ratio", self.camera_height_ratio),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ControllerError::invalid(
                    field,
                    format!("must be finite and >= 0, got {value}"),
                ));
            }
        }

        if !self.kill_height.is_finite() {
            return Err(ControllerError::invalid("kill_height", "must be finite"));
        }

        if !(0.0..=90.0).contains(&self.slope_limit_deg) {
            return Err(ControllerError::invalid(
                "slope_limit_deg",
                format!("must be within [0, 90], got {}", self.slope_limit_deg),
            ));
        }

        if !(0.0..=1.0).contains(&self.max_speed_crouched_ratio) {
            return Err(ControllerError::invalid(
                "max_speed_crouched_ratio",
                format!("must be within [0, 1], got {}", self.max_speed_crouched_ratio),
            ));
        }

        if !(self.aiming_rotation_multiplier > 0.0 && self.aiming_rotation_multiplier <= 1.0) {
            return Err(ControllerError::invalid(
                "aiming_rotation_multiplier",
                format!(
                    "must be within (0, 1], got {}",
                    self.aiming_rotation_multiplier
                ),
            ));
        }

        if !(self.capsule_radius.is_finite() && self.capsule_radius > 0.0) {
            return Err(ControllerError::invalid(
                "capsule_radius",
                format!("must be > 0, got {}", self.capsule_radius),
            ));
        }

        if !(self.capsule_height_crouching.is_finite()
            && self.capsule_height_crouching >= 2.0 * self.capsule_radius)
        {
            return Err(ControllerError::invalid(
                "capsule_height_crouching",
                format!(
                    "must be at least the capsule diameter ({}), got {}",
                    2.0 * self.capsule_radius,
                    self.capsule_height_crouching
                ),
            ));
        }

        if !(self.capsule_height_standing.is_finite()
            && self.capsule_height_standing >= self.capsule_height_crouching)
        {
            return Err(ControllerError::invalid(
                "capsule_height_standing",
                format!(
                    "must be >= capsule_height_crouching ({}), got {}",
                    self.capsule_height_crouching, self.capsule_height_standing
                ),
            ));
        }

        if !(self.max_speed_for_fall_damage > self.min_speed_for_fall_damage) {
            return Err(ControllerError::invalid(
                "max_speed_for_fall_damage",
                "must be greater than min_speed_for_fall_damage",
            ));
        }

        Ok(())
    }
}
