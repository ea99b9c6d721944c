use crate::{
    collision::Vec3, constants::CAMERA_PITCH_LIMIT_DEG, geometry::clamp_axis,
    state::MotionState,
};

/// Result of one camera rotation step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraUpdate {
    /// Yaw applied to the character this step (degrees).
    pub yaw_delta: f32,
    /// Camera local euler angles (pitch, yaw, roll) in degrees.
    pub local_angles: Vec3,
}

/// Turn the character by the horizontal look input and tilt the camera by the vertical one.
///
/// Look inputs are clamped to [-1, 1] before scaling. Pitch stays within +/- 89 degrees.
pub fn rotate(
    state: &mut MotionState,
    look_horizontal: f32,
    look_vertical: f32,
    rotation_speed: f32,
    rotation_multiplier: f32,
    roll: f32,
) -> CameraUpdate {
    let scale = rotation_speed * rotation_multiplier;

    let yaw_delta = clamp_axis(look_horizontal, 1.0) * scale;
    state.yaw_deg = (state.yaw_deg + yaw_delta) % 360.0;

    state.camera_vertical_angle = (state.camera_vertical_angle
        + clamp_axis(look_vertical, 1.0) * scale)
        .clamp(-CAMERA_PITCH_LIMIT_DEG, CAMERA_PITCH_LIMIT_DEG);

    CameraUpdate {
        yaw_delta,
        local_angles: Vec3::new(state.camera_vertical_angle, 0.0, roll),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_input_turns_and_tilts() {
        let mut state = MotionState::new(Vec3::zeros(), 1, 0);
        let update = rotate(&mut state, 0.5, -0.1, 200.0, 1.0, 0.0);

        assert_eq!(update.yaw_delta, 100.0);
        assert_eq!(state.yaw_deg, 100.0);
        assert!((state.camera_vertical_angle + 20.0).abs() < 1.0e-4);
        assert_eq!(update.local_angles.z, 0.0);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut state = MotionState::new(Vec3::zeros(), 1, 0);
        for _ in 0..5 {
            rotate(&mut state, 0.0, 1.0, 200.0, 1.0, 0.0);
        }
        assert_eq!(state.camera_vertical_angle, 89.0);

        for _ in 0..10 {
            rotate(&mut state, 0.0, -1.0, 200.0, 1.0, 0.0);
        }
        assert_eq!(state.camera_vertical_angle, -89.0);
    }

    #[test]
    fn aiming_multiplier_slows_rotation_and_roll_passes_through() {
        let mut state = MotionState::new(Vec3::zeros(), 1, 0);
        let update = rotate(&mut state, 1.0, 0.0, 200.0, 0.4, 12.5);

        assert!((update.yaw_delta - 80.0).abs() < 1.0e-4);
        assert_eq!(update.local_angles, Vec3::new(0.0, 0.0, 12.5));
    }

    #[test]
    fn out_of_range_look_input_is_clamped() {
        let mut state = MotionState::new(Vec3::zeros(), 1, 0);
        let update = rotate(&mut state, 50.0, f32::NAN, 200.0, 1.0, 0.0);

        assert_eq!(update.yaw_delta, 200.0);
        assert_eq!(state.camera_vertical_angle, 0.0);
    }
}
