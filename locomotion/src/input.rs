//! Per-step input and the providers that produce it.

use std::collections::VecDeque;

use crate::{
    collision::{Quat, Vec3},
    constants::JUMP_ACTION_THRESHOLD,
    geometry::{clamp_axes, clamp_axis},
};

/// One step of character input.
///
/// Values are untrusted: the controller clamps them before use and never rejects a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputFrame {
    /// Local-space move intent: x = strafe right, z = forward. Each axis targets [-1, 1].
    pub move_input: Vec3,
    /// Yaw input for this step, scaled by the rotation speed.
    pub look_horizontal: f32,
    /// Pitch input for this step, scaled by the rotation speed.
    pub look_vertical: f32,
    /// Jump pressed this step.
    pub jump_requested: bool,
    pub sprint_held: bool,
    /// Crouch toggle pressed this step.
    pub crouch_requested: bool,
}

impl InputFrame {
    /// Frame with only a move intent.
    pub fn moving(move_input: Vec3) -> Self {
        Self {
            move_input,
            ..Self::default()
        }
    }

    /// Map a policy's continuous actions `[strafe, forward, jump]` to an input frame.
    ///
    /// Actions are clamped to [-1, 1]; a jump action above 0.5 counts as a press. Missing
    /// actions read as zero.
    pub fn from_continuous_actions(actions: &[f32], sprint_held: bool) -> Self {
        let action = |i: usize| clamp_axis(actions.get(i).copied().unwrap_or(0.0), 1.0);

        Self {
            move_input: Vec3::new(action(0), 0.0, action(1)),
            jump_requested: action(2) > JUMP_ACTION_THRESHOLD,
            sprint_held,
            ..Self::default()
        }
    }

    /// Move input clamped to [-1, 1] per axis.
    pub fn clamped_move(&self) -> Vec3 {
        clamp_axes(self.move_input, 1.0)
    }

    /// Clamped move input rotated into world space by a yaw of `yaw_deg` about +Y.
    pub fn world_move(&self, yaw_deg: f32) -> Vec3 {
        Quat::from_axis_angle(&Vec3::y_axis(), yaw_deg.to_radians()) * self.clamped_move()
    }
}

/// Source of one [`InputFrame`] per controller step.
pub trait InputProvider: Send {
    fn next_frame(&mut self) -> InputFrame;
}

impl<F> InputProvider for F
where
    F: FnMut() -> InputFrame + Send,
{
    fn next_frame(&mut self) -> InputFrame {
        self()
    }
}

/// Replays a fixed sequence of frames, then idles with neutral input.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn push(&mut self, frame: InputFrame) {
        self.frames.push_back(frame);
    }

    /// Queue `frame` for `steps` consecutive steps.
    pub fn repeat(&mut self, frame: InputFrame, steps: usize) {
        self.frames.extend(std::iter::repeat_n(frame, steps));
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputProvider for ScriptedInput {
    fn next_frame(&mut self) -> InputFrame {
        self.frames.pop_front().unwrap_or_default()
    }
}
