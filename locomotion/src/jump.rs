//! Multi-jump bookkeeping and jump impulses.

use log::debug;

use crate::{collaborators::WallRun, config::ControllerSettings, geometry::up, state::MotionState};

/// What a jump attempt did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpOutcome {
    /// No jump was requested or allowed.
    Idle,
    /// A jump was allowed but the character could not stand up.
    BlockedByStance,
    Jumped { wall_jump: bool },
}

impl JumpOutcome {
    #[inline]
    pub fn fired(self) -> bool {
        matches!(self, JumpOutcome::Jumped { .. })
    }
}

/// One cooldown tick, saturating at zero.
#[inline]
pub fn tick_cooldown(cooldown: u32) -> u32 {
    cooldown.saturating_sub(1)
}

/// Attempt a jump.
///
/// `stance_gate` is asked to force standing once the jump is allowed; if it refuses, the
/// jump is abandoned after the cooldown reset and the free ground jump have been applied.
pub fn try_jump(
    state: &mut MotionState,
    settings: &ControllerSettings,
    jump_requested: bool,
    wall_run: Option<&dyn WallRun>,
    now: f32,
    stance_gate: impl FnOnce() -> bool,
) -> JumpOutcome {
    let wall_running = wall_run.is_some_and(|w| w.is_active());
    if wall_running {
        state.remaining_jump_count = settings.max_air_jump_count;
    }

    let allowed = state.remaining_jump_count > 0 || wall_running;
    if !(allowed && jump_requested && state.jump_cooldown == 0) {
        return JumpOutcome::Idle;
    }

    state.jump_cooldown = settings.jump_cooldown_ticks;
    // Leaving the ground does not spend an air jump.
    if state.is_grounded {
        state.remaining_jump_count += 1;
    }

    if !stance_gate() {
        debug!("jump blocked: cannot stand up");
        return JumpOutcome::BlockedByStance;
    }

    match wall_run.filter(|_| wall_running) {
        Some(wall) => {
            state.velocity.x = 0.0;
            state.velocity.z = 0.0;
            state.velocity += wall.jump_direction() * settings.jump_force;
        }
        None => {
            state.velocity.y = 0.0;
            state.velocity += up() * settings.jump_force;
        }
    }

    state.remaining_jump_count = state.remaining_jump_count.saturating_sub(1);
    state.unground();
    state.last_jump_time = Some(now);
    state.has_jumped_this_step = true;

    debug!(
        "jump (wall: {wall_running}), {} left, v = {:?}",
        state.remaining_jump_count, state.velocity
    );
    JumpOutcome::Jumped {
        wall_jump: wall_running,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Vec3;

    struct Wall {
        active: bool,
    }

    impl WallRun for Wall {
        fn is_active(&self) -> bool {
            self.active
        }

        fn jump_direction(&self) -> Vec3 {
            Vec3::new(0.6, 0.8, 0.0)
        }

        fn camera_roll(&self) -> f32 {
            15.0
        }
    }

    fn grounded_state() -> MotionState {
        let mut state = MotionState::new(Vec3::zeros(), 1, 0);
        state.is_grounded = true;
        state
    }

    #[test]
    fn ground_jump_is_free() {
        let settings = ControllerSettings::default();
        let mut state = grounded_state();

        let outcome = try_jump(&mut state, &settings, true, None, 1.5, || true);
        assert_eq!(outcome, JumpOutcome::Jumped { wall_jump: false });
        assert_eq!(state.remaining_jump_count, 1);
        assert!(!state.is_grounded);
        assert_eq!(state.jump_cooldown, settings.jump_cooldown_ticks);
        assert_eq!(state.last_jump_time, Some(1.5));
        assert!(state.has_jumped_this_step);
        assert_eq!(state.velocity, Vec3::new(0.0, 24.0, 0.0));
    }

    #[test]
    fn air_jump_spends_budget_and_resets_vertical_speed() {
        let settings = ControllerSettings::default();
        let mut state = MotionState::new(Vec3::zeros(), 1, 0);
        state.velocity = Vec3::new(3.0, -12.0, 0.0);

        assert!(try_jump(&mut state, &settings, true, None, 0.0, || true).fired());
        assert_eq!(state.remaining_jump_count, 0);
        assert_eq!(state.velocity, Vec3::new(3.0, 24.0, 0.0));

        state.jump_cooldown = 0;
        let outcome = try_jump(&mut state, &settings, true, None, 0.5, || true);
        assert_eq!(outcome, JumpOutcome::Idle);
    }

    #[test]
    fn cooldown_blocks_jumps() {
        let settings = ControllerSettings::default();
        let mut state = grounded_state();
        state.jump_cooldown = 3;

        assert_eq!(
            try_jump(&mut state, &settings, true, None, 0.0, || true),
            JumpOutcome::Idle
        );
        assert_eq!(state.remaining_jump_count, 1);
        assert!(state.is_grounded);
    }

    #[test]
    fn no_request_no_jump() {
        let settings = ControllerSettings::default();
        let mut state = grounded_state();
        let outcome = try_jump(&mut state, &settings, false, None, 0.0, || {
            panic!("stance must not be touched")
        });
        assert_eq!(outcome, JumpOutcome::Idle);
    }

    #[test]
    fn stance_veto_keeps_cooldown_and_free_jump() {
        let settings = ControllerSettings::default();
        let mut state = grounded_state();
        state.velocity = Vec3::new(1.0, 0.0, 0.0);

        let outcome = try_jump(&mut state, &settings, true, None, 2.0, || false);
        assert_eq!(outcome, JumpOutcome::BlockedByStance);
        assert_eq!(state.jump_cooldown, settings.jump_cooldown_ticks);
        assert_eq!(state.remaining_jump_count, 2);
        assert!(state.is_grounded);
        assert_eq!(state.last_jump_time, None);
        assert_eq!(state.velocity, Vec3::new(1.0, 0.0, 0.0));
        assert!(!state.has_jumped_this_step);
    }

    #[test]
    fn wall_jump_refreshes_budget_and_pushes_off() {
        let settings = ControllerSettings::default();
        let wall = Wall { active: true };
        let mut state = MotionState::new(Vec3::zeros(), 1, 0);
        state.remaining_jump_count = 0;
        state.velocity = Vec3::new(8.0, -2.0, 5.0);

        let outcome = try_jump(&mut state, &settings, true, Some(&wall), 0.0, || true);
        assert_eq!(outcome, JumpOutcome::Jumped { wall_jump: true });
        assert_eq!(state.remaining_jump_count, 0);

        let expected = Vec3::new(0.6 * 24.0, -2.0 + 0.8 * 24.0, 0.0);
        assert!((state.velocity - expected).norm() < 1.0e-4);
    }

    #[test]
    fn inactive_wall_run_is_a_normal_jump() {
        let settings = ControllerSettings::default();
        let wall = Wall { active: false };
        let mut state = grounded_state();

        let outcome = try_jump(&mut state, &settings, true, Some(&wall), 0.0, || true);
        assert_eq!(outcome, JumpOutcome::Jumped { wall_jump: false });
    }

    #[test]
    fn cooldown_ticks_down_to_zero() {
        let mut c = 3;
        for expected in [2, 1, 0, 0] {
            let next = tick_cooldown(c);
            assert!(next <= c);
            assert_eq!(next, expected);
            c = next;
        }
    }
}
