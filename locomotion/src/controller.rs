//! The per-character locomotion controller.
//!
//! [`LocomotionController::step`] runs one fixed simulation step in this order:
//!
//! 1. per-step flags, simulation clock, jump cooldown
//! 2. kill-height check
//! 3. death check (a dead character is frozen)
//! 4. input
//! 5. ground probe and snap, jump budget refresh
//! 6. landing report
//! 7. crouch toggle and height smoothing
//! 8. camera rotation
//! 9. sprint and world-space move input
//! 10. jump
//! 11. velocity integration
//! 12. displacement and collision response

use std::sync::Arc;

use log::{debug, warn};

use crate::{
    camera::{CameraUpdate, rotate},
    collaborators::{Collaborators, Health, WallRun},
    collision::{ColliderId, CollisionWorld, Vec3},
    config::ControllerSettings,
    error::{ControllerError, Result},
    events::{FallReport, LocomotionEvent},
    ground::GroundDetector,
    input::InputProvider,
    jump::{JumpOutcome, tick_cooldown, try_jump},
    response::resolve,
    stance::StanceController,
    state::{MotionSnapshot, MotionState},
    velocity::{MovementMode, integrate, speed_modifier},
};

/// Everything a step produced.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    pub snapshot: MotionSnapshot,
    /// Events in the order they happened during the step.
    pub events: Vec<LocomotionEvent>,
    pub camera: CameraUpdate,
}

/// Moves one capsule character through a collision world, one fixed step at a time.
pub struct LocomotionController {
    settings: ControllerSettings,
    state: MotionState,
    stance: StanceController,
    ground: GroundDetector,
    input: Box<dyn InputProvider>,
    collaborators: Collaborators,
    self_collider: Option<ColliderId>,
    rotation_multiplier: f32,
    camera: CameraUpdate,
    below_kill_height: bool,
}

impl LocomotionController {
    pub fn builder(settings: ControllerSettings) -> ControllerBuilder {
        ControllerBuilder::new(settings)
    }

    /// Advance the character by `dt` seconds of simulation time.
    ///
    /// Never fails: a non-finite or negative `dt` is treated as zero and geometric queries
    /// that cannot be answered count as "nothing there".
    pub fn step<W: CollisionWorld + ?Sized>(&mut self, world: &W, dt: f32) -> StepReport {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!("step: invalid dt {dt}, stepping with 0");
            0.0
        };
        let mut events = Vec::new();

        self.state.has_jumped_this_step = false;
        self.state.time += dt;
        self.state.jump_cooldown = tick_cooldown(self.state.jump_cooldown);

        self.check_kill_height(&mut events);

        if self.collaborators.is_dead() {
            return self.report(events);
        }

        let input = self.input.next_frame();

        let was_grounded = self.state.is_grounded;
        self.update_grounding(world, dt);
        if self.state.is_grounded && !was_grounded {
            let report = FallReport::from_landing(
                self.state.velocity,
                self.state.last_impact_velocity,
                &self.settings,
            );
            debug!(
                "landed at {:.2} m/s (ratio {:.2})",
                report.fall_speed, report.speed_ratio
            );
            events.push(LocomotionEvent::Landed(report));
        }

        let feet = self.state.position;
        if input.crouch_requested {
            let want_crouch = !self.stance.is_crouching();
            self.stance.request_crouch(
                world,
                feet,
                want_crouch,
                false,
                self.self_collider,
                &mut events,
            );
        }
        self.stance.update_height(dt, false);

        self.camera = rotate(
            &mut self.state,
            input.look_horizontal,
            input.look_vertical,
            self.settings.rotation_speed,
            self.rotation_multiplier,
            self.collaborators.camera_roll(),
        );

        // Sprinting stands the character up; a blocked stand cancels the sprint.
        let sprinting = input.sprint_held
            && self.stance.request_crouch(
                world,
                feet,
                false,
                false,
                self.self_collider,
                &mut events,
            );
        let modifier = speed_modifier(&self.settings, sprinting);
        let world_move = input.world_move(self.state.yaw_deg);

        let stance = &mut self.stance;
        let self_collider = self.self_collider;
        let now = self.state.time;
        let outcome = try_jump(
            &mut self.state,
            &self.settings,
            input.jump_requested,
            self.collaborators.wall_run.as_deref(),
            now,
            || stance.request_crouch(world, feet, false, false, self_collider, &mut events),
        );
        if let JumpOutcome::Jumped { wall_jump } = outcome {
            events.push(LocomotionEvent::Jumped { wall_jump });
        }

        let mode = if self.state.is_grounded {
            MovementMode::Grounded {
                normal: self.state.ground_normal,
            }
        } else if self.collaborators.wall_running() {
            MovementMode::WallRunning
        } else {
            MovementMode::Airborne
        };
        self.state.velocity = integrate(
            &self.settings,
            self.state.velocity,
            world_move,
            mode,
            dt,
            modifier,
            self.stance.is_crouching(),
        );

        let resolution = resolve(
            world,
            self.state.position,
            self.state.velocity,
            self.stance.geometry(),
            dt,
            self.self_collider,
        );
        self.state.position += resolution.applied_displacement;
        self.state.velocity = resolution.corrected_velocity;
        self.state.last_impact_velocity = resolution.last_impact_velocity;

        self.report(events)
    }

    fn update_grounding<W: CollisionWorld + ?Sized>(&mut self, world: &W, dt: f32) {
        let suppressed = self
            .state
            .last_jump_time
            .is_some_and(|t| self.state.time < t + self.settings.jump_grounding_prevention_time);

        let probe = self.ground.detect(
            world,
            self.state.position,
            self.stance.geometry(),
            self.state.is_grounded,
            suppressed,
            self.self_collider,
        );

        if probe.snap_displacement != Vec3::zeros() {
            let pose = self.stance.geometry().pose(self.state.position);
            self.state.position +=
                world.move_capsule(&pose, probe.snap_displacement, dt, self.self_collider);
        }

        self.state.is_grounded = probe.grounded;
        self.state.ground_normal = probe.normal;
        if probe.grounded {
            self.state.remaining_jump_count = self.settings.max_air_jump_count;
        }
    }

    fn check_kill_height(&mut self, events: &mut Vec<LocomotionEvent>) {
        let y = self.state.position.y;
        if y < self.settings.kill_height && !self.below_kill_height {
            debug!("fell below kill height ({y:.2} < {})", self.settings.kill_height);
            self.below_kill_height = true;
            events.push(LocomotionEvent::FellBelowKillHeight { y });
        }
    }

    fn report(&self, events: Vec<LocomotionEvent>) -> StepReport {
        StepReport {
            snapshot: self.snapshot(),
            events,
            camera: self.camera,
        }
    }

    /// Current observable state.
    pub fn snapshot(&self) -> MotionSnapshot {
        MotionSnapshot {
            position: self.state.position,
            velocity: self.state.velocity,
            ground_normal: self.state.ground_normal,
            yaw_deg: self.state.yaw_deg,
            camera_pitch_deg: self.state.camera_vertical_angle,
            capsule_height: self.stance.geometry().height,
            remaining_jump_count: self.state.remaining_jump_count,
            jump_cooldown: self.state.jump_cooldown,
            is_grounded: self.state.is_grounded,
            is_crouching: self.stance.is_crouching(),
            has_jumped_this_step: self.state.has_jumped_this_step,
            is_dead: self.collaborators.is_dead(),
        }
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn stance(&self) -> &StanceController {
        &self.stance
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Camera angles from the last step.
    pub fn camera(&self) -> CameraUpdate {
        self.camera
    }

    /// Scale look input, e.g. while aiming. Non-positive or non-finite values are ignored.
    pub fn set_rotation_multiplier(&mut self, multiplier: f32) {
        if multiplier.is_finite() && multiplier > 0.0 {
            self.rotation_multiplier = multiplier;
        } else {
            warn!("ignoring rotation multiplier {multiplier}");
        }
    }

    /// Switch between the aiming rotation multiplier and full-speed rotation.
    pub fn set_aiming(&mut self, aiming: bool) {
        self.rotation_multiplier = if aiming {
            self.settings.aiming_rotation_multiplier
        } else {
            1.0
        };
    }

    /// Put the character back at `position`, standing and at rest, as when it was built.
    pub fn reset_to(&mut self, position: Vec3, yaw_deg: f32) {
        self.state = initial_state(&self.settings, position, yaw_deg, Vec3::zeros());
        self.stance = StanceController::new(&self.settings);
        self.camera = CameraUpdate::default();
        self.below_kill_height = false;
    }
}

impl std::fmt::Debug for LocomotionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocomotionController")
            .field("state", &self.state)
            .field("stance", &self.stance)
            .field("collaborators", &self.collaborators)
            .field("self_collider", &self.self_collider)
            .finish_non_exhaustive()
    }
}

fn initial_state(
    settings: &ControllerSettings,
    position: Vec3,
    yaw_deg: f32,
    velocity: Vec3,
) -> MotionState {
    let mut state = MotionState::new(
        position,
        settings.max_air_jump_count,
        settings.jump_cooldown_ticks,
    );
    state.yaw_deg = yaw_deg;
    state.velocity = velocity;
    state
}

/// Configures and validates a [`LocomotionController`].
pub struct ControllerBuilder {
    settings: ControllerSettings,
    input: Option<Box<dyn InputProvider>>,
    collaborators: Collaborators,
    self_collider: Option<ColliderId>,
    position: Vec3,
    yaw_deg: f32,
    velocity: Vec3,
}

impl ControllerBuilder {
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            settings,
            input: None,
            collaborators: Collaborators::default(),
            self_collider: None,
            position: Vec3::zeros(),
            yaw_deg: 0.0,
            velocity: Vec3::zeros(),
        }
    }

    /// Source of input frames. Required.
    pub fn input(mut self, provider: impl InputProvider + 'static) -> Self {
        self.input = Some(Box::new(provider));
        self
    }

    pub fn wall_run(mut self, wall_run: Arc<dyn WallRun>) -> Self {
        self.collaborators.wall_run = Some(wall_run);
        self
    }

    pub fn health(mut self, health: Arc<dyn Health>) -> Self {
        self.collaborators.health = Some(health);
        self
    }

    /// The character's own collider, when it lives in the queried world.
    pub fn self_collider(mut self, id: ColliderId) -> Self {
        self.self_collider = Some(id);
        self
    }

    /// Feet position at spawn.
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn yaw(mut self, yaw_deg: f32) -> Self {
        self.yaw_deg = yaw_deg;
        self
    }

    /// Velocity at spawn.
    pub fn velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn build(self) -> Result<LocomotionController> {
        self.settings.validate()?;

        let input = self
            .input
            .ok_or(ControllerError::MissingCollaborator("input provider"))?;

        let finite = |v: Vec3| v.iter().all(|c| c.is_finite());
        if !finite(self.position) {
            return Err(ControllerError::invalid("position", "must be finite"));
        }
        if !finite(self.velocity) {
            return Err(ControllerError::invalid("velocity", "must be finite"));
        }
        if !self.yaw_deg.is_finite() {
            return Err(ControllerError::invalid("yaw", "must be finite"));
        }

        let state = initial_state(&self.settings, self.position, self.yaw_deg, self.velocity);
        let stance = StanceController::new(&self.settings);

        Ok(LocomotionController {
            ground: GroundDetector::new(&self.settings),
            settings: self.settings,
            state,
            stance,
            input,
            collaborators: self.collaborators,
            self_collider: self.self_collider,
            rotation_multiplier: 1.0,
            camera: CameraUpdate::default(),
            below_kill_height: false,
        })
    }
}
