pub mod camera;
pub mod collaborators;
pub mod collision;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod events;
pub mod geometry;
pub mod ground;
pub mod input;
pub mod jump;
pub mod layers;
pub mod response;
pub mod stance;
pub mod state;
pub mod velocity;

#[cfg(test)]
pub(crate) mod testing;

pub use collaborators::{Health, WallRun};
pub use collision::{
    CapsulePose, ColliderId, ColliderShapeDef, CollisionWorld, KccSettings, RapierQueryWorld,
    SweepHit, Vec3, WorldStaticDef,
};
pub use config::ControllerSettings;
pub use controller::{ControllerBuilder, LocomotionController, StepReport};
pub use error::{ControllerError, Result};
pub use events::{FallReport, LocomotionEvent};
pub use input::{InputFrame, InputProvider, ScriptedInput};
pub use layers::{CollisionLayer, LayerMask};
pub use state::{MotionSnapshot, MotionState};
