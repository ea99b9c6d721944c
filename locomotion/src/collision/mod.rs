/*!
Collision root module.

The locomotion components never talk to a physics engine directly; they go through the
[`CollisionWorld`] trait. The code is split for clarity:

- types:        shared data types (CapsulePose, SweepHit, ColliderId, math aliases)
- settings:     tolerances and movement-primitive (KCC) settings
- world:        the `CollisionWorld` query surface
- rapier_world: Rapier-backed implementation (shape casts, overlaps, KCC movement)
*/

pub mod rapier_world;
pub mod settings;
pub mod types;
pub mod world;

// Re-export commonly used types.
pub use rapier_world::{ColliderShapeDef, RapierQueryWorld, WorldStaticDef};
pub use settings::KccSettings;
pub use types::{CapsulePose, ColliderId, Quat, SweepHit, Vec3};
pub use world::CollisionWorld;
