//! Systems the controller consults each step but does not own.

use std::sync::Arc;

use crate::collision::Vec3;

/// External wall-running mode. While active it owns the character's airborne velocity.
pub trait WallRun: Send + Sync {
    fn is_active(&self) -> bool;

    /// Unit direction of a jump off the wall.
    fn jump_direction(&self) -> Vec3;

    /// Camera roll while running along a wall (degrees).
    fn camera_roll(&self) -> f32;
}

/// External health system. Only liveness is read.
pub trait Health: Send + Sync {
    fn is_dead(&self) -> bool;
}

/// Optional shared collaborators, queried every step.
#[derive(Clone, Default)]
pub struct Collaborators {
    pub wall_run: Option<Arc<dyn WallRun>>,
    pub health: Option<Arc<dyn Health>>,
}

impl Collaborators {
    #[inline]
    pub fn wall_running(&self) -> bool {
        self.wall_run.as_ref().is_some_and(|w| w.is_active())
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health.as_ref().is_some_and(|h| h.is_dead())
    }

    /// Roll from the wall-run collaborator, or zero without one.
    #[inline]
    pub fn camera_roll(&self) -> f32 {
        self.wall_run.as_ref().map_or(0.0, |w| w.camera_roll())
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("wall_run", &self.wall_run.is_some())
            .field("health", &self.health.is_some())
            .finish()
    }
}
