//! Rapier-based collision world for character locomotion.
//!
//! Builds an in-memory Rapier scene from a set of collider definitions and answers the
//! capsule queries the controller needs: downward/forward sweeps, standing-capsule overlaps,
//! and the `KinematicCharacterController` movement primitive.
//!
//! Design goals
//! - Deterministic: given the same inputs (sorted by `id`), build identical in-memory sets.
//! - Query-focused: this module does NOT step a physics simulation.
//! - Immutable world: colliders do not move after construction. Rebuild to edit the scene.
//!
//! Layers
//! - Each collider's [`LayerMask`] bits are stored in `Collider::user_data` and matched by a
//!   query predicate, so queries can be restricted (e.g. ground checks) without touching the
//!   collider's solver groups.

// Re-export Rapier so downstream crates can use Rapier macros/types
// without needing to depend on `rapier3d` directly.
pub use rapier3d;

use std::collections::BTreeMap;

use log::{trace, warn};
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::parry::query::ShapeCastOptions;
use rapier3d::prelude::*;

use super::{
    settings::{DIST_EPS, KccSettings, MIN_MOVE_SQ},
    types::{CapsulePose, ColliderId, Quat, SweepHit, Vec3},
    world::CollisionWorld,
};
use crate::layers::{CollisionLayer, LayerMask};

/// Canonical, schema-agnostic definition of a world collider.
///
/// Conventions
/// - Units are meters.
/// - Rotation is a unit quaternion.
/// - For planes, the normal is pose-derived: `normal = rotation * +Y`.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    /// World-space translation.
    pub translation: Vec3,
    /// World-space rotation.
    pub rotation: Quat,
    /// Collider shape parameters.
    pub shape: ColliderShapeDef,
    /// Layers this collider belongs to.
    pub layers: LayerMask,
}

impl WorldStaticDef {
    /// Definition with identity rotation on the default layer.
    pub fn new(id: u32, translation: Vec3, shape: ColliderShapeDef) -> Self {
        Self {
            id,
            translation,
            rotation: Quat::identity(),
            shape,
            layers: CollisionLayer::Default.into(),
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_layers(mut self, layers: LayerMask) -> Self {
        self.layers = layers;
        self
    }
}

/// Supported collider shapes.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space) through the pose translation, offset along its normal.
    ///
    /// In Rapier a half-space is infinite; only the pose orientation matters for its normal.
    Plane {
        /// Offset along the plane normal (meters).
        offset_along_normal: f32,
    },

    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vec3 },

    /// Sphere/ball (meters).
    Sphere { radius: f32 },

    /// Y-aligned capsule (meters).
    CapsuleY { radius: f32, half_height: f32 },

    /// Y-aligned cylinder (meters).
    CylinderY { radius: f32, half_height: f32 },
}

/// In-memory Rapier structures needed for scene queries and the KCC movement primitive.
pub struct RapierQueryWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    handles: BTreeMap<u32, ColliderHandle>,
    kcc: KinematicCharacterController,
}

impl RapierQueryWorld {
    /// Build a query world from collider definitions with default KCC settings.
    pub fn build(defs: Vec<WorldStaticDef>) -> Self {
        Self::build_with_kcc(defs, KccSettings::default())
    }

    /// Build a query world from collider definitions.
    ///
    /// Determinism
    /// - The input is sorted by `id` before insertion.
    /// - Any NaN/invalid values should be filtered/validated by the caller.
    pub fn build_with_kcc(mut defs: Vec<WorldStaticDef>, kcc: KccSettings) -> Self {
        defs.sort_by_key(|d| d.id);

        let bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        let mut handles = BTreeMap::new();
        let mut modified_colliders = Vec::with_capacity(defs.len());

        for def in defs.iter() {
            let mut collider = collider_from_def(def);
            let origin = def.translation + def.rotation * Vec3::y() * plane_offset(def);
            let iso = Isometry::from_parts(origin.into(), def.rotation);
            collider.set_position(iso);
            collider.user_data = def.layers.bits as u128;

            let handle = colliders.insert(collider);
            modified_colliders.push(handle);
            handles.insert(def.id, handle);
        }

        // The broad-phase BVH is all the query pipeline needs; no contact graph is built.
        let mut broad_phase = BroadPhaseBvh::new();
        let mut events = Vec::new();
        broad_phase.update(
            &IntegrationParameters::default(),
            &colliders,
            &bodies,
            &modified_colliders,
            &[],
            &mut events,
        );

        Self {
            bodies,
            colliders,
            broad_phase,
            narrow_phase: NarrowPhase::default(),
            handles,
            kcc: kcc_from_settings(&kcc),
        }
    }

    /// The id of the collider built from the definition with `def_id`.
    pub fn collider_id(&self, def_id: u32) -> Option<ColliderId> {
        self.handles.get(&def_id).map(|h| id_from_handle(*h))
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Create a borrowed `QueryPipeline` view suitable for scene queries and KCC.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }
}

impl CollisionWorld for RapierQueryWorld {
    fn cast_capsule(
        &self,
        capsule: &CapsulePose,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
        ignore: Option<ColliderId>,
    ) -> Option<SweepHit> {
        if capsule.is_degenerate() || !(max_distance.is_finite() && max_distance > DIST_EPS) {
            return None;
        }
        let dir = direction.try_normalize(DIST_EPS)?;

        let in_layers = |_: ColliderHandle, c: &Collider| layer_match(c, layers);
        let filter = query_filter(&in_layers, ignore);
        let pipeline = self.query_pipeline(filter);

        let (shape, pose) = capsule_shape(capsule);
        let options = ShapeCastOptions::with_max_time_of_impact(max_distance);
        let (handle, hit) = pipeline.cast_shape(&pose, &dir, &shape, options)?;

        // `normal1` is the outward normal of the swept capsule at the contact; the capsule is
        // never rotated, so it is already world-aligned. The obstacle's surface normal opposes it.
        let normal = (-hit.normal1.into_inner())
            .try_normalize(DIST_EPS)
            .unwrap_or_else(|| -dir);

        trace!(
            "capsule sweep hit {:?} at {:.4} m (normal {:?})",
            handle, hit.time_of_impact, normal
        );

        Some(SweepHit {
            distance: hit.time_of_impact.max(0.0),
            normal,
            collider: id_from_handle(handle),
        })
    }

    fn overlap_capsule(&self, capsule: &CapsulePose, layers: LayerMask) -> Vec<ColliderId> {
        if capsule.is_degenerate() {
            return Vec::new();
        }

        let in_layers = |_: ColliderHandle, c: &Collider| layer_match(c, layers);
        let filter = query_filter(&in_layers, None);
        let pipeline = self.query_pipeline(filter);

        let (shape, pose) = capsule_shape(capsule);
        pipeline
            .intersect_shape(pose, &shape)
            .map(|(handle, _)| id_from_handle(handle))
            .collect()
    }

    fn move_capsule(
        &self,
        capsule: &CapsulePose,
        desired: Vec3,
        dt: f32,
        ignore: Option<ColliderId>,
    ) -> Vec3 {
        if desired.norm_squared() <= MIN_MOVE_SQ {
            return Vec3::zeros();
        }
        if capsule.is_degenerate() {
            warn!("move_capsule: degenerate capsule, applying displacement unresolved");
            return desired;
        }

        let everything = |_: ColliderHandle, _: &Collider| true;
        let filter = query_filter(&everything, ignore);
        let pipeline = self.query_pipeline(filter);

        let (shape, pose) = capsule_shape(capsule);
        let corrected = self
            .kcc
            .move_shape(dt, &pipeline, &shape, &pose, desired, |_| {});

        corrected.translation
    }
}

fn query_filter<'a>(
    predicate: &'a dyn Fn(ColliderHandle, &Collider) -> bool,
    ignore: Option<ColliderId>,
) -> QueryFilter<'a> {
    let mut filter = QueryFilter {
        predicate: Some(predicate),
        ..QueryFilter::default()
    }
    .exclude_sensors();
    if let Some(id) = ignore {
        filter = filter.exclude_collider(handle_from_id(id));
    }
    filter
}

fn layer_match(collider: &Collider, layers: LayerMask) -> bool {
    layers.intersects(LayerMask::new(collider.user_data as u32))
}

fn capsule_shape(capsule: &CapsulePose) -> (Capsule, Isometry<f32>) {
    let c = capsule.center();
    (
        Capsule::new_y(capsule.half_segment(), capsule.radius),
        Isometry::translation(c.x, c.y, c.z),
    )
}

fn id_from_handle(handle: ColliderHandle) -> ColliderId {
    let (index, generation) = handle.into_raw_parts();
    ColliderId::from_raw_parts(index, generation)
}

fn handle_from_id(id: ColliderId) -> ColliderHandle {
    ColliderHandle::from_raw_parts(id.index(), id.generation())
}

fn kcc_from_settings(settings: &KccSettings) -> KinematicCharacterController {
    let autostep = (settings.autostep_max_height > 0.0).then(|| CharacterAutostep {
        max_height: CharacterLength::Absolute(settings.autostep_max_height),
        min_width: CharacterLength::Absolute(settings.autostep_min_width),
        include_dynamic_bodies: false,
    });

    KinematicCharacterController {
        offset: CharacterLength::Absolute(settings.offset),
        slide: true,
        autostep,
        max_slope_climb_angle: settings.max_slope_climb_deg.to_radians(),
        min_slope_slide_angle: settings.min_slope_slide_deg.to_radians(),
        // Ground snapping is performed by the ground detector.
        snap_to_ground: None,
        normal_nudge_factor: settings.normal_nudge_factor,
        ..KinematicCharacterController::default()
    }
}

fn plane_offset(def: &WorldStaticDef) -> f32 {
    match def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => offset_along_normal,
        _ => 0.0,
    }
}

/// Build a Rapier collider from a `WorldStaticDef`.
///
/// The collider is created with an identity local transform; the caller places it at the
/// definition's pose.
fn collider_from_def(def: &WorldStaticDef) -> Collider {
    match &def.shape {
        // Local +Y half-space; the pose rotation orients it.
        ColliderShapeDef::Plane { .. } => ColliderBuilder::halfspace(Vector::y_axis()).build(),

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build()
        }

        ColliderShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius).build(),

        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => ColliderBuilder::capsule_y(*half_height, *radius).build(),

        ColliderShapeDef::CylinderY {
            radius,
            half_height,
        } => ColliderBuilder::cylinder(*half_height, *radius).build(),
    }
}
