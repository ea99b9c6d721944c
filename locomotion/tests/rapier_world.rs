use locomotion::{
    CapsulePose, ColliderShapeDef, CollisionLayer, CollisionWorld, LayerMask, RapierQueryWorld,
    Vec3, WorldStaticDef,
};

fn capsule_at(feet: Vec3) -> CapsulePose {
    CapsulePose {
        bottom: feet + Vec3::new(0.0, 0.35, 0.0),
        top: feet + Vec3::new(0.0, 1.45, 0.0),
        radius: 0.35,
    }
}

fn floor_and_box() -> RapierQueryWorld {
    RapierQueryWorld::build(vec![
        WorldStaticDef::new(
            2,
            Vec3::new(5.0, 1.0, 0.0),
            ColliderShapeDef::Cuboid {
                half_extents: Vec3::new(1.0, 1.0, 1.0),
            },
        )
        .with_layers(CollisionLayer::Obstacle.into()),
        WorldStaticDef::new(
            1,
            Vec3::zeros(),
            ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
        )
        .with_layers(CollisionLayer::Ground.into()),
    ])
}

#[test]
fn build_is_keyed_by_definition_id() {
    let world = floor_and_box();
    assert_eq!(world.len(), 2);
    assert!(world.collider_id(1).is_some());
    assert!(world.collider_id(2).is_some());
    assert_ne!(world.collider_id(1), world.collider_id(2));
    assert!(world.collider_id(3).is_none());
}

#[test]
fn downward_sweep_finds_the_floor() {
    let world = floor_and_box();
    let hit = world
        .cast_capsule(
            &capsule_at(Vec3::new(0.0, 0.5, 0.0)),
            -Vec3::y(),
            1.0,
            LayerMask::all(),
            None,
        )
        .expect("floor below");

    assert!((hit.distance - 0.5).abs() < 1.0e-3, "{hit:?}");
    assert!((hit.normal - Vec3::y()).norm() < 1.0e-3, "{hit:?}");
    assert_eq!(Some(hit.collider), world.collider_id(1));
}

#[test]
fn sweeps_respect_the_distance_and_layers() {
    let world = floor_and_box();
    let capsule = capsule_at(Vec3::new(0.0, 0.5, 0.0));

    assert!(
        world
            .cast_capsule(&capsule, -Vec3::y(), 0.3, LayerMask::all(), None)
            .is_none()
    );
    assert!(
        world
            .cast_capsule(
                &capsule,
                -Vec3::y(),
                1.0,
                CollisionLayer::Obstacle.into(),
                None
            )
            .is_none()
    );
    assert!(
        world
            .cast_capsule(
                &capsule,
                -Vec3::y(),
                1.0,
                LayerMask::all(),
                world.collider_id(1)
            )
            .is_none()
    );
}

#[test]
fn forward_sweep_hits_the_box_face() {
    let world = floor_and_box();
    let hit = world
        .cast_capsule(
            &capsule_at(Vec3::new(0.0, 0.1, 0.0)),
            Vec3::x(),
            10.0,
            LayerMask::all(),
            None,
        )
        .expect("box ahead");

    // Box face at x = 4, capsule surface at x = 0.35.
    assert!((hit.distance - 3.65).abs() < 1.0e-3, "{hit:?}");
    assert!((hit.normal + Vec3::x()).norm() < 1.0e-3, "{hit:?}");
}

#[test]
fn degenerate_queries_fail_open() {
    let world = floor_and_box();
    let mut capsule = capsule_at(Vec3::new(0.0, 0.0, 0.0));

    assert!(
        world
            .cast_capsule(&capsule, -Vec3::y(), 0.0, LayerMask::all(), None)
            .is_none()
    );
    assert!(
        world
            .cast_capsule(&capsule, Vec3::zeros(), 1.0, LayerMask::all(), None)
            .is_none()
    );

    capsule.radius = 0.0;
    assert!(world.overlap_capsule(&capsule, LayerMask::all()).is_empty());
    assert!(
        world
            .cast_capsule(&capsule, -Vec3::y(), 1.0, LayerMask::all(), None)
            .is_none()
    );
}

#[test]
fn overlap_reports_intersecting_colliders() {
    let world = floor_and_box();

    let inside_box = capsule_at(Vec3::new(4.5, 0.2, 0.0));
    let ids = world.overlap_capsule(&inside_box, LayerMask::all());
    assert_eq!(ids, vec![world.collider_id(2).expect("box")]);

    let clear = capsule_at(Vec3::new(0.0, 0.2, 0.0));
    assert!(world.overlap_capsule(&clear, LayerMask::all()).is_empty());

    assert!(
        world
            .overlap_capsule(&inside_box, CollisionLayer::Ground.into())
            .is_empty()
    );
}

#[test]
fn movement_stops_at_walls() {
    let world = floor_and_box();
    let capsule = capsule_at(Vec3::new(3.0, 0.2, 0.0));

    let applied = world.move_capsule(&capsule, Vec3::new(2.0, 0.0, 0.0), 0.02, None);
    // The capsule surface starts 0.65 m from the box face.
    assert!(applied.x < 0.66, "{applied:?}");
    assert!(applied.x > 0.5, "{applied:?}");

    let free = world.move_capsule(&capsule, Vec3::new(0.0, 0.0, 0.5), 0.02, None);
    assert!((free - Vec3::new(0.0, 0.0, 0.5)).norm() < 1.0e-3, "{free:?}");

    assert_eq!(
        world.move_capsule(&capsule, Vec3::zeros(), 0.02, None),
        Vec3::zeros()
    );
}
