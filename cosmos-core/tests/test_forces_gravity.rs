//! Unit tests for the pairwise gravity evaluator

use cosmos_core::engine::{Body, World};
use cosmos_core::tests::test_helpers::{approx_eq_f32, approx_eq_vec3, two_body_world};
use glam::Vec3;

#[test]
fn test_gravity_force_magnitude() {
    let mut world = World::with_bodies(vec![
        Body::new(Vec3::ZERO, 1.0, 0.0),
        Body::new(Vec3::new(3.0, 4.0, 0.0), 2.0, 0.0), // distance = 5.0
    ]);

    world.accumulate_gravity(1.0, 1.0e-3);

    // |F| = G * m_a * m_b / r² = 1.0 * 1.0 * 2.0 / 25.0 = 0.08
    let expected = Vec3::new(3.0, 4.0, 0.0).normalize() * 0.08;
    assert!(approx_eq_vec3(world.bodies[0].force, expected, 1e-6));
    assert!(approx_eq_f32(world.bodies[0].force.length(), 0.08, 1e-6));
}

#[test]
fn test_gravity_force_equal_and_opposite() {
    let mut world = two_body_world(3.0, 7.0, 4.0);
    world.accumulate_gravity(2.0, 1.0e-3);

    let fa = world.bodies[0].force;
    let fb = world.bodies[1].force;

    // a is pulled toward b (+X), b toward a (-X)
    assert!(fa.x > 0.0);
    assert!(fb.x < 0.0);
    assert_eq!(fa, -fb);
}

#[test]
fn test_gravity_net_force_vanishes_for_many_bodies() {
    let mut world = World::with_bodies(vec![
        Body::new(Vec3::new(0.0, 0.0, 0.0), 1.0, 0.0),
        Body::new(Vec3::new(5.0, 1.0, -2.0), 2.0, 0.0),
        Body::new(Vec3::new(-3.0, 4.0, 1.0), 3.0, 0.0),
        Body::new(Vec3::new(2.0, -6.0, 3.0), 0.5, 0.0),
    ]);

    world.accumulate_gravity(1.0, 1.0e-3);

    let net: Vec3 = world.bodies.iter().map(|b| b.force).sum();
    assert!(approx_eq_vec3(net, Vec3::ZERO, 1e-6), "net force {net:?}");
}

#[test]
fn test_gravity_skips_pairs_below_min_distance() {
    let mut world = two_body_world(1.0, 1.0, 0.05);
    world.accumulate_gravity(1.0, 0.1);

    assert_eq!(world.bodies[0].force, Vec3::ZERO);
    assert_eq!(world.bodies[1].force, Vec3::ZERO);
}

#[test]
fn test_gravity_coincident_bodies_stay_finite() {
    let mut world = two_body_world(1.0, 1.0, 0.0);
    world.accumulate_gravity(1.0, 0.0);

    assert!(world.bodies.iter().all(|b| b.force.is_finite()));
    assert_eq!(world.bodies[0].force, Vec3::ZERO);
}

#[test]
fn test_gravity_scales_with_constant() {
    let mut weak = two_body_world(1.0, 2.0, 5.0);
    let mut strong = two_body_world(1.0, 2.0, 5.0);
    weak.accumulate_gravity(1.0, 1.0e-3);
    strong.accumulate_gravity(2.0, 1.0e-3);

    assert!(approx_eq_vec3(
        strong.bodies[0].force,
        weak.bodies[0].force * 2.0,
        1e-7
    ));
}

#[test]
fn test_fixed_bodies_attract_but_are_attracted_too() {
    let mut world = World::with_bodies(vec![
        Body::new(Vec3::ZERO, 10.0, 0.0),
        Body::new(Vec3::new(10.0, 0.0, 0.0), 1000.0, 0.0).fixed(),
    ]);
    world.accumulate_gravity(1.0, 1.0e-3);

    // the anchor's accumulator fills; the integrator is what ignores it
    assert!(world.bodies[1].force.x < 0.0);
    world.clear_forces();
    assert_eq!(world.bodies[1].force, Vec3::ZERO);
}
