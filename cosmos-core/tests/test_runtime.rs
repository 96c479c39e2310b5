//! Tests for the tick pipeline, snapshots and presets

use cosmos_core::tests::test_helpers::{approx_eq_f32, load_scene, scene_with_bodies};
use cosmos_core::{
    build_simulation, build_simulation_from_source, get_body_states, get_particle_states, run_scene,
    step_simulation, BodyConfig, Preset, SceneConfig, Simulation,
};
use glam::{Vec2, Vec3};

#[test]
fn test_empty_scene_ticks_are_no_ops() {
    let scene = load_scene("empty.yaml").expect("fixture should load");
    let mut sim = build_simulation(&scene);

    for _ in 0..100 {
        let report = step_simulation(&mut sim);
        assert_eq!(report.contacts, 0);
        assert_eq!(report.respawned, 0);
    }

    assert_eq!(sim.current_tick, 100);
    assert!(get_body_states(&sim).is_empty());
    assert!(get_particle_states(&sim).is_empty());
}

#[test]
fn test_orbiters_are_seeded_around_fixed_star() {
    let scene = load_scene("orbiters.yaml").expect("fixture should load");
    let sim = Simulation::new(&scene);
    let bodies = get_body_states(&sim);

    assert_eq!(bodies.len(), 7);
    assert!(bodies[0].fixed);
    assert_eq!(bodies[0].position, Vec3::ZERO);

    let g = scene.simulation.gravity_constant;
    for body in &bodies[1..] {
        let r = body.position.length();
        assert!((20.0..=60.0).contains(&r), "radius {r}");
        assert!(approx_eq_f32(body.position.y, 0.0, 1e-6));
        // circular orbit speed, perpendicular to the radius
        assert!(approx_eq_f32(body.velocity.length(), (g * 1000.0 / r).sqrt(), 1e-3));
        assert!(approx_eq_f32(body.velocity.dot(body.position), 0.0, 1e-2));
        assert!(!body.fixed);
    }
}

#[test]
fn test_circular_orbit_roughly_keeps_radius() {
    let scene = load_scene("orbiters.yaml").expect("fixture should load");
    let mut sim = Simulation::new(&scene);
    let start: Vec<f32> = sim.world.bodies.iter().map(|b| b.pos.length()).collect();

    for _ in 0..120 {
        sim.tick();
    }

    for (body, r0) in sim.world.bodies.iter().zip(start).skip(1) {
        let r = body.pos.length();
        assert!((r - r0).abs() / r0 < 0.05, "radius drifted {r0} -> {r}");
    }
}

#[test]
fn test_run_scene_is_deterministic() {
    for preset in [Preset::Collisions, Preset::SolarSystem] {
        let scene = preset.scene();
        let a = run_scene(&scene, 300);
        let b = run_scene(&scene, 300);

        assert_eq!(a.bodies, b.bodies, "{} diverged", preset.name());
        assert_eq!(a.total_contacts, b.total_contacts);
        assert_eq!(a.total_respawned, b.total_respawned);
        assert_eq!(a.ticks, 300);
    }
}

#[test]
fn test_different_seeds_differ() {
    let mut scene = Preset::SolarSystem.scene();
    let a = Simulation::new(&scene);
    scene.simulation.seed += 1;
    let b = Simulation::new(&scene);

    assert_ne!(get_body_states(&a), get_body_states(&b));
}

#[test]
fn test_every_preset_builds_and_runs() {
    for preset in Preset::ALL {
        let scene = preset.scene();
        scene.validate().expect("presets must validate");
        let result = run_scene(&scene, 120);

        assert_eq!(result.scene_name, preset.name());
        assert!(result.bodies.iter().all(|b| b.position.is_finite()));
        assert!(result.diagnostics.total_energy().is_finite());
    }
}

#[test]
fn test_preset_names_round_trip() {
    for preset in Preset::ALL {
        assert_eq!(preset.name().parse::<Preset>(), Ok(preset));
    }
    let err = "black-hole".parse::<Preset>().unwrap_err();
    assert!(err.contains("solar-system"));
}

#[test]
fn test_rebuild_resets_state_but_keeps_pointer() {
    let mut sim = Simulation::new(&Preset::Nebula.scene());
    sim.set_pointer(Vec2::new(0.5, -0.25));
    for _ in 0..30 {
        sim.tick();
    }

    let scene = scene_with_bodies(vec![BodyConfig {
        position: Vec3::ONE,
        velocity: Vec3::ZERO,
        mass: 1.0,
        radius: 1.0,
        fixed: false,
    }]);
    sim.rebuild(&scene);

    assert_eq!(sim.current_tick, 0);
    assert_eq!(sim.elapsed, 0.0);
    assert_eq!(sim.world.len(), 1);
    assert!(sim.particle_systems.is_empty());
    assert_eq!(sim.pointer, Vec2::new(0.5, -0.25));
}

#[test]
fn test_pointer_is_clamped_and_drives_parallax() {
    let mut sim = Simulation::new(&SceneConfig::default());
    sim.set_pointer(Vec2::new(3.0, -0.5));

    assert_eq!(sim.pointer, Vec2::new(1.0, -0.5));
    let offset = sim.parallax_offset();
    assert!(offset.x > 0.0 && offset.y < 0.0);
}

#[test]
fn test_particle_snapshot_covers_every_system() {
    let scene = load_scene("particles.yaml").expect("fixture should load");
    let mut sim = Simulation::new(&scene);
    sim.tick();

    let states = get_particle_states(&sim);
    assert_eq!(states.len(), 200);
    assert!(states
        .iter()
        .all(|p| (0.0..=1.0).contains(&p.alpha) && p.size >= 0.0));
}

#[test]
fn test_qubit_collapse_through_simulation() {
    let scene = load_scene("particles.yaml").expect("fixture should load");
    let mut sim = Simulation::new(&scene);

    assert_eq!(sim.qubits.len(), 3);
    assert!(sim.network.is_some());
    assert!(sim.collapse_qubit(0).is_some());
    assert!(sim.collapse_qubit(10).is_none());
}

#[test]
fn test_build_from_source_rejects_invalid_scene() {
    assert!(build_simulation_from_source("simulation: { restitution: 2.0 }").is_err());
    let sim = build_simulation_from_source("name: ok").expect("minimal scene is valid");
    assert_eq!(sim.scene.display_name(), "ok");
}
