//! Initial state seeding and built-in scenes
//!
//! `seed_bodies` turns the body sections of a [`SceneConfig`] into runtime
//! [`Body`] values. [`Preset`] provides the scenes used by the demo pages.

use crate::config::{
    BodyConfig, OrbiterConfig, ParticleKind, ParticleSystemConfig, SceneConfig, SimulationConfig,
    VisualizerConfig,
};
use crate::engine::Body;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::TAU;
use std::str::FromStr;

/// Build the initial body list: explicit bodies first, then the seeded
/// orbital system if one is configured.
pub fn seed_bodies(scene: &SceneConfig, rng: &mut StdRng) -> Vec<Body> {
    let mut bodies: Vec<Body> = scene.bodies.iter().map(body_from_config).collect();

    if let Some(orbiters) = &scene.orbiters {
        bodies.extend(seed_orbiters(
            orbiters,
            scene.simulation.gravity_constant,
            rng,
        ));
    }

    bodies
}

fn body_from_config(bc: &BodyConfig) -> Body {
    let body = Body::new(bc.position, bc.mass, bc.radius).with_velocity(bc.velocity);
    if bc.fixed {
        body.fixed()
    } else {
        body
    }
}

/// A fixed central star followed by `count` bodies on near-circular orbits
/// around it. Orbital speed is `sqrt(G * M / r)`, tangential to the radius.
pub fn seed_orbiters(cfg: &OrbiterConfig, g: f32, rng: &mut StdRng) -> Vec<Body> {
    let mut bodies = Vec::with_capacity(cfg.count + 1);
    bodies.push(Body::new(cfg.center, cfg.central_mass, cfg.central_radius).fixed());

    for _ in 0..cfg.count {
        let r = sample(rng, [cfg.inner_radius, cfg.outer_radius]);
        let angle = rng.gen_range(0.0..TAU);
        let tilt = if cfg.inclination > 0.0 {
            rng.gen_range(-cfg.inclination..cfg.inclination)
        } else {
            0.0
        };

        // orbit plane is XZ, tilted about the radial axis
        let radial = Vec3::new(angle.cos(), 0.0, angle.sin());
        let tangent = Vec3::new(-angle.sin(), 0.0, angle.cos());
        let tangent = (tangent * tilt.cos() + Vec3::Y * tilt.sin()).normalize();

        let speed = if r > 0.0 {
            (g * cfg.central_mass / r).sqrt()
        } else {
            0.0
        };

        let body = Body::new(
            cfg.center + radial * r,
            sample(rng, cfg.mass),
            sample(rng, cfg.radius),
        )
        .with_velocity(tangent * speed);
        bodies.push(body);
    }

    bodies
}

fn sample(rng: &mut StdRng, [min, max]: [f32; 2]) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Built-in scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    SolarSystem,
    Collisions,
    Nebula,
    Empty,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::SolarSystem,
        Preset::Collisions,
        Preset::Nebula,
        Preset::Empty,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::SolarSystem => "solar-system",
            Preset::Collisions => "collisions",
            Preset::Nebula => "nebula",
            Preset::Empty => "empty",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Preset::SolarSystem => "fixed star with orbiting planets over a drifting star field",
            Preset::Collisions => "asteroid cluster with gravity and bouncing collisions",
            Preset::Nebula => "particle systems of every kind, no bodies",
            Preset::Empty => "nothing at all; every tick is a no-op",
        }
    }

    pub fn scene(self) -> SceneConfig {
        match self {
            Preset::SolarSystem => solar_system(),
            Preset::Collisions => collisions(),
            Preset::Nebula => nebula(),
            Preset::Empty => SceneConfig {
                name: Some(self.name().to_string()),
                ..SceneConfig::default()
            },
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Preset::ALL.iter().map(|p| p.name()).collect();
                format!("unknown preset '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

fn solar_system() -> SceneConfig {
    SceneConfig {
        name: Some("solar-system".to_string()),
        simulation: SimulationConfig {
            gravity_constant: 0.5,
            enable_collisions: true,
            ..SimulationConfig::default()
        },
        bodies: Vec::new(),
        orbiters: Some(OrbiterConfig {
            count: 8,
            central_mass: 1000.0,
            central_radius: 6.0,
            inner_radius: 20.0,
            outer_radius: 90.0,
            mass: [0.5, 5.0],
            radius: [0.5, 2.0],
            inclination: 0.05,
            ..OrbiterConfig::default()
        }),
        particles: vec![ParticleSystemConfig {
            kind: ParticleKind::Drifting,
            count: 600,
            spawn_radius: 300.0,
            bound_radius: 320.0,
            lifetime: [10.0, 30.0],
            speed: [0.05, 0.3],
            size: [0.3, 1.2],
            ..ParticleSystemConfig::default()
        }],
        visualizers: VisualizerConfig::default(),
    }
}

fn collisions() -> SceneConfig {
    SceneConfig {
        name: Some("collisions".to_string()),
        simulation: SimulationConfig {
            gravity_constant: 2.0,
            restitution: 0.8,
            min_distance: 0.5,
            ..SimulationConfig::default()
        },
        bodies: vec![
            BodyConfig {
                position: Vec3::new(-30.0, 0.0, 0.0),
                velocity: Vec3::new(4.0, 0.5, 0.0),
                mass: 20.0,
                radius: 3.0,
                fixed: false,
            },
            BodyConfig {
                position: Vec3::new(30.0, 0.0, 0.0),
                velocity: Vec3::new(-4.0, -0.5, 0.0),
                mass: 20.0,
                radius: 3.0,
                fixed: false,
            },
        ],
        orbiters: Some(OrbiterConfig {
            count: 24,
            central_mass: 200.0,
            central_radius: 4.0,
            inner_radius: 10.0,
            outer_radius: 40.0,
            mass: [1.0, 4.0],
            radius: [1.0, 2.5],
            inclination: 0.3,
            ..OrbiterConfig::default()
        }),
        particles: vec![ParticleSystemConfig {
            kind: ParticleKind::Debris,
            count: 200,
            spawn_radius: 40.0,
            bound_radius: 60.0,
            lifetime: [2.0, 6.0],
            speed: [0.5, 3.0],
            size: [0.2, 0.6],
            color: [0.8, 0.6, 0.4],
            ..ParticleSystemConfig::default()
        }],
        visualizers: VisualizerConfig::default(),
    }
}

fn nebula() -> SceneConfig {
    SceneConfig {
        name: Some("nebula".to_string()),
        simulation: SimulationConfig {
            enable_gravity: false,
            enable_collisions: false,
            ..SimulationConfig::default()
        },
        bodies: Vec::new(),
        orbiters: None,
        particles: vec![
            ParticleSystemConfig {
                kind: ParticleKind::Drifting,
                count: 800,
                spawn_radius: 150.0,
                bound_radius: 160.0,
                color: [0.7, 0.8, 1.0],
                ..ParticleSystemConfig::default()
            },
            ParticleSystemConfig {
                kind: ParticleKind::Streaming,
                count: 300,
                spawn_radius: 80.0,
                bound_radius: 100.0,
                lifetime: [4.0, 10.0],
                speed: [5.0, 12.0],
                direction: Vec3::new(1.0, 0.2, 0.0),
                color: [0.4, 0.9, 1.0],
                ..ParticleSystemConfig::default()
            },
            ParticleSystemConfig {
                kind: ParticleKind::Comet,
                count: 120,
                spawn_radius: 5.0,
                bound_radius: 120.0,
                lifetime: [1.5, 4.0],
                speed: [8.0, 20.0],
                size: [1.0, 2.5],
                color: [1.0, 0.85, 0.5],
                ..ParticleSystemConfig::default()
            },
            ParticleSystemConfig {
                kind: ParticleKind::Debris,
                count: 200,
                spawn_radius: 30.0,
                bound_radius: 50.0,
                lifetime: [3.0, 8.0],
                speed: [0.5, 2.0],
                damping: 0.4,
                chaos: 3.0,
                color: [1.0, 0.4, 0.6],
                ..ParticleSystemConfig::default()
            },
        ],
        visualizers: VisualizerConfig {
            qubits: 4,
            network: vec![3, 5, 4, 2],
            refresh_interval: 0.5,
        },
    }
}
