use crate::collision::resolve_collisions;
use crate::config::{ConfigError, ParticleKind, SceneConfig, SimulationConfig};
use crate::diagnostics::SystemDiagnostics;
use crate::engine::World;
use crate::integrator::step;
use crate::neural::NetworkView;
use crate::particles::ParticleSystem;
use crate::quantum::QuantumRegister;
use crate::scenario::seed_bodies;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

/// Camera offset per unit of pointer displacement
pub const PARALLAX_STRENGTH: f32 = 8.0;

/// Everything one scene needs between frames
#[derive(Debug)]
pub struct Simulation {
    pub scene: SceneConfig,
    pub world: World,
    pub particle_systems: Vec<ParticleSystem>,
    pub qubits: QuantumRegister,
    pub network: Option<NetworkView>,
    pub current_tick: u64,
    pub elapsed: f32,
    /// Pointer position in normalised viewport coordinates ([-1, 1] on each axis)
    pub pointer: Vec2,
    rng: StdRng,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub contacts: usize,
    pub respawned: usize,
}

/// Body snapshot handed to a presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct BodyState {
    pub index: usize,
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub mass: f32,
    pub fixed: bool,
}

/// Particle snapshot handed to a presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleState {
    pub kind: ParticleKind,
    pub position: Vec3,
    pub color: Vec3,
    pub alpha: f32,
    pub size: f32,
}

/// Final result of a headless run
#[derive(Debug)]
pub struct SimulationResult {
    pub scene_name: String,
    pub ticks: u64,
    pub elapsed: f32,
    pub bodies: Vec<BodyState>,
    pub diagnostics: SystemDiagnostics,
    pub total_contacts: usize,
    pub total_respawned: usize,
}

impl Simulation {
    pub fn new(scene: &SceneConfig) -> Self {
        let seed = scene.simulation.seed;
        let mut rng = StdRng::seed_from_u64(seed);

        let world = World::with_bodies(seed_bodies(scene, &mut rng));

        let particle_systems: Vec<ParticleSystem> = scene
            .particles
            .iter()
            .enumerate()
            .map(|(i, cfg)| ParticleSystem::new(cfg.clone(), seed.wrapping_add(i as u64 + 1)))
            .collect();

        let visualizers = &scene.visualizers;
        let qubits = QuantumRegister::new(visualizers.qubits);
        let network = (!visualizers.network.is_empty()).then(|| {
            NetworkView::new(&visualizers.network, visualizers.refresh_interval, &mut rng)
        });

        info!(
            scene = scene.display_name(),
            bodies = world.len(),
            particles = particle_systems.iter().map(|s| s.len()).sum::<usize>(),
            "built simulation"
        );

        Self {
            scene: scene.clone(),
            world,
            particle_systems,
            qubits,
            network,
            current_tick: 0,
            elapsed: 0.0,
            pointer: Vec2::ZERO,
            rng,
        }
    }

    pub fn settings(&self) -> &SimulationConfig {
        &self.scene.simulation
    }

    /// Tear down all state and start again from `scene`. The pointer
    /// position survives since it belongs to the host, not the scene.
    pub fn rebuild(&mut self, scene: &SceneConfig) {
        let pointer = self.pointer;
        *self = Simulation::new(scene);
        self.pointer = pointer;
    }

    /// Advance one fixed timestep: gravity, integration, collisions,
    /// particles, then the cosmetic overlays.
    pub fn tick(&mut self) -> TickReport {
        let settings = &self.scene.simulation;
        let dt = settings.timestep;

        if settings.enable_gravity {
            self.world
                .accumulate_gravity(settings.gravity_constant, settings.min_distance);
        }

        step(&mut self.world, dt);

        let contacts = if settings.enable_collisions {
            resolve_collisions(&mut self.world.bodies, settings.restitution)
        } else {
            0
        };

        self.current_tick += 1;
        self.elapsed += dt;

        let elapsed = self.elapsed;
        let respawned: usize = self
            .particle_systems
            .iter_mut()
            .map(|system| system.update(dt, elapsed))
            .sum();

        self.qubits.tick(dt);
        if let Some(network) = self.network.as_mut() {
            network.tick(dt, &mut self.rng);
        }

        trace!(tick = self.current_tick, contacts, respawned, "tick");

        TickReport {
            tick: self.current_tick,
            contacts,
            respawned,
        }
    }

    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer = pointer.clamp(Vec2::splat(-1.0), Vec2::ONE);
    }

    /// Camera shift derived from the pointer, for a simple parallax effect
    pub fn parallax_offset(&self) -> Vec2 {
        self.pointer * PARALLAX_STRENGTH
    }

    /// Measure the user's click on a qubit. `None` for an unknown index.
    pub fn collapse_qubit(&mut self, index: usize) -> Option<bool> {
        let outcome = self.qubits.collapse(index, &mut self.rng);
        if let Some(outcome) = outcome {
            debug!(index, outcome, "qubit collapsed");
        }
        outcome
    }

    pub fn diagnostics(&self) -> SystemDiagnostics {
        let settings = self.settings();
        SystemDiagnostics::measure(
            &self.world,
            settings.gravity_constant,
            settings.min_distance,
        )
    }
}

/// Build a simulation from an already validated scene
pub fn build_simulation(scene: &SceneConfig) -> Simulation {
    Simulation::new(scene)
}

/// Parse, validate and build a simulation from YAML text
pub fn build_simulation_from_source(source: &str) -> Result<Simulation, ConfigError> {
    let scene = SceneConfig::from_yaml_str(source)?;
    Ok(Simulation::new(&scene))
}

/// Advance the simulation by one tick
pub fn step_simulation(sim: &mut Simulation) -> TickReport {
    sim.tick()
}

pub fn get_body_states(sim: &Simulation) -> Vec<BodyState> {
    sim.world
        .bodies
        .iter()
        .enumerate()
        .map(|(index, b)| BodyState {
            index,
            position: b.pos,
            velocity: b.vel,
            radius: b.radius,
            mass: b.mass,
            fixed: b.fixed,
        })
        .collect()
}

pub fn get_particle_states(sim: &Simulation) -> Vec<ParticleState> {
    sim.particle_systems
        .iter()
        .flat_map(|system| {
            let kind = system.kind();
            system.particles.iter().map(move |p| ParticleState {
                kind,
                position: p.pos,
                color: p.color,
                alpha: p.alpha,
                size: p.size,
            })
        })
        .collect()
}

/// Run a scene headless for `ticks` ticks
pub fn run_scene(scene: &SceneConfig, ticks: u64) -> SimulationResult {
    let mut sim = Simulation::new(scene);
    let mut total_contacts = 0;
    let mut total_respawned = 0;

    for _ in 0..ticks {
        let report = sim.tick();
        total_contacts += report.contacts;
        total_respawned += report.respawned;
    }

    let diagnostics = sim.diagnostics();
    debug!(
        scene = scene.display_name(),
        ticks,
        total_contacts,
        total_respawned,
        energy = diagnostics.total_energy(),
        "run finished"
    );

    SimulationResult {
        scene_name: scene.display_name().to_string(),
        ticks: sim.current_tick,
        elapsed: sim.elapsed,
        bodies: get_body_states(&sim),
        diagnostics,
        total_contacts,
        total_respawned,
    }
}
