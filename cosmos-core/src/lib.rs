pub mod collision;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod integrator;
pub mod neural;
pub mod particles;
pub mod quantum;
pub mod runtime;
pub mod scenario;

pub use config::{
    BodyConfig, ConfigError, OrbiterConfig, ParticleKind, ParticleSystemConfig, SceneConfig,
    SimulationConfig, VisualizerConfig,
};
pub use diagnostics::SystemDiagnostics;
pub use engine::{Body, World};
pub use particles::{Particle, ParticleSystem};
pub use quantum::{Gate, QuantumRegister, QubitState};
pub use neural::NetworkView;
pub use runtime::{
    build_simulation, build_simulation_from_source, get_body_states, get_particle_states,
    run_scene, step_simulation, BodyState, ParticleState, Simulation, SimulationResult,
    TickReport,
};
pub use scenario::Preset;

// Test helpers module (public for integration tests)
// Always compiled - integration tests are separate crates and need access
pub mod tests;
