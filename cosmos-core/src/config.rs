//! Scene configuration loaded from YAML
//!
//! A scene is made of:
//!
//! - [`SimulationConfig`]     – timestep, constants and global toggles
//! - [`BodyConfig`]           – explicit initial state for one body
//! - [`OrbiterConfig`]        – optional seeded star-plus-orbiters system
//! - [`ParticleSystemConfig`] – one independent particle system
//! - [`VisualizerConfig`]     – sizes of the cosmetic qubit/network overlays
//!
//! Every section has defaults, so an empty document is a valid (empty) scene.
//!
//! ```yaml
//! name: binary
//! simulation:
//!   timestep: 0.0166667
//!   gravity_constant: 0.0001
//!   restitution: 0.8
//! bodies:
//!   - position: [-10, 0, 0]
//!     velocity: [1, 0, 0]
//!     mass: 10
//!     radius: 1
//!   - position: [10, 0, 0]
//!     mass: 1000
//!     radius: 3
//!     fixed: true
//! ```

use glam::Vec3;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating a scene
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scene file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scene YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f32),

    #[error("restitution must lie in [0, 1], got {0}")]
    RestitutionOutOfRange(f32),

    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: String, value: String },

    #[error("body {index}: mass must be positive and finite, got {mass}")]
    NonPositiveMass { index: usize, mass: f32 },

    #[error("body {index}: radius must be non-negative and finite, got {radius}")]
    NegativeRadius { index: usize, radius: f32 },

    #[error("{field}: range [{min}, {max}] is inverted, negative or not finite")]
    InvalidRange {
        field: String,
        min: f32,
        max: f32,
    },

    #[error("particle system {index}: spawn radius {spawn} exceeds bound radius {bound}")]
    SpawnOutsideBound { index: usize, spawn: f32, bound: f32 },
}

/// Global numerical parameters and toggles
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    pub timestep: f32,         // seconds per tick
    pub gravity_constant: f32, // G
    pub restitution: f32,      // 1 = perfectly elastic
    pub min_distance: f32,     // pairs closer than this feel no gravity
    pub enable_gravity: bool,
    pub enable_collisions: bool,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0,
            gravity_constant: 1.0e-4,
            restitution: 0.8,
            min_distance: 1.0e-3,
            enable_gravity: true,
            enable_collisions: true,
            seed: 42,
        }
    }
}

/// Initial state for one explicitly placed body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub position: Vec3,
    #[serde(default)]
    pub velocity: Vec3,
    pub mass: f32,
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default)]
    pub fixed: bool,
}

fn default_radius() -> f32 {
    1.0
}

/// Seeded orbital system: a fixed central star and `count` orbiters
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct OrbiterConfig {
    pub count: usize,
    pub center: Vec3,
    pub central_mass: f32,
    pub central_radius: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub mass: [f32; 2],
    pub radius: [f32; 2],
    pub inclination: f32, // max out-of-plane tilt, radians
}

impl Default for OrbiterConfig {
    fn default() -> Self {
        Self {
            count: 8,
            center: Vec3::ZERO,
            central_mass: 1000.0,
            central_radius: 5.0,
            inner_radius: 20.0,
            outer_radius: 80.0,
            mass: [1.0, 10.0],
            radius: [0.5, 2.0],
            inclination: 0.05,
        }
    }
}

/// Behaviour kind of a particle system
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    /// Ambient points drifting slowly and twinkling
    Drifting,
    /// Points flowing along a common direction
    Streaming,
    /// Points fading and shrinking until they respawn
    Comet,
    /// Chaotic, damped debris
    Debris,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParticleSystemConfig {
    pub kind: ParticleKind,
    pub count: usize,
    pub origin: Vec3,
    pub spawn_radius: f32,
    pub bound_radius: f32,
    pub lifetime: [f32; 2],
    pub speed: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 3],
    pub direction: Vec3, // streaming
    pub damping: f32,    // debris
    pub chaos: f32,      // debris
}

impl Default for ParticleSystemConfig {
    fn default() -> Self {
        Self {
            kind: ParticleKind::Drifting,
            count: 100,
            origin: Vec3::ZERO,
            spawn_radius: 100.0,
            bound_radius: 120.0,
            lifetime: [5.0, 20.0],
            speed: [0.1, 0.5],
            size: [0.5, 1.5],
            color: [1.0, 1.0, 1.0],
            direction: Vec3::X,
            damping: 0.5,
            chaos: 2.0,
        }
    }
}

/// Sizes of the cosmetic quantum/neural overlays
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct VisualizerConfig {
    pub qubits: usize,
    pub network: Vec<usize>, // neurons per layer
    pub refresh_interval: f32,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            qubits: 0,
            network: Vec::new(),
            refresh_interval: 0.5,
        }
    }
}

/// Top-level scene configuration
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SceneConfig {
    pub name: Option<String>,
    pub simulation: SimulationConfig,
    pub bodies: Vec<BodyConfig>,
    pub orbiters: Option<OrbiterConfig>,
    pub particles: Vec<ParticleSystemConfig>,
    pub visualizers: VisualizerConfig,
}

impl SceneConfig {
    /// Parse and validate a scene from YAML text
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let scene: SceneConfig = serde_yaml::from_str(source)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Read, parse and validate a scene file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&source)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("untitled")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        if !(sim.timestep.is_finite() && sim.timestep > 0.0) {
            return Err(ConfigError::InvalidTimestep(sim.timestep));
        }
        if !(0.0..=1.0).contains(&sim.restitution) {
            return Err(ConfigError::RestitutionOutOfRange(sim.restitution));
        }
        check_non_negative("gravity_constant", sim.gravity_constant)?;
        check_non_negative("min_distance", sim.min_distance)?;

        for (index, body) in self.bodies.iter().enumerate() {
            check_finite_vec(&format!("bodies[{index}].position"), body.position)?;
            check_finite_vec(&format!("bodies[{index}].velocity"), body.velocity)?;
            if !(body.mass.is_finite() && body.mass > 0.0) {
                return Err(ConfigError::NonPositiveMass {
                    index,
                    mass: body.mass,
                });
            }
            if !(body.radius.is_finite() && body.radius >= 0.0) {
                return Err(ConfigError::NegativeRadius {
                    index,
                    radius: body.radius,
                });
            }
        }

        if let Some(orbiters) = &self.orbiters {
            check_range("orbiters.mass", orbiters.mass)?;
            check_range("orbiters.radius", orbiters.radius)?;
            check_range(
                "orbiters.inner_radius/outer_radius",
                [orbiters.inner_radius, orbiters.outer_radius],
            )?;
            if orbiters.mass[0] <= 0.0 {
                return Err(ConfigError::NonPositiveMass {
                    index: self.bodies.len(),
                    mass: orbiters.mass[0],
                });
            }
            if !(orbiters.central_mass.is_finite() && orbiters.central_mass > 0.0) {
                return Err(ConfigError::NonPositiveMass {
                    index: self.bodies.len(),
                    mass: orbiters.central_mass,
                });
            }
            check_non_negative("orbiters.central_radius", orbiters.central_radius)?;
            check_finite_vec("orbiters.center", orbiters.center)?;
            check_finite("orbiters.inclination", orbiters.inclination)?;
        }

        for (index, system) in self.particles.iter().enumerate() {
            check_range(&format!("particles[{index}].lifetime"), system.lifetime)?;
            check_range(&format!("particles[{index}].speed"), system.speed)?;
            check_range(&format!("particles[{index}].size"), system.size)?;
            check_non_negative("particles.damping", system.damping)?;
            check_non_negative("particles.chaos", system.chaos)?;
            check_non_negative("particles.spawn_radius", system.spawn_radius)?;
            check_non_negative("particles.bound_radius", system.bound_radius)?;
            check_finite_vec(&format!("particles[{index}].origin"), system.origin)?;
            check_finite_vec(&format!("particles[{index}].direction"), system.direction)?;
            if system.lifetime[1] <= 0.0 {
                return Err(ConfigError::InvalidRange {
                    field: format!("particles[{index}].lifetime"),
                    min: system.lifetime[0],
                    max: system.lifetime[1],
                });
            }
            if system.spawn_radius > system.bound_radius {
                return Err(ConfigError::SpawnOutsideBound {
                    index,
                    spawn: system.spawn_radius,
                    bound: system.bound_radius,
                });
            }
        }

        check_non_negative("visualizers.refresh_interval", self.visualizers.refresh_interval)?;

        Ok(())
    }
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

fn check_finite(field: &str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

fn check_finite_vec(field: &str, value: Vec3) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite {
            field: field.to_string(),
            value: format!("{value}"),
        });
    }
    Ok(())
}

fn check_range(field: &str, [min, max]: [f32; 2]) -> Result<(), ConfigError> {
    if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max {
        return Err(ConfigError::InvalidRange {
            field: field.to_string(),
            min,
            max,
        });
    }
    Ok(())
}
