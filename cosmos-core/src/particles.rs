//! Non-interacting particle systems
//!
//! Particles never see each other. Each system applies one behaviour rule
//! (see [`ParticleKind`]) to every particle independently, then respawns in
//! place any particle whose lifetime ran out or that left the bounding
//! sphere. The particle count never changes after construction.

use crate::config::{ParticleKind, ParticleSystemConfig};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// A single visual particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    pub life: f32,     // remaining lifetime, counts down
    pub lifetime: f32, // lifetime drawn at spawn
    pub base_size: f32,
    pub size: f32,
    pub color: Vec3,
    pub alpha: f32,
    pub phase: f32, // per-particle constant in [0, TAU)
}

/// A fixed-size collection of particles sharing one behaviour
#[derive(Debug)]
pub struct ParticleSystem {
    pub config: ParticleSystemConfig,
    pub particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleSystem {
    pub fn new(config: ParticleSystemConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..config.count).map(|_| spawn(&config, &mut rng)).collect();
        Self {
            config,
            particles,
            rng,
        }
    }

    pub fn kind(&self) -> ParticleKind {
        self.config.kind
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Advance every particle by `dt`, respawning expired or escaped ones.
    /// Returns how many particles were respawned this tick.
    pub fn update(&mut self, dt: f32, elapsed: f32) -> usize {
        let mut respawned = 0;
        for particle in self.particles.iter_mut() {
            *particle = advance(&self.config, particle, dt, elapsed);
            if needs_respawn(&self.config, particle) {
                *particle = spawn(&self.config, &mut self.rng);
                respawned += 1;
            }
        }
        respawned
    }
}

/// Draw a fresh particle from the system's spawn distribution
pub fn spawn(config: &ParticleSystemConfig, rng: &mut StdRng) -> Particle {
    let spawn_radius = if config.spawn_radius.is_finite() {
        config.spawn_radius.max(0.0)
    } else {
        0.0
    };
    let pos = loop {
        // cube root keeps the points uniform over the ball's volume
        let radius = spawn_radius * rng.gen::<f32>().cbrt();
        let offset = (random_unit(rng) * radius).clamp_length_max(spawn_radius);
        let pos = config.origin + offset;
        // adding to a distant origin can round the point past the sphere
        if pos.distance(config.origin) <= spawn_radius {
            break pos;
        }
    };

    let heading = match config.kind {
        ParticleKind::Streaming => stream_direction(config),
        _ => random_unit(rng),
    };
    let vel = heading * sample(rng, config.speed);

    let lifetime = sample(rng, config.lifetime);
    let size = sample(rng, config.size);

    Particle {
        pos,
        vel,
        life: lifetime,
        lifetime,
        base_size: size,
        size,
        color: Vec3::from_array(config.color),
        alpha: 1.0,
        phase: rng.gen_range(0.0..TAU),
    }
}

/// Pure per-particle behaviour: returns the particle's state after `dt`
pub fn advance(config: &ParticleSystemConfig, p: &Particle, dt: f32, elapsed: f32) -> Particle {
    let mut next = p.clone();
    next.life -= dt;

    match config.kind {
        ParticleKind::Drifting => {
            next.pos += next.vel * dt;
            next.alpha = 0.65 + 0.35 * (elapsed * 1.5 + p.phase).sin();
        }
        ParticleKind::Streaming => {
            let lateral = stream_direction(config).any_orthonormal_vector();
            let sway = lateral * (elapsed * 2.0 + p.phase).sin() * 0.2 * p.vel.length();
            next.pos += (next.vel + sway) * dt;
        }
        ParticleKind::Comet => {
            next.pos += next.vel * dt;
            let remaining = if p.lifetime > 0.0 {
                (next.life / p.lifetime).clamp(0.0, 1.0)
            } else {
                0.0
            };
            next.size = p.base_size * remaining;
            next.alpha = remaining;
        }
        ParticleKind::Debris => {
            let jitter = Vec3::new(
                (elapsed * 3.1 + p.phase).sin(),
                (elapsed * 2.3 + p.phase * 1.7).cos(),
                (elapsed * 1.7 + p.phase * 2.9).sin(),
            );
            let damping = (1.0 - config.damping * dt).max(0.0);
            next.vel = (next.vel + jitter * config.chaos * dt) * damping;
            next.pos += next.vel * dt;
        }
    }

    next
}

pub fn needs_respawn(config: &ParticleSystemConfig, p: &Particle) -> bool {
    p.life <= 0.0 || p.pos.distance(config.origin) > config.bound_radius
}

fn stream_direction(config: &ParticleSystemConfig) -> Vec3 {
    let dir = config.direction.normalize_or_zero();
    if dir == Vec3::ZERO {
        Vec3::X
    } else {
        dir
    }
}

fn sample(rng: &mut StdRng, [min, max]: [f32; 2]) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

fn random_unit(rng: &mut StdRng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1.0e-6 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}
