use glam::Vec3;

/// A simulated point mass
#[derive(Debug, Clone)]
pub struct Body {
    pub pos: Vec3,
    pub vel: Vec3,
    pub force: Vec3, // accumulated this tick, cleared by the integrator
    pub mass: f32,
    pub radius: f32,
    pub fixed: bool, // immovable anchor (e.g. a central star)
}

impl Body {
    pub fn new(pos: Vec3, mass: f32, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec3::ZERO,
            force: Vec3::ZERO,
            mass,
            radius: radius.max(0.0),
            fixed: false,
        }
    }

    pub fn with_velocity(mut self, vel: Vec3) -> Self {
        self.vel = vel;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Inverse mass used by the integrator and the collision resolver.
    /// Fixed and massless bodies report zero, so they never accelerate.
    pub fn inverse_mass(&self) -> f32 {
        if self.fixed || self.mass <= 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    pub fn momentum(&self) -> Vec3 {
        self.vel * self.mass
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.length_squared()
    }
}

/// The set of bodies owned by a simulation
#[derive(Debug, Default, Clone)]
pub struct World {
    pub bodies: Vec<Body>,
}

impl World {
    pub fn new() -> Self {
        Self { bodies: Vec::new() }
    }

    pub fn with_bodies(bodies: Vec<Body>) -> Self {
        Self { bodies }
    }

    /// Accumulate pairwise Newtonian attraction into each body's force.
    ///
    /// Every unordered pair contributes `g * m_i * m_j / d²` along the line
    /// between them, added to `i` and subtracted from `j`. Pairs closer than
    /// `min_distance` are skipped entirely.
    pub fn accumulate_gravity(&mut self, g: f32, min_distance: f32) {
        let n = self.bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let delta = self.bodies[j].pos - self.bodies[i].pos;
                let dist = delta.length();
                if dist < min_distance || dist == 0.0 {
                    continue;
                }

                let magnitude = g * self.bodies[i].mass * self.bodies[j].mass / (dist * dist);
                let force = delta / dist * magnitude;

                self.bodies[i].force += force;
                self.bodies[j].force -= force;
            }
        }
    }

    pub fn clear_forces(&mut self) {
        for body in &mut self.bodies {
            body.force = Vec3::ZERO;
        }
    }

    pub fn total_momentum(&self) -> Vec3 {
        self.bodies.iter().map(Body::momentum).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }
}
