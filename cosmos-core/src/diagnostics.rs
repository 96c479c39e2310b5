//! Whole-system measurements used for reporting and sanity checks

use crate::engine::World;
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemDiagnostics {
    pub momentum: Vec3,
    pub kinetic_energy: f32,
    pub potential_energy: f32,
    /// Deepest interpenetration of any pair, zero when nothing overlaps
    pub max_overlap: f32,
}

impl SystemDiagnostics {
    /// Measure `world`. Potential energy uses the same `min_distance` skip
    /// as the force evaluator.
    pub fn measure(world: &World, g: f32, min_distance: f32) -> Self {
        let mut potential_energy = 0.0;
        let mut max_overlap: f32 = 0.0;

        let bodies = &world.bodies;
        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                let dist = a.pos.distance(b.pos);
                if dist >= min_distance && dist > 0.0 {
                    potential_energy -= g * a.mass * b.mass / dist;
                }
                max_overlap = max_overlap.max(a.radius + b.radius - dist);
            }
        }

        Self {
            momentum: world.total_momentum(),
            kinetic_energy: bodies.iter().map(|b| b.kinetic_energy()).sum(),
            potential_energy,
            max_overlap,
        }
    }

    pub fn total_energy(&self) -> f32 {
        self.kinetic_energy + self.potential_energy
    }
}

/// One-line human readable summary
pub fn format_diagnostics(d: &SystemDiagnostics) -> String {
    format!(
        "momentum=({:.4}, {:.4}, {:.4}) kinetic={:.6} potential={:.6} total={:.6} max_overlap={:.4}",
        d.momentum.x,
        d.momentum.y,
        d.momentum.z,
        d.kinetic_energy,
        d.potential_energy,
        d.total_energy(),
        d.max_overlap
    )
}
