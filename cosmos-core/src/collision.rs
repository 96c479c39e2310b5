//! Pairwise impulse-based collision response for bodies
//!
//! Every unordered pair is tested (no broad phase). Overlapping pairs that
//! are approaching receive an impulse scaled by the restitution coefficient;
//! every overlapping pair is then pushed apart along the contact normal.

use crate::engine::Body;
use glam::Vec3;

/// Resolve all overlapping pairs once, in ascending pair order.
/// Returns the number of pairs that were resolved.
pub fn resolve_collisions(bodies: &mut [Body], restitution: f32) -> usize {
    let restitution = restitution.clamp(0.0, 1.0);
    let n = bodies.len();
    let mut contacts = 0;

    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = bodies.split_at_mut(j);
            if resolve_pair(&mut head[i], &mut tail[0], restitution) {
                contacts += 1;
            }
        }
    }

    contacts
}

/// Resolve a single pair. Returns true if the pair overlapped and was
/// resolved; two fixed bodies are skipped and never count as a contact.
pub fn resolve_pair(a: &mut Body, b: &mut Body, restitution: f32) -> bool {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let reach = a.radius + b.radius;
    if dist >= reach {
        return false;
    }

    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum == 0.0 {
        // two anchors: nothing can move
        return false;
    }

    // Coincident centres have no defined normal; pick +X.
    let normal = if dist > f32::EPSILON { delta / dist } else { Vec3::X };

    let closing = (b.vel - a.vel).dot(normal);
    if closing <= 0.0 {
        let impulse = -(1.0 + restitution) * closing / inv_sum;
        a.vel -= normal * (impulse * inv_a);
        b.vel += normal * (impulse * inv_b);
    }

    let overlap = reach - dist;
    a.pos -= normal * (overlap * inv_a / inv_sum);
    b.pos += normal * (overlap * inv_b / inv_sum);

    true
}
