use crate::engine::World;
use glam::Vec3;

/// Step every body forward by dt using semi-implicit Euler integration
/// (v += a*dt, then x += v*dt). Fixed bodies keep their state. Force
/// accumulators are cleared for every body, fixed or not.
pub fn step(world: &mut World, dt: f32) {
    for body in world.bodies.iter_mut() {
        if !body.fixed {
            let accel = body.force * body.inverse_mass();
            body.vel += accel * dt;
            body.pos += body.vel * dt;
        }
        body.force = Vec3::ZERO;
    }
}
