//! Test helper utilities for cosmos tests

use crate::config::SceneConfig;
use crate::engine::{Body, World};
use glam::Vec3;
use std::path::PathBuf;

/// Check if two f32 values are approximately equal within tolerance
pub fn approx_eq_f32(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}

/// Component-wise tolerance check for vectors
pub fn approx_eq_vec3(a: Vec3, b: Vec3, tol: f32) -> bool {
    (a - b).abs().max_element() <= tol
}

/// Path of a YAML fixture under `tests/data`
pub fn scene_data_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(filename);
    path
}

/// Load and validate a YAML fixture under `tests/data`
pub fn load_scene(filename: &str) -> Result<SceneConfig, Box<dyn std::error::Error>> {
    Ok(SceneConfig::load(scene_data_path(filename))?)
}

/// Two free bodies at rest, `distance` apart along X
pub fn two_body_world(m_a: f32, m_b: f32, distance: f32) -> World {
    World::with_bodies(vec![
        Body::new(Vec3::ZERO, m_a, 0.0),
        Body::new(Vec3::new(distance, 0.0, 0.0), m_b, 0.0),
    ])
}

/// A scene with no particles and the given bodies
pub fn scene_with_bodies(bodies: Vec<crate::config::BodyConfig>) -> SceneConfig {
    SceneConfig {
        bodies,
        ..SceneConfig::default()
    }
}
