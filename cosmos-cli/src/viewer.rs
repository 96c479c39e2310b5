//! Interactive viewer for cosmos scenes
//!
//! Draws bodies and particles with egui's painter, lets the user play,
//! pause, step and reset, and rebuilds the whole simulation whenever the
//! watched scene file changes.

use cosmos_core::{get_body_states, get_particle_states, SceneConfig, Simulation};
use eframe::egui;
use glam::{Vec2, Vec3};
use notify::{Event, RecommendedWatcher, Watcher};
use std::path::PathBuf;
use std::sync::mpsc;
use tracing::{info, warn};

/// Camera tilt above the XZ plane, radians
const CAMERA_TILT: f32 = 0.45;

pub struct ViewerApp {
    source_path: Option<PathBuf>,
    sim: Simulation,
    extent: f32,
    last_load_error: Option<String>,
    playing: bool,
    speed_multiplier: f32,
    /// Fractional ticks carried between frames at slow speeds
    tick_budget: f32,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
}

impl ViewerApp {
    pub fn new(
        scene: SceneConfig,
        source_path: Option<PathBuf>,
        _cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut watcher = source_path.as_ref().and_then(|_| {
            notify::recommended_watcher(move |res| {
                // the receiver may be gone during shutdown
                let _ = tx.send(res);
            })
            .ok()
        });

        if let (Some(w), Some(path)) = (watcher.as_mut(), source_path.as_ref()) {
            if let Err(e) = w.watch(path, notify::RecursiveMode::NonRecursive) {
                warn!("not watching {}: {}", path.display(), e);
            }
        }

        let sim = Simulation::new(&scene);
        let extent = view_extent(&scene, &sim);

        Self {
            source_path,
            sim,
            extent,
            last_load_error: None,
            playing: true,
            speed_multiplier: 1.0,
            tick_budget: 0.0,
            file_watcher: watcher,
            file_receiver: rx,
        }
    }

    fn reload_from_disk(&mut self) {
        let Some(path) = self.source_path.as_ref() else {
            return;
        };
        match SceneConfig::load(path) {
            Ok(scene) => {
                info!("reloading {}", path.display());
                self.sim.rebuild(&scene);
                self.extent = view_extent(&scene, &self.sim);
                self.last_load_error = None;
            }
            Err(e) => {
                // keep the last good simulation on screen
                self.last_load_error = Some(e.to_string());
                self.playing = false;
            }
        }
    }

    fn reset(&mut self) {
        let scene = self.sim.scene.clone();
        self.sim.rebuild(&scene);
    }

    fn check_file_changes(&mut self) {
        let mut needs_reload = false;
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    paths,
                    ..
                }) => {
                    if let Some(source) = &self.source_path {
                        needs_reload |= paths.iter().any(|p| p.ends_with(source) || p == source);
                    }
                }
                Ok(_) => {}
                Err(e) => warn!("file watcher error: {}", e),
            }
        }

        if needs_reload {
            self.reload_from_disk();
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(if self.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                self.playing = !self.playing;
            }
            if ui.button("⏮ Reset").clicked() {
                self.reset();
            }
            if ui.button("⏭ Step").clicked() {
                self.sim.tick();
            }

            ui.separator();
            ui.label("Speed:");
            ui.add(egui::Slider::new(&mut self.speed_multiplier, 0.1..=10.0));

            ui.separator();
            ui.label(format!(
                "{}  tick {}  t = {:.2}s",
                self.sim.scene.display_name(),
                self.sim.current_tick,
                self.sim.elapsed
            ));
        });
    }

    fn overlays(&mut self, ui: &mut egui::Ui) {
        if !self.sim.qubits.is_empty() {
            ui.heading("Qubits");
            for index in 0..self.sim.qubits.len() {
                let p = self.sim.qubits.probability_one(index).unwrap_or(0.0);
                ui.horizontal(|ui| {
                    ui.add(
                        egui::ProgressBar::new(p)
                            .desired_width(120.0)
                            .text(format!("P(1) = {:.2}", p)),
                    );
                    if ui.button("Measure").clicked() {
                        self.sim.collapse_qubit(index);
                    }
                });
            }
            if ui.button("Reset qubits").clicked() {
                self.sim.qubits.reset();
            }
            ui.separator();
        }

        if let Some(network) = &self.sim.network {
            ui.heading("Network");
            let (rect, _) = ui.allocate_exact_size(egui::vec2(200.0, 140.0), egui::Sense::hover());
            let painter = ui.painter_at(rect);
            let layers = network.activations.len().max(1) as f32;

            let node = |layer: usize, i: usize, n: usize| {
                let x = rect.left() + rect.width() * (layer as f32 + 0.5) / layers;
                let y = rect.top() + rect.height() * (i as f32 + 0.5) / n.max(1) as f32;
                egui::pos2(x, y)
            };

            for (layer, weights) in network.weights.iter().enumerate() {
                let from_n = network.activations[layer].len();
                let to_n = network.activations[layer + 1].len();
                for (to, row) in weights.iter().enumerate() {
                    for (from, w) in row.iter().enumerate() {
                        let glow = (network.pulse * std::f32::consts::TAU).sin() * 0.5 + 0.5;
                        let alpha = (w.abs() * glow * 200.0) as u8;
                        painter.line_segment(
                            [node(layer, from, from_n), node(layer + 1, to, to_n)],
                            egui::Stroke::new(1.0, egui::Color32::from_white_alpha(alpha)),
                        );
                    }
                }
            }
            for (layer, acts) in network.activations.iter().enumerate() {
                for (i, a) in acts.iter().enumerate() {
                    let shade = (a * 255.0) as u8;
                    painter.circle_filled(
                        node(layer, i, acts.len()),
                        6.0,
                        egui::Color32::from_rgb(shade / 3, shade, 255 - shade / 2),
                    );
                }
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));

        if !self.sim.qubits.is_empty() || self.sim.network.is_some() {
            egui::SidePanel::right("overlays").show(ctx, |ui| self.overlays(ui));
        }

        if let Some(error) = &self.last_load_error {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.set_max_height(100.0);
                ui.label(
                    egui::RichText::new(format!("Error: {}", error)).color(egui::Color32::RED),
                );
            });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::from_rgb(4, 6, 16)))
            .show(ctx, |ui| {
                let rect = ui.max_rect();

                if let Some(pos) = ui.input(|i| i.pointer.hover_pos()) {
                    if rect.contains(pos) {
                        let rel = pos - rect.center();
                        let half = rect.size() * 0.5;
                        self.sim.set_pointer(Vec2::new(rel.x / half.x, rel.y / half.y));
                    }
                }

                let painter = ui.painter_at(rect);
                let scale = rect.width().min(rect.height()) * 0.45 / self.extent;
                let offset = self.sim.parallax_offset();
                let to_screen = |p: Vec3| {
                    let v = project(p) - offset;
                    rect.center() + egui::vec2(v.x * scale, v.y * scale)
                };

                for p in get_particle_states(&self.sim) {
                    let color = egui::Color32::from_rgba_unmultiplied(
                        (p.color.x * 255.0) as u8,
                        (p.color.y * 255.0) as u8,
                        (p.color.z * 255.0) as u8,
                        (p.alpha.clamp(0.0, 1.0) * 255.0) as u8,
                    );
                    let radius = (p.size * scale).clamp(0.5, 3.0);
                    painter.circle_filled(to_screen(p.position), radius, color);
                }

                for body in get_body_states(&self.sim) {
                    let radius = (body.radius * scale).clamp(2.0, 40.0);
                    let fill = if body.fixed {
                        egui::Color32::from_rgb(255, 210, 80)
                    } else {
                        egui::Color32::LIGHT_BLUE
                    };
                    painter.circle_filled(to_screen(body.position), radius, fill);
                }
            });

        if self.playing {
            let (steps, budget) = ticks_this_frame(self.tick_budget, self.speed_multiplier);
            self.tick_budget = budget;
            for _ in 0..steps {
                self.sim.tick();
            }
            ctx.request_repaint();
        }
    }
}

/// Whole ticks to run this frame and the fraction left over for the next.
/// At speed 0.25 one tick runs every fourth frame.
fn ticks_this_frame(budget: f32, speed: f32) -> (usize, f32) {
    let budget = budget + speed.clamp(0.1, 10.0);
    let steps = budget.floor();
    (steps as usize, budget - steps)
}

/// Oblique view looking down onto the XZ plane
fn project(p: Vec3) -> Vec2 {
    Vec2::new(p.x, p.z * CAMERA_TILT.sin() - p.y * CAMERA_TILT.cos())
}

/// Half-width of the world region worth showing
fn view_extent(scene: &SceneConfig, sim: &Simulation) -> f32 {
    let bodies = sim
        .world
        .bodies
        .iter()
        .map(|b| b.pos.length() + b.radius)
        .fold(0.0, f32::max);
    let particles = scene
        .particles
        .iter()
        .map(|p| p.origin.length() + p.bound_radius)
        .fold(0.0, f32::max);
    bodies.max(particles).max(10.0) * 1.1
}

#[cfg(test)]
mod tests {
    use super::ticks_this_frame;

    fn run_frames(speed: f32, frames: usize) -> usize {
        let mut budget = 0.0;
        let mut total = 0;
        for _ in 0..frames {
            let (steps, left) = ticks_this_frame(budget, speed);
            budget = left;
            total += steps;
        }
        total
    }

    #[test]
    fn test_slow_speed_skips_frames() {
        assert_eq!(run_frames(0.25, 8), 2);
        assert_eq!(run_frames(0.5, 8), 4);
    }

    #[test]
    fn test_fast_speed_carries_fraction() {
        assert_eq!(run_frames(1.0, 10), 10);
        assert_eq!(run_frames(2.5, 2), 5);
    }
}
