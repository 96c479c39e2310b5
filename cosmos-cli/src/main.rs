mod viewer;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use cosmos_core::diagnostics::format_diagnostics;
use cosmos_core::{run_scene, Preset, SceneConfig};
use std::path::{Path, PathBuf};
use viewer::ViewerApp;

#[derive(Parser)]
#[command(name = "cosmos")]
#[command(about = "Cosmos - gravity, collision and particle scenes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene headless and print the final state
    Run {
        /// Path to a YAML scene file
        scene: Option<PathBuf>,

        /// Built-in scene to use instead of a file
        #[arg(short, long, conflicts_with = "scene")]
        preset: Option<Preset>,

        /// Number of ticks to simulate
        #[arg(short, long, default_value_t = 600)]
        ticks: u64,
    },

    /// List the built-in scenes
    Presets,

    /// Open the interactive viewer; scene files are watched and reloaded
    View {
        /// Path to a YAML scene file
        scene: Option<PathBuf>,

        /// Built-in scene to use instead of a file
        #[arg(short, long, conflicts_with = "scene")]
        preset: Option<Preset>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scene,
            preset,
            ticks,
        } => {
            let scene_cfg = resolve_scene(scene.as_deref(), preset)?;
            run_headless(&scene_cfg, ticks);
        }
        Commands::Presets => {
            for preset in Preset::ALL {
                println!("{:<14} {}", preset.name(), preset.description());
            }
        }
        Commands::View { scene, preset } => {
            let scene_cfg = resolve_scene(scene.as_deref(), preset)?;
            let source_path = scene.map(|p| p.canonicalize().unwrap_or(p));
            let options = eframe::NativeOptions::default();
            eframe::run_native(
                "Cosmos",
                options,
                Box::new(move |cc| Ok(Box::new(ViewerApp::new(scene_cfg, source_path, cc)))),
            )
            .map_err(|e| anyhow!("viewer failed: {e}"))?;
        }
    }

    Ok(())
}

fn resolve_scene(path: Option<&Path>, preset: Option<Preset>) -> Result<SceneConfig> {
    match (path, preset) {
        (Some(path), _) => SceneConfig::load(path)
            .with_context(|| format!("failed to load scene {}", path.display())),
        (None, Some(preset)) => Ok(preset.scene()),
        (None, None) => Err(anyhow!("give a scene file or --preset (see `cosmos presets`)")),
    }
}

fn run_headless(scene: &SceneConfig, ticks: u64) {
    let result = run_scene(scene, ticks);

    println!(
        "scene {} after {} ticks ({:.2}s)",
        result.scene_name, result.ticks, result.elapsed
    );
    for body in &result.bodies {
        println!(
            "body {:>3}{} pos = ({:.4}, {:.4}, {:.4}) vel = ({:.4}, {:.4}, {:.4})",
            body.index,
            if body.fixed { "*" } else { " " },
            body.position.x,
            body.position.y,
            body.position.z,
            body.velocity.x,
            body.velocity.y,
            body.velocity.z,
        );
    }
    println!("contacts = {}", result.total_contacts);
    println!("respawned = {}", result.total_respawned);
    println!("{}", format_diagnostics(&result.diagnostics));
}
