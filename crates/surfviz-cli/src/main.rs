//! surfviz CLI - tessellate, inspect and export parametric surfaces.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use surfviz_core::Validate;
use surfviz_geometry::{SurfaceEntry, SurfaceRegistry};
use surfviz_math::to_hex_color;
use surfviz_mesh::{tessellate_all, tessellate_with, Resolution};
use surfviz_render::{MaterialSettings, Scene, Viewer, ViewerSettings};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "surfviz")]
#[command(about = "Parametric surface tessellator and viewer export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in surfaces
    List,

    /// Tessellate a surface and print mesh statistics
    Info {
        /// Surface name (case, spaces, '-' and '_' are ignored)
        surface: String,
        #[arg(short, long, default_value_t = Resolution::DEFAULT_SEGMENTS as i64, allow_hyphen_values = true)]
        segments: i64,
    },

    /// Write a standalone HTML viewer
    Html {
        /// Surfaces to include
        surfaces: Vec<String>,
        /// Include every built-in surface
        #[arg(long)]
        all: bool,
        #[arg(short, long)]
        output: PathBuf,
        /// Viewer settings as JSON; missing fields use defaults
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Override the settings' grid resolution
        #[arg(long, allow_hyphen_values = true)]
        segments: Option<i64>,
    },

    /// Write a glTF 2.0 JSON file
    Gltf {
        surface: String,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(short, long, default_value_t = Resolution::DEFAULT_SEGMENTS as i64, allow_hyphen_values = true)]
        segments: i64,
    },

    /// Run the viewer loop without a display and report its state
    Simulate {
        surface: String,
        #[arg(long, default_value = "60")]
        frames: usize,
        /// Seconds per frame
        #[arg(long, default_value = "0.016", allow_hyphen_values = true)]
        dt: f64,
        /// Revolutions per second
        #[arg(long)]
        speed: Option<f64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    run(cli.command)
}

fn run(command: Commands) -> Result<()> {
    let registry = SurfaceRegistry::builtin();

    match command {
        Commands::List => list_surfaces(&registry),
        Commands::Info { surface, segments } => {
            let entry = registry.find(&surface)?;
            show_info(entry, segments)
        }
        Commands::Html {
            surfaces,
            all,
            output,
            settings,
            segments,
        } => {
            let mut settings = match settings {
                Some(path) => ViewerSettings::load(&path)
                    .with_context(|| format!("Failed to load settings from {}", path.display()))?,
                None => ViewerSettings::default(),
            };
            if let Some(segments) = segments {
                settings.segments = segments;
            }
            export_html(&registry, &surfaces, all, &settings, &output)
        }
        Commands::Gltf {
            surface,
            output,
            segments,
        } => {
            let entry = registry.find(&surface)?;
            export_gltf(entry, segments, &output)
        }
        Commands::Simulate {
            surface,
            frames,
            dt,
            speed,
        } => simulate(registry, &surface, frames, dt, speed),
    }
}

fn list_surfaces(registry: &SurfaceRegistry) -> Result<()> {
    println!("{:<6} {:<14} COLOR", "ID", "NAME");
    for entry in registry.iter() {
        println!("{:<6} {:<14} {}", entry.id, entry.name, to_hex_color(entry.color));
    }
    Ok(())
}

fn show_info(entry: &SurfaceEntry, segments: i64) -> Result<()> {
    let resolution = Resolution::new(segments)?;
    let mesh = tessellate_with(entry.equation.as_ref(), resolution)
        .with_context(|| format!("Failed to tessellate {}", entry.name))?;
    mesh.validate()?;

    let bb = mesh.bounding_box();
    println!("Surface:   {}", entry.name);
    println!("Grid:      {}", resolution);
    println!("Vertices:  {}", mesh.vertex_count());
    println!("Triangles: {}", mesh.triangle_count());
    println!(
        "Bounds:    [{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
        bb.min.x, bb.min.y, bb.min.z, bb.max.x, bb.max.y, bb.max.z
    );
    Ok(())
}

/// Registry holding only the requested surfaces, in request order.
fn select_surfaces(registry: &SurfaceRegistry, names: &[String], all: bool) -> Result<SurfaceRegistry> {
    if all || names.is_empty() {
        return Ok(registry.clone());
    }
    let mut selected = SurfaceRegistry::new();
    for name in names {
        let entry = registry.find(name)?;
        selected.register_arc(&entry.name, entry.color, entry.equation.clone());
    }
    Ok(selected)
}

fn build_scene(
    registry: &SurfaceRegistry,
    names: &[String],
    all: bool,
    settings: &ViewerSettings,
) -> Result<Scene> {
    settings.validate()?;
    let selected = select_surfaces(registry, names, all)?;
    let resolution = Resolution::new(settings.segments)?;

    let mut scene = Scene::from_settings(settings);
    for (id, mesh) in tessellate_all(&selected, resolution) {
        let entry = selected.get(id)?;
        match mesh {
            Ok(mesh) => {
                let material = MaterialSettings::from_settings(entry.color, settings)?;
                scene.add_mesh(&entry.name, mesh, material);
            }
            Err(e) => warn!(surface = %entry.name, error = %e, "skipping surface"),
        }
    }
    if scene.meshes.is_empty() {
        bail!("No surface could be tessellated");
    }
    Ok(scene)
}

fn export_html(
    registry: &SurfaceRegistry,
    names: &[String],
    all: bool,
    settings: &ViewerSettings,
    output: &Path,
) -> Result<()> {
    let scene = build_scene(registry, names, all, settings)?;
    scene
        .export_html(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "Wrote {} ({} surfaces, {} triangles)",
        output.display(),
        scene.meshes.len(),
        scene.total_triangles()
    );
    Ok(())
}

fn export_gltf(entry: &SurfaceEntry, segments: i64, output: &Path) -> Result<()> {
    let settings = ViewerSettings {
        segments,
        ..ViewerSettings::default()
    };
    let resolution = Resolution::new(segments)?;
    let mesh = tessellate_with(entry.equation.as_ref(), resolution)?;

    let mut scene = Scene::from_settings(&settings);
    scene.add_mesh(&entry.name, mesh, MaterialSettings::from_settings(entry.color, &settings)?);
    let json = scene.export_gltf_json()?;
    std::fs::write(output, json).with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn simulate(registry: SurfaceRegistry, surface: &str, frames: usize, dt: f64, speed: Option<f64>) -> Result<()> {
    if !dt.is_finite() || dt < 0.0 {
        bail!("dt must be a non-negative number, got {}", dt);
    }
    let mut viewer = Viewer::new(registry, ViewerSettings::default())?;
    viewer.select_by_name(surface)?;
    if let Some(speed) = speed {
        viewer.set_rotation_speed(speed)?;
    }

    let mut last = None;
    for _ in 0..frames {
        last = Some(viewer.frame(dt)?);
    }
    info!(frames, "simulation finished");

    let angle = last.as_ref().map_or(0.0, |f| f.angle);
    println!("Surface:       {}", viewer.selected()?.name);
    println!("Frames:        {}", frames);
    println!("Angle:         {:.6} rad", angle);
    println!("Tessellations: {}", viewer.tessellation_count());
    if let Some(frame) = last {
        println!("Vertices:      {}", frame.mesh.vertex_count());
        println!("Passes:        {}", frame.passes.len());
    }
    Ok(())
}
