//! # Statics CLI
//!
//! Runs beam and truss analyses from project files or built-in presets.
//!
//! # Usage
//!
//! ```bash
//! # List the built-in presets
//! statics presets
//!
//! # Analyze a preset and print a report
//! statics preset simply-supported
//!
//! # Same, as JSON, and save it as a project file
//! statics --json preset pratt --save pratt.json
//!
//! # Analyze every item in a project file
//! statics --log-level debug analyze pratt.json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use statics_core::calculations::{AnalysisResult, CalculationOutput, Preset, TrussResult};
use statics_core::{load_project, save_project, Project, ProjectLock};

/// Structural statics engine
#[derive(Parser, Debug)]
#[command(name = "statics")]
#[command(author, version, about = "Beam and truss statics solver", long_about = None)]
struct Cli {
    /// Logging verbosity level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Print results as JSON instead of a text report
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze every item of a project file
    Analyze {
        /// Path to the project JSON file
        file: PathBuf,
    },

    /// Analyze a built-in preset
    Preset {
        /// Preset name, e.g. cantilever, fixed-fixed, pratt
        name: String,

        /// Also save the preset as a new project file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// List the built-in presets
    Presets,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so --json output stays parseable
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("statics v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Analyze { file } => run_analyze(file, cli.json),
        Commands::Preset { name, save } => run_preset(&name, save, cli.json),
        Commands::Presets => {
            for preset in Preset::all() {
                let kind = match preset {
                    Preset::Beam(_) => "beam",
                    Preset::Truss(_) => "truss",
                };
                println!("{:<20} {}", preset.name(), kind);
            }
            Ok(())
        }
    }
}

/// Load a project file and report every item
fn run_analyze(file: PathBuf, json: bool) -> anyhow::Result<()> {
    let project = load_project(&file).with_context(|| format!("loading {}", file.display()))?;
    info!(items = project.item_count(), title = %project.meta.title, "loaded project");

    let outputs = project.analyze_all().context("analyzing project")?;
    report(&outputs, json)
}

/// Analyze one preset, optionally saving it as a project
fn run_preset(name: &str, save: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let preset: Preset = name.parse()?;
    let mut project = Project::new("", preset.name());
    project.add_item(preset.to_item());

    if let Some(path) = save {
        let _lock = ProjectLock::acquire(&path, current_user()).with_context(|| format!("locking {}", path.display()))?;
        save_project(&project, &path).with_context(|| format!("saving {}", path.display()))?;
        info!(path = %path.display(), "saved preset project");
    }

    let outputs = project.analyze_all().context("analyzing preset")?;
    report(&outputs, json)
}

/// Name recorded in project locks
fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "statics".to_string())
}

fn report(outputs: &[CalculationOutput], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outputs)?);
        return Ok(());
    }

    for output in outputs {
        println!("═══════════════════════════════════════");
        match output {
            CalculationOutput::Beam { label, result } => print_beam(label, result),
            CalculationOutput::Truss { label, result } => print_truss(label, result),
        }
    }
    println!("═══════════════════════════════════════");
    Ok(())
}

fn status(is_valid: bool, error: Option<&str>) -> String {
    if is_valid {
        "OK".to_string()
    } else {
        format!("INVALID - {}", error.unwrap_or("unknown error"))
    }
}

fn print_beam(label: &str, result: &AnalysisResult) {
    println!("  BEAM: {}", label);
    println!("  Status: {}", status(result.is_valid, result.error.as_deref()));
    if let Some(pattern) = result.pattern {
        println!("  Pattern: {} ({:?})", pattern.display_name(), result.determinacy);
    }
    if result.reactions.is_empty() {
        return;
    }

    println!();
    println!("  Reactions:");
    for (index, reaction) in &result.reactions {
        println!(
            "    [{}] H = {:>9.3} kN   V = {:>9.3} kN   M = {:>9.3} kN·m",
            index, reaction.horizontal, reaction.vertical, reaction.moment
        );
    }
    println!();
    println!(
        "  V_max = {:.3} kN at {:.3} m",
        result.max_shear.value, result.max_shear.position
    );
    println!(
        "  M_max = {:.3} kN·m at {:.3} m",
        result.max_moment.value, result.max_moment.position
    );
    println!(
        "  M_min = {:.3} kN·m at {:.3} m",
        result.min_moment.value, result.min_moment.position
    );
    if let Some(stress) = result.max_stress {
        println!("  σ_max = {:.2} MPa", stress);
    }
    if let Some(deflection) = result.deflection {
        println!("  δ_max = {:.3} mm at {:.3} m", deflection.value, deflection.position);
    }
}

fn print_truss(label: &str, result: &TrussResult) {
    println!("  TRUSS: {}", label);
    println!("  Status: {}", status(result.is_valid, result.error.as_deref()));

    if !result.reactions.is_empty() {
        println!();
        println!("  Reactions:");
        for reaction in &result.reactions {
            println!(
                "    {:<6} Rx = {:>9.3} kN   Ry = {:>9.3} kN",
                reaction.node_id, reaction.rx, reaction.ry
            );
        }
    }

    if !result.member_forces.is_empty() {
        println!();
        println!("  Members:");
        for force in &result.member_forces {
            let kind = if force.is_tension() { "T" } else { "C" };
            println!(
                "    {:<8} N = {:>9.3} kN {}   σ = {:>8.2} MPa   ΔL = {:>7.3} mm",
                force.member_id, force.axial_force, kind, force.stress, force.elongation
            );
        }
    }
}
