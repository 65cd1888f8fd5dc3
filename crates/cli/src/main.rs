#![deny(unsafe_code)]
//! CLI binary for the field-warp advection system.
//!
//! Subcommands:
//! - `menu` (default): interactive field selection and rectangle entry
//! - `run`: headless run of one field and rectangle, optional PNG snapshot
//! - `list`: print the field catalog

mod error;
mod menu;
mod session;

use clap::{Parser, Subcommand};
use error::CliError;
use field_warp_advection::AdvectionParams;
use field_warp_core::{Domain, FieldCatalog, Scenario};
use menu::MenuOptions;
use session::{simulate, RunConfig};
use std::io;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "field-warp", about = "Advect a drawn rectangle along a 2D vector field")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log state transitions and skipped samples (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Options shared by `menu` and `run`.
#[derive(clap::Args, Clone)]
struct AnimationArgs {
    /// Euler time step per tick (default 0.05).
    #[arg(long)]
    dt: Option<f64>,

    /// Samples per rectangle edge, endpoints included (default 10).
    #[arg(long)]
    samples: Option<usize>,

    /// Snapshot edge length in pixels.
    #[arg(long, default_value_t = 512)]
    size: usize,

    /// Keep every frame's outline in the snapshot.
    #[arg(long)]
    trail: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive menu: choose a field, enter a rectangle, animate it.
    Menu {
        /// Ticks to run after each rectangle.
        #[arg(short, long, default_value_t = field_warp_core::scenario::DEFAULT_TICKS)]
        ticks: usize,

        /// Directory for `field-<id>.png` snapshots.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        #[command(flatten)]
        animation: AnimationArgs,
    },
    /// Animate one rectangle headlessly.
    Run {
        /// Field id from `list` (1-8).
        #[arg(short, long)]
        field: Option<u8>,

        /// Press position as `x,y`.
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: Option<[f64; 2]>,

        /// Release position as `x,y`.
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Option<[f64; 2]>,

        /// Number of ticks.
        #[arg(short, long)]
        ticks: Option<usize>,

        /// Scenario JSON file; flags override its values.
        #[arg(long)]
        scenario: Option<PathBuf>,

        /// PNG output path.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        animation: AnimationArgs,
    },
    /// List available vector fields.
    List,
}

/// Parses `x,y` into a coordinate pair.
fn parse_point(s: &str) -> Result<[f64; 2], String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{s}'"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok([x, y])
}

/// Starts from `base` (scenario or defaults) and applies flag overrides.
fn advection_params(
    base: &serde_json::Value,
    args: &AnimationArgs,
) -> Result<AdvectionParams, CliError> {
    let mut params = AdvectionParams::from_json_unvalidated(base);
    if let Some(dt) = args.dt {
        params.dt = dt;
    }
    if let Some(samples) = args.samples {
        params.samples_per_edge = samples;
    }
    Ok(params.validated()?)
}

fn required(flag: &str) -> CliError {
    CliError::Input(format!("{flag} is required unless --scenario is given"))
}

fn run(cli: Cli) -> Result<(), CliError> {
    let catalog = FieldCatalog::standard();
    let command = cli.command.unwrap_or(Command::Menu {
        ticks: field_warp_core::scenario::DEFAULT_TICKS,
        out_dir: PathBuf::from("."),
        animation: AnimationArgs {
            dt: None,
            samples: None,
            size: 512,
            trail: false,
        },
    });

    match command {
        Command::List => {
            if cli.json {
                let fields: Vec<_> = catalog
                    .iter()
                    .map(|e| {
                        serde_json::json!({"id": e.id.0, "label": e.label, "title": e.title})
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&fields)?);
            } else {
                println!("Fields:");
                for e in catalog.iter() {
                    println!("  {}  {:<28} {}", e.id, e.label, e.title);
                }
            }
        }
        Command::Menu {
            ticks,
            out_dir,
            animation,
        } => {
            let options = MenuOptions {
                ticks,
                params: advection_params(&serde_json::json!({}), &animation)?,
                size: animation.size,
                trail: animation.trail,
                out_dir: Some(out_dir),
            };
            let stdin = io::stdin();
            let stdout = io::stdout();
            menu::run_menu(&catalog, &options, &mut stdin.lock(), &mut stdout.lock())?;
        }
        Command::Run {
            field,
            from,
            to,
            ticks,
            scenario,
            output,
            animation,
        } => {
            let mut scenario = match scenario {
                Some(path) => Scenario::load(&path)?,
                None => Scenario::new(
                    field.ok_or_else(|| required("--field"))?,
                    from.ok_or_else(|| required("--from"))?,
                    to.ok_or_else(|| required("--to"))?,
                ),
            };
            if let Some(field) = field {
                scenario.field = field;
            }
            if let Some(from) = from {
                scenario.start = from;
            }
            if let Some(to) = to {
                scenario.end = to;
            }
            if let Some(ticks) = ticks {
                scenario.ticks = ticks;
            }
            scenario.validate(&catalog, &Domain::standard())?;

            let config = RunConfig {
                field: scenario.field_id(),
                start: scenario.start_point(),
                end: scenario.end_point(),
                ticks: scenario.ticks,
                params: advection_params(&scenario.params, &animation)?,
                size: animation.size,
                trail: animation.trail,
                output,
            };
            let outcome = simulate(&catalog, &config)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome.to_json())?);
            } else {
                eprintln!(
                    "field {} ({} ticks, dt {}): centroid ({:.4}, {:.4}), {} samples skipped on last tick",
                    outcome.field,
                    outcome.frames,
                    config.params.dt,
                    outcome.centroid.x,
                    outcome.centroid.y,
                    outcome.skipped
                );
                if let Some(path) = &outcome.output {
                    eprintln!("snapshot -> {}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        log::debug!("exiting with code {}: {e:?}", e.exit_code());
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
