//! stepweave CLI - pattern and curve generation from the command line.
//!
//! Every subcommand prints a JSON document on stdout so the output can be
//! piped straight into a sequencer frontend or another tool.

use std::io::Read;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::json;

use stepweave_automata::{column_pattern, evolve_matrix, AutomatonConfig, Boundary, Seed};
use stepweave_core::{create_rng, derive_stream_seed};
use stepweave_curve::{fit_series, FitMethod, FitSeries};
use stepweave_rhythm::{
    euclidean_pattern, note_name_to_midi, note_pool, notes, velocities, EuclidParams, NoteOptions,
    Scale, VelocityOptions,
};

/// stepweave - deterministic pattern and curve toolkit
#[derive(Parser)]
#[command(name = "stepweave")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Euclidean step pattern
    Euclid {
        /// Number of steps
        #[arg(long, default_value_t = 16)]
        steps: i64,

        /// Number of pulses to distribute
        #[arg(long, default_value_t = 4)]
        pulses: i64,

        /// Rotation applied after generation (positive = right)
        #[arg(long, default_value_t = 0)]
        rotation: i64,

        /// Also emit a velocity lane for the pattern
        #[arg(long)]
        velocities: bool,

        /// Nominal hit velocity
        #[arg(long, default_value_t = 0.9)]
        base: f64,

        /// Velocity jitter half-width
        #[arg(long, default_value_t = 0.1)]
        spread: f64,

        /// Probability that a hit becomes a ghost hit
        #[arg(long, default_value_t = 0.0)]
        ghost_chance: f64,

        /// RNG seed for the velocity lane
        #[arg(long, default_value_t = 0)]
        seed: u32,
    },

    /// Generate a kick/snare/hats kit, one RNG stream per lane
    Kit {
        /// Number of steps per lane
        #[arg(long, default_value_t = 16)]
        steps: i64,

        /// Probability that a hit becomes a ghost hit
        #[arg(long, default_value_t = 0.15)]
        ghost_chance: f64,

        /// Base RNG seed; each lane derives its own stream from it
        #[arg(long, default_value_t = 0)]
        seed: u32,
    },

    /// Generate an elementary cellular automaton pattern
    Eca {
        /// Wolfram rule number (0-255)
        #[arg(long, default_value_t = 30)]
        rule: i64,

        /// Number of generations (pattern length)
        #[arg(long, default_value_t = 16)]
        steps: i64,

        /// Number of cells per row
        #[arg(long, default_value_t = 16)]
        width: i64,

        /// Seed row: "center", "random", or a column index
        #[arg(long, default_value = "center")]
        seed: String,

        /// Columns to OR into the pattern (comma-separated; default center)
        #[arg(long)]
        columns: Option<String>,

        /// Edge policy: "wrap" or "clamp"
        #[arg(long, default_value = "wrap")]
        boundary: Boundary,

        /// Emit the full evolution matrix instead of the column pattern
        #[arg(long)]
        matrix: bool,

        /// RNG seed for "random" seeding
        #[arg(long, default_value_t = 0)]
        rng_seed: u32,
    },

    /// Map a Euclidean pattern onto a scale-derived note pool
    Notes {
        /// Number of steps
        #[arg(long, default_value_t = 16)]
        steps: i64,

        /// Number of pulses to distribute
        #[arg(long, default_value_t = 4)]
        pulses: i64,

        /// Rotation applied after generation
        #[arg(long, default_value_t = 0)]
        rotation: i64,

        /// Root note of the pool
        #[arg(long, default_value = "C2")]
        root: String,

        /// Scale name (e.g. minor_pentatonic, dorian)
        #[arg(long, default_value = "minor_pentatonic")]
        scale: Scale,

        /// Octaves spanned by the pool
        #[arg(long, default_value_t = 2)]
        octaves: u8,

        /// Pick pool notes at random instead of cycling
        #[arg(long)]
        random: bool,

        /// Pool index of the first hit in cycle mode
        #[arg(long, default_value_t = 0)]
        start_index: i64,

        /// RNG seed for random note picks
        #[arg(long, default_value_t = 0)]
        seed: u32,
    },

    /// Fit or resample an (x, y) series from a JSON file
    Fit {
        /// Input file with {"x": [...], "y": [...]} ("-" for stdin)
        #[arg(long, default_value = "-")]
        input: String,

        /// Output length
        #[arg(long, default_value_t = 16)]
        length: usize,

        /// Method: polynomial, movingAverage, gaussian, linear
        #[arg(long, default_value = "polynomial")]
        method: FitMethod,

        /// Polynomial degree (clamped to 1-8)
        #[arg(long, default_value_t = 3)]
        degree: i64,

        /// Window size / sigma for the smoothing methods
        #[arg(long, default_value_t = 0.0)]
        smoothing: f64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Euclid {
            steps,
            pulses,
            rotation,
            velocities: with_velocities,
            base,
            spread,
            ghost_chance,
            seed,
        } => {
            let pattern = euclidean_pattern(&EuclidParams::new(steps, pulses, rotation));
            let mut out = json!({ "pattern": bits(&pattern) });
            if with_velocities {
                let options = VelocityOptions {
                    base,
                    spread,
                    ghost_chance,
                    ..VelocityOptions::default()
                };
                let mut rng = create_rng(seed);
                out["velocities"] = json!(velocities(&pattern, &options, &mut rng));
            }
            out
        }

        Commands::Kit {
            steps,
            ghost_chance,
            seed,
        } => {
            let mut lanes = serde_json::Map::new();
            for (index, (name, pulses, rotation, base, spread)) in KIT_LANES.iter().enumerate() {
                let pattern = euclidean_pattern(&EuclidParams::new(steps, *pulses, *rotation));
                let options = VelocityOptions {
                    base: *base,
                    spread: *spread,
                    ghost_chance,
                    ..VelocityOptions::default()
                };
                let mut rng = create_rng(derive_stream_seed(seed, index as u32));
                let lane = velocities(&pattern, &options, &mut rng);
                lanes.insert(
                    (*name).to_string(),
                    json!({ "pattern": bits(&pattern), "velocities": lane }),
                );
            }
            json!({ "seed": seed, "lanes": lanes })
        }

        Commands::Eca {
            rule,
            steps,
            width,
            seed,
            columns,
            boundary,
            matrix,
            rng_seed,
        } => {
            let config = AutomatonConfig::coerced(rule, steps, width, parse_seed(&seed)?, boundary);
            let mut rng = create_rng(rng_seed);
            if matrix {
                let rows: Vec<Vec<u8>> = evolve_matrix(&config, &mut rng)
                    .iter()
                    .map(|row| bits(row))
                    .collect();
                json!({ "rule": config.rule, "matrix": rows })
            } else {
                let columns = parse_columns(columns.as_deref())?;
                let pattern = column_pattern(&config, &columns, &mut rng);
                json!({ "rule": config.rule, "pattern": bits(&pattern) })
            }
        }

        Commands::Notes {
            steps,
            pulses,
            rotation,
            root,
            scale,
            octaves,
            random,
            start_index,
            seed,
        } => {
            let root_midi = note_name_to_midi(&root)
                .with_context(|| format!("unparseable root note: {root}"))?;
            let pool = note_pool(root_midi, scale, octaves);
            let pattern = euclidean_pattern(&EuclidParams::new(steps, pulses, rotation));
            let options = NoteOptions {
                cycle: !random,
                start_index,
            };
            let mut rng = create_rng(seed);
            let lane = notes(&pattern, &pool, &options, &mut rng);
            json!({
                "pattern": bits(&pattern),
                "pool": pool,
                "notes": lane,
            })
        }

        Commands::Fit {
            input,
            length,
            method,
            degree,
            smoothing,
        } => {
            let series = read_series(&input)?;
            let values = fit_series(&series, length, method, degree, smoothing)?;
            json!({ "method": method.name(), "values": values })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Kit lanes: name, pulses, rotation, base velocity, jitter spread. Pulse
/// counts assume the default 16 steps; shorter lanes clamp.
const KIT_LANES: [(&str, i64, i64, f64, f64); 3] = [
    ("kick", 4, 0, 0.95, 0.05),
    ("snare", 2, 4, 0.8, 0.1),
    ("hats", 8, 1, 0.5, 0.15),
];

/// Render a bool pattern as the 0/1 integers sequencer frontends consume.
fn bits(pattern: &[bool]) -> Vec<u8> {
    pattern.iter().map(|&hit| hit as u8).collect()
}

/// Read an {"x": [...], "y": [...]} series from a file or stdin.
fn read_series(input: &str) -> anyhow::Result<FitSeries> {
    let text = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {input}"))?
    };
    serde_json::from_str(&text).context("parsing input series")
}

/// Parse the --seed argument: a named shape or a single column index.
fn parse_seed(value: &str) -> anyhow::Result<Seed> {
    match value.trim().to_lowercase().as_str() {
        "center" => Ok(Seed::Center),
        "random" => Ok(Seed::Random),
        other => match other.parse::<i64>() {
            Ok(index) => Ok(Seed::Index(index)),
            Err(_) => bail!("seed must be \"center\", \"random\", or a column index: {value}"),
        },
    }
}

/// Parse the --columns argument: comma-separated column indices.
fn parse_columns(value: Option<&str>) -> anyhow::Result<Vec<i64>> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .with_context(|| format!("bad column index: {part}"))
        })
        .collect()
}
