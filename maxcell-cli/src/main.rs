//!
//! Command-line front end for nearest-neighbor max-cell estimation.
#![allow(clippy::uninlined_format_args, clippy::cast_precision_loss)]

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;

use maxcell_algorithms::{analyze, mean_and_std, EstimatorConfig, Observation};

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("estimation error: {0}")]
    Estimation(#[from] maxcell_core::Error),
}

/// Upper-bound unit-cell estimation from diffraction spot observations.
#[derive(Parser)]
#[command(name = "maxcell")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the max-cell bound from a JSON observation file
    Estimate {
        /// Input observations (JSON array of spot records)
        input: PathBuf,

        /// Rotation-window width in degrees
        #[arg(long, default_value = "45.0")]
        step_size: f64,

        /// Safety margin applied to the histogram mode
        #[arg(long, default_value = "1.5")]
        tolerance: f64,

        /// Minimum relative bin height for a max-cell candidate bin
        #[arg(long, default_value = "0.25")]
        max_height_fraction: f64,

        /// Tail fraction for the percentile spacing
        #[arg(long, default_value = "0.05")]
        percentile: f64,

        /// Target average samples per histogram bin
        #[arg(long, default_value = "5")]
        samples_per_bin: usize,

        /// Fraction of longest spacings discarded as outliers
        #[arg(long, default_value = "0.01")]
        outlier_fraction: f64,

        /// Emit the result as JSON
        #[arg(long)]
        json: bool,

        /// Print the spacing histogram analysis to stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show information about a JSON observation file
    Info {
        /// Input observations
        input: PathBuf,
    },
}

fn load_observations(path: &Path) -> Result<Vec<Observation>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate {
            input,
            step_size,
            tolerance,
            max_height_fraction,
            percentile,
            samples_per_bin,
            outlier_fraction,
            json,
            verbose,
        } => {
            let observations = load_observations(&input)?;

            let config = EstimatorConfig::new()
                .with_step_size(step_size)
                .with_tolerance(tolerance)
                .with_max_height_fraction(max_height_fraction)
                .with_percentile(percentile)
                .with_samples_per_bin(samples_per_bin)
                .with_outlier_fraction(outlier_fraction);

            let analysis = analyze(&observations, &config)?;

            if verbose {
                let spacings = &analysis.spacings;
                let (mean, std) = mean_and_std(spacings);
                eprintln!(
                    "    range:  {:6.2} - {:.2}",
                    spacings.first().copied().unwrap_or(0.0),
                    spacings.last().copied().unwrap_or(0.0)
                );
                eprintln!(
                    "    mean:   {:6.2} +/- {:6.2} on N = {}",
                    mean,
                    std,
                    spacings.len()
                );
                for (slot, &count) in analysis.histogram.counts().iter().enumerate() {
                    eprintln!(
                        "    {:8.3}: {}",
                        analysis.histogram.slot_center(slot),
                        "#".repeat(count)
                    );
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis.estimate)?);
            } else {
                println!("max_cell: {:.4}", analysis.estimate.max_cell);
                println!(
                    "percentile_spacing: {:.4}",
                    analysis.estimate.percentile_spacing
                );
            }
        }

        Commands::Info { input } => {
            let observations = load_observations(&input)?;
            println!("File: {}", input.display());
            println!("Observations: {}", observations.len());

            let mut by_imageset: BTreeMap<usize, Vec<&Observation>> = BTreeMap::new();
            for obs in &observations {
                by_imageset.entry(obs.imageset_id).or_default().push(obs);
            }
            println!("Imagesets: {}", by_imageset.len());

            for (imageset_id, members) in &by_imageset {
                let phi_min = members.iter().map(|o| o.phi).fold(f64::INFINITY, f64::min);
                let phi_max = members
                    .iter()
                    .map(|o| o.phi)
                    .fold(f64::NEG_INFINITY, f64::max);
                let entering = members.iter().filter(|o| o.entering).count();
                println!(
                    "  imageset {}: {} spots, phi {:.2} - {:.2}, {} entering / {} leaving",
                    imageset_id,
                    members.len(),
                    phi_min,
                    phi_max,
                    entering,
                    members.len() - entering
                );
            }
        }
    }

    Ok(())
}
