mod annotations;
mod config;
mod error;
mod plotting;
mod recordings;
mod rendering;
mod trajectory;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use config::PlotConfig;
use plotting::{PlotSummary, plot_condition, plot_recording};
use recordings::recording::{Recording, locate_subject_recording};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Draws top-down trajectories of a tracked subject from per-frame bounding box detections.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JSON file overriding plot settings (reference landmark, labels, dpi, ...).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plot one subject's trajectory.
    Subject(SubjectArgs),
    /// Plot every recording of an anxiety condition on one figure.
    Cohort(CohortArgs),
}

#[derive(Args, Debug)]
struct DataArgs {
    /// Root directory holding one subdirectory per anxiety condition.
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// One of high_anxiety, low_anxiety, moderate_anxiety.
    #[arg(long, default_value = "low_anxiety")]
    condition: String,

    /// Directory the figures are written to. Created if missing.
    #[arg(long, default_value = "./figures")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct SubjectArgs {
    /// Detection file to plot. Takes precedence over --subject/--condition/--data-dir.
    #[arg(long)]
    detections: Option<PathBuf>,

    /// Subject identifier; the recording's file name starts with it.
    #[arg(long, default_value = "1")]
    subject: String,

    #[command(flatten)]
    data: DataArgs,
}

#[derive(Args, Debug)]
struct CohortArgs {
    #[command(flatten)]
    data: DataArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = if cli.verbose {
        "trajectory_plotter=debug"
    } else {
        "trajectory_plotter=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let plot_config = match &cli.config {
        Some(path) => PlotConfig::load(path)
            .with_context(|| format!("Failed to load plot config {}", path.display()))?,
        None => PlotConfig::default(),
    };

    match cli.command {
        Command::Subject(args) => plot_subject(&args, &plot_config),
        Command::Cohort(args) => plot_cohort(&args, &plot_config),
    }
}

fn plot_subject(args: &SubjectArgs, plot_config: &PlotConfig) -> Result<()> {
    let recording = match &args.detections {
        Some(path) => Recording::from_path(path)?,
        None => locate_subject_recording(&args.data.data_dir, &args.data.condition, &args.subject)?,
    };
    let summary = plot_recording(&recording, &args.data.out_dir, plot_config)
        .with_context(|| format!("Failed to plot subject {} from {}", recording.subject, recording.path.display()))?;
    report(&summary);
    Ok(())
}

fn plot_cohort(args: &CohortArgs, plot_config: &PlotConfig) -> Result<()> {
    let summary = plot_condition(&args.data.data_dir, &args.data.condition, &args.data.out_dir, plot_config)
        .with_context(|| format!("Failed to plot cohort {}", args.data.condition))?;
    report(&summary);
    Ok(())
}

fn report(summary: &PlotSummary) {
    info!(
        recordings = summary.recordings,
        points = summary.points,
        "Wrote {} and {}",
        summary.artifacts.pdf.display(),
        summary.artifacts.png.display()
    );
}
