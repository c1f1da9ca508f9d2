use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cutsync::{
    beats::BeatSet,
    config::Config,
    correlation::BeatCorrelator,
    export::{self, AnalysisReport},
    pipeline::AnalysisPipeline,
};

#[derive(Parser)]
#[command(
    name = "cutsync",
    version,
    about = "Detect video transitions and sync them to the beat",
    long_about = "Cutsync analyzes extracted video frames for scene changes (cuts, fades, dissolves, wipes, zooms, pans) and correlates them with beats from an audio beat tracker, suggesting retimings onto strong beats."
)]
struct Cli {
    /// Configuration file (optional, TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect transitions in a directory of frame images
    Analyze {
        /// Directory containing extracted frames (frame_0001.png, ...)
        #[arg(short, long)]
        frames: PathBuf,

        /// Video duration in seconds
        #[arg(short, long)]
        duration: Option<f64>,

        /// Seed for reproducible classification
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write detected transitions as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write detected transitions as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Correlate previously detected transitions with beats
    Correlate {
        /// Transitions JSON produced by `analyze`
        #[arg(short, long)]
        transitions: PathBuf,

        /// Beat tracker JSON
        #[arg(short, long)]
        beats: PathBuf,

        /// Write the correlation report as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the full analysis and write a report
    Report {
        /// Directory containing extracted frames
        #[arg(short, long)]
        frames: PathBuf,

        /// Beat tracker JSON
        #[arg(short, long)]
        beats: PathBuf,

        /// Video duration in seconds
        #[arg(short, long)]
        duration: Option<f64>,

        /// Seed for reproducible classification
        #[arg(short, long)]
        seed: Option<u64>,

        /// Report output path
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides the verbosity flag
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting cutsync v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };

    match cli.command {
        Command::Analyze { frames, duration, seed, output, csv } => {
            let pipeline = AnalysisPipeline::new(config);
            let report = pipeline.run(frames, None, duration, seed).await?;

            for t in &report.transitions {
                info!(
                    "   {} {:<8} {:>3.0}%  {}",
                    export::format_time(t.timestamp), t.kind.as_str(), t.confidence * 100.0, t.visual_cue
                );
            }

            if let Some(path) = output {
                export::write_json(&path, &report.transitions).await?;
            }
            if let Some(path) = csv {
                export::write_csv(&path, &report.transitions).await?;
            }
        }

        Command::Correlate { transitions, beats, output } => {
            let transitions = export::read_transitions(&transitions)
                .with_context(|| format!("reading transitions from {:?}", transitions))?;
            let mut beat_set = BeatSet::from_json_file(&beats)?;
            beat_set.ensure_strong_beats(config.correlation.strong_beat_prominence);

            let correlator = BeatCorrelator::with_config(config.correlation.clone());
            let correlations = correlator.correlate(&transitions, &beat_set.beats, &beat_set.strong_beats);
            let suggestions = correlator.suggest_optimal_timings(&transitions, &beat_set.strong_beats);
            let summary = correlator.summarize(&correlations);

            info!(
                "{} transitions: {} excellent, {} good, {} fair, {} poor",
                summary.total, summary.excellent, summary.good, summary.fair, summary.poor
            );
            if summary.needs_adjustment > 0 {
                warn!("{} transitions are more than {:.2}s off the beat",
                      summary.needs_adjustment, config.correlation.adjustment_threshold);
            }

            if let Some(path) = output {
                let duration = beat_set
                    .duration
                    .or_else(|| transitions.last().map(|t| t.timestamp))
                    .unwrap_or(0.0);
                let report = AnalysisReport::new(duration, 0, transitions, correlations, suggestions, summary);
                export::write_json(&path, &report).await?;
            }
        }

        Command::Report { frames, beats, duration, seed, output } => {
            let pipeline = AnalysisPipeline::new(config);
            let report = pipeline.run(frames, Some(beats), duration, seed).await?;

            export::write_json(&output, &report).await?;
            info!(
                "Report complete! {:.0}% of transitions in sync. Saved to: {:?}",
                report.summary.sync_ratio * 100.0, output
            );
        }
    }

    Ok(())
}
