// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, builds the concrete record source and chart sink, and
// hands everything else to Layer 2 (application).
//
// Three commands are supported:
//   1. `plot`    — scatterplots of the raw dataset
//   2. `train`   — plots, fits the model, saves a checkpoint
//   3. `predict` — loads the checkpoint and predicts one row
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PlotArgs, PredictArgs, TrainArgs};

use crate::application::{
    plot_use_case::PlotUseCase,
    predict_use_case::PredictUseCase,
    train_use_case::{TrainConfig, TrainUseCase},
};
use crate::data::loader::{CsvLoader, CsvSource};
use crate::infra::charts::ChartWriter;

#[derive(Parser, Debug)]
#[command(
    name = "apparent-temp",
    version,
    about = "Fit a linear regression predicting apparent temperature from weather CSV features."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Plot(args)    => run_plot(args),
            Commands::Train(args)   => run_train(args),
            Commands::Predict(args) => run_predict(args),
        }
    }
}

fn loader_for(source: &str, label: &str, columns: Option<Vec<String>>) -> CsvLoader {
    let loader = CsvLoader::new(CsvSource::parse(source), label);
    match columns {
        Some(cols) => loader.with_columns(cols),
        None       => loader,
    }
}

fn run_plot(args: PlotArgs) -> Result<()> {
    let loader = loader_for(&args.source.source, &args.source.label, args.source.columns);
    let sink   = ChartWriter::new(&args.charts.chart_dir);

    let mut plot = PlotUseCase::new(
        args.source.label,
        args.charts.scatter_columns,
        args.charts.scatter_limit,
    );
    if !args.no_shuffle {
        plot = plot.shuffled(args.seed);
    }
    let charts = plot.execute(&loader, &sink)?;

    println!("Rendered {} charts into '{}'", charts, sink.dir().display());
    Ok(())
}

fn run_train(args: TrainArgs) -> Result<()> {
    let cfg = match args.config.clone() {
        Some(path) => TrainConfig::load(path)?,
        None       => TrainConfig::from(args),
    };
    tracing::info!("Starting training on data from: {}", cfg.source);

    let loader = loader_for(&cfg.source, &cfg.label, cfg.columns.clone());
    let sink   = ChartWriter::new(&cfg.chart_dir);

    let outcome = TrainUseCase::new(cfg.clone()).execute(&loader, &sink)?;
    let report  = &outcome.report;

    println!("Training completed.");
    println!("  features:   {}", outcome.schema.columns().join(", "));
    println!("  samples:    {} train / {} validation", outcome.train_n, outcome.valid_n);
    println!("  epochs:     {}", report.epochs_run);
    println!("  final loss: {:.4}", report.final_metrics.loss);
    if let Some((epoch, val)) = report.best_val {
        println!("  best val:   {:.4} (epoch {})", val, epoch);
    }
    println!("Checkpoint saved to '{}'", cfg.checkpoint_dir);
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    let use_case = PredictUseCase::new(&args.checkpoint_dir)?;
    let value    = use_case.predict(&args.values)?;
    println!("{}: {:.2}", use_case.label().replace('_', " "), value);
    Ok(())
}
