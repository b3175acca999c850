// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `plot`, `train` and `predict`
// and all their configurable flags.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::plot_use_case::DEFAULT_SCATTER_LIMIT;
use crate::application::train_use_case::TrainConfig;
use crate::data::loader::{DEFAULT_CSV_URL, DEFAULT_LABEL};
use crate::domain::schema::ColumnPolicy;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render feature-vs-label scatterplots of the dataset
    Plot(PlotArgs),

    /// Fit the linear regression model and save a checkpoint
    Train(TrainArgs),

    /// Predict the apparent temperature with a trained checkpoint
    Predict(PredictArgs),
}

/// Where records come from (shared by `plot` and `train`)
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// CSV URL or local file path
    #[arg(long, default_value = DEFAULT_CSV_URL)]
    pub source: String,

    /// Column the model predicts
    #[arg(long, default_value = DEFAULT_LABEL)]
    pub label: String,

    /// Only load these feature columns (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,
}

/// Chart output (shared by `plot` and `train`)
#[derive(Args, Debug, Clone)]
pub struct ChartArgs {
    /// Directory chart data files are written to
    #[arg(long, default_value = "charts")]
    pub chart_dir: String,

    /// Columns plotted against the label (comma separated)
    #[arg(long, value_delimiter = ',', default_value = "Temperature,Humidity")]
    pub scatter_columns: Vec<String>,

    /// Number of leading records plotted
    #[arg(long, default_value_t = DEFAULT_SCATTER_LIMIT)]
    pub scatter_limit: usize,
}

#[derive(Args, Debug)]
pub struct PlotArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub charts: ChartArgs,

    /// Plot the leading records in file order
    #[arg(long)]
    pub no_shuffle: bool,

    /// Seed for the shuffle on load
    #[arg(long)]
    pub seed: Option<u64>,
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Read the whole TrainConfig from a JSON file (other flags are ignored)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub charts: ChartArgs,

    /// Move this feature column to the end of the feature vector
    #[arg(long)]
    pub move_to_end: Option<String>,

    /// Fraction of rows used for training
    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,

    /// Uniformly sample at most this many rows before splitting
    #[arg(long)]
    pub max_samples: Option<usize>,

    /// Keep file order instead of shuffling on load
    #[arg(long)]
    pub no_shuffle: bool,

    /// Seed for sampling and shuffling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 100)]
    pub epochs: usize,

    /// Rows per gradient step
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 0.1)]
    pub lr: f64,

    /// Directory the trained model is saved to
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        let policy = match a.move_to_end {
            Some(column) => ColumnPolicy::MoveToEnd { column },
            None         => ColumnPolicy::ExcludeLabel,
        };
        TrainConfig {
            source:          a.source.source,
            label:           a.source.label,
            columns:         a.source.columns,
            policy,
            train_fraction:  a.train_fraction,
            max_samples:     a.max_samples,
            shuffle:         !a.no_shuffle,
            seed:            a.seed,
            epochs:          a.epochs,
            batch_size:      a.batch_size,
            lr:              a.lr,
            checkpoint_dir:  a.checkpoint_dir,
            chart_dir:       a.charts.chart_dir,
            scatter_columns: a.charts.scatter_columns,
            scatter_limit:   a.charts.scatter_limit,
        }
    }
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Feature value as NAME=VALUE, repeat for every feature
    #[arg(long = "set", value_name = "NAME=VALUE", required = true)]
    pub values: Vec<String>,

    /// Directory the model was saved to by `train`
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,
}
