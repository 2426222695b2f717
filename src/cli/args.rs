//! Command line argument parsing for the toxprep CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// toxprep - text preprocessing for toxic comment classification
#[derive(Parser, Debug, Clone)]
#[command(name = "toxprep")]
#[command(about = "Text cleaning and feature extraction for toxic comment classification")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ToxPrepArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ToxPrepArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fit the feature pipeline on a labelled CSV and persist it
    Fit(FitArgs),

    /// Transform a CSV with a persisted feature pipeline
    Transform(TransformArgs),

    /// Clean newline-delimited text
    Clean(CleanArgs),

    /// Print text statistics of newline-delimited text
    Count(CountArgs),

    /// Print the resolved solution configuration
    #[command(name = "show-config")]
    ShowConfig(ShowConfigArgs),
}

/// Arguments for fitting the pipeline
#[derive(Parser, Debug, Clone)]
pub struct FitArgs {
    /// Configuration file (JSON, `{"parameters": {...}}`)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: PathBuf,

    /// Training data (CSV with header)
    #[arg(short, long, value_name = "CSV_FILE")]
    pub input: PathBuf,
}

/// Arguments for transforming data
#[derive(Parser, Debug, Clone)]
pub struct TransformArgs {
    /// Configuration file (JSON, `{"parameters": {...}}`)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: PathBuf,

    /// Data to transform (CSV with header)
    #[arg(short, long, value_name = "CSV_FILE")]
    pub input: PathBuf,

    /// Also extract the label columns
    #[arg(long)]
    pub train_mode: bool,

    /// Write the normalized count table as JSON to this file
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for cleaning text
#[derive(Parser, Debug, Clone)]
pub struct CleanArgs {
    /// Input file, one record per line (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Keep punctuation
    #[arg(long)]
    pub keep_punctuation: bool,

    /// Keep newlines
    #[arg(long)]
    pub keep_newline: bool,

    /// Keep whitespace runs
    #[arg(long)]
    pub keep_multispaces: bool,

    /// Keep letter case
    #[arg(long)]
    pub keep_case: bool,

    /// Truncate records whose word count / unique word count exceeds this
    #[arg(long, value_name = "RATIO")]
    pub deduplication_threshold: Option<f64>,

    /// Keep only the words listed in this file
    #[arg(long, value_name = "WORD_LIST")]
    pub word_list: Option<PathBuf>,
}

/// Arguments for counting text statistics
#[derive(Parser, Debug, Clone)]
pub struct CountArgs {
    /// Input file, one record per line (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Scale each row to unit norm
    #[arg(long)]
    pub normalize: Option<NormArg>,
}

/// Arguments for showing the configuration
#[derive(Parser, Debug, Clone)]
pub struct ShowConfigArgs {
    /// Configuration file (JSON, `{"parameters": {...}}`)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

/// Row norms available in CLI
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormArg {
    L1,
    L2,
    Max,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
