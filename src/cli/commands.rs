//! Command implementations for the toxprep CLI.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{Parameters, SolutionConfig};
use crate::error::Result;
use crate::feature::norm::Norm;
use crate::feature::normalizer::Normalizer;
use crate::frame::record_set::RecordSet;
use crate::pipeline::FeaturePipeline;
use crate::text::cleaner::{TextCleaner, TextCleanerConfig};
use crate::text::counter::TextCounter;
use crate::text::value::TextValue;
use crate::text::word_list::WordListFilter;
use crate::transformer::Transformer;

impl From<NormArg> for Norm {
    fn from(norm: NormArg) -> Self {
        match norm {
            NormArg::L1 => Norm::L1,
            NormArg::L2 => Norm::L2,
            NormArg::Max => Norm::Max,
        }
    }
}

/// Execute a CLI command.
pub fn execute_command(args: ToxPrepArgs) -> Result<()> {
    match &args.command {
        Command::Fit(fit_args) => fit_pipeline(fit_args.clone(), &args),
        Command::Transform(transform_args) => transform_records(transform_args.clone(), &args),
        Command::Clean(clean_args) => clean_text(clean_args.clone(), &args),
        Command::Count(count_args) => count_text(count_args.clone(), &args),
        Command::ShowConfig(show_args) => show_config(show_args.clone(), &args),
    }
}

fn load_config(path: &Path) -> Result<SolutionConfig> {
    let params = Parameters::from_json_file(path)?;
    Ok(SolutionConfig::from_parameters(&params))
}

/// Read newline-delimited records from a file, or stdin.
fn read_lines(input: Option<&Path>) -> Result<Vec<TextValue>> {
    let reader: Box<dyn Read> = match input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };

    let mut records = Vec::new();
    for line in BufReader::new(reader).lines() {
        records.push(TextValue::Text(line?));
    }
    debug!("Read {} records", records.len());
    Ok(records)
}

/// Fit the feature pipeline and persist it.
fn fit_pipeline(args: FitArgs, cli_args: &ToxPrepArgs) -> Result<()> {
    let start = Instant::now();
    let config = load_config(&args.config)?;
    let records = RecordSet::from_csv_path(&args.input)?;

    let mut pipeline = FeaturePipeline::from_config(&config)?;
    let features = pipeline.fit(&records)?;

    let transformers_dir = config.transformers_dir();
    pipeline.save(&transformers_dir)?;
    info!("Pipeline fitted in {:?}", start.elapsed());

    output_result(
        "Feature pipeline fitted successfully",
        &FitResult {
            records: features.n_rows(),
            char_vocabulary_size: features.char_tfidf.cols(),
            word_vocabulary_size: features.word_tfidf.cols(),
            count_columns: features.counts.n_columns(),
            transformers_dir: transformers_dir.to_string_lossy().to_string(),
            duration_ms: start.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Transform records with a persisted pipeline.
fn transform_records(args: TransformArgs, cli_args: &ToxPrepArgs) -> Result<()> {
    let start = Instant::now();
    let config = load_config(&args.config)?;
    let records = RecordSet::from_csv_path(&args.input)?;

    let mut pipeline = FeaturePipeline::from_config(&config)?;
    pipeline.load(config.transformers_dir())?;
    let features = pipeline.transform(&records, args.train_mode)?;

    if let Some(output) = &args.output {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(output, serde_json::to_string(&features.counts)?)?;
        info!("Wrote count table to {}", output.display());
    }

    output_result(
        "Records transformed successfully",
        &TransformResult {
            records: features.n_rows(),
            char_tfidf: MatrixSummary {
                rows: features.char_tfidf.rows(),
                cols: features.char_tfidf.cols(),
                nnz: features.char_tfidf.nnz(),
            },
            word_tfidf: MatrixSummary {
                rows: features.word_tfidf.rows(),
                cols: features.word_tfidf.cols(),
                nnz: features.word_tfidf.nnz(),
            },
            count_columns: features.counts.n_columns(),
            label_columns: features.labels.as_ref().map(|l| l.columns().len()),
            output: args.output.map(|p| p.to_string_lossy().to_string()),
            duration_ms: start.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Clean newline-delimited text.
fn clean_text(args: CleanArgs, cli_args: &ToxPrepArgs) -> Result<()> {
    let config = TextCleanerConfig {
        drop_punctuation: !args.keep_punctuation,
        drop_newline: !args.keep_newline,
        drop_multispaces: !args.keep_multispaces,
        all_lower_case: !args.keep_case,
        fill_na_with: None,
        deduplication_threshold: args.deduplication_threshold,
    };
    let cleaner = TextCleaner::new(config)?;

    let mut records = cleaner.transform(&read_lines(args.input.as_deref())?)?;
    if let Some(path) = &args.word_list {
        records = WordListFilter::from_file(path)?.transform(&records)?;
    }

    let lines: Vec<String> = records
        .iter()
        .map(|value| value.text_or_empty().into_owned())
        .collect();
    output_records(&lines, cli_args)
}

/// Print the text statistics table.
fn count_text(args: CountArgs, cli_args: &ToxPrepArgs) -> Result<()> {
    let records = read_lines(args.input.as_deref())?;
    let mut table = TextCounter::new().transform(&records)?;

    if let Some(norm) = args.normalize {
        let mut normalizer = Normalizer::new(norm.into());
        table = normalizer.fit_transform(&table)?;
    }

    output_table(&table, cli_args)
}

/// Print the resolved configuration.
fn show_config(args: ShowConfigArgs, cli_args: &ToxPrepArgs) -> Result<()> {
    let params = match &args.config {
        Some(path) => Parameters::from_json_file(path)?,
        None => Parameters::default(),
    };
    let config = SolutionConfig::from_parameters(&params);
    output_result("Solution configuration", &config, cli_args)
}
