//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, ToxPrepArgs};
use crate::error::Result;
use crate::feature::table::FeatureTable;

/// Result structure for pipeline fitting.
#[derive(Debug, Serialize, Deserialize)]
pub struct FitResult {
    pub records: usize,
    pub char_vocabulary_size: usize,
    pub word_vocabulary_size: usize,
    pub count_columns: usize,
    pub transformers_dir: String,
    pub duration_ms: u64,
}

/// Shape summary of a sparse matrix.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatrixSummary {
    pub rows: usize,
    pub cols: usize,
    pub nnz: usize,
}

/// Result structure for pipeline transformation.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransformResult {
    pub records: usize,
    pub char_tfidf: MatrixSummary,
    pub word_tfidf: MatrixSummary,
    pub count_columns: usize,
    pub label_columns: Option<usize>,
    pub output: Option<String>,
    pub duration_ms: u64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &ToxPrepArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output cleaned records, one per line in human format.
pub fn output_records(records: &[String], args: &ToxPrepArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            for record in records {
                println!("{record}");
            }
            Ok(())
        }
        OutputFormat::Json => output_json(&records, args),
    }
}

/// Output a feature table, tab-separated in human format.
pub fn output_table(table: &FeatureTable, args: &ToxPrepArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("{}", table.columns().join("\t"));
            for row in table.rows() {
                let cells: Vec<String> = row.iter().map(|v| format_number(*v)).collect();
                println!("{}", cells.join("\t"));
            }
            Ok(())
        }
        OutputFormat::Json => output_json(table, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &ToxPrepArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    print_nested_value(&value, 0);
    Ok(())
}

fn output_json<T: Serialize + ?Sized>(result: &T, args: &ToxPrepArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Print a value as indented `key: value` lines.
fn print_nested_value(value: &serde_json::Value, indent: usize) {
    let spaces = "  ".repeat(indent);

    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                if val.is_object() {
                    println!("{spaces}{key}:");
                    print_nested_value(val, indent + 1);
                } else {
                    let formatted_val = format_value(val);
                    println!("{spaces}{key}: {formatted_val}");
                }
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{spaces}{formatted_value}");
        }
    }
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

/// Format a feature value: integers without a fraction, others to 6 places.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.6}")
    }
}
