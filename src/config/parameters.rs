//! Experiment hyperparameters.
//!
//! Parameters are read from a JSON document whose `parameters` object holds
//! any subset of the fields below; absent fields take their defaults and
//! unknown fields are rejected.
//!
//! ```
//! use toxprep::config::Parameters;
//!
//! let params = Parameters::from_json_str(
//!     r#"{"parameters": {"experiment_dir": "/tmp/run", "char_ngram_max": 3}}"#,
//! ).unwrap();
//! assert_eq!(params.char_ngram_max, 3);
//! assert_eq!(params.maxlen_words, 200);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, ToxPrepError};
use crate::text::cleaner::TextCleanerConfig;

/// Accept `true`/`false` as well as integer flags (`0` is false).
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
    })
}

/// Every recognised hyperparameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    /// Root of all experiment output; transformer blobs go under
    /// `<experiment_dir>/transformers`.
    pub experiment_dir: PathBuf,

    pub maxlen_char: usize,
    pub maxlen_words: usize,
    /// Vocabulary size of the char TF-IDF and char sequence tokenizer.
    pub max_features_char: usize,
    /// Vocabulary size of the word TF-IDF, word tokenizer and embeddings.
    pub max_features_word: usize,
    /// Upper bound of the char TF-IDF n-gram range.
    pub char_ngram_max: usize,

    pub embedding_filepath: Option<PathBuf>,
    pub word_embedding_size: usize,
    pub char_embedding_size: usize,
    #[serde(deserialize_with = "flag")]
    pub trainable_embedding: bool,

    pub filter_nr: usize,
    pub kernel_size: usize,
    pub repeat_block: usize,
    pub dense_size: usize,
    pub repeat_dense: usize,
    pub l2_reg_convo: f64,
    pub l2_reg_dense: f64,
    #[serde(deserialize_with = "flag")]
    pub use_prelu: bool,
    #[serde(deserialize_with = "flag")]
    pub use_batch_norm: bool,
    pub dropout_convo: f64,
    pub dropout_dense: f64,
    pub dropout_lstm: f64,
    #[serde(deserialize_with = "flag")]
    pub global_pooling: bool,

    pub lr: f64,
    pub momentum: f64,
    pub gamma: f64,
    pub patience: usize,
    pub epochs_nr: usize,
    pub batch_size_train: usize,

    pub log_reg_c: f64,
    pub ensemble_log_reg_c: f64,
    pub num_workers: usize,
    /// Per-model weights of the prediction average.
    pub weights: Vec<f64>,

    #[serde(deserialize_with = "flag")]
    pub drop_punctuation: bool,
    #[serde(deserialize_with = "flag")]
    pub drop_newline: bool,
    #[serde(deserialize_with = "flag")]
    pub drop_multispaces: bool,
    #[serde(deserialize_with = "flag")]
    pub all_lower_case: bool,
    pub fill_na_with: Option<String>,
    pub deduplication_threshold: Option<f64>,
    /// Allow-list vocabulary; when set, cleaned text is reduced to its words.
    pub word_list_filepath: Option<PathBuf>,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            experiment_dir: PathBuf::from("experiment"),
            maxlen_char: 512,
            maxlen_words: 200,
            max_features_char: 20_000,
            max_features_word: 100_000,
            char_ngram_max: 4,
            embedding_filepath: None,
            word_embedding_size: 300,
            char_embedding_size: 32,
            trainable_embedding: false,
            filter_nr: 64,
            kernel_size: 3,
            repeat_block: 2,
            dense_size: 256,
            repeat_dense: 1,
            l2_reg_convo: 0.0,
            l2_reg_dense: 0.0,
            use_prelu: true,
            use_batch_norm: true,
            dropout_convo: 0.25,
            dropout_dense: 0.25,
            dropout_lstm: 0.5,
            global_pooling: true,
            lr: 0.001,
            momentum: 0.9,
            gamma: 0.95,
            patience: 5,
            epochs_nr: 100,
            batch_size_train: 128,
            log_reg_c: 4.0,
            ensemble_log_reg_c: 1.0,
            num_workers: 4,
            weights: Vec::new(),
            drop_punctuation: true,
            drop_newline: true,
            drop_multispaces: true,
            all_lower_case: true,
            fill_na_with: None,
            deduplication_threshold: None,
            word_list_filepath: None,
        }
    }
}

/// Top-level layout of a configuration document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigDocument {
    #[serde(default)]
    parameters: Parameters,
}

impl Parameters {
    /// Parse and validate a configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: ConfigDocument = serde_json::from_str(json)?;
        document.parameters.validate()?;
        Ok(document.parameters)
    }

    /// Read, parse and validate the configuration file at `path`.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading parameters from {}", path.display());
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    /// The text cleaning options.
    pub fn cleaner_config(&self) -> TextCleanerConfig {
        TextCleanerConfig {
            drop_punctuation: self.drop_punctuation,
            drop_newline: self.drop_newline,
            drop_multispaces: self.drop_multispaces,
            all_lower_case: self.all_lower_case,
            fill_na_with: self.fill_na_with.clone(),
            deduplication_threshold: self.deduplication_threshold,
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("maxlen_char", self.maxlen_char),
            ("maxlen_words", self.maxlen_words),
            ("max_features_char", self.max_features_char),
            ("max_features_word", self.max_features_word),
            ("char_ngram_max", self.char_ngram_max),
            ("word_embedding_size", self.word_embedding_size),
            ("char_embedding_size", self.char_embedding_size),
            ("filter_nr", self.filter_nr),
            ("kernel_size", self.kernel_size),
            ("dense_size", self.dense_size),
            ("batch_size_train", self.batch_size_train),
            ("num_workers", self.num_workers),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(ToxPrepError::invalid_config(format!(
                    "{name} must be positive"
                )));
            }
        }

        let dropouts = [
            ("dropout_convo", self.dropout_convo),
            ("dropout_dense", self.dropout_dense),
            ("dropout_lstm", self.dropout_lstm),
        ];
        for (name, value) in dropouts {
            if !(0.0..1.0).contains(&value) {
                return Err(ToxPrepError::invalid_config(format!(
                    "{name} must be in [0, 1), got {value}"
                )));
            }
        }

        if !(self.lr > 0.0 && self.lr.is_finite()) {
            return Err(ToxPrepError::invalid_config(format!(
                "lr must be positive, got {}",
                self.lr
            )));
        }
        if let Some(threshold) = self.deduplication_threshold {
            if !(threshold > 0.0 && threshold.is_finite()) {
                return Err(ToxPrepError::invalid_config(format!(
                    "deduplication_threshold must be positive, got {threshold}"
                )));
            }
        }
        if self.weights.iter().any(|w| !w.is_finite()) {
            return Err(ToxPrepError::invalid_config("weights must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        Parameters::default().validate().unwrap();
        let params = Parameters::from_json_str("{}").unwrap();
        assert_eq!(params, Parameters::default());
    }

    #[test]
    fn test_integer_flags() {
        let params = Parameters::from_json_str(
            r#"{"parameters": {"use_prelu": 0, "trainable_embedding": 1, "drop_newline": false}}"#,
        )
        .unwrap();
        assert!(!params.use_prelu);
        assert!(params.trainable_embedding);
        assert!(!params.drop_newline);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = Parameters::from_json_str(r#"{"parameters": {"learning_rate": 0.1}}"#);
        assert!(matches!(result, Err(ToxPrepError::Json(_))));

        let result = Parameters::from_json_str(r#"{"params": {}}"#);
        assert!(matches!(result, Err(ToxPrepError::Json(_))));
    }

    #[test]
    fn test_range_checks() {
        for json in [
            r#"{"parameters": {"char_ngram_max": 0}}"#,
            r#"{"parameters": {"dropout_dense": 1.0}}"#,
            r#"{"parameters": {"lr": 0.0}}"#,
            r#"{"parameters": {"deduplication_threshold": -1.0}}"#,
        ] {
            assert!(
                matches!(Parameters::from_json_str(json), Err(ToxPrepError::InvalidConfig(_))),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn test_cleaner_config() {
        let params = Parameters::from_json_str(
            r#"{"parameters": {"all_lower_case": false, "fill_na_with": "", "deduplication_threshold": 3.0}}"#,
        )
        .unwrap();
        let cleaner = params.cleaner_config();
        assert!(!cleaner.all_lower_case);
        assert!(cleaner.drop_punctuation);
        assert_eq!(cleaner.fill_na_with.as_deref(), Some(""));
        assert_eq!(cleaner.deduplication_threshold, Some(3.0));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"parameters": {"maxlen_char": 100}}"#).unwrap();

        assert_eq!(Parameters::from_json_file(&path).unwrap().maxlen_char, 100);
        assert!(matches!(
            Parameters::from_json_file(dir.path().join("missing.json")),
            Err(ToxPrepError::Io(_))
        ));
    }
}
