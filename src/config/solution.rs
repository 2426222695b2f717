//! Solution configuration derived from [`Parameters`].
//!
//! Only the preprocessing sections drive behaviour in this crate. The
//! network, regression and averaging sections are carried as plain data for
//! downstream model components.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::char_filter::StripAccents;
use crate::config::parameters::Parameters;
use crate::feature::tfidf::{AnalyzerKind, TfidfParams};
use crate::text::cleaner::TextCleanerConfig;

/// Text column of the input.
pub const X_COLUMNS: [&str; 1] = ["comment_text"];

/// Binary label columns of the input.
pub const Y_COLUMNS: [&str; 6] = [
    "toxic",
    "severe_toxic",
    "obscene",
    "threat",
    "insult",
    "identity_hate",
];

/// Token pattern of both TF-IDF vectorizers: any run of word characters.
pub const TFIDF_TOKEN_PATTERN: &str = r"\w{1,}";

/// Name of the directory, under the cache directory, holding transformer blobs.
pub const TRANSFORMERS_DIR: &str = "transformers";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvConfig {
    pub cache_dirpath: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillNaConfig {
    pub na_columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XYSplitConfig {
    pub x_columns: Vec<String>,
    pub y_columns: Vec<String>,
}

/// Options of a sequence tokenizer feeding the networks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceTokenizerConfig {
    pub char_level: bool,
    pub maxlen: usize,
    pub num_words: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsConfig {
    pub pretrained_filepath: Option<PathBuf>,
    pub max_features: usize,
    pub embedding_size: usize,
}

/// Network hyperparameters. Each architecture uses a subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    pub max_features: usize,
    pub maxlen: usize,
    pub embedding_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainable_embedding: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_nr: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_nr: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kernel_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_block: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_pooling: Option<bool>,
    pub dense_size: usize,
    pub repeat_dense: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub l2_reg_convo: Option<f64>,
    pub l2_reg_dense: f64,
    pub use_prelu: bool,
    pub use_batch_norm: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropout_convo: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropout_lstm: Option<f64>,
    pub dropout_dense: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerParams {
    pub lr: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub momentum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nesterov: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureConfig {
    pub model_params: ModelParams,
    pub optimizer_params: OptimizerParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub epochs: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shuffle: Option<bool>,
    pub batch_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCheckpointConfig {
    pub filepath: PathBuf,
    pub save_best_only: bool,
    pub save_weights_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbacksConfig {
    pub model_checkpoint: ModelCheckpointConfig,
    /// Exponential learning-rate decay factor.
    pub lr_scheduler_gamma: f64,
    pub early_stopping_patience: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub architecture_config: ArchitectureConfig,
    pub training_config: TrainingConfig,
    pub callbacks_config: CallbacksConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionConfig {
    pub label_nr: usize,
    #[serde(rename = "C")]
    pub c: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solver: Option<String>,
    pub n_jobs: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionAverageConfig {
    pub weights: Vec<f64>,
}

/// The complete, immutable configuration of one experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionConfig {
    pub env: EnvConfig,
    pub fill_na: FillNaConfig,
    pub xy_split: XYSplitConfig,
    pub text_cleaner: TextCleanerConfig,
    pub word_list_filepath: Option<PathBuf>,
    pub char_tokenizer: SequenceTokenizerConfig,
    pub word_tokenizer: SequenceTokenizerConfig,
    pub tfidf_char_vectorizer: TfidfParams,
    pub tfidf_word_vectorizer: TfidfParams,
    pub glove_embeddings: EmbeddingsConfig,
    pub glove_dpcnn_network: NetworkConfig,
    pub glove_scnn_network: NetworkConfig,
    pub glove_lstm_network: NetworkConfig,
    pub word_lstm_network: NetworkConfig,
    pub word_dpcnn_network: NetworkConfig,
    pub char_vdcnn_network: NetworkConfig,
    pub logistic_regression_multilabel: LogisticRegressionConfig,
    pub logistic_regression_ensemble: LogisticRegressionConfig,
    pub prediction_average: PredictionAverageConfig,
}

/// Which family of network a section describes.
#[derive(Clone, Copy)]
enum Architecture {
    Dpcnn,
    Scnn,
    Lstm,
    Vdcnn,
}

fn network(
    params: &Parameters,
    name: &str,
    architecture: Architecture,
    char_level: bool,
    trainable: bool,
) -> NetworkConfig {
    let convolutional = !matches!(architecture, Architecture::Lstm);
    let (max_features, maxlen, embedding_size) = if char_level {
        (params.max_features_char, params.maxlen_char, params.char_embedding_size)
    } else {
        (params.max_features_word, params.maxlen_words, params.word_embedding_size)
    };

    let model_params = ModelParams {
        max_features,
        maxlen,
        embedding_size,
        trainable_embedding: trainable.then_some(params.trainable_embedding),
        filter_nr: convolutional.then_some(params.filter_nr),
        unit_nr: (!convolutional).then_some(params.filter_nr),
        kernel_size: convolutional.then_some(params.kernel_size),
        repeat_block: (!matches!(architecture, Architecture::Scnn)).then_some(params.repeat_block),
        global_pooling: (!convolutional).then_some(params.global_pooling),
        dense_size: params.dense_size,
        repeat_dense: params.repeat_dense,
        l2_reg_convo: convolutional.then_some(params.l2_reg_convo),
        l2_reg_dense: params.l2_reg_dense,
        use_prelu: params.use_prelu,
        use_batch_norm: params.use_batch_norm,
        dropout_convo: convolutional.then_some(params.dropout_convo),
        dropout_lstm: (!convolutional).then_some(params.dropout_lstm),
        dropout_dense: params.dropout_dense,
    };

    // Momentum SGD for the word convolutional nets, plain lr elsewhere.
    let sgd = matches!(architecture, Architecture::Dpcnn | Architecture::Scnn);
    let optimizer_params = OptimizerParams {
        lr: params.lr,
        momentum: sgd.then_some(params.momentum),
        nesterov: sgd.then_some(true),
    };

    NetworkConfig {
        architecture_config: ArchitectureConfig {
            model_params,
            optimizer_params,
        },
        training_config: TrainingConfig {
            epochs: params.epochs_nr,
            shuffle: sgd.then_some(true),
            batch_size: params.batch_size_train,
        },
        callbacks_config: CallbacksConfig {
            model_checkpoint: ModelCheckpointConfig {
                filepath: params
                    .experiment_dir
                    .join("checkpoints")
                    .join(name)
                    .join(format!("{name}.h5")),
                save_best_only: true,
                save_weights_only: false,
            },
            lr_scheduler_gamma: params.gamma,
            early_stopping_patience: params.patience,
        },
    }
}

fn tfidf(analyzer: AnalyzerKind, ngram_max: usize, max_features: usize) -> TfidfParams {
    TfidfParams::default()
        .with_sublinear_tf(true)
        .with_strip_accents(StripAccents::Unicode)
        .with_analyzer(analyzer)
        .with_token_pattern(TFIDF_TOKEN_PATTERN)
        .with_ngram_range(1, ngram_max)
        .with_max_features(max_features)
}

impl SolutionConfig {
    /// Derive every section from `params`.
    pub fn from_parameters(params: &Parameters) -> Self {
        let x_columns: Vec<String> = X_COLUMNS.iter().map(|c| c.to_string()).collect();
        let y_columns: Vec<String> = Y_COLUMNS.iter().map(|c| c.to_string()).collect();

        SolutionConfig {
            env: EnvConfig {
                cache_dirpath: params.experiment_dir.clone(),
            },
            fill_na: FillNaConfig {
                na_columns: x_columns.clone(),
            },
            xy_split: XYSplitConfig {
                x_columns,
                y_columns,
            },
            text_cleaner: params.cleaner_config(),
            word_list_filepath: params.word_list_filepath.clone(),
            char_tokenizer: SequenceTokenizerConfig {
                char_level: true,
                maxlen: params.maxlen_char,
                num_words: params.max_features_char,
            },
            word_tokenizer: SequenceTokenizerConfig {
                char_level: false,
                maxlen: params.maxlen_words,
                num_words: params.max_features_word,
            },
            tfidf_char_vectorizer: tfidf(
                AnalyzerKind::Char,
                params.char_ngram_max,
                params.max_features_char,
            ),
            tfidf_word_vectorizer: tfidf(AnalyzerKind::Word, 1, params.max_features_word),
            glove_embeddings: EmbeddingsConfig {
                pretrained_filepath: params.embedding_filepath.clone(),
                max_features: params.max_features_word,
                embedding_size: params.word_embedding_size,
            },
            glove_dpcnn_network: network(params, "glove_dpcnn_network", Architecture::Dpcnn, false, true),
            glove_scnn_network: network(params, "glove_scnn_network", Architecture::Scnn, false, true),
            glove_lstm_network: network(params, "glove_lstm_network", Architecture::Lstm, false, true),
            word_lstm_network: network(params, "word_lstm_network", Architecture::Lstm, false, false),
            word_dpcnn_network: network(params, "word_dpcnn_network", Architecture::Dpcnn, false, true),
            char_vdcnn_network: network(params, "char_vdcnn_network", Architecture::Vdcnn, true, false),
            logistic_regression_multilabel: LogisticRegressionConfig {
                label_nr: Y_COLUMNS.len(),
                c: params.log_reg_c,
                solver: Some("sag".to_string()),
                n_jobs: params.num_workers,
            },
            logistic_regression_ensemble: LogisticRegressionConfig {
                label_nr: Y_COLUMNS.len(),
                c: params.ensemble_log_reg_c,
                solver: None,
                n_jobs: params.num_workers,
            },
            prediction_average: PredictionAverageConfig {
                weights: params.weights.clone(),
            },
        }
    }

    /// Directory holding the persisted transformer blobs.
    pub fn transformers_dir(&self) -> PathBuf {
        self.env.cache_dirpath.join(TRANSFORMERS_DIR)
    }

    /// Cache directory root.
    pub fn cache_dir(&self) -> &Path {
        &self.env.cache_dirpath
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SolutionConfig {
        let params = Parameters {
            experiment_dir: PathBuf::from("/runs/exp1"),
            char_ngram_max: 5,
            max_features_char: 1000,
            max_features_word: 2000,
            ..Parameters::default()
        };
        SolutionConfig::from_parameters(&params)
    }

    #[test]
    fn test_columns_and_paths() {
        let config = config();
        assert_eq!(config.xy_split.x_columns, ["comment_text"]);
        assert_eq!(config.xy_split.y_columns.len(), 6);
        assert_eq!(config.fill_na.na_columns, ["comment_text"]);
        assert_eq!(config.transformers_dir(), PathBuf::from("/runs/exp1/transformers"));
        assert_eq!(
            config.glove_lstm_network.callbacks_config.model_checkpoint.filepath,
            PathBuf::from("/runs/exp1/checkpoints/glove_lstm_network/glove_lstm_network.h5")
        );
    }

    #[test]
    fn test_tfidf_sections() {
        let config = config();

        let char_params = &config.tfidf_char_vectorizer;
        assert_eq!(char_params.analyzer, AnalyzerKind::Char);
        assert_eq!(char_params.ngram_range, (1, 5));
        assert_eq!(char_params.max_features, Some(1000));
        assert!(char_params.sublinear_tf);
        assert_eq!(char_params.strip_accents, Some(StripAccents::Unicode));

        let word_params = &config.tfidf_word_vectorizer;
        assert_eq!(word_params.analyzer, AnalyzerKind::Word);
        assert_eq!(word_params.ngram_range, (1, 1));
        assert_eq!(word_params.token_pattern, TFIDF_TOKEN_PATTERN);
        assert_eq!(word_params.max_features, Some(2000));
    }

    #[test]
    fn test_network_sections() {
        let config = config();

        let dpcnn = &config.glove_dpcnn_network.architecture_config;
        assert_eq!(dpcnn.optimizer_params.nesterov, Some(true));
        assert!(dpcnn.model_params.unit_nr.is_none());
        assert_eq!(dpcnn.model_params.max_features, 2000);

        let scnn = &config.glove_scnn_network.architecture_config.model_params;
        assert!(scnn.repeat_block.is_none());

        let lstm = &config.word_lstm_network.architecture_config;
        assert!(lstm.model_params.filter_nr.is_none());
        assert!(lstm.model_params.trainable_embedding.is_none());
        assert!(lstm.optimizer_params.momentum.is_none());

        let vdcnn = &config.char_vdcnn_network.architecture_config.model_params;
        assert_eq!(vdcnn.max_features, 1000);
        assert_eq!(vdcnn.embedding_size, Parameters::default().char_embedding_size);
    }

    #[test]
    fn test_regression_sections() {
        let config = config();
        assert_eq!(config.logistic_regression_multilabel.label_nr, 6);
        assert_eq!(
            config.logistic_regression_multilabel.solver.as_deref(),
            Some("sag")
        );
        let json = serde_json::to_value(&config.logistic_regression_ensemble).unwrap();
        assert!(json.get("C").is_some());
        assert!(json.get("solver").is_none());
    }
}
