//! End-to-end feature extraction.
//!
//! [`FeaturePipeline`] wires every transformer of the crate together:
//!
//! ```text
//! records ─ XYSplit ─┬─ TextCleaner ─ [WordListFilter] ─┬─ char TfidfVectorizer
//!                    │                                  └─ word TfidfVectorizer
//!                    ├─ TextCounter ─ Normalizer
//!                    └─ labels (train mode)
//! ```
//!
//! The counter reads the raw text: cleaning would erase the case and
//! punctuation statistics it measures.

use std::path::Path;

use log::info;
use sprs::CsMat;

use crate::config::solution::SolutionConfig;
use crate::error::{Result, ToxPrepError};
use crate::feature::normalizer::Normalizer;
use crate::feature::table::FeatureTable;
use crate::feature::tfidf::TfidfVectorizer;
use crate::frame::labels::LabelMatrix;
use crate::frame::record_set::RecordSet;
use crate::frame::split::XYSplit;
use crate::text::cleaner::TextCleaner;
use crate::text::counter::TextCounter;
use crate::text::value::TextValue;
use crate::text::word_list::WordListFilter;
use crate::transformer::{Persist, Transformer};

const XY_SPLIT_BLOB: &str = "xy_split.bin";
const TEXT_CLEANER_BLOB: &str = "text_cleaner.bin";
const WORD_LIST_BLOB: &str = "word_list_filter.bin";
const CHAR_TFIDF_BLOB: &str = "tfidf_char_vectorizer.bin";
const WORD_TFIDF_BLOB: &str = "tfidf_word_vectorizer.bin";
const TEXT_COUNTER_BLOB: &str = "text_counter.bin";
const NORMALIZER_BLOB: &str = "normalizer.bin";

/// Features of one record set, row-aligned with its input.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    /// Char n-gram TF-IDF matrix.
    pub char_tfidf: CsMat<f64>,
    /// Word TF-IDF matrix.
    pub word_tfidf: CsMat<f64>,
    /// Normalized text statistics.
    pub counts: FeatureTable,
    /// Label block; present in train mode only.
    pub labels: Option<LabelMatrix>,
}

impl FeatureSet {
    pub fn n_rows(&self) -> usize {
        self.counts.n_rows()
    }
}

/// Text of the split records after each preprocessing stage.
struct PreparedText {
    raw: Vec<TextValue>,
    prepared: Vec<TextValue>,
    labels: Option<LabelMatrix>,
}

/// The complete preprocessing pipeline of one experiment.
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    xy_split: XYSplit,
    cleaner: TextCleaner,
    word_list: Option<WordListFilter>,
    char_tfidf: TfidfVectorizer,
    word_tfidf: TfidfVectorizer,
    counter: TextCounter,
    normalizer: Normalizer,
}

impl FeaturePipeline {
    /// Build an unfitted pipeline. Reads the word list file when one is
    /// configured.
    pub fn from_config(config: &SolutionConfig) -> Result<Self> {
        if config.xy_split.x_columns.len() != 1 {
            return Err(ToxPrepError::invalid_config(format!(
                "exactly one text column is supported, got {:?}",
                config.xy_split.x_columns
            )));
        }

        let word_list = config
            .word_list_filepath
            .as_ref()
            .map(WordListFilter::from_file)
            .transpose()?;

        Ok(FeaturePipeline {
            xy_split: XYSplit::new(&config.xy_split.x_columns, &config.xy_split.y_columns),
            cleaner: TextCleaner::new(config.text_cleaner.clone())?,
            word_list,
            char_tfidf: TfidfVectorizer::new(config.tfidf_char_vectorizer.clone())?,
            word_tfidf: TfidfVectorizer::new(config.tfidf_word_vectorizer.clone())?,
            counter: TextCounter::new(),
            normalizer: Normalizer::default(),
        })
    }

    pub fn char_tfidf(&self) -> &TfidfVectorizer {
        &self.char_tfidf
    }

    pub fn word_tfidf(&self) -> &TfidfVectorizer {
        &self.word_tfidf
    }

    pub fn is_fitted(&self) -> bool {
        self.char_tfidf.is_fitted() && self.word_tfidf.is_fitted() && self.normalizer.is_fitted()
    }

    fn prepare(&self, records: &RecordSet, train_mode: bool) -> Result<PreparedText> {
        let blocks = self.xy_split.transform(records, train_mode)?;
        let text_column = &self.xy_split.x_columns()[0];
        let raw = blocks.x.require(text_column)?.to_vec();

        let mut prepared = self.cleaner.transform(&raw)?;
        if let Some(word_list) = &self.word_list {
            prepared = word_list.transform(&prepared)?;
        }

        let labels = blocks
            .y
            .as_ref()
            .map(LabelMatrix::from_records)
            .transpose()?;

        Ok(PreparedText {
            raw,
            prepared,
            labels,
        })
    }

    /// Fit every stateful transformer on `records` (train mode) and return
    /// the training features.
    pub fn fit(&mut self, records: &RecordSet) -> Result<FeatureSet> {
        info!("Fitting feature pipeline on {} records", records.n_rows());
        let text = self.prepare(records, true)?;

        let char_tfidf = self.char_tfidf.fit_transform(&text.prepared)?;
        let word_tfidf = self.word_tfidf.fit_transform(&text.prepared)?;
        let counts = self.counter.transform(&text.raw)?;
        let counts = self.normalizer.fit_transform(&counts)?;

        Ok(FeatureSet {
            char_tfidf,
            word_tfidf,
            counts,
            labels: text.labels,
        })
    }

    /// Transform `records` with the fitted state. Labels are extracted only
    /// in train mode.
    pub fn transform(&self, records: &RecordSet, train_mode: bool) -> Result<FeatureSet> {
        info!(
            "Transforming {} records (train_mode={train_mode})",
            records.n_rows()
        );
        let text = self.prepare(records, train_mode)?;

        let counts = self.counter.transform(&text.raw)?;
        Ok(FeatureSet {
            char_tfidf: self.char_tfidf.transform(&text.prepared)?,
            word_tfidf: self.word_tfidf.transform(&text.prepared)?,
            counts: self.normalizer.transform(&counts)?,
            labels: text.labels,
        })
    }

    /// Write one blob per transformer into `dir`.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        self.xy_split.save(dir.join(XY_SPLIT_BLOB))?;
        self.cleaner.save(dir.join(TEXT_CLEANER_BLOB))?;
        if let Some(word_list) = &self.word_list {
            word_list.save(dir.join(WORD_LIST_BLOB))?;
        }
        self.char_tfidf.save(dir.join(CHAR_TFIDF_BLOB))?;
        self.word_tfidf.save(dir.join(WORD_TFIDF_BLOB))?;
        self.counter.save(dir.join(TEXT_COUNTER_BLOB))?;
        self.normalizer.save(dir.join(NORMALIZER_BLOB))?;
        info!("Saved feature pipeline to {}", dir.display());
        Ok(())
    }

    /// Restore every transformer from the blobs in `dir`.
    pub fn load<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        self.xy_split.load(dir.join(XY_SPLIT_BLOB))?;
        self.cleaner.load(dir.join(TEXT_CLEANER_BLOB))?;
        if let Some(word_list) = &mut self.word_list {
            word_list.load(dir.join(WORD_LIST_BLOB))?;
        }
        self.char_tfidf.load(dir.join(CHAR_TFIDF_BLOB))?;
        self.word_tfidf.load(dir.join(WORD_TFIDF_BLOB))?;
        self.counter.load(dir.join(TEXT_COUNTER_BLOB))?;
        self.normalizer.load(dir.join(NORMALIZER_BLOB))?;
        info!("Loaded feature pipeline from {}", dir.display());
        Ok(())
    }
}
