//! TF-IDF vectorizer for text feature extraction.
//!
//! The vectorizer learns a sorted vocabulary and per-term inverse document
//! frequencies from a training corpus, then maps each record to a sparse
//! row over that vocabulary. Terms unseen during `fit` contribute nothing.
//!
//! # Examples
//!
//! ```
//! use toxprep::feature::tfidf::{TfidfParams, TfidfVectorizer};
//!
//! let mut vectorizer = TfidfVectorizer::new(TfidfParams::default()).unwrap();
//! vectorizer.fit_texts(&["you are great", "you are not"]).unwrap();
//! let matrix = vectorizer.transform_texts(&["great great"]).unwrap();
//!
//! assert_eq!(matrix.shape(), (1, 4));
//! assert_eq!(vectorizer.feature_names().unwrap(), ["are", "great", "not", "you"]);
//! ```

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use sprs::CsMat;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::char_filter::{
    LowercaseCharFilter, StripAccents, StripAccentsCharFilter, WhitespaceCharFilter,
};
use crate::analysis::token_filter::WordNgramFilter;
use crate::analysis::tokenizer::regex::DEFAULT_TOKEN_PATTERN;
use crate::analysis::tokenizer::{NgramTokenizer, RegexTokenizer, Tokenizer};
use crate::error::{Result, ToxPrepError};
use crate::feature::norm::Norm;
use crate::text::value::TextValue;
use crate::transformer::{Persist, Transformer, decode, encode};

/// Unit of the extracted terms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    /// Word n-grams of the regex tokens.
    #[default]
    Word,
    /// Character n-grams.
    Char,
}

/// Options of a [`TfidfVectorizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfidfParams {
    pub lowercase: bool,
    pub strip_accents: Option<StripAccents>,
    pub analyzer: AnalyzerKind,
    /// Token regex for the word analyzer. Ignored by the char analyzer.
    pub token_pattern: String,
    /// Inclusive n-gram size range.
    pub ngram_range: (usize, usize),
    /// Keep only the most frequent terms.
    pub max_features: Option<usize>,
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Maximum proportion of documents a term may appear in.
    pub max_df: f64,
    pub sublinear_tf: bool,
    pub use_idf: bool,
    pub smooth_idf: bool,
    /// Row norm; `None` leaves rows unscaled.
    pub norm: Option<Norm>,
}

impl Default for TfidfParams {
    fn default() -> Self {
        TfidfParams {
            lowercase: true,
            strip_accents: None,
            analyzer: AnalyzerKind::Word,
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            ngram_range: (1, 1),
            max_features: None,
            min_df: 1,
            max_df: 1.0,
            sublinear_tf: false,
            use_idf: true,
            smooth_idf: true,
            norm: Some(Norm::L2),
        }
    }
}

impl TfidfParams {
    pub fn with_analyzer(mut self, analyzer: AnalyzerKind) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n, max_n);
        self
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    pub fn with_strip_accents(mut self, mode: StripAccents) -> Self {
        self.strip_accents = Some(mode);
        self
    }

    pub fn with_token_pattern<S: Into<String>>(mut self, pattern: S) -> Self {
        self.token_pattern = pattern.into();
        self
    }

    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    pub fn with_norm(mut self, norm: Option<Norm>) -> Self {
        self.norm = norm;
        self
    }

    /// Check option ranges. Pattern and n-gram range are checked when the
    /// analyzer is built.
    pub fn validate(&self) -> Result<()> {
        if self.max_features == Some(0) {
            return Err(ToxPrepError::invalid_config("max_features must be positive"));
        }
        if self.min_df == 0 {
            return Err(ToxPrepError::invalid_config("min_df must be at least 1"));
        }
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(ToxPrepError::invalid_config(format!(
                "max_df must be in (0, 1], got {}",
                self.max_df
            )));
        }
        if self.norm == Some(Norm::Max) {
            return Err(ToxPrepError::invalid_config(
                "TF-IDF rows support only the l1 and l2 norms",
            ));
        }
        Ok(())
    }

    /// Build the analyzer these options describe.
    fn build_analyzer(&self) -> Result<PipelineAnalyzer> {
        let (min_n, max_n) = self.ngram_range;
        let tokenizer: Arc<dyn Tokenizer> = match self.analyzer {
            AnalyzerKind::Word => {
                // Validates the range before the tokenizer is built.
                WordNgramFilter::new(min_n, max_n)?;
                Arc::new(RegexTokenizer::with_pattern(&self.token_pattern)?)
            }
            AnalyzerKind::Char => Arc::new(NgramTokenizer::new(min_n, max_n)?),
        };

        let mut analyzer = PipelineAnalyzer::new(tokenizer);
        if self.lowercase {
            analyzer = analyzer.add_char_filter(Arc::new(LowercaseCharFilter::new()));
        }
        if let Some(mode) = self.strip_accents {
            analyzer = analyzer.add_char_filter(Arc::new(StripAccentsCharFilter::new(mode)));
        }
        let analyzer = match self.analyzer {
            AnalyzerKind::Word => analyzer
                .add_filter(Arc::new(WordNgramFilter::new(min_n, max_n)?))
                .with_name("tfidf_word"),
            AnalyzerKind::Char => analyzer
                .add_char_filter(Arc::new(WhitespaceCharFilter::normalize_runs()))
                .with_name("tfidf_char"),
        };
        Ok(analyzer)
    }
}

/// Learned vocabulary and weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct FittedState {
    /// Terms in column order (sorted).
    feature_names: Vec<String>,
    /// Inverse document frequency per column.
    idf: Vec<f64>,
    n_documents: usize,
}

impl FittedState {
    /// Reject states that `transform_texts` cannot index safely.
    fn validate(&self) -> Result<()> {
        if self.idf.len() != self.feature_names.len() {
            return Err(ToxPrepError::serialization(format!(
                "tfidf state has {} feature names but {} idf weights",
                self.feature_names.len(),
                self.idf.len()
            )));
        }
        let mut seen = AHashSet::with_capacity(self.feature_names.len());
        if let Some(term) = self.feature_names.iter().find(|term| !seen.insert(term.as_str())) {
            return Err(ToxPrepError::serialization(format!(
                "tfidf state repeats feature name {term:?}"
            )));
        }
        if let Some(weight) = self.idf.iter().find(|weight| !weight.is_finite()) {
            return Err(ToxPrepError::serialization(format!(
                "tfidf state has non-finite idf weight {weight}"
            )));
        }
        Ok(())
    }
}

/// Persisted blob.
#[derive(Serialize, Deserialize)]
struct TfidfBlob {
    params: TfidfParams,
    state: Option<FittedState>,
}

/// Term-frequency times inverse-document-frequency vectorizer.
#[derive(Clone)]
pub struct TfidfVectorizer {
    params: TfidfParams,
    analyzer: PipelineAnalyzer,
    state: Option<FittedState>,
    /// Term to column index, derived from `state`.
    vocabulary: AHashMap<String, usize>,
}

impl std::fmt::Debug for TfidfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfidfVectorizer")
            .field("params", &self.params)
            .field("vocabulary_size", &self.vocabulary.len())
            .field("fitted", &self.state.is_some())
            .finish()
    }
}

impl TfidfVectorizer {
    /// Create an unfitted vectorizer.
    pub fn new(params: TfidfParams) -> Result<Self> {
        params.validate()?;
        let analyzer = params.build_analyzer()?;
        Ok(TfidfVectorizer {
            params,
            analyzer,
            state: None,
            vocabulary: AHashMap::new(),
        })
    }

    pub fn params(&self) -> &TfidfParams {
        &self.params
    }

    /// Term to column index map. Empty before `fit`.
    pub fn vocabulary(&self) -> &AHashMap<String, usize> {
        &self.vocabulary
    }

    /// Terms in column order.
    pub fn feature_names(&self) -> Option<&[String]> {
        self.state.as_ref().map(|s| s.feature_names.as_slice())
    }

    /// Inverse document frequency per column.
    pub fn idf(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|s| s.idf.as_slice())
    }

    /// Number of documents seen by the last `fit`.
    pub fn n_documents(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.n_documents)
    }

    /// Term counts of one document.
    fn term_counts(&self, text: &str) -> Result<AHashMap<String, usize>> {
        let mut counts = AHashMap::new();
        for token in self.analyzer.analyze(text)? {
            *counts.entry(token.text).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Learn the vocabulary and idf weights from `documents`.
    pub fn fit_texts<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        let n_documents = documents.len();
        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();
        let mut term_frequency: AHashMap<String, usize> = AHashMap::new();

        for doc in documents {
            for (term, count) in self.term_counts(doc.as_ref())? {
                *term_frequency.entry(term.clone()).or_insert(0) += count;
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let max_doc_count = self.params.max_df * n_documents as f64;
        let mut terms: Vec<String> = document_frequency
            .iter()
            .filter(|&(_, &df)| df >= self.params.min_df && df as f64 <= max_doc_count)
            .map(|(term, _)| term.clone())
            .collect();
        terms.sort_unstable();

        if let Some(limit) = self.params.max_features {
            if terms.len() > limit {
                // Stable sort over sorted terms breaks ties alphabetically.
                terms.sort_by(|a, b| term_frequency[b].cmp(&term_frequency[a]));
                terms.truncate(limit);
                terms.sort_unstable();
            }
        }

        if terms.is_empty() {
            return Err(ToxPrepError::analysis(
                "empty vocabulary; the documents contain no terms after pruning",
            ));
        }

        let n = n_documents as f64;
        let idf = terms
            .iter()
            .map(|term| {
                let df = document_frequency[term] as f64;
                if self.params.smooth_idf {
                    ((1.0 + n) / (1.0 + df)).ln() + 1.0
                } else {
                    (n / df).ln() + 1.0
                }
            })
            .collect();

        info!(
            "Fitted {} on {} documents: {} terms",
            self.analyzer.name(),
            n_documents,
            terms.len()
        );

        self.set_state(Some(FittedState {
            feature_names: terms,
            idf,
            n_documents,
        }));
        Ok(())
    }

    fn set_state(&mut self, state: Option<FittedState>) {
        self.vocabulary = state
            .as_ref()
            .map(|s| {
                s.feature_names
                    .iter()
                    .enumerate()
                    .map(|(index, term)| (term.clone(), index))
                    .collect()
            })
            .unwrap_or_default();
        self.state = state;
    }

    /// Map `documents` to a CSR matrix of shape `(documents.len(), vocabulary size)`.
    pub fn transform_texts<S: AsRef<str>>(&self, documents: &[S]) -> Result<CsMat<f64>> {
        let state = self
            .state
            .as_ref()
            .ok_or_else(|| ToxPrepError::not_fitted(self.name()))?;

        let mut indptr = Vec::with_capacity(documents.len() + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();
        indptr.push(0);

        for doc in documents {
            let mut row: Vec<(usize, f64)> = self
                .term_counts(doc.as_ref())?
                .into_iter()
                .filter_map(|(term, count)| {
                    self.vocabulary.get(&term).map(|&index| (index, count as f64))
                })
                .collect();
            row.sort_unstable_by_key(|&(index, _)| index);

            let mut values: Vec<f64> = row
                .iter()
                .map(|&(index, tf)| {
                    let tf = if self.params.sublinear_tf { 1.0 + tf.ln() } else { tf };
                    if self.params.use_idf { tf * state.idf[index] } else { tf }
                })
                .collect();
            if let Some(norm) = self.params.norm {
                norm.normalize(&mut values);
            }

            indices.extend(row.iter().map(|&(index, _)| index));
            data.extend(values);
            indptr.push(indices.len());
        }

        debug!(
            "Transformed {} documents into {} non-zero entries",
            documents.len(),
            data.len()
        );

        CsMat::try_new(
            (documents.len(), state.feature_names.len()),
            indptr,
            indices,
            data,
        )
        .map_err(|(_, _, _, err)| ToxPrepError::analysis(format!("invalid sparse matrix: {err}")))
    }
}

impl Transformer for TfidfVectorizer {
    type Input = [TextValue];
    type Output = CsMat<f64>;

    fn fit(&mut self, input: &[TextValue]) -> Result<()> {
        let texts: Vec<_> = input.iter().map(TextValue::text_or_empty).collect();
        self.fit_texts(&texts)
    }

    fn transform(&self, input: &[TextValue]) -> Result<CsMat<f64>> {
        let texts: Vec<_> = input.iter().map(TextValue::text_or_empty).collect();
        self.transform_texts(&texts)
    }

    fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    fn name(&self) -> &'static str {
        "tfidf_vectorizer"
    }
}

impl Persist for TfidfVectorizer {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        encode(&TfidfBlob {
            params: self.params.clone(),
            state: self.state.clone(),
        })
    }

    fn restore(&mut self, bytes: &[u8]) -> Result<()> {
        let blob: TfidfBlob = decode(bytes)?;
        if let Some(state) = &blob.state {
            state.validate()?;
        }
        let mut restored = TfidfVectorizer::new(blob.params)?;
        restored.set_state(blob.state);
        *self = restored;
        Ok(())
    }
}
