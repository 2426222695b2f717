//! Criterion benchmarks for toxprep.
//!
//! Covers the per-record transformers and TF-IDF fitting:
//! - Text cleaning
//! - Text statistics
//! - Char and word TF-IDF

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use toxprep::feature::tfidf::{AnalyzerKind, TfidfParams, TfidfVectorizer};
use toxprep::text::cleaner::{TextCleaner, TextCleanerConfig};
use toxprep::text::counter::TextCounter;
use toxprep::text::value::{TextValue, corpus};

/// Generate comment-like test records for benchmarking.
fn generate_test_comments(count: usize) -> Vec<TextValue> {
    let words = [
        "you", "are", "GREAT", "idiot", "thanks", "for", "the", "edit", "STOP", "vandalizing",
        "this", "page!", "please", "read", "policy,", "wikipedia", "article", "talk", "source",
        "citation", "needed", "!!!", "why", "would", "anyone", "do", "that?", "lol",
    ];

    let mut comments = Vec::with_capacity(count);
    for i in 0..count {
        let length = 10 + (i % 60); // Variable length comments
        let mut comment = Vec::with_capacity(length);
        for j in 0..length {
            let word_idx = (i * 7 + j * 13) % words.len(); // Pseudo-random distribution
            comment.push(words[word_idx]);
            if j % 17 == 16 {
                comment.push("\n");
            }
        }
        comments.push(comment.join(" "));
    }

    corpus(comments)
}

/// Benchmark text cleaning.
fn bench_text_cleaning(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_cleaning");

    let comments = generate_test_comments(1000);
    let cleaner = TextCleaner::new(TextCleanerConfig::all()).unwrap();
    let deduplicating =
        TextCleaner::new(TextCleanerConfig::all().with_deduplication_threshold(2.0)).unwrap();

    group.throughput(Throughput::Elements(comments.len() as u64));
    group.bench_function("clean_corpus", |b| {
        b.iter(|| black_box(cleaner.clean_corpus(black_box(&comments))))
    });

    group.bench_function("clean_corpus_with_deduplication", |b| {
        b.iter(|| black_box(deduplicating.clean_corpus(black_box(&comments))))
    });

    group.finish();
}

/// Benchmark text statistics.
fn bench_text_counting(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_counting");

    let comments = generate_test_comments(1000);
    let counter = TextCounter::new();

    group.throughput(Throughput::Elements(comments.len() as u64));
    group.bench_function("count_corpus", |b| {
        b.iter(|| black_box(counter.count(black_box(&comments)).unwrap()))
    });

    group.finish();
}

/// Benchmark TF-IDF fitting and transformation.
fn bench_tfidf(c: &mut Criterion) {
    let mut group = c.benchmark_group("tfidf");
    group.sample_size(20); // Char n-gram fitting is slow

    let cleaner = TextCleaner::new(TextCleanerConfig::all()).unwrap();
    let comments = cleaner.clean_corpus(&generate_test_comments(500));
    let texts: Vec<String> = comments
        .iter()
        .map(|c| c.text_or_empty().into_owned())
        .collect();

    let word_params = TfidfParams::default().with_sublinear_tf(true);
    let char_params = TfidfParams::default()
        .with_analyzer(AnalyzerKind::Char)
        .with_ngram_range(1, 4)
        .with_max_features(20_000)
        .with_sublinear_tf(true);

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("word_fit", |b| {
        b.iter_with_setup(
            || TfidfVectorizer::new(word_params.clone()).unwrap(),
            |mut vectorizer| {
                vectorizer.fit_texts(black_box(&texts)).unwrap();
                black_box(vectorizer);
            },
        )
    });

    group.bench_function("char_fit", |b| {
        b.iter_with_setup(
            || TfidfVectorizer::new(char_params.clone()).unwrap(),
            |mut vectorizer| {
                vectorizer.fit_texts(black_box(&texts)).unwrap();
                black_box(vectorizer);
            },
        )
    });

    let mut fitted = TfidfVectorizer::new(char_params.clone()).unwrap();
    fitted.fit_texts(&texts).unwrap();
    group.bench_function("char_transform", |b| {
        b.iter(|| black_box(fitted.transform_texts(black_box(&texts)).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_text_cleaning, bench_text_counting, bench_tfidf);
criterion_main!(benches);
