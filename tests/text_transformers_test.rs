use std::fs;

use tempfile::TempDir;
use toxprep::error::{Result, ToxPrepError};
use toxprep::feature::normalizer::Normalizer;
use toxprep::text::cleaner::{TextCleaner, TextCleanerConfig};
use toxprep::text::counter::TextCounter;
use toxprep::text::value::{TextValue, corpus};
use toxprep::text::word_list::WordListFilter;
use toxprep::transformer::{Persist, Transformer};

fn comments() -> Vec<TextValue> {
    corpus(vec![
        Some("Hey!!! WHY did you   revert my edit?\nIt was FINE."),
        Some("thanks, thanks, thanks thanks thanks"),
        None,
        Some(""),
        Some("   \n\t "),
        Some("Café ümlaut 42 and 3.14"),
    ])
}

#[test]
fn test_row_count_and_order_are_preserved() -> Result<()> {
    let input = comments();

    let cleaned = TextCleaner::new(TextCleanerConfig::all())?.transform(&input)?;
    assert_eq!(cleaned.len(), input.len());
    assert_eq!(cleaned[2], TextValue::Null);
    assert_eq!(cleaned[3], TextValue::from(""));

    let filtered = WordListFilter::from_words(vec!["why", "edit"]).transform(&cleaned)?;
    assert_eq!(filtered.len(), input.len());
    assert_eq!(filtered[0], TextValue::from("why edit"));

    let counts = TextCounter::new().transform(&input)?;
    assert_eq!(counts.n_rows(), input.len());

    // Each row depends only on its own record.
    let single = TextCounter::new().transform(&input[5..6])?;
    assert_eq!(single.row(0), counts.row(5));
    Ok(())
}

#[test]
fn test_cleaning_is_idempotent_without_deduplication() -> Result<()> {
    let cleaner = TextCleaner::new(TextCleanerConfig::all())?;
    let once = cleaner.clean_corpus(&comments());
    let twice = cleaner.clean_corpus(&once);
    assert_eq!(once, twice);
    Ok(())
}

#[test]
fn test_deduplication_can_change_a_second_pass() -> Result<()> {
    let cleaner = TextCleaner::new(TextCleanerConfig::all().with_deduplication_threshold(1.2))?;

    // 4 tokens, 2 unique: ratio 2.0 keeps the first two tokens.
    let once = cleaner.clean_text("a a a b");
    assert_eq!(once, "a a");

    // 2 tokens, 1 unique: ratio 2.0 again exceeds the threshold.
    let twice = cleaner.clean_text(&once);
    assert_eq!(twice, "a");

    // A record below the threshold is a fixed point.
    assert_eq!(cleaner.clean_text("a b c"), cleaner.clean_text(&cleaner.clean_text("a b c")));
    Ok(())
}

#[test]
fn test_counter_is_always_finite() -> Result<()> {
    let counts = TextCounter::new().transform(&comments())?;
    for row in counts.rows() {
        assert!(row.iter().all(|v| v.is_finite()));
    }
    for index in [2, 3, 4] {
        assert_eq!(counts.get(index, "caps_vs_length"), Some(0.0));
        assert_eq!(counts.get(index, "words_vs_unique"), Some(0.0));
    }
    Ok(())
}

#[test]
fn test_counts_normalize_to_unit_rows() -> Result<()> {
    let counts = TextCounter::new().transform(&comments())?;
    let normalized = Normalizer::default().fit_transform(&counts)?;

    for (index, row) in normalized.rows().iter().enumerate() {
        let norm: f64 = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if counts.rows()[index].iter().all(|v| *v == 0.0) {
            assert_eq!(norm, 0.0);
        } else {
            assert!((norm - 1.0).abs() < 1e-12);
        }
    }
    Ok(())
}

#[test]
fn test_word_list_from_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("words.txt");
    fs::write(&path, "idiot\nstupid\n")?;

    let filter = WordListFilter::from_file(&path)?;
    assert_eq!(filter.source(), Some(path.as_path()));
    let output = filter.transform(&corpus(vec!["You STUPID idiot", "hello"]))?;
    assert_eq!(output, corpus(vec!["stupid idiot", ""]));
    Ok(())
}

#[test]
fn test_word_list_with_windows_line_endings() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("words.txt");
    fs::write(&path, "idiot\r\nstupid\r\n")?;

    let filter = WordListFilter::from_file(&path)?;
    let output = filter.transform(&corpus(vec!["you idiot stupid"]))?;
    assert_eq!(output, corpus(vec!["idiot stupid"]));
    Ok(())
}

#[test]
fn test_missing_word_list_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = WordListFilter::from_file(dir.path().join("missing.txt"));
    assert!(matches!(result, Err(ToxPrepError::Io(_))));
}

#[test]
fn test_cleaner_save_load() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("transformers").join("text_cleaner.bin");

    let config = TextCleanerConfig::all()
        .with_fill_na("")
        .with_deduplication_threshold(3.0);
    let cleaner = TextCleaner::new(config)?;
    cleaner.save(&path)?;

    let mut restored = TextCleaner::new(TextCleanerConfig::default())?;
    restored.load(&path)?;

    assert_eq!(restored.config(), cleaner.config());
    assert_eq!(restored.clean_corpus(&comments()), cleaner.clean_corpus(&comments()));
    Ok(())
}
