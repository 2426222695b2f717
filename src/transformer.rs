//! Common interface of the preprocessing transformers.
//!
//! Every transformer maps a row-aligned input to a row-aligned output of the
//! same length. Stateful ones ([`TfidfVectorizer`](crate::feature::TfidfVectorizer),
//! [`Normalizer`](crate::feature::Normalizer)) learn their state in
//! [`Transformer::fit`]; for the others `fit` is a no-op.
//!
//! Persistence is split into [`Persist`], which writes one opaque blob per
//! transformer. Blobs are `bincode`-encoded.

use std::fs;
use std::path::Path;

use log::info;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// A fit-then-apply data transformation.
pub trait Transformer {
    /// The input a single call consumes (a corpus, a feature table, ...).
    type Input: ?Sized;
    /// The row-aligned result of a transform.
    type Output;

    /// Learn state from `input`. Stateless transformers accept and ignore it.
    fn fit(&mut self, _input: &Self::Input) -> Result<()> {
        Ok(())
    }

    /// Apply the transformation.
    fn transform(&self, input: &Self::Input) -> Result<Self::Output>;

    /// Fit on `input`, then transform it.
    fn fit_transform(&mut self, input: &Self::Input) -> Result<Self::Output> {
        self.fit(input)?;
        self.transform(input)
    }

    /// Whether `transform` may be called.
    fn is_fitted(&self) -> bool {
        true
    }

    /// Get the name of this transformer (used for logging and blob file names).
    fn name(&self) -> &'static str;
}

/// Save and restore the minimal state needed to reproduce `transform`.
pub trait Persist {
    /// Serialize the persisted state into a blob.
    fn to_bytes(&self) -> Result<Vec<u8>>;

    /// Replace this instance's state with the one stored in `bytes`.
    fn restore(&mut self, bytes: &[u8]) -> Result<()>;

    /// Write the blob to `path`, creating parent directories as needed.
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let bytes = self.to_bytes()?;
        fs::write(path, &bytes)?;
        info!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Read the blob at `path` and restore from it.
    fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        self.restore(&bytes)?;
        info!("Loaded {} bytes from {}", bytes.len(), path.display());
        Ok(())
    }
}

/// State blob of transformers that have nothing to persist.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct EmptyState {}

/// Encode a persisted state value.
pub fn encode<T: Serialize>(state: &T) -> Result<Vec<u8>> {
    Ok(bincode::serialize(state)?)
}

/// Decode a persisted state value.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(bincode::deserialize(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Serialize, serde::Deserialize, PartialEq)]
    struct Scale {
        factor: f64,
    }

    impl Persist for Scale {
        fn to_bytes(&self) -> Result<Vec<u8>> {
            encode(self)
        }

        fn restore(&mut self, bytes: &[u8]) -> Result<()> {
            *self = decode(bytes)?;
            Ok(())
        }
    }

    impl Transformer for Scale {
        type Input = [f64];
        type Output = Vec<f64>;

        fn transform(&self, input: &[f64]) -> Result<Vec<f64>> {
            Ok(input.iter().map(|v| v * self.factor).collect())
        }

        fn name(&self) -> &'static str {
            "scale"
        }
    }

    #[test]
    fn test_default_fit_is_noop() {
        let mut scale = Scale { factor: 2.0 };
        assert!(scale.is_fitted());
        assert_eq!(scale.fit_transform(&[1.0, 2.0]).unwrap(), vec![2.0, 4.0]);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("scale.bin");

        Scale { factor: 0.5 }.save(&path).unwrap();
        let mut restored = Scale::default();
        restored.load(&path).unwrap();

        assert_eq!(restored, Scale { factor: 0.5 });
    }

    #[test]
    fn test_load_missing_blob_is_io_error() {
        let mut scale = Scale::default();
        let result = scale.load("/no/such/blob.bin");
        assert!(matches!(result, Err(crate::error::ToxPrepError::Io(_))));
    }

    #[test]
    fn test_empty_state_round_trip() {
        let bytes = encode(&EmptyState {}).unwrap();
        assert!(bytes.is_empty());
        let state: EmptyState = decode(&bytes).unwrap();
        assert_eq!(state, EmptyState {});
    }
}
