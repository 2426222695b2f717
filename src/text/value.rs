//! Text record values.
//!
//! A corpus is an ordered slice of [`TextValue`]s. Records arrive from CSV
//! ingestion or from callers as text, numbers, booleans or missing values;
//! every transformer coerces them to text with [`TextValue::to_text`].
//!
//! # Examples
//!
//! ```
//! use toxprep::text::value::TextValue;
//!
//! assert_eq!(TextValue::from("hi").to_text().as_deref(), Some("hi"));
//! assert_eq!(TextValue::from(42_i64).to_text().as_deref(), Some("42"));
//! assert_eq!(TextValue::from(2.0_f64).to_text().as_deref(), Some("2.0"));
//! assert_eq!(TextValue::from(true).to_text().as_deref(), Some("True"));
//! assert_eq!(TextValue::Null.to_text(), None);
//! ```

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One record of a corpus or one cell of a record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TextValue {
    /// Text value
    Text(String),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// Missing value
    Null,
}

impl TextValue {
    /// Whether this value is missing. NaN floats count as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            TextValue::Null => true,
            TextValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Borrow the text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TextValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce to the string representation, or `None` if missing.
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            TextValue::Text(s) => Some(Cow::Borrowed(s)),
            TextValue::Integer(i) => Some(Cow::Owned(i.to_string())),
            TextValue::Float(f) if f.is_nan() => None,
            // Debug keeps the ".0" on integral floats.
            TextValue::Float(f) => Some(Cow::Owned(format!("{f:?}"))),
            TextValue::Boolean(true) => Some(Cow::Borrowed("True")),
            TextValue::Boolean(false) => Some(Cow::Borrowed("False")),
            TextValue::Null => None,
        }
    }

    /// Coerce to text, mapping missing values to the empty string.
    pub fn text_or_empty(&self) -> Cow<'_, str> {
        self.to_text().unwrap_or(Cow::Borrowed(""))
    }

    /// Interpret the value as a number.
    ///
    /// Text is parsed after trimming; booleans map to 0/1.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TextValue::Integer(i) => Some(*i as f64),
            TextValue::Float(f) if !f.is_nan() => Some(*f),
            TextValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            TextValue::Text(s) => match s.trim() {
                "True" | "true" => Some(1.0),
                "False" | "false" => Some(0.0),
                other => other.parse::<f64>().ok(),
            },
            _ => None,
        }
    }
}

impl fmt::Display for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => write!(f, "{text}"),
            None => write!(f, "<null>"),
        }
    }
}

impl From<&str> for TextValue {
    fn from(value: &str) -> Self {
        TextValue::Text(value.to_string())
    }
}

impl From<String> for TextValue {
    fn from(value: String) -> Self {
        TextValue::Text(value)
    }
}

impl From<i64> for TextValue {
    fn from(value: i64) -> Self {
        TextValue::Integer(value)
    }
}

impl From<f64> for TextValue {
    fn from(value: f64) -> Self {
        TextValue::Float(value)
    }
}

impl From<bool> for TextValue {
    fn from(value: bool) -> Self {
        TextValue::Boolean(value)
    }
}

impl<T: Into<TextValue>> From<Option<T>> for TextValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(TextValue::Null, Into::into)
    }
}

/// Build a corpus from anything convertible into text values.
pub fn corpus<I, T>(values: I) -> Vec<TextValue>
where
    I: IntoIterator<Item = T>,
    T: Into<TextValue>,
{
    values.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_coercion() {
        assert_eq!(TextValue::Float(0.5).to_text().as_deref(), Some("0.5"));
        assert_eq!(TextValue::Float(-3.0).to_text().as_deref(), Some("-3.0"));
        assert!(TextValue::Float(f64::NAN).is_missing());
        assert_eq!(TextValue::Float(f64::NAN).text_or_empty(), "");
    }

    #[test]
    fn test_option_conversion() {
        let values = corpus(vec![Some("a"), None]);
        assert_eq!(values, vec![TextValue::Text("a".into()), TextValue::Null]);
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(TextValue::from("1").as_f64(), Some(1.0));
        assert_eq!(TextValue::from(" 0 ").as_f64(), Some(0.0));
        assert_eq!(TextValue::from("True").as_f64(), Some(1.0));
        assert_eq!(TextValue::from(false).as_f64(), Some(0.0));
        assert_eq!(TextValue::from("maybe").as_f64(), None);
        assert_eq!(TextValue::Null.as_f64(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(TextValue::from(7_i64).to_string(), "7");
        assert_eq!(TextValue::Null.to_string(), "<null>");
    }
}
