//! Whitespace collapsing char filter.

use super::CharFilter;

/// How whitespace runs are rewritten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WhitespaceMode {
    /// Split on whitespace and rejoin with single spaces (leading and
    /// trailing whitespace disappears).
    CollapseAndTrim,
    /// Replace every run of two or more whitespace characters with a single
    /// space; single whitespace characters and the ends are left untouched.
    NormalizeRuns,
}

/// A char filter that collapses whitespace runs.
#[derive(Clone, Debug)]
pub struct WhitespaceCharFilter {
    mode: WhitespaceMode,
}

impl WhitespaceCharFilter {
    /// Create a filter with the given mode.
    pub fn new(mode: WhitespaceMode) -> Self {
        WhitespaceCharFilter { mode }
    }

    /// Collapse all whitespace runs to one space and trim the ends.
    pub fn collapse() -> Self {
        Self::new(WhitespaceMode::CollapseAndTrim)
    }

    /// Replace runs of at least two whitespace characters with one space.
    pub fn normalize_runs() -> Self {
        Self::new(WhitespaceMode::NormalizeRuns)
    }

    /// Get the configured mode.
    pub fn mode(&self) -> WhitespaceMode {
        self.mode
    }

    fn normalize(input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_whitespace() && chars.peek().is_some_and(|next| next.is_whitespace()) {
                while chars.peek().is_some_and(|next| next.is_whitespace()) {
                    chars.next();
                }
                output.push(' ');
            } else {
                output.push(c);
            }
        }

        output
    }
}

impl CharFilter for WhitespaceCharFilter {
    fn filter(&self, input: &str) -> String {
        match self.mode {
            WhitespaceMode::CollapseAndTrim => input.split_whitespace().collect::<Vec<_>>().join(" "),
            WhitespaceMode::NormalizeRuns => Self::normalize(input),
        }
    }

    fn name(&self) -> &'static str {
        match self.mode {
            WhitespaceMode::CollapseAndTrim => "collapse_whitespace",
            WhitespaceMode::NormalizeRuns => "normalize_whitespace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_and_trim() {
        let filter = WhitespaceCharFilter::collapse();
        assert_eq!(filter.filter("  hello \t\n world  "), "hello world");
        assert_eq!(filter.filter("   "), "");
    }

    #[test]
    fn test_normalize_runs() {
        let filter = WhitespaceCharFilter::normalize_runs();
        assert_eq!(filter.filter(" a  b\t\tc\nd "), " a b c\nd ");
        assert_eq!(filter.filter("\n\n"), " ");
    }

    #[test]
    fn test_names() {
        assert_eq!(WhitespaceCharFilter::collapse().name(), "collapse_whitespace");
        assert_eq!(
            WhitespaceCharFilter::normalize_runs().name(),
            "normalize_whitespace"
        );
    }
}
