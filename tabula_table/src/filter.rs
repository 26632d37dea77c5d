// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Case-insensitive text filtering.

use regex::{Regex, RegexBuilder};

use crate::CellValue;

#[derive(Clone, Debug)]
enum Pattern {
    Any,
    Text(Regex),
    Nothing,
}

/// A compiled search-box filter.
///
/// The filter text is matched literally, case-insensitively, anywhere in the
/// value's text. Empty filter text matches everything.
#[derive(Clone, Debug)]
pub struct TextFilter {
    pattern: Pattern,
}

impl TextFilter {
    /// Compiles `text` into a filter.
    #[must_use]
    pub fn new(text: &str) -> Self {
        if text.is_empty() {
            return Self {
                pattern: Pattern::Any,
            };
        }
        let pattern = RegexBuilder::new(&regex::escape(text))
            .case_insensitive(true)
            .build();
        match pattern {
            Ok(pattern) => Self {
                pattern: Pattern::Text(pattern),
            },
            Err(err) => {
                // Only reachable for filter text beyond the regex size limit.
                tracing::warn!(%err, "filter text could not be compiled; matching nothing");
                Self {
                    pattern: Pattern::Nothing,
                }
            }
        }
    }

    /// Returns `true` if no filtering happens.
    #[must_use]
    pub const fn is_pass_through(&self) -> bool {
        matches!(self.pattern, Pattern::Any)
    }

    /// Returns `true` if `value` passes the filter.
    ///
    /// [`CellValue::Empty`] never matches a non-empty filter.
    #[must_use]
    pub fn matches(&self, value: &CellValue) -> bool {
        match &self.pattern {
            Pattern::Any => true,
            Pattern::Nothing => false,
            Pattern::Text(pattern) => value
                .as_text()
                .is_some_and(|text| pattern.is_match(&text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TextFilter;
    use crate::CellValue;

    #[test]
    fn substring_ignoring_case() {
        let filter = TextFilter::new("o");
        assert!(filter.matches(&CellValue::from("Bob")));
        assert!(filter.matches(&CellValue::from("JOHN")));
        assert!(!filter.matches(&CellValue::from("Jane")));
    }

    #[test]
    fn empty_text_passes_everything() {
        let filter = TextFilter::new("");
        assert!(filter.is_pass_through());
        assert!(filter.matches(&CellValue::Empty));
    }

    #[test]
    fn special_characters_are_literal() {
        let filter = TextFilter::new("a.(b");
        assert!(filter.matches(&CellValue::from("xa.(by")));
        assert!(!filter.matches(&CellValue::from("axxb")));
    }

    #[test]
    fn empty_and_numeric_values() {
        let filter = TextFilter::new("3");
        assert!(!filter.matches(&CellValue::Empty));
        assert!(filter.matches(&CellValue::Int(35)));
        assert!(filter.matches(&CellValue::Float(0.3)));
    }
}
