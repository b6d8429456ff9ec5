use regex::Regex;
use std::ops::Range;

use crate::buffer::BufferHandle;

/// A compiled literal search.
///
/// The needle is escaped and matched with `regex`, in `(?i)` mode when case
/// is ignored, so match spans are always byte ranges of the searched text.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    needle: String,
    case_sensitive: bool,
    regex: Option<Regex>,
}

/// Result of a find or single replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindOutcome {
    /// Byte span of the match (for replace: of the inserted text).
    Found(Range<usize>),
    NotFound,
    /// The needle was empty; nothing was searched.
    EmptyNeedle,
}

impl SearchQuery {
    pub fn new(needle: impl Into<String>, case_sensitive: bool) -> Self {
        let needle = needle.into();
        let regex = if needle.is_empty() {
            None
        } else {
            let escaped = regex::escape(&needle);
            let pattern = if case_sensitive {
                escaped
            } else {
                format!("(?i){}", escaped)
            };
            match Regex::new(&pattern) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    tracing::warn!("cannot compile search for {needle:?}: {e}");
                    None
                }
            }
        };

        Self {
            needle,
            case_sensitive,
            regex,
        }
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// First match starting at or after `from`. Never wraps around.
    pub fn find_from(&self, text: &str, from: usize) -> Option<Range<usize>> {
        let regex = self.regex.as_ref()?;
        if from > text.len() || !text.is_char_boundary(from) {
            return None;
        }
        regex.find_at(text, from).map(|m| m.range())
    }

    /// Every non-overlapping match, left to right.
    pub fn find_all<'t>(&'t self, text: &'t str) -> impl Iterator<Item = Range<usize>> + 't {
        self.regex
            .iter()
            .flat_map(move |regex| regex.find_iter(text).map(|m| m.range()))
    }
}

/// Searches forward from the caret and selects the match.
///
/// The selection leaves the caret immediately after the match, so repeated
/// calls walk through the buffer. Nothing moves when there is no match.
pub fn find_next<B: BufferHandle + ?Sized>(buffer: &mut B, query: &SearchQuery) -> FindOutcome {
    if query.is_empty() {
        return FindOutcome::EmptyNeedle;
    }

    match buffer.search(query, buffer.caret()) {
        Some(found) => {
            tracing::debug!(needle = query.needle(), ?found, "match");
            buffer.select(found.clone());
            FindOutcome::Found(found)
        }
        None => FindOutcome::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_sensitivity() {
        let text = "say hello";
        let insensitive = SearchQuery::new("Hello", false);
        assert_eq!(insensitive.find_from(text, 0), Some(4..9));

        let sensitive = SearchQuery::new("Hello", true);
        assert_eq!(sensitive.find_from(text, 0), None);
    }

    #[test]
    fn test_no_wraparound() {
        let text = "needle then hay";
        let query = SearchQuery::new("needle", true);
        assert_eq!(query.find_from(text, 0), Some(0..6));
        assert_eq!(query.find_from(text, 1), None);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let text = "a+b (c) a.b";
        assert_eq!(SearchQuery::new("a.b", true).find_from(text, 0), Some(8..11));
        assert_eq!(SearchQuery::new("(c)", true).find_from(text, 0), Some(4..7));
        assert_eq!(SearchQuery::new("a+b", true).find_from(text, 0), Some(0..3));
    }

    #[test]
    fn test_unicode_case_folding_keeps_original_offsets() {
        let text = "xx ÉCOLE école";
        let query = SearchQuery::new("école", false);
        let spans: Vec<_> = query.find_all(text).collect();
        assert_eq!(spans.len(), 2);
        assert_eq!(&text[spans[0].clone()], "ÉCOLE");
        assert_eq!(&text[spans[1].clone()], "école");
    }

    #[test]
    fn test_empty_needle_matches_nothing() {
        let query = SearchQuery::new("", false);
        assert!(query.is_empty());
        assert_eq!(query.find_from("abc", 0), None);
        assert_eq!(query.find_all("abc").count(), 0);
    }

    #[test]
    fn test_from_past_end_or_mid_char() {
        let query = SearchQuery::new("é", true);
        assert_eq!(query.find_from("é", 5), None);
        assert_eq!(query.find_from("éé", 1), None);
    }
}
