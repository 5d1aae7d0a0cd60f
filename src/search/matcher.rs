use std::ops::Range;

use log::warn;
use regex::{Regex, RegexBuilder};

/// Literal, case-insensitive substring matcher.
#[derive(Debug, Clone)]
pub(crate) struct QueryMatcher {
    regex: Regex,
}

impl QueryMatcher {
    /// Build a matcher for the trimmed query. Returns `None` when the query is
    /// blank. Metacharacters are escaped, so `a.b` only matches a literal dot.
    pub(crate) fn new(query: &str) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(regex) => Some(Self { regex }),
            Err(error) => {
                warn!("unable to build matcher for query: {error}");
                None
            }
        }
    }

    /// Non-overlapping byte ranges of every occurrence in `haystack`, left to
    /// right.
    pub(crate) fn find_all<'h>(&'h self, haystack: &'h str) -> impl Iterator<Item = Range<usize>> + 'h {
        self.regex.find_iter(haystack).map(|found| found.range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(query: &str, haystack: &str) -> Vec<Range<usize>> {
        QueryMatcher::new(query)
            .map(|matcher| matcher.find_all(haystack).collect())
            .unwrap_or_default()
    }

    #[test]
    fn blank_query_has_no_matcher() {
        assert!(QueryMatcher::new("").is_none());
        assert!(QueryMatcher::new("  \t ").is_none());
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(ranges("CAT", "Cat, cat and cAt"), vec![0..3, 5..8, 13..16]);
    }

    #[test]
    fn punctuation_is_literal() {
        assert_eq!(ranges("a.b", "a.b is here"), vec![0..3]);
        assert!(ranges("a.b", "axb is here").is_empty());
        assert_eq!(ranges("(x)", "f(x) = (x)"), vec![1..4, 7..10]);
    }

    #[test]
    fn occurrences_do_not_overlap() {
        assert_eq!(ranges("aa", "aaaa"), vec![0..2, 2..4]);
    }

    #[test]
    fn query_is_trimmed() {
        assert_eq!(ranges("  dog ", "hotdog"), vec![3..6]);
    }
}
