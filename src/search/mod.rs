//! In-view search over question headers.
//!
//! Each header is kept as immutable source text. A search computes match
//! spans against that text and rendering turns the spans into
//! [`Segment`]s, so clearing highlights never has to repair anything: the
//! next render of a header without spans is exactly its original text.

mod matcher;

use std::fmt;
use std::ops::Range;

use matcher::QueryMatcher;

/// One highlighted occurrence of the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Index of the block whose header contains the match.
    pub block: usize,
    /// Byte range into that header's text.
    pub range: Range<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Plain,
    Marker,
    ActiveMarker,
}

/// A run of header text with uniform highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub kind: SegmentKind,
}

/// Where the search session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// No query has been applied.
    Idle,
    /// A query is applied; no match is active.
    Searched,
    /// One match is active.
    Navigating,
}

/// Counter shown next to the query field, e.g. `0 / 3` or `2 / 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCounter {
    pub position: usize,
    pub total: usize,
}

impl fmt::Display for MatchCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.position, self.total)
    }
}

/// Result of moving to a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    /// Index of the newly active match.
    pub index: usize,
    /// Block that must be expanded and scrolled into view.
    pub block: usize,
}

/// Search state for one rendered quiz.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    headers: Vec<String>,
    query: String,
    applied: bool,
    matches: Vec<Match>,
    current: Option<usize>,
    counter_visible: bool,
}

impl SearchSession {
    #[must_use]
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Replace the searchable content. Any existing highlights are dropped.
    pub fn replace_headers<I, S>(&mut self, headers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clear_highlights();
        self.query.clear();
        self.headers = headers.into_iter().map(Into::into).collect();
    }

    /// Remove every marker and hide the counter.
    pub fn clear_highlights(&mut self) {
        self.matches.clear();
        self.current = None;
        self.applied = false;
        self.counter_visible = false;
    }

    /// Highlight every occurrence of `query` across all headers, in document
    /// order. No match is active afterwards. Returns the number of matches.
    pub fn perform_search(&mut self, query: &str) -> usize {
        self.clear_highlights();
        self.query = query.to_string();

        let Some(matcher) = QueryMatcher::new(query) else {
            return 0;
        };
        self.applied = true;

        for (block, header) in self.headers.iter().enumerate() {
            self.matches.extend(
                matcher
                    .find_all(header)
                    .map(|range| Match { block, range }),
            );
        }

        self.counter_visible = !self.matches.is_empty();
        self.matches.len()
    }

    /// Activate the match at `index`, wrapping in both directions.
    ///
    /// Returns `None` and changes nothing when there are no matches.
    pub fn navigate_to_match(&mut self, index: isize) -> Option<Navigation> {
        if self.matches.is_empty() {
            return None;
        }
        let len = self.matches.len() as isize;
        let wrapped = index.rem_euclid(len) as usize;
        self.current = Some(wrapped);
        Some(Navigation {
            index: wrapped,
            block: self.matches[wrapped].block,
        })
    }

    /// Advance to the next match, searching first when nothing is
    /// highlighted yet.
    pub fn find_next(&mut self) -> Option<Navigation> {
        if self.matches.is_empty() {
            let query = self.query.clone();
            if self.perform_search(&query) == 0 {
                return None;
            }
            return self.navigate_to_match(0);
        }
        let next = self.current.map_or(0, |current| current as isize + 1);
        self.navigate_to_match(next)
    }

    /// Step back to the previous match, wrapping from the first to the last.
    pub fn find_previous(&mut self) -> Option<Navigation> {
        if self.matches.is_empty() {
            let query = self.query.clone();
            if self.perform_search(&query) == 0 {
                return None;
            }
        }
        let previous = self.current.map_or(-1, |current| current as isize - 1);
        self.navigate_to_match(previous)
    }

    #[must_use]
    pub fn state(&self) -> SearchState {
        match (self.applied, self.current) {
            (_, Some(_)) => SearchState::Navigating,
            (true, None) => SearchState::Searched,
            (false, None) => SearchState::Idle,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    #[must_use]
    pub fn active_match(&self) -> Option<&Match> {
        self.current.and_then(|index| self.matches.get(index))
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The visible counter, or `None` while it is hidden.
    #[must_use]
    pub fn counter(&self) -> Option<MatchCounter> {
        self.counter_visible.then(|| MatchCounter {
            position: self.current.map_or(0, |current| current + 1),
            total: self.matches.len(),
        })
    }

    /// Counter text; `0 / 0` while hidden.
    #[must_use]
    pub fn counter_text(&self) -> String {
        self.counter()
            .unwrap_or(MatchCounter {
                position: 0,
                total: 0,
            })
            .to_string()
    }

    /// Split the header of `block` into plain and highlighted runs.
    ///
    /// Concatenating the returned text always reproduces the header exactly.
    #[must_use]
    pub fn segments(&self, block: usize) -> Vec<Segment<'_>> {
        let Some(header) = self.headers.get(block) else {
            return Vec::new();
        };

        let start = self.matches.partition_point(|found| found.block < block);
        let mut segments = Vec::new();
        let mut cursor = 0;
        for (offset, found) in self.matches[start..]
            .iter()
            .take_while(|found| found.block == block)
            .enumerate()
        {
            if found.range.start > cursor {
                segments.push(Segment {
                    text: &header[cursor..found.range.start],
                    kind: SegmentKind::Plain,
                });
            }
            let kind = if self.current == Some(start + offset) {
                SegmentKind::ActiveMarker
            } else {
                SegmentKind::Marker
            };
            segments.push(Segment {
                text: &header[found.range.clone()],
                kind,
            });
            cursor = found.range.end;
        }
        if cursor < header.len() || segments.is_empty() {
            segments.push(Segment {
                text: &header[cursor..],
                kind: SegmentKind::Plain,
            });
        }
        segments
    }
}
