use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Reasons an identifier is rejected before any network traffic happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("enter a quiz identifier")]
    Empty,
    #[error("invalid identifier format")]
    Malformed,
}

/// Quiz lookup key in the grouped 8-4-4-4-12 hexadecimal form.
///
/// The stored value is lowercased so that identifiers differing only in case
/// share a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuizId(String);

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
            .unwrap_or_else(|error| panic!("identifier pattern must compile: {error}"))
    })
}

impl QuizId {
    /// Validate user input, ignoring surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(IdentifierError::Empty);
        }
        if !pattern().is_match(trimmed) {
            return Err(IdentifierError::Malformed);
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for QuizId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_canonical_identifier() {
        let id = QuizId::parse("123e4567-e89b-12d3-a456-426614174000").expect("valid id");
        assert_eq!(id.as_str(), "123e4567-e89b-12d3-a456-426614174000");
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        let id = QuizId::parse("  123E4567-E89B-12D3-A456-426614174000\n").expect("valid id");
        assert_eq!(id.to_string(), "123e4567-e89b-12d3-a456-426614174000");
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(QuizId::parse("not-a-uuid"), Err(IdentifierError::Malformed));
        assert_eq!(
            QuizId::parse("123e4567e89b12d3a456426614174000"),
            Err(IdentifierError::Malformed)
        );
        assert_eq!(
            QuizId::parse("123e4567-e89b-12d3-a456-42661417400g"),
            Err(IdentifierError::Malformed)
        );
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(QuizId::parse("   "), Err(IdentifierError::Empty));
    }
}
