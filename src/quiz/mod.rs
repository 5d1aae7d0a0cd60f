//! Quiz payload model and its projection into renderable blocks.
//!
//! [`Quiz`] mirrors the JSON document served by the quiz endpoint. Everything
//! is optional on the wire, so every field carries a serde default and unknown
//! fields are ignored. An explicit `null` decodes like a missing field. [`QuizView`] is the flattened, display-ready form the
//! search engine and the terminal UI operate on.

mod identifier;
mod view;

use serde::{Deserialize, Deserializer, Serialize};

pub use identifier::{IdentifierError, QuizId};
pub use view::{Block, QuizView, RenderedChoice};

/// Title used when the payload omits one.
pub const DEFAULT_TITLE: &str = "Kahoot Quiz";

/// A quiz definition as delivered by the upstream endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Quiz {
    pub title: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Title to display, falling back to [`DEFAULT_TITLE`].
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or(DEFAULT_TITLE)
    }

    /// Number of questions whose type the viewer knows how to render.
    #[must_use]
    pub fn renderable_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|question| question.kind().is_some())
            .count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Question {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(deserialize_with = "null_as_default")]
    pub choices: Vec<Choice>,
}

impl Question {
    /// The display kind, or `None` when the question type is not rendered.
    #[must_use]
    pub fn kind(&self) -> Option<QuestionKind> {
        QuestionKind::from_tag(&self.kind)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Choice {
    pub answer: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub correct: bool,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl Choice {
    /// Visible label for the choice. Never empty.
    #[must_use]
    pub fn display_text(&self) -> String {
        let answer = self
            .answer
            .as_deref()
            .map(view::plain_text)
            .unwrap_or_default();
        if !answer.is_empty() {
            return answer;
        }
        match self.kind.as_deref() {
            Some("true") => "TRUE".to_string(),
            _ => "FALSE".to_string(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Question types the viewer renders. Everything else is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Quiz,
    MultipleSelectQuiz,
    TrueFalse,
}

impl QuestionKind {
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "quiz" => Some(Self::Quiz),
            "multiple_select_quiz" => Some(Self::MultipleSelectQuiz),
            "true_false" => Some(Self::TrueFalse),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::MultipleSelectQuiz => "multiple_select_quiz",
            Self::TrueFalse => "true_false",
        }
    }
}
