use serde::Serialize;

use super::{Quiz, QuestionKind};

/// Display-ready projection of a [`Quiz`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizView {
    pub title: String,
    pub blocks: Vec<Block>,
}

/// One expandable question block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    /// 1-based position of the question in the payload. Skipped questions
    /// still consume a number.
    pub number: usize,
    pub kind: QuestionKind,
    /// Immutable header text searched by the highlight engine.
    pub header: String,
    pub choices: Vec<RenderedChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedChoice {
    pub text: String,
    pub correct: bool,
}

impl QuizView {
    #[must_use]
    pub fn render(quiz: &Quiz) -> Self {
        let blocks = quiz
            .questions
            .iter()
            .enumerate()
            .filter_map(|(index, question)| {
                let kind = question.kind()?;
                let number = index + 1;
                let choices = question
                    .choices
                    .iter()
                    .map(|choice| RenderedChoice {
                        text: choice.display_text(),
                        correct: choice.correct,
                    })
                    .collect();
                Some(Block {
                    number,
                    kind,
                    header: format!("{number}. {}", plain_text(&question.question)),
                    choices,
                })
            })
            .collect();

        Self {
            title: quiz.display_title().to_string(),
            blocks,
        }
    }

    /// Header text of every block, in document order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|block| block.header.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Strip inline markup from question and answer text.
///
/// Upstream text may carry simple formatting tags and HTML entities; the
/// terminal shows the visible text only, with whitespace runs collapsed.
pub(crate) fn plain_text(raw: &str) -> String {
    let mut stripped = String::with_capacity(raw.len());
    let mut in_tag = false;
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '<' if !in_tag
                && chars
                    .peek()
                    .is_some_and(|next| next.is_ascii_alphabetic() || *next == '/') =>
            {
                in_tag = true;
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => stripped.push(ch),
            _ => {}
        }
    }

    let decoded = decode_entities(&stripped);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entities(text: &str) -> String {
    const ENTITIES: [(&str, &str); 6] = [
        ("&nbsp;", " "),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&#39;", "'"),
        ("&amp;", "&"),
    ];

    if !text.contains('&') {
        return text.to_string();
    }
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, replacement)| {
            acc.replace(entity, replacement)
        })
}
