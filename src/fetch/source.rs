use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::debug;
use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;

use super::FetchError;
use crate::quiz::{Quiz, QuizId};

pub const DEFAULT_PROXY_URL: &str = "https://api.allorigins.win/get";
pub const DEFAULT_TARGET_URL: &str = "https://create.kahoot.it/rest/kahoots";
const USER_AGENT: &str = concat!("quizpeek/", env!("CARGO_PKG_VERSION"));

/// Performs a single attempt at retrieving a quiz document.
///
/// Retrying, caching, and cancellation live in [`Fetcher`](super::Fetcher);
/// implementations only translate one request into a decoded [`Quiz`].
pub trait QuizSource {
    fn fetch(&self, id: &QuizId) -> Result<Quiz, FetchError>;
}

/// Connection settings for [`HttpSource`].
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub proxy_url: Url,
    pub target_url: String,
    pub timeout: Duration,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            proxy_url: Url::parse(DEFAULT_PROXY_URL)
                .unwrap_or_else(|error| panic!("default proxy URL must parse: {error}")),
            target_url: DEFAULT_TARGET_URL.to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// Fetches quizzes through a CORS proxy that wraps the upstream response in
/// a `{ "contents": "<json>" }` envelope.
pub struct HttpSource {
    client: Client,
    config: NetworkConfig,
}

impl HttpSource {
    pub fn new(config: NetworkConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build quiz HTTP client")?;
        Ok(Self { client, config })
    }

    /// Proxy URL for `id`. The `nocache` stamp keeps the proxy from serving a
    /// stale copy.
    pub(crate) fn request_url(&self, id: &QuizId, nocache: u128) -> Result<Url, FetchError> {
        let target = format!(
            "{}/{id}?nocache={nocache}",
            self.config.target_url.trim_end_matches('/')
        );
        Url::parse_with_params(self.config.proxy_url.as_str(), &[("url", target)])
            .map_err(|error| FetchError::transport(format!("invalid proxy URL: {error}")))
    }
}

impl QuizSource for HttpSource {
    fn fetch(&self, id: &QuizId) -> Result<Quiz, FetchError> {
        let url = self.request_url(id, unix_millis())?;
        debug!("requesting {url}");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|error| FetchError::transport(error.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response
            .text()
            .map_err(|error| FetchError::transport(error.to_string()))?;
        decode_envelope(&body)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    contents: Option<String>,
}

/// Unwrap the proxy envelope and decode the inner quiz document.
pub fn decode_envelope(body: &str) -> Result<Quiz, FetchError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|error| FetchError::Decode(error.to_string()))?;
    let contents = envelope
        .contents
        .filter(|contents| !contents.trim().is_empty())
        .ok_or(FetchError::EmptyPayload)?;
    serde_json::from_str(&contents).map_err(|error| FetchError::Decode(error.to_string()))
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuizView;

    fn sample_id() -> QuizId {
        QuizId::parse("123e4567-e89b-12d3-a456-426614174000").expect("valid id")
    }

    #[test]
    fn request_url_wraps_encoded_target() {
        let source = HttpSource::new(NetworkConfig::default()).expect("client");
        let url = source.request_url(&sample_id(), 42).expect("url");

        assert_eq!(url.host_str(), Some("api.allorigins.win"));
        let (key, value) = url.query_pairs().next().expect("url parameter");
        assert_eq!(key, "url");
        assert_eq!(
            value,
            "https://create.kahoot.it/rest/kahoots/123e4567-e89b-12d3-a456-426614174000?nocache=42"
        );
        assert!(!url.as_str().contains("?nocache"), "target must be encoded");
    }

    #[test]
    fn envelope_contents_are_decoded() {
        let body = serde_json::json!({
            "contents": r#"{"title":"Maths","questions":[{"type":"quiz","question":"2+2?","choices":[{"answer":"4","correct":true}]}]}"#,
            "status": {"http_code": 200}
        })
        .to_string();

        let quiz = decode_envelope(&body).expect("quiz");
        assert_eq!(quiz.display_title(), "Maths");
        assert_eq!(quiz.questions.len(), 1);
    }

    #[test]
    fn null_fields_in_skipped_questions_do_not_fail_the_document() {
        let inner = serde_json::json!({
            "title": "Maths",
            "questions": [
                {"type": "content", "question": null, "choices": null},
                {"type": "quiz", "question": "2+2?", "choices": [
                    {"answer": "4", "correct": true},
                    {"answer": "5", "correct": null}
                ]}
            ]
        });
        let body = serde_json::json!({ "contents": inner.to_string() }).to_string();

        let quiz = decode_envelope(&body).expect("quiz");
        let view = QuizView::render(&quiz);
        assert_eq!(view.blocks.len(), 1);
        assert_eq!(view.blocks[0].header, "2. 2+2?");
        assert!(view.blocks[0].choices[0].correct);
        assert!(!view.blocks[0].choices[1].correct);
    }

    #[test]
    fn missing_contents_is_an_empty_payload() {
        assert_eq!(decode_envelope("{}"), Err(FetchError::EmptyPayload));
        assert_eq!(
            decode_envelope(r#"{"contents":null}"#),
            Err(FetchError::EmptyPayload)
        );
        assert_eq!(
            decode_envelope(r#"{"contents":""}"#),
            Err(FetchError::EmptyPayload)
        );
    }

    #[test]
    fn malformed_inner_document_is_a_decode_error() {
        let result = decode_envelope(r#"{"contents":"<html>blocked</html>"}"#);
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }
}
