use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info, warn};

use super::{CancelToken, FetchError, QuizSource, RetryPolicy};
use crate::quiz::{Quiz, QuizId};

/// Retrying, caching front-end over a [`QuizSource`].
pub struct Fetcher<S> {
    source: S,
    policy: RetryPolicy,
    cache: Option<HashMap<QuizId, Arc<Quiz>>>,
}

impl<S: QuizSource> Fetcher<S> {
    /// Create a fetcher with the in-memory cache enabled.
    pub fn new(source: S, policy: RetryPolicy) -> Self {
        Self {
            source,
            policy,
            cache: Some(HashMap::new()),
        }
    }

    #[must_use]
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache = enabled.then(HashMap::new);
        self
    }

    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetch `id`, retrying transient failures according to the policy.
    ///
    /// A quiz without renderable questions is a terminal failure and is never
    /// retried. The token is checked before every attempt and while waiting
    /// between attempts.
    pub fn fetch(&mut self, id: &QuizId, token: &CancelToken) -> Result<Arc<Quiz>, FetchError> {
        if let Some(quiz) = self.cache.as_ref().and_then(|cache| cache.get(id)) {
            debug!("cache hit for {id}");
            return Ok(Arc::clone(quiz));
        }

        let attempts = self.policy.attempts();
        let mut attempt = 0;
        loop {
            attempt += 1;
            if token.is_cancelled() {
                debug!("fetch for {id} cancelled before attempt {attempt}");
                return Err(FetchError::Cancelled);
            }

            let error = match self.source.fetch(id) {
                Ok(quiz) => return self.accept(id, quiz),
                Err(error) => error,
            };

            if !error.is_retryable() {
                return Err(error);
            }
            warn!("attempt {attempt}/{attempts} for {id} failed: {error}");
            if attempt >= attempts {
                return Err(error);
            }
            if !self.policy.wait(token) {
                debug!("fetch for {id} cancelled while waiting to retry");
                return Err(FetchError::Cancelled);
            }
        }
    }

    fn accept(&mut self, id: &QuizId, quiz: Quiz) -> Result<Arc<Quiz>, FetchError> {
        if quiz.renderable_count() == 0 {
            info!("quiz {id} has no renderable questions");
            return Err(FetchError::EmptyQuiz);
        }
        let quiz = Arc::new(quiz);
        if let Some(cache) = self.cache.as_mut() {
            cache.insert(id.clone(), Arc::clone(&quiz));
        }
        info!(
            "loaded quiz {id} with {} questions",
            quiz.renderable_count()
        );
        Ok(quiz)
    }
}
