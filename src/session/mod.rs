//! Explicit application state and its command dispatch.
//!
//! Every user interaction is a [`Command`]; [`Session::dispatch`] applies it
//! synchronously and returns the [`Effect`]s the shell still has to perform
//! (start or cancel a fetch, surface an error, scroll). Nothing in here
//! touches the terminal or the network, which keeps the whole flow testable.

mod accordion;
mod commands;

use log::{debug, info};

pub use accordion::Accordion;
pub use commands::{Command, Effect};

use crate::fetch::{FetchError, FetchResult};
use crate::quiz::{QuizId, QuizView};
use crate::search::{Navigation, SearchSession};

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Identifier entry, with an optional error line.
    Auth,
    /// A fetch is pending; input is disabled.
    Loading,
    /// The quiz is rendered and searchable.
    Content,
}

#[derive(Debug)]
pub struct Session {
    screen: Screen,
    error: Option<String>,
    view: Option<QuizView>,
    accordion: Accordion,
    search: SearchSession,
    next_request: u64,
    pending_request: Option<u64>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: Screen::Auth,
            error: None,
            view: None,
            accordion: Accordion::default(),
            search: SearchSession::default(),
            next_request: 0,
            pending_request: None,
        }
    }

    /// Apply `command` and report the effects to perform.
    pub fn dispatch(&mut self, command: Command) -> Vec<Effect> {
        match command {
            Command::SubmitIdentifier(input) => self.submit_identifier(&input),
            Command::FetchFinished(result) => self.fetch_finished(result),
            Command::QueryChanged(query) => {
                if self.screen == Screen::Content {
                    self.search.perform_search(&query);
                }
                Vec::new()
            }
            Command::FindNext => self.navigate(SearchSession::find_next),
            Command::FindPrevious => self.navigate(SearchSession::find_previous),
            Command::ToggleBlock(block) => {
                if self.block_count() > block {
                    self.accordion.toggle(block);
                }
                Vec::new()
            }
            Command::Back => self.back(),
        }
    }

    fn submit_identifier(&mut self, input: &str) -> Vec<Effect> {
        if self.screen == Screen::Content {
            return Vec::new();
        }
        let id = match QuizId::parse(input) {
            Ok(id) => id,
            Err(error) => {
                let message = error.to_string();
                self.error = Some(message.clone());
                return vec![Effect::ShowError(message)];
            }
        };

        self.next_request += 1;
        let request = self.next_request;
        self.pending_request = Some(request);
        self.screen = Screen::Loading;
        self.error = None;
        info!("fetching quiz {id} (request {request})");
        vec![Effect::StartFetch { request, id }]
    }

    fn fetch_finished(&mut self, result: FetchResult) -> Vec<Effect> {
        if self.pending_request != Some(result.request) {
            debug!("discarding stale result for request {}", result.request);
            return Vec::new();
        }
        self.pending_request = None;

        match result.outcome {
            Ok(quiz) => {
                let view = QuizView::render(&quiz);
                self.search.replace_headers(view.headers());
                self.accordion.collapse_all();
                self.view = Some(view);
                self.error = None;
                self.screen = Screen::Content;
                Vec::new()
            }
            Err(FetchError::Cancelled) => {
                self.screen = Screen::Auth;
                Vec::new()
            }
            Err(error) => {
                self.screen = Screen::Auth;
                let message = error
                    .user_message()
                    .unwrap_or_else(|| error.to_string());
                self.error = Some(message.clone());
                vec![Effect::ShowError(message)]
            }
        }
    }

    fn navigate(&mut self, step: fn(&mut SearchSession) -> Option<Navigation>) -> Vec<Effect> {
        if self.screen != Screen::Content {
            return Vec::new();
        }
        match step(&mut self.search) {
            Some(navigation) => {
                self.accordion.expand_only(navigation.block);
                vec![Effect::ScrollTo {
                    block: navigation.block,
                }]
            }
            None => Vec::new(),
        }
    }

    fn back(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.pending_request.take().is_some() {
            effects.push(Effect::CancelFetch);
        }
        self.screen = Screen::Auth;
        self.error = None;
        self.view = None;
        self.accordion.collapse_all();
        self.search = SearchSession::default();
        effects
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn view(&self) -> Option<&QuizView> {
        self.view.as_ref()
    }

    #[must_use]
    pub fn accordion(&self) -> &Accordion {
        &self.accordion
    }

    #[must_use]
    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    #[must_use]
    pub fn pending_request(&self) -> Option<u64> {
        self.pending_request
    }

    #[must_use]
    pub fn block_count(&self) -> usize {
        self.view.as_ref().map_or(0, |view| view.blocks.len())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::quiz::{Choice, Question, Quiz};

    const VALID_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

    fn quiz() -> Arc<Quiz> {
        let question = |text: &str| Question {
            kind: "quiz".into(),
            question: text.into(),
            choices: vec![Choice {
                answer: Some("yes".into()),
                correct: true,
                kind: None,
            }],
        };
        Arc::new(Quiz {
            title: Some("Animals".into()),
            questions: vec![
                question("Is a cat a mammal?"),
                question("Is a dog a mammal?"),
                question("Can a cat swim?"),
            ],
        })
    }

    fn submit(session: &mut Session) -> u64 {
        let effects = session.dispatch(Command::SubmitIdentifier(VALID_ID.into()));
        match effects.as_slice() {
            [Effect::StartFetch { request, .. }] => *request,
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    fn loaded_session() -> Session {
        let mut session = Session::new();
        let request = submit(&mut session);
        session.dispatch(Command::FetchFinished(FetchResult {
            request,
            outcome: Ok(quiz()),
        }));
        session
    }

    #[test]
    fn malformed_identifier_never_starts_a_fetch() {
        let mut session = Session::new();
        let effects = session.dispatch(Command::SubmitIdentifier("not-a-uuid".into()));
        assert_eq!(
            effects,
            vec![Effect::ShowError("invalid identifier format".into())]
        );
        assert_eq!(session.screen(), Screen::Auth);
        assert_eq!(session.error(), Some("invalid identifier format"));
        assert_eq!(session.pending_request(), None);
    }

    #[test]
    fn valid_identifier_starts_loading() {
        let mut session = Session::new();
        let request = submit(&mut session);
        assert_eq!(request, 1);
        assert_eq!(session.screen(), Screen::Loading);
        assert_eq!(session.error(), None);
    }

    #[test]
    fn successful_fetch_shows_content() {
        let session = loaded_session();
        assert_eq!(session.screen(), Screen::Content);
        assert_eq!(session.block_count(), 3);
        assert_eq!(session.view().map(|view| view.title.as_str()), Some("Animals"));
        assert_eq!(session.accordion().open_block(), None);
    }

    #[test]
    fn stale_results_are_ignored() {
        let mut session = Session::new();
        let first = submit(&mut session);
        session.dispatch(Command::Back);
        let second = submit(&mut session);
        assert_ne!(first, second);

        session.dispatch(Command::FetchFinished(FetchResult {
            request: first,
            outcome: Ok(quiz()),
        }));
        assert_eq!(session.screen(), Screen::Loading);
        assert!(session.view().is_none());
    }

    #[test]
    fn empty_quiz_has_its_own_message() {
        let mut session = Session::new();
        let request = submit(&mut session);
        let effects = session.dispatch(Command::FetchFinished(FetchResult {
            request,
            outcome: Err(FetchError::EmptyQuiz),
        }));
        assert_eq!(
            effects,
            vec![Effect::ShowError("quiz is empty or private".into())]
        );
        assert_eq!(session.screen(), Screen::Auth);
    }

    #[test]
    fn transport_failure_shows_access_error() {
        let mut session = Session::new();
        let request = submit(&mut session);
        session.dispatch(Command::FetchFinished(FetchResult {
            request,
            outcome: Err(FetchError::Status(500)),
        }));
        assert_eq!(session.error(), Some("access error, try again"));
        assert_eq!(session.screen(), Screen::Auth);
    }

    #[test]
    fn cancellation_is_silent() {
        let mut session = Session::new();
        let request = submit(&mut session);
        let effects = session.dispatch(Command::FetchFinished(FetchResult {
            request,
            outcome: Err(FetchError::Cancelled),
        }));
        assert!(effects.is_empty());
        assert_eq!(session.error(), None);
        assert_eq!(session.screen(), Screen::Auth);
    }

    #[test]
    fn back_while_loading_cancels_the_fetch() {
        let mut session = Session::new();
        submit(&mut session);
        assert_eq!(session.dispatch(Command::Back), vec![Effect::CancelFetch]);
        assert_eq!(session.screen(), Screen::Auth);
    }

    #[test]
    fn find_next_expands_and_scrolls_to_the_match() {
        let mut session = loaded_session();
        session.dispatch(Command::QueryChanged("cat".into()));
        assert_eq!(session.search().counter_text(), "0 / 2");

        let effects = session.dispatch(Command::FindNext);
        assert_eq!(effects, vec![Effect::ScrollTo { block: 0 }]);
        assert!(session.accordion().is_open(0));

        let effects = session.dispatch(Command::FindNext);
        assert_eq!(effects, vec![Effect::ScrollTo { block: 2 }]);
        assert!(session.accordion().is_open(2));
        assert!(!session.accordion().is_open(0));
        assert_eq!(session.search().counter_text(), "2 / 2");
    }

    #[test]
    fn find_previous_wraps_to_the_last_match() {
        let mut session = loaded_session();
        session.dispatch(Command::QueryChanged("mammal".into()));
        let effects = session.dispatch(Command::FindPrevious);
        assert_eq!(effects, vec![Effect::ScrollTo { block: 1 }]);
        assert_eq!(session.search().counter_text(), "2 / 2");
    }

    #[test]
    fn live_query_changes_do_not_navigate() {
        let mut session = loaded_session();
        session.dispatch(Command::QueryChanged("ca".into()));
        let effects = session.dispatch(Command::QueryChanged("cat".into()));
        assert!(effects.is_empty());
        assert_eq!(session.search().current(), None);
        assert_eq!(session.accordion().open_block(), None);
    }

    #[test]
    fn reload_clears_previous_search() {
        let mut session = loaded_session();
        session.dispatch(Command::QueryChanged("cat".into()));
        session.dispatch(Command::FindNext);
        session.dispatch(Command::Back);
        assert!(session.search().matches().is_empty());

        let request = submit(&mut session);
        session.dispatch(Command::FetchFinished(FetchResult {
            request,
            outcome: Ok(quiz()),
        }));
        assert!(session.search().matches().is_empty());
        assert_eq!(session.search().query(), "");
    }

    #[test]
    fn toggle_ignores_out_of_range_blocks() {
        let mut session = loaded_session();
        session.dispatch(Command::ToggleBlock(9));
        assert_eq!(session.accordion().open_block(), None);
        session.dispatch(Command::ToggleBlock(1));
        assert!(session.accordion().is_open(1));
    }
}
