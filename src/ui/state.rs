//! Core state container for the terminal front-end.
//!
//! [`App`] wraps the pure [`Session`] with everything that only exists in a
//! terminal: the two text fields, focus, list cursor and scroll position, the
//! spinner, the log pane, and the handle to the background fetch worker.
//! Effects returned by the session are carried out here.

use log::{info, warn};
use throbber_widgets_tui::ThrobberState;

use crate::fetch::FetchHandle;
use crate::session::{Command, Effect, Screen, Session};
use crate::ui::components::LogPane;
use crate::ui::input::TextInput;
use crate::ui::style::Theme;

/// Which field receives typed keys on the content screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Query,
    List,
}

/// Scroll position of the question list, in wrapped lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListScroll {
    pub offset: usize,
    /// Block to centre on the next draw.
    pub centre_on: Option<usize>,
}

pub struct App<'a> {
    pub(crate) session: Session,
    pub theme: Theme,
    pub(crate) identifier_input: TextInput<'a>,
    pub(crate) query_input: TextInput<'a>,
    pub(crate) focus: Focus,
    pub(crate) cursor: usize,
    pub(crate) scroll: ListScroll,
    pub(crate) throbber_state: ThrobberState,
    pub(crate) logs: LogPane,
    pub(crate) show_logs: bool,
    /// Query to apply once the next quiz has loaded.
    pending_query: Option<String>,
    fetch: FetchHandle,
}

impl<'a> Drop for App<'a> {
    fn drop(&mut self) {
        self.fetch.shutdown();
    }
}

impl<'a> App<'a> {
    pub fn new(fetch: FetchHandle) -> Self {
        Self {
            session: Session::new(),
            theme: Theme::default(),
            identifier_input: TextInput::new("")
                .with_placeholder("xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"),
            query_input: TextInput::new("").with_placeholder("type to search questions"),
            focus: Focus::Query,
            cursor: 0,
            scroll: ListScroll::default(),
            throbber_state: ThrobberState::default(),
            logs: LogPane::new(),
            show_logs: false,
            pending_query: None,
            fetch,
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Prefill the identifier field and submit it straight away.
    #[must_use]
    pub fn with_initial_identifier(mut self, id: Option<String>) -> Self {
        if let Some(id) = id.filter(|id| !id.trim().is_empty()) {
            self.identifier_input.set_text(id);
            self.submit_identifier();
        }
        self
    }

    /// Query applied as soon as a quiz is shown.
    #[must_use]
    pub fn with_initial_query(mut self, query: Option<String>) -> Self {
        self.pending_query = query.filter(|query| !query.trim().is_empty());
        self
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Run `command` through the session and carry out its effects.
    pub(crate) fn dispatch(&mut self, command: Command) {
        let effects = self.session.dispatch(command);
        self.apply_effects(effects);
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartFetch { request, id } => self.fetch.start(request, id),
                Effect::CancelFetch => self.fetch.cancel(),
                Effect::ShowError(message) => warn!("{message}"),
                Effect::ScrollTo { block } => {
                    self.cursor = block;
                    self.scroll.centre_on = Some(block);
                }
            }
        }
    }

    pub(crate) fn submit_identifier(&mut self) {
        let text = self.identifier_input.text().to_string();
        self.dispatch(Command::SubmitIdentifier(text));
    }

    /// Re-run the live search with the current query field.
    pub(crate) fn query_changed(&mut self) {
        let query = self.query_input.text().to_string();
        self.dispatch(Command::QueryChanged(query));
    }

    /// Leave the current quiz or pending fetch and reset every field.
    pub(crate) fn go_back(&mut self) {
        self.dispatch(Command::Back);
        self.identifier_input.clear();
        self.query_input.clear();
        self.focus = Focus::Query;
        self.cursor = 0;
        self.scroll = ListScroll::default();
    }

    /// Apply every finished fetch the worker has reported.
    pub(crate) fn pump_fetch_results(&mut self) {
        while let Ok(result) = self.fetch.try_recv() {
            let was_content = self.session.screen() == Screen::Content;
            self.dispatch(Command::FetchFinished(result));
            if !was_content && self.session.screen() == Screen::Content {
                self.content_loaded();
            }
        }
    }

    fn content_loaded(&mut self) {
        if let Some(view) = self.session.view() {
            info!("loaded \"{}\" with {} questions", view.title, view.blocks.len());
        }
        self.focus = Focus::Query;
        self.cursor = 0;
        self.scroll = ListScroll::default();
        match self.pending_query.take() {
            Some(query) => {
                self.query_input.set_text(query);
                self.query_changed();
            }
            None => self.query_input.clear(),
        }
    }

    pub(crate) fn move_cursor(&mut self, delta: isize) {
        let count = self.session.block_count();
        if count == 0 {
            self.cursor = 0;
            return;
        }
        let last = count - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub(crate) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Query => Focus::List,
            Focus::List => Focus::Query,
        };
    }
}
