use std::ops::ControlFlow;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use super::state::Focus;
use crate::session::{Command, Screen};

const PAGE: isize = 5;

impl<'a> App<'a> {
    /// Handle one key press. `Break` means the user asked to quit.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> ControlFlow<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return ControlFlow::Break(());
        }
        if key.code == KeyCode::F(12) {
            self.show_logs = !self.show_logs;
            return ControlFlow::Continue(());
        }
        if self.show_logs {
            if key.code == KeyCode::Esc {
                self.show_logs = false;
                return ControlFlow::Continue(());
            }
            if self.logs.handle_key(key) {
                return ControlFlow::Continue(());
            }
        }

        match self.session.screen() {
            Screen::Auth => return self.handle_auth_key(key),
            Screen::Loading => {
                if key.code == KeyCode::Esc {
                    self.go_back();
                }
            }
            Screen::Content => self.handle_content_key(key),
        }
        ControlFlow::Continue(())
    }

    fn handle_auth_key(&mut self, key: KeyEvent) -> ControlFlow<()> {
        match key.code {
            KeyCode::Esc => return ControlFlow::Break(()),
            KeyCode::Enter => self.submit_identifier(),
            _ => {
                self.identifier_input.input(key);
            }
        }
        ControlFlow::Continue(())
    }

    fn handle_content_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            KeyCode::F(3) if shift => self.dispatch(Command::FindPrevious),
            KeyCode::F(3) => self.dispatch(Command::FindNext),
            KeyCode::Char('n') if ctrl => self.dispatch(Command::FindNext),
            KeyCode::Char('p') if ctrl => self.dispatch(Command::FindPrevious),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-PAGE),
            KeyCode::PageDown => self.move_cursor(PAGE),
            _ => match self.focus {
                Focus::Query => self.handle_query_key(key),
                Focus::List => self.handle_list_key(key),
            },
        }
    }

    fn handle_query_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            self.dispatch(Command::FindNext);
        } else if self.query_input.input(key) {
            self.query_changed();
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.dispatch(Command::ToggleBlock(self.cursor));
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.move_cursor(isize::MAX),
            KeyCode::Char('n') => self.dispatch(Command::FindNext),
            KeyCode::Char('N') => self.dispatch(Command::FindPrevious),
            KeyCode::Char('/') => self.focus = Focus::Query,
            _ => {}
        }
    }
}
