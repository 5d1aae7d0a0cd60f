use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use tui_textarea::{CursorMove, TextArea};

/// Single-line text field backed by `tui-textarea`.
pub struct TextInput<'a> {
    textarea: TextArea<'a>,
    placeholder: Option<String>,
}

impl<'a> TextInput<'a> {
    pub fn new(initial: impl Into<String>) -> Self {
        let mut input = Self {
            textarea: TextArea::default(),
            placeholder: None,
        };
        input.set_text(initial);
        input
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        self.textarea.set_placeholder_text(placeholder.clone());
        self.placeholder = Some(placeholder);
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.textarea
            .lines()
            .first()
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Replace the contents and move the cursor to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text: String = text.into();
        let line = text.lines().next().unwrap_or("").to_string();
        let mut textarea = TextArea::new(vec![line]);
        textarea.set_cursor_line_style(Style::default());
        if let Some(placeholder) = &self.placeholder {
            textarea.set_placeholder_text(placeholder.clone());
        }
        textarea.move_cursor(CursorMove::End);
        self.textarea = textarea;
    }

    pub fn clear(&mut self) {
        self.set_text(String::new());
    }

    /// Show or hide the cursor depending on focus.
    pub fn set_focused(&mut self, focused: bool) {
        let style = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        self.textarea.set_cursor_style(style);
    }

    /// Feed a key press to the field. Returns `true` when the text changed.
    ///
    /// Enter is never consumed so the field stays on one line.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if matches!(key.code, KeyCode::Enter) {
            return false;
        }
        let before = self.text().to_string();
        self.textarea.input(key);
        self.text() != before
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&self.textarea, area);
    }
}
