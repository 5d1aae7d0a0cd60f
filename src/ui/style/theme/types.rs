use ratatui::style::{Color, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub title: Style,
    pub prompt: Style,
    pub empty: Style,
    pub error: Style,
    pub header: Style,
    pub cursor: Style,
    pub marker: Style,
    pub active_marker: Style,
    pub correct: Style,
    pub border: Style,
}

impl Theme {
    #[must_use]
    pub fn title_style(&self) -> Style {
        self.title
    }

    #[must_use]
    pub fn prompt_style(&self) -> Style {
        self.prompt
    }

    #[must_use]
    pub fn empty_style(&self) -> Style {
        self.empty
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        self.error
    }

    #[must_use]
    pub fn header_style(&self) -> Style {
        self.header
    }

    /// Header style for the row under the list cursor.
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        self.header.patch(self.cursor)
    }

    #[must_use]
    pub fn marker_style(&self) -> Style {
        self.marker
    }

    #[must_use]
    pub fn active_marker_style(&self) -> Style {
        self.active_marker
    }

    #[must_use]
    pub fn correct_style(&self) -> Style {
        self.correct
    }

    /// Border colour, used for the input frames.
    #[must_use]
    pub fn border_style(&self) -> Style {
        self.border
    }

    /// Border for an input that failed validation.
    #[must_use]
    pub fn invalid_border_style(&self) -> Style {
        Style::new().fg(self.error.fg.unwrap_or(Color::Red))
    }
}

/// Definition for a built-in theme bundled with the application.
#[derive(Debug, Clone, Copy)]
pub struct ThemeDefinition {
    pub name: &'static str,
    pub theme: Theme,
    pub aliases: &'static [&'static str],
}

impl ThemeDefinition {
    pub const fn new(name: &'static str, theme: Theme) -> Self {
        Self {
            name,
            theme,
            aliases: &[],
        }
    }

    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name))
    }
}
