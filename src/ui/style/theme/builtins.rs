use ratatui::style::{Color, Modifier, Style};

use super::types::{Theme, ThemeDefinition};

pub const NEON: Theme = Theme {
    title: Style::new()
        .fg(Color::Rgb(0, 243, 255))
        .add_modifier(Modifier::BOLD),
    prompt: Style::new().fg(Color::Rgb(0, 243, 255)),
    empty: Style::new().fg(Color::Rgb(110, 110, 140)),
    error: Style::new().fg(Color::Rgb(255, 0, 200)),
    header: Style::new().fg(Color::Rgb(230, 230, 250)),
    cursor: Style::new().bg(Color::Rgb(40, 40, 70)),
    marker: Style::new()
        .fg(Color::Black)
        .bg(Color::Rgb(255, 230, 0)),
    active_marker: Style::new()
        .fg(Color::Black)
        .bg(Color::Rgb(255, 0, 200))
        .add_modifier(Modifier::BOLD),
    correct: Style::new()
        .fg(Color::Rgb(57, 255, 20))
        .add_modifier(Modifier::BOLD),
    border: Style::new().fg(Color::Rgb(0, 243, 255)),
};

pub const LIGHT: Theme = Theme {
    title: Style::new()
        .fg(Color::Rgb(15, 23, 42))
        .add_modifier(Modifier::BOLD),
    prompt: Style::new().fg(Color::Rgb(0, 102, 153)),
    empty: Style::new().fg(Color::Rgb(100, 100, 100)),
    error: Style::new().fg(Color::Rgb(185, 28, 28)),
    header: Style::new().fg(Color::Rgb(15, 23, 42)),
    cursor: Style::new().bg(Color::Rgb(226, 232, 240)),
    marker: Style::new()
        .fg(Color::Rgb(15, 23, 42))
        .bg(Color::Rgb(253, 230, 138)),
    active_marker: Style::new()
        .fg(Color::White)
        .bg(Color::Rgb(180, 83, 9))
        .add_modifier(Modifier::BOLD),
    correct: Style::new()
        .fg(Color::Rgb(21, 128, 61))
        .add_modifier(Modifier::BOLD),
    border: Style::new().fg(Color::Rgb(0, 102, 153)),
};

/// Colourless theme relying on modifiers only.
pub const MONO: Theme = Theme {
    title: Style::new().add_modifier(Modifier::BOLD),
    prompt: Style::new(),
    empty: Style::new().add_modifier(Modifier::DIM),
    error: Style::new().add_modifier(Modifier::BOLD),
    header: Style::new(),
    cursor: Style::new().add_modifier(Modifier::REVERSED),
    marker: Style::new().add_modifier(Modifier::UNDERLINED),
    active_marker: Style::new()
        .add_modifier(Modifier::UNDERLINED)
        .add_modifier(Modifier::BOLD),
    correct: Style::new().add_modifier(Modifier::BOLD),
    border: Style::new(),
};

const BUILTINS: [ThemeDefinition; 3] = [
    ThemeDefinition::new("neon", NEON).with_aliases(&["default", "dark"]),
    ThemeDefinition::new("light", LIGHT),
    ThemeDefinition::new("mono", MONO).with_aliases(&["plain", "none"]),
];

#[must_use]
pub fn default_theme() -> Theme {
    NEON
}

/// Names of the built-in themes, default first.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|definition| definition.name)
}

/// Look up a built-in theme by name or alias, ignoring case.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
    let name = name.trim();
    BUILTINS
        .iter()
        .find(|definition| definition.matches(name))
        .map(|definition| definition.theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_builtins() {
        assert_eq!(by_name("Default"), Some(NEON));
        assert_eq!(by_name(" light "), Some(LIGHT));
        assert_eq!(by_name("plain"), Some(MONO));
        assert_eq!(by_name("solarized"), None);
    }

    #[test]
    fn default_theme_is_listed_first() {
        assert_eq!(names().next(), Some("neon"));
        assert_eq!(names().count(), 3);
    }
}
