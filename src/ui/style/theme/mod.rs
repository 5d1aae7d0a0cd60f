mod builtins;
mod types;

pub use builtins::{by_name, default_theme, names};
pub use types::{Theme, ThemeDefinition};

impl Default for Theme {
    fn default() -> Self {
        default_theme()
    }
}
