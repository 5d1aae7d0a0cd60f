//! Visual styling utilities.
//!
//! Themes are plain bundles of ratatui styles; the built-in set is selected
//! by name from configuration or the command line.

pub mod theme;

pub use theme::{Theme, ThemeDefinition, by_name, default_theme, names};
