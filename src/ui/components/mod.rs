//! UI building blocks shared across rendering and state modules.

/// Question list layout and highlighting.
pub mod accordion;
/// Runtime log pane.
pub mod logs;
/// Spinner and right-aligned status helpers.
pub mod progress;

pub use accordion::{ListContext, ListLines, build_list};
pub use logs::LogPane;
pub use progress::{render_trailing, spinner_line};
