//! Interactive terminal UI for browsing a quiz.
//!
//! [`App`] owns the session and terminal-only state; the remaining
//! submodules implement key handling, rendering, the event loop, and the
//! reusable widgets and styles they draw with.

mod actions;
pub mod components;
pub mod input;
pub mod render;
mod runtime;
mod state;
pub mod style;

pub use state::{App, Focus, ListScroll};
