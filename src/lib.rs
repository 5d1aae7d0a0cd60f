//! Core crate exports for `quizpeek`, a terminal viewer for quiz answers.
//!
//! The library holds everything below the binary's argument parsing: the quiz
//! model, the fetch pipeline, the in-view search engine, the session state
//! machine, and the terminal UI that drives them.

pub mod app_dirs;
pub mod fetch;
pub mod logging;
pub mod quiz;
pub mod search;
pub mod session;
pub mod ui;

pub use fetch::{FetchError, Fetcher, HttpSource, NetworkConfig, QuizSource, RetryPolicy};
pub use quiz::{Quiz, QuizId, QuizView};
pub use search::SearchSession;
pub use session::{Command, Effect, Screen, Session};
pub use ui::App;
