use anyhow::{Result, anyhow};
use log::LevelFilter;
use quizpeek::fetch::{self, CancelToken, Fetcher, HttpSource};
use quizpeek::logging;
use quizpeek::quiz::{QuizId, QuizView};
use quizpeek::ui::App;

use crate::cli::{OutputFormat, print_view};
use crate::settings::ResolvedConfig;

/// Coordinates building the fetch pipeline and running either the
/// interactive viewer or a one-shot print.
pub(crate) struct ViewerWorkflow {
    config: ResolvedConfig,
}

impl ViewerWorkflow {
    pub(crate) fn from_config(config: ResolvedConfig) -> Self {
        Self { config }
    }

    fn fetcher(&self) -> Result<Fetcher<HttpSource>> {
        let source = HttpSource::new(self.config.network.clone())?;
        Ok(Fetcher::new(source, self.config.policy).with_cache(self.config.cache))
    }

    /// Run the terminal UI until the user quits.
    pub(crate) fn run(self) -> Result<()> {
        logging::initialize(LevelFilter::Debug);
        let handle = fetch::spawn(self.fetcher()?);
        let ResolvedConfig {
            theme,
            initial_id,
            initial_query,
            ..
        } = self.config;

        let mut app = App::new(handle)
            .with_theme(theme)
            .with_initial_query(initial_query)
            .with_initial_identifier(initial_id);
        app.run()
    }

    /// Fetch `id` once and print it, or the matches of the configured query.
    pub(crate) fn print(self, id: &str, format: OutputFormat) -> Result<()> {
        let id = QuizId::parse(id)?;
        let mut fetcher = self.fetcher()?;
        let quiz = fetcher.fetch(&id, &CancelToken::new()).map_err(|error| {
            anyhow!(error.user_message().unwrap_or_else(|| error.to_string()))
        })?;
        let view = QuizView::render(&quiz);
        print_view(&view, self.config.initial_query.as_deref(), format)
    }
}
