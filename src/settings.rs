use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail, ensure};
use config::{Config, ConfigError, File};
use reqwest::Url;
use serde::Deserialize;

use quizpeek::app_dirs;
use quizpeek::fetch::{DEFAULT_PROXY_URL, DEFAULT_TARGET_URL, NetworkConfig, RetryPolicy};
use quizpeek::ui::style::{self, Theme};

use crate::cli::CliArgs;

const DEFAULT_THEME: &str = "neon";
const DEFAULT_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    network: NetworkSection,
    ui: UiSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct NetworkSection {
    proxy_url: Option<String>,
    target_url: Option<String>,
    max_attempts: Option<usize>,
    retry_delay_ms: Option<u64>,
    timeout_ms: Option<u64>,
    cache: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
    theme: Option<String>,
    initial_id: Option<String>,
    initial_query: Option<String>,
}

pub struct ResolvedConfig {
    pub network: NetworkConfig,
    pub policy: RetryPolicy,
    pub cache: bool,
    pub theme_name: String,
    pub theme: Theme,
    pub initial_id: Option<String>,
    pub initial_query: Option<String>,
}

impl ResolvedConfig {
    pub fn print_summary(&self) {
        println!("Effective configuration:");
        println!("  Proxy URL: {}", self.network.proxy_url);
        println!("  Quiz endpoint: {}", self.network.target_url);
        println!("  Timeout: {} ms", self.network.timeout.as_millis());
        println!("  Max attempts: {}", self.policy.max_attempts);
        println!("  Retry delay: {} ms", self.policy.delay.as_millis());
        println!("  Cache: {}", bool_to_word(self.cache));
        println!("  UI theme: {}", self.theme_name);
        if let Some(id) = &self.initial_id {
            println!("  Initial quiz: {id}");
        }
        if let Some(query) = &self.initial_query {
            println!("  Initial query: {query}");
        }
    }
}

pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
    let builder = build_config(cli)?;
    let mut raw: RawConfig = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.apply_cli_overrides(cli);
    raw.resolve()
}

fn build_config(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("quizpeek")
            .separator("__")
            .try_parsing(true),
    );

    builder.build().map_err(|err| match err {
        ConfigError::Frozen => anyhow!("configuration builder is frozen"),
        other => other.into(),
    })
}

fn default_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(dir) = app_dirs::get_config_dir() {
        files.push(dir.join("config.toml"));
    }

    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join(".quizpeek.toml"));
        files.push(current_dir.join("quizpeek.toml"));
    }

    files
}

impl RawConfig {
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(value) = cli.attempts {
            self.network.max_attempts = Some(value);
        }
        if let Some(value) = cli.retry_delay_ms {
            self.network.retry_delay_ms = Some(value);
        }
        if cli.no_cache {
            self.network.cache = Some(false);
        }

        if let Some(theme) = cli.theme.clone() {
            self.ui.theme = Some(theme);
        }
        if let Some(id) = cli.id.clone() {
            self.ui.initial_id = Some(id);
        }
        if let Some(query) = cli.query.clone() {
            self.ui.initial_query = Some(query);
        }
    }

    fn resolve(self) -> Result<ResolvedConfig> {
        let proxy_raw = self
            .network
            .proxy_url
            .unwrap_or_else(|| DEFAULT_PROXY_URL.to_string());
        let proxy_url = Url::parse(proxy_raw.trim())
            .with_context(|| format!("invalid proxy URL '{proxy_raw}'"))?;

        let target_url = self
            .network
            .target_url
            .unwrap_or_else(|| DEFAULT_TARGET_URL.to_string())
            .trim()
            .to_string();
        Url::parse(&target_url).with_context(|| format!("invalid quiz endpoint '{target_url}'"))?;

        let defaults = RetryPolicy::default();
        let max_attempts = self.network.max_attempts.unwrap_or(defaults.max_attempts);
        ensure!(max_attempts >= 1, "max_attempts must be at least 1");
        let delay = self
            .network
            .retry_delay_ms
            .map_or(defaults.delay, Duration::from_millis);

        let timeout_ms = self.network.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);
        ensure!(timeout_ms > 0, "timeout_ms must be greater than zero");

        let theme_name = self
            .ui
            .theme
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_THEME.to_string());
        let Some(theme) = style::by_name(&theme_name) else {
            let known: Vec<_> = style::names().collect();
            bail!("unknown theme '{theme_name}' (available: {})", known.join(", "));
        };

        Ok(ResolvedConfig {
            network: NetworkConfig {
                proxy_url,
                target_url,
                timeout: Duration::from_millis(timeout_ms),
            },
            policy: RetryPolicy::new(max_attempts, delay),
            cache: self.network.cache.unwrap_or(true),
            theme_name,
            theme,
            initial_id: non_empty(self.ui.initial_id),
            initial_query: non_empty(self.ui.initial_query),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn bool_to_word(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
