use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::OutputFormat;
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `quizpeek` binary.
#[derive(Parser, Debug)]
#[command(
    name = "quizpeek",
    version,
    long_version = long_version(),
    about = "Browse a quiz's questions and correct answers in the terminal",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
pub(crate) struct CliArgs {
    #[arg(
        value_name = "ID",
        help = "Quiz identifier to open on start (default: prompt for one)"
    )]
    pub(crate) id: Option<String>,
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "QUIZPEEK_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'q',
        long,
        value_name = "QUERY",
        help = "Search the question headers once the quiz loads (default: empty)"
    )]
    pub(crate) query: Option<String>,
    #[arg(
        long,
        value_name = "THEME",
        help = "Select a theme by name (default: neon)"
    )]
    pub(crate) theme: Option<String>,
    #[arg(
        long,
        value_name = "NUM",
        help = "Fetch attempts before giving up (default: 3)"
    )]
    pub(crate) attempts: Option<usize>,
    #[arg(
        long = "retry-delay-ms",
        value_name = "MS",
        help = "Delay between fetch attempts in milliseconds (default: 800)"
    )]
    pub(crate) retry_delay_ms: Option<u64>,
    #[arg(
        long = "no-cache",
        help = "Always refetch instead of reusing quizzes loaded this session (default: disabled)"
    )]
    pub(crate) no_cache: bool,
    #[arg(
        short = 'P',
        long = "print",
        value_name = "ID",
        help = "Fetch the quiz, print it to stdout, and exit without the TUI"
    )]
    pub(crate) print: Option<String>,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Choose how --print writes the quiz"
    )]
    pub(crate) output: OutputFormat,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'l',
        long = "list-themes",
        help = "List supported themes and exit (default: disabled)"
    )]
    pub(crate) list_themes: bool,
}
