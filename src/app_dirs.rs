//! Resolve the configuration directory for `quizpeek`.
//!
//! An environment override wins; otherwise the platform location from the
//! `directories` crate is used.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "quizpeek";
const APPLICATION: &str = "quizpeek";

const CONFIG_DIR_ENV: &str = "QUIZPEEK_CONFIG_DIR";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .ok_or_else(|| anyhow!("unable to determine project directories for quizpeek"))
}

/// Resolve an override directory from an environment variable.
///
/// An empty value counts as unset.
fn dir_from_env(name: &str) -> Option<PathBuf> {
    let value = env::var_os(name)?;
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// Return the directory holding `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(dir) = dir_from_env(CONFIG_DIR_ENV) {
        return Ok(dir);
    }

    Ok(project_dirs()?.config_local_dir().to_path_buf())
}
