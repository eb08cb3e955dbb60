//! Config file discovery and loading for `.swaggerdoc.toml`.
//!
//! An explicit `--config` path must exist and parse. Otherwise two locations
//! are checked in precedence order:
//! 1. `./.swaggerdoc.toml` (project-local)
//! 2. `~/.config/swaggerdoc.toml` (user-global)

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::CliConfig;

const CONFIG_FILENAME: &str = ".swaggerdoc.toml";
const GLOBAL_CONFIG_DIR: &str = ".config";
const GLOBAL_CONFIG_FILENAME: &str = "swaggerdoc.toml";

/// Load CLI config from `explicit`, else from the first discovered location,
/// else defaults.
pub(crate) fn load_cli_config(explicit: Option<&Path>) -> anyhow::Result<CliConfig> {
    if let Some(path) = explicit {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config = parse_config(&contents)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        tracing::debug!(?path, "Loaded CLI config");
        return Ok(config.with_base_dir(parent_dir(path)));
    }

    if let Some(path) = find_config_file() {
        match std::fs::read_to_string(&path) {
            Ok(contents) => match parse_config(&contents) {
                Ok(config) => {
                    tracing::debug!(?path, "Loaded CLI config");
                    return Ok(config.with_base_dir(parent_dir(&path)));
                }
                Err(e) => {
                    tracing::warn!(?path, error = %e, "Failed to parse CLI config, using defaults");
                }
            },
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to read CLI config, using defaults");
            }
        }
    }
    Ok(CliConfig::default())
}

fn parse_config(contents: &str) -> Result<CliConfig, toml::de::Error> {
    toml::from_str(contents)
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

/// Search for config file in precedence order.
fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    if let Some(home) = home_dir() {
        let global = home.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILENAME);
        if global.is_file() {
            return Some(global);
        }
    }

    None
}

/// Expand a leading `~/` to the home directory.
pub(crate) fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
