use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::EcolabelConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".ecolabel.toml";
const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse TOML and validate ranges.
///
/// Out-of-range values are reported and replaced by defaults rather than
/// rejecting the whole file.
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<EcolabelConfig, String> {
    let mut config = toml::from_str::<EcolabelConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if let Err(e) = config.validate() {
        tracing::warn!("Invalid configuration: {}. Using default limits.", e);
        let defaults = EcolabelConfig::default();
        if !(1..=super::MAX_URLS_HARD_CAP).contains(&config.analysis.max_urls) {
            config.analysis = defaults.analysis;
        }
        if config.auditor.timeout_secs == 0 {
            config.auditor.timeout_secs = defaults.auditor.timeout_secs;
        }
    }

    Ok(config)
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<EcolabelConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Only real read failures are worth a warning; a missing file is normal.
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        tracing::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.ecolabel.toml`.
pub fn load_config_from(start: PathBuf) -> EcolabelConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            EcolabelConfig::default()
        })
}

pub fn load_config() -> EcolabelConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            EcolabelConfig::default()
        }
    }
}

/// Load an explicitly named config file. Unlike discovery, a missing or
/// unparsable file is an error here.
pub fn load_config_from_path(path: &Path) -> Result<EcolabelConfig> {
    let contents = read_config_file(path).map_err(|e| Error::file_system(path, e))?;
    parse_and_validate_config(&contents).map_err(Error::Configuration)
}
