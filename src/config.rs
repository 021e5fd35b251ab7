// src/config.rs

//! Configuration loading utilities.
//!
//! This module provides convenience functions for turning a configuration
//! file into the values the pipeline entry points take.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::pipeline::LoadOptions;

/// Load configuration from a TOML file and validate it.
///
/// A missing or unreadable file falls back to defaults; an invalid one is an
/// error.
pub fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load_or_default(path);
    config
        .validate()
        .map_err(|e| AppError::config(format!("Invalid config {path:?}: {e}")))?;
    Ok(config)
}

/// Pipeline options derived from the configuration.
pub fn load_options(config: &Config) -> LoadOptions {
    LoadOptions {
        availability_decimals: config.stats.availability_decimals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let config = load_config(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.source.timeout_secs, 15);
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[refresh]\ninterval_secs = 0").unwrap();

        assert!(matches!(load_config(file.path()), Err(AppError::Config(_))));
    }

    #[test]
    fn test_load_options() {
        let mut config = Config::default();
        config.stats.availability_decimals = 1;
        assert_eq!(load_options(&config).availability_decimals, 1);
    }
}
