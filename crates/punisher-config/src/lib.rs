// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Punisher trader mod.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), `PUNISHER_*` environment overrides, and
//! diagnostic error rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use punisher_config::load_and_validate;
//!
//! let config = load_and_validate(Path::new("user/mods/punisher")).expect("config errors");
//! println!("restock every {}s", config.trader.refresh_min_secs);
//! ```

use std::path::Path;

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{config_path, load_config, load_config_from_path, load_config_from_str, CONFIG_FILE_NAME};
pub use model::{
    CatalogConfig, CatalogSource, LoggingConfig, PathsConfig, PunisherConfig, TraderConfig,
    DEFAULT_DESCRIPTION,
};

/// Load `<mod_dir>/config.toml` plus env overrides, then validate.
///
/// Figment errors are converted to diagnostics with typo suggestions.
pub fn load_and_validate(mod_dir: &Path) -> Result<PunisherConfig, Vec<ConfigError>> {
    load_and_validate_path(&config_path(mod_dir))
}

/// Load a specific config file plus env overrides, then validate.
pub fn load_and_validate_path(path: &Path) -> Result<PunisherConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<PunisherConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}
