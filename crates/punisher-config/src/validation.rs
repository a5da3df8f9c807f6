// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::PunisherConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first.
pub fn validate_config(config: &PunisherConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let trader = &config.trader;

    if trader.refresh_min_secs < 1 {
        errors.push(ConfigError::Validation {
            message: "trader.refresh_min_secs must be at least 1".to_string(),
        });
    }

    if trader.refresh_min_secs > trader.refresh_max_secs {
        errors.push(ConfigError::Validation {
            message: format!(
                "trader.refresh_min_secs ({}) must not exceed trader.refresh_max_secs ({})",
                trader.refresh_min_secs, trader.refresh_max_secs
            ),
        });
    }

    if trader.first_name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "trader.first_name must not be empty".to_string(),
        });
    }

    if config.catalog.preset_max_depth < 1 {
        errors.push(ConfigError::Validation {
            message: "catalog.preset_max_depth must be at least 1".to_string(),
        });
    }

    let paths = &config.paths;
    for (name, value) in [
        ("profile", &paths.profile),
        ("offers", &paths.offers),
        ("assort", &paths.assort),
        ("presets_dir", &paths.presets_dir),
        ("avatar_dir", &paths.avatar_dir),
    ] {
        if value.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("paths.{name} must not be empty"),
            });
        }
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
