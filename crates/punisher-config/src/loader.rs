// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Merge order (later overrides earlier): compiled defaults, `config.toml`
//! in the mod directory, then `PUNISHER_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use tracing::debug;

use crate::model::PunisherConfig;

/// File name of the configuration inside the mod directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Path of the configuration file for a mod directory.
pub fn config_path(mod_dir: &Path) -> PathBuf {
    mod_dir.join(CONFIG_FILE_NAME)
}

/// Load `<mod_dir>/config.toml` with env var overrides. A missing file
/// yields the defaults.
pub fn load_config(mod_dir: &Path) -> Result<PunisherConfig, figment::Error> {
    load_config_from_path(&config_path(mod_dir))
}

/// Load configuration from a specific TOML string only (no env overrides).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PunisherConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PunisherConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PunisherConfig, figment::Error> {
    debug!(path = %path.display(), present = path.is_file(), "loading configuration");
    build_figment(path).extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PunisherConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
}

/// Environment provider with an explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys contain
/// underscores: `PUNISHER_TRADER_REFRESH_MIN_SECS` must map to
/// `trader.refresh_min_secs`, not `trader.refresh.min.secs`.
fn env_provider() -> Env {
    Env::prefixed("PUNISHER_").map(|key| {
        key.as_str()
            .replacen("trader_", "trader.", 1)
            .replacen("catalog_", "catalog.", 1)
            .replacen("paths_", "paths.", 1)
            .replacen("logging_", "logging.", 1)
            .into()
    })
}
