// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model for the Punisher trader mod.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key in
//! `config.toml` fails the load instead of being silently ignored.

use std::collections::BTreeMap;

use punisher_core::DuplicatePolicy;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Top-level configuration, read from `config.toml` in the mod directory.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PunisherConfig {
    /// Trader registration settings.
    #[serde(default)]
    pub trader: TraderConfig,

    /// Where the catalog comes from and how strictly it is checked.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Data file locations, relative to the mod directory.
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Trader registration configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TraderConfig {
    /// Lower bound of the restock interval, in seconds.
    #[serde(default = "default_refresh_min_secs")]
    pub refresh_min_secs: u64,

    /// Upper bound of the restock interval, in seconds.
    #[serde(default = "default_refresh_max_secs")]
    pub refresh_max_secs: u64,

    /// List the trader's offers on the flea market.
    #[serde(default)]
    pub flea_market: bool,

    /// Value written to `"<id> FirstName"`.
    #[serde(default = "default_first_name")]
    pub first_name: String,

    /// Value written to `"<id> Description"`. Defaults to
    /// [`DEFAULT_DESCRIPTION`]; an empty string falls back to the profile's
    /// description.
    #[serde(default = "default_description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Per-locale description overrides, e.g. `ru = "..."`. Locales not
    /// listed here get `description`.
    #[serde(default)]
    pub localized_descriptions: BTreeMap<String, String>,
}

impl Default for TraderConfig {
    fn default() -> Self {
        Self {
            refresh_min_secs: default_refresh_min_secs(),
            refresh_max_secs: default_refresh_max_secs(),
            flea_market: false,
            first_name: default_first_name(),
            description: default_description(),
            localized_descriptions: BTreeMap::new(),
        }
    }
}

/// The trader's stock biography, written to every locale unless overridden.
pub const DEFAULT_DESCRIPTION: &str = "До конфликта работал наемным киллером, выполняя самые конченные заказы. \
Тарков стал местом, где можно спрятаться и продолжить свою спокойную жизнь. \
На сегодняшний день имеет подземное убежище на берегу. \
Из-за изобилия денежных ресурсов стал выдавать задачи, требующие особые навыки и выдержку. \
Не очень любит скупщика.";

fn default_description() -> Option<String> {
    Some(DEFAULT_DESCRIPTION.to_string())
}

fn default_refresh_min_secs() -> u64 {
    3600
}

fn default_refresh_max_secs() -> u64 {
    4000
}

fn default_first_name() -> String {
    "Punisher".to_string()
}

/// Which file the catalog is read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CatalogSource {
    /// Build from `paths.offers` and the preset files under `paths.presets_dir`.
    #[default]
    Offers,
    /// Load the pre-built `paths.assort` as is.
    Assort,
}

/// Catalog construction configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default)]
    pub source: CatalogSource,

    /// Behavior when two offers claim the same top-level id.
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    /// Fail the build when a top-level item lacks a barter scheme or
    /// loyalty level, instead of warning.
    #[serde(default)]
    pub strict_completeness: bool,

    /// Deepest directory nesting searched for preset files.
    #[serde(default = "default_preset_max_depth")]
    pub preset_max_depth: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: CatalogSource::default(),
            duplicate_policy: DuplicatePolicy::default(),
            strict_completeness: false,
            preset_max_depth: default_preset_max_depth(),
        }
    }
}

fn default_preset_max_depth() -> usize {
    8
}

/// Data file locations, relative to the mod directory.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    #[serde(default = "default_profile_path")]
    pub profile: String,

    #[serde(default = "default_offers_path")]
    pub offers: String,

    #[serde(default = "default_assort_path")]
    pub assort: String,

    #[serde(default = "default_presets_dir")]
    pub presets_dir: String,

    /// Directory holding the avatar image named by the profile.
    #[serde(default = "default_avatar_dir")]
    pub avatar_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            profile: default_profile_path(),
            offers: default_offers_path(),
            assort: default_assort_path(),
            presets_dir: default_presets_dir(),
            avatar_dir: default_avatar_dir(),
        }
    }
}

fn default_profile_path() -> String {
    "db/base.json".to_string()
}

fn default_offers_path() -> String {
    "db/offers.toml".to_string()
}

fn default_assort_path() -> String {
    "db/assort.json".to_string()
}

fn default_presets_dir() -> String {
    "db/presets".to_string()
}

fn default_avatar_dir() -> String {
    "res".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl PunisherConfig {
    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Description written for `locale`.
    pub fn description_for<'a>(&'a self, locale: &str, fallback: &'a str) -> &'a str {
        self.trader
            .localized_descriptions
            .get(locale)
            .map(String::as_str)
            .or(self.trader.description.as_deref())
            .filter(|description| !description.is_empty())
            .unwrap_or(fallback)
    }
}
