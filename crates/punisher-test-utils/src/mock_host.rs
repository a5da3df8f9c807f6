// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory host for deterministic testing.
//!
//! Each port is a separate field so a test can lend one part immutably and
//! another mutably at the same time, the way the host hands its services to
//! a hook. Every call is recorded for later assertion, and any port can be
//! told to fail.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use punisher_core::{
    ConfigPort, ImageRouter, Item, LocalePort, ModLoader, PresetSource, PunisherError,
    TraderRegistry, TraderRecord, UpdateTime,
};
use tracing::debug;

fn injected(service: &'static str, fail_with: &Option<String>) -> Result<(), PunisherError> {
    match fail_with {
        Some(message) => Err(PunisherError::host(service, message.clone())),
        None => Ok(()),
    }
}

/// Resolves every mod name to one directory.
#[derive(Debug, Clone, Default)]
pub struct MockModLoader {
    pub mod_dir: PathBuf,
    pub fail_with: Option<String>,
}

impl ModLoader for MockModLoader {
    fn mod_path(&self, mod_name: &str) -> Result<PathBuf, PunisherError> {
        injected("ModLoader", &self.fail_with)?;
        debug!(mod_name, dir = %self.mod_dir.display(), "mock mod_path");
        Ok(self.mod_dir.clone())
    }
}

/// Records image routes in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MockImageRouter {
    pub routes: Vec<(String, PathBuf)>,
    pub fail_with: Option<String>,
}

impl ImageRouter for MockImageRouter {
    fn add_route(&mut self, route: &str, file: &Path) -> Result<(), PunisherError> {
        injected("ImageRouter", &self.fail_with)?;
        self.routes.push((route.to_string(), file.to_path_buf()));
        Ok(())
    }
}

/// Trader refresh timing, flea-market flags, and the trader enumeration.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    pub update_times: Vec<UpdateTime>,
    pub flea_market: BTreeMap<String, bool>,
    pub trader_enum: BTreeMap<String, String>,
    pub fail_with: Option<String>,
}

impl ConfigPort for MockConfig {
    fn push_update_time(&mut self, record: UpdateTime) -> Result<(), PunisherError> {
        injected("ConfigServer", &self.fail_with)?;
        self.update_times.push(record);
        Ok(())
    }

    fn set_flea_market(&mut self, trader_id: &str, listed: bool) -> Result<(), PunisherError> {
        injected("ConfigServer", &self.fail_with)?;
        self.flea_market.insert(trader_id.to_string(), listed);
        Ok(())
    }

    fn register_trader_enum(&mut self, trader_id: &str) -> Result<(), PunisherError> {
        injected("ConfigServer", &self.fail_with)?;
        self.trader_enum
            .insert(trader_id.to_string(), trader_id.to_string());
        Ok(())
    }
}

/// The host's trader table.
#[derive(Debug, Clone, Default)]
pub struct MockTraders {
    pub records: BTreeMap<String, TraderRecord>,
    /// Number of `insert_trader` calls, including overwrites.
    pub inserts: usize,
    pub fail_with: Option<String>,
}

impl TraderRegistry for MockTraders {
    fn insert_trader(&mut self, trader_id: &str, record: TraderRecord) -> Result<(), PunisherError> {
        injected("DatabaseServer", &self.fail_with)?;
        self.records.insert(trader_id.to_string(), record);
        self.inserts += 1;
        Ok(())
    }
}

/// The host's global locale table.
#[derive(Debug, Clone, Default)]
pub struct MockLocales {
    pub tables: BTreeMap<String, BTreeMap<String, String>>,
    pub fail_with: Option<String>,
}

impl MockLocales {
    /// A table holding the given locales, each empty.
    pub fn with_locales(locales: &[&str]) -> Self {
        Self {
            tables: locales
                .iter()
                .map(|l| (l.to_string(), BTreeMap::new()))
                .collect(),
            fail_with: None,
        }
    }

    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.tables.get(locale)?.get(key).map(String::as_str)
    }
}

impl LocalePort for MockLocales {
    fn locale_ids(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    fn set_string(&mut self, locale: &str, key: &str, value: &str) -> Result<(), PunisherError> {
        injected("LocaleService", &self.fail_with)?;
        let table = self.tables.get_mut(locale).ok_or_else(|| {
            PunisherError::host("LocaleService", format!("no locale `{locale}`"))
        })?;
        table.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The host's global weapon presets.
#[derive(Debug, Clone, Default)]
pub struct MockPresets {
    pub presets: BTreeMap<String, Vec<Item>>,
}

impl PresetSource for MockPresets {
    fn preset_items(&self, preset_id: &str) -> Option<&[Item]> {
        self.presets.get(preset_id).map(Vec::as_slice)
    }
}

/// A complete fake host.
#[derive(Debug, Clone, Default)]
pub struct MockHost {
    pub loader: MockModLoader,
    pub images: MockImageRouter,
    pub config: MockConfig,
    pub traders: MockTraders,
    pub locales: MockLocales,
    pub presets: MockPresets,
}

impl MockHost {
    /// A host serving `mod_dir` with English and Russian locale tables.
    pub fn new(mod_dir: impl Into<PathBuf>) -> Self {
        Self {
            loader: MockModLoader {
                mod_dir: mod_dir.into(),
                fail_with: None,
            },
            locales: MockLocales::with_locales(&["en", "ru"]),
            ..Self::default()
        }
    }

    /// Add a preset to the host's global preset table.
    pub fn with_preset(mut self, id: &str, items: Vec<Item>) -> Self {
        self.presets.presets.insert(id.to_string(), items);
        self
    }

    /// Make the named service fail every call with `message`.
    ///
    /// Service names match the ones carried by
    /// [`PunisherError::HostIntegration`]: `ModLoader`, `ImageRouter`,
    /// `ConfigServer`, `DatabaseServer`, `LocaleService`.
    pub fn failing(mut self, service: &str, message: &str) -> Self {
        let fail_with = Some(message.to_string());
        match service {
            "ModLoader" => self.loader.fail_with = fail_with,
            "ImageRouter" => self.images.fail_with = fail_with,
            "ConfigServer" => self.config.fail_with = fail_with,
            "DatabaseServer" => self.traders.fail_with = fail_with,
            "LocaleService" => self.locales.fail_with = fail_with,
            other => panic!("MockHost has no service named `{other}`"),
        }
        self
    }

    /// Serialized trader record, as the host would store it.
    pub fn trader_json(&self, trader_id: &str) -> Option<serde_json::Value> {
        let record = self.traders.records.get(trader_id)?;
        serde_json::to_value(record).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use punisher_core::RefreshSeconds;

    #[test]
    fn records_config_calls() {
        let mut host = MockHost::new("/mods/punisher");
        let record = UpdateTime {
            trader_id: "t".into(),
            seconds: RefreshSeconds { min: 1, max: 2 },
        };
        host.config.push_update_time(record.clone()).unwrap();
        host.config.push_update_time(record).unwrap();
        host.config.set_flea_market("t", true).unwrap();
        host.config.register_trader_enum("t").unwrap();

        assert_eq!(host.config.update_times.len(), 2);
        assert!(host.config.flea_market["t"]);
        assert_eq!(host.config.trader_enum["t"], "t");
    }

    #[test]
    fn injected_failure_names_the_service() {
        let mut host = MockHost::new("/mods/punisher").failing("ImageRouter", "router offline");
        let err = host
            .images
            .add_route("/files/trader/avatar/t", Path::new("res/t.jpg"))
            .unwrap_err();
        assert!(matches!(
            err,
            PunisherError::HostIntegration {
                service: "ImageRouter",
                ..
            }
        ));
        assert!(host.images.routes.is_empty());
    }

    #[test]
    fn unknown_locale_is_a_host_error() {
        let mut host = MockHost::new("/mods/punisher");
        assert_eq!(host.locales.locale_ids(), vec!["en", "ru"]);
        assert!(host.locales.set_string("de", "k", "v").is_err());
        host.locales.set_string("ru", "k", "v").unwrap();
        assert_eq!(host.locales.get("ru", "k"), Some("v"));
    }
}
