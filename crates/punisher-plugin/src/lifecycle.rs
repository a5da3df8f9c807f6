// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The two host lifecycle hooks.
//!
//! The host calls `pre_load` once while its services are being wired, then
//! `post_db_load` once after the database is in memory. [`PunisherMod`]
//! tracks which hook has run so an out-of-order call fails instead of
//! writing a half-registered trader.

use std::path::PathBuf;

use punisher_assort::load_profile;
use punisher_config::{load_and_validate, ConfigError, PunisherConfig};
use punisher_core::{
    ConfigPort, ImageRouter, LocalePort, ModLoader, PresetSource, PunisherError, TraderLocale,
    TraderRegistry,
};
use tracing::{debug, info, warn};

use crate::prepare::prepare_trader;
use crate::registration::{
    register_avatar, register_trader, set_restock_interval, write_item_locale_strings,
    write_locale_strings_with, write_trader_record,
};

/// Host services available while the server is starting up.
pub struct PreLoadContext<'a> {
    pub loader: &'a dyn ModLoader,
    pub images: &'a mut dyn ImageRouter,
    pub config: &'a mut dyn ConfigPort,
}

/// Host services available once the database is loaded.
pub struct PostDbContext<'a> {
    pub traders: &'a mut dyn TraderRegistry,
    pub locales: &'a mut dyn LocalePort,
    pub presets: &'a dyn PresetSource,
}

/// Which hooks have completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// No hook has run yet, or `pre_load` failed.
    Created,
    /// `pre_load` succeeded.
    PreLoaded,
    /// Both hooks succeeded; the trader is live.
    Loaded,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Created => write!(f, "created"),
            Stage::PreLoaded => write!(f, "pre-loaded"),
            Stage::Loaded => write!(f, "loaded"),
        }
    }
}

/// State carried from `pre_load` to `post_db_load`.
#[derive(Debug)]
struct Resolved {
    mod_dir: PathBuf,
    config: PunisherConfig,
}

/// The trader mod, one value per host process.
#[derive(Debug)]
pub struct PunisherMod {
    mod_name: String,
    stage: Stage,
    resolved: Option<Resolved>,
}

impl PunisherMod {
    /// `mod_name` is the name the host's mod loader knows this mod by.
    pub fn new(mod_name: impl Into<String>) -> Self {
        Self {
            mod_name: mod_name.into(),
            stage: Stage::Created,
            resolved: None,
        }
    }

    pub fn mod_name(&self) -> &str {
        &self.mod_name
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Configuration read by `pre_load`, once it has succeeded.
    pub fn config(&self) -> Option<&PunisherConfig> {
        self.resolved.as_ref().map(|r| &r.config)
    }

    /// Register the avatar route, the restock interval, the trader id and
    /// its flea-market flag.
    pub fn pre_load(&mut self, ctx: &mut PreLoadContext<'_>) -> Result<(), PunisherError> {
        debug!(mod_name = %self.mod_name, stage = %self.stage, "pre_load: enter");
        if self.stage != Stage::Created {
            return Err(PunisherError::Lifecycle(format!(
                "pre_load called while {}",
                self.stage
            )));
        }

        let mod_dir = ctx.loader.mod_path(&self.mod_name)?;
        let config = load_and_validate(&mod_dir).map_err(config_failure)?;
        let profile = load_profile(&mod_dir.join(&config.paths.profile))?;

        register_avatar(ctx.images, &profile, &mod_dir.join(&config.paths.avatar_dir))?;
        set_restock_interval(
            ctx.config,
            &profile.id,
            config.trader.refresh_min_secs,
            config.trader.refresh_max_secs,
        )?;
        register_trader(ctx.config, &profile.id, config.trader.flea_market)?;

        self.resolved = Some(Resolved { mod_dir, config });
        self.stage = Stage::PreLoaded;
        debug!(trader = %profile.id, "pre_load: exit");
        Ok(())
    }

    /// Build and validate the catalog, then write the trader record and its
    /// locale strings.
    ///
    /// Nothing is written to the host unless the catalog validates.
    pub fn post_db_load(&mut self, ctx: &mut PostDbContext<'_>) -> Result<(), PunisherError> {
        debug!(mod_name = %self.mod_name, stage = %self.stage, "post_db_load: enter");
        let resolved = match (&self.stage, &self.resolved) {
            (Stage::PreLoaded, Some(resolved)) => resolved,
            _ => {
                return Err(PunisherError::Lifecycle(format!(
                    "post_db_load called while {}; pre_load must succeed first",
                    self.stage
                )));
            }
        };
        let config = &resolved.config;

        let prepared = prepare_trader(&resolved.mod_dir, config, ctx.presets)?;
        for warning in &prepared.report.warnings {
            warn!(trader = %prepared.profile.id, "{warning}");
        }

        let profile = prepared.profile;
        let offers = prepared.report.top_level_items;
        write_trader_record(ctx.traders, &profile, prepared.catalog)?;

        let profile_description = profile.description.as_deref().unwrap_or("");
        let locales = write_locale_strings_with(ctx.locales, &profile.id, |locale| {
            TraderLocale {
                full_name: profile.name.clone(),
                first_name: config.trader.first_name.clone(),
                nickname: profile.nickname.clone(),
                location: profile.location.clone(),
                description: config.description_for(locale, profile_description).to_string(),
            }
        })?;
        write_item_locale_strings(ctx.locales, &prepared.item_locales)?;

        self.stage = Stage::Loaded;
        info!(
            trader = %profile.id,
            offers,
            locales,
            "{} is open for business",
            profile.nickname
        );
        debug!("post_db_load: exit");
        Ok(())
    }
}

fn config_failure(errors: Vec<ConfigError>) -> PunisherError {
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    PunisherError::Config(messages.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use punisher_test_utils::{host_preset_items, MockHost, ModFixture, HOST_PRESET_ID, TRADER_ID};

    fn host_for(fixture: &ModFixture) -> MockHost {
        MockHost::new(fixture.path()).with_preset(HOST_PRESET_ID, host_preset_items())
    }

    fn run_pre_load(punisher: &mut PunisherMod, host: &mut MockHost) -> Result<(), PunisherError> {
        punisher.pre_load(&mut PreLoadContext {
            loader: &host.loader,
            images: &mut host.images,
            config: &mut host.config,
        })
    }

    fn run_post_db_load(
        punisher: &mut PunisherMod,
        host: &mut MockHost,
    ) -> Result<(), PunisherError> {
        punisher.post_db_load(&mut PostDbContext {
            traders: &mut host.traders,
            locales: &mut host.locales,
            presets: &host.presets,
        })
    }

    #[test]
    #[tracing_test::traced_test]
    fn hooks_log_entry_and_banner() {
        let fixture = ModFixture::new().unwrap();
        let mut host = host_for(&fixture);
        let mut punisher = PunisherMod::new("punisher");

        run_pre_load(&mut punisher, &mut host).unwrap();
        assert_eq!(punisher.stage(), Stage::PreLoaded);
        run_post_db_load(&mut punisher, &mut host).unwrap();
        assert_eq!(punisher.stage(), Stage::Loaded);

        assert!(logs_contain("pre_load: enter"));
        assert!(logs_contain("post_db_load: exit"));
        assert!(logs_contain("Punisher is open for business"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn completeness_gaps_are_warned() {
        let fixture = ModFixture::new()
            .unwrap()
            .with_config("[catalog]\nsource = \"assort\"\n")
            .unwrap()
            .with_assort(
                r#"{ "items": [ { "_id": "a", "_tpl": "t", "parentId": "hideout",
                    "slotId": "hideout",
                    "upd": { "UnlimitedCount": false, "StackObjectsCount": 3 } } ] }"#,
            )
            .unwrap();
        let mut host = host_for(&fixture);
        let mut punisher = PunisherMod::new("punisher");
        run_pre_load(&mut punisher, &mut host).unwrap();
        run_post_db_load(&mut punisher, &mut host).unwrap();

        assert!(logs_contain("has no barter scheme"));
        assert_eq!(host.traders.inserts, 1);
    }

    #[test]
    fn second_pre_load_is_rejected() {
        let fixture = ModFixture::new().unwrap();
        let mut host = host_for(&fixture);
        let mut punisher = PunisherMod::new("punisher");
        run_pre_load(&mut punisher, &mut host).unwrap();
        let err = run_pre_load(&mut punisher, &mut host).unwrap_err();
        assert!(matches!(err, PunisherError::Lifecycle(_)));
        assert_eq!(host.config.update_times.len(), 1);
    }

    #[test]
    fn config_errors_become_config_failures() {
        let fixture = ModFixture::new()
            .unwrap()
            .with_config("[trader]\nrefresh_min_secs = 0\n")
            .unwrap();
        let mut host = host_for(&fixture);
        let mut punisher = PunisherMod::new("punisher");
        let err = run_pre_load(&mut punisher, &mut host).unwrap_err();
        assert!(matches!(err, PunisherError::Config(_)));
        assert_eq!(punisher.stage(), Stage::Created);
        assert!(punisher.config().is_none());
        assert!(host.images.routes.is_empty());
    }

    #[test]
    fn pre_load_uses_configured_refresh_window() {
        let fixture = ModFixture::new()
            .unwrap()
            .with_config("[trader]\nrefresh_min_secs = 60\nrefresh_max_secs = 120\nflea_market = true\n")
            .unwrap();
        let mut host = host_for(&fixture);
        let mut punisher = PunisherMod::new("punisher");
        run_pre_load(&mut punisher, &mut host).unwrap();

        let record = &host.config.update_times[0];
        assert_eq!(record.trader_id, TRADER_ID);
        assert_eq!((record.seconds.min, record.seconds.max), (60, 120));
        assert!(host.config.flea_market[TRADER_ID]);
        assert_eq!(punisher.config().unwrap().trader.refresh_max_secs, 120);
    }
}
