// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading the mod's data files into a validated trader.
//!
//! Nothing here touches the host, so the same code backs both the
//! `post_db_load` hook and the offline `punisher check` command.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use std::path::Path;

use miette::Diagnostic;
use punisher_assort::{
    load_assort, load_profile, summarize, validate_catalog, CatalogBuilder, CatalogError,
    OffersFile, PresetChain, PresetTable, ValidationOptions, ValidationReport, WalkOptions,
};
use punisher_config::{CatalogSource, PunisherConfig};
use punisher_core::{Catalog, ItemLocale, PresetSource, PunisherError, TraderProfile};
use thiserror::Error;
use tracing::{debug, info};

/// Why a trader could not be prepared.
#[derive(Debug, Error, Diagnostic)]
pub enum PrepareError {
    /// A data file is missing or unreadable.
    #[error(transparent)]
    #[diagnostic(code(punisher::prepare::data))]
    Data(#[from] PunisherError),

    /// An offer declaration was rejected while building.
    #[error("offer rejected: {0}")]
    #[diagnostic(code(punisher::prepare::offer))]
    Offer(#[source] CatalogError),

    /// The finished catalog broke one or more invariants.
    #[error("catalog has {} violation(s)", .0.len())]
    #[diagnostic(code(punisher::prepare::invalid))]
    Invalid(Vec<CatalogError>),
}

impl PrepareError {
    /// The individual catalog diagnostics behind this error, if any.
    pub fn catalog_errors(&self) -> &[CatalogError] {
        match self {
            PrepareError::Offer(err) => std::slice::from_ref(err),
            PrepareError::Invalid(errors) => errors,
            PrepareError::Data(_) => &[],
        }
    }
}

impl From<PrepareError> for PunisherError {
    fn from(err: PrepareError) -> Self {
        match err {
            PrepareError::Data(err) => err,
            PrepareError::Offer(err) => PunisherError::Validation(err.to_string()),
            PrepareError::Invalid(errors) => PunisherError::Validation(summarize(&errors)),
        }
    }
}

/// Everything the post-database hook writes into the host.
#[derive(Debug, Clone)]
pub struct PreparedTrader {
    pub profile: TraderProfile,
    pub catalog: Catalog,
    pub report: ValidationReport,
    /// Custom item names from `[[item_locale]]` in the offers file.
    pub item_locales: Vec<ItemLocale>,
}

/// Load the profile and catalog named by `config` from `mod_dir` and
/// validate the catalog.
///
/// Preset ids in the offers file resolve against the mod's own preset
/// files first, then `host_presets`.
pub fn prepare_trader(
    mod_dir: &Path,
    config: &PunisherConfig,
    host_presets: &dyn PresetSource,
) -> Result<PreparedTrader, PrepareError> {
    let profile = load_profile(&mod_dir.join(&config.paths.profile))?;
    let options = ValidationOptions {
        strict_completeness: config.catalog.strict_completeness,
    };

    let (catalog, report, item_locales) = match config.catalog.source {
        CatalogSource::Offers => {
            let local = PresetTable::load_dir(
                &mod_dir.join(&config.paths.presets_dir),
                &WalkOptions {
                    max_depth: config.catalog.preset_max_depth,
                },
            )?;
            let offers = OffersFile::load(&mod_dir.join(&config.paths.offers))?;
            debug!(offers = offers.offer_count(), presets = local.len(), "building catalog from offers");

            let sources: Vec<&dyn PresetSource> = vec![&local, host_presets];
            let presets = PresetChain::new(sources);
            let mut builder = CatalogBuilder::new(config.catalog.duplicate_policy);
            offers.apply(&mut builder, &presets).map_err(PrepareError::Offer)?;
            let (catalog, report) = builder.build_with(&options).map_err(PrepareError::Invalid)?;
            (catalog, report, offers.item_locale)
        }
        CatalogSource::Assort => {
            let catalog = load_assort(&mod_dir.join(&config.paths.assort))?;
            let report = validate_catalog(&catalog, &options).map_err(PrepareError::Invalid)?;
            (catalog, report, Vec::new())
        }
    };

    info!(
        trader = %profile.id,
        source = %config.catalog.source,
        items = report.total_items,
        offers = report.top_level_items,
        warnings = report.warnings.len(),
        "catalog ready"
    );
    Ok(PreparedTrader {
        profile,
        catalog,
        report,
        item_locales,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use punisher_test_utils::{host_preset_items, MockHost, ModFixture, HOST_PRESET_ID, TRADER_ID};

    fn host() -> MockHost {
        MockHost::new("/unused").with_preset(HOST_PRESET_ID, host_preset_items())
    }

    #[test]
    fn prepares_sample_mod() {
        let fixture = ModFixture::new().unwrap();
        let prepared =
            prepare_trader(fixture.path(), &PunisherConfig::default(), &host().presets).unwrap();
        assert_eq!(prepared.profile.id, TRADER_ID);
        assert_eq!(prepared.report.top_level_items, 5);
        assert_eq!(prepared.catalog.items.len(), 9);
        assert_eq!(prepared.item_locales.len(), 1);
        assert!(prepared
            .report
            .non_currency_payments
            .contains("56dff061d2720bb5668b4567"));
    }

    #[test]
    fn unknown_host_preset_is_an_offer_error() {
        let fixture = ModFixture::new().unwrap();
        let err = prepare_trader(
            fixture.path(),
            &PunisherConfig::default(),
            &MockHost::new("/unused").presets,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PrepareError::Offer(CatalogError::UnknownPreset { .. })
        ));
        assert_eq!(err.catalog_errors().len(), 1);
    }

    #[test]
    fn invalid_assort_reports_every_violation() {
        let fixture = ModFixture::new()
            .unwrap()
            .with_assort(
                r#"{ "items": [
                    { "_id": "a", "_tpl": "t", "parentId": "hideout", "slotId": "hideout" },
                    { "_id": "b", "_tpl": "t", "parentId": "nope", "slotId": "mod" }
                ] }"#,
            )
            .unwrap();
        let mut config = PunisherConfig::default();
        config.catalog.source = CatalogSource::Assort;
        let err = prepare_trader(fixture.path(), &config, &host().presets).unwrap_err();
        assert!(matches!(err, PrepareError::Invalid(_)));
        assert_eq!(err.catalog_errors().len(), 2);

        let converted: PunisherError = err.into();
        assert!(matches!(converted, PunisherError::Validation(_)));
    }

    #[test]
    fn missing_profile_is_a_data_error() {
        let fixture = ModFixture::new().unwrap();
        fixture.remove("db/base.json").unwrap();
        let err = prepare_trader(fixture.path(), &PunisherConfig::default(), &host().presets)
            .unwrap_err();
        assert!(matches!(err, PrepareError::Data(PunisherError::Data { .. })));
    }
}
