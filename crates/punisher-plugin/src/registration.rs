// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration adapter: pushes the trader into host-owned structures.
//!
//! Each function is one host call (or one call per locale). Host failures
//! are returned as they come; nothing here retries.

use std::path::{Path, PathBuf};

use punisher_core::{
    Catalog, ConfigPort, ImageRouter, ItemLocale, LocaleField, LocalePort, PunisherError,
    RefreshSeconds, TraderLocale, TraderProfile, TraderRecord, TraderRegistry, UpdateTime,
};
use strum::IntoEnumIterator;
use tracing::debug;

/// Serve the profile's avatar from `<image_dir>/<avatar file name>`.
///
/// The route is the avatar path with its image extension stripped, which is
/// how the client requests it. Returns the file the route points at.
pub fn register_avatar(
    router: &mut dyn ImageRouter,
    profile: &TraderProfile,
    image_dir: &Path,
) -> Result<PathBuf, PunisherError> {
    let route = profile.avatar_route();
    let file = image_dir.join(profile.avatar_file_name());
    router.add_route(route, &file)?;
    debug!(route, file = %file.display(), "registered avatar route");
    Ok(file)
}

/// Append one refresh-timing record. Calling twice appends twice.
pub fn set_restock_interval(
    config: &mut dyn ConfigPort,
    trader_id: &str,
    min: u64,
    max: u64,
) -> Result<(), PunisherError> {
    config.push_update_time(UpdateTime {
        trader_id: trader_id.to_string(),
        seconds: RefreshSeconds { min, max },
    })?;
    debug!(trader = trader_id, min, max, "pushed restock interval");
    Ok(())
}

/// Make the trader known to the host and record its flea-market flag.
pub fn register_trader(
    config: &mut dyn ConfigPort,
    trader_id: &str,
    flea_market: bool,
) -> Result<(), PunisherError> {
    config.register_trader_enum(trader_id)?;
    config.set_flea_market(trader_id, flea_market)?;
    debug!(trader = trader_id, flea_market, "registered trader");
    Ok(())
}

/// Insert or overwrite the trader's record in the host's trader table.
pub fn write_trader_record(
    registry: &mut dyn TraderRegistry,
    profile: &TraderProfile,
    catalog: Catalog,
) -> Result<(), PunisherError> {
    let items = catalog.items.len();
    registry.insert_trader(&profile.id, TraderRecord::new(profile.clone(), catalog))?;
    debug!(trader = %profile.id, items, "wrote trader record");
    Ok(())
}

/// Set the five trader keys in every locale the host has.
///
/// Every locale gets the same text. Returns the number of locales written.
pub fn write_locale_strings(
    locales: &mut dyn LocalePort,
    trader_id: &str,
    text: &TraderLocale,
) -> Result<usize, PunisherError> {
    write_locale_strings_with(locales, trader_id, |_| text.clone())
}

/// Like [`write_locale_strings`], with the text chosen per locale.
pub fn write_locale_strings_with<F>(
    locales: &mut dyn LocalePort,
    trader_id: &str,
    mut text_for: F,
) -> Result<usize, PunisherError>
where
    F: FnMut(&str) -> TraderLocale,
{
    let ids = locales.locale_ids();
    for locale in &ids {
        let text = text_for(locale);
        for field in LocaleField::iter() {
            locales.set_string(locale, &field.key(trader_id), text.get(field))?;
        }
    }
    debug!(trader = trader_id, locales = ids.len(), "wrote trader locale strings");
    Ok(ids.len())
}

/// Set `Name`, `ShortName` and `Description` for each custom item in every
/// locale. Returns the number of strings written.
pub fn write_item_locale_strings(
    locales: &mut dyn LocalePort,
    items: &[ItemLocale],
) -> Result<usize, PunisherError> {
    if items.is_empty() {
        return Ok(0);
    }
    let mut written = 0;
    for locale in locales.locale_ids() {
        for item in items {
            for (key, value) in item.entries() {
                locales.set_string(&locale, &key, value)?;
                written += 1;
            }
        }
    }
    debug!(items = items.len(), written, "wrote item locale strings");
    Ok(written)
}
