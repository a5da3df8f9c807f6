// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loaders for the trader profile and the pre-built assort file.

use std::path::Path;

use punisher_core::{Catalog, PunisherError, TraderProfile};
use tracing::debug;

fn read(path: &Path) -> Result<(String, String), PunisherError> {
    let origin = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| PunisherError::data(&origin, e))?;
    Ok((content, origin))
}

/// Parse `base.json`. Missing or blank required fields fail the load.
pub fn parse_profile(json: &str, origin: &str) -> Result<TraderProfile, PunisherError> {
    let profile: TraderProfile =
        serde_json::from_str(json).map_err(|e| PunisherError::data(origin, e))?;

    let required = [
        ("_id", &profile.id),
        ("name", &profile.name),
        ("nickname", &profile.nickname),
        ("location", &profile.location),
        ("avatar", &profile.avatar),
    ];
    if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(PunisherError::Data {
            path: origin.to_string(),
            message: format!("required field `{field}` is empty"),
            source: None,
        });
    }
    Ok(profile)
}

pub fn load_profile(path: &Path) -> Result<TraderProfile, PunisherError> {
    let (json, origin) = read(path)?;
    let profile = parse_profile(&json, &origin)?;
    debug!(trader = %profile.id, nickname = %profile.nickname, "loaded trader profile");
    Ok(profile)
}

/// Parse a pre-built assort in host wire format.
///
/// The result owns its data, so later edits to the catalog never reach the
/// file contents. Structural checks are left to
/// [`crate::validation::validate_catalog`].
pub fn parse_assort(json: &str, origin: &str) -> Result<Catalog, PunisherError> {
    serde_json::from_str(json).map_err(|e| PunisherError::data(origin, e))
}

pub fn load_assort(path: &Path) -> Result<Catalog, PunisherError> {
    let (json, origin) = read(path)?;
    let catalog = parse_assort(&json, &origin)?;
    debug!(file = %origin, items = catalog.items.len(), "loaded pre-built assort");
    Ok(catalog)
}
