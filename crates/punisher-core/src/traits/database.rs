// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host database ports: the trader table and the global preset table.

use crate::assort::Item;
use crate::error::PunisherError;
use crate::types::TraderRecord;

/// The host's trader table.
pub trait TraderRegistry {
    /// Insert or overwrite the record keyed by `trader_id`.
    fn insert_trader(&mut self, trader_id: &str, record: TraderRecord) -> Result<(), PunisherError>;
}

/// Read access to the host's global weapon presets.
pub trait PresetSource {
    /// Items of the preset with the given id, root first.
    fn preset_items(&self, preset_id: &str) -> Option<&[Item]>;
}
