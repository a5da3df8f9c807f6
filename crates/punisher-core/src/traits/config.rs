// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host configuration port (trader refresh timing and flea market).

use crate::error::PunisherError;
use crate::types::UpdateTime;

/// Mutable access to the host's trader and flea-market configuration.
pub trait ConfigPort {
    /// Append a refresh-timing record. The host does not deduplicate, so
    /// pushing twice for one trader leaves two records.
    fn push_update_time(&mut self, record: UpdateTime) -> Result<(), PunisherError>;

    /// Set whether the trader's offers are listed on the flea market.
    fn set_flea_market(&mut self, trader_id: &str, listed: bool) -> Result<(), PunisherError>;

    /// Add the trader id to the host's known-trader enumeration.
    fn register_trader_enum(&mut self, trader_id: &str) -> Result<(), PunisherError>;
}
