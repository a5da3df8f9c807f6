// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host integration for the Punisher trader.
//!
//! [`PunisherMod`] owns the two lifecycle hooks. The functions in
//! [`registration`] are the individual host writes those hooks perform, and
//! [`prepare_trader`] is the host-free part that turns the mod directory into
//! a validated catalog.

pub mod lifecycle;
pub mod prepare;
pub mod registration;

pub use lifecycle::{PostDbContext, PreLoadContext, PunisherMod, Stage};
pub use prepare::{prepare_trader, PrepareError, PreparedTrader};
pub use registration::{
    register_avatar, register_trader, set_restock_interval, write_item_locale_strings,
    write_locale_strings, write_locale_strings_with, write_trader_record,
};
