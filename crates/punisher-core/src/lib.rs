// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Punisher trader mod.
//!
//! Provides the assort data model in host wire format, the trader profile
//! descriptor, the shared error type, and the port traits through which the
//! mod reaches host services.

pub mod assort;
pub mod error;
pub mod profile;
pub mod traits;
pub mod types;

pub use assort::{
    BarterCost, BarterScheme, Catalog, Item, PurchaseLimit, Stock, Upd, ROOT_PARENT_ID,
    ROOT_SLOT_ID, UNLIMITED_STACK_COUNT,
};
pub use error::PunisherError;
pub use profile::TraderProfile;
pub use types::{
    DuplicatePolicy, ItemLocale, LocaleField, Money, QuestAssort, RefreshSeconds, TraderLocale, TraderRecord,
    UpdateTime,
};

pub use traits::{ConfigPort, ImageRouter, LocalePort, ModLoader, PresetSource, TraderRegistry};
