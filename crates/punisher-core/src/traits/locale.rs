// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host locale table port.

use crate::error::PunisherError;

/// The host's global locale table (`locales.global`).
pub trait LocalePort {
    /// Every locale present in the table (`"en"`, `"ru"`, ...).
    fn locale_ids(&self) -> Vec<String>;

    /// Set one string in one locale, overwriting any existing value.
    fn set_string(&mut self, locale: &str, key: &str, value: &str) -> Result<(), PunisherError>;
}
