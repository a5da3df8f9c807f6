// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mod loader port.

use std::path::PathBuf;

use crate::error::PunisherError;

/// Resolves where the host unpacked a mod.
pub trait ModLoader {
    /// Directory of the named mod, relative to the host's working directory.
    fn mod_path(&self, mod_name: &str) -> Result<PathBuf, PunisherError>;
}
