// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image router port.

use std::path::Path;

use crate::error::PunisherError;

/// Maps client image URLs to files on disk.
pub trait ImageRouter {
    /// Serve `file` whenever the client requests `route` (extension stripped).
    fn add_route(&mut self, route: &str, file: &Path) -> Result<(), PunisherError>;
}
