// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trader profile descriptor (`db/base.json`).

use serde::{Deserialize, Serialize};

/// Static descriptor of the trader.
///
/// The host's `base` record has dozens of keys. Only the ones the mod reads
/// are typed; the rest ride along in `extra` and are written back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraderProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub nickname: String,
    pub location: String,
    /// Host image path, e.g. `/files/trader/avatar/punisher.jpg`.
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TraderProfile {
    /// Image-router key: the avatar path without its image extension.
    pub fn avatar_route(&self) -> &str {
        [".jpg", ".jpeg", ".png"]
            .iter()
            .find_map(|ext| self.avatar.strip_suffix(ext))
            .unwrap_or(&self.avatar)
    }

    /// File name of the avatar inside the mod's image directory.
    pub fn avatar_file_name(&self) -> &str {
        self.avatar.rsplit('/').next().unwrap_or(&self.avatar)
    }
}
