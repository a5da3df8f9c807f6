// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types exchanged with the host server.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::assort::Catalog;
use crate::profile::TraderProfile;

/// Currencies the host knows, keyed by their item template ids.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Money {
    #[strum(serialize = "RUB")]
    Roubles,
    #[strum(serialize = "USD")]
    Dollars,
    #[strum(serialize = "EUR")]
    Euros,
    #[strum(serialize = "GP")]
    GpCoins,
}

impl Money {
    pub fn template_id(self) -> &'static str {
        match self {
            Money::Roubles => "5449016a4bdc2d6f028b456f",
            Money::Dollars => "5696686a4bdc2da3298b456a",
            Money::Euros => "569668774bdc2da2298b4568",
            Money::GpCoins => "5d235b4d86f7742e017bc88a",
        }
    }

    pub fn from_template_id(tpl: &str) -> Option<Money> {
        use strum::IntoEnumIterator;
        Money::iter().find(|m| m.template_id() == tpl)
    }
}

/// Locale fields written for the trader. The variant name is the key suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum LocaleField {
    FullName,
    FirstName,
    Nickname,
    Location,
    Description,
}

impl LocaleField {
    /// Host locale key, e.g. `"<traderId> FullName"`.
    pub fn key(self, trader_id: &str) -> String {
        format!("{trader_id} {self}")
    }
}

/// Localized trader text. Every locale receives the same strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraderLocale {
    pub full_name: String,
    pub first_name: String,
    pub nickname: String,
    pub location: String,
    pub description: String,
}

impl TraderLocale {
    pub fn get(&self, field: LocaleField) -> &str {
        match field {
            LocaleField::FullName => &self.full_name,
            LocaleField::FirstName => &self.first_name,
            LocaleField::Nickname => &self.nickname,
            LocaleField::Location => &self.location,
            LocaleField::Description => &self.description,
        }
    }
}

/// Localized text for a custom item template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemLocale {
    pub tpl: String,
    pub name: String,
    pub short_name: String,
    #[serde(default)]
    pub description: String,
}

impl ItemLocale {
    /// `(key, value)` pairs in host locale format.
    pub fn entries(&self) -> [(String, &str); 3] {
        [
            (format!("{} Name", self.tpl), self.name.as_str()),
            (format!("{} ShortName", self.tpl), self.short_name.as_str()),
            (format!("{} Description", self.tpl), self.description.as_str()),
        ]
    }
}

/// Restock interval bounds in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshSeconds {
    pub min: u64,
    pub max: u64,
}

/// One record of the host's trader refresh config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTime {
    #[serde(rename = "traderId")]
    pub trader_id: String,
    pub seconds: RefreshSeconds,
}

/// Quest-gated assort unlocks. The trader unlocks nothing through quests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestAssort {
    pub started: serde_json::Map<String, serde_json::Value>,
    pub success: serde_json::Map<String, serde_json::Value>,
    pub fail: serde_json::Map<String, serde_json::Value>,
}

/// A full entry of the host's trader table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraderRecord {
    pub assort: Catalog,
    pub base: TraderProfile,
    pub questassort: QuestAssort,
}

impl TraderRecord {
    pub fn new(base: TraderProfile, assort: Catalog) -> Self {
        Self {
            assort,
            base,
            questassort: QuestAssort::default(),
        }
    }
}

/// What the catalog builder does when an offer reuses an existing top-level id.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DuplicatePolicy {
    /// Fail the build with a duplicate-id error.
    #[default]
    Reject,
    /// Last declaration wins: the earlier item subtree, barter scheme, and
    /// loyalty entry are replaced, never merged.
    Overwrite,
}
