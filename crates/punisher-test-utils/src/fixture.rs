// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! On-disk mod directory fixtures.
//!
//! `ModFixture` lays out a temporary directory shaped like an unpacked mod:
//! `db/base.json`, `db/offers.toml`, `db/presets/*.json`, `res/<avatar>`,
//! and an optional `config.toml`. The directory is removed on drop.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use punisher_core::Item;
use tempfile::TempDir;

/// Trader id used by every fixture.
pub const TRADER_ID: &str = "668aaff35fd574b6dcc4a686";

/// Host-preset id of the sample weapon that the fixture does not ship.
pub const HOST_PRESET_ID: &str = "5a8ae43686f774377b73cfb3";

pub const SAMPLE_BASE: &str = r#"{
    "_id": "668aaff35fd574b6dcc4a686",
    "name": "Frank Castle",
    "surname": "Castle",
    "nickname": "Punisher",
    "location": "Shoreline",
    "avatar": "/files/trader/avatar/punisher.jpg",
    "description": "A former marine with a bunker on the shore.",
    "currency": "USD",
    "balance_dol": 1000000,
    "loyaltyLevels": [
        { "minLevel": 1, "minSalesSum": 0, "minStanding": 0 },
        { "minLevel": 15, "minSalesSum": 15000, "minStanding": 0.2 }
    ],
    "unlockedByDefault": true
}"#;

pub const SAMPLE_PRESETS: &str = r#"{
    "ItemPresets": {
        "TM_cc7d623412685ff3cdcf3684": {
            "_id": "TM_cc7d623412685ff3cdcf3684",
            "_name": "Punisher HK416A5",
            "_parent": "pun_hk416",
            "_type": "Preset",
            "_items": [
                { "_id": "pun_hk416", "_tpl": "5bb2475ed4351e00853264e3",
                  "upd": { "FireMode": { "FireMode": "fullauto" } } },
                { "_id": "pun_hk416_mag", "_tpl": "5c05413a0db834001c390617",
                  "parentId": "pun_hk416", "slotId": "mod_magazine" },
                { "_id": "pun_hk416_ammo", "_tpl": "54527a984bdc2d4e668b4567",
                  "parentId": "pun_hk416_mag", "slotId": "cartridges",
                  "upd": { "StackObjectsCount": 30 } }
            ]
        }
    }
}"#;

/// The host's global preset table in `globals.json` layout, holding only
/// [`HOST_PRESET_ID`].
pub const HOST_PRESETS: &str = r#"{
    "ItemPresets": {
        "5a8ae43686f774377b73cfb3": {
            "_id": "5a8ae43686f774377b73cfb3",
            "_name": "AKS-74U Default",
            "_parent": "5a8ae43686f774377b73cfb2",
            "_items": [
                { "_id": "5a8ae43686f774377b73cfb2", "_tpl": "57dc2fa62459775949412633" },
                { "_id": "5a8ae43686f774377b73cfb4", "_tpl": "57e3dba62459770f0c32322b",
                  "parentId": "5a8ae43686f774377b73cfb2", "slotId": "mod_pistol_grip" },
                { "_id": "5a8ae43686f774377b73cfb5", "_tpl": "564ca99c4bdc2d16268b4589",
                  "parentId": "5a8ae43686f774377b73cfb2", "slotId": "mod_magazine" }
            ]
        }
    }
}"#;

/// Items of [`HOST_PRESET_ID`], for seeding a mock host.
pub fn host_preset_items() -> Vec<Item> {
    let value: serde_json::Value = match serde_json::from_str(HOST_PRESETS) {
        Ok(value) => value,
        Err(err) => panic!("HOST_PRESETS is not valid JSON: {err}"),
    };
    match serde_json::from_value(value["ItemPresets"][HOST_PRESET_ID]["_items"].clone()) {
        Ok(items) => items,
        Err(err) => panic!("HOST_PRESETS items do not parse: {err}"),
    }
}

pub const SAMPLE_OFFERS: &str = r#"
[[simple]]
tpl = "5aaa5e60e5b5b000140293d6"
stock = 30
loyalty = 1
currency = "EUR"
price = 9

[[simple]]
tpl = "54527a984bdc2d4e668b4567"
unlimited = true
loyalty = 2
currency = "USD"
price = 2
buy_limit = 300

[[preset]]
preset = "TM_cc7d623412685ff3cdcf3684"
stock = 2
loyalty = 4
currency = "EUR"
price = 800

[[preset]]
preset = "5a8ae43686f774377b73cfb3"
unlimited = true
loyalty = 1
currency = "RUB"
price = 45000

[[barter]]
id = "Igla"
tpl = "5c0d5e4486f77478390952fe"
unlimited = true
loyalty = 2
cost = [[{ tpl = "569668774bdc2da2298b4568", count = 3 }, { tpl = "56dff061d2720bb5668b4567", count = 2 }]]

[[item_locale]]
tpl = "5bb2475ed4351e00853264e3"
name = "Punisher HK416A5"
short_name = "HK416P"
description = "Frank's personal rifle."
"#;

/// A temporary mod directory with the sample data files.
pub struct ModFixture {
    dir: TempDir,
}

impl ModFixture {
    /// Write the full sample mod (profile, offers, presets, avatar).
    pub fn new() -> io::Result<Self> {
        let fixture = Self::empty()?;
        fixture.write("db/base.json", SAMPLE_BASE)?;
        fixture.write("db/offers.toml", SAMPLE_OFFERS)?;
        fixture.write("db/presets/weapons.json", SAMPLE_PRESETS)?;
        fixture.write("res/punisher.jpg", "\u{ff}\u{d8}")?;
        Ok(fixture)
    }

    /// An empty mod directory.
    pub fn empty() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> io::Result<PathBuf> {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn with_config(self, toml: &str) -> io::Result<Self> {
        self.write("config.toml", toml)?;
        Ok(self)
    }

    pub fn with_offers(self, toml: &str) -> io::Result<Self> {
        self.write("db/offers.toml", toml)?;
        Ok(self)
    }

    pub fn with_assort(self, json: &str) -> io::Result<Self> {
        self.write("db/assort.json", json)?;
        Ok(self)
    }

    pub fn remove(&self, relative: &str) -> io::Result<()> {
        fs::remove_file(self.join(relative))
    }
}
