// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weapon presets shipped with the mod (`db/presets/*.json`).
//!
//! Files use the host's `ItemPresets` layout so a preset exported from the
//! host can be dropped in unchanged.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use punisher_core::{Item, PresetSource, PunisherError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::CatalogError;
use crate::walk::{walk_files, WalkOptions};

/// A pre-composed item tree, root first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "_parent", default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(rename = "_items")]
    pub items: Vec<Item>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Preset {
    /// Check that the items form one tree rooted at `items[0]`.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let malformed = |message: String| CatalogError::MalformedPreset {
            preset: self.id.clone(),
            message,
        };

        let root = self
            .items
            .first()
            .ok_or_else(|| malformed("preset has no items".to_string()))?;
        if let Some(parent) = &self.parent
            && parent != &root.id
        {
            return Err(malformed(format!(
                "_parent `{parent}` does not match root item `{}`",
                root.id
            )));
        }

        let mut ids = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !ids.insert(item.id.as_str()) {
                return Err(malformed(format!("item id `{}` is repeated", item.id)));
            }
        }
        for item in &self.items[1..] {
            match item.parent_id.as_deref() {
                Some(parent) if ids.contains(parent) => {}
                Some(parent) => {
                    return Err(malformed(format!(
                        "item `{}` references missing parent `{parent}`",
                        item.id
                    )));
                }
                None => {
                    return Err(malformed(format!("item `{}` has no parentId", item.id)));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct PresetFile {
    #[serde(rename = "ItemPresets")]
    item_presets: BTreeMap<String, Preset>,
}

/// Presets defined by the mod, keyed by preset id.
#[derive(Debug, Clone, Default)]
pub struct PresetTable {
    presets: BTreeMap<String, Preset>,
}

impl PresetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one presets file. `origin` names the file in error messages.
    pub fn parse_json(json: &str, origin: &str) -> Result<Self, PunisherError> {
        let file: PresetFile =
            serde_json::from_str(json).map_err(|e| PunisherError::data(origin, e))?;
        let mut table = Self::new();
        for (key, preset) in file.item_presets {
            if key != preset.id {
                warn!(key = %key, id = %preset.id, origin, "preset key differs from its _id, using key");
            }
            table
                .insert_as(key, preset)
                .map_err(|e| PunisherError::Validation(e.to_string()))?;
        }
        Ok(table)
    }

    pub fn load_file(path: &Path) -> Result<Self, PunisherError> {
        let origin = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|e| PunisherError::data(&origin, e))?;
        Self::parse_json(&json, &origin)
    }

    /// Load every `*.json` presets file under `dir`. Later files override
    /// earlier ones on id collision.
    pub fn load_dir(dir: &Path, options: &WalkOptions) -> Result<Self, PunisherError> {
        let mut table = Self::new();
        let files = walk_files(dir, &["json"], options, |path| {
            let loaded = Self::load_file(path)?;
            debug!(file = %path.display(), presets = loaded.len(), "loaded preset file");
            table.merge(loaded);
            Ok(())
        })?;
        info!(files, presets = table.len(), "loaded mod presets");
        Ok(table)
    }

    /// Add a preset under its own id after checking its shape.
    pub fn insert(&mut self, preset: Preset) -> Result<(), CatalogError> {
        let key = preset.id.clone();
        self.insert_as(key, preset)
    }

    fn insert_as(&mut self, key: String, preset: Preset) -> Result<(), CatalogError> {
        preset.validate()?;
        if self.presets.insert(key.clone(), preset).is_some() {
            warn!(preset = %key, "duplicate preset id, overwriting");
        }
        Ok(())
    }

    pub fn merge(&mut self, other: PresetTable) {
        for (key, preset) in other.presets {
            if self.presets.insert(key.clone(), preset).is_some() {
                warn!(preset = %key, "duplicate preset id, overwriting");
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.presets.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.presets.keys()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl PresetSource for PresetTable {
    fn preset_items(&self, preset_id: &str) -> Option<&[Item]> {
        self.presets.get(preset_id).map(|p| p.items.as_slice())
    }
}

/// Looks a preset up in each source in turn.
pub struct PresetChain<'a> {
    sources: Vec<&'a dyn PresetSource>,
}

impl<'a> PresetChain<'a> {
    pub fn new(sources: Vec<&'a dyn PresetSource>) -> Self {
        Self { sources }
    }
}

impl PresetSource for PresetChain<'_> {
    fn preset_items(&self, preset_id: &str) -> Option<&[Item]> {
        self.sources.iter().find_map(|s| s.preset_items(preset_id))
    }
}
