// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trader assort data model in the host's wire format.
//!
//! Field names follow the host database (`_id`, `_tpl`, `parentId`,
//! `barter_scheme`, ...) so a [`Catalog`] serializes directly into the
//! `assort` slot of a trader record.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// Parent id of every directly purchasable item.
pub const ROOT_PARENT_ID: &str = "hideout";

/// Slot id of every directly purchasable item.
pub const ROOT_SLOT_ID: &str = "hideout";

/// Stack count written for unlimited offers. The host ignores it while
/// `UnlimitedCount` is set, but the field must be present.
pub const UNLIMITED_STACK_COUNT: u64 = 999_999;

/// How many units of a top-level offer the trader holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stock {
    Unlimited,
    Limited(u32),
}

/// Per-restock purchase cap for a single offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PurchaseLimit {
    pub max: u32,
    #[serde(default)]
    pub current: u32,
}

/// The `upd` block of an item.
///
/// Only the stock and restriction keys are interpreted. Everything else
/// (`FireMode`, `Foldable`, ...) is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Upd {
    #[serde(rename = "UnlimitedCount", default, skip_serializing_if = "Option::is_none")]
    pub unlimited_count: Option<bool>,
    #[serde(rename = "StackObjectsCount", default, skip_serializing_if = "Option::is_none")]
    pub stack_objects_count: Option<u64>,
    #[serde(rename = "BuyRestrictionMax", default, skip_serializing_if = "Option::is_none")]
    pub buy_restriction_max: Option<u32>,
    #[serde(rename = "BuyRestrictionCurrent", default, skip_serializing_if = "Option::is_none")]
    pub buy_restriction_current: Option<u32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A node in a trader's sellable inventory tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_tpl")]
    pub tpl: String,
    #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(rename = "slotId", default, skip_serializing_if = "Option::is_none")]
    pub slot_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upd: Option<Upd>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<serde_json::Value>,
}

impl Item {
    /// A bare top-level item. Stock is stamped separately.
    pub fn top_level(id: impl Into<String>, tpl: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tpl: tpl.into(),
            parent_id: Some(ROOT_PARENT_ID.to_string()),
            slot_id: Some(ROOT_SLOT_ID.to_string()),
            upd: None,
            location: None,
        }
    }

    /// A child attachment mounted in `slot` of `parent`.
    pub fn child(
        id: impl Into<String>,
        tpl: impl Into<String>,
        parent: impl Into<String>,
        slot: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            tpl: tpl.into(),
            parent_id: Some(parent.into()),
            slot_id: Some(slot.into()),
            upd: None,
            location: None,
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_id.as_deref() == Some(ROOT_PARENT_ID)
    }

    /// Trader stock of this item, if it carries any.
    ///
    /// A bare `StackObjectsCount` without `UnlimitedCount` is a stack size
    /// (cartridges in a magazine), not trader stock. Counts past `u32::MAX`
    /// saturate here; catalog validation reports them.
    pub fn stock(&self) -> Option<Stock> {
        let upd = self.upd.as_ref()?;
        match upd.unlimited_count? {
            true => Some(Stock::Unlimited),
            false => {
                let count = upd.stack_objects_count.unwrap_or(0);
                Some(Stock::Limited(u32::try_from(count).unwrap_or(u32::MAX)))
            }
        }
    }

    pub fn purchase_limit(&self) -> Option<PurchaseLimit> {
        let upd = self.upd.as_ref()?;
        let max = upd.buy_restriction_max?;
        Some(PurchaseLimit {
            max,
            current: upd.buy_restriction_current.unwrap_or(0),
        })
    }

    pub fn set_stock(&mut self, stock: Stock) {
        let upd = self.upd.get_or_insert_with(Upd::default);
        match stock {
            Stock::Unlimited => {
                upd.unlimited_count = Some(true);
                upd.stack_objects_count = Some(UNLIMITED_STACK_COUNT);
            }
            Stock::Limited(count) => {
                upd.unlimited_count = Some(false);
                upd.stack_objects_count = Some(u64::from(count));
            }
        }
    }

    pub fn set_purchase_limit(&mut self, limit: Option<PurchaseLimit>) {
        let upd = self.upd.get_or_insert_with(Upd::default);
        upd.buy_restriction_max = limit.map(|l| l.max);
        upd.buy_restriction_current = limit.map(|l| l.current);
    }
}

/// One payment in an offer set: `count` units of template `tpl`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarterCost {
    #[serde(rename = "_tpl")]
    pub tpl: String,
    pub count: u64,
}

impl BarterCost {
    pub fn new(tpl: impl Into<String>, count: u64) -> Self {
        Self {
            tpl: tpl.into(),
            count,
        }
    }
}

/// Alternative offer sets. Every pair inside a set is paid together; any one
/// set buys the item.
pub type BarterScheme = Vec<Vec<BarterCost>>;

/// A trader's full assort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "nextResupply", default)]
    pub next_resupply: u64,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(rename = "barter_scheme", default)]
    pub barter_scheme: BTreeMap<String, BarterScheme>,
    #[serde(rename = "loyal_level_items", default)]
    pub loyal_level_items: BTreeMap<String, u32>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn top_level_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.is_top_level())
    }

    /// Ids of `root` and every transitive child of it, in catalog order.
    pub fn subtree_ids(&self, root: &str) -> HashSet<String> {
        let mut ids = HashSet::new();
        ids.insert(root.to_string());
        // Children may precede their parent in hand-authored data, so iterate
        // until no new id is added.
        loop {
            let before = ids.len();
            for item in &self.items {
                if let Some(parent) = item.parent_id.as_deref()
                    && ids.contains(parent)
                {
                    ids.insert(item.id.clone());
                }
            }
            if ids.len() == before {
                break;
            }
        }
        ids
    }

    /// Remove the top-level item `root`, its attachments, and its barter and
    /// loyalty entries. Returns the number of items removed.
    pub fn remove_offer(&mut self, root: &str) -> usize {
        let ids = self.subtree_ids(root);
        let before = self.items.len();
        self.items.retain(|i| !ids.contains(&i.id));
        self.barter_scheme.remove(root);
        self.loyal_level_items.remove(root);
        before - self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_deserializes_from_host_json() {
        let json = r#"{
            "_id": "RGO",
            "_tpl": "618a431df1eb8e24b8741deb",
            "parentId": "hideout",
            "slotId": "hideout",
            "upd": { "UnlimitedCount": false, "StackObjectsCount": 15 }
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "RGO");
        assert!(item.is_top_level());
        assert_eq!(item.stock(), Some(Stock::Limited(15)));
        assert_eq!(item.purchase_limit(), None);
    }

    #[test]
    fn unknown_upd_keys_survive_serialization() {
        let json = r#"{
            "_id": "mag",
            "_tpl": "55d4887d4bdc2d962f8b4570",
            "parentId": "gun",
            "slotId": "mod_magazine",
            "upd": { "FireMode": { "FireMode": "single" } }
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["upd"]["FireMode"]["FireMode"], "single");
        assert!(out["upd"].get("UnlimitedCount").is_none());
    }

    #[test]
    fn stack_count_without_unlimited_flag_is_not_stock() {
        let mut item = Item::child("ammo", "tpl", "mag", "cartridges");
        item.upd = Some(Upd {
            stack_objects_count: Some(30),
            ..Upd::default()
        });
        assert_eq!(item.stock(), None);
    }

    #[test]
    fn set_stock_unlimited_writes_sentinel_count() {
        let mut item = Item::top_level("a", "a");
        item.set_stock(Stock::Unlimited);
        let upd = item.upd.as_ref().unwrap();
        assert_eq!(upd.unlimited_count, Some(true));
        assert_eq!(upd.stack_objects_count, Some(UNLIMITED_STACK_COUNT));
        assert_eq!(item.stock(), Some(Stock::Unlimited));
    }

    #[test]
    fn purchase_limit_maps_to_buy_restriction() {
        let mut item = Item::top_level("a", "a");
        item.set_purchase_limit(Some(PurchaseLimit { max: 2, current: 0 }));
        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["upd"]["BuyRestrictionMax"], 2);
        assert_eq!(out["upd"]["BuyRestrictionCurrent"], 0);
    }

    #[test]
    fn catalog_uses_host_field_names() {
        let mut catalog = Catalog::new();
        catalog.items.push(Item::top_level("a", "a"));
        catalog
            .barter_scheme
            .insert("a".into(), vec![vec![BarterCost::new("usd", 5)]]);
        catalog.loyal_level_items.insert("a".into(), 2);

        let out = serde_json::to_value(&catalog).unwrap();
        assert_eq!(out["nextResupply"], 0);
        assert_eq!(out["barter_scheme"]["a"][0][0]["_tpl"], "usd");
        assert_eq!(out["barter_scheme"]["a"][0][0]["count"], 5);
        assert_eq!(out["loyal_level_items"]["a"], 2);
    }

    #[test]
    fn remove_offer_drops_whole_subtree() {
        let mut catalog = Catalog::new();
        catalog.items.push(Item::child("scope", "t3", "gun", "mod_scope"));
        catalog.items.push(Item::top_level("gun", "t1"));
        catalog.items.push(Item::child("mag", "t2", "gun", "mod_magazine"));
        catalog.items.push(Item::child("ammo", "t4", "mag", "cartridges"));
        catalog.items.push(Item::top_level("other", "t5"));
        catalog.loyal_level_items.insert("gun".into(), 1);

        assert_eq!(catalog.remove_offer("gun"), 4);
        assert_eq!(catalog.items.len(), 1);
        assert_eq!(catalog.items[0].id, "other");
        assert!(catalog.loyal_level_items.is_empty());
    }
}
