// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog builder.
//!
//! Offers are appended one at a time. Each call checks its own inputs and
//! fails before touching the catalog, so a rejected offer leaves the
//! builder exactly as it was. [`CatalogBuilder::build`] then runs the full
//! cross-reference validation over the finished catalog.

use std::collections::{HashMap, HashSet};

use punisher_core::{
    BarterCost, BarterScheme, Catalog, DuplicatePolicy, Item, PurchaseLimit, Stock,
    ROOT_PARENT_ID, ROOT_SLOT_ID,
};
use tracing::{debug, warn};

use crate::error::CatalogError;
use crate::validation::{validate_catalog, ValidationOptions, ValidationReport};

/// Stock, price, and gating shared by every kind of offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferTerms {
    pub stock: Stock,
    pub loyalty: u32,
    pub scheme: BarterScheme,
    pub purchase_limit: Option<PurchaseLimit>,
}

impl OfferTerms {
    /// A single price: `count` units of currency or item `tpl`.
    pub fn priced(stock: Stock, loyalty: u32, tpl: impl Into<String>, count: u64) -> Self {
        Self {
            stock,
            loyalty,
            scheme: vec![vec![BarterCost::new(tpl, count)]],
            purchase_limit: None,
        }
    }

    /// An arbitrary barter scheme with one or more alternative offer sets.
    pub fn bartered(stock: Stock, loyalty: u32, scheme: BarterScheme) -> Self {
        Self {
            stock,
            loyalty,
            scheme,
            purchase_limit: None,
        }
    }

    pub fn with_purchase_limit(mut self, limit: PurchaseLimit) -> Self {
        self.purchase_limit = Some(limit);
        self
    }

    fn check(&self, id: &str) -> Result<(), CatalogError> {
        if self.loyalty == 0 {
            return Err(CatalogError::ZeroLoyalty { id: id.to_string() });
        }
        if self.stock == Stock::Limited(0) {
            return Err(CatalogError::ZeroStock { id: id.to_string() });
        }
        if let Some(limit) = self.purchase_limit
            && (limit.max == 0 || limit.current > limit.max)
        {
            return Err(CatalogError::InvalidPurchaseLimit {
                id: id.to_string(),
                max: limit.max,
                current: limit.current,
            });
        }
        check_scheme(id, &self.scheme)
    }
}

/// Reject empty schemes, empty offer sets, blank templates, and zero counts.
pub(crate) fn check_scheme(id: &str, scheme: &BarterScheme) -> Result<(), CatalogError> {
    if scheme.is_empty() {
        return Err(CatalogError::EmptyScheme { id: id.to_string() });
    }
    for (index, set) in scheme.iter().enumerate() {
        if set.is_empty() {
            return Err(CatalogError::EmptyOfferSet {
                id: id.to_string(),
                index,
            });
        }
        for cost in set {
            if cost.tpl.trim().is_empty() {
                return Err(CatalogError::EmptyTemplate {
                    offer: id.to_string(),
                });
            }
            if cost.count == 0 {
                return Err(CatalogError::ZeroPrice {
                    id: id.to_string(),
                    tpl: cost.tpl.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Builds a trader catalog from offer declarations.
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    catalog: Catalog,
    policy: DuplicatePolicy,
}

impl CatalogBuilder {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            catalog: Catalog::new(),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// The catalog as built so far.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Add a single item whose catalog id is its template id.
    pub fn add_simple_offer(&mut self, tpl: &str, terms: OfferTerms) -> Result<(), CatalogError> {
        self.add_simple_offer_with_id(tpl, tpl, terms)
    }

    /// Add a single item under an explicit catalog id, so one template can
    /// be offered several times on different terms.
    pub fn add_simple_offer_with_id(
        &mut self,
        id: &str,
        tpl: &str,
        terms: OfferTerms,
    ) -> Result<(), CatalogError> {
        if tpl.trim().is_empty() || id.trim().is_empty() {
            return Err(CatalogError::EmptyTemplate {
                offer: id.to_string(),
            });
        }
        terms.check(id)?;

        self.insert_offer(vec![Item::top_level(id, tpl)], terms)
    }

    /// Add a multi-part item (a weapon and its attachments).
    ///
    /// `items[0]` is the purchasable root; the rest must chain back to it.
    /// The slice is copied, never modified, so one preset can back any number
    /// of offers. Returns the root's catalog id.
    pub fn add_composite_offer(
        &mut self,
        items: &[Item],
        terms: OfferTerms,
    ) -> Result<String, CatalogError> {
        let root = items.first().ok_or(CatalogError::EmptyComposite)?;
        let id = root.id.clone();
        check_composite(items)?;
        terms.check(&id)?;

        self.insert_offer(items.to_vec(), terms)?;
        Ok(id)
    }

    /// Add a multi-part item under a fresh root id.
    ///
    /// The root takes `id` and every attachment is re-keyed as
    /// `<id>-<original id>`, with parent references rewritten to match. This
    /// lets one preset appear several times in the same catalog.
    pub fn add_composite_offer_with_id(
        &mut self,
        id: &str,
        items: &[Item],
        terms: OfferTerms,
    ) -> Result<String, CatalogError> {
        if id.trim().is_empty() {
            return Err(CatalogError::EmptyTemplate {
                offer: id.to_string(),
            });
        }
        let root = items.first().ok_or(CatalogError::EmptyComposite)?;
        check_composite(items)?;
        terms.check(id)?;

        let mut renamed: HashMap<&str, String> = HashMap::with_capacity(items.len());
        renamed.insert(root.id.as_str(), id.to_string());
        for item in &items[1..] {
            renamed.insert(item.id.as_str(), format!("{id}-{}", item.id));
        }

        let copy = items
            .iter()
            .map(|item| {
                let mut copy = item.clone();
                if let Some(new_id) = renamed.get(item.id.as_str()) {
                    copy.id = new_id.clone();
                }
                let new_parent = item.parent_id.as_deref().and_then(|p| renamed.get(p));
                if let Some(parent) = new_parent {
                    copy.parent_id = Some(parent.clone());
                }
                copy
            })
            .collect();

        self.insert_offer(copy, terms)?;
        Ok(id.to_string())
    }

    /// Validate with default options and return the finished catalog.
    pub fn build(self) -> Result<(Catalog, ValidationReport), Vec<CatalogError>> {
        self.build_with(&ValidationOptions::default())
    }

    pub fn build_with(
        self,
        options: &ValidationOptions,
    ) -> Result<(Catalog, ValidationReport), Vec<CatalogError>> {
        let report = validate_catalog(&self.catalog, options)?;
        Ok((self.catalog, report))
    }

    /// Stamp the root, resolve id collisions, and append the offer.
    fn insert_offer(&mut self, mut items: Vec<Item>, terms: OfferTerms) -> Result<(), CatalogError> {
        let root = &mut items[0];
        root.parent_id = Some(ROOT_PARENT_ID.to_string());
        root.slot_id = Some(ROOT_SLOT_ID.to_string());
        root.set_stock(terms.stock);
        root.set_purchase_limit(terms.purchase_limit);
        let id = root.id.clone();

        // Only a top-level offer can be replaced; an attachment of another
        // offer with the same id is always a collision.
        let replaced = match self.catalog.item(&id) {
            None => HashSet::new(),
            Some(existing) if existing.is_top_level() && self.policy == DuplicatePolicy::Overwrite => {
                self.catalog.subtree_ids(&id)
            }
            Some(_) => return Err(CatalogError::DuplicateId { id }),
        };
        let child_clash = items[1..]
            .iter()
            .find(|i| !replaced.contains(&i.id) && self.catalog.item(&i.id).is_some())
            .map(|i| i.id.clone());
        if let Some(child) = child_clash {
            return Err(CatalogError::DuplicateId { id: child });
        }

        if !replaced.is_empty() {
            let removed = self.catalog.remove_offer(&id);
            warn!(id = %id, removed, "offer redeclared, replacing earlier entry");
        }

        debug!(id = %id, items = items.len(), loyalty = terms.loyalty, "adding offer");
        self.catalog.items.extend(items);
        self.catalog.barter_scheme.insert(id.clone(), terms.scheme);
        self.catalog.loyal_level_items.insert(id, terms.loyalty);
        Ok(())
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new(DuplicatePolicy::default())
    }
}

/// Every attachment must have a unique id and a parent inside the sequence.
fn check_composite(items: &[Item]) -> Result<(), CatalogError> {
    let mut ids = HashSet::with_capacity(items.len());
    for item in items {
        if item.tpl.trim().is_empty() {
            return Err(CatalogError::EmptyTemplate {
                offer: item.id.clone(),
            });
        }
        if !ids.insert(item.id.as_str()) {
            return Err(CatalogError::DuplicateItemId {
                id: item.id.clone(),
                count: items.iter().filter(|i| i.id == item.id).count(),
            });
        }
    }
    for item in &items[1..] {
        match item.parent_id.as_deref() {
            None => return Err(CatalogError::MissingParent { id: item.id.clone() }),
            Some(parent) if !ids.contains(parent) => {
                return Err(CatalogError::DanglingParent {
                    id: item.id.clone(),
                    parent: parent.to_string(),
                });
            }
            Some(_) => {}
        }
        if item.stock().is_some() || item.purchase_limit().is_some() {
            return Err(CatalogError::ChildCarriesStock { id: item.id.clone() });
        }
    }
    Ok(())
}
