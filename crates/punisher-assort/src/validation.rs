// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structural validation of a finished catalog.
//!
//! Collects every violation rather than stopping at the first, so one run
//! over a hand-authored assort reports all of its typos at once.

use std::collections::{BTreeSet, HashMap, HashSet};

use punisher_core::{Catalog, Item, Money, Stock, ROOT_PARENT_ID, ROOT_SLOT_ID};

use crate::builder::check_scheme;
use crate::error::CatalogError;

/// Knobs for [`validate_catalog`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Treat a top-level item without a barter scheme or loyalty entry as an
    /// error instead of a warning.
    pub strict_completeness: bool,
}

/// Summary of a catalog that passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub total_items: usize,
    pub top_level_items: usize,
    /// Completeness defects that did not fail the build.
    pub warnings: Vec<CatalogError>,
    /// Payment templates that are not a known currency. Barter items land
    /// here, and so do currency ids with typos.
    pub non_currency_payments: BTreeSet<String>,
}

/// Check every invariant of the assort data model.
pub fn validate_catalog(
    catalog: &Catalog,
    options: &ValidationOptions,
) -> Result<ValidationReport, Vec<CatalogError>> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let mut by_id: HashMap<&str, &Item> = HashMap::with_capacity(catalog.items.len());
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in &catalog.items {
        by_id.entry(item.id.as_str()).or_insert(item);
        *counts.entry(item.id.as_str()).or_default() += 1;
    }
    let mut reported = HashSet::new();
    for item in &catalog.items {
        let count = counts[item.id.as_str()];
        if count > 1 && reported.insert(item.id.as_str()) {
            errors.push(CatalogError::DuplicateItemId {
                id: item.id.clone(),
                count,
            });
        }
    }

    let mut top_level = HashSet::new();
    for item in &catalog.items {
        match item.parent_id.as_deref() {
            None => errors.push(CatalogError::MissingParent { id: item.id.clone() }),
            Some(ROOT_PARENT_ID) => {
                top_level.insert(item.id.as_str());
                check_top_level(item, &mut errors);
            }
            Some(parent) => {
                if !by_id.contains_key(parent) {
                    errors.push(CatalogError::DanglingParent {
                        id: item.id.clone(),
                        parent: parent.to_string(),
                    });
                } else if !reaches_root(item, &by_id) {
                    errors.push(CatalogError::ParentCycle { id: item.id.clone() });
                }
                if item.stock().is_some() || item.purchase_limit().is_some() {
                    errors.push(CatalogError::ChildCarriesStock { id: item.id.clone() });
                }
            }
        }
    }

    let mut non_currency_payments = BTreeSet::new();
    for (id, scheme) in &catalog.barter_scheme {
        if !top_level.contains(id.as_str()) {
            errors.push(CatalogError::OrphanBarter { id: id.clone() });
        }
        if let Err(err) = check_scheme(id, scheme) {
            errors.push(err);
        }
        for cost in scheme.iter().flatten() {
            if Money::from_template_id(&cost.tpl).is_none() {
                non_currency_payments.insert(cost.tpl.clone());
            }
        }
    }

    for (id, tier) in &catalog.loyal_level_items {
        if !top_level.contains(id.as_str()) {
            errors.push(CatalogError::OrphanLoyalty { id: id.clone() });
        }
        if *tier == 0 {
            errors.push(CatalogError::ZeroLoyalty { id: id.clone() });
        }
    }

    let mut missing = Vec::new();
    for item in catalog.top_level_items() {
        if !catalog.barter_scheme.contains_key(&item.id) {
            missing.push(CatalogError::MissingBarter { id: item.id.clone() });
        }
        if !catalog.loyal_level_items.contains_key(&item.id) {
            missing.push(CatalogError::MissingLoyalty { id: item.id.clone() });
        }
    }
    if options.strict_completeness {
        errors.extend(missing);
    } else {
        warnings.extend(missing);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidationReport {
        total_items: catalog.items.len(),
        top_level_items: top_level.len(),
        warnings,
        non_currency_payments,
    })
}

fn check_top_level(item: &Item, errors: &mut Vec<CatalogError>) {
    match item.stock() {
        None => errors.push(CatalogError::MissingStock { id: item.id.clone() }),
        Some(Stock::Limited(0)) => errors.push(CatalogError::ZeroStock { id: item.id.clone() }),
        Some(_) => {}
    }
    if let Some(upd) = &item.upd
        && upd.unlimited_count == Some(false)
        && let Some(count) = upd.stack_objects_count
        && count > u64::from(u32::MAX)
    {
        errors.push(CatalogError::StockOutOfRange {
            id: item.id.clone(),
            count,
        });
    }
    if item.slot_id.as_deref() != Some(ROOT_SLOT_ID) {
        errors.push(CatalogError::RootSlot {
            id: item.id.clone(),
            slot: item.slot_id.clone().unwrap_or_else(|| "<none>".to_string()),
        });
    }
    if let Some(limit) = item.purchase_limit()
        && (limit.max == 0 || limit.current > limit.max)
    {
        errors.push(CatalogError::InvalidPurchaseLimit {
            id: item.id.clone(),
            max: limit.max,
            current: limit.current,
        });
    }
}

/// Follow parent links until the root. Dangling links count as reaching it,
/// since they are reported separately.
fn reaches_root(item: &Item, by_id: &HashMap<&str, &Item>) -> bool {
    let mut seen = HashSet::new();
    let mut current = item;
    loop {
        if !seen.insert(current.id.as_str()) {
            return false;
        }
        match current.parent_id.as_deref() {
            None | Some(ROOT_PARENT_ID) => return true,
            Some(parent) => match by_id.get(parent) {
                Some(next) => current = *next,
                None => return true,
            },
        }
    }
}
