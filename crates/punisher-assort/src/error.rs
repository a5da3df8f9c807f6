// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog validation errors.
//!
//! Every variant names the offending item or offer id so a hand-authored
//! data file can be fixed without a debugger.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::Diagnostic;
use thiserror::Error;

/// A structural or input violation found while building or validating a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum CatalogError {
    #[error("offer `{offer}` has an empty template id")]
    #[diagnostic(code(punisher::catalog::empty_template))]
    EmptyTemplate { offer: String },

    #[error("offer `{id}` has limited stock of 0")]
    #[diagnostic(
        code(punisher::catalog::zero_stock),
        help("use `unlimited = true` or a stock of at least 1")
    )]
    ZeroStock { id: String },

    #[error("offer `{id}` is not stamped with trader stock")]
    #[diagnostic(code(punisher::catalog::missing_stock))]
    MissingStock { id: String },

    #[error("offer `{id}` stocks {count} units, more than a trader can hold")]
    #[diagnostic(
        code(punisher::catalog::stock_out_of_range),
        help("stock counts must fit in 32 bits; use `unlimited = true` for endless stock")
    )]
    StockOutOfRange { id: String, count: u64 },

    #[error("offer `{id}` sits in slot `{slot}` instead of `hideout`")]
    #[diagnostic(code(punisher::catalog::root_slot))]
    RootSlot { id: String, slot: String },

    #[error("offer `{id}` has loyalty level 0")]
    #[diagnostic(code(punisher::catalog::zero_loyalty), help("loyalty levels start at 1"))]
    ZeroLoyalty { id: String },

    #[error("offer `{id}` charges 0 of `{tpl}`")]
    #[diagnostic(code(punisher::catalog::zero_price))]
    ZeroPrice { id: String, tpl: String },

    #[error("offer `{id}` has no offer sets")]
    #[diagnostic(code(punisher::catalog::empty_scheme))]
    EmptyScheme { id: String },

    #[error("offer `{id}` has an empty offer set at index {index}")]
    #[diagnostic(code(punisher::catalog::empty_offer_set))]
    EmptyOfferSet { id: String, index: usize },

    #[error("offer `{id}` has purchase limit {current}/{max}")]
    #[diagnostic(
        code(punisher::catalog::invalid_purchase_limit),
        help("the limit must be at least 1 and the current count may not exceed it")
    )]
    InvalidPurchaseLimit { id: String, max: u32, current: u32 },

    #[error("composite offer has no items")]
    #[diagnostic(code(punisher::catalog::empty_composite))]
    EmptyComposite,

    #[error("id `{id}` is already used in the catalog")]
    #[diagnostic(
        code(punisher::catalog::duplicate_id),
        help("give the offer an explicit `id`, or set `catalog.duplicate_policy = \"overwrite\"`")
    )]
    DuplicateId { id: String },

    #[error("item id `{id}` appears {count} times in the catalog")]
    #[diagnostic(code(punisher::catalog::duplicate_item_id))]
    DuplicateItemId { id: String, count: usize },

    #[error("item `{id}` has no parentId")]
    #[diagnostic(code(punisher::catalog::missing_parent))]
    MissingParent { id: String },

    #[error("item `{id}` references parent `{parent}`, which is not in the catalog")]
    #[diagnostic(code(punisher::catalog::dangling_parent), help("check the parentId for typos"))]
    DanglingParent { id: String, parent: String },

    #[error("item `{id}` never reaches the root: its parent chain loops")]
    #[diagnostic(code(punisher::catalog::parent_cycle))]
    ParentCycle { id: String },

    #[error("attachment `{id}` carries trader stock or a purchase limit")]
    #[diagnostic(
        code(punisher::catalog::child_stock),
        help("stock and purchase limits belong on the top-level item only")
    )]
    ChildCarriesStock { id: String },

    #[error("barter scheme keyed `{id}` does not name a top-level item")]
    #[diagnostic(code(punisher::catalog::orphan_barter))]
    OrphanBarter { id: String },

    #[error("loyalty entry keyed `{id}` does not name a top-level item")]
    #[diagnostic(code(punisher::catalog::orphan_loyalty))]
    OrphanLoyalty { id: String },

    #[error("top-level item `{id}` has no barter scheme")]
    #[diagnostic(code(punisher::catalog::missing_barter), severity(Warning))]
    MissingBarter { id: String },

    #[error("top-level item `{id}` has no loyalty level")]
    #[diagnostic(code(punisher::catalog::missing_loyalty), severity(Warning))]
    MissingLoyalty { id: String },

    #[error("preset `{preset}` is not defined by the mod or the host")]
    #[diagnostic(code(punisher::catalog::unknown_preset))]
    UnknownPreset { preset: String },

    #[error("preset `{preset}` is malformed: {message}")]
    #[diagnostic(code(punisher::catalog::malformed_preset))]
    MalformedPreset { preset: String, message: String },

    #[error("unknown currency `{value}`")]
    #[diagnostic(
        code(punisher::catalog::unknown_currency),
        help("expected one of RUB, USD, EUR, GP, or set `price_tpl` to a template id")
    )]
    UnknownCurrency { value: String },

    #[error("offer `{offer}` is invalid: {message}")]
    #[diagnostic(code(punisher::catalog::invalid_offer))]
    InvalidOffer { offer: String, message: String },
}

/// Render a list of catalog errors as a single line for [`punisher_core::PunisherError::Validation`].
pub fn summarize(errors: &[CatalogError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
