// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog construction and validation for the Punisher trader.
//!
//! A catalog comes from one of two places: offer declarations applied to a
//! [`CatalogBuilder`] (programmatically or from `db/offers.toml`), or a
//! pre-built `db/assort.json` in host wire format. Either way it goes
//! through [`validate_catalog`] before the host ever sees it.
//!
//! # Usage
//!
//! ```no_run
//! use punisher_assort::{CatalogBuilder, OfferTerms};
//! use punisher_core::{DuplicatePolicy, Money, Stock};
//!
//! let mut builder = CatalogBuilder::new(DuplicatePolicy::Reject);
//! builder
//!     .add_simple_offer(
//!         "5aaa5e60e5b5b000140293d6",
//!         OfferTerms::priced(Stock::Limited(30), 1, Money::Euros.template_id(), 9),
//!     )
//!     .expect("valid offer");
//! let (catalog, report) = builder.build().expect("valid catalog");
//! println!("{} items, {} warnings", catalog.items.len(), report.warnings.len());
//! ```

pub mod builder;
pub mod error;
pub mod offers;
pub mod preset;
pub mod source;
pub mod validation;
pub mod walk;

pub use builder::{CatalogBuilder, OfferTerms};
pub use error::{summarize, CatalogError};
pub use offers::OffersFile;
pub use preset::{Preset, PresetChain, PresetTable};
pub use source::{load_assort, load_profile, parse_assort, parse_profile};
pub use validation::{validate_catalog, ValidationOptions, ValidationReport};
pub use walk::{collect_files, walk_files, WalkOptions, DEFAULT_MAX_DEPTH};
