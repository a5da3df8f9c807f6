// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative offer file (`db/offers.toml`).
//!
//! ```toml
//! [[simple]]
//! tpl = "5aaa5e60e5b5b000140293d6"
//! stock = 30
//! loyalty = 1
//! currency = "EUR"
//! price = 9
//!
//! [[preset]]
//! preset = "TM_cc7d623412685ff3cdcf3684"
//! stock = 2
//! loyalty = 4
//! currency = "EUR"
//! price = 800
//!
//! [[barter]]
//! id = "Igla"
//! tpl = "5c0d5e4486f77478390952fe"
//! unlimited = true
//! loyalty = 2
//! cost = [[{ tpl = "569668774bdc2da2298b4568", count = 3 }, { tpl = "56dff061d2720bb5668b4567", count = 2 }]]
//! ```

use std::path::Path;
use std::str::FromStr;

use punisher_core::{
    BarterCost, ItemLocale, Money, PresetSource, PunisherError, PurchaseLimit, Stock,
};
use serde::Deserialize;
use tracing::debug;

use crate::builder::{CatalogBuilder, OfferTerms};
use crate::error::CatalogError;

/// Parsed contents of an offers file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OffersFile {
    #[serde(default)]
    pub simple: Vec<SimpleSpec>,
    #[serde(default)]
    pub preset: Vec<PresetSpec>,
    #[serde(default)]
    pub barter: Vec<BarterSpec>,
    #[serde(default)]
    pub item_locale: Vec<ItemLocale>,
}

/// One item sold for a single price.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimpleSpec {
    pub tpl: String,
    /// Catalog id. Defaults to `tpl`.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub unlimited: bool,
    pub loyalty: u32,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub price_tpl: Option<String>,
    pub price: u64,
    #[serde(default)]
    pub buy_limit: Option<u32>,
}

/// A preset (weapon with attachments) sold for a single price.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresetSpec {
    pub preset: String,
    /// Catalog id of the root. Defaults to the preset root's item id.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub unlimited: bool,
    pub loyalty: u32,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub price_tpl: Option<String>,
    pub price: u64,
    #[serde(default)]
    pub buy_limit: Option<u32>,
}

/// One item sold for a barter scheme with one or more offer sets.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BarterSpec {
    pub tpl: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub unlimited: bool,
    pub loyalty: u32,
    pub cost: Vec<Vec<CostSpec>>,
    #[serde(default)]
    pub buy_limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostSpec {
    pub tpl: String,
    pub count: u64,
}

/// `stock = N` or `unlimited = true`.
fn resolve_stock(offer: &str, unlimited: bool, stock: Option<u32>) -> Result<Stock, CatalogError> {
    match (unlimited, stock) {
        (true, _) => Ok(Stock::Unlimited),
        (false, Some(count)) => Ok(Stock::Limited(count)),
        (false, None) => Err(CatalogError::InvalidOffer {
            offer: offer.to_string(),
            message: "set `stock` or `unlimited = true`".to_string(),
        }),
    }
}

/// `currency = "EUR"` or `price_tpl = "<template>"`, plus `price`.
fn resolve_price(
    offer: &str,
    currency: Option<&str>,
    price_tpl: Option<&str>,
    price: u64,
) -> Result<BarterCost, CatalogError> {
    let tpl = match (currency, price_tpl) {
        (Some(code), None) => Money::from_str(code)
            .map_err(|_| CatalogError::UnknownCurrency {
                value: code.to_string(),
            })?
            .template_id()
            .to_string(),
        (None, Some(tpl)) => tpl.to_string(),
        _ => {
            return Err(CatalogError::InvalidOffer {
                offer: offer.to_string(),
                message: "set exactly one of `currency` or `price_tpl`".to_string(),
            });
        }
    };
    Ok(BarterCost::new(tpl, price))
}

fn limit(buy_limit: Option<u32>) -> Option<PurchaseLimit> {
    buy_limit.map(|max| PurchaseLimit { max, current: 0 })
}

fn terms(
    stock: Stock,
    loyalty: u32,
    scheme: Vec<Vec<BarterCost>>,
    buy_limit: Option<u32>,
) -> OfferTerms {
    OfferTerms {
        stock,
        loyalty,
        scheme,
        purchase_limit: limit(buy_limit),
    }
}

impl OffersFile {
    pub fn parse(toml_content: &str, origin: &str) -> Result<Self, PunisherError> {
        toml::from_str(toml_content).map_err(|e| PunisherError::data(origin, e))
    }

    pub fn load(path: &Path) -> Result<Self, PunisherError> {
        let origin = path.display().to_string();
        let content =
            std::fs::read_to_string(path).map_err(|e| PunisherError::data(&origin, e))?;
        Self::parse(&content, &origin)
    }

    pub fn offer_count(&self) -> usize {
        self.simple.len() + self.preset.len() + self.barter.len()
    }

    /// Add every declared offer to `builder`, in file order per table:
    /// simple, then preset, then barter.
    pub fn apply(
        &self,
        builder: &mut CatalogBuilder,
        presets: &dyn PresetSource,
    ) -> Result<(), CatalogError> {
        for spec in &self.simple {
            let id = spec.id.as_deref().unwrap_or(&spec.tpl);
            let stock = resolve_stock(id, spec.unlimited, spec.stock)?;
            let price = resolve_price(
                id,
                spec.currency.as_deref(),
                spec.price_tpl.as_deref(),
                spec.price,
            )?;
            builder.add_simple_offer_with_id(
                id,
                &spec.tpl,
                terms(stock, spec.loyalty, vec![vec![price]], spec.buy_limit),
            )?;
        }

        for spec in &self.preset {
            let items = presets
                .preset_items(&spec.preset)
                .ok_or_else(|| CatalogError::UnknownPreset {
                    preset: spec.preset.clone(),
                })?;
            let offer = spec.id.as_deref().unwrap_or(&spec.preset);
            let stock = resolve_stock(offer, spec.unlimited, spec.stock)?;
            let price = resolve_price(
                offer,
                spec.currency.as_deref(),
                spec.price_tpl.as_deref(),
                spec.price,
            )?;
            let terms = terms(stock, spec.loyalty, vec![vec![price]], spec.buy_limit);
            let root = match &spec.id {
                Some(id) => builder.add_composite_offer_with_id(id, items, terms)?,
                None => builder.add_composite_offer(items, terms)?,
            };
            debug!(preset = %spec.preset, root = %root, "added preset offer");
        }

        for spec in &self.barter {
            let id = spec.id.as_deref().unwrap_or(&spec.tpl);
            let stock = resolve_stock(id, spec.unlimited, spec.stock)?;
            let scheme = spec
                .cost
                .iter()
                .map(|set| {
                    set.iter()
                        .map(|c| BarterCost::new(c.tpl.clone(), c.count))
                        .collect()
                })
                .collect();
            builder.add_simple_offer_with_id(
                id,
                &spec.tpl,
                terms(stock, spec.loyalty, scheme, spec.buy_limit),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::PresetTable;
    use punisher_core::DuplicatePolicy;

    const OFFERS: &str = r#"
[[simple]]
tpl = "5aaa5e60e5b5b000140293d6"
stock = 30
loyalty = 1
currency = "EUR"
price = 9

[[simple]]
tpl = "569668774bdc2da2298b4568"
unlimited = true
loyalty = 1
currency = "usd"
price = 1

[[preset]]
preset = "p1"
stock = 2
loyalty = 4
currency = "EUR"
price = 800
buy_limit = 1

[[barter]]
id = "Igla"
tpl = "5c0d5e4486f77478390952fe"
unlimited = true
loyalty = 2
cost = [[{ tpl = "569668774bdc2da2298b4568", count = 3 }, { tpl = "56dff061d2720bb5668b4567", count = 2 }]]

[[item_locale]]
tpl = "custom_tpl"
name = "Punisher HK416"
short_name = "HK416P"
"#;

    fn presets() -> PresetTable {
        PresetTable::parse_json(
            r#"{ "ItemPresets": { "p1": { "_id": "p1", "_items": [
                { "_id": "root", "_tpl": "5bb2475ed4351e00853264e3" },
                { "_id": "mag", "_tpl": "5c05413a0db834001c390617", "parentId": "root", "slotId": "mod_magazine" }
            ] } } }"#,
            "presets.json",
        )
        .unwrap()
    }

    #[test]
    fn parses_every_table() {
        let offers = OffersFile::parse(OFFERS, "offers.toml").unwrap();
        assert_eq!(offers.simple.len(), 2);
        assert_eq!(offers.preset.len(), 1);
        assert_eq!(offers.barter.len(), 1);
        assert_eq!(offers.item_locale.len(), 1);
        assert_eq!(offers.offer_count(), 4);
        assert!(offers.simple[1].unlimited);
        assert_eq!(offers.barter[0].cost[0].len(), 2);
    }

    #[test]
    fn applies_offers_to_builder() {
        let offers = OffersFile::parse(OFFERS, "offers.toml").unwrap();
        let mut builder = CatalogBuilder::new(DuplicatePolicy::Reject);
        offers.apply(&mut builder, &presets()).unwrap();
        let (catalog, report) = builder.build().unwrap();

        assert_eq!(report.top_level_items, 4);
        assert_eq!(catalog.items.len(), 5);
        assert_eq!(
            catalog.barter_scheme["5aaa5e60e5b5b000140293d6"],
            vec![vec![BarterCost::new(Money::Euros.template_id(), 9)]]
        );
        assert_eq!(catalog.loyal_level_items["root"], 4);
        assert_eq!(
            catalog.item("root").unwrap().purchase_limit(),
            Some(PurchaseLimit { max: 1, current: 0 })
        );
        assert_eq!(catalog.barter_scheme["Igla"][0].len(), 2);
        assert!(report.non_currency_payments.contains("56dff061d2720bb5668b4567"));
    }

    #[test]
    fn unknown_preset_is_reported() {
        let offers = OffersFile::parse(
            "[[preset]]\npreset = \"missing\"\nstock = 1\nloyalty = 1\ncurrency = \"EUR\"\nprice = 1\n",
            "offers.toml",
        )
        .unwrap();
        let mut builder = CatalogBuilder::default();
        let err = offers.apply(&mut builder, &presets()).unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownPreset {
                preset: "missing".into()
            }
        );
    }

    #[test]
    fn unknown_currency_is_reported() {
        let offers = OffersFile::parse(
            "[[simple]]\ntpl = \"t\"\nstock = 1\nloyalty = 1\ncurrency = \"BTC\"\nprice = 1\n",
            "offers.toml",
        )
        .unwrap();
        let err = offers
            .apply(&mut CatalogBuilder::default(), &presets())
            .unwrap_err();
        assert_eq!(err, CatalogError::UnknownCurrency { value: "BTC".into() });
    }

    #[test]
    fn missing_stock_is_reported() {
        let offers = OffersFile::parse(
            "[[simple]]\ntpl = \"t\"\nloyalty = 1\ncurrency = \"EUR\"\nprice = 1\n",
            "offers.toml",
        )
        .unwrap();
        let err = offers
            .apply(&mut CatalogBuilder::default(), &presets())
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidOffer { .. }));
    }

    #[test]
    fn currency_and_price_tpl_together_are_rejected() {
        let offers = OffersFile::parse(
            "[[simple]]\ntpl = \"t\"\nstock = 1\nloyalty = 1\ncurrency = \"EUR\"\nprice_tpl = \"x\"\nprice = 1\n",
            "offers.toml",
        )
        .unwrap();
        let err = offers
            .apply(&mut CatalogBuilder::default(), &presets())
            .unwrap_err();
        assert!(err.to_string().contains("exactly one"));
    }

    #[test]
    fn unknown_table_is_rejected() {
        let err = OffersFile::parse("[[bogus]]\nx = 1\n", "db/offers.toml").unwrap_err();
        assert!(err.to_string().contains("db/offers.toml"));
    }

    #[test]
    fn same_preset_twice_needs_distinct_ids() {
        let toml = r#"
[[preset]]
preset = "p1"
id = "g36_short"
stock = 1
loyalty = 1
currency = "EUR"
price = 100

[[preset]]
preset = "p1"
id = "g36_long"
stock = 1
loyalty = 2
currency = "EUR"
price = 200
"#;
        let offers = OffersFile::parse(toml, "offers.toml").unwrap();
        let mut builder = CatalogBuilder::default();
        offers.apply(&mut builder, &presets()).unwrap();
        let (catalog, _) = builder.build().unwrap();
        assert_eq!(catalog.items.len(), 4);
        assert_eq!(catalog.loyal_level_items["g36_long"], 2);
    }
}
