// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end hook tests against the in-memory host.

use punisher_config::DEFAULT_DESCRIPTION;
use punisher_core::{PunisherError, Stock, ROOT_PARENT_ID};
use punisher_plugin::{PostDbContext, PreLoadContext, PunisherMod, Stage};
use punisher_test_utils::{host_preset_items, MockHost, ModFixture, HOST_PRESET_ID, TRADER_ID};

fn host_for(fixture: &ModFixture) -> MockHost {
    MockHost::new(fixture.path()).with_preset(HOST_PRESET_ID, host_preset_items())
}

fn pre_load(punisher: &mut PunisherMod, host: &mut MockHost) -> Result<(), PunisherError> {
    punisher.pre_load(&mut PreLoadContext {
        loader: &host.loader,
        images: &mut host.images,
        config: &mut host.config,
    })
}

fn post_db_load(punisher: &mut PunisherMod, host: &mut MockHost) -> Result<(), PunisherError> {
    punisher.post_db_load(&mut PostDbContext {
        traders: &mut host.traders,
        locales: &mut host.locales,
        presets: &host.presets,
    })
}

fn load(fixture: &ModFixture) -> (PunisherMod, MockHost) {
    let mut host = host_for(fixture);
    let mut punisher = PunisherMod::new("punisher");
    pre_load(&mut punisher, &mut host).unwrap();
    post_db_load(&mut punisher, &mut host).unwrap();
    (punisher, host)
}

#[test]
fn pre_load_registers_avatar_timing_and_enum() {
    let fixture = ModFixture::new().unwrap();
    let mut host = host_for(&fixture);
    let mut punisher = PunisherMod::new("punisher");
    pre_load(&mut punisher, &mut host).unwrap();

    assert_eq!(host.images.routes.len(), 1);
    let (route, file) = &host.images.routes[0];
    assert_eq!(route, "/files/trader/avatar/punisher");
    assert_eq!(file, &fixture.join("res/punisher.jpg"));

    assert_eq!(host.config.update_times.len(), 1);
    assert_eq!(host.config.update_times[0].trader_id, TRADER_ID);
    assert_eq!(host.config.update_times[0].seconds.min, 3600);
    assert_eq!(host.config.update_times[0].seconds.max, 4000);
    assert_eq!(host.config.trader_enum[TRADER_ID], TRADER_ID);
    assert!(!host.config.flea_market[TRADER_ID]);

    // Nothing reaches the database until the second hook.
    assert!(host.traders.records.is_empty());
    assert!(host.locales.tables["en"].is_empty());
}

#[test]
fn post_db_load_writes_record_and_locales() {
    let fixture = ModFixture::new().unwrap();
    let (punisher, host) = load(&fixture);
    assert_eq!(punisher.stage(), Stage::Loaded);

    let record = &host.traders.records[TRADER_ID];
    assert_eq!(record.assort.top_level_items().count(), 5);
    assert_eq!(record.assort.items.len(), 9);
    assert_eq!(record.assort.next_resupply, 0);
    assert_eq!(record.base.nickname, "Punisher");

    let ammo = record.assort.item("54527a984bdc2d4e668b4567").unwrap();
    assert_eq!(ammo.stock(), Some(Stock::Unlimited));
    assert_eq!(ammo.purchase_limit().map(|l| l.max), Some(300));

    // The local preset keeps its root id; the host preset is copied.
    let rifle = record.assort.item("pun_hk416").unwrap();
    assert_eq!(rifle.parent_id.as_deref(), Some(ROOT_PARENT_ID));
    assert_eq!(record.assort.subtree_ids("pun_hk416").len(), 3);
    assert_eq!(host.presets.presets[HOST_PRESET_ID], host_preset_items());

    let json = host.trader_json(TRADER_ID).unwrap();
    assert_eq!(json["base"]["balance_dol"], 1000000);
    assert!(json["questassort"]["success"].as_object().unwrap().is_empty());

    for locale in ["en", "ru"] {
        let key = |field: &str| format!("{TRADER_ID} {field}");
        assert_eq!(host.locales.get(locale, &key("FullName")), Some("Frank Castle"));
        assert_eq!(host.locales.get(locale, &key("FirstName")), Some("Punisher"));
        assert_eq!(host.locales.get(locale, &key("Nickname")), Some("Punisher"));
        assert_eq!(host.locales.get(locale, &key("Location")), Some("Shoreline"));
        assert_eq!(host.locales.get(locale, &key("Description")), Some(DEFAULT_DESCRIPTION));
        assert_eq!(
            host.locales.get(locale, "5bb2475ed4351e00853264e3 ShortName"),
            Some("HK416P")
        );
    }
}

#[test]
fn configured_descriptions_override_the_profile() {
    let fixture = ModFixture::new()
        .unwrap()
        .with_config(
            "[trader]\nfirst_name = \"Frank\"\ndescription = \"Ex-marine.\"\n\n[trader.localized_descriptions]\nru = \"Бывший морпех.\"\n",
        )
        .unwrap();
    let (_, host) = load(&fixture);
    let key = format!("{TRADER_ID} Description");
    assert_eq!(host.locales.get("en", &key), Some("Ex-marine."));
    assert_eq!(host.locales.get("ru", &key), Some("Бывший морпех."));
    assert_eq!(
        host.locales.get("ru", &format!("{TRADER_ID} FirstName")),
        Some("Frank")
    );
}

#[test]
fn empty_configured_description_uses_the_profile() {
    let fixture = ModFixture::new()
        .unwrap()
        .with_config("[trader]\ndescription = \"\"\n")
        .unwrap();
    let (_, host) = load(&fixture);
    assert_eq!(
        host.locales.get("en", &format!("{TRADER_ID} Description")),
        Some("A former marine with a bunker on the shore.")
    );
}

#[test]
fn post_db_load_before_pre_load_is_a_lifecycle_error() {
    let fixture = ModFixture::new().unwrap();
    let mut host = host_for(&fixture);
    let mut punisher = PunisherMod::new("punisher");

    let err = post_db_load(&mut punisher, &mut host).unwrap_err();
    assert!(matches!(err, PunisherError::Lifecycle(_)));
    assert!(host.traders.records.is_empty());
}

#[test]
fn hooks_do_not_run_twice() {
    let fixture = ModFixture::new().unwrap();
    let (mut punisher, mut host) = load(&fixture);
    let err = post_db_load(&mut punisher, &mut host).unwrap_err();
    assert!(matches!(err, PunisherError::Lifecycle(_)));
    assert_eq!(host.traders.inserts, 1);
}

#[test]
fn host_failure_in_pre_load_propagates() {
    let fixture = ModFixture::new().unwrap();
    let mut host = host_for(&fixture).failing("ConfigServer", "config locked");
    let mut punisher = PunisherMod::new("punisher");

    let err = pre_load(&mut punisher, &mut host).unwrap_err();
    match err {
        PunisherError::HostIntegration { service, message, .. } => {
            assert_eq!(service, "ConfigServer");
            assert_eq!(message, "config locked");
        }
        other => panic!("expected HostIntegration, got {other:?}"),
    }
    assert_eq!(punisher.stage(), Stage::Created);
    // The avatar route went in before the failing call.
    assert_eq!(host.images.routes.len(), 1);

    let err = post_db_load(&mut punisher, &mut host).unwrap_err();
    assert!(matches!(err, PunisherError::Lifecycle(_)));
}

#[test]
fn missing_mod_directory_fails_fast() {
    let fixture = ModFixture::new().unwrap();
    let mut host = host_for(&fixture).failing("ModLoader", "unknown mod");
    let mut punisher = PunisherMod::new("punisher");
    let err = pre_load(&mut punisher, &mut host).unwrap_err();
    assert!(matches!(
        err,
        PunisherError::HostIntegration {
            service: "ModLoader",
            ..
        }
    ));
    assert!(host.images.routes.is_empty());
    assert!(host.config.update_times.is_empty());
}

#[test]
fn locale_failure_after_record_write_propagates() {
    let fixture = ModFixture::new().unwrap();
    let mut host = host_for(&fixture);
    let mut punisher = PunisherMod::new("punisher");
    pre_load(&mut punisher, &mut host).unwrap();

    host.locales.fail_with = Some("locale table is read-only".into());
    let err = post_db_load(&mut punisher, &mut host).unwrap_err();
    assert!(err.to_string().contains("locale table is read-only"));
    assert_eq!(punisher.stage(), Stage::PreLoaded);
}

#[test]
fn invalid_catalog_writes_nothing() {
    let fixture = ModFixture::new()
        .unwrap()
        .with_offers(
            r#"
[[simple]]
tpl = "5aaa5e60e5b5b000140293d6"
stock = 0
loyalty = 1
currency = "EUR"
price = 9
"#,
        )
        .unwrap();
    let mut host = host_for(&fixture);
    let mut punisher = PunisherMod::new("punisher");
    pre_load(&mut punisher, &mut host).unwrap();

    let err = post_db_load(&mut punisher, &mut host).unwrap_err();
    assert!(matches!(err, PunisherError::Validation(_)));
    assert!(host.traders.records.is_empty());
    assert!(host.locales.tables.values().all(|table| table.is_empty()));
}

#[test]
fn duplicate_offer_policy_comes_from_config() {
    let offers = r#"
[[simple]]
tpl = "5aaa5e60e5b5b000140293d6"
stock = 10
loyalty = 1
currency = "EUR"
price = 9

[[simple]]
tpl = "5aaa5e60e5b5b000140293d6"
stock = 20
loyalty = 2
currency = "USD"
price = 12
"#;
    let rejecting = ModFixture::new().unwrap().with_offers(offers).unwrap();
    let mut host = host_for(&rejecting);
    let mut punisher = PunisherMod::new("punisher");
    pre_load(&mut punisher, &mut host).unwrap();
    assert!(post_db_load(&mut punisher, &mut host).is_err());

    let overwriting = ModFixture::new()
        .unwrap()
        .with_offers(offers)
        .unwrap()
        .with_config("[catalog]\nduplicate_policy = \"overwrite\"\n")
        .unwrap();
    let (_, host) = load(&overwriting);
    let assort = &host.traders.records[TRADER_ID].assort;
    assert_eq!(assort.items.len(), 1);
    assert_eq!(assort.loyal_level_items["5aaa5e60e5b5b000140293d6"], 2);
    assert_eq!(
        assort.item("5aaa5e60e5b5b000140293d6").unwrap().stock(),
        Some(Stock::Limited(20))
    );
}

#[test]
fn prebuilt_assort_source_is_loaded_and_validated() {
    let fixture = ModFixture::new()
        .unwrap()
        .with_config("[catalog]\nsource = \"assort\"\nstrict_completeness = true\n")
        .unwrap()
        .with_assort(
            r#"{
                "nextResupply": 0,
                "items": [
                    { "_id": "knife", "_tpl": "57e26fc7245977162a14b800",
                      "parentId": "hideout", "slotId": "hideout",
                      "upd": { "UnlimitedCount": false, "StackObjectsCount": 4 } }
                ],
                "barter_scheme": { "knife": [[ { "_tpl": "5449016a4bdc2d6f028b456f", "count": 12000 } ]] },
                "loyal_level_items": { "knife": 1 }
            }"#,
        )
        .unwrap();
    let (_, host) = load(&fixture);
    let assort = &host.traders.records[TRADER_ID].assort;
    assert_eq!(assort.items.len(), 1);
    assert_eq!(assort.item("knife").unwrap().stock(), Some(Stock::Limited(4)));
}
