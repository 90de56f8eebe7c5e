mod common;

use common::fixture_store;
use tco_calculator::asset::AssetType;
use tco_calculator::coefficients::{
    lookup_or_default, CoefficientError, CoefficientStore, RateTable,
};
use tco_calculator::energy::{norm_energy, EnergyType};

#[test]
fn energy_aliases_are_case_insensitive() {
    assert_eq!(EnergyType::parse("fcev"), EnergyType::Fcet);
    assert_eq!(EnergyType::parse("FCET"), EnergyType::Fcet);
    assert_eq!(EnergyType::parse(" Bio_Diesel "), EnergyType::Biodiesel);
    assert_eq!(EnergyType::parse("eDiesel"), EnergyType::EDiesel);
    assert_eq!(EnergyType::parse(""), EnergyType::Diesel);
    assert_eq!(norm_energy("ammonia"), "AMMONIA");
    assert_eq!(norm_energy("e_diesel"), "E_DIESEL");
}

#[test]
fn energy_serializes_as_normalized_key() {
    let e: EnergyType = serde_json::from_str("\"hvo\"").expect("energy");
    assert_eq!(e, EnergyType::Hvo);
    assert_eq!(serde_json::to_string(&e).expect("json"), "\"HVO\"");
}

#[test]
fn asset_type_parse() {
    assert_eq!(AssetType::parse("Truck"), Some(AssetType::Truck));
    assert_eq!(AssetType::parse("ship"), Some(AssetType::Ship));
    assert_eq!(AssetType::parse("barge"), None);
    assert_eq!(AssetType::Ship.table_name("rv"), "rv_ship");
}

#[test]
fn lookup_falls_back_to_default_then_number() {
    let mut table = RateTable::new();
    table.insert("BEV".to_string(), 0.1);
    assert_eq!(lookup_or_default(&table, "BEV", 9.0), 0.1);
    assert_eq!(lookup_or_default(&table, "DIESEL", 9.0), 9.0);
    table.insert("DEFAULT".to_string(), 0.5);
    assert_eq!(lookup_or_default(&table, "DIESEL", 9.0), 0.5);
}

#[test]
fn external_factors_default_when_table_missing() {
    let store = fixture_store();
    let testland = store.country("Testland").expect("testland");
    let ef = testland.external_factors(AssetType::Ship);
    assert_eq!(ef.energy_growth_rate, 0.04);
    assert_eq!(ef.subsidy_factor, 0.30);
    assert_eq!(ef.min_external_factor, 0.85);
    assert_eq!(ef.max_external_factor, 1.15);
    assert!(ef.energy_price_factor.is_empty());

    let truck = testland.external_factors(AssetType::Truck);
    assert_eq!(truck.max_external_factor, 1.1);
}

#[test]
fn energy_price_lookups() {
    let store = fixture_store();
    let testland = store.country("Testland").expect("testland");
    assert_eq!(testland.reference_energy_price(&EnergyType::Lng), 0.0);
    assert_eq!(testland.require_energy_price(&EnergyType::Bev).expect("bev"), 0.25);
    assert!(matches!(
        testland.require_energy_price(&EnergyType::Lng),
        Err(CoefficientError::EnergyNotFound { .. })
    ));
}

#[test]
fn subsidy_lookup_never_fails() {
    let store = fixture_store();
    let testland = store.country("Testland").expect("testland");
    assert_eq!(testland.vehicle_subsidy("2025", "small", &EnergyType::Bev), 10_000.0);
    assert_eq!(testland.vehicle_subsidy("2025", "large", &EnergyType::Bev), 0.0);
    assert_eq!(testland.vehicle_subsidy("2025", "small", &EnergyType::Diesel), 0.0);
    assert_eq!(testland.infrastructure_subsidy_rate("2025", "medium"), 0.0);
    let bare = store.country("Bareland").expect("bareland");
    assert_eq!(bare.vehicle_subsidy("2025", "medium", &EnergyType::Bev), 0.0);
}

#[test]
fn missing_country_and_tables_fail() {
    let store = fixture_store();
    assert!(matches!(
        store.country("Atlantis"),
        Err(CoefficientError::CountryNotFound(_))
    ));
    let bare = store.country("Bareland").expect("bareland");
    assert!(bare.capex(AssetType::Ship).is_err());
    assert!(bare.truck_opex().is_err());
    assert!(bare.ship_opex().is_err());
}

#[test]
fn invalid_documents_and_paths() {
    assert!(matches!(
        CoefficientStore::from_json_str("{ not json"),
        Err(CoefficientError::Parse(_))
    ));
    let empty = CoefficientStore::from_json_str("{}").expect("empty");
    assert!(empty.is_empty());
    assert!(matches!(
        CoefficientStore::load("does/not/exist.json"),
        Err(CoefficientError::Io { .. })
    ));
}

#[test]
fn duplicate_country_last_wins() {
    let store = CoefficientStore::from_json_str(
        r#"{ "countries": [
            { "country": "X", "energy": { "energy_price_c_e": { "DIESEL": 1.0 } } },
            { "country": "X", "energy": { "energy_price_c_e": { "DIESEL": 2.0 } } }
        ] }"#,
    )
    .expect("store");
    assert_eq!(store.len(), 1);
    let x = store.country("X").expect("x");
    assert_eq!(x.reference_energy_price(&EnergyType::Diesel), 2.0);
}
