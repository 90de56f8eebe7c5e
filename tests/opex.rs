mod common;

use common::{assert_close, fixture_store};
use serde_json::json;
use tco_calculator::coefficients::CoefficientError;
use tco_calculator::opex::{
    OpexBreakdown, ShipOpexCalculator, ShipOpexInput, TruckOpexCalculator, TruckOpexInput,
};

fn truck_input() -> TruckOpexInput {
    serde_json::from_value(json!({
        "purchase_price": 100000.0,
        "type_energy": "diesel",
        "registration_country": "Testland",
        "vehicle_weight_class": "light",
        "vehicle_number": 2,
        "annual_distance_km": 50000.0,
        "energy_consumption_kwh_per_km": 3.0,
        "toll_road_share": 0.5
    }))
    .expect("truck opex input")
}

fn ship_input() -> ShipOpexInput {
    serde_json::from_value(json!({
        "purchase_price": 500000.0,
        "GT": 100.0,
        "consumption_energy": 100000.0,
        "crew_count": 3.0,
        "fuel_mass_kg": 10000.0,
        "days_in_port_per_year": 100.0,
        "ship_class": "fishing_small",
        "registration_country": "Testland",
        "type_energy": "DIESEL"
    }))
    .expect("ship opex input")
}

#[test]
fn truck_breakdown_scales_with_fleet() {
    let store = fixture_store();
    let res = TruckOpexCalculator::new(&store)
        .compute(&truck_input())
        .expect("truck opex");
    let OpexBreakdown::Truck(b) = res.breakdown else {
        panic!("expected truck breakdown");
    };
    assert_close("taxes", b.taxes, 800.0, 1e-12);
    assert_close("insurance", b.insurance, 4_000.0, 1e-12);
    assert_close("maintenance", b.maintenance, 10_000.0, 1e-12);
    assert_close("energy", b.energy, 60_000.0, 1e-12);
    assert_close("tolls", b.tolls, 5_000.0, 1e-12);
    assert_close("driver", b.driver, 80_000.0, 1e-12);
    assert_close("total", res.opex_total, 159_800.0, 1e-12);
}

#[test]
fn truck_explicit_maintenance_and_driver_cost() {
    let store = fixture_store();
    let mut inp = truck_input();
    inp.vehicle_number = 1;
    inp.maintenance_cost = 7_500.0;
    inp.driver_annual_cost = Some(30_000.0);
    let res = TruckOpexCalculator::new(&store).compute(&inp).expect("truck opex");
    let OpexBreakdown::Truck(b) = res.breakdown else {
        panic!("expected truck breakdown");
    };
    assert_eq!(b.maintenance, 7_500.0);
    assert_eq!(b.driver, 30_000.0);
}

#[test]
fn truck_energy_without_price_fails() {
    let store = fixture_store();
    let mut inp = truck_input();
    inp.type_energy = "hvo".into();
    let err = TruckOpexCalculator::new(&store).compute(&inp).unwrap_err();
    assert!(matches!(err, CoefficientError::EnergyNotFound { ref energy, .. } if energy == "HVO"));
}

#[test]
fn ship_insurance_uses_residual_value() {
    let store = fixture_store();
    let calc = ShipOpexCalculator::new(&store);
    let with_rv = calc.compute(&ship_input(), 300_000.0).expect("ship opex");
    let OpexBreakdown::Ship(b) = with_rv.breakdown else {
        panic!("expected ship breakdown");
    };
    assert_close("taxes", b.taxes, 1_200.0, 1e-12);
    assert_close("ports", b.ports, 5_000.0, 1e-12);
    assert_close("insurance", b.insurance, 3_500.0, 1e-12);
    assert_close("crew", b.crew, 108_000.0, 1e-12);
    assert_close("maintenance", b.maintenance, 10_000.0, 1e-12);
    assert_close("energy", b.energy, 20_000.0, 1e-12);
    assert_close("total", with_rv.opex_total, 147_700.0, 1e-12);

    let without_rv = calc.compute(&ship_input(), 0.0).expect("ship opex");
    let OpexBreakdown::Ship(b) = without_rv.breakdown else {
        panic!("expected ship breakdown");
    };
    assert_close("insurance", b.insurance, 5_500.0, 1e-12);
}

#[test]
fn ship_ports_follow_operating_country() {
    let store = fixture_store();
    let mut inp = ship_input();
    inp.country_oper = Some("Portland".to_string());
    inp.crew_monthly_total = 12_000.0;
    let res = ShipOpexCalculator::new(&store)
        .compute(&inp, 300_000.0)
        .expect("ship opex");
    let OpexBreakdown::Ship(b) = res.breakdown else {
        panic!("expected ship breakdown");
    };
    assert_close("ports", b.ports, 10_000.0, 1e-12);
    assert_close("crew", b.crew, 144_000.0, 1e-12);
}

#[test]
fn ship_unknown_operating_country_fails() {
    let store = fixture_store();
    let mut inp = ship_input();
    inp.country_oper = Some("Atlantis".to_string());
    let err = ShipOpexCalculator::new(&store)
        .compute(&inp, 0.0)
        .unwrap_err();
    assert!(matches!(err, CoefficientError::CountryNotFound(_)));
}

#[test]
fn breakdown_keys_differ_by_asset() {
    let store = fixture_store();
    let truck = TruckOpexCalculator::new(&store)
        .compute(&truck_input())
        .expect("truck");
    let ship = ShipOpexCalculator::new(&store)
        .compute(&ship_input(), 1.0)
        .expect("ship");
    let truck_json = serde_json::to_value(&truck).expect("json");
    let ship_json = serde_json::to_value(&ship).expect("json");
    assert_eq!(truck_json["breakdown"]["asset_type"], "truck");
    assert!(truck_json["breakdown"].get("tolls").is_some());
    assert!(truck_json["breakdown"].get("ports").is_none());
    assert_eq!(ship_json["breakdown"]["asset_type"], "ship");
    assert!(ship_json["breakdown"].get("ports").is_some());
    assert!(ship_json["breakdown"].get("driver").is_none());
}
