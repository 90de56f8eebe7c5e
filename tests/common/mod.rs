#![allow(dead_code)]

use serde_json::{json, Value};
use tco_calculator::coefficients::CoefficientStore;

pub fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

/// 테스트용 국가 "Testland"(모든 표 보유), "Portland"(선박 OPEX만), "Bareland"(빈 국가).
pub fn fixture_document() -> Value {
    json!({
        "countries": [
            {
                "country": "Testland",
                "rv_ship": {
                    "fishing_small": {
                        "depr_rate_per_year": { "DEFAULT": 0.06 },
                        "depr_rate_per_unit": { "DEFAULT": 0.0 },
                        "obsolescence_rate": { "DEFAULT": 0.02 }
                    },
                    "incomplete": {
                        "depr_rate_per_year": { "DEFAULT": 0.06 }
                    }
                },
                "rv_truck": {
                    "light": {
                        "depr_rate_per_year": { "DIESEL": 0.08, "DEFAULT": 0.1 },
                        "depr_rate_per_unit": { "DEFAULT": 0.000001 },
                        "obsolescence_rate": { "DEFAULT": 0.03 },
                        "maint_depr_coef": 0.5
                    }
                },
                "external_factors_truck": {
                    "energy_growth_rate": 0.05,
                    "energy_price_factor": { "DIESEL": -0.5 },
                    "co2_factor": { "DIESEL": -0.02 },
                    "subsidy_factor": 0.3,
                    "min_external_factor": 0.9,
                    "max_external_factor": 1.1
                },
                "capex_truck": {
                    "acquisition_tax_rate": 0.1,
                    "registration_tax": { "light": 500.0, "DEFAULT": 300.0 },
                    "used_vehicle_tax_factor": 0.5,
                    "loan_interest_rate": 0.0,
                    "installation_fraction": 0.1,
                    "charger_cost": { "slow": 1000.0, "fast": 10000.0, "ultra": 50000.0 },
                    "charger_grid_cost": { "slow": 500.0, "fast": 5000.0, "ultra": 20000.0 },
                    "chargers_per_vehicle": { "slow": 1.0, "fast": 0.25, "ultra": 0.0 },
                    "smart_charging_grid_reduction": 0.2,
                    "station_cost": { "FCET": 1000000.0 }
                },
                "capex_ship": {
                    "registration_tax": { "DEFAULT": 2000.0 },
                    "loan_interest_rate": 0.05,
                    "installation_fraction": 0.1,
                    "shore_power_cost": 100000.0,
                    "shore_grid_cost": 50000.0
                },
                "opex_truck": {
                    "annual_road_tax": { "light": 400.0 },
                    "insurance_rate": 0.02,
                    "maintenance_per_km": { "DIESEL": 0.1 },
                    "toll_rate_per_km": { "light": 0.1 },
                    "driver_annual_cost": 40000.0
                },
                "opex_ship": {
                    "tonnage_tax_per_gt": 2.0,
                    "fuel_tax_per_kg": { "DIESEL": 0.1 },
                    "port_fee_per_gt_day": 0.5,
                    "hull_insurance_rate": 0.01,
                    "pi_insurance_per_gt": 5.0,
                    "crew_monthly_wage": 3000.0,
                    "maintenance_rate": 0.02
                },
                "energy": {
                    "energy_price_c_e": { "DIESEL": 0.2, "BEV": 0.25 }
                },
                "subsidies": {
                    "2025": {
                        "small": {
                            "vehicle_subsidies": { "BEV": 10000.0 },
                            "infrastructure_subsidy_rate": 0.5
                        },
                        "medium": {
                            "vehicle_subsidies": { "BEV": 20000.0 }
                        }
                    }
                }
            },
            {
                "country": "Portland",
                "opex_ship": { "port_fee_per_gt_day": 1.0 }
            },
            {
                "country": "Bareland"
            }
        ]
    })
}

pub fn fixture_store() -> CoefficientStore {
    CoefficientStore::from_json_str(&fixture_document().to_string()).expect("fixture store")
}

pub fn ship_rv(purchase_cost: f64, age: i32, usage: f64, maintenance: f64) -> Value {
    json!({
        "type_vehicle": "ship",
        "type_energy": "diesel",
        "registration_country": "Testland",
        "ship_class": "fishing_small",
        "purchase_cost": purchase_cost,
        "year_purchase": 2025,
        "current_year": 2025 + age,
        "travel_measure": usage,
        "minimum_fuel_consumption": 0.0,
        "powertrain_model_year": 2025,
        "warranty": 2.0,
        "type_warranty": "engine",
        "maintenance_cost": maintenance
    })
}

pub fn truck_rv(energy: &str, purchase_cost: f64, age: i32, usage: f64, maintenance: f64) -> Value {
    json!({
        "type_vehicle": "truck",
        "type_energy": energy,
        "registration_country": "Testland",
        "vehicle_weight_class": "light",
        "purchase_cost": purchase_cost,
        "year_purchase": 2025,
        "current_year": 2025 + age,
        "travel_measure": usage,
        "minimum_fuel_consumption": 0.3,
        "powertrain_model_year": 2024,
        "warranty": 2.0,
        "type_warranty": "standard",
        "maintenance_cost": maintenance
    })
}

pub fn ship_scenario(operation_years: u32) -> Value {
    json!({
        "description": "fixture ship",
        "asset_type": "ship",
        "operation_years": operation_years,
        "discount_rate": 0.04,
        "annual_distance_travel": 2500.0,
        "capex": {
            "powertrain_type": "DIESEL",
            "country": "Testland",
            "purchase_price": 1000000.0,
            "loan_years": 0
        },
        "rv": ship_rv(1_000_000.0, 5, 0.0, 0.0),
        "opex_ship": {
            "purchase_price": 1000000.0,
            "GT": 100.0,
            "consumption_energy": 100000.0,
            "crew_count": 3.0,
            "fuel_mass_kg": 10000.0,
            "days_in_port_per_year": 100.0,
            "registration_country": "Testland",
            "type_energy": "DIESEL"
        }
    })
}

pub fn truck_scenario(operation_years: u32) -> Value {
    json!({
        "description": "fixture truck",
        "asset_type": "truck",
        "operation_years": operation_years,
        "discount_rate": 0.04,
        "annual_distance_travel": 80000.0,
        "capex": {
            "powertrain_type": "DIESEL",
            "country": "Testland",
            "purchase_price": 100000.0,
            "loan_years": 5
        },
        "rv": truck_rv("DIESEL", 100_000.0, 4, 50_000.0, 5_000.0),
        "opex_truck": {
            "purchase_price": 100000.0,
            "type_energy": "DIESEL",
            "registration_country": "Testland",
            "vehicle_weight_class": "light",
            "annual_distance_km": 80000.0,
            "energy_consumption_kwh_per_km": 3.0
        }
    })
}
