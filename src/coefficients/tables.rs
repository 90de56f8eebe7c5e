//! 국가별 계수 테이블의 세부 스키마.
//!
//! 에너지·등급 키로 조회하는 표는 모두 `RateTable`이며, 값이 없으면
//! `DEFAULT` 항목, 그마저 없으면 호출자가 지정한 숫자 기본값을 쓴다.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 키(에너지 또는 등급) → 계수.
pub type RateTable = BTreeMap<String, f64>;

pub const DEFAULT_DEPR_RATE_PER_YEAR: f64 = 0.06;
pub const DEFAULT_DEPR_RATE_PER_UNIT: f64 = 0.0;
pub const DEFAULT_OBSOLESCENCE_RATE: f64 = 0.02;
pub const DEFAULT_MAINT_PENALTY_COEF: f64 = 2.0;
pub const DEFAULT_MIN_FLOOR_FRACTION: f64 = 0.10;
pub const DEFAULT_MAX_TOTAL_DEPR_FRACTION: f64 = 0.85;
pub const DEFAULT_MIN_HEALTH_FACTOR: f64 = 0.35;
pub const DEFAULT_MAINT_DEPR_COEF: f64 = 0.5;

/// 잔존가치 등급(차량 중량 등급 또는 선박 등급)별 계수.
///
/// 세 개의 감가/진부화 표는 구조적으로 필수라 `Option`으로 두고
/// 조회 시점에 없으면 오류로 처리한다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RvClassCoefficients {
    pub depr_rate_per_year: Option<RateTable>,
    pub depr_rate_per_unit: Option<RateTable>,
    pub obsolescence_rate: Option<RateTable>,
    pub maint_penalty_coef: Option<f64>,
    pub min_floor_fraction: Option<f64>,
    pub max_total_depr_fraction: Option<f64>,
    pub min_health_factor: Option<f64>,
    /// 유지비 기반 장부 감가 계수. 트럭 변형에서만 사용한다.
    pub maint_depr_coef: Option<f64>,
}

impl RvClassCoefficients {
    pub fn maint_penalty_coef(&self) -> f64 {
        self.maint_penalty_coef.unwrap_or(DEFAULT_MAINT_PENALTY_COEF)
    }

    pub fn min_floor_fraction(&self) -> f64 {
        self.min_floor_fraction.unwrap_or(DEFAULT_MIN_FLOOR_FRACTION)
    }

    pub fn max_total_depr_fraction(&self) -> f64 {
        self.max_total_depr_fraction
            .unwrap_or(DEFAULT_MAX_TOTAL_DEPR_FRACTION)
    }

    pub fn min_health_factor(&self) -> f64 {
        self.min_health_factor.unwrap_or(DEFAULT_MIN_HEALTH_FACTOR)
    }

    pub fn maint_depr_coef(&self) -> f64 {
        self.maint_depr_coef.unwrap_or(DEFAULT_MAINT_DEPR_COEF)
    }
}

/// 시장/정책 외부 요인 계수.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalFactors {
    #[serde(default = "default_growth")]
    pub energy_growth_rate: f64,
    #[serde(default)]
    pub energy_price_factor: RateTable,
    #[serde(default)]
    pub co2_factor: RateTable,
    #[serde(default = "default_subsidy_factor")]
    pub subsidy_factor: f64,
    #[serde(default = "default_min_external")]
    pub min_external_factor: f64,
    #[serde(default = "default_max_external")]
    pub max_external_factor: f64,
}

fn default_growth() -> f64 {
    0.04
}

fn default_subsidy_factor() -> f64 {
    0.30
}

fn default_min_external() -> f64 {
    0.85
}

fn default_max_external() -> f64 {
    1.15
}

impl Default for ExternalFactors {
    /// 테이블이 없는 국가에 쓰는 중립값. 가격/CO2 민감도는 0.
    fn default() -> Self {
        Self {
            energy_growth_rate: default_growth(),
            energy_price_factor: RateTable::new(),
            co2_factor: RateTable::new(),
            subsidy_factor: default_subsidy_factor(),
            min_external_factor: default_min_external(),
            max_external_factor: default_max_external(),
        }
    }
}

/// 에너지 기준가격 표 (`energy.energy_price_c_e`, 통화/kWh).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnergyTable {
    #[serde(default)]
    pub energy_price_c_e: RateTable,
}

/// 충전기 등급별 값(대수, 단가 등).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ChargerTriple {
    #[serde(default)]
    pub slow: f64,
    #[serde(default)]
    pub fast: f64,
    #[serde(default)]
    pub ultra: f64,
}

/// CAPEX 계수 (`capex_truck` / `capex_ship`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapexCoefficients {
    /// 차량 취득세율(비환급분)
    #[serde(default)]
    pub acquisition_tax_rate: f64,
    /// 등급별 1회 등록세
    #[serde(default)]
    pub registration_tax: RateTable,
    /// 중고 취득 시 취득세 배율
    #[serde(default = "one")]
    pub used_vehicle_tax_factor: f64,
    #[serde(default)]
    pub loan_interest_rate: f64,
    /// 설치비 = 하드웨어 × 비율
    #[serde(default)]
    pub installation_fraction: f64,
    #[serde(default)]
    pub charger_cost: ChargerTriple,
    #[serde(default)]
    pub charger_grid_cost: ChargerTriple,
    /// 충전기 대수를 주지 않았을 때 차량당 비율로 추정한다.
    #[serde(default)]
    pub chargers_per_vehicle: ChargerTriple,
    #[serde(default)]
    pub smart_charging_grid_reduction: f64,
    /// 수소/LNG 등 충전소 1기당 비용 (에너지별)
    #[serde(default)]
    pub station_cost: RateTable,
    #[serde(default)]
    pub shore_power_cost: f64,
    #[serde(default)]
    pub shore_grid_cost: f64,
}

fn one() -> f64 {
    1.0
}

/// 트럭 OPEX 계수.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckOpexCoefficients {
    #[serde(default)]
    pub annual_road_tax: RateTable,
    #[serde(default)]
    pub insurance_rate: f64,
    #[serde(default)]
    pub maintenance_per_km: RateTable,
    #[serde(default)]
    pub toll_rate_per_km: RateTable,
    #[serde(default)]
    pub driver_annual_cost: f64,
}

/// 선박 OPEX 계수.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipOpexCoefficients {
    #[serde(default)]
    pub tonnage_tax_per_gt: f64,
    #[serde(default)]
    pub fuel_tax_per_kg: RateTable,
    #[serde(default)]
    pub port_fee_per_gt_day: f64,
    #[serde(default)]
    pub hull_insurance_rate: f64,
    #[serde(default)]
    pub pi_insurance_per_gt: f64,
    #[serde(default)]
    pub crew_monthly_wage: f64,
    #[serde(default)]
    pub maintenance_rate: f64,
}
