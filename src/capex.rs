//! CAPEX 계산기.
//!
//! 총 자본비 = 차량 + 인프라 + 세금 + 금융비용 - 보조금.
//! 인프라 비용 모델만 트럭(충전기)과 선박(육상전원)이 다르고 나머지는 공통이다.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::asset::AssetType;
use crate::coefficients::{
    lookup_or_default, CapexCoefficients, CoefficientError, CoefficientStore,
};
use crate::energy::EnergyType;
use crate::finance;

/// 취득·인프라·금융 입력. 누락 항목은 기본값을 쓴다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CapexInput {
    pub powertrain_type: EnergyType,
    pub vehicle_number: u32,
    pub vehicle_id: u32,
    pub vehicle_weight_class: String,
    pub country: String,
    pub year: i32,
    pub is_new: bool,
    /// 이미 보유한 차량(개조만 하는 경우)이면 구입가를 계상하지 않는다.
    pub owns_vehicle: bool,
    pub purchase_price: f64,
    pub conversion_cost: f64,
    pub certification_cost: f64,
    pub n_slow: Option<u32>,
    pub n_fast: Option<u32>,
    pub n_ultra: Option<u32>,
    pub n_stations: u32,
    pub smart_charging_enabled: bool,
    pub loan_years: u32,
}

impl Default for CapexInput {
    fn default() -> Self {
        Self {
            powertrain_type: EnergyType::Diesel,
            vehicle_number: 1,
            vehicle_id: 1,
            vehicle_weight_class: "light".to_string(),
            country: "France".to_string(),
            year: 2025,
            is_new: true,
            owns_vehicle: false,
            purchase_price: 0.0,
            conversion_cost: 0.0,
            certification_cost: 0.0,
            n_slow: None,
            n_fast: None,
            n_ultra: None,
            n_stations: 0,
            smart_charging_enabled: false,
            loan_years: 10,
        }
    }
}

/// 보조금 일정의 규모 등급. 차량 대수로 결정한다.
pub fn fleet_tier(vehicle_number: u32) -> &'static str {
    match vehicle_number {
        0..=5 => "small",
        6..=50 => "medium",
        _ => "large",
    }
}

/// 상각 기간과 할인율. 시나리오에서 받아 CRF 계산에 쓴다.
#[derive(Debug, Clone, Copy)]
pub struct Amortization {
    pub discount_rate: f64,
    pub operation_years: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct InfrastructureCost {
    pub hardware: f64,
    pub grid: f64,
    pub installation: f64,
}

impl InfrastructureCost {
    pub fn total(&self) -> f64 {
        self.hardware + self.grid + self.installation
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CapexMeta {
    pub asset_type: AssetType,
    pub powertrain: EnergyType,
    pub weight_class: String,
    pub country: String,
    pub fleet_size: u32,
    pub purchase_price: f64,
    pub is_new: bool,
    pub loan_years: u32,
}

/// CAPEX 계산 결과.
#[derive(Debug, Clone, Serialize)]
pub struct CapexResult {
    pub total: f64,
    pub crf: f64,
    pub vehicle_cost: f64,
    pub infrastructure_cost: f64,
    pub infrastructure_hardware: f64,
    pub infrastructure_grid: f64,
    pub infrastructure_installation: f64,
    pub taxes: f64,
    pub financing_cost: f64,
    pub subsidies: f64,
    pub meta: CapexMeta,
}

pub struct CapexCalculator<'a> {
    store: &'a CoefficientStore,
    asset: AssetType,
}

impl<'a> CapexCalculator<'a> {
    pub fn new(store: &'a CoefficientStore, asset: AssetType) -> Self {
        Self { store, asset }
    }

    pub fn compute(
        &self,
        input: &CapexInput,
        amortization: Amortization,
    ) -> Result<CapexResult, CoefficientError> {
        let country = self.store.country(&input.country)?;
        let coef = country.capex(self.asset)?;
        let energy = &input.powertrain_type;
        let fleet = input.vehicle_number as f64;

        let unit_price = if input.owns_vehicle {
            0.0
        } else {
            input.purchase_price
        };
        let vehicle_cost = fleet * (unit_price + input.conversion_cost + input.certification_cost);

        let infra = match self.asset {
            AssetType::Truck => truck_infrastructure(input, energy, coef),
            AssetType::Ship => ship_infrastructure(input, energy, coef),
        };
        let infrastructure_cost = infra.total();

        let tax_factor = if input.is_new {
            1.0
        } else {
            coef.used_vehicle_tax_factor
        };
        let registration =
            lookup_or_default(&coef.registration_tax, &input.vehicle_weight_class, 0.0);
        let taxes = vehicle_cost * coef.acquisition_tax_rate * tax_factor + fleet * registration;

        let year = input.year.to_string();
        let tier = fleet_tier(input.vehicle_number);
        let subsidies = fleet * country.vehicle_subsidy(&year, tier, energy)
            + infrastructure_cost * country.infrastructure_subsidy_rate(&year, tier);

        let financed = (vehicle_cost + infrastructure_cost + taxes - subsidies).max(0.0);
        let financing_cost = financing_cost(financed, coef.loan_interest_rate, input.loan_years);

        let total = vehicle_cost + infrastructure_cost + taxes + financing_cost - subsidies;
        let crf = finance::capital_recovery_factor(
            amortization.discount_rate,
            amortization.operation_years,
        );

        debug!(
            target: "tco.capex",
            asset = %self.asset,
            energy = %energy,
            vehicle_cost,
            infrastructure_cost,
            taxes,
            financing_cost,
            subsidies,
            total,
            crf,
            "capex computed"
        );

        Ok(CapexResult {
            total,
            crf,
            vehicle_cost,
            infrastructure_cost,
            infrastructure_hardware: infra.hardware,
            infrastructure_grid: infra.grid,
            infrastructure_installation: infra.installation,
            taxes,
            financing_cost,
            subsidies,
            meta: CapexMeta {
                asset_type: self.asset,
                powertrain: energy.clone(),
                weight_class: input.vehicle_weight_class.clone(),
                country: input.country.clone(),
                fleet_size: input.vehicle_number,
                purchase_price: input.purchase_price,
                is_new: input.is_new,
                loan_years: input.loan_years,
            },
        })
    }
}

/// 대출 기간 동안 지불하는 총 이자.
pub fn financing_cost(principal: f64, rate: f64, loan_years: u32) -> f64 {
    if loan_years == 0 || principal <= 0.0 {
        return 0.0;
    }
    let payments = finance::capital_recovery_factor(rate, loan_years) * loan_years as f64;
    principal * (payments - 1.0)
}

fn charger_count(explicit: Option<u32>, fleet: u32, per_vehicle: f64) -> f64 {
    match explicit {
        Some(n) => n as f64,
        None => (fleet as f64 * per_vehicle).ceil(),
    }
}

/// 트럭: BEV는 충전기(완속/급속/초급속), 그 외는 충전소 단가 × 개소.
fn truck_infrastructure(
    input: &CapexInput,
    energy: &EnergyType,
    coef: &CapexCoefficients,
) -> InfrastructureCost {
    if !energy.is_battery_electric() {
        return station_infrastructure(input, energy, coef);
    }
    let ratio = coef.chargers_per_vehicle;
    let slow = charger_count(input.n_slow, input.vehicle_number, ratio.slow);
    let fast = charger_count(input.n_fast, input.vehicle_number, ratio.fast);
    let ultra = charger_count(input.n_ultra, input.vehicle_number, ratio.ultra);

    let hw = coef.charger_cost;
    let hardware = slow * hw.slow + fast * hw.fast + ultra * hw.ultra;
    let gc = coef.charger_grid_cost;
    let mut grid = slow * gc.slow + fast * gc.fast + ultra * gc.ultra;
    if input.smart_charging_enabled {
        grid *= 1.0 - coef.smart_charging_grid_reduction;
    }
    InfrastructureCost {
        hardware,
        grid,
        installation: hardware * coef.installation_fraction,
    }
}

/// 선박: BEV는 육상전원 설비, 그 외는 벙커링 설비 단가 × 개소.
fn ship_infrastructure(
    input: &CapexInput,
    energy: &EnergyType,
    coef: &CapexCoefficients,
) -> InfrastructureCost {
    if !energy.is_battery_electric() {
        return station_infrastructure(input, energy, coef);
    }
    let n = input.n_stations as f64;
    let hardware = n * coef.shore_power_cost;
    InfrastructureCost {
        hardware,
        grid: n * coef.shore_grid_cost,
        installation: hardware * coef.installation_fraction,
    }
}

fn station_infrastructure(
    input: &CapexInput,
    energy: &EnergyType,
    coef: &CapexCoefficients,
) -> InfrastructureCost {
    let hardware =
        input.n_stations as f64 * lookup_or_default(&coef.station_cost, energy.key(), 0.0);
    InfrastructureCost {
        hardware,
        grid: 0.0,
        installation: hardware * coef.installation_fraction,
    }
}
