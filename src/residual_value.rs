//! 잔존가치(RV) 계산기. 트럭/선박 변형을 `type_vehicle` 태그로 구분한다.
//!
//! RV = 감가 후 가치 × 건전성 계수 × 외부 요인 계수
//! - 감가: 연식·사용량(·유지비, 트럭만) 비례, 총 감가 상한과 잔존 하한을 둔다.
//! - 건전성: exp(-진부화율·연식) · exp(-유지비 페널티·유지비율), [min_health, 1]로 제한.
//! - 외부 요인: 에너지 가격 드리프트, CO2, 보조금 인센티브, [min, max]로 제한.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::asset::AssetType;
use crate::coefficients::{
    lookup_or_default, require, CoefficientError, CoefficientStore, CountryCoefficients,
    RateTable, RvClassCoefficients, DEFAULT_DEPR_RATE_PER_UNIT, DEFAULT_DEPR_RATE_PER_YEAR,
    DEFAULT_OBSOLESCENCE_RATE,
};
use crate::energy::EnergyType;

/// 외부 요인 계산 시 보조금 일정에서 참조하는 연도.
pub const SUBSIDY_REFERENCE_YEAR: &str = "2025";
/// 외부 요인 계산 시 보조금 일정에서 참조하는 규모 등급.
pub const SUBSIDY_REFERENCE_TIER: &str = "medium";

/// 잔존가치 입력. 모든 키가 필수이며 누락 시 역직렬화 단계에서 실패한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RvInput {
    pub type_vehicle: AssetType,
    pub type_energy: EnergyType,
    pub registration_country: String,
    /// 트럭 중량 등급 또는 선박 등급
    #[serde(alias = "ship_class", alias = "vehicle_weight_class")]
    pub vehicle_class: String,
    pub purchase_cost: f64,
    pub year_purchase: i32,
    pub current_year: i32,
    /// 사용량 지표(주행거리 또는 엔진 가동시간)
    pub travel_measure: f64,
    pub minimum_fuel_consumption: f64,
    pub powertrain_model_year: i32,
    pub warranty: f64,
    pub type_warranty: String,
    pub maintenance_cost: f64,
}

impl RvInput {
    pub fn age_years(&self) -> u32 {
        (self.current_year - self.year_purchase).max(0) as u32
    }
}

/// 입력 에코. 표시/디버깅 용도.
#[derive(Debug, Clone, Serialize)]
pub struct RvMeta {
    pub type_vehicle: AssetType,
    pub type_energy: EnergyType,
    pub registration_country: String,
    pub vehicle_class: String,
    pub year_purchase: i32,
    pub current_year: i32,
    pub purchase_cost: f64,
    pub minimum_fuel_consumption: f64,
    pub powertrain_model_year: i32,
    pub warranty: f64,
    pub type_warranty: String,
}

impl From<&RvInput> for RvMeta {
    fn from(input: &RvInput) -> Self {
        Self {
            type_vehicle: input.type_vehicle,
            type_energy: input.type_energy.clone(),
            registration_country: input.registration_country.clone(),
            vehicle_class: input.vehicle_class.clone(),
            year_purchase: input.year_purchase,
            current_year: input.current_year,
            purchase_cost: input.purchase_cost,
            minimum_fuel_consumption: input.minimum_fuel_consumption,
            powertrain_model_year: input.powertrain_model_year,
            warranty: input.warranty,
            type_warranty: input.type_warranty.clone(),
        }
    }
}

/// 잔존가치 계산 결과.
#[derive(Debug, Clone, Serialize)]
pub struct RvResult {
    pub rv: f64,
    pub depreciated_value: f64,
    pub health_factor: f64,
    pub external_factor: f64,
    /// 상한 적용 후 총 감가액
    pub total_depreciation: f64,
    pub dep_year_component: f64,
    pub dep_use_component: f64,
    pub dep_maint_component: f64,
    pub meta: RvMeta,
}

impl RvResult {
    /// 구입가가 0 이하일 때의 중립 결과.
    fn neutral(meta: RvMeta) -> Self {
        Self {
            rv: 0.0,
            depreciated_value: 0.0,
            health_factor: 1.0,
            external_factor: 1.0,
            total_depreciation: 0.0,
            dep_year_component: 0.0,
            dep_use_component: 0.0,
            dep_maint_component: 0.0,
            meta,
        }
    }
}

/// 잔존가치 계산기. 생성 시 받은 계수 저장소만 읽는다.
#[derive(Debug, Clone, Copy)]
pub struct ResidualValueCalculator<'a> {
    store: &'a CoefficientStore,
}

impl<'a> ResidualValueCalculator<'a> {
    pub fn new(store: &'a CoefficientStore) -> Self {
        Self { store }
    }

    pub fn compute(&self, input: &RvInput) -> Result<RvResult, CoefficientError> {
        let asset = input.type_vehicle;
        let energy = &input.type_energy;
        let country = self.store.country(&input.registration_country)?;
        let p = country.rv_class(asset, &input.vehicle_class)?;
        let meta = RvMeta::from(input);

        let purchase = input.purchase_cost;
        if purchase <= 0.0 {
            debug!(
                target: "tco.rv",
                purchase,
                "non-positive purchase cost, neutral residual value"
            );
            return Ok(RvResult::neutral(meta));
        }

        let table_name = asset.table_name("rv");
        let rate_table = |table: Option<&'a RateTable>, name: &str| {
            require(table, || CoefficientError::TableNotFound {
                country: country.country.clone(),
                table: format!("{table_name}.{}.{name}", input.vehicle_class),
            })
        };
        let r_year = lookup_or_default(
            rate_table(p.depr_rate_per_year.as_ref(), "depr_rate_per_year")?,
            energy.key(),
            DEFAULT_DEPR_RATE_PER_YEAR,
        );
        let r_use = lookup_or_default(
            rate_table(p.depr_rate_per_unit.as_ref(), "depr_rate_per_unit")?,
            energy.key(),
            DEFAULT_DEPR_RATE_PER_UNIT,
        );
        let ob_rate = lookup_or_default(
            rate_table(p.obsolescence_rate.as_ref(), "obsolescence_rate")?,
            energy.key(),
            DEFAULT_OBSOLESCENCE_RATE,
        );

        let age = input.age_years();
        let age_f = age as f64;
        let usage = input.travel_measure;
        let maint_ratio = input.maintenance_cost / purchase;

        let dep_year = purchase * r_year * age_f;
        let dep_use = purchase * r_use * usage;
        let dep_maint = maintenance_depreciation(asset, input.maintenance_cost, p);
        let dep_total =
            (dep_year + dep_use + dep_maint).min(purchase * p.max_total_depr_fraction());

        let floor_value = purchase * p.min_floor_fraction();
        let depreciated_value = floor_value.max(purchase - dep_total);

        let health = (-ob_rate * age_f).exp() * (-p.maint_penalty_coef() * maint_ratio).exp();
        let health_factor = health.max(p.min_health_factor()).min(1.0);

        let external_factor = external_factor(country, asset, energy, purchase, age);

        let rv = depreciated_value * health_factor * external_factor;
        debug!(
            target: "tco.rv",
            asset = %asset,
            energy = %energy,
            age,
            depreciated_value,
            health_factor,
            external_factor,
            rv,
            "residual value computed"
        );

        Ok(RvResult {
            rv,
            depreciated_value,
            health_factor,
            external_factor,
            total_depreciation: dep_total,
            dep_year_component: dep_year,
            dep_use_component: dep_use,
            dep_maint_component: dep_maint,
            meta,
        })
    }
}

/// 유지비 기반 장부 감가. 트럭만 적용하고 선박은 0이다.
/// 선박에서는 유지비가 건전성 계수에만 반영된다.
fn maintenance_depreciation(
    asset: AssetType,
    maintenance_cost: f64,
    p: &RvClassCoefficients,
) -> f64 {
    match asset {
        AssetType::Truck => maintenance_cost * p.maint_depr_coef(),
        AssetType::Ship => 0.0,
    }
}

/// 시장/정책 외부 요인 계수를 [min, max] 범위로 계산한다.
pub fn external_factor(
    country: &CountryCoefficients,
    asset: AssetType,
    energy: &EnergyType,
    purchase: f64,
    age: u32,
) -> f64 {
    let ef = country.external_factors(asset);
    // 민감도는 에너지별 값만 쓴다. DEFAULT 항목은 참조하지 않는다.
    let price_sensitivity = ef.energy_price_factor.get(energy.key()).copied().unwrap_or(0.0);
    let co2_sensitivity = ef.co2_factor.get(energy.key()).copied().unwrap_or(0.0);

    let p_ref = country.reference_energy_price(energy);
    let delta = if p_ref > 0.0 {
        let p_t = p_ref * (1.0 + ef.energy_growth_rate).powf(age as f64);
        (p_t - p_ref) / p_ref
    } else {
        0.0
    };

    let subsidy = country.vehicle_subsidy(SUBSIDY_REFERENCE_YEAR, SUBSIDY_REFERENCE_TIER, energy);
    let incentive = if purchase > 0.0 { subsidy / purchase } else { 0.0 };

    let ext = 1.0 + price_sensitivity * delta + co2_sensitivity + ef.subsidy_factor * incentive;
    ext.max(ef.min_external_factor).min(ef.max_external_factor)
}
