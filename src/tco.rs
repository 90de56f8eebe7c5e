//! TCO 집계기. CAPEX → RV → OPEX 순으로 계산기를 돌린 뒤 현금흐름을 할인해 합산한다.
//!
//! - rv_discounted = RV / (1+r)^N
//! - capex_component = (capex_total - rv_discounted) × CRF
//! - opex_component = Σ_{n=1..N} opex_annual / (1+r)^n
//! - tco_total = capex_component + opex_component

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::asset::AssetType;
use crate::capex::{Amortization, CapexCalculator, CapexInput, CapexResult};
use crate::coefficients::{CoefficientError, CoefficientStore};
use crate::config::{Config, ScenarioDefaults};
use crate::finance::{self, YearPresentValue};
use crate::opex::{
    OpexResult, ShipOpexCalculator, ShipOpexInput, TruckOpexCalculator, TruckOpexInput,
};
use crate::residual_value::{ResidualValueCalculator, RvInput, RvResult};

/// 시나리오 자체가 잘못된 경우의 오류.
#[derive(Debug)]
pub enum ScenarioError {
    /// `asset_type`이 truck/ship 이 아님
    UnknownAssetType(String),
    /// 자산 종류에 필요한 키가 없음
    MissingKey(&'static str),
    /// 값의 범위가 잘못됨
    InvalidValue(&'static str),
    /// `rv.type_vehicle`과 `asset_type`이 다름
    AssetTypeMismatch {
        scenario: AssetType,
        residual_value: AssetType,
    },
    /// JSON 구조 오류(필수 키 누락 포함)
    Malformed(serde_json::Error),
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::UnknownAssetType(t) => write!(f, "알 수 없는 asset_type: {t}"),
            ScenarioError::MissingKey(k) => write!(f, "시나리오 필수 키 누락: {k}"),
            ScenarioError::InvalidValue(msg) => write!(f, "시나리오 값 오류: {msg}"),
            ScenarioError::AssetTypeMismatch {
                scenario,
                residual_value,
            } => write!(
                f,
                "asset_type '{scenario}'와 rv.type_vehicle '{residual_value}'가 다릅니다"
            ),
            ScenarioError::Malformed(e) => write!(f, "시나리오 형식 오류: {e}"),
        }
    }
}

impl std::error::Error for ScenarioError {}

impl From<serde_json::Error> for ScenarioError {
    fn from(value: serde_json::Error) -> Self {
        ScenarioError::Malformed(value)
    }
}

/// 집계 단계에서 발생 가능한 모든 치명적 오류.
#[derive(Debug)]
pub enum TcoError {
    Scenario(ScenarioError),
    Coefficient(CoefficientError),
}

impl std::fmt::Display for TcoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TcoError::Scenario(e) => write!(f, "{e}"),
            TcoError::Coefficient(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for TcoError {}

impl From<ScenarioError> for TcoError {
    fn from(value: ScenarioError) -> Self {
        TcoError::Scenario(value)
    }
}

impl From<CoefficientError> for TcoError {
    fn from(value: CoefficientError) -> Self {
        TcoError::Coefficient(value)
    }
}

/// 허용하는 최대 운영 연수.
pub const MAX_OPERATION_YEARS: u32 = 100;

fn default_description() -> String {
    "No description".to_string()
}

/// 시나리오 입력 레코드.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInput {
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub powertrain_type: String,
    #[serde(default)]
    pub country: String,
    /// 검증은 집계기에서 한다(알 수 없는 값은 `UnknownAssetType`).
    pub asset_type: String,
    #[serde(default)]
    pub capex: CapexInput,
    pub rv: RvInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opex_truck: Option<TruckOpexInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opex_ship: Option<ShipOpexInput>,
    pub operation_years: u32,
    /// 없으면 설정의 기본 할인율
    #[serde(default)]
    pub discount_rate: Option<f64>,
    /// 없으면 설정의 기본 연간 주행거리
    #[serde(default)]
    pub annual_distance_travel: Option<f64>,
}

impl ScenarioInput {
    pub fn from_json_str(content: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(content)?)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioMeta {
    pub description: String,
    pub asset_type: AssetType,
    pub powertrain_type: String,
    pub country: String,
    pub operation_years: u32,
    pub discount_rate: f64,
    pub annual_distance_travel: f64,
}

/// 할인 현금흐름 집계 결과.
#[derive(Debug, Clone, Serialize)]
pub struct TcoSummary {
    pub capex_total: f64,
    pub rv_value: f64,
    pub rv_discounted: f64,
    pub crf: f64,
    pub capex_component: f64,
    pub opex_annual: f64,
    /// 연도별 OPEX 현가 합계
    pub opex_component_pv: f64,
    pub tco_total: f64,
    pub equivalent_annual_cost: f64,
    /// 연간 주행거리가 0이면 `None`(JSON null)
    pub tco_per_distance_unit: Option<f64>,
    pub opex_pv_details: Vec<YearPresentValue>,
}

/// 표시 계층에 넘기는 시나리오 결과 전체.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub meta: ScenarioMeta,
    pub inputs: ScenarioInput,
    pub capex: CapexResult,
    pub rv: RvResult,
    pub opex: OpexResult,
    pub tco: TcoSummary,
}

/// 집계 입력값.
#[derive(Debug, Clone, Copy)]
pub struct AggregateInput {
    pub capex_total: f64,
    pub crf: f64,
    pub rv_value: f64,
    pub opex_annual: f64,
    pub discount_rate: f64,
    pub operation_years: u32,
    pub annual_distance: f64,
}

/// 계산기 결과를 할인 현금흐름으로 합산한다. `operation_years`는 1 이상이어야 한다.
pub fn aggregate(input: AggregateInput) -> TcoSummary {
    let r = input.discount_rate;
    let n = input.operation_years;

    let rv_discounted = finance::discount(input.rv_value, r, n);
    let capex_component = (input.capex_total - rv_discounted) * input.crf;

    let opex_pv_details = finance::present_value_series(input.opex_annual, r, n);
    let opex_component: f64 = opex_pv_details.iter().map(|y| y.pv).sum();

    let tco_total = capex_component + opex_component;
    let tco_per_distance_unit = if input.annual_distance > 0.0 {
        Some(tco_total / (n as f64 * input.annual_distance))
    } else {
        None
    };

    TcoSummary {
        capex_total: input.capex_total,
        rv_value: input.rv_value,
        rv_discounted,
        crf: input.crf,
        capex_component,
        opex_annual: input.opex_annual,
        opex_component_pv: opex_component,
        tco_total,
        equivalent_annual_cost: tco_total / n as f64,
        tco_per_distance_unit,
        opex_pv_details,
    }
}

/// 자산 종류별 계수 저장소를 소유하고 시나리오를 평가한다.
#[derive(Debug, Clone)]
pub struct TcoCalculator {
    trucks: CoefficientStore,
    ships: CoefficientStore,
    defaults: ScenarioDefaults,
}

impl TcoCalculator {
    pub fn new(
        trucks: CoefficientStore,
        ships: CoefficientStore,
        defaults: ScenarioDefaults,
    ) -> Self {
        Self {
            trucks,
            ships,
            defaults,
        }
    }

    /// 설정에 지정된 경로에서 두 저장소를 로드한다.
    pub fn from_config(cfg: &Config) -> Result<Self, CoefficientError> {
        let trucks = CoefficientStore::load(&cfg.database.trucks)?;
        let ships = CoefficientStore::load(&cfg.database.ships)?;
        Ok(Self::new(trucks, ships, cfg.defaults.clone()))
    }

    pub fn store(&self, asset: AssetType) -> &CoefficientStore {
        match asset {
            AssetType::Truck => &self.trucks,
            AssetType::Ship => &self.ships,
        }
    }

    pub fn run_scenario_json(&self, content: &str) -> Result<ScenarioReport, TcoError> {
        let input = ScenarioInput::from_json_str(content)?;
        self.run_scenario(&input)
    }

    /// 시나리오 하나를 평가한다. 치명적 오류가 나면 부분 결과 없이 실패한다.
    pub fn run_scenario(&self, input: &ScenarioInput) -> Result<ScenarioReport, TcoError> {
        let asset = AssetType::parse(&input.asset_type)
            .ok_or_else(|| ScenarioError::UnknownAssetType(input.asset_type.clone()))?;
        if input.rv.type_vehicle != asset {
            return Err(ScenarioError::AssetTypeMismatch {
                scenario: asset,
                residual_value: input.rv.type_vehicle,
            }
            .into());
        }
        let years = input.operation_years;
        if years == 0 || years > MAX_OPERATION_YEARS {
            return Err(
                ScenarioError::InvalidValue("operation_years는 1 이상 100 이하여야 합니다").into(),
            );
        }
        let rate = input.discount_rate.unwrap_or(self.defaults.discount_rate);
        if !rate.is_finite() || rate <= -1.0 {
            return Err(ScenarioError::InvalidValue("discount_rate는 -1보다 커야 합니다").into());
        }
        let distance = input
            .annual_distance_travel
            .unwrap_or(self.defaults.annual_distance_travel);

        let store = self.store(asset);
        info!(
            target: "tco",
            asset = %asset,
            description = %input.description,
            years,
            rate,
            "running scenario"
        );

        let capex = CapexCalculator::new(store, asset).compute(
            &input.capex,
            Amortization {
                discount_rate: rate,
                operation_years: years,
            },
        )?;
        let rv = ResidualValueCalculator::new(store).compute(&input.rv)?;
        let opex = match asset {
            AssetType::Truck => {
                let opex_in = input
                    .opex_truck
                    .as_ref()
                    .ok_or(ScenarioError::MissingKey("opex_truck"))?;
                TruckOpexCalculator::new(store).compute(opex_in)?
            }
            AssetType::Ship => {
                let opex_in = input
                    .opex_ship
                    .as_ref()
                    .ok_or(ScenarioError::MissingKey("opex_ship"))?;
                ShipOpexCalculator::new(store).compute(opex_in, rv.rv)?
            }
        };

        let tco = aggregate(AggregateInput {
            capex_total: capex.total,
            crf: capex.crf,
            rv_value: rv.rv,
            opex_annual: opex.opex_total,
            discount_rate: rate,
            operation_years: years,
            annual_distance: distance,
        });
        debug!(
            target: "tco",
            tco_total = tco.tco_total,
            equivalent_annual_cost = tco.equivalent_annual_cost,
            "scenario aggregated"
        );

        Ok(ScenarioReport {
            meta: ScenarioMeta {
                description: input.description.clone(),
                asset_type: asset,
                powertrain_type: input.powertrain_type.clone(),
                country: input.country.clone(),
                operation_years: years,
                discount_rate: rate,
                annual_distance_travel: distance,
            },
            inputs: input.clone(),
            capex,
            rv,
            opex,
            tco,
        })
    }
}
