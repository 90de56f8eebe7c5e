//! 국가별 계수 저장소(Coefficient Store).
//!
//! JSON 문서 `{ "countries": [ { "country": ..., ... } ] }`를 한 번 읽어
//! 국가 이름으로 색인한 뒤 읽기 전용으로 사용한다. 조회 규칙은 두 가지다.
//!
//! - 구조적으로 필요한 표(국가, `rv_<asset>`, 등급, 감가율 표, CAPEX/OPEX 표)는
//!   [`require`] 계열로 조회하며 없으면 [`CoefficientError`]로 즉시 실패한다.
//! - 에너지/등급별 개별 값, 외부 요인 표, 보조금 일정은 [`lookup_or_default`]
//!   계열로 조회하며 `DEFAULT` 항목이나 숫자 기본값으로 대체한다.

pub mod tables;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::asset::AssetType;
use crate::energy::{EnergyType, DEFAULT_KEY};

pub use tables::*;

/// 계수 저장소 로드/조회 오류. 어떤 경우에도 기본 계수로 대체하지 않는다.
#[derive(Debug)]
pub enum CoefficientError {
    /// 파일 입출력 오류
    Io { path: PathBuf, source: std::io::Error },
    /// JSON 파싱 오류
    Parse(serde_json::Error),
    /// 국가가 저장소에 없음
    CountryNotFound(String),
    /// 국가에 필요한 표가 없음
    TableNotFound { country: String, table: String },
    /// 표에 요청한 등급 키가 없음
    ClassNotFound {
        country: String,
        table: String,
        class: String,
    },
    /// 필수 에너지 표에 해당 에너지도 DEFAULT도 없음
    EnergyNotFound {
        country: String,
        table: String,
        energy: String,
    },
}

impl std::fmt::Display for CoefficientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoefficientError::Io { path, source } => {
                write!(f, "계수 저장소를 읽을 수 없습니다({}): {source}", path.display())
            }
            CoefficientError::Parse(e) => write!(f, "계수 저장소 형식 오류: {e}"),
            CoefficientError::CountryNotFound(c) => {
                write!(f, "계수 저장소에 국가 '{c}'가 없습니다")
            }
            CoefficientError::TableNotFound { country, table } => {
                write!(f, "국가 '{country}'에 '{table}' 테이블이 없습니다")
            }
            CoefficientError::ClassNotFound {
                country,
                table,
                class,
            } => write!(f, "국가 '{country}'의 {table}에 '{class}' 등급이 없습니다"),
            CoefficientError::EnergyNotFound {
                country,
                table,
                energy,
            } => write!(
                f,
                "국가 '{country}'의 {table}에 '{energy}'와 '{DEFAULT_KEY}' 항목이 모두 없습니다"
            ),
        }
    }
}

impl std::error::Error for CoefficientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoefficientError::Io { source, .. } => Some(source),
            CoefficientError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CoefficientError {
    fn from(value: serde_json::Error) -> Self {
        CoefficientError::Parse(value)
    }
}

/// 필수 항목 조회. 없으면 `err()`가 만든 오류를 돌려준다.
pub fn require<T>(
    value: Option<T>,
    err: impl FnOnce() -> CoefficientError,
) -> Result<T, CoefficientError> {
    value.ok_or_else(err)
}

/// `key` → `DEFAULT` → `fallback` 순서로 조회한다.
pub fn lookup_or_default(table: &RateTable, key: &str, fallback: f64) -> f64 {
    table
        .get(key)
        .or_else(|| table.get(DEFAULT_KEY))
        .copied()
        .unwrap_or(fallback)
}

#[derive(Debug, Deserialize)]
struct CoefficientDocument {
    #[serde(default)]
    countries: Vec<CountryCoefficients>,
}

/// 한 국가의 계수 묶음. 표들은 파싱 시점에는 모두 선택 항목이다.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryCoefficients {
    pub country: String,
    pub rv_truck: Option<BTreeMap<String, RvClassCoefficients>>,
    pub rv_ship: Option<BTreeMap<String, RvClassCoefficients>>,
    pub external_factors_truck: Option<ExternalFactors>,
    pub external_factors_ship: Option<ExternalFactors>,
    pub capex_truck: Option<CapexCoefficients>,
    pub capex_ship: Option<CapexCoefficients>,
    pub opex_truck: Option<TruckOpexCoefficients>,
    pub opex_ship: Option<ShipOpexCoefficients>,
    #[serde(default)]
    pub energy: EnergyTable,
    /// 연도 → 규모 등급 → 보조금. 형태가 달라도 로드를 막지 않도록 원시 JSON으로 둔다.
    #[serde(default)]
    pub subsidies: serde_json::Value,
}

impl CountryCoefficients {
    fn missing_table(&self, table: String) -> CoefficientError {
        CoefficientError::TableNotFound {
            country: self.country.clone(),
            table,
        }
    }

    /// `rv_<asset>[class]`를 조회한다. 표나 등급이 없으면 실패.
    pub fn rv_class(
        &self,
        asset: AssetType,
        class: &str,
    ) -> Result<&RvClassCoefficients, CoefficientError> {
        let table_name = asset.table_name("rv");
        let table = match asset {
            AssetType::Truck => self.rv_truck.as_ref(),
            AssetType::Ship => self.rv_ship.as_ref(),
        };
        let table = require(table, || self.missing_table(table_name.clone()))?;
        require(table.get(class), || CoefficientError::ClassNotFound {
            country: self.country.clone(),
            table: table_name,
            class: class.to_string(),
        })
    }

    /// 외부 요인 표. 없으면 중립 기본값을 쓴다.
    pub fn external_factors(&self, asset: AssetType) -> ExternalFactors {
        let table = match asset {
            AssetType::Truck => self.external_factors_truck.as_ref(),
            AssetType::Ship => self.external_factors_ship.as_ref(),
        };
        match table {
            Some(ef) => ef.clone(),
            None => {
                warn!(
                    country = %self.country,
                    table = %asset.table_name("external_factors"),
                    "external factor table missing, using neutral defaults"
                );
                ExternalFactors::default()
            }
        }
    }

    pub fn capex(&self, asset: AssetType) -> Result<&CapexCoefficients, CoefficientError> {
        let table = match asset {
            AssetType::Truck => self.capex_truck.as_ref(),
            AssetType::Ship => self.capex_ship.as_ref(),
        };
        require(table, || self.missing_table(asset.table_name("capex")))
    }

    pub fn truck_opex(&self) -> Result<&TruckOpexCoefficients, CoefficientError> {
        require(self.opex_truck.as_ref(), || {
            self.missing_table("opex_truck".to_string())
        })
    }

    pub fn ship_opex(&self) -> Result<&ShipOpexCoefficients, CoefficientError> {
        require(self.opex_ship.as_ref(), || {
            self.missing_table("opex_ship".to_string())
        })
    }

    /// 잔존가치 가격 드리프트용 기준가격. 해당 에너지 항목이 없으면 0.
    pub fn reference_energy_price(&self, energy: &EnergyType) -> f64 {
        self.energy
            .energy_price_c_e
            .get(energy.key())
            .copied()
            .unwrap_or(0.0)
    }

    /// OPEX 에너지 비용용 단가. 에너지 → DEFAULT 순서, 둘 다 없으면 실패.
    pub fn require_energy_price(&self, energy: &EnergyType) -> Result<f64, CoefficientError> {
        let prices = &self.energy.energy_price_c_e;
        require(
            prices
                .get(energy.key())
                .or_else(|| prices.get(DEFAULT_KEY))
                .copied(),
            || CoefficientError::EnergyNotFound {
                country: self.country.clone(),
                table: "energy.energy_price_c_e".to_string(),
                energy: energy.key().to_string(),
            },
        )
    }

    /// `subsidies.<year>.<tier>.vehicle_subsidies.<ENERGY>`. 어떤 이유로든 없으면 0.
    pub fn vehicle_subsidy(&self, year: &str, tier: &str, energy: &EnergyType) -> f64 {
        self.subsidy_number(&[year, tier, "vehicle_subsidies", energy.key()])
    }

    /// `subsidies.<year>.<tier>.infrastructure_subsidy_rate`. 없으면 0.
    pub fn infrastructure_subsidy_rate(&self, year: &str, tier: &str) -> f64 {
        self.subsidy_number(&[year, tier, "infrastructure_subsidy_rate"])
    }

    fn subsidy_number(&self, path: &[&str]) -> f64 {
        let mut node = &self.subsidies;
        for key in path {
            match node.get(*key) {
                Some(next) => node = next,
                None => return 0.0,
            }
        }
        node.as_f64().unwrap_or(0.0)
    }
}

/// 불변 계수 저장소. 계산기는 이를 빌려서 사용한다.
#[derive(Debug, Clone, Default)]
pub struct CoefficientStore {
    source: Option<PathBuf>,
    countries: BTreeMap<String, CountryCoefficients>,
}

impl CoefficientStore {
    /// 파일에서 저장소를 로드한다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoefficientError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CoefficientError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut store = Self::from_json_str(&content)?;
        store.source = Some(path.to_path_buf());
        info!(
            path = %path.display(),
            countries = store.countries.len(),
            "coefficient store loaded"
        );
        Ok(store)
    }

    /// JSON 문자열에서 저장소를 만든다. 국가 이름이 겹치면 뒤의 항목이 남는다.
    pub fn from_json_str(content: &str) -> Result<Self, CoefficientError> {
        let doc: CoefficientDocument = serde_json::from_str(content)?;
        let countries = doc
            .countries
            .into_iter()
            .map(|c| (c.country.clone(), c))
            .collect();
        Ok(Self {
            source: None,
            countries,
        })
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn country(&self, name: &str) -> Result<&CountryCoefficients, CoefficientError> {
        require(self.countries.get(name), || {
            CoefficientError::CountryNotFound(name.to_string())
        })
    }

    pub fn country_names(&self) -> impl Iterator<Item = &str> {
        self.countries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}
