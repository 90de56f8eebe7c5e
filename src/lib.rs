//! 트럭/선박의 총소유비용(TCO) 계산 엔진.
//! 계산 로직을 라이브러리로 분리하여 CLI 외의 표시 계층에서도 그대로 호출할 수 있게 한다.

pub mod app;
pub mod asset;
pub mod capex;
pub mod coefficients;
pub mod config;
pub mod energy;
pub mod finance;
pub mod opex;
pub mod residual_value;
pub mod tco;
pub mod ui_cli;

pub use asset::AssetType;
pub use energy::EnergyType;
pub use tco::{ScenarioInput, ScenarioReport, TcoCalculator, TcoError};
