use std::fs;

use tracing::info;

use crate::asset::AssetType;
use crate::coefficients::{CoefficientError, CoefficientStore};
use crate::config::{self, OutputFormat};
use crate::tco::{TcoCalculator, TcoError};
use crate::ui_cli::{self, Cli, Command};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(config::ConfigError),
    /// 계수 저장소 로드/조회 오류
    Coefficient(CoefficientError),
    /// 시나리오 평가 오류
    Tco(TcoError),
    /// 결과 직렬화 오류
    Json(serde_json::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Coefficient(e) => write!(f, "계수 오류: {e}"),
            AppError::Tco(e) => write!(f, "TCO 계산 오류: {e}"),
            AppError::Json(e) => write!(f, "결과 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(value: config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<CoefficientError> for AppError {
    fn from(value: CoefficientError) -> Self {
        AppError::Coefficient(value)
    }
}

impl From<TcoError> for AppError {
    fn from(value: TcoError) -> Self {
        AppError::Tco(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        AppError::Json(value)
    }
}

/// 설정을 로드하고 명령을 실행한다.
pub fn run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = config::load_or_default(&cli.config)?;
    if let Some(path) = cli.truck_db {
        cfg.database.trucks = path;
    }
    if let Some(path) = cli.ship_db {
        cfg.database.ships = path;
    }

    match cli.command {
        Command::Run { scenarios, json } => {
            let format = if json { OutputFormat::Json } else { cfg.output };
            let calculator = TcoCalculator::from_config(&cfg)?;
            let mut reports = Vec::with_capacity(scenarios.len());
            for path in &scenarios {
                info!(path = %path.display(), "evaluating scenario");
                let content = fs::read_to_string(path)?;
                reports.push(calculator.run_scenario_json(&content)?);
            }
            match format {
                OutputFormat::Json if reports.len() == 1 => {
                    println!("{}", serde_json::to_string_pretty(&reports[0])?);
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
                OutputFormat::Text => {
                    for report in &reports {
                        println!("{}", ui_cli::render_report(report));
                    }
                }
            }
        }
        Command::Countries { asset } => {
            let path = match asset {
                AssetType::Truck => &cfg.database.trucks,
                AssetType::Ship => &cfg.database.ships,
            };
            let store = CoefficientStore::load(path)?;
            for name in store.country_names() {
                println!("{name}");
            }
        }
    }
    Ok(())
}
