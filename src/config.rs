use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 결과 출력 형식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// 요약 표 형태 텍스트
    #[default]
    Text,
    /// `ScenarioReport` 전체 JSON
    Json,
}

/// 자산 종류별 계수 저장소 경로.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabasePaths {
    pub trucks: PathBuf,
    pub ships: PathBuf,
}

impl Default for DatabasePaths {
    fn default() -> Self {
        Self {
            trucks: PathBuf::from("data/db_trucks.json"),
            ships: PathBuf::from("data/db_ships.json"),
        }
    }
}

/// 시나리오에서 생략된 값에 쓰는 기본값.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDefaults {
    pub discount_rate: f64,
    pub annual_distance_travel: f64,
}

impl Default for ScenarioDefaults {
    fn default() -> Self {
        Self {
            discount_rate: 0.04,
            annual_distance_travel: 80_000.0,
        }
    }
}

/// 애플리케이션 설정을 표현한다. 빠진 항목은 기본값으로 채운다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputFormat,
    #[serde(default)]
    pub database: DatabasePaths,
    #[serde(default)]
    pub defaults: ScenarioDefaults,
}

/// 설정 파일 처리 오류. 입출력/파싱 오류는 파일 경로를 함께 담는다.
#[derive(Debug)]
pub enum ConfigError {
    /// 읽기/쓰기 실패
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// TOML 해석 실패
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// TOML 변환 실패
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "설정 파일 입출력 오류({}): {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "설정 파일 파싱 오류({}): {source}", path.display())
            }
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Serialize(e) => Some(e),
        }
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        let cfg = Config::default();
        cfg.save(path)?;
        return Ok(cfg);
    }
    let content = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Config {
    /// 설정을 TOML로 저장한다.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, content).map_err(|e| io_error(path, e))
    }
}
