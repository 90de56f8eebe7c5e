use serde::{Deserialize, Serialize};

/// 계수 테이블에서 에너지별 값이 없을 때 참조하는 키.
pub const DEFAULT_KEY: &str = "DEFAULT";

/// 정규화된 에너지(파워트레인) 종류.
///
/// 별칭 테이블에 없는 문자열은 대문자로 바꿔 `Other`에 그대로 담는다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EnergyType {
    #[default]
    Diesel,
    Bev,
    Hev,
    Fcet,
    Hice,
    Biodiesel,
    EDiesel,
    Hvo,
    Lng,
    Other(String),
}

impl EnergyType {
    /// 대소문자 무시 별칭 해석. 빈 문자열은 DIESEL.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return EnergyType::Diesel;
        }
        match s.to_ascii_lowercase().as_str() {
            "diesel" => EnergyType::Diesel,
            "bev" => EnergyType::Bev,
            "hev" => EnergyType::Hev,
            "fcet" | "fcev" => EnergyType::Fcet,
            "hice" => EnergyType::Hice,
            "biodiesel" | "bio_diesel" => EnergyType::Biodiesel,
            "e_diesel" | "ediesel" => EnergyType::EDiesel,
            "hvo" => EnergyType::Hvo,
            "lng" => EnergyType::Lng,
            _ => EnergyType::Other(s.to_uppercase()),
        }
    }

    /// 계수 테이블 조회에 쓰는 정규화 키.
    pub fn key(&self) -> &str {
        match self {
            EnergyType::Diesel => "DIESEL",
            EnergyType::Bev => "BEV",
            EnergyType::Hev => "HEV",
            EnergyType::Fcet => "FCET",
            EnergyType::Hice => "HICE",
            EnergyType::Biodiesel => "BIODIESEL",
            EnergyType::EDiesel => "E_DIESEL",
            EnergyType::Hvo => "HVO",
            EnergyType::Lng => "LNG",
            EnergyType::Other(s) => s.as_str(),
        }
    }

    pub fn is_battery_electric(&self) -> bool {
        matches!(self, EnergyType::Bev)
    }
}

/// 문자열 그대로 정규화 키를 돌려준다.
pub fn norm_energy(raw: &str) -> String {
    EnergyType::parse(raw).key().to_string()
}

impl From<String> for EnergyType {
    fn from(value: String) -> Self {
        EnergyType::parse(&value)
    }
}

impl From<&str> for EnergyType {
    fn from(value: &str) -> Self {
        EnergyType::parse(value)
    }
}

impl From<EnergyType> for String {
    fn from(value: EnergyType) -> Self {
        value.key().to_string()
    }
}

impl std::fmt::Display for EnergyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
