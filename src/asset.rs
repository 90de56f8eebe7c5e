use serde::{Deserialize, Serialize};

/// 평가 대상 자산 종류. 시나리오의 `asset_type` 태그로 분기한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum AssetType {
    Truck,
    Ship,
}

impl AssetType {
    /// "truck" / "ship" 만 허용한다(대소문자 무시). 그 외는 `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "truck" => Some(AssetType::Truck),
            "ship" => Some(AssetType::Ship),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Truck => "truck",
            AssetType::Ship => "ship",
        }
    }

    /// `rv_truck`, `opex_ship` 처럼 계수 테이블 이름을 만든다.
    pub fn table_name(&self, prefix: &str) -> String {
        format!("{prefix}_{}", self.as_str())
    }
}

impl TryFrom<String> for AssetType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AssetType::parse(&value).ok_or_else(|| format!("알 수 없는 자산 종류: '{value}'"))
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
