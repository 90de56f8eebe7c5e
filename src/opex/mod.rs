//! 연간 운영비(OPEX) 계산기. 자산 종류마다 내역 항목이 다르므로
//! 결과를 태그된 열거형 [`OpexBreakdown`]으로 돌려준다.

pub mod ship;
pub mod truck;

use serde::Serialize;

pub use ship::{ShipOpexBreakdown, ShipOpexCalculator, ShipOpexInput, ShipOpexMeta};
pub use truck::{TruckOpexBreakdown, TruckOpexCalculator, TruckOpexInput, TruckOpexMeta};

/// 자산 종류별 OPEX 내역.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "asset_type", rename_all = "lowercase")]
pub enum OpexBreakdown {
    Truck(TruckOpexBreakdown),
    Ship(ShipOpexBreakdown),
}

impl OpexBreakdown {
    pub fn total(&self) -> f64 {
        match self {
            OpexBreakdown::Truck(b) => b.total(),
            OpexBreakdown::Ship(b) => b.total(),
        }
    }
}

/// 정규화된 입력 에코.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "asset_type", rename_all = "lowercase")]
pub enum OpexMeta {
    Truck(TruckOpexMeta),
    Ship(ShipOpexMeta),
}

/// OPEX 계산 결과. `opex_total`은 내역 합계다.
#[derive(Debug, Clone, Serialize)]
pub struct OpexResult {
    pub opex_total: f64,
    pub breakdown: OpexBreakdown,
    pub meta: OpexMeta,
}

impl OpexResult {
    pub fn new(breakdown: OpexBreakdown, meta: OpexMeta) -> Self {
        Self {
            opex_total: breakdown.total(),
            breakdown,
            meta,
        }
    }
}
