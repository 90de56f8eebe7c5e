//! 할인/상각 관련 공용 함수. CAPEX 단계와 TCO 집계가 같은 함수를 쓴다.

use serde::{Deserialize, Serialize};

/// 자본회수계수(CRF).
///
/// CRF = r(1+r)^N / ((1+r)^N - 1), r = 0 이면 1/N. N = 0 이면 0을 돌려준다.
pub fn capital_recovery_factor(rate: f64, years: u32) -> f64 {
    if years == 0 {
        return 0.0;
    }
    if rate == 0.0 {
        return 1.0 / years as f64;
    }
    let factor = (1.0 + rate).powf(years as f64);
    rate * factor / (factor - 1.0)
}

/// n년 뒤 금액의 현재가치 value/(1+r)^n.
pub fn discount(value: f64, rate: f64, year: u32) -> f64 {
    value / (1.0 + rate).powf(year as f64)
}

/// 연도별 현재가치.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearPresentValue {
    pub year: u32,
    pub pv: f64,
}

/// 1..=years 동안 매년 `annual` 이 발생할 때 연도별 현가를 구한다.
pub fn present_value_series(annual: f64, rate: f64, years: u32) -> Vec<YearPresentValue> {
    (1..=years)
        .map(|year| YearPresentValue {
            year,
            pv: discount(annual, rate, year),
        })
        .collect()
}
