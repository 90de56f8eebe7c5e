use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coefficients::{lookup_or_default, CoefficientError, CoefficientStore};
use crate::energy::EnergyType;

use super::{OpexBreakdown, OpexMeta, OpexResult};

/// 선박 운영 입력.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipOpexInput {
    pub purchase_price: f64,
    /// 총톤수
    #[serde(rename = "GT")]
    pub gross_tonnage: f64,
    /// 연간 에너지 소비 [kWh]
    pub consumption_energy: f64,
    pub maintenance_cost: f64,
    pub crew_count: f64,
    /// 선원 전체 월 비용. 0이면 인원 × 국가 월급여로 계산.
    pub crew_monthly_total: f64,
    pub fuel_mass_kg: f64,
    pub days_in_port_per_year: f64,
    pub ship_class: String,
    pub registration_country: String,
    /// 운항 국가(항만비 기준). 없으면 등록 국가.
    pub country_oper: Option<String>,
    pub type_energy: EnergyType,
}

impl Default for ShipOpexInput {
    fn default() -> Self {
        Self {
            purchase_price: 0.0,
            gross_tonnage: 0.0,
            consumption_energy: 0.0,
            maintenance_cost: 0.0,
            crew_count: 0.0,
            crew_monthly_total: 0.0,
            fuel_mass_kg: 0.0,
            days_in_port_per_year: 0.0,
            ship_class: "fishing_small".to_string(),
            registration_country: "France".to_string(),
            country_oper: None,
            type_energy: EnergyType::Diesel,
        }
    }
}

impl ShipOpexInput {
    pub fn operating_country(&self) -> &str {
        self.country_oper
            .as_deref()
            .unwrap_or(&self.registration_country)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ShipOpexBreakdown {
    pub taxes: f64,
    pub ports: f64,
    pub insurance: f64,
    pub crew: f64,
    pub maintenance: f64,
    pub energy: f64,
}

impl ShipOpexBreakdown {
    pub fn total(&self) -> f64 {
        self.taxes + self.ports + self.insurance + self.crew + self.maintenance + self.energy
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShipOpexMeta {
    pub ship_class: String,
    pub registration_country: String,
    /// 항만비에 쓴 운항 국가
    pub operating_country: String,
    pub type_energy: EnergyType,
}

pub struct ShipOpexCalculator<'a> {
    store: &'a CoefficientStore,
}

impl<'a> ShipOpexCalculator<'a> {
    pub fn new(store: &'a CoefficientStore) -> Self {
        Self { store }
    }

    /// `residual_value`는 RV 계산기 결과로, 선체 보험가액에 쓴다.
    pub fn compute(
        &self,
        input: &ShipOpexInput,
        residual_value: f64,
    ) -> Result<OpexResult, CoefficientError> {
        let country = self.store.country(&input.registration_country)?;
        let coef = country.ship_opex()?;
        let port_coef = self.store.country(input.operating_country())?.ship_opex()?;
        let energy = &input.type_energy;
        let gt = input.gross_tonnage;

        let taxes = coef.tonnage_tax_per_gt * gt
            + input.fuel_mass_kg * lookup_or_default(&coef.fuel_tax_per_kg, energy.key(), 0.0);
        let ports = port_coef.port_fee_per_gt_day * gt * input.days_in_port_per_year;

        let insured_value = if residual_value > 0.0 {
            residual_value
        } else {
            input.purchase_price
        };
        let insurance = coef.hull_insurance_rate * insured_value + coef.pi_insurance_per_gt * gt;

        let crew = if input.crew_monthly_total > 0.0 {
            input.crew_monthly_total * 12.0
        } else {
            input.crew_count * coef.crew_monthly_wage * 12.0
        };
        let maintenance = if input.maintenance_cost > 0.0 {
            input.maintenance_cost
        } else {
            input.purchase_price * coef.maintenance_rate
        };
        let energy_cost = input.consumption_energy * country.require_energy_price(energy)?;

        let breakdown = ShipOpexBreakdown {
            taxes,
            ports,
            insurance,
            crew,
            maintenance,
            energy: energy_cost,
        };
        debug!(
            target: "tco.opex",
            energy = %energy,
            class = %input.ship_class,
            residual_value,
            total = breakdown.total(),
            "ship opex computed"
        );
        let meta = ShipOpexMeta {
            ship_class: input.ship_class.clone(),
            registration_country: input.registration_country.clone(),
            operating_country: input.operating_country().to_string(),
            type_energy: energy.clone(),
        };
        Ok(OpexResult::new(
            OpexBreakdown::Ship(breakdown),
            OpexMeta::Ship(meta),
        ))
    }
}
