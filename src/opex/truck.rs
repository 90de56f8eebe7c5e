use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coefficients::{lookup_or_default, CoefficientError, CoefficientStore};
use crate::energy::EnergyType;

use super::{OpexBreakdown, OpexMeta, OpexResult};

/// 트럭 운영 입력(차량 1대 기준, 결과는 대수를 곱한다).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TruckOpexInput {
    pub purchase_price: f64,
    pub type_energy: EnergyType,
    pub registration_country: String,
    pub vehicle_weight_class: String,
    pub vehicle_number: u32,
    pub annual_distance_km: f64,
    /// 주행 km당 에너지 소비 [kWh/km]
    pub energy_consumption_kwh_per_km: f64,
    /// 연간 유지비. 0이면 국가 km당 단가로 추정한다.
    pub maintenance_cost: f64,
    /// 유료도로 주행 비율(0~1)
    pub toll_road_share: f64,
    pub driver_count: f64,
    /// 운전자 1인 연간 비용. 없으면 국가 기본값.
    pub driver_annual_cost: Option<f64>,
}

impl Default for TruckOpexInput {
    fn default() -> Self {
        Self {
            purchase_price: 0.0,
            type_energy: EnergyType::Diesel,
            registration_country: "France".to_string(),
            vehicle_weight_class: "light".to_string(),
            vehicle_number: 1,
            annual_distance_km: 0.0,
            energy_consumption_kwh_per_km: 0.0,
            maintenance_cost: 0.0,
            toll_road_share: 1.0,
            driver_count: 1.0,
            driver_annual_cost: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TruckOpexBreakdown {
    pub taxes: f64,
    pub insurance: f64,
    pub maintenance: f64,
    pub energy: f64,
    pub tolls: f64,
    pub driver: f64,
}

impl TruckOpexBreakdown {
    pub fn total(&self) -> f64 {
        self.taxes + self.insurance + self.maintenance + self.energy + self.tolls + self.driver
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TruckOpexMeta {
    pub vehicle_weight_class: String,
    pub registration_country: String,
    pub type_energy: EnergyType,
    pub vehicle_number: u32,
}

pub struct TruckOpexCalculator<'a> {
    store: &'a CoefficientStore,
}

impl<'a> TruckOpexCalculator<'a> {
    pub fn new(store: &'a CoefficientStore) -> Self {
        Self { store }
    }

    pub fn compute(&self, input: &TruckOpexInput) -> Result<OpexResult, CoefficientError> {
        let country = self.store.country(&input.registration_country)?;
        let coef = country.truck_opex()?;
        let energy = &input.type_energy;
        let class = input.vehicle_weight_class.as_str();
        let distance = input.annual_distance_km;
        let fleet = input.vehicle_number as f64;

        let price = country.require_energy_price(energy)?;
        let maintenance = if input.maintenance_cost > 0.0 {
            input.maintenance_cost
        } else {
            distance * lookup_or_default(&coef.maintenance_per_km, energy.key(), 0.0)
        };
        let driver_cost = input.driver_annual_cost.unwrap_or(coef.driver_annual_cost);

        let per_vehicle = TruckOpexBreakdown {
            taxes: lookup_or_default(&coef.annual_road_tax, class, 0.0),
            insurance: input.purchase_price * coef.insurance_rate,
            maintenance,
            energy: distance * input.energy_consumption_kwh_per_km * price,
            tolls: distance
                * input.toll_road_share.clamp(0.0, 1.0)
                * lookup_or_default(&coef.toll_rate_per_km, class, 0.0),
            driver: input.driver_count * driver_cost,
        };
        let breakdown = TruckOpexBreakdown {
            taxes: per_vehicle.taxes * fleet,
            insurance: per_vehicle.insurance * fleet,
            maintenance: per_vehicle.maintenance * fleet,
            energy: per_vehicle.energy * fleet,
            tolls: per_vehicle.tolls * fleet,
            driver: per_vehicle.driver * fleet,
        };

        debug!(
            target: "tco.opex",
            energy = %energy,
            fleet = input.vehicle_number,
            total = breakdown.total(),
            "truck opex computed"
        );
        let meta = TruckOpexMeta {
            vehicle_weight_class: input.vehicle_weight_class.clone(),
            registration_country: input.registration_country.clone(),
            type_energy: energy.clone(),
            vehicle_number: input.vehicle_number,
        };
        Ok(OpexResult::new(
            OpexBreakdown::Truck(breakdown),
            OpexMeta::Truck(meta),
        ))
    }
}
