use serde::Serialize;

use super::form::{CarField, FieldSource, FormError};
use super::numeric::{parse_leading_decimal, parse_leading_int};

/// Car record as sent to the backend.
///
/// Every field except `mileage` is omitted from the JSON body when the input
/// was empty or did not parse. `mileage` falls back to `0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VehicleRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horsepower: Option<i64>,
    pub mileage: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VehicleRecord {
    /// Builds a record from the current form state.
    pub fn from_source<S: FieldSource + ?Sized>(source: &S) -> Result<Self, FormError> {
        let text = |field: CarField| source.require(field).map(non_empty);
        let int = |field: CarField| source.require(field).map(parse_leading_int);
        let decimal = |field: CarField| source.require(field).map(parse_leading_decimal);

        Ok(Self {
            brand: text(CarField::Brand)?,
            model: text(CarField::Model)?,
            year: int(CarField::Year)?,
            vin: text(CarField::Vin)?,
            license_plate: text(CarField::LicensePlate)?,
            color: text(CarField::Color)?,
            status: text(CarField::Status)?,
            condition: text(CarField::Condition)?,
            engine_type: text(CarField::EngineType)?,
            engine_volume: decimal(CarField::EngineVolume)?,
            transmission: text(CarField::Transmission)?,
            horsepower: int(CarField::Horsepower)?,
            mileage: int(CarField::Mileage)?.unwrap_or(0),
            purchase_date: text(CarField::PurchaseDate)?,
            purchase_price: decimal(CarField::PurchasePrice)?,
            sale_date: text(CarField::SaleDate)?,
            sale_price: decimal(CarField::SalePrice)?,
            current_value: decimal(CarField::CurrentValue)?,
            insurance_cost: decimal(CarField::InsuranceCost)?,
            maintenance_cost: decimal(CarField::MaintenanceCost)?,
            fuel_cost: decimal(CarField::FuelCost)?,
            description: text(CarField::Description)?,
        })
    }
}

fn non_empty(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_string())
}
