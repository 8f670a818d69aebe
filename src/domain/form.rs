//! Car form schema - the fixed set of inputs the car dialog exposes

use std::collections::HashMap;

use thiserror::Error;

/// Errors raised while reading the car form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("car form has no `{field}` input")]
    MissingField { field: &'static str },
}

pub const STATUS_OPTIONS: &[&str] = &["", "available", "in_use", "in_service", "reserved", "sold"];
pub const CONDITION_OPTIONS: &[&str] = &["", "new", "excellent", "good", "fair", "poor"];
pub const ENGINE_TYPE_OPTIONS: &[&str] = &["", "petrol", "diesel", "hybrid", "electric", "gas"];
pub const TRANSMISSION_OPTIONS: &[&str] = &["", "manual", "automatic", "robot", "cvt"];

/// How a field's raw text is interpreted on submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Selects create vs update; never part of the body
    Identifier,
    Text,
    /// Fixed option list, first option is empty
    Choice(&'static [&'static str]),
    Integer,
    Decimal,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarField {
    Id,
    Brand,
    Model,
    Year,
    Vin,
    LicensePlate,
    Color,
    Status,
    Condition,
    EngineType,
    EngineVolume,
    Transmission,
    Horsepower,
    Mileage,
    PurchaseDate,
    PurchasePrice,
    SaleDate,
    SalePrice,
    CurrentValue,
    InsuranceCost,
    MaintenanceCost,
    FuelCost,
    Description,
}

impl CarField {
    /// Dialog order
    pub const ALL: [CarField; 23] = [
        CarField::Id,
        CarField::Brand,
        CarField::Model,
        CarField::Year,
        CarField::Vin,
        CarField::LicensePlate,
        CarField::Color,
        CarField::Status,
        CarField::Condition,
        CarField::EngineType,
        CarField::EngineVolume,
        CarField::Transmission,
        CarField::Horsepower,
        CarField::Mileage,
        CarField::PurchaseDate,
        CarField::PurchasePrice,
        CarField::SaleDate,
        CarField::SalePrice,
        CarField::CurrentValue,
        CarField::InsuranceCost,
        CarField::MaintenanceCost,
        CarField::FuelCost,
        CarField::Description,
    ];

    /// Wire name, also the lookup key into a [`FieldSource`]
    pub fn name(&self) -> &'static str {
        match self {
            CarField::Id => "id",
            CarField::Brand => "brand",
            CarField::Model => "model",
            CarField::Year => "year",
            CarField::Vin => "vin",
            CarField::LicensePlate => "license_plate",
            CarField::Color => "color",
            CarField::Status => "status",
            CarField::Condition => "condition",
            CarField::EngineType => "engine_type",
            CarField::EngineVolume => "engine_volume",
            CarField::Transmission => "transmission",
            CarField::Horsepower => "horsepower",
            CarField::Mileage => "mileage",
            CarField::PurchaseDate => "purchase_date",
            CarField::PurchasePrice => "purchase_price",
            CarField::SaleDate => "sale_date",
            CarField::SalePrice => "sale_price",
            CarField::CurrentValue => "current_value",
            CarField::InsuranceCost => "insurance_cost",
            CarField::MaintenanceCost => "maintenance_cost",
            CarField::FuelCost => "fuel_cost",
            CarField::Description => "description",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CarField::Id => "ID (blank = new car)",
            CarField::Brand => "Brand",
            CarField::Model => "Model",
            CarField::Year => "Year",
            CarField::Vin => "VIN",
            CarField::LicensePlate => "License plate",
            CarField::Color => "Color",
            CarField::Status => "Status",
            CarField::Condition => "Condition",
            CarField::EngineType => "Engine type",
            CarField::EngineVolume => "Engine volume, l",
            CarField::Transmission => "Transmission",
            CarField::Horsepower => "Horsepower",
            CarField::Mileage => "Mileage, km",
            CarField::PurchaseDate => "Purchase date",
            CarField::PurchasePrice => "Purchase price",
            CarField::SaleDate => "Sale date",
            CarField::SalePrice => "Sale price",
            CarField::CurrentValue => "Current value",
            CarField::InsuranceCost => "Insurance cost",
            CarField::MaintenanceCost => "Maintenance cost",
            CarField::FuelCost => "Fuel cost",
            CarField::Description => "Description",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            CarField::Id => FieldKind::Identifier,
            CarField::Brand
            | CarField::Model
            | CarField::Vin
            | CarField::LicensePlate
            | CarField::Color
            | CarField::Description => FieldKind::Text,
            CarField::Status => FieldKind::Choice(STATUS_OPTIONS),
            CarField::Condition => FieldKind::Choice(CONDITION_OPTIONS),
            CarField::EngineType => FieldKind::Choice(ENGINE_TYPE_OPTIONS),
            CarField::Transmission => FieldKind::Choice(TRANSMISSION_OPTIONS),
            CarField::Year | CarField::Horsepower | CarField::Mileage => FieldKind::Integer,
            CarField::EngineVolume
            | CarField::PurchasePrice
            | CarField::SalePrice
            | CarField::CurrentValue
            | CarField::InsuranceCost
            | CarField::MaintenanceCost
            | CarField::FuelCost => FieldKind::Decimal,
            CarField::PurchaseDate | CarField::SaleDate => FieldKind::Date,
        }
    }
}

/// Anything the car form can be read from at submit time.
///
/// Lookups go by wire name; `None` means the view has no such input at all,
/// which is different from an input holding an empty string.
pub trait FieldSource {
    fn field_value(&self, name: &str) -> Option<&str>;

    /// Reads a schema field, failing with the field's name if the input is missing.
    fn require(&self, field: CarField) -> Result<&str, FormError> {
        self.field_value(field.name())
            .ok_or(FormError::MissingField {
                field: field.name(),
            })
    }
}

impl FieldSource for HashMap<String, String> {
    fn field_value(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = CarField::ALL.iter().map(|f| f.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CarField::ALL.len());
    }

    #[test]
    fn test_choice_fields_start_with_empty_option() {
        for field in CarField::ALL {
            if let FieldKind::Choice(options) = field.kind() {
                assert_eq!(options.first(), Some(&""), "{field:?}");
            }
        }
    }

    #[test]
    fn test_require_reports_missing_field_by_name() {
        let source: HashMap<String, String> = HashMap::new();
        assert_eq!(
            source.require(CarField::LicensePlate),
            Err(FormError::MissingField {
                field: "license_plate"
            })
        );
    }

    #[test]
    fn test_require_returns_empty_input_as_is() {
        let mut source = HashMap::new();
        source.insert("vin".to_string(), String::new());
        assert_eq!(source.require(CarField::Vin), Ok(""));
    }

    #[test]
    fn test_missing_field_message() {
        let err = FormError::MissingField { field: "year" };
        assert_eq!(err.to_string(), "car form has no `year` input");
    }
}
