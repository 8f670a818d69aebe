use reqwest::{Method, StatusCode};

use super::form::{CarField, FieldSource, FormError};
use super::vehicle::VehicleRecord;

/// Collection endpoint for cars
pub const CARS_COLLECTION: &str = "/api/cars";

/// Create or update, decided by the identifier input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveIntent {
    Create,
    Update(String),
}

impl SaveIntent {
    /// Any non-empty identifier means update; the raw text is used as-is.
    pub fn from_identifier(raw: &str) -> Self {
        if raw.is_empty() {
            SaveIntent::Create
        } else {
            SaveIntent::Update(raw.to_string())
        }
    }

    pub fn method(&self) -> Method {
        match self {
            SaveIntent::Create => Method::POST,
            SaveIntent::Update(_) => Method::PUT,
        }
    }

    pub fn path(&self) -> String {
        match self {
            SaveIntent::Create => CARS_COLLECTION.to_string(),
            SaveIntent::Update(id) => format!("{CARS_COLLECTION}/{id}"),
        }
    }
}

/// One network write, assembled from the car form at submit time
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub intent: SaveIntent,
    pub record: VehicleRecord,
}

impl SaveRequest {
    pub fn from_source<S: FieldSource + ?Sized>(source: &S) -> Result<Self, FormError> {
        let intent = SaveIntent::from_identifier(source.require(CarField::Id)?);
        let record = VehicleRecord::from_source(source)?;
        Ok(Self { intent, record })
    }

    pub fn method(&self) -> Method {
        self.intent.method()
    }

    pub fn path(&self) -> String {
        self.intent.path()
    }
}

/// What the backend said about a save; only the status class matters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(StatusCode),
    Rejected(StatusCode),
}

impl SaveOutcome {
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_success() {
            SaveOutcome::Saved(status)
        } else {
            SaveOutcome::Rejected(status)
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            SaveOutcome::Saved(status) | SaveOutcome::Rejected(status) => *status,
        }
    }
}
