//! Domain layer - car records, the car form schema and dashboard records

mod dashboard;
mod form;
mod numeric;
mod save;
mod vehicle;

pub use dashboard::{CalendarEvent, Task, TaskStatus};
pub use form::{
    CarField, FieldKind, FieldSource, FormError, CONDITION_OPTIONS, ENGINE_TYPE_OPTIONS,
    STATUS_OPTIONS, TRANSMISSION_OPTIONS,
};
pub use numeric::{parse_leading_decimal, parse_leading_int};
pub use save::{SaveIntent, SaveOutcome, SaveRequest, CARS_COLLECTION};
pub use vehicle::VehicleRecord;
