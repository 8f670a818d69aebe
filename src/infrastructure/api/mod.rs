//! Dashboard backend API - reqwest client and the save transport seam

mod client;
mod error;

pub use client::{ApiClient, Transport, EVENTS_PATH, TASKS_PATH};
pub use error::ApiError;
