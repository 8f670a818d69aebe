//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - reqwest client for the dashboard backend
//! - Tokio runtime bridge for async operations

pub mod api;
pub mod runtime;

pub use api::{ApiClient, ApiError, Transport};
pub use runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
