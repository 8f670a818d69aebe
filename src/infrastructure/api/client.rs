//! HTTP client for the dashboard backend

use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use reqwest::StatusCode;
use tracing::debug;

use super::error::ApiError;
use crate::domain::{CalendarEvent, SaveRequest, Task};

pub const TASKS_PATH: &str = "/api/tasks";
pub const EVENTS_PATH: &str = "/api/events";

const ISO_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Carries one car save to the backend and reports the raw status.
///
/// Only a missing response is an error; any status the server sends back,
/// including 4xx/5xx, is a successful send.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &SaveRequest) -> Result<StatusCode, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        reqwest::Url::parse(base_url).map_err(|err| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn fetch_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let tasks = self
            .http
            .get(self.endpoint(TASKS_PATH))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Task>>()
            .await?;
        debug!(count = tasks.len(), "tasks loaded");
        Ok(tasks)
    }

    /// Events starting within `day`, bounds inclusive.
    pub async fn fetch_events(&self, day: NaiveDate) -> Result<Vec<CalendarEvent>, ApiError> {
        let (start, end) = day_bounds(day);
        let events = self
            .http
            .get(self.endpoint(EVENTS_PATH))
            .query(&[
                ("start", start.format(ISO_SECONDS).to_string()),
                ("end", end.format(ISO_SECONDS).to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<CalendarEvent>>()
            .await?;
        debug!(count = events.len(), %day, "events loaded");
        Ok(events)
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn send(&self, request: &SaveRequest) -> Result<StatusCode, ApiError> {
        let response = self
            .http
            .request(request.method(), self.endpoint(&request.path()))
            .json(&request.record)
            .send()
            .await?;
        Ok(response.status())
    }
}

fn day_bounds(day: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = day.and_time(NaiveTime::MIN);
    (start, start + chrono::Duration::seconds(86_399))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unparsable_base_url() {
        let err = ApiClient::new("not a url", None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://127.0.0.1:5000/", None).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
        assert_eq!(client.endpoint("/api/cars"), "http://127.0.0.1:5000/api/cars");
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let client = ApiClient::new("http://crm.local/office", None).unwrap();
        assert_eq!(
            client.endpoint("/api/cars/42"),
            "http://crm.local/office/api/cars/42"
        );
    }

    #[test]
    fn test_day_bounds_cover_whole_day() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let (start, end) = day_bounds(day);
        assert_eq!(start.format(ISO_SECONDS).to_string(), "2025-03-01T00:00:00");
        assert_eq!(end.format(ISO_SECONDS).to_string(), "2025-03-01T23:59:59");
    }
}
