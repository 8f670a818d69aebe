//! Records the dashboard reads from the backend (`/api/tasks`, `/api/events`)

use chrono::NaiveDateTime;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
    #[serde(other)]
    Other,
}

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
            TaskStatus::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Timelike};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_task_from_backend_json() {
        let task: Task = serde_json::from_value(json!({
            "id": 3,
            "title": "Составить отчет по продажам",
            "description": "Еженедельный отчет",
            "priority": "low",
            "status": "completed",
            "due_date": "2025-03-01T09:30:00.123456",
            "completed_at": null,
            "created_at": "2025-02-27T08:00:00"
        }))
        .unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.due_date.unwrap().minute(), 30);
        assert_eq!(task.completed_at, None);
    }

    #[test]
    fn test_unknown_task_status() {
        let task: Task = serde_json::from_value(json!({
            "id": 1,
            "title": "x",
            "status": "archived"
        }))
        .unwrap();
        assert_eq!(task.status, TaskStatus::Other);
        assert_eq!(task.priority, "");
    }

    #[test]
    fn test_event_from_backend_json() {
        let event: CalendarEvent = serde_json::from_value(json!({
            "id": 7,
            "title": "Звонок поставщику",
            "description": "Обсуждение условий поставки",
            "start": "2025-03-01T14:00:00",
            "end": "2025-03-01T14:30:00",
            "type": "call",
            "location": "",
            "status": "scheduled"
        }))
        .unwrap();
        assert_eq!(event.kind, "call");
        assert_eq!(
            event.start.date(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert_eq!(event.end.hour(), 14);
    }
}
