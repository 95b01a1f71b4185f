use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub file_type: String,
    pub file_url: String,
    pub date_posted: String,
    pub category: Category,
}

impl Document {
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date_posted)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date_posted: String,
}

impl News {
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date_posted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
}

/// Body sent for user create/update. `id` is only present on update.
#[derive(Debug, Clone, Serialize)]
pub struct UserPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsPayload {
    pub title: String,
    pub description: String,
}

/// A file attached to a document upload.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentForm {
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub file: Option<Attachment>,
}

#[derive(Debug, Clone, Default)]
pub struct NewsForm {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    /// Blank keeps the current password on update.
    pub password: String,
    pub role_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Meeting,
    Deadline,
    Event,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Meeting => "meeting",
            EventKind::Deadline => "deadline",
            EventKind::Event => "event",
        }
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "meeting" => Ok(EventKind::Meeting),
            "deadline" => Ok(EventKind::Deadline),
            "event" => Ok(EventKind::Event),
            other => Err(format!(
                "Invalid event type '{}'. Use 'meeting', 'deadline' or 'event'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: Option<String>,
    pub kind: EventKind,
}

#[derive(Debug, Clone)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: Option<String>,
    pub kind: EventKind,
}

/// Parses the backend's `datePosted` values, which are RFC 3339 or a bare
/// `YYYY-MM-DDTHH:MM:SS` local timestamp depending on the endpoint.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
