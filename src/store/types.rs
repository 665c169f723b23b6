//! Core data types for the Eventdash store
//!
//! - `Event`: a team calendar item with title, description, date and image
//! - `NewEvent`: validated field set used to create or replace an event
//! - `Member`: a team member who may sign in to the dashboard
//! - `Session`: a bearer token bound to a member email

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A stored event record
///
/// Serialized with camelCase keys, which is the shape the dashboard reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Opaque identifier (UUID v4)
    pub id: String,
    pub title: String,
    pub description: String,
    /// Calendar date, stored as midnight UTC
    pub date: DateTime<Utc>,
    /// Public URL of the event image, empty when none was uploaded
    #[serde(default)]
    pub image_url: String,
    /// Email of the member who created the event
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating or updating an event
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub image_url: String,
}

impl NewEvent {
    /// Create an event draft for the given date
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            date,
            image_url: String::new(),
        }
    }

    /// Builder method: set the image URL
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }
}

/// A registered team member
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Opaque bearer token
    pub token: String,
    /// Email of the member the session belongs to
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Check whether the session is expired at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Parse an event date
///
/// Accepts a plain calendar date (`2024-05-01`, what a date input submits) or a
/// full RFC 3339 timestamp. Timestamps are truncated to midnight UTC of their
/// UTC calendar day.
pub fn parse_event_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Convert stored milliseconds back to a UTC timestamp
pub(crate) fn from_millis(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}

/// Current time at the millisecond precision the store keeps
pub(crate) fn now_millis() -> DateTime<Utc> {
    from_millis(Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_plain_date() {
        let dt = parse_event_date("2024-05-01").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 5, 1));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_rfc3339_truncates_time() {
        let dt = parse_event_date("2024-05-01T17:45:00Z").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-05-01T00:00:00+00:00");

        // 23:30 at -02:00 is already the next day in UTC
        let dt = parse_event_date("2024-05-01T23:30:00-02:00").unwrap();
        assert_eq!(dt.day(), 2);
    }

    #[test]
    fn test_parse_invalid_date() {
        assert!(parse_event_date("").is_none());
        assert!(parse_event_date("tomorrow").is_none());
        assert!(parse_event_date("2024-13-40").is_none());
    }

    #[test]
    fn test_event_serializes_camel_case() {
        let now = from_millis(0);
        let event = Event {
            id: "e1".to_string(),
            title: "Launch".to_string(),
            description: "Ship it".to_string(),
            date: now,
            image_url: "/uploads/a.png".to_string(),
            created_by: None,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["imageUrl"], "/uploads/a.png");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn test_session_expiry() {
        let session = Session {
            token: "t".to_string(),
            email: "ada@example.com".to_string(),
            expires_at: from_millis(1_000),
        };
        assert!(!session.is_expired(from_millis(999)));
        assert!(session.is_expired(from_millis(1_000)));
    }
}
