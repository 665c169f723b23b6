//! Event Routes
//!
//! CRUD endpoints for team events.
//!
//! - GET /api/events - List all events
//! - POST /api/events - Create an event
//! - GET /api/events/:id - Get an event
//! - PUT /api/events/:id - Replace an event's fields
//! - DELETE /api/events/:id - Delete an event

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::EventRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::AuthSession;
use crate::api::state::AppState;
use crate::store::{parse_event_date, Event, NewEvent};

const MAX_TITLE_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 5000;

/// GET /api/events
///
/// List all events, ordered by date.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    _session: AuthSession,
) -> ApiResult<Json<Vec<Event>>> {
    let events = state.store.list_events().await?;
    Ok(Json(events))
}

/// GET /api/events/:id
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    _session: AuthSession,
    Path(id): Path<String>,
) -> ApiResult<Json<Event>> {
    let event = state.store.get_event(&id).await?;
    Ok(Json(event))
}

/// POST /api/events
///
/// Create a new event owned by the signed-in member.
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Json(req): Json<EventRequest>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    let new = validate_event_request(req)?;

    let event = state.store.create_event(new, Some(&session.email)).await?;

    tracing::info!(event_id = %event.id, created_by = %session.email, "Created event");

    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/events/:id
///
/// Replace title, description, date and image of an event.
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(id): Path<String>,
    Json(req): Json<EventRequest>,
) -> ApiResult<Json<Event>> {
    let new = validate_event_request(req)?;

    let event = state.store.update_event(&id, new).await?;

    tracing::info!(event_id = %event.id, updated_by = %session.email, "Updated event");

    Ok(Json(event))
}

/// DELETE /api/events/:id
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.delete_event(&id).await?;

    tracing::info!(event_id = %id, deleted_by = %session.email, "Deleted event");

    Ok(StatusCode::NO_CONTENT)
}

/// Validate an event request and convert it into a store draft
fn validate_event_request(req: EventRequest) -> ApiResult<NewEvent> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(ApiError::Validation("Title cannot be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ApiError::Validation(format!(
            "Title exceeds maximum length of {} characters",
            MAX_TITLE_LEN
        )));
    }

    let description = req.description.trim();
    if description.is_empty() {
        return Err(ApiError::Validation("Description cannot be empty".to_string()));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ApiError::Validation(format!(
            "Description exceeds maximum length of {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }

    let date = parse_event_date(&req.date).ok_or_else(|| {
        ApiError::Validation(format!(
            "Invalid date: '{}'. Use YYYY-MM-DD or RFC 3339",
            req.date
        ))
    })?;

    Ok(NewEvent::new(title, description, date).image_url(req.image_url.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> EventRequest {
        EventRequest {
            title: "  Team lunch ".to_string(),
            description: "Tacos".to_string(),
            date: "2024-07-04".to_string(),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_validate_trims_fields() {
        let new = validate_event_request(request()).unwrap();
        assert_eq!(new.title, "Team lunch");
        assert_eq!(new.image_url, "");
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let blank_title = EventRequest {
            title: "   ".to_string(),
            ..request()
        };
        assert!(validate_event_request(blank_title).is_err());

        let blank_description = EventRequest {
            description: String::new(),
            ..request()
        };
        assert!(validate_event_request(blank_description).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_date() {
        let bad = EventRequest {
            date: "next friday".to_string(),
            ..request()
        };
        assert!(matches!(
            validate_event_request(bad),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_title_length() {
        let long = EventRequest {
            title: "x".repeat(MAX_TITLE_LEN + 1),
            ..request()
        };
        assert!(validate_event_request(long).is_err());
    }
}
