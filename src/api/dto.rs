//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON with camelCase keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// EVENT DTOs
// ============================================

/// Create/update event request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD` or RFC 3339
    pub date: String,
    /// Image URL returned by the upload endpoint; may be empty
    #[serde(default)]
    pub image_url: String,
}

// ============================================
// UPLOAD DTOs
// ============================================

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Public URL of the stored image
    pub url: String,
}

// ============================================
// AUTH DTOs
// ============================================

/// Login request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    #[serde(default)]
    pub access_code: String,
}

/// The signed-in user as seen by the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub email: String,
    pub name: String,
}

/// Login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
    pub expires_at: DateTime<Utc>,
}

/// Current session response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: SessionUser,
    pub expires_at: DateTime<Utc>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, unhealthy
    pub status: String,
    /// Store status: ok, error
    pub store: String,
    /// Number of stored events, when the store is reachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<usize>,
    pub uptime_seconds: u64,
    pub version: String,
}
