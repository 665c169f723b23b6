//! Request Extractors
//!
//! `AuthSession` resolves the bearer token on a request to a live session and
//! rejects the request with 401 otherwise.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::auth::bearer_token;

/// The session attached to an authenticated request
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

        let session = state
            .store
            .find_session(token, Utc::now())
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Session expired or invalid".to_string()))?;

        Ok(AuthSession {
            token: session.token,
            email: session.email,
            expires_at: session.expires_at,
        })
    }
}
