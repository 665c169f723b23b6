//! Auth Routes
//!
//! - POST /api/auth/login - Exchange a member email (and access code) for a token
//! - GET /api/auth/session - Describe the current session
//! - POST /api/auth/logout - Revoke the current token

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{LoginRequest, LoginResponse, SessionResponse, SessionUser};
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::AuthSession;
use crate::api::state::AppState;
use crate::auth::bearer_token;
use crate::store::Member;

const INVALID_CREDENTIALS: &str = "Invalid email or access code";

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if req.email.trim().is_empty() {
        return Err(ApiError::Validation("Email cannot be empty".to_string()));
    }

    if !state.auth.access_code_matches(&req.access_code) {
        tracing::warn!(email = %req.email, "Login rejected: wrong access code");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let member = state.store.find_member(&req.email).await?.ok_or_else(|| {
        tracing::warn!(email = %req.email, "Login rejected: not a member");
        ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
    })?;

    let session = state
        .store
        .create_session(&member.email, state.auth.session_ttl)
        .await?;

    tracing::info!(email = %member.email, "Member signed in");

    Ok(Json(LoginResponse {
        token: session.token,
        user: session_user(member),
        expires_at: session.expires_at,
    }))
}

/// GET /api/auth/session
pub async fn current_session(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
) -> ApiResult<Json<SessionResponse>> {
    let member = state
        .store
        .find_member(&session.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Member no longer exists".to_string()))?;

    Ok(Json(SessionResponse {
        user: session_user(member),
        expires_at: session.expires_at,
    }))
}

/// POST /api/auth/logout
///
/// Idempotent: succeeds whether or not the token was valid.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    if let Some(token) = bearer_token(&headers) {
        state.store.delete_session(token).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

fn session_user(member: Member) -> SessionUser {
    SessionUser {
        email: member.email,
        name: member.name,
    }
}
