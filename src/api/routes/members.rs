//! Member Routes
//!
//! - GET /api/members - List team members

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::extract::AuthSession;
use crate::api::state::AppState;
use crate::store::Member;

/// GET /api/members
pub async fn list_members(
    State(state): State<Arc<AppState>>,
    _session: AuthSession,
) -> ApiResult<Json<Vec<Member>>> {
    let members = state.store.list_members().await?;
    Ok(Json(members))
}
