//! HTTP API Client
//!
//! Functions for communicating with the Eventdash REST API. Every call except
//! login carries the stored bearer token.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Deserialize;

use crate::state::events::{EventRecord, Submission};
use crate::state::session::SessionUser;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8082";

const API_URL_KEY: &str = "eventdash_api_url";
const TOKEN_KEY: &str = "eventdash_token";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = storage()
        .and_then(|s| s.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(API_URL_KEY, url);
    }
}

pub fn get_token() -> Option<String> {
    storage()
        .and_then(|s| s.get_item(TOKEN_KEY).ok().flatten())
        .filter(|token| !token.is_empty())
}

pub fn set_token(token: &str) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
}

pub fn clear_token() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(TOKEN_KEY);
    }
}

/// Absolute URL for an image path returned by the upload endpoint
pub fn asset_url(url: &str) -> String {
    resolve_asset_url(&get_api_base(), url)
}

/// Prefix server-relative paths with the API base; absolute URLs pass through
pub fn resolve_asset_url(base: &str, url: &str) -> String {
    if url.starts_with('/') && !url.starts_with("//") {
        format!("{}{}", base.trim_end_matches('/'), url)
    } else {
        url.to_string()
    }
}

fn endpoint(path: &str) -> String {
    format!("{}{}", get_api_base(), path)
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match get_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

// ============ Response Types ============

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: SessionUser,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    user: SessionUser,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// A team member as returned by `GET /api/members`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub joined_at: String,
}

/// Turn a non-2xx response into its error message
async fn error_message(response: Response, fallback: &str) -> String {
    response
        .json::<ErrorBody>()
        .await
        .map(|body| body.error.message)
        .unwrap_or_else(|_| fallback.to_string())
}

// ============ API Functions ============

/// Sign in and store the session token
pub async fn login(email: &str, access_code: &str) -> Result<SessionUser, String> {
    let response = Request::post(&endpoint("/api/auth/login"))
        .json(&serde_json::json!({ "email": email, "accessCode": access_code }))
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Sign in failed").await);
    }

    let result: LoginResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    set_token(&result.token);
    Ok(result.user)
}

/// Check the stored token; a rejected token is removed
pub async fn fetch_session() -> Result<Option<SessionUser>, String> {
    if get_token().is_none() {
        return Ok(None);
    }

    let response = authorized(Request::get(&endpoint("/api/auth/session")))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        clear_token();
        return Ok(None);
    }

    let result: SessionResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;
    Ok(Some(result.user))
}

/// End the session on the server and forget the token
pub async fn logout() -> Result<(), String> {
    let result = authorized(Request::post(&endpoint("/api/auth/logout")))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e));
    clear_token();
    result.map(|_| ())
}

/// Fetch all events in date order
pub async fn fetch_events() -> Result<Vec<EventRecord>, String> {
    let response = authorized(Request::get(&endpoint("/api/events")))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load events").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Send a create or update
pub async fn submit_event(submission: &Submission) -> Result<(), String> {
    let url = endpoint(&submission.path());
    let builder = match submission {
        Submission::Create(_) => Request::post(&url),
        Submission::Update { .. } => Request::put(&url),
    };

    let response = authorized(builder)
        .json(submission.form())
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to save event").await);
    }
    Ok(())
}

pub async fn delete_event(id: &str) -> Result<(), String> {
    let response = authorized(Request::delete(&endpoint(&format!("/api/events/{}", id))))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to delete event").await);
    }
    Ok(())
}

/// Upload an image as multipart field `file`, returning its URL
pub async fn upload_image(file: &web_sys::File) -> Result<String, String> {
    let form = web_sys::FormData::new().map_err(|_| "Could not create form data".to_string())?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| "Could not attach file".to_string())?;

    let response = authorized(Request::post(&endpoint("/api/upload")))
        .body(form)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Upload failed").await);
    }

    let result: UploadResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;
    Ok(result.url)
}

pub async fn fetch_members() -> Result<Vec<MemberRecord>, String> {
    let response = authorized(Request::get(&endpoint("/api/members")))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load members").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_asset_url() {
        assert_eq!(
            resolve_asset_url("http://localhost:8082/", "/uploads/a.png"),
            "http://localhost:8082/uploads/a.png"
        );
        assert_eq!(
            resolve_asset_url("http://localhost:8082", "https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(
            resolve_asset_url("http://localhost:8082", "//cdn.example.com/a.png"),
            "//cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_member_record_deserializes() {
        let member: MemberRecord = serde_json::from_str(
            r#"{"id":"m1","name":"Ada","email":"ada@example.com","role":"Lead","joinedAt":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(member.role, "Lead");
    }

    #[test]
    fn test_error_body_shape() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"error":{"code":"UNAUTHORIZED","message":"Missing token"},"request_id":"x"}"#,
        )
        .unwrap();
        assert_eq!(body.error.message, "Missing token");
    }
}
