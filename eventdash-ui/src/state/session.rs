//! Session State
//!
//! Authentication status as the dashboard sees it, and the route guard
//! decision derived from it.

use serde::Deserialize;

/// Route unauthenticated users are sent to
pub const LOGIN_PATH: &str = "/login";

/// Route signed-in users land on
pub const DASHBOARD_PATH: &str = "/dashboard";

/// The signed-in user
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SessionUser {
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// Authentication status
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionStatus {
    /// Session check has not finished yet
    #[default]
    Loading,
    Authenticated(SessionUser),
    Unauthenticated,
}

impl SessionStatus {
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            SessionStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionStatus::Authenticated(_))
    }
}

/// What a guarded page should do for a session status
#[derive(Clone, Debug, PartialEq)]
pub enum Guard {
    /// Show a spinner and nothing else
    Spinner,
    /// Navigate away
    Redirect(&'static str),
    /// Render the page
    Render,
}

/// Route guard for pages that require a session
pub fn guard(status: &SessionStatus) -> Guard {
    match status {
        SessionStatus::Loading => Guard::Spinner,
        SessionStatus::Unauthenticated => Guard::Redirect(LOGIN_PATH),
        SessionStatus::Authenticated(_) => Guard::Render,
    }
}

/// Text appended to "Welcome back": a space and the email's local part
pub fn welcome_suffix(email: Option<&str>) -> String {
    email
        .and_then(|e| e.split('@').next())
        .filter(|name| !name.is_empty())
        .map(|name| format!(" {}", name))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> SessionUser {
        SessionUser {
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
        }
    }

    #[test]
    fn test_guard_outcomes() {
        assert_eq!(guard(&SessionStatus::Loading), Guard::Spinner);
        assert_eq!(
            guard(&SessionStatus::Unauthenticated),
            Guard::Redirect(LOGIN_PATH)
        );
        assert_eq!(guard(&SessionStatus::Authenticated(ada())), Guard::Render);
    }

    #[test]
    fn test_default_status_is_loading() {
        let status = SessionStatus::default();
        assert_eq!(status, SessionStatus::Loading);
        assert!(status.user().is_none());
        assert!(!status.is_authenticated());
    }

    #[test]
    fn test_welcome_suffix() {
        assert_eq!(welcome_suffix(Some("ada@example.com")), " ada");
        assert_eq!(welcome_suffix(Some("@example.com")), "");
        assert_eq!(welcome_suffix(None), "");
    }

    #[test]
    fn test_user_deserializes_without_name() {
        let user: SessionUser = serde_json::from_str(r#"{"email":"a@b.c"}"#).unwrap();
        assert_eq!(user.name, "");
    }
}
