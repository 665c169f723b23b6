//! Global Application State
//!
//! Reactive state shared by every page: the session and toast messages.

use leptos::*;

use crate::api;
use crate::state::session::SessionStatus;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Authentication status, `Loading` until the first session check ends
    pub session: RwSignal<SessionStatus>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() -> GlobalState {
    let state = GlobalState {
        session: create_rw_signal(SessionStatus::Loading),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
    state
}

impl GlobalState {
    /// Resolve the stored token into a session status
    pub fn refresh_session(&self) {
        let session = self.session;
        spawn_local(async move {
            let status = match api::fetch_session().await {
                Ok(Some(user)) => SessionStatus::Authenticated(user),
                Ok(None) => SessionStatus::Unauthenticated,
                Err(e) => {
                    web_sys::console::error_1(&format!("Session check failed: {}", e).into());
                    SessionStatus::Unauthenticated
                }
            };
            session.set(status);
        });
    }

    /// End the session locally and on the server
    pub fn sign_out(&self) {
        let state = *self;
        spawn_local(async move {
            if let Err(e) = api::logout().await {
                web_sys::console::warn_1(&format!("Logout request failed: {}", e).into());
            }
            state.session.set(SessionStatus::Unauthenticated);
            state.show_success("Signed out");
        });
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
