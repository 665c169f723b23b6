//! Loading Component
//!
//! Loading spinners.

use leptos::*;

/// Section loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

/// Spinner covering the whole viewport, shown while the session is checked
#[component]
pub fn FullPageSpinner() -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center">
            <div class="loading-spinner w-12 h-12" />
        </div>
    }
}
