//! Dashboard Page
//!
//! The signed-in landing page: a welcome banner over the Events and Members
//! panels. Guarded by the session; see [`guard`].

use leptos::*;
use leptos_router::*;

use crate::components::{Events, FullPageSpinner, Members, ParticleBackground};
use crate::state::global::GlobalState;
use crate::state::session::{guard, welcome_suffix, Guard};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    create_effect(move |_| {
        if let Guard::Redirect(path) = guard(&state.session.get()) {
            navigate(path, Default::default());
        }
    });

    // Only re-render when the guard outcome changes, not on every session update
    let outcome = create_memo(move |_| guard(&state.session.get()));

    move || match outcome.get() {
        Guard::Spinner => view! { <FullPageSpinner /> }.into_view(),
        Guard::Redirect(_) => view! {}.into_view(),
        Guard::Render => view! { <DashboardContent /> }.into_view(),
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let greeting = move || {
        let session = state.session.get();
        format!(
            "Welcome back{}",
            welcome_suffix(session.user().map(|u| u.email.as_str()))
        )
    };

    view! {
        <div class="relative min-h-screen">
            <ParticleBackground />

            <div class="relative z-10 container mx-auto px-4 py-8 space-y-12">
                <section class="bg-gradient-to-r from-primary-700 to-purple-700 rounded-2xl p-8 shadow-lg">
                    <h1 class="text-4xl font-bold mb-2">{greeting}</h1>
                    <p class="text-lg text-gray-200">
                        "Here's what's happening with your team."
                    </p>
                </section>

                <section id="events">
                    <Events />
                </section>

                <section id="team">
                    <Members />
                </section>
            </div>
        </div>
    }
}
