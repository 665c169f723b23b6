//! Navigation Component
//!
//! Header bar with the brand, the signed-in user and sign out.

use leptos::*;
use leptos_router::*;

use crate::state::global::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <nav class="relative z-10 bg-gray-800/80 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/dashboard" class="flex items-center space-x-3">
                        <span class="text-2xl">"📅"</span>
                        <span class="text-xl font-bold text-white">"Eventdash"</span>
                    </A>

                    {move || match state.session.get().user() {
                        Some(user) => view! {
                            <div class="flex items-center space-x-4">
                                <a href="#events" class="px-3 py-2 text-gray-300 hover:text-white">"Events"</a>
                                <a href="#team" class="px-3 py-2 text-gray-300 hover:text-white">"Team"</a>
                                <span class="text-sm text-gray-300">{user.email.clone()}</span>
                                <button
                                    on:click=move |_| state.sign_out()
                                    class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                                >
                                    "Sign out"
                                </button>
                            </div>
                        }.into_view(),
                        None => view! {
                            <A
                                href="/login"
                                class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                            >
                                "Sign in"
                            </A>
                        }.into_view(),
                    }}
                </div>
            </div>
        </nav>
    }
}
