//! Login Page

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::state::global::GlobalState;
use crate::state::session::{SessionStatus, DASHBOARD_PATH};

/// Sign-in form; signed-in visitors are sent to the dashboard
#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    create_effect(move |_| {
        if state.session.get().is_authenticated() {
            navigate(DASHBOARD_PATH, Default::default());
        }
    });

    let (email, set_email) = create_signal(String::new());
    let (access_code, set_access_code) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        set_submitting.set(true);

        let email = email.get_untracked();
        let code = access_code.get_untracked();
        spawn_local(async move {
            match api::login(&email, &code).await {
                Ok(user) => {
                    state.session.set(SessionStatus::Authenticated(user));
                    state.show_success("Signed in");
                }
                Err(e) => state.show_error(&e),
            }
            set_submitting.set(false);
        });
    };

    let input_class = "w-full bg-gray-700 rounded-lg px-4 py-3 text-white \
                       border border-gray-600 focus:border-primary-500 focus:outline-none";

    view! {
        <div class="min-h-[70vh] flex items-center justify-center px-4">
            <form on:submit=on_submit class="w-full max-w-md bg-gray-800 rounded-lg p-8 space-y-6 shadow-lg">
                <div class="text-center">
                    <h1 class="text-3xl font-bold mb-2">"Sign in"</h1>
                    <p class="text-gray-400">"Use the email your team registered for you."</p>
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Email"</label>
                    <input
                        type="email"
                        required=true
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        class=input_class
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Access code"</label>
                    <input
                        type="password"
                        prop:value=move || access_code.get()
                        on:input=move |ev| set_access_code.set(event_target_value(&ev))
                        class=input_class
                    />
                </div>

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           disabled:cursor-not-allowed rounded-lg py-3 font-semibold transition-colors"
                >
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
