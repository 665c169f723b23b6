//! Events Panel
//!
//! List, create, edit and delete team events. All state transitions live in
//! [`EventsPanel`]; this module wires them to the DOM and the API.

use leptos::*;
use web_sys::HtmlInputElement;

use crate::api;
use crate::state::events::{
    format_event_date, Effect, EventRecord, EventsPanel, DELETE_CONFIRMATION,
};

/// Events panel component
#[component]
pub fn Events() -> impl IntoView {
    let panel = create_rw_signal(EventsPanel::default());

    refetch(panel);

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-bold">"Upcoming Events"</h2>
                <button
                    on:click=move |_| panel.update(|p| p.toggle_form())
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    {move || panel.with(|p| p.toggle_label())}
                </button>
            </div>

            {move || {
                if panel.with(|p| p.form_open) {
                    view! { <EventFormCard panel=panel /> }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}

            {move || {
                if panel.with(|p| p.show_empty_state()) {
                    view! {
                        <div class="bg-gray-800 rounded-lg p-8 text-center text-gray-400">
                            "No events scheduled yet. Add your first event!"
                        </div>
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}

            <div class="grid gap-6 md:grid-cols-2">
                {move || {
                    panel.with(|p| p.events.clone())
                        .into_iter()
                        .map(|event| view! { <EventCard event=event panel=panel /> })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

/// Create/edit form
#[component]
fn EventFormCard(panel: RwSignal<EventsPanel>) -> impl IntoView {
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let Some(submission) = panel.try_update(|p| p.begin_submit()).flatten() else {
            return;
        };

        spawn_local(async move {
            let ok = match api::submit_event(&submission).await {
                Ok(()) => true,
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to save event: {}", e).into());
                    false
                }
            };
            let effect = panel.try_update(|p| p.finish_submit(ok)).flatten();
            run_effect(panel, effect);
        });
    };

    let on_file = move |ev: web_sys::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        panel.update(|p| p.begin_upload());
        spawn_local(async move {
            let result = api::upload_image(&file).await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Image upload failed: {}", e).into());
            }
            let effect = panel.try_update(|p| p.finish_upload(result)).flatten();
            run_effect(panel, effect);
        });
    };

    let input_class = "w-full bg-gray-700 rounded-lg px-4 py-3 text-white \
                       border border-gray-600 focus:border-primary-500 focus:outline-none";

    view! {
        <form on:submit=on_submit class="bg-gray-800 rounded-lg p-6 space-y-4">
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Title"</label>
                <input
                    type="text"
                    required=true
                    prop:value=move || panel.with(|p| p.form.title.clone())
                    on:input=move |ev| panel.update(|p| p.form.title = event_target_value(&ev))
                    class=input_class
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Description"</label>
                <textarea
                    required=true
                    rows="3"
                    prop:value=move || panel.with(|p| p.form.description.clone())
                    on:input=move |ev| panel.update(|p| p.form.description = event_target_value(&ev))
                    class=input_class
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Date"</label>
                <input
                    type="date"
                    required=true
                    prop:value=move || panel.with(|p| p.form.date.clone())
                    on:input=move |ev| panel.update(|p| p.form.date = event_target_value(&ev))
                    class=input_class
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Image"</label>
                {move || {
                    let url = panel.with(|p| p.form.image_url.clone());
                    if url.is_empty() {
                        view! {}.into_view()
                    } else {
                        view! {
                            <div class="relative mb-3">
                                <img src=api::asset_url(&url) class="w-full h-48 object-cover rounded-lg" />
                                <button
                                    type="button"
                                    on:click=move |_| panel.update(|p| p.clear_image())
                                    class="absolute top-2 right-2 px-3 py-1 bg-red-600 hover:bg-red-700 rounded text-sm"
                                >
                                    "Remove"
                                </button>
                            </div>
                        }.into_view()
                    }
                }}
                <label class="inline-flex items-center px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg cursor-pointer transition-colors">
                    <span>{move || panel.with(|p| p.upload_label())}</span>
                    <input
                        type="file"
                        accept="image/*"
                        class="sr-only"
                        required=move || panel.with(|p| p.image_required())
                        on:change=on_file
                    />
                </label>
            </div>

            <button
                type="submit"
                disabled=move || panel.with(|p| p.submit_disabled())
                class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                       disabled:cursor-not-allowed rounded-lg py-3 font-semibold transition-colors"
            >
                {move || panel.with(|p| p.submit_label())}
            </button>
        </form>
    }
}

#[component]
fn EventCard(event: EventRecord, panel: RwSignal<EventsPanel>) -> impl IntoView {
    let image = (!event.image_url.is_empty()).then(|| {
        view! {
            <img src=api::asset_url(&event.image_url) class="w-full h-48 object-cover" />
        }
    });

    let for_edit = event.clone();
    let id = event.id.clone();

    view! {
        <div class="bg-gray-800 rounded-lg overflow-hidden">
            {image}
            <div class="p-4 space-y-2">
                <h3 class="text-xl font-semibold">{event.title.clone()}</h3>
                <p class="text-sm text-primary-400">{format_event_date(&event.date)}</p>
                <p class="text-gray-300">{event.description.clone()}</p>
                <div class="flex space-x-2 pt-2">
                    <button
                        on:click=move |_| panel.update(|p| p.begin_edit(&for_edit))
                        class="px-3 py-1 bg-gray-700 hover:bg-gray-600 rounded text-sm transition-colors"
                    >
                        "Edit"
                    </button>
                    <button
                        on:click=move |_| delete_event(panel, id.clone())
                        class="px-3 py-1 bg-red-600 hover:bg-red-700 rounded text-sm transition-colors"
                    >
                        "Delete"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Reload the list; on failure the previous list stays
fn refetch(panel: RwSignal<EventsPanel>) {
    spawn_local(async move {
        match api::fetch_events().await {
            Ok(events) => panel.update(|p| p.set_events(events)),
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to fetch events: {}", e).into());
            }
        }
    });
}

fn delete_event(panel: RwSignal<EventsPanel>, id: String) {
    let confirmed = window()
        .confirm_with_message(DELETE_CONFIRMATION)
        .unwrap_or(false);
    if !confirmed {
        return;
    }

    spawn_local(async move {
        let ok = match api::delete_event(&id).await {
            Ok(()) => true,
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to delete event: {}", e).into());
                false
            }
        };
        let effect = panel.with_untracked(|p| p.finish_delete(ok));
        run_effect(panel, effect);
    });
}

fn run_effect(panel: RwSignal<EventsPanel>, effect: Option<Effect>) {
    match effect {
        Some(Effect::Refetch) => refetch(panel),
        Some(Effect::Alert(message)) => {
            let _ = window().alert_with_message(message);
        }
        None => {}
    }
}
