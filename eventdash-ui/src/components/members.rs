//! Members Panel
//!
//! Read-only list of team members.

use leptos::*;

use crate::api::{self, MemberRecord};
use crate::components::Loading;

/// Team members component
#[component]
pub fn Members() -> impl IntoView {
    let (members, set_members) = create_signal(None::<Vec<MemberRecord>>);

    spawn_local(async move {
        let list = match api::fetch_members().await {
            Ok(list) => list,
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to fetch members: {}", e).into());
                Vec::new()
            }
        };
        set_members.set(Some(list));
    });

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">"Team Members"</h2>
            {move || match members.get() {
                None => view! { <Loading /> }.into_view(),
                Some(list) if list.is_empty() => view! {
                    <div class="bg-gray-800 rounded-lg p-8 text-center text-gray-400">
                        "No team members yet."
                    </div>
                }.into_view(),
                Some(list) => view! {
                    <div class="grid gap-4 md:grid-cols-3">
                        {list.into_iter().map(|member| view! { <MemberCard member=member /> }).collect_view()}
                    </div>
                }.into_view(),
            }}
        </div>
    }
}

#[component]
fn MemberCard(member: MemberRecord) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 flex items-center space-x-4">
            <div class="w-12 h-12 rounded-full bg-primary-600 flex items-center justify-center font-bold">
                {initials(&member.name)}
            </div>
            <div class="min-w-0">
                <p class="font-semibold truncate">{member.name.clone()}</p>
                <p class="text-sm text-primary-400">{member.role.clone()}</p>
                <p class="text-sm text-gray-400 truncate">{member.email.clone()}</p>
            </div>
        </div>
    }
}

/// Up to two uppercase initials from a display name
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Ada Lovelace"), "AL");
        assert_eq!(initials("grace brewster hopper"), "GB");
        assert_eq!(initials("  "), "");
    }
}
