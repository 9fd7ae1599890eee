use contracts::system::auth::Section;
use leptos::prelude::*;

use super::context::use_auth;

/// Renders `children` only when the signed-in role may open `section`.
#[component]
pub fn RequireRole(section: Section, children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.role().is_some_and(|r| r.can_access(section)))
            fallback=|| view! {
                <div class="alert alert--error">"You do not have access to this page."</div>
            }
        >
            {children()}
        </Show>
    }
}
