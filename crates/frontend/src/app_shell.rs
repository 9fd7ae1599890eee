//! Application shell
//!
//! - `AppShell`: auth gate, shows `LoginPage` or `MainLayout`
//! - `MainLayout`: sidebar plus tab workspace

use crate::layout::center::tabs::Tabs;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::sidebar::Sidebar;
use crate::layout::tabs::registry::home_tab_key;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

/// Restores the tab named in `?active=`, or opens the role's home tab.
#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();
    let (auth_state, _) = use_auth();

    let restored = tabs_store.init_router_integration();
    if !restored && tabs_store.opened.with_untracked(|t| t.is_empty()) {
        if let Some(role) = auth_state.with_untracked(|s| s.role()) {
            let home = home_tab_key(role);
            tabs_store.open_tab(home, tab_label_for_key(home));
        }
    }

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <Tabs /> }.into_any()
        />
    }
}

#[component]
pub fn AppShell() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.is_authenticated())
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
