//! TopHeader: application bar with the sidebar toggle, the signed-in user
//! and logout.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let (auth_state, set_auth_state) = use_auth();

    let logout = move |_| {
        ctx.close_all();
        do_logout(set_auth_state);
    };

    let user_name = move || {
        auth_state.with(|s| {
            s.claims
                .as_ref()
                .map(|c| c.display_name())
                .unwrap_or_default()
        })
    };
    let role_label = move || auth_state.with(|s| s.role().map(|r| r.label()).unwrap_or(""));

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if ctx.left_open.get() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"Mock Test Portal"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("user")}
                    <span>{user_name}</span>
                    <span class="badge badge--neutral">{role_label}</span>
                </div>
                <button class="top-header__icon-btn" on:click=logout title="Log out">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
