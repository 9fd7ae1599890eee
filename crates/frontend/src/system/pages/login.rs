use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::system::auth::context::{do_login, use_auth};
use crate::system::pages::forgot_password::ForgotPasswordPage;

/// Login form; swaps to the password-reset form in place.
#[component]
pub fn LoginPage() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);
    let (show_reset, set_show_reset) = signal(false);

    let (_, set_auth_state) = use_auth();
    let ctx = expect_context::<AppGlobalContext>();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let email_val = email.get();
        let password_val = password.get();
        if email_val.trim().is_empty() || password_val.is_empty() {
            set_error_message.set(Some("Enter your email and password".to_string()));
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match do_login(set_auth_state, email_val, password_val).await {
                Ok(role) => {
                    // The shell switches to the workspace once auth state is set.
                    let home = crate::layout::tabs::registry::home_tab_key(role);
                    ctx.open_tab(home, tab_label_for_key(home));
                }
                Err(e) => {
                    log::warn!("login failed: {}", e);
                    set_error_message.set(Some(e.to_string()));
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <Show
                when=move || !show_reset.get()
                fallback=move || view! {
                    <ForgotPasswordPage on_back=Callback::new(move |_| set_show_reset.set(false)) />
                }
            >
                <div class="login-box">
                    <h1>"Mock Test Portal"</h1>
                    <h2>"Sign in"</h2>

                    <Show when=move || error_message.get().is_some()>
                        <div class="error-message">
                            {move || error_message.get().unwrap_or_default()}
                        </div>
                    </Show>

                    <form on:submit=on_submit>
                        <div class="form-group">
                            <label for="email">"Email"</label>
                            <input
                                type="email"
                                id="email"
                                placeholder="you@example.com"
                                value=move || email.get()
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                required
                                disabled=move || is_loading.get()
                            />
                        </div>

                        <div class="form-group">
                            <label for="password">"Password"</label>
                            <input
                                type="password"
                                id="password"
                                value=move || password.get()
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                required
                                disabled=move || is_loading.get()
                            />
                        </div>

                        <button
                            type="submit"
                            class="btn-primary"
                            disabled=move || is_loading.get()
                        >
                            {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                        </button>
                    </form>

                    <div class="login-info">
                        <a href="#" on:click=move |ev| {
                            ev.prevent_default();
                            set_show_reset.set(true);
                        }>
                            "Forgot password?"
                        </a>
                    </div>
                </div>
            </Show>
        </div>
    }
}
