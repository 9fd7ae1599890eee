use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::api;

#[component]
pub fn ForgotPasswordPage(on_back: Callback<()>) -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (sent_message, set_sent_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let email_val = email.get();
        if email_val.trim().is_empty() {
            set_error_message.set(Some("Enter the email you registered with".to_string()));
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);
        spawn_local(async move {
            match api::forgot_password(email_val).await {
                Ok(message) => set_sent_message.set(Some(message)),
                Err(e) => set_error_message.set(Some(e.to_string())),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-box">
            <h1>"Mock Test Portal"</h1>
            <h2>"Reset password"</h2>

            {move || error_message.get().map(|e| view! { <div class="error-message">{e}</div> })}

            {move || match sent_message.get() {
                Some(message) => view! {
                    <div class="alert alert--success">{message}</div>
                }.into_any(),
                None => view! {
                    <form on:submit=on_submit>
                        <div class="form-group">
                            <label for="reset-email">"Email"</label>
                            <input
                                type="email"
                                id="reset-email"
                                value=move || email.get()
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                required
                                disabled=move || is_loading.get()
                            />
                        </div>
                        <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                            {move || if is_loading.get() { "Sending..." } else { "Send reset link" }}
                        </button>
                    </form>
                }.into_any(),
            }}

            <div class="login-info">
                <a href="#" on:click=move |ev| {
                    ev.prevent_default();
                    on_back.run(());
                }>
                    "Back to sign in"
                </a>
            </div>
        </div>
    }
}
