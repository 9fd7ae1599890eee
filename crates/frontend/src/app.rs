use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::notify::{NotificationService, ToastHost};
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Tab workspace and toasts are shared by every page
    provide_context(AppGlobalContext::new());
    provide_context(NotificationService::new());

    view! {
        <AuthProvider>
            <AppShell />
        </AuthProvider>
        <ToastHost />
    }
}
