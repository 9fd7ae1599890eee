//! Toast notifications shown in the bottom-right corner.
//!
//! Every failed request and every successful mutation reports here; toasts
//! disappear on their own after [`TOAST_LIFETIME_MS`].

use std::fmt::Display;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub const TOAST_LIFETIME_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success",
            ToastKind::Error => "toast toast--error",
            ToastKind::Info => "toast toast--info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
}

#[derive(Clone, Copy)]
pub struct NotificationService {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(ToastKind::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(ToastKind::Error, text.into());
    }

    /// Error toast for a request that did not go through.
    pub fn failed(&self, action: &str, err: impl Display) {
        self.error(failure_text(action, err));
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(ToastKind::Info, text.into());
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }

    fn push(&self, kind: ToastKind, text: String) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|list| list.push(Toast { id, kind, text }));

        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_LIFETIME_MS).await;
            this.dismiss(id);
        });
    }
}

/// `Could not <action>: <reason>`
pub fn failure_text(action: &str, err: impl Display) -> String {
    format!("Could not {}: {}", action, err)
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notify() -> NotificationService {
    expect_context::<NotificationService>()
}

/// Renders the toast stack; mounted once by the app root.
#[component]
pub fn ToastHost() -> impl IntoView {
    let notify = use_notify();

    view! {
        <div class="toast-host">
            <For
                each=move || notify.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() role="status">
                            <span class="toast__text">{toast.text}</span>
                            <button class="toast__close" on:click=move |_| notify.dismiss(id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::api::ApiError;

    #[test]
    fn failure_text_names_action_and_reason() {
        assert_eq!(
            failure_text("load schedules", ApiError::Network("offline".into())),
            "Could not load schedules: Network error: offline"
        );
        assert_eq!(
            failure_text("save the TRF", ApiError::Rejected("Candidate not found".into())),
            "Could not save the TRF: Candidate not found"
        );
    }
}
