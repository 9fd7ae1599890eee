use leptos::prelude::*;

/// Native date picker bound to a `YYYY-MM-DD` string
#[component]
pub fn DateInput(
    /// The date value in yyyy-mm-dd format ("" when unset)
    #[prop(into)]
    value: Signal<String>,
    /// Receives yyyy-mm-dd, or "" when the picker is cleared
    on_change: impl Fn(String) + 'static,
    /// Earliest selectable date in yyyy-mm-dd format
    #[prop(optional, into)]
    min: Option<String>,
) -> impl IntoView {
    view! {
        <input
            type="date"
            class="date-input"
            min=min
            prop:value=value
            on:input=move |ev| on_change(event_target_value(&ev))
        />
    }
}
