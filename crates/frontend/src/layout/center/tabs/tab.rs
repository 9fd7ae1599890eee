use crate::layout::global_context::AppGlobalContext;
use leptos::ev;
use leptos::prelude::*;

/// One entry of the tab strip. The title is read live so detail pages can
/// rename their tab after loading.
#[component]
pub fn Tab(key: String) -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();

    let key_for_active = key.clone();
    let is_active =
        Memo::new(move |_| tabs_store.active.with(|a| a.as_deref() == Some(key_for_active.as_str())));

    let key_for_title = key.clone();
    let title = move || {
        tabs_store.opened.with(|tabs| {
            tabs.iter()
                .find(|t| t.key == key_for_title)
                .map(|t| t.title.clone())
                .unwrap_or_default()
        })
    };

    let key_for_click = key.clone();
    let on_click = move |_| tabs_store.activate_tab(&key_for_click);

    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        tabs_store.close_tab(&key);
    };

    view! {
        <div class="tab" class:active=is_active on:click=on_click>
            <span>{title}</span>
            <button class="tab-close" on:click=on_close>"×"</button>
        </div>
    }
}
