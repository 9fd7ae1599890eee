use crate::layout::center::tabs::tab::Tab as TabComponent;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::TabPage;
use leptos::logging::log;
use leptos::prelude::*;

/// Tab strip plus the stack of mounted tab pages.
#[component]
pub fn Tabs() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();

    view! {
        <div class="tabs-container">
            <div class="tabs-bar">
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| view! { <TabComponent key=tab.key /> }
                />
            </div>
            <div class="tab-content">
                <Show
                    when=move || tabs_store.opened.with(|t| !t.is_empty())
                    fallback=|| view! {
                        <div class="placeholder">"Pick a page from the menu on the left."</div>
                    }
                >
                    <For
                        each=move || {
                            let tabs = tabs_store.opened.get();
                            log!("open tabs: {}", tabs.len());
                            tabs
                        }
                        key=|tab| tab.key.clone()
                        children=move |tab| view! { <TabPage tab=tab tabs_store=tabs_store /> }
                    />
                </Show>
            </div>
        </div>
    }
}
