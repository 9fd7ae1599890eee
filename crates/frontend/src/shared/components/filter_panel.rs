use crate::shared::icons::icon;
use leptos::prelude::*;

/// Collapsible filter panel with the pagination strip in its header
#[component]
pub fn FilterPanel(
    #[prop(into)] is_expanded: RwSignal<bool>,

    /// Shown as a badge next to the title
    #[prop(into)]
    active_filters_count: Signal<usize>,

    #[prop(into)] pagination_controls: ViewFn,

    /// Filter form fields
    #[prop(into)]
    filter_content: ViewFn,

    /// Resets every filter; the button is hidden when nothing is active
    #[prop(optional)]
    on_clear: Option<Callback<()>>,
) -> impl IntoView {
    let toggle_expanded = move |_| is_expanded.update(|e| *e = !*e);

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div class="filter-panel-header__left" on:click=toggle_expanded>
                    <span
                        class="filter-panel__chevron"
                        class:filter-panel__chevron--expanded=move || is_expanded.get()
                    >
                        {icon("chevron-down")}
                    </span>
                    {icon("filter")}
                    <span class="filter-panel__title">"Filters"</span>
                    <Show when=move || { active_filters_count.get() > 0 }>
                        <span class="badge badge--primary">{move || active_filters_count.get()}</span>
                    </Show>
                </div>
                <div class="filter-panel-header__center">{pagination_controls.run()}</div>
                {on_clear.map(|clear| view! {
                    <Show when=move || { active_filters_count.get() > 0 }>
                        <button class="button button--ghost" on:click=move |_| clear.run(())>
                            {icon("x")}
                            " Clear filters"
                        </button>
                    </Show>
                })}
            </div>

            <div
                class="filter-panel__collapsible"
                class:filter-panel__collapsible--expanded=move || is_expanded.get()
                class:filter-panel__collapsible--collapsed=move || !is_expanded.get()
            >
                <div class="filter-panel-content">{filter_content.run()}</div>
            </div>
        </div>
    }
}

/// Labelled dropdown for an exact-match filter. The first option ("All")
/// clears the filter.
#[component]
pub fn FilterSelect(
    #[prop(into)] label: String,
    #[prop(into)] options: Signal<Vec<String>>,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="filter-field">
            <span class="filter-field__label">{label}</span>
            <select
                class="filter-field__select"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="">"All"</option>
                {move || options.get().into_iter().map(|opt| {
                    let selected = value.get_untracked() == opt;
                    view! { <option value=opt.clone() selected=selected>{opt.clone()}</option> }
                }).collect_view()}
            </select>
        </label>
    }
}
