use crate::shared::icons::icon;
use contracts::shared::list_view::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use leptos::prelude::*;

/// "first-last of filtered" label for the pagination strip.
pub fn range_label(page: usize, page_size: usize, filtered_count: usize) -> String {
    if filtered_count == 0 {
        return "0 of 0".to_string();
    }
    let size = page_size.max(1);
    let first = (page.max(1) - 1) * size + 1;
    let last = (first + size - 1).min(filtered_count);
    format!("{}-{} of {}", first, last, filtered_count)
}

/// Pagination strip used by every list page. Pages are 1-indexed.
#[component]
pub fn PaginationControls(
    /// Current page, 1-indexed
    #[prop(into)]
    current_page: Signal<usize>,

    /// Total number of pages (at least 1)
    #[prop(into)]
    total_pages: Signal<usize>,

    /// Number of rows after filtering
    #[prop(into)]
    filtered_count: Signal<usize>,

    #[prop(into)] page_size: Signal<usize>,

    on_page_change: Callback<usize>,

    on_page_size_change: Callback<usize>,
) -> impl IntoView {
    let on_first = move || current_page.get() <= 1;
    let on_last = move || current_page.get() >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=on_first
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get().saturating_sub(1).max(1))
                disabled=on_first
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!("Page {} / {}", current_page.get(), total_pages.get().max(1))}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=on_last
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get().max(1))
                disabled=on_last
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <span class="pagination-range">
                {move || range_label(current_page.get(), page_size.get(), filtered_count.get())}
            </span>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    let val = event_target_value(&ev).parse().unwrap_or(DEFAULT_PAGE_SIZE);
                    on_page_size_change.run(val);
                }
                prop:value=move || page_size.get().to_string()
            >
                {PAGE_SIZE_OPTIONS.iter().map(|&size| {
                    view! {
                        <option value=size.to_string() selected=move || page_size.get() == size>
                            {format!("{} / page", size)}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_label_clamps_last_page() {
        assert_eq!(range_label(1, 10, 23), "1-10 of 23");
        assert_eq!(range_label(3, 10, 23), "21-23 of 23");
        assert_eq!(range_label(1, 10, 0), "0 of 0");
    }
}
