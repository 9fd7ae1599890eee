/// List helpers shared by every table page (search box, highlighting, sort arrows)
use contracts::shared::list_view::SortOrder;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Splits `text` into `(segment, is_match)` pairs for a case-insensitive `filter`.
pub fn match_segments(text: &str, filter: &str) -> Vec<(String, bool)> {
    let filter = filter.trim().to_lowercase();
    let text_lower = text.to_lowercase();
    // Lowercasing can change byte lengths outside ASCII; fall back to no highlight.
    if filter.is_empty() || text_lower.len() != text.len() {
        return vec![(text.to_string(), false)];
    }

    let mut parts = Vec::new();
    let mut last_pos = 0;
    while let Some(pos) = text_lower[last_pos..].find(&filter) {
        let start = last_pos + pos;
        let end = start + filter.len();
        if start > last_pos {
            parts.push((text[last_pos..start].to_string(), false));
        }
        parts.push((text[start..end].to_string(), true));
        last_pos = end;
    }
    if last_pos < text.len() || parts.is_empty() {
        parts.push((text[last_pos..].to_string(), false));
    }
    parts
}

/// Highlights matches of the current search text.
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let parts = match_segments(text, filter)
        .into_iter()
        .map(|(segment, is_match)| {
            if is_match {
                view! { <mark class="search-hit">{segment}</mark> }.into_any()
            } else {
                view! { <span>{segment}</span> }.into_any()
            }
        })
        .collect::<Vec<_>>();
    view! { <>{parts}</> }.into_any()
}

/// Arrow shown next to the date column header.
pub fn sort_indicator(sort: Option<SortOrder>) -> &'static str {
    match sort {
        Some(SortOrder::Ascending) => " ▲",
        Some(SortOrder::Descending) => " ▼",
        None => " ⇅",
    }
}

/// Next state of a header click: unsorted -> ascending -> descending -> ascending.
pub fn next_sort(sort: Option<SortOrder>) -> Option<SortOrder> {
    Some(sort.map(SortOrder::toggled).unwrap_or(SortOrder::Ascending))
}

/// Search box with debounce and a clear button
#[component]
pub fn SearchInput(
    /// Current filter value
    #[prop(into)]
    value: Signal<String>,
    /// Called with the new value once typing pauses
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        // Dropping the previous timeout cancels it
        let timeout = Timeout::new(SEARCH_DEBOUNCE_MS, move || on_change.run(new_value));
        pending.set_value(Some(timeout));
    };

    let clear_filter = move |_| {
        pending.set_value(None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class="search-input__field"
                class:search-input__field--active=move || !value.get().trim().is_empty()
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Clear">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_case_insensitive_matches() {
        assert_eq!(
            match_segments("Nusrat Rahman", "RA"),
            vec![
                ("Nus".to_string(), false),
                ("ra".to_string(), true),
                ("t ".to_string(), false),
                ("Ra".to_string(), true),
                ("hman".to_string(), false),
            ]
        );
    }

    #[test]
    fn empty_filter_or_no_match_keeps_text() {
        assert_eq!(match_segments("IELTS", ""), vec![("IELTS".to_string(), false)]);
        assert_eq!(match_segments("IELTS", "gre"), vec![("IELTS".to_string(), false)]);
    }

    #[test]
    fn sort_cycle() {
        assert_eq!(next_sort(None), Some(SortOrder::Ascending));
        assert_eq!(next_sort(Some(SortOrder::Ascending)), Some(SortOrder::Descending));
        assert_eq!(next_sort(Some(SortOrder::Descending)), Some(SortOrder::Ascending));
        assert_eq!(sort_indicator(None), " ⇅");
    }
}
