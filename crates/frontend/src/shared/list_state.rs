//! Per-list view state. Filter, sort and paging selections survive reloads
//! in local storage under a `*_list_state_v1` key; fetched rows do not.

use contracts::shared::list_view::{reduce, ListPage, ListQuery, ListRecord};
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub query: ListQuery,
    pub is_loaded: bool,
}

impl<T: ListRecord + Clone> ListState<T> {
    /// Visible slice for the current query.
    pub fn view(&self) -> ListPage<T> {
        reduce(&self.items, &self.query, super::date_utils::business_today())
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn load_query(key: &str) -> Option<ListQuery> {
    let raw = storage()?.get_item(key).ok().flatten()?;
    serde_json::from_str::<ListQuery>(&raw).ok()
}

fn save_query(key: &str, query: &ListQuery) {
    let Some(storage) = storage() else { return };
    let Ok(raw) = serde_json::to_string(query) else { return };
    let _ = storage.set_item(key, &raw);
}

/// Fresh state restored from `key`, falling back to `defaults`.
pub fn create_state<T: Send + Sync + 'static>(
    key: &'static str,
    defaults: ListQuery,
) -> RwSignal<ListState<T>> {
    RwSignal::new(ListState {
        items: Vec::new(),
        query: load_query(key).unwrap_or(defaults),
        is_loaded: false,
    })
}

/// Applies `change` to the query and saves it.
pub fn update_query<T: Send + Sync + 'static>(
    key: &'static str,
    state: RwSignal<ListState<T>>,
    change: impl FnOnce(&mut ListQuery),
) {
    state.update(|s| {
        change(&mut s.query);
        save_query(key, &s.query);
    });
}

/// Filter edits always return to page 1.
pub fn update_filter<T: Send + Sync + 'static>(
    key: &'static str,
    state: RwSignal<ListState<T>>,
    change: impl FnOnce(&mut ListQuery),
) {
    update_query(key, state, |q| {
        change(q);
        q.page = 1;
    });
}
