//! PageFrame: root wrapper for every page rendered inside a tab.
//!
//! ```rust
//! # use leptos::prelude::*;
//! # use portal_frontend::shared::page_frame::PageFrame;
//! # use portal_frontend::shared::page_standard::PAGE_CAT_LIST;
//! # fn _page() -> impl IntoView {
//! view! {
//!     <PageFrame page_id="a002_schedule--list" category=PAGE_CAT_LIST>
//!         <div class="page__header">...</div>
//!         <div class="page__content">...</div>
//!     </PageFrame>
//! }
//! # }
//! ```

use super::page_standard::*;
use leptos::prelude::*;

/// Sets `id`, `data-page-category` and the BEM modifier for the category.
#[component]
pub fn PageFrame(
    /// `{entity}--{category}`, e.g. `"a002_schedule--list"`
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants
    category: &'static str,
    #[prop(optional)] class: &'static str,
    children: Children,
) -> impl IntoView {
    debug_assert!(is_valid_page_id(page_id), "bad page id {page_id}");

    let base_class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        PAGE_CAT_FORM => "page page--form",
        _ => "page",
    };
    let full_class = if class.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {class}")
    };

    view! {
        <div id=page_id class=full_class data-page-category=category>
            {children()}
        </div>
    }
}
