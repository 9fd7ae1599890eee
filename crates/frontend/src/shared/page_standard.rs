//! Page category constants for tab pages.
//!
//! Every page rendered inside a tab declares:
//!   - HTML `id` in the format `{entity}--{category}` (e.g. `"a002_schedule--list"`)
//!   - `data-page-category` with one of the constants below
//!
//! The `--` separator keeps the entity part searchable: copying the id from the
//! DOM inspector leads straight to the `domain/a002_schedule/` directory.

/// Table with filters/pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Single record view.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Counters and charts.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Data-entry form (schedule, cash memo, TRF).
pub const PAGE_CAT_FORM: &str = "form";

/// Login and other pages outside the tab workspace.
pub const PAGE_CAT_SYSTEM: &str = "system";

pub const ALL_CATEGORIES: &[&str] = &[
    PAGE_CAT_LIST,
    PAGE_CAT_DETAIL,
    PAGE_CAT_DASHBOARD,
    PAGE_CAT_FORM,
    PAGE_CAT_SYSTEM,
];

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && !category.is_empty(),
        None => false,
    }
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_ids() {
        assert!(is_valid_page_id("a002_schedule--list"));
        assert!(!is_valid_page_id("a002_schedule"));
        assert!(!is_valid_page_id("--list"));
        assert!(is_known_category(PAGE_CAT_FORM));
        assert!(!is_known_category("legacy"));
    }
}
