//! List-view reducer shared by every table in the portal.
//!
//! A page fetches the whole collection once and re-derives the visible slice
//! from a [`ListQuery`] whenever a filter, the sort direction or the page
//! changes. Filtering is conjunctive, sorting is stable and always by the
//! record's list date, pagination is 1-indexed and clamped.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

// ============================================================================
// Query
// ============================================================================

/// Past / upcoming split relative to "today" in the business time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalBucket {
    #[default]
    All,
    /// Strictly before today.
    Past,
    /// Today or later.
    Upcoming,
}

impl TemporalBucket {
    pub fn matches(self, date: Option<NaiveDate>, today: NaiveDate) -> bool {
        match self {
            TemporalBucket::All => true,
            TemporalBucket::Past => date.is_some_and(|d| d < today),
            TemporalBucket::Upcoming => date.is_some_and(|d| d >= today),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TemporalBucket::All => "all",
            TemporalBucket::Past => "past",
            TemporalBucket::Upcoming => "upcoming",
        }
    }

    /// Parses a `<select>` value; unknown values fall back to `All`.
    pub fn from_select(value: &str) -> Self {
        match value {
            "past" => TemporalBucket::Past,
            "upcoming" => TemporalBucket::Upcoming,
            _ => TemporalBucket::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    /// `(field, value)` pairs; an empty value leaves the field unfiltered.
    pub exact: Vec<(String, String)>,
    pub on_date: Option<NaiveDate>,
    pub temporal: TemporalBucket,
    /// Case-insensitive substring over [`ListRecord::search_text`].
    pub search: String,
    pub sort: Option<SortOrder>,
    /// 1-indexed.
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            exact: Vec::new(),
            on_date: None,
            temporal: TemporalBucket::All,
            search: String::new(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    /// Sets (or clears, when `value` is empty) an exact-match criterion.
    pub fn set_exact(&mut self, field: &str, value: &str) {
        self.exact.retain(|(k, _)| k != field);
        if !value.trim().is_empty() {
            self.exact.push((field.to_string(), value.trim().to_string()));
        }
    }

    pub fn exact_value(&self, field: &str) -> String {
        self.exact
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    }

    /// Number of active criteria, shown as a badge on the filter panel.
    pub fn active_filters_count(&self) -> usize {
        let exact = self
            .exact
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .count();
        exact
            + usize::from(self.on_date.is_some())
            + usize::from(self.temporal != TemporalBucket::All)
            + usize::from(!self.search.trim().is_empty())
    }

    pub fn clear_filters(&mut self) {
        self.exact.clear();
        self.on_date = None;
        self.temporal = TemporalBucket::All;
        self.search.clear();
        self.page = 1;
    }

    pub fn matches<T: ListRecord>(&self, record: &T, today: NaiveDate) -> bool {
        self.matches_with_date(record, record.list_date(), today)
    }

    fn matches_with_date<T: ListRecord>(
        &self,
        record: &T,
        date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> bool {
        let exact_ok = self.exact.iter().all(|(field, wanted)| {
            let wanted = wanted.trim();
            wanted.is_empty()
                || record
                    .field(field)
                    .is_some_and(|actual| actual.trim() == wanted)
        });
        if !exact_ok {
            return false;
        }

        if let Some(day) = self.on_date {
            if date != Some(day) {
                return false;
            }
        }

        if !self.temporal.matches(date, today) {
            return false;
        }

        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || record
                .search_text()
                .iter()
                .any(|hay| hay.to_lowercase().contains(&needle))
    }
}

// ============================================================================
// Records
// ============================================================================

/// A row that can be shown in a reduced list.
pub trait ListRecord {
    /// Value of an exact-match field (`"courseName"`, `"status"`, ...).
    fn field(&self, key: &str) -> Option<String>;

    /// Date the record is filtered and sorted by. `None` when absent or
    /// malformed; such records fail every date criterion.
    fn list_date(&self) -> Option<NaiveDate>;

    /// Strings searched by the free-text filter.
    fn search_text(&self) -> Vec<String> {
        Vec::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    /// Effective (clamped) 1-indexed page.
    pub page: usize,
    pub page_size: usize,
    /// Always at least 1.
    pub total_pages: usize,
    /// Size of the unfiltered collection.
    pub total_count: usize,
    pub filtered_count: usize,
}

// ============================================================================
// Reducer
// ============================================================================

/// Number of pages for `len` items; an empty list still has one page.
pub fn page_count(len: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    len.div_ceil(size).max(1)
}

/// Clamps a 1-indexed page into `1..=total_pages`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Filters and sorts without paginating.
pub fn filter_and_sort<T: ListRecord + Clone>(
    items: &[T],
    query: &ListQuery,
    today: NaiveDate,
) -> Vec<T> {
    let mut kept: Vec<(Option<NaiveDate>, &T)> = items
        .iter()
        .map(|item| (item.list_date(), item))
        .filter(|(date, item)| query.matches_with_date(*item, *date, today))
        .collect();

    if let Some(order) = query.sort {
        kept.sort_by(|(a, _), (b, _)| compare_dates(*a, *b, order));
    }

    kept.into_iter().map(|(_, item)| item.clone()).collect()
}

/// Slices an already filtered list into one 1-indexed page.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> (Vec<T>, usize, usize) {
    let size = page_size.max(1);
    let total_pages = page_count(items.len(), size);
    let page = clamp_page(page, total_pages);
    let start = (page - 1) * size;
    let end = (start + size).min(items.len());
    let slice = items.get(start..end).unwrap_or(&[]).to_vec();
    (slice, page, total_pages)
}

/// Full reduction: filter, sort, then cut the requested page.
pub fn reduce<T: ListRecord + Clone>(
    items: &[T],
    query: &ListQuery,
    today: NaiveDate,
) -> ListPage<T> {
    let filtered = filter_and_sort(items, query, today);
    let (page_items, page, total_pages) = paginate(&filtered, query.page, query.page_size);
    ListPage {
        items: page_items,
        page,
        page_size: query.page_size.max(1),
        total_pages,
        total_count: items.len(),
        filtered_count: filtered.len(),
    }
}

/// Sorted, de-duplicated non-empty values of `field`, for filter dropdowns.
pub fn distinct_values<T: ListRecord>(items: &[T], field: &str) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.field(field))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Dated records come first in both directions; undated keep input order.
fn compare_dates(a: Option<NaiveDate>, b: Option<NaiveDate>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Ascending => a.cmp(&b),
            SortOrder::Descending => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::business_time::parse_loose_date;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: usize,
        course: &'static str,
        status: &'static str,
        date: &'static str,
        title: &'static str,
    }

    impl ListRecord for Row {
        fn field(&self, key: &str) -> Option<String> {
            match key {
                "courseName" => Some(self.course.to_string()),
                "status" => Some(self.status.to_string()),
                _ => None,
            }
        }

        fn list_date(&self) -> Option<NaiveDate> {
            parse_loose_date(self.date)
        }

        fn search_text(&self) -> Vec<String> {
            vec![self.title.to_string()]
        }
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, course: "IELTS", status: "active", date: "2025-05-20", title: "Morning batch" },
            Row { id: 2, course: "IELTS", status: "active", date: "2025-06-01", title: "Evening batch" },
            Row { id: 3, course: "TOEFL", status: "inactive", date: "2025-05-01", title: "Weekend" },
            Row { id: 4, course: "IELTS", status: "inactive", date: "not-a-date", title: "Broken" },
            Row { id: 5, course: "GRE", status: "active", date: "2025-07-15", title: "Morning GRE" },
            Row { id: 6, course: "IELTS", status: "active", date: "2025-06-10", title: "Morning batch 2" },
            Row { id: 7, course: "PTE", status: "active", date: "2025-05-20", title: "PTE intro" },
        ]
    }

    fn ids(items: &[Row]) -> Vec<usize> {
        items.iter().map(|r| r.id).collect()
    }

    #[test]
    fn unset_query_matches_everything() {
        let page = reduce(&rows(), &ListQuery { page_size: 100, ..Default::default() }, d("2025-06-01"));
        assert_eq!(ids(&page.items), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(page.filtered_count, 7);
        assert_eq!(page.total_count, 7);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn past_ielts_excludes_reference_date_and_later() {
        let mut query = ListQuery { temporal: TemporalBucket::Past, page_size: 100, ..Default::default() };
        query.set_exact("courseName", "IELTS");
        let page = reduce(&rows(), &query, d("2025-06-01"));
        assert_eq!(ids(&page.items), vec![1]);
    }

    #[test]
    fn upcoming_includes_today() {
        let query = ListQuery { temporal: TemporalBucket::Upcoming, page_size: 100, ..Default::default() };
        let page = reduce(&rows(), &query, d("2025-06-01"));
        assert_eq!(ids(&page.items), vec![2, 5, 6]);
        assert!(page.items.iter().all(|r| r.list_date().unwrap() >= d("2025-06-01")));
    }

    #[test]
    fn malformed_dates_never_match_date_criteria() {
        for temporal in [TemporalBucket::Past, TemporalBucket::Upcoming] {
            let query = ListQuery { temporal, page_size: 100, ..Default::default() };
            let page = reduce(&rows(), &query, d("2025-06-01"));
            assert!(!ids(&page.items).contains(&4));
        }
        let query = ListQuery { on_date: Some(d("2025-05-20")), page_size: 100, ..Default::default() };
        assert_eq!(ids(&reduce(&rows(), &query, d("2025-06-01")).items), vec![1, 7]);
    }

    #[test]
    fn criteria_are_conjunctive() {
        let mut query = ListQuery { search: "morning".into(), page_size: 100, ..Default::default() };
        query.set_exact("status", "active");
        query.set_exact("courseName", "IELTS");
        let page = reduce(&rows(), &query, d("2025-06-01"));
        assert_eq!(ids(&page.items), vec![1, 6]);
        assert_eq!(query.active_filters_count(), 3);
    }

    #[test]
    fn empty_exact_value_clears_criterion() {
        let mut query = ListQuery::default();
        query.set_exact("courseName", "IELTS");
        query.set_exact("courseName", "  ");
        assert!(query.exact.is_empty());
        assert_eq!(query.active_filters_count(), 0);
    }

    #[test]
    fn sort_is_stable_and_puts_undated_last() {
        let asc = ListQuery { sort: Some(SortOrder::Ascending), page_size: 100, ..Default::default() };
        assert_eq!(ids(&reduce(&rows(), &asc, d("2025-06-01")).items), vec![3, 1, 7, 2, 6, 5, 4]);

        let desc = ListQuery { sort: Some(SortOrder::Descending), page_size: 100, ..Default::default() };
        assert_eq!(ids(&reduce(&rows(), &desc, d("2025-06-01")).items), vec![5, 6, 2, 1, 7, 3, 4]);
    }

    #[test]
    fn pages_concatenate_to_filtered_set() {
        let today = d("2025-06-01");
        let base = ListQuery { sort: Some(SortOrder::Ascending), ..Default::default() };
        let full = filter_and_sort(&rows(), &base, today);

        for page_size in 1..=8 {
            let first = reduce(&rows(), &ListQuery { page_size, page: 1, ..base.clone() }, today);
            let mut seen = Vec::new();
            for page in 1..=first.total_pages {
                let slice = reduce(&rows(), &ListQuery { page_size, page, ..base.clone() }, today);
                assert!(slice.items.len() <= page_size);
                seen.extend(slice.items);
            }
            assert_eq!(seen, full, "page_size {page_size}");
        }
    }

    #[test]
    fn page_index_is_clamped() {
        let today = d("2025-06-01");
        let past_end = reduce(&rows(), &ListQuery { page: 99, page_size: 3, ..Default::default() }, today);
        assert_eq!(past_end.page, 3);
        assert_eq!(ids(&past_end.items), vec![7]);

        let zero = reduce(&rows(), &ListQuery { page: 0, page_size: 3, ..Default::default() }, today);
        assert_eq!(zero.page, 1);
        assert_eq!(ids(&zero.items), vec![1, 2, 3]);
    }

    #[test]
    fn empty_result_still_has_one_page() {
        let mut query = ListQuery::default();
        query.set_exact("courseName", "SAT");
        let page = reduce(&rows(), &query, d("2025-06-01"));
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page_count(0, 0), 1);
    }

    #[test]
    fn distinct_values_are_sorted_and_unique() {
        assert_eq!(
            distinct_values(&rows(), "courseName"),
            vec!["GRE", "IELTS", "PTE", "TOEFL"]
        );
        assert!(distinct_values(&rows(), "unknown").is_empty());
    }

    #[test]
    fn temporal_bucket_select_values() {
        for bucket in [TemporalBucket::All, TemporalBucket::Past, TemporalBucket::Upcoming] {
            assert_eq!(TemporalBucket::from_select(bucket.as_str()), bucket);
        }
        assert_eq!(TemporalBucket::from_select("bogus"), TemporalBucket::All);
    }
}
