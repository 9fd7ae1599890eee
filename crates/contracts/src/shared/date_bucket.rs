//! Day / month counters behind the dashboard donut charts.

use crate::shared::business_time::{object_id_instant, parse_loose_instant};
use chrono::{DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Anything with a creation moment.
///
/// The explicit timestamp wins; when it is absent or unparseable the
/// time-ordered identifier is decoded instead.
pub trait CreationInstant {
    fn created_at_raw(&self) -> Option<&str>;

    fn object_id(&self) -> Option<&str> {
        None
    }

    fn creation_instant(&self) -> Option<DateTime<Utc>> {
        self.created_at_raw()
            .and_then(parse_loose_instant)
            .or_else(|| self.object_id().and_then(object_id_instant))
    }
}

/// Calendar month key, ordered chronologically, displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateBuckets {
    pub by_day: BTreeMap<NaiveDate, usize>,
    pub by_month: BTreeMap<MonthKey, usize>,
    /// Records without a resolvable instant.
    pub dropped: usize,
}

impl DateBuckets {
    pub fn total(&self) -> usize {
        self.by_month.values().sum()
    }

    pub fn day_counts_in_month(&self, month: MonthKey) -> usize {
        self.by_day
            .iter()
            .filter(|(day, _)| month.contains(**day))
            .map(|(_, n)| *n)
            .sum()
    }

    /// The `n` days ending at `today`, oldest first, zero-filled.
    pub fn recent_days(&self, n: usize, today: NaiveDate) -> Vec<(NaiveDate, usize)> {
        let mut out: Vec<(NaiveDate, usize)> = (0..n)
            .filter_map(|back| today.checked_sub_days(Days::new(back as u64)))
            .map(|day| (day, self.by_day.get(&day).copied().unwrap_or(0)))
            .collect();
        out.reverse();
        out
    }

    /// The `n` months ending with the month of `today`, oldest first, zero-filled.
    pub fn recent_months(&self, n: usize, today: NaiveDate) -> Vec<(MonthKey, usize)> {
        let mut out: Vec<(MonthKey, usize)> = (0..n)
            .filter_map(|back| today.checked_sub_months(Months::new(back as u32)))
            .map(MonthKey::of)
            .map(|key| (key, self.by_month.get(&key).copied().unwrap_or(0)))
            .collect();
        out.reverse();
        out
    }
}

/// Buckets records by business-local calendar day and month.
pub fn aggregate<'a, T, I>(records: I, tz: &FixedOffset) -> DateBuckets
where
    T: CreationInstant + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut buckets = DateBuckets::default();
    for record in records {
        let Some(instant) = record.creation_instant() else {
            buckets.dropped += 1;
            continue;
        };
        let day = instant.with_timezone(tz).date_naive();
        *buckets.by_day.entry(day).or_insert(0) += 1;
        *buckets.by_month.entry(MonthKey::of(day)).or_insert(0) += 1;
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::business_time::business_tz;

    struct Rec {
        created_at: Option<&'static str>,
        id: &'static str,
    }

    impl CreationInstant for Rec {
        fn created_at_raw(&self) -> Option<&str> {
            self.created_at
        }

        fn object_id(&self) -> Option<&str> {
            Some(self.id)
        }
    }

    fn rec(created_at: &'static str) -> Rec {
        Rec { created_at: Some(created_at), id: "" }
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn buckets_example_dates() {
        let records = [rec("2025-01-05"), rec("2025-01-05"), rec("2025-02-01")];
        let buckets = aggregate(&records, &business_tz());

        assert_eq!(
            buckets.by_day,
            BTreeMap::from([(d("2025-01-05"), 2), (d("2025-02-01"), 1)])
        );
        let months: Vec<(String, usize)> = buckets
            .by_month
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        assert_eq!(months, vec![("2025-01".to_string(), 2), ("2025-02".to_string(), 1)]);
        assert_eq!(buckets.dropped, 0);
    }

    #[test]
    fn days_sum_to_their_month() {
        let records = [
            rec("2025-01-31T17:59:00Z"),
            rec("2025-01-31T18:01:00Z"), // already 1 Feb in Dhaka
            rec("2025-02-14T09:00:00Z"),
            rec("2025-03-01"),
            rec("2025-03-02T08:00:00+06:00"),
        ];
        let buckets = aggregate(&records, &business_tz());
        for (month, count) in &buckets.by_month {
            assert_eq!(buckets.day_counts_in_month(*month), *count, "{month}");
        }
        assert_eq!(buckets.by_month[&MonthKey { year: 2025, month: 1 }], 1);
        assert_eq!(buckets.by_month[&MonthKey { year: 2025, month: 2 }], 2);
        assert_eq!(buckets.total(), records.len());
    }

    #[test]
    fn falls_back_to_identifier_and_drops_unresolvable() {
        let records = [
            // 0x65000000 -> 2023-09-12 06:06:56 UTC
            Rec { created_at: None, id: "65000000aaaaaaaaaaaaaaaa" },
            Rec { created_at: Some("garbage"), id: "65000000bbbbbbbbbbbbbbbb" },
            Rec { created_at: None, id: "not-an-id" },
        ];
        let buckets = aggregate(&records, &business_tz());
        assert_eq!(buckets.by_day.get(&d("2023-09-12")), Some(&2));
        assert_eq!(buckets.dropped, 1);
        assert_eq!(buckets.total(), 2);
    }

    #[test]
    fn recent_windows_are_zero_filled() {
        let records = [rec("2025-03-01"), rec("2025-03-03"), rec("2025-01-20")];
        let buckets = aggregate(&records, &business_tz());

        let days = buckets.recent_days(3, d("2025-03-03"));
        assert_eq!(
            days,
            vec![(d("2025-03-01"), 1), (d("2025-03-02"), 0), (d("2025-03-03"), 1)]
        );

        let months = buckets.recent_months(3, d("2025-03-03"));
        let rendered: Vec<(String, usize)> =
            months.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
        assert_eq!(
            rendered,
            vec![
                ("2025-01".to_string(), 1),
                ("2025-02".to_string(), 0),
                ("2025-03".to_string(), 2)
            ]
        );
    }
}
