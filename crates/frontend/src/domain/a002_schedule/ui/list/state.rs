use contracts::domain::a002_schedule::Schedule;
use contracts::shared::list_view::{ListQuery, SortOrder, TemporalBucket};
use leptos::prelude::*;

use crate::shared::list_state::{self, ListState};

pub const STATE_KEY: &str = "a002_schedule_list_state_v1";

/// Upcoming sessions, soonest first.
pub fn default_query() -> ListQuery {
    ListQuery {
        temporal: TemporalBucket::Upcoming,
        sort: Some(SortOrder::Ascending),
        ..ListQuery::default()
    }
}

pub fn create_state() -> RwSignal<ListState<Schedule>> {
    list_state::create_state(STATE_KEY, default_query())
}
