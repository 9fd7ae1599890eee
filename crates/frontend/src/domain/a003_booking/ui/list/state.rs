use contracts::domain::a003_booking::Booking;
use contracts::shared::list_view::{ListQuery, SortOrder};
use leptos::prelude::*;

use crate::shared::list_state::{self, ListState};

pub fn storage_key(mine: bool) -> &'static str {
    if mine {
        "a003_my_bookings_list_state_v1"
    } else {
        "a003_booking_list_state_v1"
    }
}

pub fn create_state(mine: bool) -> RwSignal<ListState<Booking>> {
    list_state::create_state(
        storage_key(mine),
        ListQuery {
            sort: Some(SortOrder::Descending),
            ..ListQuery::default()
        },
    )
}
