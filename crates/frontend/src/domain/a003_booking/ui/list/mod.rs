pub mod state;

use contracts::domain::a003_booking::{Booking, BookingStatus};
use contracts::shared::list_view::{distinct_values, TemporalBucket};
use contracts::system::auth::Section;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::state::{create_state, storage_key};
use crate::domain::a001_user::api::fetch_user_bookings;
use crate::domain::a003_booking::api::fetch_bookings;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::registry::tab_key_for_section;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::cancel::RequestSeq;
use crate::shared::components::filter_panel::{FilterPanel, FilterSelect};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::{business_today, format_date, format_time_12h};
use crate::shared::icons::icon;
use crate::shared::list_state::{update_filter, update_query};
use crate::shared::list_utils::{highlight_matches, next_sort, sort_indicator, SearchInput};
use crate::shared::notify::use_notify;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_auth;

fn status_badge_class(status: &BookingStatus) -> &'static str {
    match status {
        BookingStatus::Confirmed | BookingStatus::Completed => "badge badge--success",
        BookingStatus::Pending | BookingStatus::Rescheduled => "badge badge--warning",
        BookingStatus::Cancelled => "badge badge--error",
        BookingStatus::Other(_) => "badge badge--neutral",
    }
}

async fn load_bookings(mine: bool, user_id: Option<String>) -> Result<Vec<Booking>, String> {
    if mine {
        let id = user_id.ok_or_else(|| "Session has no user id".to_string())?;
        fetch_user_bookings(&id).await.map_err(|e| e.to_string())
    } else {
        fetch_bookings().await.map_err(|e| e.to_string())
    }
}

/// Bookings table. With `mine` it lists the signed-in candidate's own
/// bookings and offers rescheduling.
#[component]
pub fn BookingList(mine: bool) -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();
    let notify = use_notify();
    let (auth_state, _) = use_auth();
    let key = storage_key(mine);
    let state = create_state(mine);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let is_filter_expanded = RwSignal::new(false);

    let seq = StoredValue::new(RequestSeq::new());

    let load_items = move || {
        let user_id = auth_state.with_untracked(|s| s.user_id());
        let seq = seq.get_value();
        let ticket = seq.next();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = load_bookings(mine, user_id).await;
            if !seq.is_current(ticket) {
                return;
            }
            match result {
                Ok(bookings) => {
                    log!("Loaded {} bookings (mine={})", bookings.len(), mine);
                    state.update(|s| {
                        s.items = bookings;
                        s.is_loaded = true;
                    });
                }
                Err(e) => {
                    notify.failed("load bookings", &e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_items();
        }
    });

    let open_schedules = move || {
        let key = tab_key_for_section(Section::Schedules);
        tabs_store.open_tab(key, tab_label_for_key(key));
    };

    let page_view = Memo::new(move |_| state.with(|s| s.view()));
    let search = Signal::derive(move || state.with(|s| s.query.search.clone()));
    let active_filters_count = Signal::derive(move || state.with(|s| s.query.active_filters_count()));
    let options_for = move |field: &'static str| Signal::derive(move || state.with(|s| distinct_values(&s.items, field)));
    let set_exact = move |field: &'static str| {
        Callback::new(move |value: String| update_filter(key, state, |q| q.set_exact(field, &value)))
    };
    let exact_value = move |field: &'static str| Signal::derive(move || state.with(|s| s.query.exact_value(field)));
    let temporal = Signal::derive(move || state.with(|s| s.query.temporal.as_str().to_string()));
    let page_id = if mine { "a003_my_booking--list" } else { "a003_booking--list" };

    view! {
        <PageFrame page_id=page_id category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{if mine { "My bookings" } else { "Bookings" }}</h1>
                    <span class="badge badge--primary">
                        {move || page_view.with(|p| p.total_count.to_string())}
                    </span>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_items()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <FilterPanel
                    is_expanded=is_filter_expanded
                    active_filters_count=active_filters_count
                    on_clear=Callback::new(move |_| update_query(key, state, |q| q.clear_filters()))
                    pagination_controls=move || view! {
                        <PaginationControls
                            current_page=Signal::derive(move || page_view.with(|p| p.page))
                            total_pages=Signal::derive(move || page_view.with(|p| p.total_pages))
                            filtered_count=Signal::derive(move || page_view.with(|p| p.filtered_count))
                            page_size=Signal::derive(move || page_view.with(|p| p.page_size))
                            on_page_change=Callback::new(move |page| update_query(key, state, |q| q.page = page))
                            on_page_size_change=Callback::new(move |size| update_filter(key, state, |q| q.page_size = size))
                        />
                    }
                    filter_content=move || view! {
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <Show when=move || !mine>
                                <div style="flex: 1; max-width: 320px;">
                                    <Flex vertical=true gap=FlexGap::Small>
                                        <Label>"Search:"</Label>
                                        <SearchInput
                                            value=search
                                            on_change=Callback::new(move |text: String| update_filter(key, state, |q| q.search = text))
                                            placeholder="Candidate, email, course..."
                                        />
                                    </Flex>
                                </div>
                            </Show>
                            <FilterSelect label="Course" options=options_for("courseName") value=exact_value("courseName") on_change=set_exact("courseName") />
                            <FilterSelect label="Status" options=options_for("status") value=exact_value("status") on_change=set_exact("status") />
                            <FilterSelect label="Location" options=options_for("location") value=exact_value("location") on_change=set_exact("location") />
                            <FilterSelect label="Attendance" options=options_for("attendance") value=exact_value("attendance") on_change=set_exact("attendance") />
                            <label class="filter-field">
                                <span class="filter-field__label">"When"</span>
                                <select
                                    class="filter-field__select"
                                    prop:value=move || temporal.get()
                                    on:change=move |ev| {
                                        let bucket = TemporalBucket::from_select(&event_target_value(&ev));
                                        update_filter(key, state, |q| q.temporal = bucket);
                                    }
                                >
                                    <option value="all">"All"</option>
                                    <option value="upcoming">"Upcoming"</option>
                                    <option value="past">"Past"</option>
                                </select>
                            </label>
                        </Flex>
                    }
                />

                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=120.0>
                                    <div
                                        class="table__sortable-header"
                                        style="cursor: pointer;"
                                        on:click=move |_| update_query(key, state, |q| q.sort = next_sort(q.sort))
                                    >
                                        "Date"
                                        <span>{move || sort_indicator(state.with(|s| s.query.sort))}</span>
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Time"</TableHeaderCell>
                                {(!mine).then(|| view! { <TableHeaderCell min_width=160.0>"Candidate"</TableHeaderCell> })}
                                <TableHeaderCell min_width=90.0>"Course"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Test type"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Location"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Status"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Attendance"</TableHeaderCell>
                                {mine.then(|| view! { <TableHeaderCell min_width=110.0>""</TableHeaderCell> })}
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || page_view.with(|p| p.items.clone())
                                key=|b| format!("{}:{}", b.id, b.status.as_str())
                                children=move |booking| {
                                    let filter = search.get_untracked();
                                    let date = booking
                                        .date()
                                        .map(|d| format_date(&d.to_string()))
                                        .unwrap_or_else(|| "-".to_string());
                                    let candidate = highlight_matches(booking.candidate_name(), &filter);
                                    let course = highlight_matches(booking.course_name(), &filter);
                                    let test_type = booking.test_type().map(|t| t.as_str()).unwrap_or("-");
                                    let can_reschedule = booking.can_reschedule(business_today());
                                    view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout>{date}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{format_time_12h(&booking.booking_time)}</TableCellLayout></TableCell>
                                            {(!mine).then(|| view! {
                                                <TableCell><TableCellLayout truncate=true>{candidate}</TableCellLayout></TableCell>
                                            })}
                                            <TableCell><TableCellLayout>{course}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{test_type}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{booking.location.as_str()}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class=status_badge_class(&booking.status)>{booking.status.as_str().to_string()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout>{booking.attendance.label()}</TableCellLayout></TableCell>
                                            {mine.then(|| view! {
                                                <TableCell>
                                                    {can_reschedule.then(|| view! {
                                                        <button class="button button--secondary" on:click=move |_| open_schedules()>
                                                            {icon("calendar")}
                                                            " Reschedule"
                                                        </button>
                                                    })}
                                                </TableCell>
                                            })}
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>

                    <Show when=move || state.with(|s| s.is_loaded) && page_view.with(|p| p.items.is_empty())>
                        <div class="table__empty">"No bookings found."</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}
