pub mod state;

use chrono::NaiveDate;
use contracts::domain::a002_schedule::{Schedule, TestType, COURSES};
use contracts::shared::list_view::{distinct_values, TemporalBucket};
use contracts::system::auth::Section;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::state::{create_state, STATE_KEY};
use crate::domain::a002_schedule::api::{delete_schedule, fetch_schedules};
use crate::shared::cancel::RequestSeq;
use crate::shared::components::date_input::DateInput;
use crate::shared::components::filter_panel::{FilterPanel, FilterSelect};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::{format_date, format_slot};
use crate::shared::icons::icon;
use crate::shared::list_state::{update_filter, update_query};
use crate::shared::list_utils::{next_sort, sort_indicator};
use crate::shared::notify::use_notify;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_role;

fn seats_badge(schedule: &Schedule) -> (&'static str, String) {
    let text = format!("{}/{}", schedule.seats_left(), schedule.capacity());
    if schedule.is_full() {
        ("badge badge--error", text)
    } else {
        ("badge badge--success", text)
    }
}

fn confirm_delete(schedule: &Schedule) -> bool {
    let message = format!(
        "Delete the {} session on {}?",
        schedule.course_name,
        format_date(&schedule.start_date)
    );
    web_sys::window()
        .and_then(|w| w.confirm_with_message(&message).ok())
        .unwrap_or(false)
}

#[component]
pub fn ScheduleList() -> impl IntoView {
    let notify = use_notify();
    let role = use_role();
    let can_delete = Signal::derive(move || role.get().is_some_and(|r| r.can_access(Section::DeleteSchedule)));

    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let is_filter_expanded = RwSignal::new(false);

    let seq = StoredValue::new(RequestSeq::new());

    let load_items = move || {
        let seq = seq.get_value();
        let ticket = seq.next();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = fetch_schedules().await;
            if !seq.is_current(ticket) {
                return;
            }
            match result {
                Ok(schedules) => {
                    log!("Loaded {} schedules", schedules.len());
                    state.update(|s| {
                        s.items = schedules;
                        s.is_loaded = true;
                    });
                }
                Err(e) => {
                    notify.failed("load schedules", &e);
                    set_error.set(Some(e.to_string()));
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

    let handle_delete = move |schedule: Schedule| {
        if !confirm_delete(&schedule) {
            return;
        }
        spawn_local(async move {
            match delete_schedule(&schedule.id).await {
                Ok(message) => {
                    state.update(|s| s.items.retain(|x| x.id != schedule.id));
                    notify.success(if message.is_empty() { "Schedule deleted".to_string() } else { message });
                }
                Err(e) => notify.error(format!("Delete failed: {}", e)),
            }
        });
    };

    let page_view = Memo::new(move |_| state.with(|s| s.view()));
    let active_filters_count = Signal::derive(move || state.with(|s| s.query.active_filters_count()));

    let course_options = Signal::derive(move || {
        let mut options: Vec<String> = COURSES.iter().map(|c| c.to_string()).collect();
        for extra in state.with(|s| distinct_values(&s.items, "courseName")) {
            if !options.contains(&extra) {
                options.push(extra);
            }
        }
        options
    });
    let test_type_options = Signal::derive(|| TestType::ALL.iter().map(|t| t.as_str().to_string()).collect::<Vec<_>>());
    let status_options = Signal::derive(move || state.with(|s| distinct_values(&s.items, "status")));

    let set_exact = move |field: &'static str| {
        Callback::new(move |value: String| update_filter(STATE_KEY, state, |q| q.set_exact(field, &value)))
    };
    let exact_value = move |field: &'static str| Signal::derive(move || state.with(|s| s.query.exact_value(field)));
    let on_date = Signal::derive(move || {
        state.with(|s| s.query.on_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default())
    });
    let temporal = Signal::derive(move || state.with(|s| s.query.temporal.as_str().to_string()));

    view! {
        <PageFrame page_id="a002_schedule--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Schedules"</h1>
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
                    on_clear=Callback::new(move |_| update_query(STATE_KEY, state, |q| q.clear_filters()))
                    pagination_controls=move || view! {
                        <PaginationControls
                            current_page=Signal::derive(move || page_view.with(|p| p.page))
                            total_pages=Signal::derive(move || page_view.with(|p| p.total_pages))
                            filtered_count=Signal::derive(move || page_view.with(|p| p.filtered_count))
                            page_size=Signal::derive(move || page_view.with(|p| p.page_size))
                            on_page_change=Callback::new(move |page| update_query(STATE_KEY, state, |q| q.page = page))
                            on_page_size_change=Callback::new(move |size| update_filter(STATE_KEY, state, |q| q.page_size = size))
                        />
                    }
                    filter_content=move || view! {
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <FilterSelect label="Course" options=course_options value=exact_value("courseName") on_change=set_exact("courseName") />
                            <FilterSelect label="Test type" options=test_type_options value=exact_value("testType") on_change=set_exact("testType") />
                            <FilterSelect label="Status" options=status_options value=exact_value("status") on_change=set_exact("status") />
                            <label class="filter-field">
                                <span class="filter-field__label">"Date"</span>
                                <DateInput
                                    value=on_date
                                    on_change=move |v: String| {
                                        let day = NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok();
                                        update_filter(STATE_KEY, state, |q| q.on_date = day);
                                    }
                                />
                            </label>
                            <label class="filter-field">
                                <span class="filter-field__label">"When"</span>
                                <select
                                    class="filter-field__select"
                                    prop:value=move || temporal.get()
                                    on:change=move |ev| {
                                        let bucket = TemporalBucket::from_select(&event_target_value(&ev));
                                        update_filter(STATE_KEY, state, |q| q.temporal = bucket);
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
                                        on:click=move |_| update_query(STATE_KEY, state, |q| q.sort = next_sort(q.sort))
                                    >
                                        "Date"
                                        <span>{move || sort_indicator(state.with(|s| s.query.sort))}</span>
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Course"</TableHeaderCell>
                                <TableHeaderCell min_width=130.0>"Test type"</TableHeaderCell>
                                <TableHeaderCell min_width=200.0>"Time slots"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Seats"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Status"</TableHeaderCell>
                                <Show when=move || can_delete.get()>
                                    <TableHeaderCell min_width=80.0>""</TableHeaderCell>
                                </Show>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || page_view.with(|p| p.items.clone())
                                key=|s| s.id.clone()
                                children=move |schedule| {
                                    let slots = schedule
                                        .time_slots
                                        .iter()
                                        .map(|slot| format_slot(&slot.start_time, &slot.end_time))
                                        .collect::<Vec<_>>()
                                        .join(", ");
                                    let (seat_class, seat_text) = seats_badge(&schedule);
                                    let for_delete = StoredValue::new(schedule.clone());
                                    let start_date = format_date(&schedule.start_date);
                                    let course_name = schedule.course_name.clone();
                                    let test_type = schedule.test_type.as_str();
                                    let status = schedule.status.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout>{start_date}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{course_name}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{test_type}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{slots}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout><span class=seat_class>{seat_text}</span></TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{status}</TableCellLayout></TableCell>
                                            <Show when=move || can_delete.get()>
                                                <TableCell>
                                                    <button
                                                        class="button button--ghost"
                                                        title="Delete"
                                                        on:click=move |_| handle_delete(for_delete.get_value())
                                                    >
                                                        {icon("trash")}
                                                    </button>
                                                </TableCell>
                                            </Show>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>

                    <Show when=move || state.with(|s| s.is_loaded) && page_view.with(|p| p.items.is_empty())>
                        <div class="table__empty">"No schedules match the current filters."</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}
