use contracts::domain::a001_user::User;
use leptos::prelude::*;
use thaw::*;

use super::view_model::CandidateDetailsViewModel;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::date_utils::{format_date, format_time_12h};
use crate::shared::icons::icon;
use crate::shared::notify::use_notify;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;

fn field_row(label: &'static str, value: String) -> impl IntoView {
    let value = if value.trim().is_empty() { "-".to_string() } else { value };
    view! {
        <div class="detail-field">
            <span class="detail-field__label">{label}</span>
            <span class="detail-field__value">{value}</span>
        </div>
    }
}

fn profile_card(user: User) -> impl IntoView {
    let registered = user.created_at.as_deref().map(format_date).unwrap_or_default();
    view! {
        <div class="card">
            <div class="card__body detail-grid">
                {field_row("Name", user.name.clone())}
                {field_row("Email", user.email.clone())}
                {field_row("Contact", user.contact_no.clone())}
                {field_row("Passport", user.passport_number.clone())}
                {field_row("Transaction", user.transaction_id.clone())}
                {field_row("Test type", user.test_type.clone())}
                {field_row("Mock type", user.mock_type.clone())}
                {field_row("Mocks used", format!("{} of {}", user.mocks_used(), user.total_mock))}
                {field_row("Status", user.status.label())}
                {field_row("Registered", registered)}
            </div>
        </div>
    }
}

#[component]
pub fn CandidateDetails(id: String, tab_key: String, on_close: Callback<()>) -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();
    let vm = CandidateDetailsViewModel::new();
    vm.load(id, tab_key, tabs_store, use_notify());

    view! {
        <PageFrame page_id="a001_candidate--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {move || vm.user.with(|u| u.as_ref().map(|u| u.display_name().to_string()).unwrap_or_else(|| "Candidate".to_string()))}
                    </h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        {icon("x")}
                        " Close"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || vm.error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <Show when=move || vm.loading.get()>
                    <div class="page__loading"><Spinner /></div>
                </Show>

                {move || vm.user.get().map(profile_card)}

                <Show when=move || vm.user.with(Option::is_some)>
                    <h2 class="section__title">"Bookings"</h2>
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Date"</TableHeaderCell>
                                <TableHeaderCell>"Time"</TableHeaderCell>
                                <TableHeaderCell>"Course"</TableHeaderCell>
                                <TableHeaderCell>"Location"</TableHeaderCell>
                                <TableHeaderCell>"Status"</TableHeaderCell>
                                <TableHeaderCell>"Attendance"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || vm.bookings.get()
                                key=|b| b.id.clone()
                                children=move |b| {
                                    let date = b.date().map(|d| format_date(&d.to_string())).unwrap_or_else(|| "-".to_string());
                                    let time = format_time_12h(&b.booking_time);
                                    let course = b.course_name().to_string();
                                    let location = b.location.as_str();
                                    let status = b.status.as_str().to_string();
                                    let attendance = b.attendance.label();
                                    view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout>{date}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{time}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{course}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{location}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{status}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{attendance}</TableCellLayout></TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    <Show when=move || vm.bookings.with(Vec::is_empty) && !vm.loading.get()>
                        <div class="table__empty">"No bookings yet."</div>
                    </Show>
                </Show>
            </div>
        </PageFrame>
    }
}
