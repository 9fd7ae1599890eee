use contracts::shared::business_time::BUSINESS_TZ_NAME;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d100_overview::api::{self, OverviewData, BOOKING_DAYS, REGISTRATION_MONTHS};
use crate::shared::cancel::CancelFlag;
use crate::shared::components::donut_chart::DonutChart;
use crate::shared::components::stat_card::StatCard;
use crate::shared::date_utils::business_today;
use crate::shared::icons::icon;
use crate::shared::notify::use_notify;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;

/// Staff landing page: totals and recent activity.
#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let notify = use_notify();
    let (data, set_data) = signal(None::<OverviewData>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let cancel = StoredValue::new(CancelFlag::new());
    on_cleanup(move || cancel.with_value(|flag| flag.cancel()));

    let load = move || {
        cancel.with_value(|flag| flag.cancel());
        let flag = CancelFlag::new();
        cancel.set_value(flag.clone());
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::load_overview(&flag, business_today()).await {
                Ok(Some(overview)) => {
                    set_data.set(Some(overview));
                    set_loading.set(false);
                }
                Ok(None) => {}
                Err(e) => {
                    log::error!("Failed to load overview: {}", e);
                    notify.failed("load the overview", &e);
                    set_error.set(Some(e.to_string()));
                    set_loading.set(false);
                }
            }
        });
    };
    load();

    let count = move |pick: fn(&OverviewData) -> usize| Signal::derive(move || data.with(|d| d.as_ref().map(pick)));
    let caption = format!("Dates in {}", BUSINESS_TZ_NAME);

    view! {
        <PageFrame page_id="d100_overview--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Overview"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <div class="stat-grid">
                    <StatCard
                        label="Users".to_string()
                        icon_name="users".to_string()
                        value=count(|d| d.users)
                        subtitle=Signal::derive(move || data.with(|d| d.as_ref().map(|d| format!("{} candidates", d.candidates))))
                    />
                    <StatCard
                        label="Schedules".to_string()
                        icon_name="calendar".to_string()
                        value=count(|d| d.schedules)
                        subtitle=Signal::derive(move || data.with(|d| d.as_ref().map(|d| format!("{} upcoming", d.upcoming_schedules))))
                    />
                    <StatCard
                        label="Bookings".to_string()
                        icon_name="book-open".to_string()
                        value=count(|d| d.bookings)
                    />
                </div>

                <div class="chart-grid">
                    <DonutChart
                        title=format!("Registrations, last {} months", REGISTRATION_MONTHS)
                        data=Signal::derive(move || data.with(|d| d.as_ref().map(|d| d.registrations_by_month.clone()).unwrap_or_default()))
                        caption=caption.clone()
                    />
                    <DonutChart
                        title=format!("Bookings, last {} days", BOOKING_DAYS)
                        data=Signal::derive(move || data.with(|d| d.as_ref().map(|d| d.bookings_by_day.clone()).unwrap_or_default()))
                        caption=caption
                    />
                </div>
            </div>
        </PageFrame>
    }
}
