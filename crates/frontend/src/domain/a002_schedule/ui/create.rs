use contracts::domain::a002_schedule::{CreateScheduleDto, NewTimeSlot, TestType, COURSES};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_schedule::api::create_schedule;
use crate::shared::components::date_input::DateInput;
use crate::shared::date_utils::business_today;
use crate::shared::icons::icon;
use crate::shared::notify::use_notify;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_FORM;

const STATUS_OPTIONS: [&str; 2] = ["active", "inactive"];

fn blank_form() -> CreateScheduleDto {
    CreateScheduleDto {
        course_name: COURSES[0].to_string(),
        test_type: TestType::default(),
        start_date: String::new(),
        time_slots: vec![NewTimeSlot {
            start_time: "09:00".to_string(),
            end_time: "12:00".to_string(),
            total_slot: 20,
        }],
        status: STATUS_OPTIONS[0].to_string(),
    }
}

#[component]
pub fn CreateSchedule(on_created: Callback<()>) -> impl IntoView {
    let notify = use_notify();
    let form = RwSignal::new(blank_form());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);
    let today = business_today().format("%Y-%m-%d").to_string();

    let update_slot = move |index: usize, change: Box<dyn FnOnce(&mut NewTimeSlot)>| {
        form.update(|f| {
            if let Some(slot) = f.time_slots.get_mut(index) {
                change(slot);
            }
        });
    };

    let submit = move |_| {
        let dto = form.get_untracked();
        if let Err(e) = dto.validate(business_today()) {
            set_error.set(Some(e.to_string()));
            return;
        }
        set_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            match create_schedule(&dto).await {
                Ok(created) => {
                    notify.success(format!("{} session on {} created", created.course_name, created.start_date));
                    form.set(blank_form());
                    on_created.run(());
                }
                Err(e) => {
                    notify.failed("create the schedule", &e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <PageFrame page_id="a002_schedule--form" category=PAGE_CAT_FORM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"New schedule"</h1>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <div class="form-grid">
                    <label class="form-field">
                        <span class="form-field__label">"Course"</span>
                        <select
                            class="form-field__select"
                            prop:value=move || form.with(|f| f.course_name.clone())
                            on:change=move |ev| form.update(|f| f.course_name = event_target_value(&ev))
                        >
                            {COURSES.iter().map(|c| view! { <option value=*c>{*c}</option> }).collect_view()}
                        </select>
                    </label>

                    <label class="form-field">
                        <span class="form-field__label">"Test type"</span>
                        <select
                            class="form-field__select"
                            prop:value=move || form.with(|f| f.test_type.as_str().to_string())
                            on:change=move |ev| form.update(|f| f.test_type = TestType::from(event_target_value(&ev)))
                        >
                            {TestType::ALL.iter().map(|t| view! { <option value=t.as_str()>{t.as_str()}</option> }).collect_view()}
                        </select>
                    </label>

                    <label class="form-field">
                        <span class="form-field__label">"Date"</span>
                        <DateInput
                            value=Signal::derive(move || form.with(|f| f.start_date.clone()))
                            on_change=move |v: String| form.update(|f| f.start_date = v)
                            min=today
                        />
                    </label>

                    <label class="form-field">
                        <span class="form-field__label">"Status"</span>
                        <select
                            class="form-field__select"
                            prop:value=move || form.with(|f| f.status.clone())
                            on:change=move |ev| form.update(|f| f.status = event_target_value(&ev))
                        >
                            {STATUS_OPTIONS.iter().map(|s| view! { <option value=*s>{*s}</option> }).collect_view()}
                        </select>
                    </label>
                </div>

                <h2 class="section__title">"Time slots"</h2>
                {move || {
                    let slots = form.with(|f| f.time_slots.clone());
                    let removable = slots.len() > 1;
                    slots.into_iter().enumerate().map(|(index, slot)| view! {
                        <div class="slot-row">
                            <span class="slot-row__number">{index + 1}</span>
                            <input
                                type="time"
                                prop:value=slot.start_time.clone()
                                on:change=move |ev| {
                                    let v = event_target_value(&ev);
                                    update_slot(index, Box::new(move |s| s.start_time = v));
                                }
                            />
                            <input
                                type="time"
                                prop:value=slot.end_time.clone()
                                on:change=move |ev| {
                                    let v = event_target_value(&ev);
                                    update_slot(index, Box::new(move |s| s.end_time = v));
                                }
                            />
                            <input
                                type="number"
                                min="1"
                                prop:value=slot.total_slot.to_string()
                                on:change=move |ev| {
                                    let seats = event_target_value(&ev).trim().parse::<u32>().unwrap_or(0);
                                    update_slot(index, Box::new(move |s| s.total_slot = seats));
                                }
                            />
                            <Show when=move || removable>
                                <button
                                    class="button button--ghost"
                                    title="Remove slot"
                                    on:click=move |_| form.update(|f| {
                                        if index < f.time_slots.len() {
                                            f.time_slots.remove(index);
                                        }
                                    })
                                >
                                    {icon("trash")}
                                </button>
                            </Show>
                        </div>
                    }).collect_view()
                }}

                <Flex gap=FlexGap::Small>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| form.update(|f| f.time_slots.push(NewTimeSlot::default()))
                    >
                        {icon("plus")}
                        " Add slot"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=submit
                        disabled=Signal::derive(move || saving.get())
                    >
                        {move || if saving.get() { "Saving..." } else { "Create schedule" }}
                    </Button>
                </Flex>
            </div>
        </PageFrame>
    }
}
