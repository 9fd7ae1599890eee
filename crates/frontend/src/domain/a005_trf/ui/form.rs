use contracts::domain::a001_user::User;
use contracts::domain::a002_schedule::COURSES;
use contracts::domain::a005_trf::{band_options, CreateTrfDto, Skill};
use contracts::system::auth::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_user::api::fetch_all_users;
use crate::domain::a005_trf::api::create_trf;
use crate::shared::cancel::CancelFlag;
use crate::shared::components::date_input::DateInput;
use crate::shared::icons::icon;
use crate::shared::notify::use_notify;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_FORM;

fn band_label(value: f64) -> String {
    format!("{:.1}", value)
}

fn blank_form() -> CreateTrfDto {
    CreateTrfDto {
        course_name: COURSES[0].to_string(),
        ..CreateTrfDto::default()
    }
}

/// Test Report Form entry for a candidate's finished test.
#[component]
pub fn TrfForm() -> impl IntoView {
    let notify = use_notify();
    let form = RwSignal::new(blank_form());
    let candidates = RwSignal::new(Vec::<User>::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let flag = CancelFlag::new();
    let flag_for_cleanup = flag.clone();
    on_cleanup(move || flag_for_cleanup.cancel());
    spawn_local(async move {
        match fetch_all_users(Some(Role::Candidate), &flag).await {
            Ok(Some(mut users)) => {
                users.sort_by(|a, b| a.display_name().to_lowercase().cmp(&b.display_name().to_lowercase()));
                candidates.set(users);
            }
            Ok(None) => {}
            Err(e) => {
                notify.failed("load candidates", &e);
                set_error.set(Some(format!("Could not load candidates: {}", e)));
            }
        }
    });

    let select_candidate = move |id: String| {
        let name = candidates.with_untracked(|list| {
            list.iter()
                .find(|u| u.id == id)
                .map(|u| u.display_name().to_string())
                .unwrap_or_default()
        });
        form.update(|f| {
            f.candidate_id = id;
            f.candidate_name = name;
        });
    };

    let submit = move |_| {
        let dto = match form.get_untracked().finalized() {
            Ok(dto) => dto,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };
        set_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            match create_trf(&dto).await {
                Ok(trf) => {
                    notify.success(format!(
                        "TRF saved for {} (overall {})",
                        if trf.candidate_name.is_empty() { &dto.candidate_name } else { &trf.candidate_name },
                        band_label(dto.overall)
                    ));
                    form.set(blank_form());
                }
                Err(e) => {
                    notify.failed("save the TRF", &e);
                    set_error.set(Some(format!("Save failed: {}", e)));
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <PageFrame page_id="a005_trf--form" category=PAGE_CAT_FORM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Test Report Form"</h1>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <div class="form-grid">
                    <label class="form-field">
                        <span class="form-field__label">"Candidate"</span>
                        <select
                            class="form-field__select"
                            prop:value=move || form.with(|f| f.candidate_id.clone())
                            on:change=move |ev| select_candidate(event_target_value(&ev))
                        >
                            <option value="">"Select candidate..."</option>
                            {move || candidates.get().into_iter().map(|u| {
                                let label = if u.email.is_empty() {
                                    u.display_name().to_string()
                                } else {
                                    format!("{} ({})", u.display_name(), u.email)
                                };
                                view! { <option value=u.id.clone()>{label}</option> }
                            }).collect_view()}
                        </select>
                    </label>

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
                        <span class="form-field__label">"Test date"</span>
                        <DateInput
                            value=Signal::derive(move || form.with(|f| f.test_date.clone()))
                            on_change=move |v: String| form.update(|f| f.test_date = v)
                        />
                    </label>
                </div>

                <h2 class="section__title">"Band scores"</h2>
                <div class="form-grid">
                    {Skill::ALL.iter().map(|&skill| view! {
                        <label class="form-field">
                            <span class="form-field__label">{skill.label()}</span>
                            <select
                                class="form-field__select"
                                prop:value=move || band_label(form.with(|f| f.band(skill)))
                                on:change=move |ev| {
                                    let value = event_target_value(&ev).parse::<f64>().unwrap_or(0.0);
                                    form.update(|f| f.set_band(skill, value));
                                }
                            >
                                {band_options().into_iter().map(|b| {
                                    let label = band_label(b);
                                    view! { <option value=label.clone()>{label.clone()}</option> }
                                }).collect_view()}
                            </select>
                        </label>
                    }).collect_view()}
                    <div class="form-field">
                        <span class="form-field__label">"Overall"</span>
                        <span class="badge badge--primary">{move || band_label(form.with(|f| f.overall_band()))}</span>
                    </div>
                </div>

                <label class="form-field">
                    <span class="form-field__label">"Remarks"</span>
                    <textarea
                        class="form-field__input"
                        rows="3"
                        prop:value=move || form.with(|f| f.remarks.clone())
                        on:input=move |ev| form.update(|f| f.remarks = event_target_value(&ev))
                    ></textarea>
                </label>

                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=submit
                    disabled=Signal::derive(move || saving.get())
                >
                    {icon("file-text")}
                    {move || if saving.get() { " Saving..." } else { " Save TRF" }}
                </Button>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_labels_match_option_values() {
        assert_eq!(band_label(6.5), "6.5");
        assert_eq!(band_label(7.0), "7.0");
        assert_eq!("7.0".parse::<f64>().ok(), Some(7.0));
    }
}
