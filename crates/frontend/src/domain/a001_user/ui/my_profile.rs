use contracts::domain::a001_user::{ProfileChangeRequest, User};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_user::api::{fetch_user, request_profile_change};
use crate::shared::components::stat_card::StatCard;
use crate::shared::notify::use_notify;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::system::auth::context::use_auth;

/// Signed-in candidate's own profile.
#[component]
pub fn MyProfile() -> impl IntoView {
    let notify = use_notify();
    let (auth_state, _) = use_auth();
    let user = RwSignal::new(None::<User>);
    let (error, set_error) = signal::<Option<String>>(None);

    let name = RwSignal::new(String::new());
    let contact = RwSignal::new(String::new());
    let passport = RwSignal::new(String::new());
    let reason = RwSignal::new(String::new());
    let (submitting, set_submitting) = signal(false);

    let load = move || {
        let Some(id) = auth_state.with_untracked(|s| s.user_id()) else {
            set_error.set(Some("Session has no user id".to_string()));
            return;
        };
        spawn_local(async move {
            match fetch_user(&id).await {
                Ok(u) => {
                    name.set(u.name.clone());
                    contact.set(u.contact_no.clone());
                    passport.set(u.passport_number.clone());
                    user.set(Some(u));
                }
                Err(e) => {
                    notify.failed("load your profile", &e);
                    set_error.set(Some(format!("Failed to load profile: {}", e)));
                }
            }
        });
    };
    load();

    let submit = move |_| {
        let Some(current) = user.get_untracked() else { return };
        let request = ProfileChangeRequest::diff(
            &current,
            &name.get_untracked(),
            &contact.get_untracked(),
            &passport.get_untracked(),
            &reason.get_untracked(),
        );
        if request.is_empty() {
            notify.info("Nothing to change");
            return;
        }
        if request.reason.is_empty() {
            notify.error("Please give a reason for the change");
            return;
        }
        set_submitting.set(true);
        spawn_local(async move {
            match request_profile_change(&current.id, &request).await {
                Ok(message) => {
                    notify.success(if message.is_empty() { "Request sent".to_string() } else { message });
                    reason.set(String::new());
                    load();
                }
                Err(e) => notify.error(format!("Request failed: {}", e)),
            }
            set_submitting.set(false);
        });
    };

    let counter = move |f: fn(&User) -> u32| {
        Signal::derive(move || user.with(|u| u.as_ref().map(|u| f(u) as usize)))
    };

    view! {
        <PageFrame page_id="a001_my_profile--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"My profile"</h1>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <div class="stat-grid">
                    <StatCard label="Mocks purchased".to_string() icon_name="book-open".to_string() value=counter(|u| u.total_mock) />
                    <StatCard label="Mocks used".to_string() icon_name="check".to_string() value=counter(User::mocks_used) />
                    <StatCard label="Mocks left".to_string() icon_name="calendar".to_string() value=counter(|u| u.mock) />
                </div>

                {move || user.get().map(|u| view! {
                    <div class="card">
                        <div class="card__body detail-grid">
                            <div class="detail-field">
                                <span class="detail-field__label">"Email"</span>
                                <span class="detail-field__value">{u.email.clone()}</span>
                            </div>
                            <div class="detail-field">
                                <span class="detail-field__label">"Test type"</span>
                                <span class="detail-field__value">{u.test_type.clone()}</span>
                            </div>
                            <div class="detail-field">
                                <span class="detail-field__label">"Status"</span>
                                <span class="detail-field__value">{u.status.label()}</span>
                            </div>
                        </div>
                    </div>
                })}

                <h2 class="section__title">"Request a profile change"</h2>
                <Show
                    when=move || !user.with(|u| u.as_ref().is_some_and(User::has_pending_profile_change))
                    fallback=|| view! {
                        <div class="alert alert--info">"A change request is waiting for staff approval."</div>
                    }
                >
                    <Flex vertical=true gap=FlexGap::Small style="max-width: 420px;">
                        <Label>"Name"</Label>
                        <Input value=name />
                        <Label>"Contact number"</Label>
                        <Input value=contact />
                        <Label>"Passport number"</Label>
                        <Input value=passport />
                        <Label>"Reason"</Label>
                        <Textarea value=reason />
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=submit
                            disabled=Signal::derive(move || submitting.get())
                        >
                            {move || if submitting.get() { "Sending..." } else { "Send request" }}
                        </Button>
                    </Flex>
                </Show>
            </div>
        </PageFrame>
    }
}
