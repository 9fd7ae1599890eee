use contracts::domain::a001_user::{remove_by_id, User};
use contracts::system::auth::Role;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_user::api::{approve_profile_change, fetch_all_users};
use crate::shared::cancel::CancelFlag;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::notify::use_notify;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

/// Candidates waiting for a decision on a profile edit.
#[component]
pub fn ProfileRequests() -> impl IntoView {
    let notify = use_notify();
    let (items, set_items) = signal::<Vec<User>>(Vec::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    // Ids with a decision in flight; their buttons are disabled
    let pending_ids = RwSignal::new(Vec::<String>::new());

    let flag = CancelFlag::new();
    let flag_for_cleanup = flag.clone();
    on_cleanup(move || flag_for_cleanup.cancel());

    set_loading.set(true);
    spawn_local(async move {
        match fetch_all_users(Some(Role::Candidate), &flag).await {
            Ok(Some(users)) => {
                let waiting: Vec<User> = users
                    .into_iter()
                    .filter(User::has_pending_profile_change)
                    .collect();
                log!("{} pending profile change requests", waiting.len());
                set_items.set(waiting);
                set_loading.set(false);
            }
            Ok(None) => {}
            Err(e) => {
                notify.failed("load profile requests", &e);
                set_error.set(Some(e.to_string()));
                set_loading.set(false);
            }
        }
    });

    let decide = move |id: String, name: String, approved: bool| {
        pending_ids.update(|ids| ids.push(id.clone()));
        spawn_local(async move {
            match approve_profile_change(&id, approved).await {
                Ok(message) => {
                    set_items.update(|users| {
                        remove_by_id(users, &id);
                    });
                    let fallback = if approved { "approved" } else { "rejected" };
                    if message.is_empty() {
                        notify.success(format!("Request from {} {}", name, fallback));
                    } else {
                        notify.success(message);
                    }
                }
                Err(e) => notify.error(format!("Could not update the request: {}", e)),
            }
            pending_ids.update(|ids| ids.retain(|x| x != &id));
        });
    };

    view! {
        <PageFrame page_id="a001_profile_request--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Profile change requests"</h1>
                    <span class="badge badge--primary">{move || items.with(Vec::len)}</span>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <Show when=move || loading.get()>
                    <div class="page__loading"><Spinner /></div>
                </Show>

                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Name"</TableHeaderCell>
                            <TableHeaderCell>"Email"</TableHeaderCell>
                            <TableHeaderCell>"Contact"</TableHeaderCell>
                            <TableHeaderCell>"Passport"</TableHeaderCell>
                            <TableHeaderCell>"Registered"</TableHeaderCell>
                            <TableHeaderCell>"Decision"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || items.get()
                            key=|u| u.id.clone()
                            children=move |user| {
                                let id = user.id.clone();
                                let busy = {
                                    let id = id.clone();
                                    Signal::derive(move || pending_ids.with(|ids| ids.contains(&id)))
                                };
                                let (approve_id, approve_name) = (id.clone(), user.display_name().to_string());
                                let (reject_id, reject_name) = (id, user.display_name().to_string());
                                let registered = user.created_at.as_deref().map(format_date).unwrap_or_default();
                                let display_name = user.display_name().to_string();
                                let email = user.email.clone();
                                let contact_no = user.contact_no.clone();
                                let passport_number = user.passport_number.clone();
                                view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout truncate=true>{display_name}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout truncate=true>{email}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{contact_no}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{passport_number}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{registered}</TableCellLayout></TableCell>
                                        <TableCell>
                                            <Flex gap=FlexGap::Small>
                                                <Button
                                                    appearance=ButtonAppearance::Primary
                                                    disabled=busy
                                                    on_click=move |_| decide(approve_id.clone(), approve_name.clone(), true)
                                                >
                                                    {icon("check")}
                                                    " Approve"
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Secondary
                                                    disabled=busy
                                                    on_click=move |_| decide(reject_id.clone(), reject_name.clone(), false)
                                                >
                                                    {icon("x")}
                                                    " Reject"
                                                </Button>
                                            </Flex>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>

                <Show when=move || !loading.get() && items.with(Vec::is_empty)>
                    <div class="table__empty">"No pending requests."</div>
                </Show>
            </div>
        </PageFrame>
    }
}
