pub mod state;

pub use self::state::UsersVariant;

use contracts::domain::a001_user::{User, UserStatus};
use contracts::shared::list_view::distinct_values;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_user::api::{fetch_all_users, update_status};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::layout::tabs::registry::candidate_detail_key;
use crate::shared::cancel::CancelFlag;
use crate::shared::components::filter_panel::{FilterPanel, FilterSelect};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_state::{update_filter, update_query};
use crate::shared::list_utils::{highlight_matches, next_sort, sort_indicator, SearchInput};
use crate::shared::notify::use_notify;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::shared::list_view::ListRecord;

fn status_badge_class(status: &UserStatus) -> &'static str {
    match status {
        UserStatus::Active => "badge badge--success",
        UserStatus::Blocked => "badge badge--error",
        UserStatus::Completed => "badge badge--primary",
        UserStatus::Pending => "badge badge--warning",
        UserStatus::Unknown(_) => "badge badge--neutral",
    }
}

#[component]
pub fn UsersList(variant: UsersVariant) -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();
    let notify = use_notify();
    let key = variant.storage_key();
    let state = state::create_state(variant);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let is_filter_expanded = RwSignal::new(false);

    let cancel = StoredValue::new(CancelFlag::new());
    on_cleanup(move || cancel.with_value(|flag| flag.cancel()));

    let load_items = move || {
        // A refresh supersedes the load still in flight
        cancel.with_value(|flag| flag.cancel());
        let flag = CancelFlag::new();
        cancel.set_value(flag.clone());

        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match fetch_all_users(variant.role_filter(), &flag).await {
                Ok(Some(users)) => {
                    log!("Loaded {} users for {}", users.len(), variant.page_id());
                    state.update(|s| {
                        s.items = users;
                        s.is_loaded = true;
                    });
                    set_loading.set(false);
                }
                Ok(None) => {}
                Err(e) => {
                    notify.failed("load users", &e);
                    set_error.set(Some(e.to_string()));
                    set_loading.set(false);
                }
            }
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_items();
        }
    });

    let page_view = Memo::new(move |_| state.with(|s| s.view()));
    let search = Signal::derive(move || state.with(|s| s.query.search.clone()));
    let active_filters_count = Signal::derive(move || state.with(|s| s.query.active_filters_count()));

    let status_options = Signal::derive(|| {
        UserStatus::SELECTABLE
            .iter()
            .map(|s| s.as_str().to_string())
            .collect::<Vec<_>>()
    });
    let test_type_options = Signal::derive(move || state.with(|s| distinct_values(&s.items, "testType")));
    let role_options = Signal::derive(move || state.with(|s| distinct_values(&s.items, "role")));

    let set_exact = move |field: &'static str| {
        Callback::new(move |value: String| update_filter(key, state, |q| q.set_exact(field, &value)))
    };
    let exact_value = move |field: &'static str| Signal::derive(move || state.with(|s| s.query.exact_value(field)));

    let open_detail = move |user: &User| {
        tabs_store.open_tab(
            &candidate_detail_key(&user.id),
            &detail_tab_label("Candidate", user.display_name()),
        );
    };

    let change_status = move |id: String, value: String| {
        let status = UserStatus::from(value);
        spawn_local(async move {
            match update_status(&id, status).await {
                Ok(updated) => {
                    notify.success(format!("{} is now {}", updated.display_name(), updated.status.label()));
                    state.update(|s| {
                        if let Some(row) = s.items.iter_mut().find(|u| u.id == updated.id) {
                            *row = updated;
                        }
                    });
                }
                Err(e) => notify.error(format!("Status change failed: {}", e)),
            }
        });
    };

    view! {
        <PageFrame page_id=variant.page_id() category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{variant.title()}</h1>
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
                            <div style="flex: 1; max-width: 320px;">
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Search:"</Label>
                                    <SearchInput
                                        value=search
                                        on_change=Callback::new(move |text: String| update_filter(key, state, |q| q.search = text))
                                        placeholder="Name, email, phone, passport..."
                                    />
                                </Flex>
                            </div>
                            <FilterSelect label="Status" options=status_options value=exact_value("status") on_change=set_exact("status") />
                            <FilterSelect label="Test type" options=test_type_options value=exact_value("testType") on_change=set_exact("testType") />
                            <Show when=move || variant == UsersVariant::AllUsers>
                                <FilterSelect label="Role" options=role_options value=exact_value("role") on_change=set_exact("role") />
                            </Show>
                        </Flex>
                    }
                />

                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <Show when=move || loading.get() && !state.with(|s| s.is_loaded)>
                    <div class="page__loading"><Spinner /></div>
                </Show>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=180.0>"Name"</TableHeaderCell>
                                <TableHeaderCell min_width=200.0>"Email"</TableHeaderCell>
                                <Show when=move || variant.shows_contact()>
                                    <TableHeaderCell min_width=130.0>"Contact"</TableHeaderCell>
                                    <TableHeaderCell min_width=130.0>"Passport"</TableHeaderCell>
                                    <TableHeaderCell min_width=130.0>"Transaction"</TableHeaderCell>
                                </Show>
                                <TableHeaderCell min_width=90.0>"Test"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Mocks"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Status"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>
                                    <div
                                        class="table__sortable-header"
                                        style="cursor: pointer;"
                                        on:click=move |_| update_query(key, state, |q| q.sort = next_sort(q.sort))
                                    >
                                        "Registered"
                                        <span>{move || sort_indicator(state.with(|s| s.query.sort))}</span>
                                    </div>
                                </TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || page_view.with(|p| p.items.clone())
                                key=|user| format!("{}:{}", user.id, user.status.as_str())
                                children=move |user| {
                                    let filter = search.get_untracked();
                                    let name_view = highlight_matches(user.display_name(), &filter);
                                    let email_view = highlight_matches(&user.email, &filter);
                                    let registered = user
                                        .list_date()
                                        .map(|d| format_date(&d.to_string()))
                                        .unwrap_or_else(|| "-".to_string());
                                    let mocks = format!("{}/{}", user.mocks_used(), user.total_mock);
                                    let badge = status_badge_class(&user.status);
                                    let status_label = user.status.label();
                                    let current_status = user.status.as_str().to_string();
                                    let id_for_status = user.id.clone();
                                    let contact = (
                                        user.contact_no.clone(),
                                        user.passport_number.clone(),
                                        user.transaction_id.clone(),
                                    );
                                    let row_user = user.clone();

                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_detail(&row_user);
                                                        }
                                                    >
                                                        {name_view}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout truncate=true>{email_view}</TableCellLayout></TableCell>
                                            {variant.shows_contact().then(|| view! {
                                                <TableCell><TableCellLayout>{contact.0}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{contact.1}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout truncate=true>{contact.2}</TableCellLayout></TableCell>
                                            })}
                                            <TableCell><TableCellLayout>{user.test_type.clone()}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{mocks}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if variant.can_change_status() {
                                                        view! {
                                                            <select
                                                                class="filter-field__select"
                                                                on:change=move |ev| change_status(id_for_status.clone(), event_target_value(&ev))
                                                            >
                                                                {UserStatus::SELECTABLE.iter().map(|s| {
                                                                    let selected = s.as_str() == current_status;
                                                                    view! { <option value=s.as_str().to_string() selected=selected>{s.label()}</option> }
                                                                }).collect_view()}
                                                            </select>
                                                        }.into_any()
                                                    } else {
                                                        view! { <span class=badge>{status_label}</span> }.into_any()
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout>{registered}</TableCellLayout></TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>

                    <Show when=move || state.with(|s| s.is_loaded) && page_view.with(|p| p.items.is_empty())>
                        <div class="table__empty">"No records match the current filters."</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}
