//! Tab content registry: the single mapping from tab key to page.
//!
//! Keys follow the `{entity}_{page}` scheme of the sidebar. Detail tabs carry
//! the record id after a fixed prefix, e.g. `a001_candidate_detail_{id}`.

use contracts::system::auth::{Role, Section};
use leptos::logging::log;
use leptos::prelude::*;

use crate::dashboards::d100_overview::OverviewDashboard;
use crate::domain::a001_user::ui::details::CandidateDetails;
use crate::domain::a001_user::ui::list::{UsersList, UsersVariant};
use crate::domain::a001_user::ui::my_profile::MyProfile;
use crate::domain::a001_user::ui::profile_requests::ProfileRequests;
use crate::domain::a002_schedule::ui::create::CreateSchedule;
use crate::domain::a002_schedule::ui::list::ScheduleList;
use crate::domain::a003_booking::ui::list::BookingList;
use crate::domain::a004_cash_memo::ui::form::CashMemoForm;
use crate::domain::a004_cash_memo::ui::lookup::CashMemoLookup;
use crate::domain::a005_trf::ui::form::TrfForm;
use crate::layout::global_context::AppGlobalContext;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::RequireRole;

pub const CANDIDATE_DETAIL_PREFIX: &str = "a001_candidate_detail_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabRoute {
    Overview,
    Users,
    Candidates,
    ProfileRequests,
    /// Candidate id; empty when the key carries none
    CandidateDetail(String),
    MyProfile,
    Schedules,
    CreateSchedule,
    Bookings,
    MyBookings,
    CashMemo,
    CashMemoLookup,
    Trf,
    Unknown(String),
}

impl TabRoute {
    pub fn parse(key: &str) -> Self {
        match key {
            "d100_overview" => TabRoute::Overview,
            "a001_users" => TabRoute::Users,
            "a001_candidates" => TabRoute::Candidates,
            "a001_profile_requests" => TabRoute::ProfileRequests,
            "a001_my_profile" => TabRoute::MyProfile,
            "a002_schedules" => TabRoute::Schedules,
            "a002_schedule_create" => TabRoute::CreateSchedule,
            "a003_bookings" => TabRoute::Bookings,
            "a003_my_bookings" => TabRoute::MyBookings,
            "a004_cash_memo" => TabRoute::CashMemo,
            "a004_cash_memo_lookup" => TabRoute::CashMemoLookup,
            "a005_trf" => TabRoute::Trf,
            // The bare prefix without "_" also counts as a detail tab missing its id
            k if k.starts_with(CANDIDATE_DETAIL_PREFIX) || k == "a001_candidate_detail" => {
                let id = k.strip_prefix(CANDIDATE_DETAIL_PREFIX).unwrap_or("");
                TabRoute::CandidateDetail(id.trim().to_string())
            }
            other => TabRoute::Unknown(other.to_string()),
        }
    }

    /// Role section guarding the page; `None` for unknown keys.
    pub fn section(&self) -> Option<Section> {
        Some(match self {
            TabRoute::Overview => Section::Overview,
            TabRoute::Users => Section::Users,
            TabRoute::Candidates | TabRoute::CandidateDetail(_) => Section::Candidates,
            TabRoute::ProfileRequests => Section::ProfileRequests,
            TabRoute::MyProfile => Section::MyProfile,
            TabRoute::Schedules => Section::Schedules,
            TabRoute::CreateSchedule => Section::CreateSchedule,
            TabRoute::Bookings => Section::Bookings,
            TabRoute::MyBookings => Section::MyBookings,
            TabRoute::CashMemo | TabRoute::CashMemoLookup => Section::CashMemo,
            TabRoute::Trf => Section::Trf,
            TabRoute::Unknown(_) => return None,
        })
    }
}

/// Tab key of the main page of a section.
pub fn tab_key_for_section(section: Section) -> &'static str {
    match section {
        Section::Overview => "d100_overview",
        Section::Users => "a001_users",
        Section::Candidates => "a001_candidates",
        Section::ProfileRequests => "a001_profile_requests",
        Section::Schedules | Section::DeleteSchedule => "a002_schedules",
        Section::CreateSchedule => "a002_schedule_create",
        Section::Bookings => "a003_bookings",
        Section::CashMemo => "a004_cash_memo",
        Section::Trf => "a005_trf",
        Section::MyProfile => "a001_my_profile",
        Section::MyBookings => "a003_my_bookings",
    }
}

/// Tab opened right after login.
pub fn home_tab_key(role: Role) -> &'static str {
    tab_key_for_section(role.home_section())
}

pub fn candidate_detail_key(id: &str) -> String {
    format!("{}{}", CANDIDATE_DETAIL_PREFIX, id)
}

fn missing_parameter(what: &'static str) -> AnyView {
    view! {
        <div class="page">
            <div class="alert alert--error">{format!("Missing {} in the tab address.", what)}</div>
        </div>
    }
    .into_any()
}

/// Renders the tab content for `key`, behind the role guard of its section.
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let route = TabRoute::parse(key);
    let Some(section) = route.section() else {
        log!("Unknown tab type: {}", key);
        return view! { <div class="placeholder">"Page not found"</div> }.into_any();
    };

    let key_for_close = key.to_string();
    let page = move || -> AnyView {
        match route.clone() {
            TabRoute::Overview => view! { <OverviewDashboard /> }.into_any(),
            TabRoute::Users => view! { <UsersList variant=UsersVariant::AllUsers /> }.into_any(),
            TabRoute::Candidates => {
                let (auth_state, _) = use_auth();
                let variant = UsersVariant::candidates_for(auth_state.with_untracked(|s| s.role()));
                view! { <UsersList variant=variant /> }.into_any()
            }
            TabRoute::ProfileRequests => view! { <ProfileRequests /> }.into_any(),
            TabRoute::CandidateDetail(id) if id.is_empty() => missing_parameter("candidate id"),
            TabRoute::CandidateDetail(id) => {
                let tab_key = key_for_close.clone();
                let key_for_close = key_for_close.clone();
                let on_close = Callback::new(move |_| tabs_store.close_tab(&key_for_close));
                view! {
                    <CandidateDetails id=id tab_key=tab_key on_close=on_close />
                }
                .into_any()
            }
            TabRoute::MyProfile => view! { <MyProfile /> }.into_any(),
            TabRoute::Schedules => view! { <ScheduleList /> }.into_any(),
            TabRoute::CreateSchedule => {
                let key_for_close = key_for_close.clone();
                view! {
                    <CreateSchedule on_created=Callback::new(move |_| {
                        tabs_store.close_tab(&key_for_close);
                        tabs_store.open_tab("a002_schedules", "Schedules");
                    }) />
                }
                .into_any()
            }
            TabRoute::Bookings => view! { <BookingList mine=false /> }.into_any(),
            TabRoute::MyBookings => view! { <BookingList mine=true /> }.into_any(),
            TabRoute::CashMemo => view! { <CashMemoForm /> }.into_any(),
            TabRoute::CashMemoLookup => view! { <CashMemoLookup /> }.into_any(),
            TabRoute::Trf => view! { <TrfForm /> }.into_any(),
            TabRoute::Unknown(_) => view! { <div class="placeholder">"Page not found"</div> }.into_any(),
        }
    };

    view! { <RequireRole section=section>{page()}</RequireRole> }.into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_and_detail_keys() {
        assert_eq!(TabRoute::parse("a002_schedules"), TabRoute::Schedules);
        assert_eq!(
            TabRoute::parse("a001_candidate_detail_65a1"),
            TabRoute::CandidateDetail("65a1".into())
        );
        assert_eq!(TabRoute::parse("a001_candidate_detail_"), TabRoute::CandidateDetail(String::new()));
        assert_eq!(TabRoute::parse("a001_candidate_detail"), TabRoute::CandidateDetail(String::new()));
        assert_eq!(TabRoute::parse("x"), TabRoute::Unknown("x".into()));
    }

    #[test]
    fn detail_keys_use_the_candidates_section() {
        assert_eq!(TabRoute::parse(&candidate_detail_key("u1")).section(), Some(Section::Candidates));
        assert_eq!(TabRoute::parse("a004_cash_memo_lookup").section(), Some(Section::CashMemo));
        assert_eq!(TabRoute::parse("zzz").section(), None);
    }

    #[test]
    fn every_section_key_round_trips() {
        for role in [Role::Admin, Role::Bdm, Role::Teacher, Role::Candidate] {
            for &section in role.sections() {
                let key = tab_key_for_section(section);
                let parsed = TabRoute::parse(key).section();
                // Delete permission lives on the schedules page itself
                let expected = if section == Section::DeleteSchedule { Section::Schedules } else { section };
                assert_eq!(parsed, Some(expected), "{key}");
            }
            assert!(role.can_access(TabRoute::parse(home_tab_key(role)).section().unwrap()));
        }
    }
}
