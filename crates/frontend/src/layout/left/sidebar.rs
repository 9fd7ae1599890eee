//! Sidebar with collapsible menu groups, filtered by the signed-in role

use contracts::system::auth::{Role, Section};
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::registry::tab_key_for_section;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

#[derive(Clone, Debug, PartialEq)]
struct MenuItem {
    key: &'static str,
    icon: &'static str,
    section: Section,
}

impl MenuItem {
    fn new(key: &'static str, icon: &'static str, section: Section) -> Self {
        Self { key, icon, section }
    }

    fn for_section(section: Section, icon: &'static str) -> Self {
        Self::new(tab_key_for_section(section), icon, section)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<MenuItem>,
}

fn menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "dashboards",
            label: "Dashboard",
            icon: "dashboard",
            items: vec![MenuItem::for_section(Section::Overview, "dashboard")],
        },
        MenuGroup {
            id: "people",
            label: "People",
            icon: "users",
            items: vec![
                MenuItem::for_section(Section::Users, "users"),
                MenuItem::for_section(Section::Candidates, "user"),
                MenuItem::for_section(Section::ProfileRequests, "user-check"),
            ],
        },
        MenuGroup {
            id: "scheduling",
            label: "Scheduling",
            icon: "calendar",
            items: vec![
                MenuItem::for_section(Section::Schedules, "calendar"),
                MenuItem::for_section(Section::CreateSchedule, "calendar-plus"),
                MenuItem::for_section(Section::Bookings, "book-open"),
            ],
        },
        MenuGroup {
            id: "accounts",
            label: "Accounts",
            icon: "receipt",
            items: vec![
                MenuItem::for_section(Section::CashMemo, "receipt"),
                MenuItem::new("a004_cash_memo_lookup", "search", Section::CashMemo),
            ],
        },
        MenuGroup {
            id: "results",
            label: "Results",
            icon: "file-text",
            items: vec![MenuItem::for_section(Section::Trf, "file-text")],
        },
        MenuGroup {
            id: "my_account",
            label: "My account",
            icon: "user",
            items: vec![
                MenuItem::for_section(Section::MyProfile, "user"),
                MenuItem::for_section(Section::MyBookings, "book-open"),
            ],
        },
    ]
}

/// Groups and items the role may open; empty groups are dropped.
fn visible_menu(role: Role) -> Vec<MenuGroup> {
    menu_groups()
        .into_iter()
        .filter_map(|mut group| {
            group.items.retain(|item| role.can_access(item.section));
            (!group.items.is_empty()).then_some(group)
        })
        .collect()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let (auth_state, _) = use_auth();

    let collapsed_groups = RwSignal::new(Vec::<&'static str>::new());

    let groups = move || match auth_state.with(|s| s.role()) {
        Some(role) => visible_menu(role),
        None => Vec::new(),
    };

    view! {
        <div class="app-sidebar__content">
            {move || groups().into_iter().map(|group| {
                let group_id = group.id;
                let is_expanded = move || !collapsed_groups.with(|c| c.contains(&group_id));
                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            on:click=move |_| collapsed_groups.update(|c| {
                                if let Some(pos) = c.iter().position(|g| *g == group_id) {
                                    c.remove(pos);
                                } else {
                                    c.push(group_id);
                                }
                            })
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=is_expanded
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>
                        <Show when=is_expanded>
                            <div class="app-sidebar__children">
                                {group.items.clone().into_iter().map(|item| {
                                    let key = item.key;
                                    let label = tab_label_for_key(key);
                                    view! {
                                        <div
                                            class="app-sidebar__item app-sidebar__item--child"
                                            class:app-sidebar__item--active=move || {
                                                ctx.active.with(|a| a.as_deref() == Some(key))
                                            }
                                            on:click=move |_| ctx.open_tab(key, label)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(item.icon)}
                                                <span>{label}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(role: Role) -> Vec<&'static str> {
        visible_menu(role)
            .into_iter()
            .flat_map(|g| g.items.into_iter().map(|i| i.key))
            .collect()
    }

    #[test]
    fn candidate_sees_only_own_pages_and_schedules() {
        assert_eq!(keys(Role::Candidate), vec!["a002_schedules", "a001_my_profile", "a003_my_bookings"]);
    }

    #[test]
    fn teacher_has_no_accounts_group() {
        let groups: Vec<_> = visible_menu(Role::Teacher).into_iter().map(|g| g.id).collect();
        assert_eq!(groups, vec!["people", "scheduling", "results"]);
    }

    #[test]
    fn admin_sees_every_staff_page() {
        let admin = keys(Role::Admin);
        for key in ["d100_overview", "a001_users", "a002_schedule_create", "a004_cash_memo_lookup", "a005_trf"] {
            assert!(admin.contains(&key), "{key}");
        }
        assert!(!admin.contains(&"a001_my_profile"));
    }
}
