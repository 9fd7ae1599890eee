use contracts::domain::a001_user::User;
use contracts::shared::list_view::{ListQuery, SortOrder};
use contracts::system::auth::Role;
use leptos::prelude::*;

use crate::shared::list_state::{self, ListState};

/// Which slice of the users collection a list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsersVariant {
    /// Every account, with status actions
    AllUsers,
    /// Candidates with contact details
    Candidates,
    /// Candidates without contact details or actions
    CandidatesReadOnly,
}

impl UsersVariant {
    pub fn candidates_for(role: Option<Role>) -> Self {
        match role {
            Some(Role::Admin) | Some(Role::Bdm) => UsersVariant::Candidates,
            _ => UsersVariant::CandidatesReadOnly,
        }
    }

    pub fn role_filter(self) -> Option<Role> {
        match self {
            UsersVariant::AllUsers => None,
            UsersVariant::Candidates | UsersVariant::CandidatesReadOnly => Some(Role::Candidate),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            UsersVariant::AllUsers => "Users",
            _ => "Candidates",
        }
    }

    pub fn page_id(self) -> &'static str {
        match self {
            UsersVariant::AllUsers => "a001_user--list",
            _ => "a001_candidate--list",
        }
    }

    pub fn storage_key(self) -> &'static str {
        match self {
            UsersVariant::AllUsers => "a001_users_list_state_v1",
            UsersVariant::Candidates => "a001_candidates_list_state_v1",
            UsersVariant::CandidatesReadOnly => "a001_candidates_ro_list_state_v1",
        }
    }

    pub fn shows_contact(self) -> bool {
        !matches!(self, UsersVariant::CandidatesReadOnly)
    }

    pub fn can_change_status(self) -> bool {
        matches!(self, UsersVariant::AllUsers)
    }
}

/// Newest registrations first.
pub fn default_query() -> ListQuery {
    ListQuery {
        sort: Some(SortOrder::Descending),
        ..ListQuery::default()
    }
}

pub fn create_state(variant: UsersVariant) -> RwSignal<ListState<User>> {
    list_state::create_state(variant.storage_key(), default_query())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_per_role() {
        assert_eq!(UsersVariant::candidates_for(Some(Role::Bdm)), UsersVariant::Candidates);
        assert_eq!(UsersVariant::candidates_for(Some(Role::Teacher)), UsersVariant::CandidatesReadOnly);
        assert_eq!(UsersVariant::AllUsers.role_filter(), None);
        assert_eq!(UsersVariant::Candidates.role_filter(), Some(Role::Candidate));
        assert!(!UsersVariant::CandidatesReadOnly.shows_contact());
    }
}
