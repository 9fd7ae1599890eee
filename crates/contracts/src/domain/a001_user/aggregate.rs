use crate::shared::business_time::{business_tz, object_id_instant, parse_loose_date};
use crate::shared::date_bucket::CreationInstant;
use crate::shared::api::{null_as_default, Pagination};
use crate::shared::list_view::ListRecord;
use crate::system::auth::Role;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Status enums
// ============================================================================

/// Account status. Values the portal does not know are kept verbatim so a
/// PUT never rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserStatus {
    #[default]
    Active,
    Blocked,
    Completed,
    Pending,
    Unknown(String),
}

impl UserStatus {
    pub const SELECTABLE: [UserStatus; 4] = [
        UserStatus::Active,
        UserStatus::Blocked,
        UserStatus::Completed,
        UserStatus::Pending,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Blocked => "blocked",
            UserStatus::Completed => "completed",
            UserStatus::Pending => "pending",
            UserStatus::Unknown(s) => s.as_str(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            UserStatus::Active => "Active".to_string(),
            UserStatus::Blocked => "Blocked".to_string(),
            UserStatus::Completed => "Completed".to_string(),
            UserStatus::Pending => "Pending".to_string(),
            UserStatus::Unknown(s) => s.clone(),
        }
    }
}

impl From<String> for UserStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => UserStatus::Active,
            "blocked" => UserStatus::Blocked,
            "completed" => UserStatus::Completed,
            "pending" => UserStatus::Pending,
            _ => UserStatus::Unknown(value),
        }
    }
}

impl From<UserStatus> for String {
    fn from(value: UserStatus) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProfileChangeStatus {
    #[default]
    None,
    Pending,
    Approved,
    Rejected,
}

impl ProfileChangeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileChangeStatus::None => "none",
            ProfileChangeStatus::Pending => "pending",
            ProfileChangeStatus::Approved => "approved",
            ProfileChangeStatus::Rejected => "rejected",
        }
    }
}

impl From<String> for ProfileChangeStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" | "requested" => ProfileChangeStatus::Pending,
            "approved" => ProfileChangeStatus::Approved,
            "rejected" => ProfileChangeStatus::Rejected,
            _ => ProfileChangeStatus::None,
        }
    }
}

impl From<ProfileChangeStatus> for String {
    fn from(value: ProfileChangeStatus) -> Self {
        value.as_str().to_string()
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Portal account; candidates and staff share the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, alias = "contactNumber", alias = "phone", deserialize_with = "null_as_default")]
    pub contact_no: String,
    #[serde(default)]
    pub passport_number: String,
    #[serde(default)]
    pub transaction_id: String,
    /// Mock tests purchased.
    #[serde(default)]
    pub total_mock: u32,
    /// Mock tests remaining.
    #[serde(default)]
    pub mock: u32,
    #[serde(default)]
    pub mock_type: String,
    #[serde(default)]
    pub test_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: UserStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_change_request_status: ProfileChangeStatus,
    #[serde(default, deserialize_with = "lenient_role", skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

fn lenient_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Role::from_wire))
}

impl User {
    pub fn mocks_used(&self) -> u32 {
        self.total_mock.saturating_sub(self.mock)
    }

    pub fn has_pending_profile_change(&self) -> bool {
        self.profile_change_request_status == ProfileChangeStatus::Pending
    }

    pub fn is_candidate(&self) -> bool {
        matches!(self.role, None | Some(Role::Candidate))
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

impl ListRecord for User {
    fn field(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            "mockType" => Some(self.mock_type.clone()),
            "testType" => Some(self.test_type.clone()),
            "role" => self.role.map(|r| r.as_str().to_string()),
            "profileChangeRequestStatus" => {
                Some(self.profile_change_request_status.as_str().to_string())
            }
            _ => None,
        }
    }

    fn list_date(&self) -> Option<NaiveDate> {
        self.created_at
            .as_deref()
            .and_then(parse_loose_date)
            .or_else(|| {
                object_id_instant(&self.id).map(|i| i.with_timezone(&business_tz()).date_naive())
            })
    }

    fn search_text(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.contact_no.clone(),
            self.passport_number.clone(),
            self.transaction_id.clone(),
        ]
    }
}

impl CreationInstant for User {
    fn created_at_raw(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    fn object_id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// Removes a user from a locally held list after the server confirmed a
/// change that takes it out of the current view.
pub fn remove_by_id(users: &mut Vec<User>, id: &str) -> Option<User> {
    let pos = users.iter().position(|u| u.id == id)?;
    Some(users.remove(pos))
}

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatusDto {
    pub status: UserStatus,
}

/// Candidate's request to correct identity fields; staff approve it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileChangeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,
    pub reason: String,
}

impl ProfileChangeRequest {
    /// Builds a request holding only the fields that differ from `current`.
    pub fn diff(
        current: &User,
        name: &str,
        contact_no: &str,
        passport_number: &str,
        reason: &str,
    ) -> Self {
        let changed = |new: &str, old: &str| {
            let new = new.trim();
            (!new.is_empty() && new != old.trim()).then(|| new.to_string())
        };
        Self {
            name: changed(name, &current.name),
            contact_no: changed(contact_no, &current.contact_no),
            passport_number: changed(passport_number, &current.passport_number),
            reason: reason.trim().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.contact_no.is_none() && self.passport_number.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveProfileChangeDto {
    pub approved: bool,
}

/// Query string of the paginated users endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListUsersQuery {
    pub page: usize,
    pub limit: usize,
    pub role: Option<Role>,
}

impl ListUsersQuery {
    pub const PAGE_LIMIT: usize = 100;

    pub fn first(role: Option<Role>) -> Self {
        Self {
            page: 1,
            limit: Self::PAGE_LIMIT,
            role,
        }
    }

    pub fn next(self) -> Self {
        Self {
            page: self.page + 1,
            ..self
        }
    }

    /// Whether another page should be requested after receiving `received`
    /// rows for this one. Without a pagination block a short page ends the walk.
    pub fn has_more(&self, pagination: Option<&Pagination>, received: usize) -> bool {
        match pagination {
            Some(p) if p.total_pages > 0 => self.page < p.total_pages,
            _ => received >= self.limit,
        }
    }

    pub fn to_query_string(&self) -> String {
        let mut q = format!("page={}&limit={}", self.page, self.limit);
        if let Some(role) = self.role {
            q.push_str("&role=");
            q.push_str(role.as_str());
        }
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "_id": "65000000aaaaaaaaaaaaaaaa",
        "name": "Rahim Uddin",
        "email": "rahim@example.com",
        "contactNo": "01700000000",
        "passportNumber": "A1234567",
        "transactionId": "TX-9",
        "totalMock": 4,
        "mock": 1,
        "mockType": "Full",
        "testType": "Computer-Based",
        "status": "active",
        "profileChangeRequestStatus": "pending",
        "role": "user",
        "createdAt": "2025-01-05T10:00:00.000Z"
    }"#;

    fn sample() -> User {
        serde_json::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn deserializes_api_shape() {
        let user = sample();
        assert_eq!(user.id, "65000000aaaaaaaaaaaaaaaa");
        assert_eq!(user.mocks_used(), 3);
        assert!(user.has_pending_profile_change());
        assert!(user.is_candidate());
        assert_eq!(user.list_date(), NaiveDate::from_ymd_opt(2025, 1, 5));
    }

    #[test]
    fn tolerates_sparse_and_unknown_values() {
        let user: User =
            serde_json::from_str(r#"{"_id": "x", "status": "On Hold", "role": "intern"}"#).unwrap();
        assert_eq!(user.status, UserStatus::Unknown("On Hold".into()));
        assert_eq!(user.status.as_str(), "On Hold");
        assert_eq!(user.role, None);
        assert_eq!(user.profile_change_request_status, ProfileChangeStatus::None);
        assert_eq!(user.list_date(), None);
        assert_eq!(user.display_name(), "");
    }

    #[test]
    fn null_fields_read_as_empty() {
        let user: User = serde_json::from_str(
            r#"{"_id": "x", "name": null, "email": null, "status": null, "profileChangeRequestStatus": null}"#,
        )
        .unwrap();
        assert_eq!(user.name, "");
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.profile_change_request_status, ProfileChangeStatus::None);
    }

    #[test]
    fn list_date_falls_back_to_identifier() {
        let mut user = sample();
        user.created_at = None;
        assert_eq!(user.list_date(), NaiveDate::from_ymd_opt(2023, 9, 12));
    }

    #[test]
    fn status_round_trips_as_plain_string() {
        let json = serde_json::to_string(&UpdateStatusDto { status: UserStatus::Blocked }).unwrap();
        assert_eq!(json, r#"{"status":"blocked"}"#);
    }

    #[test]
    fn remove_by_id_is_optimistic_removal() {
        let mut list = vec![sample()];
        assert!(remove_by_id(&mut list, "missing").is_none());
        assert!(remove_by_id(&mut list, "65000000aaaaaaaaaaaaaaaa").is_some());
        assert!(list.is_empty());
    }

    #[test]
    fn profile_change_keeps_only_changed_fields() {
        let user = sample();
        let req = ProfileChangeRequest::diff(&user, "Rahim Uddin", " 01811111111 ", "", "new SIM");
        assert_eq!(req.name, None);
        assert_eq!(req.contact_no.as_deref(), Some("01811111111"));
        assert_eq!(req.passport_number, None);
        assert!(!req.is_empty());
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"contactNo":"01811111111","reason":"new SIM"}"#
        );
    }

    #[test]
    fn users_query_string() {
        let q = ListUsersQuery::first(Some(Role::Candidate));
        assert_eq!(q.to_query_string(), "page=1&limit=100&role=user");
        assert_eq!(q.next().to_query_string(), "page=2&limit=100&role=user");
        assert_eq!(ListUsersQuery::first(None).to_query_string(), "page=1&limit=100");
    }

    #[test]
    fn page_walk_stops_on_last_page() {
        let q = ListUsersQuery::first(None);
        let p = Pagination { total_pages: 2, current_page: 1, total: 150 };
        assert!(q.has_more(Some(&p), 100));
        assert!(!q.next().has_more(Some(&p), 50));
        assert!(q.has_more(None, 100));
        assert!(!q.has_more(None, 99));
        assert!(!q.has_more(Some(&Pagination::default()), 0));
    }
}
