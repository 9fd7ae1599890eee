use contracts::domain::a001_user::{
    ApproveProfileChangeDto, ListUsersQuery, ProfileChangeRequest, UpdateStatusDto, User,
    UserStatus,
};
use contracts::domain::a003_booking::Booking;
use contracts::shared::api::{ApiError, Pagination};
use contracts::system::auth::Role;
use gloo_net::http::Method;

use crate::shared::api_utils::{get_data, get_page, path_segment, send_json};
use crate::shared::cancel::CancelFlag;

/// Upper bound on pages walked by [`fetch_all_users`], in case the server
/// ignores the `page` parameter.
const MAX_PAGES: usize = 200;

/// One page of users.
pub async fn fetch_users_page(
    query: ListUsersQuery,
) -> Result<(Vec<User>, Option<Pagination>), ApiError> {
    get_page::<Vec<User>>(&format!("/api/users?{}", query.to_query_string())).await
}

/// Walks every page of the users collection.
///
/// Returns `Ok(None)` when `cancel` was raised between requests; rows
/// fetched so far are discarded.
pub async fn fetch_all_users(
    role: Option<Role>,
    cancel: &CancelFlag,
) -> Result<Option<Vec<User>>, ApiError> {
    let mut query = ListUsersQuery::first(role);
    let mut users = Vec::new();

    for _ in 0..MAX_PAGES {
        if cancel.is_cancelled() {
            log::info!("users load cancelled at page {}", query.page);
            return Ok(None);
        }
        let (page, pagination) = fetch_users_page(query).await?;
        let received = page.len();
        users.extend(page);
        if !query.has_more(pagination.as_ref(), received) {
            break;
        }
        query = query.next();
    }

    if cancel.is_cancelled() {
        return Ok(None);
    }
    Ok(Some(users))
}

pub async fn fetch_user(id: &str) -> Result<User, ApiError> {
    get_data::<User>(&format!("/api/users/{}", path_segment(id))).await
}

pub async fn fetch_user_bookings(id: &str) -> Result<Vec<Booking>, ApiError> {
    get_data::<Vec<Booking>>(&format!("/api/users/{}/bookings", path_segment(id))).await
}

pub async fn update_status(id: &str, status: UserStatus) -> Result<User, ApiError> {
    send_json::<_, User>(
        Method::PUT,
        &format!("/api/users/{}/status", path_segment(id)),
        &UpdateStatusDto { status },
    )
    .await?
    .into_data()
}

pub async fn request_profile_change(
    id: &str,
    request: &ProfileChangeRequest,
) -> Result<String, ApiError> {
    send_json::<_, serde_json::Value>(
        Method::PUT,
        &format!("/api/users/{}/profile-change-request", path_segment(id)),
        request,
    )
    .await?
    .into_message()
}

pub async fn approve_profile_change(id: &str, approved: bool) -> Result<String, ApiError> {
    send_json::<_, serde_json::Value>(
        Method::PUT,
        &format!("/api/users/{}/approve-profile-change", path_segment(id)),
        &ApproveProfileChangeDto { approved },
    )
    .await?
    .into_message()
}
