use contracts::domain::a002_schedule::{CreateScheduleDto, Schedule};
use contracts::shared::api::ApiError;
use gloo_net::http::Method;

use crate::shared::api_utils::{delete, get_data, path_segment, send_json};

pub async fn fetch_schedules() -> Result<Vec<Schedule>, ApiError> {
    get_data::<Vec<Schedule>>("/api/schedules").await
}

pub async fn create_schedule(dto: &CreateScheduleDto) -> Result<Schedule, ApiError> {
    send_json::<_, Schedule>(Method::POST, "/api/schedules", dto)
        .await?
        .into_data()
}

/// Returns the server's confirmation message.
pub async fn delete_schedule(id: &str) -> Result<String, ApiError> {
    delete(&format!("/api/schedules/{}", path_segment(id))).await
}
