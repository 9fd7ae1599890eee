use contracts::domain::a005_trf::{CreateTrfDto, Trf};
use contracts::shared::api::ApiError;
use gloo_net::http::Method;

use crate::shared::api_utils::send_json;

pub async fn create_trf(dto: &CreateTrfDto) -> Result<Trf, ApiError> {
    send_json::<_, Trf>(Method::POST, "/api/trf", dto)
        .await?
        .into_data()
}
