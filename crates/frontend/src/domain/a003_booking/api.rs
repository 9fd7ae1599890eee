use contracts::domain::a003_booking::Booking;
use contracts::shared::api::ApiError;

use crate::shared::api_utils::get_data;

pub async fn fetch_bookings() -> Result<Vec<Booking>, ApiError> {
    get_data::<Vec<Booking>>("/api/bookings").await
}
