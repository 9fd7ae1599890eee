//! Response conventions of the booking API and the error type every client
//! call returns.
//!
//! The server answers most calls with HTTP 200 and a body like
//! `{"success": false, "message": "Slot is full"}` when a business rule
//! rejects the request, so status code alone is not enough.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, DNS ...).
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx status other than 401.
    #[error("Server responded with {status}: {message}")]
    Http { status: u16, message: String },

    /// `success: false` in an otherwise successful response.
    #[error("{0}")]
    Rejected(String),

    /// Body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Missing, expired or refused session token.
    #[error("Session expired, please log in again")]
    Unauthenticated,
}

impl ApiError {
    /// Maps a non-2xx status and its raw body to an error, preferring the
    /// server's `message` field when the body is JSON.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthenticated;
        }
        let message = serde_json::from_str::<MessageResponse>(body)
            .ok()
            .and_then(|m| m.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "no details".to_string()
                } else {
                    trimmed.chars().take(200).collect()
                }
            });
        ApiError::Http { status, message }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthenticated)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub total_pages: usize,
    #[serde(default)]
    pub current_page: usize,
    #[serde(default)]
    pub total: usize,
}

/// `{success, message, data, pagination}` wrapper; every field is optional
/// on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl<T> ApiEnvelope<T> {
    fn rejection(&self) -> Option<ApiError> {
        if self.success == Some(false) {
            let message = self
                .message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Request was rejected".to_string());
            Some(ApiError::Rejected(message))
        } else {
            None
        }
    }

    pub fn into_data(self) -> Result<T, ApiError> {
        if let Some(err) = self.rejection() {
            return Err(err);
        }
        self.data
            .ok_or_else(|| ApiError::Decode("response has no data".to_string()))
    }

    /// Like [`into_data`](Self::into_data) but keeps the pagination block.
    pub fn into_page(self) -> Result<(T, Option<Pagination>), ApiError> {
        if let Some(err) = self.rejection() {
            return Err(err);
        }
        let pagination = self.pagination;
        let data = self
            .data
            .ok_or_else(|| ApiError::Decode("response has no data".to_string()))?;
        Ok((data, pagination))
    }

    /// For calls whose only payload is a confirmation message.
    pub fn into_message(self) -> Result<String, ApiError> {
        if let Some(err) = self.rejection() {
            return Err(err);
        }
        Ok(self.message.unwrap_or_else(|| "Done".to_string()))
    }
}

/// Reads `null` the same as a missing field, so one half-filled record does
/// not fail a whole list.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_flag_false_is_a_rejection() {
        let env: ApiEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"success": false, "message": "Slot is full"}"#).unwrap();
        assert_eq!(env.into_data(), Err(ApiError::Rejected("Slot is full".into())));
    }

    #[test]
    fn missing_success_flag_is_accepted() {
        let env: ApiEnvelope<Vec<u32>> = serde_json::from_str(r#"{"data": [1, 2]}"#).unwrap();
        assert_eq!(env.into_data(), Ok(vec![1, 2]));
    }

    #[test]
    fn page_keeps_pagination() {
        let env: ApiEnvelope<Vec<u32>> = serde_json::from_str(
            r#"{"success": true, "data": [7], "pagination": {"totalPages": 3, "currentPage": 2, "total": 21}}"#,
        )
        .unwrap();
        let (data, pagination) = env.into_page().unwrap();
        assert_eq!(data, vec![7]);
        assert_eq!(pagination.unwrap().total_pages, 3);
    }

    #[test]
    fn missing_data_is_decode_error() {
        let env: ApiEnvelope<Vec<u32>> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(matches!(env.into_data(), Err(ApiError::Decode(_))));
    }

    #[test]
    fn status_mapping_prefers_server_message() {
        assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthenticated);
        assert_eq!(
            ApiError::from_status(404, r#"{"message": "User not found"}"#),
            ApiError::Http { status: 404, message: "User not found".into() }
        );
        assert_eq!(
            ApiError::from_status(502, "Bad Gateway"),
            ApiError::Http { status: 502, message: "Bad Gateway".into() }
        );
        assert_eq!(
            ApiError::from_status(500, "   "),
            ApiError::Http { status: 500, message: "no details".into() }
        );
    }

    #[derive(Debug, Default, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default, deserialize_with = "null_as_default")]
        tags: Vec<String>,
    }

    #[test]
    fn null_reads_as_default() {
        let row: Row = serde_json::from_str(r#"{"name": null, "tags": null}"#).unwrap();
        assert_eq!(row.name, "");
        assert!(row.tags.is_empty());
        let row: Row = serde_json::from_str(r#"{"name": "IELTS"}"#).unwrap();
        assert_eq!(row.name, "IELTS");
    }
}
