//! HTTP helpers for talking to the booking API.
//!
//! Every call goes through [`api_url`], attaches the stored session token as a
//! bearer header, and unwraps the `{success, message, data}` envelope into a
//! `Result<_, ApiError>`. A 401 ends the session.

use contracts::shared::api::{ApiEnvelope, ApiError, Pagination};
use gloo_net::http::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::system::auth::{context::expire_session, storage};

/// Hosted API, used when neither the build nor local storage configures a
/// base URL.
pub const DEFAULT_API_BASE: &str = "https://api.mocktest-portal.com";

/// Local-storage key that overrides the compiled base URL at runtime.
pub const API_BASE_OVERRIDE_KEY: &str = "portal_api_base";

/// Picks the first non-empty candidate and strips trailing slashes.
pub fn resolve_api_base(runtime_override: Option<&str>, compiled: Option<&str>) -> String {
    [runtime_override, compiled]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_API_BASE)
        .trim_end_matches('/')
        .to_string()
}

fn runtime_override() -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()??
        .get_item(API_BASE_OVERRIDE_KEY)
        .ok()?
}

/// Base URL of the API, e.g. `"https://api.example.com"`.
pub fn api_base() -> String {
    resolve_api_base(runtime_override().as_deref(), option_env!("PORTAL_API_BASE"))
}

/// Full URL for an `/api/...` path.
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Path segment with reserved characters escaped.
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value.trim()).into_owned()
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn read_envelope<T: DeserializeOwned>(
    path: &str,
    response: Response,
) -> Result<ApiEnvelope<T>, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !(200..300).contains(&status) {
        let err = ApiError::from_status(status, &body);
        if err.is_auth() {
            log::warn!("{} -> 401, ending session", path);
            expire_session();
        } else {
            log::warn!("{} -> {}", path, err);
        }
        return Err(err);
    }

    serde_json::from_str::<ApiEnvelope<T>>(&body).map_err(|e| {
        log::warn!("{} -> undecodable body: {}", path, e);
        ApiError::Decode(e.to_string())
    })
}

async fn dispatch<T: DeserializeOwned>(
    path: &str,
    builder: RequestBuilder,
    body: Option<String>,
) -> Result<ApiEnvelope<T>, ApiError> {
    let builder = authorized(builder);
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(json),
        None => builder.build(),
    }
    .map_err(|e| ApiError::Network(e.to_string()))?;

    let response = request.send().await.map_err(|e| {
        log::warn!("{} -> network error: {}", path, e);
        ApiError::Network(e.to_string())
    })?;
    read_envelope(path, response).await
}

/// GET returning the raw envelope.
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<ApiEnvelope<T>, ApiError> {
    dispatch(path, RequestBuilder::new(&api_url(path)).method(Method::GET), None).await
}

/// GET returning `data`.
pub async fn get_data<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    get_json::<T>(path).await?.into_data()
}

/// GET returning `data` together with the pagination block.
pub async fn get_page<T: DeserializeOwned>(
    path: &str,
) -> Result<(T, Option<Pagination>), ApiError> {
    get_json::<T>(path).await?.into_page()
}

/// POST/PUT a JSON body and return the raw envelope.
pub async fn send_json<B: Serialize, T: DeserializeOwned>(
    method: Method,
    path: &str,
    body: &B,
) -> Result<ApiEnvelope<T>, ApiError> {
    let json = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    dispatch(path, RequestBuilder::new(&api_url(path)).method(method), Some(json)).await
}

/// DELETE returning the server's confirmation message.
pub async fn delete(path: &str) -> Result<String, ApiError> {
    dispatch::<serde_json::Value>(
        path,
        RequestBuilder::new(&api_url(path)).method(Method::DELETE),
        None,
    )
    .await?
    .into_message()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_compiled_base() {
        assert_eq!(
            resolve_api_base(Some("https://staging.example.com/"), Some("https://api.example.com")),
            "https://staging.example.com"
        );
    }

    #[test]
    fn blank_values_fall_through() {
        assert_eq!(resolve_api_base(Some("  "), Some("https://api.example.com")), "https://api.example.com");
        assert_eq!(resolve_api_base(None, None), DEFAULT_API_BASE);
        assert_eq!(resolve_api_base(Some(""), Some("")), DEFAULT_API_BASE);
    }

    #[test]
    fn default_base_is_the_hosted_https_endpoint() {
        assert!(DEFAULT_API_BASE.starts_with("https://"));
        assert!(!DEFAULT_API_BASE.contains("localhost"));
    }

    #[test]
    fn path_segments_are_escaped() {
        assert_eq!(path_segment("CM/0042"), "CM%2F0042");
        assert_eq!(path_segment(" 17 "), "17");
    }
}
