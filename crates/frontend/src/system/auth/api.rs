use contracts::shared::api::{ApiError, MessageResponse};
use contracts::system::auth::{ForgotPasswordRequest, LoginRequest, LoginResponse};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

/// Login with email and password; returns the session token.
///
/// The login endpoint answers with `{success, message, token}` rather than
/// the usual data envelope, so it does not go through `api_utils`.
pub async fn login(email: String, password: String) -> Result<String, ApiError> {
    let request = LoginRequest {
        email: email.trim().to_string(),
        password,
    };

    let response = Request::post(&api_url("/api/auth/login"))
        .json(&request)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if status == 401 || status == 400 {
        // Bad credentials, not an expired session.
        let message = serde_json::from_str::<MessageResponse>(&body)
            .ok()
            .and_then(|m| m.message)
            .unwrap_or_else(|| "Invalid email or password".to_string());
        return Err(ApiError::Rejected(message));
    }
    if !response_ok(status) {
        return Err(ApiError::from_status(status, &body));
    }

    serde_json::from_str::<LoginResponse>(&body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .into_token()
}

/// Ask the server to e-mail a password reset link.
pub async fn forgot_password(email: String) -> Result<String, ApiError> {
    let request = ForgotPasswordRequest {
        email: email.trim().to_string(),
    };

    let response = Request::post(&api_url("/api/auth/forgot-password"))
        .json(&request)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response_ok(status) {
        return Err(ApiError::from_status(status, &body));
    }

    let parsed = serde_json::from_str::<MessageResponse>(&body).unwrap_or_default();
    if parsed.success == Some(false) {
        return Err(ApiError::Rejected(
            parsed
                .message
                .unwrap_or_else(|| "Could not send the reset link".to_string()),
        ));
    }
    Ok(parsed
        .message
        .unwrap_or_else(|| "If the address is registered, a reset link is on its way".to_string()))
}

fn response_ok(status: u16) -> bool {
    (200..300).contains(&status)
}
