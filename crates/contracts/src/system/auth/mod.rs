use crate::shared::api::ApiError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Wire DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    pub fn into_token(self) -> Result<String, ApiError> {
        if self.success == Some(false) {
            return Err(ApiError::Rejected(
                self.message
                    .unwrap_or_else(|| "Invalid email or password".to_string()),
            ));
        }
        self.token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ApiError::Decode("login response has no token".to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

// ============================================================================
// Roles & sections
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Bdm,
    Teacher,
    #[serde(rename = "user", alias = "candidate")]
    Candidate,
}

/// Page groups a role may open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Overview,
    Users,
    Candidates,
    ProfileRequests,
    Schedules,
    CreateSchedule,
    DeleteSchedule,
    Bookings,
    CashMemo,
    Trf,
    MyProfile,
    MyBookings,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Bdm => "Business Development Manager",
            Role::Teacher => "Teacher",
            Role::Candidate => "Candidate",
        }
    }

    /// Wire value, also used as the `role` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Bdm => "bdm",
            Role::Teacher => "teacher",
            Role::Candidate => "user",
        }
    }

    /// Lenient wire parser used where an unknown role must not fail the record.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "bdm" => Some(Role::Bdm),
            "teacher" => Some(Role::Teacher),
            "user" | "candidate" => Some(Role::Candidate),
            _ => None,
        }
    }

    pub fn is_staff(self) -> bool {
        !matches!(self, Role::Candidate)
    }

    pub fn sections(self) -> &'static [Section] {
        use Section::*;
        match self {
            Role::Admin => &[
                Overview,
                Users,
                Candidates,
                ProfileRequests,
                Schedules,
                CreateSchedule,
                DeleteSchedule,
                Bookings,
                CashMemo,
                Trf,
            ],
            Role::Bdm => &[Overview, Candidates, Schedules, Bookings, CashMemo],
            Role::Teacher => &[Candidates, Schedules, Bookings, Trf],
            Role::Candidate => &[MyProfile, MyBookings, Schedules],
        }
    }

    pub fn can_access(self, section: Section) -> bool {
        self.sections().contains(&section)
    }

    /// Section opened right after login.
    pub fn home_section(self) -> Section {
        match self {
            Role::Admin | Role::Bdm => Section::Overview,
            Role::Teacher => Section::Schedules,
            Role::Candidate => Section::MyProfile,
        }
    }
}

// ============================================================================
// Token claims
// ============================================================================

/// Claims read from the session token. The signature is not checked here;
/// the API verifies it on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(alias = "id", alias = "_id", alias = "userId", alias = "sub")]
    pub user_id: String,
    pub role: Role,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Expiry, seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp.is_some_and(|exp| exp <= now.timestamp())
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| self.role.label().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is not a three-part JWT")]
    Malformed,
    #[error("token payload is not base64url: {0}")]
    Encoding(String),
    #[error("token claims are invalid: {0}")]
    Claims(String),
}

/// Decodes the payload segment of a JWT without verifying it.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let mut parts = token.trim().split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed);
    };
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| TokenError::Encoding(e.to_string()))?;
    serde_json::from_slice::<TokenClaims>(&bytes).map_err(|e| TokenError::Claims(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn decodes_claims_with_id_alias() {
        let token = token_with(r#"{"id":"6650aa","role":"bdm","email":"a@b.c","exp":1900000000}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_id, "6650aa");
        assert_eq!(claims.role, Role::Bdm);
        assert_eq!(claims.display_name(), "a@b.c");
    }

    #[test]
    fn candidate_role_is_user_on_the_wire() {
        let claims = decode_claims(&token_with(r#"{"_id":"x","role":"user"}"#)).unwrap();
        assert_eq!(claims.role, Role::Candidate);
        assert_eq!(claims.role.as_str(), "user");
        assert!(!claims.role.is_staff());
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!(decode_claims("abc"), Err(TokenError::Malformed));
        assert_eq!(decode_claims("a.b.c.d"), Err(TokenError::Malformed));
        assert!(matches!(decode_claims("a.!!!.c"), Err(TokenError::Encoding(_))));
        assert!(matches!(
            decode_claims(&token_with(r#"{"id":"x","role":"janitor"}"#)),
            Err(TokenError::Claims(_))
        ));
    }

    #[test]
    fn expiry_is_inclusive() {
        let claims = decode_claims(&token_with(r#"{"id":"x","role":"admin","exp":1000}"#)).unwrap();
        assert!(claims.is_expired(DateTime::from_timestamp(1000, 0).unwrap()));
        assert!(!claims.is_expired(DateTime::from_timestamp(999, 0).unwrap()));

        let forever = decode_claims(&token_with(r#"{"id":"x","role":"admin"}"#)).unwrap();
        assert!(!forever.is_expired(Utc::now()));
    }

    #[test]
    fn lenient_role_parsing() {
        assert_eq!(Role::from_wire(" BDM "), Some(Role::Bdm));
        assert_eq!(Role::from_wire("candidate"), Some(Role::Candidate));
        assert_eq!(Role::from_wire("janitor"), None);
    }

    #[test]
    fn role_sections_gate_pages() {
        assert!(Role::Admin.can_access(Section::DeleteSchedule));
        assert!(!Role::Bdm.can_access(Section::DeleteSchedule));
        assert!(Role::Teacher.can_access(Section::Trf));
        assert!(!Role::Candidate.can_access(Section::Users));
        for role in [Role::Admin, Role::Bdm, Role::Teacher, Role::Candidate] {
            assert!(role.can_access(role.home_section()), "{role:?}");
        }
    }

    #[test]
    fn login_response_without_token_fails() {
        let rejected = LoginResponse { success: Some(false), message: Some("Wrong password".into()), token: None };
        assert_eq!(rejected.into_token(), Err(ApiError::Rejected("Wrong password".into())));

        let empty = LoginResponse { success: Some(true), message: None, token: Some(" ".into()) };
        assert!(matches!(empty.into_token(), Err(ApiError::Decode(_))));
    }
}
