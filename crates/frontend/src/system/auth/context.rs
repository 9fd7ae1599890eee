use chrono::{DateTime, Utc};
use contracts::shared::api::ApiError;
use contracts::system::auth::{decode_claims, Role, TokenClaims};
use leptos::prelude::*;
use std::cell::Cell;

use super::{api, storage};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub claims: Option<TokenClaims>,
}

impl AuthState {
    /// Session for a stored token, or `None` when the token is unreadable or
    /// already expired.
    pub fn from_token(token: &str, now: DateTime<Utc>) -> Option<Self> {
        let claims = decode_claims(token).ok()?;
        if claims.is_expired(now) {
            return None;
        }
        Some(Self {
            access_token: Some(token.to_string()),
            claims: Some(claims),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.claims.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.claims.as_ref().map(|c| c.role)
    }

    pub fn user_id(&self) -> Option<String> {
        self.claims.as_ref().map(|c| c.user_id.clone())
    }
}

thread_local! {
    static SESSION_SETTER: Cell<Option<WriteSignal<AuthState>>> = const { Cell::new(None) };
}

fn restore_session() -> AuthState {
    let Some(token) = storage::get_access_token() else {
        return AuthState::default();
    };
    match AuthState::from_token(&token, Utc::now()) {
        Some(state) => state,
        None => {
            log::info!("stored session token is invalid or expired, clearing it");
            storage::clear_tokens();
            AuthState::default()
        }
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(restore_session());

    SESSION_SETTER.with(|cell| cell.set(Some(set_auth_state)));
    on_cleanup(|| SESSION_SETTER.with(|cell| cell.set(None)));

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    (
        expect_context::<ReadSignal<AuthState>>(),
        expect_context::<WriteSignal<AuthState>>(),
    )
}

/// Role of the signed-in user, reactive.
pub fn use_role() -> Signal<Option<Role>> {
    let (auth_state, _) = use_auth();
    Signal::derive(move || auth_state.with(|s| s.role()))
}

/// Drops the session from anywhere, including async tasks that have no
/// reactive owner. The shell falls back to the login page.
pub fn expire_session() {
    storage::clear_tokens();
    SESSION_SETTER.with(|cell| {
        if let Some(set_auth_state) = cell.get() {
            set_auth_state.set(AuthState::default());
        }
    });
}

/// Helper: Perform login
pub async fn do_login(
    set_auth_state: WriteSignal<AuthState>,
    email: String,
    password: String,
) -> Result<Role, ApiError> {
    let token = api::login(email, password).await?;
    let state = AuthState::from_token(&token, Utc::now())
        .ok_or_else(|| ApiError::Decode("login returned an unusable token".to_string()))?;
    let role = state.role().unwrap_or(Role::Candidate);

    storage::save_access_token(&token);
    set_auth_state.set(state);
    log::info!("signed in as {}", role.as_str());
    Ok(role)
}

/// Helper: Perform logout
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
    log::info!("signed out");
}

#[cfg(test)]
mod tests {
    use super::*;

    // {"id":"u1","role":"teacher","exp":2000000000}
    const TOKEN: &str =
        "eyJhbGciOiJIUzI1NiJ9.eyJpZCI6InUxIiwicm9sZSI6InRlYWNoZXIiLCJleHAiOjIwMDAwMDAwMDB9.sig";

    #[test]
    fn valid_token_restores_session() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let state = AuthState::from_token(TOKEN, now).unwrap();
        assert!(state.is_authenticated());
        assert_eq!(state.role(), Some(Role::Teacher));
        assert_eq!(state.user_id().as_deref(), Some("u1"));
    }

    #[test]
    fn expired_or_garbage_tokens_are_rejected() {
        let later = DateTime::from_timestamp(2_000_000_000, 0).unwrap();
        assert_eq!(AuthState::from_token(TOKEN, later), None);
        assert_eq!(AuthState::from_token("not-a-jwt", Utc::now()), None);
        assert!(!AuthState::default().is_authenticated());
    }
}
