//! Authentication against the hosted identity service.
//!
//! Thin GoTrue-style client: password login, registration with a
//! profile row, best-effort logout. The record cache consumes only the
//! resulting [`Identity`]; token refresh and session persistence are
//! the host application's concern.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::models::{Identity, NewProfileRow, ProfileRow, UserRole};

/// Default per-request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct AuthClient {
    base_url: String,
    anon_key: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

/// An authenticated session: the access token scoping store requests
/// plus the signed-in identity.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub identity: Identity,
}

/// Sign-up form data.
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: UserRole,
    pub specialization: Option<String>,
}

#[derive(Serialize)]
struct PasswordGrantRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Deserialize)]
struct AuthUser {
    id: Uuid,
}

impl AuthClient {
    pub fn new(config: &StoreConfig, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            client,
            timeout_secs,
        }
    }

    pub fn with_defaults(config: &StoreConfig) -> Self {
        Self::new(config, DEFAULT_TIMEOUT_SECS)
    }

    fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, endpoint)
    }

    fn map_transport(&self, e: reqwest::Error) -> AuthError {
        if e.is_connect() {
            AuthError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            AuthError::Timeout(self.timeout_secs)
        } else {
            AuthError::Http(e.to_string())
        }
    }

    /// Sign in with email and password.
    ///
    /// Builds the [`Identity`] from the `user_profiles` row of the
    /// authenticated user; an account without a profile row cannot use
    /// the system.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .client
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&PasswordGrantRequest { email, password })
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST || status == reqwest::StatusCode::UNAUTHORIZED
        {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::ResponseParsing(e.to_string()))?;

        let profile = self.fetch_profile(&token.access_token, token.user.id).await?;
        tracing::info!(user = %profile.id, "Signed in");
        Ok(Session {
            access_token: token.access_token,
            identity: Identity::from_row(profile),
        })
    }

    /// Create an account plus its profile row, returning a signed-in
    /// session.
    pub async fn register(&self, registration: NewRegistration) -> Result<Session, AuthError> {
        let response = self
            .client
            .post(self.auth_url("signup"))
            .header("apikey", &self.anon_key)
            .json(&PasswordGrantRequest {
                email: &registration.email,
                password: &registration.password,
            })
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::ResponseParsing(e.to_string()))?;

        let profile = self
            .insert_profile(
                &token.access_token,
                NewProfileRow {
                    id: token.user.id,
                    name: registration.name,
                    email: registration.email,
                    role: registration.role,
                    specialization: registration.specialization,
                },
            )
            .await?;
        tracing::info!(user = %profile.id, "Account registered");
        Ok(Session {
            access_token: token.access_token,
            identity: Identity::from_row(profile),
        })
    }

    /// Revoke the session server-side. Best-effort: the local scope is
    /// cleared regardless, so a failed revoke is only logged.
    pub async fn logout(&self, session: &Session) {
        let result = self
            .client
            .post(self.auth_url("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await;
        match result {
            Ok(response) if !response.status().is_success() => {
                tracing::warn!(status = %response.status(), "Logout revoke rejected");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Logout revoke failed");
            }
            Ok(_) => {}
        }
    }

    async fn fetch_profile(
        &self,
        access_token: &str,
        user_id: Uuid,
    ) -> Result<ProfileRow, AuthError> {
        let filter = format!("eq.{user_id}");
        let response = self
            .client
            .get(format!("{}/rest/v1/user_profiles", self.base_url))
            .query(&[("select", "*"), ("id", filter.as_str())])
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<ProfileRow> = response
            .json()
            .await
            .map_err(|e| AuthError::ResponseParsing(e.to_string()))?;
        rows.into_iter()
            .next()
            .ok_or(AuthError::MissingProfile(user_id))
    }

    async fn insert_profile(
        &self,
        access_token: &str,
        row: NewProfileRow,
    ) -> Result<ProfileRow, AuthError> {
        let response = self
            .client
            .post(format!("{}/rest/v1/user_profiles", self.base_url))
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=representation")
            .bearer_auth(access_token)
            .json(&row)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<ProfileRow> = response
            .json()
            .await
            .map_err(|e| AuthError::ResponseParsing(e.to_string()))?;
        rows.into_iter()
            .next()
            .ok_or(AuthError::MissingProfile(row.id))
    }
}

/// Errors from identity operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Cannot reach the identity service at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Identity service rejected the request with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse identity service response: {0}")]
    ResponseParsing(String),

    #[error("No profile found for user {0}")]
    MissingProfile(Uuid),
}
