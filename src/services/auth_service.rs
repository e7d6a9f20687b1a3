//! Domain service for accounts and token authentication.
//!
//! Handles registration, token issuance, token lookup and profile changes.

use thiserror::Error;

use crate::db::User;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unable to log in with provided credentials")]
    InvalidCredentials,

    #[error("User account is disabled")]
    InactiveUser,

    #[error("User not found")]
    UserNotFound,

    #[error("A user with email {0} already exists")]
    EmailTaken(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid token")]
    Unauthorized,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Input for a new account.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

/// Trim and lowercase an email. Returns `None` when nothing is left.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let email = email.trim();
    if email.is_empty() {
        None
    } else {
        Some(email.to_lowercase())
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account. Superusers are always staff.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for an empty email or a short
    /// password and [`AuthError::EmailTaken`] for a duplicate email.
    async fn register(&self, registration: Registration) -> Result<User, AuthError>;

    /// Verifies credentials and returns the user's token, issuing one on
    /// first use.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn obtain_token(&self, email: &str, password: &str) -> Result<String, AuthError>;

    /// Resolves a presented token to an active user.
    async fn authenticate(&self, token: &str) -> Result<User, AuthError>;

    /// Enables or disables login for the account with this email. Tokens of
    /// a disabled user stop authenticating but are kept.
    async fn set_active(&self, email: &str, active: bool) -> Result<User, AuthError>;

    /// Deletes the user's token. Returns `false` when there was none.
    async fn revoke_token(&self, user_id: i32) -> Result<bool, AuthError>;

    /// Changes the display name and/or password.
    async fn update_profile(
        &self,
        id: i32,
        name: Option<String>,
        password: Option<String>,
    ) -> Result<User, AuthError>;
}
