//! `SeaORM` implementation of the `AuthService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::{
    NewUser, Store, User, hash_password_blocking, is_unique_violation, verify_password_blocking,
};
use crate::services::auth_service::{AuthError, AuthService, Registration, normalize_email};

pub struct SeaOrmAuthService {
    store: Store,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }

    async fn check_password(&self, password: &str) -> Result<(), AuthError> {
        let min = self.config.read().await.security.min_password_length;
        if password.chars().count() < min {
            return Err(AuthError::Validation(format!(
                "Password must be at least {min} characters"
            )));
        }
        Ok(())
    }
}

/// A concurrent registration can win between the email check and the insert;
/// the unique index then reports the same conflict the check would have.
fn insert_error(email: String, err: anyhow::Error) -> AuthError {
    if is_unique_violation(&err) {
        AuthError::EmailTaken(email)
    } else {
        AuthError::from(err)
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, registration: Registration) -> Result<User, AuthError> {
        let email = normalize_email(&registration.email)
            .ok_or_else(|| AuthError::Validation("Users must have an email address".to_string()))?;

        self.check_password(&registration.password).await?;

        if self.store.get_user_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken(email));
        }

        let security = self.config.read().await.security.clone();
        let password_hash = hash_password_blocking(&registration.password, &security).await?;

        let user = self
            .store
            .create_user(NewUser {
                email: email.clone(),
                name: registration.name.trim().to_string(),
                password_hash,
                is_staff: registration.is_staff || registration.is_superuser,
                is_superuser: registration.is_superuser,
            })
            .await
            .map_err(|e| insert_error(email, e))?;

        metrics::counter!("dailymenu_users_registered_total").increment(1);
        info!(user_id = user.id, is_staff = user.is_staff, "User registered");
        Ok(user)
    }

    async fn obtain_token(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let Some(email) = normalize_email(email) else {
            return Err(AuthError::InvalidCredentials);
        };

        let Some((user, password_hash)) = self.store.get_user_with_password(&email).await? else {
            warn!("Token requested for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password_blocking(password, &password_hash).await? {
            warn!(user_id = user.id, "Token requested with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AuthError::InactiveUser);
        }

        let token = self.store.get_or_create_token(user.id).await?;
        self.store.touch_last_login(user.id).await?;

        Ok(token)
    }

    async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let user = self
            .store
            .get_user_by_token(token)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !user.is_active {
            return Err(AuthError::InactiveUser);
        }

        Ok(user)
    }

    async fn set_active(&self, email: &str, active: bool) -> Result<User, AuthError> {
        let email = normalize_email(email).ok_or(AuthError::UserNotFound)?;

        let user = self
            .store
            .set_user_active(&email, active)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        info!(user_id = user.id, active, "User activation changed");
        Ok(user)
    }

    async fn revoke_token(&self, user_id: i32) -> Result<bool, AuthError> {
        let revoked = self.store.revoke_token(user_id).await?;
        if revoked {
            info!(user_id, "Token revoked");
        }
        Ok(revoked)
    }

    async fn update_profile(
        &self,
        id: i32,
        name: Option<String>,
        password: Option<String>,
    ) -> Result<User, AuthError> {
        let password_hash = match password {
            Some(password) => {
                self.check_password(&password).await?;
                let security = self.config.read().await.security.clone();
                Some(hash_password_blocking(&password, &security).await?)
            }
            None => None,
        };

        let name = name.map(|n| n.trim().to_string());

        self.store
            .update_user_profile(id, name, password_hash)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
