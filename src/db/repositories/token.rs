use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::user::User;
use crate::db::is_unique_violation;
use crate::entities::{auth_tokens, prelude::*};

pub struct TokenRepository {
    conn: DatabaseConnection,
}

impl TokenRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Returns the user's token, issuing one if none exists yet.
    pub async fn get_or_create(&self, user_id: i32) -> Result<String> {
        if let Some(key) = self.find_key(user_id).await? {
            return Ok(key);
        }

        self.issue(user_id).await
    }

    /// Insert a fresh key. If another request issued one for the same user
    /// in the meantime, the unique index rejects ours and theirs is returned.
    pub async fn issue(&self, user_id: i32) -> Result<String> {
        let inserted = auth_tokens::ActiveModel {
            key: Set(generate_token_key()),
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert auth token");

        match inserted {
            Ok(token) => Ok(token.key),
            Err(e) if is_unique_violation(&e) => self
                .find_key(user_id)
                .await?
                .ok_or_else(|| anyhow!("Auth token for user {user_id} vanished after conflict")),
            Err(e) => Err(e),
        }
    }

    async fn find_key(&self, user_id: i32) -> Result<Option<String>> {
        let existing = AuthTokens::find()
            .filter(auth_tokens::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await
            .context("Failed to query auth token")?;

        Ok(existing.map(|token| token.key))
    }

    /// Resolve a presented key to its owner
    pub async fn find_user(&self, key: &str) -> Result<Option<User>> {
        let row = AuthTokens::find_by_id(key.to_string())
            .find_also_related(Users)
            .one(&self.conn)
            .await
            .context("Failed to query user by token")?;

        Ok(row.and_then(|(_, user)| user).map(User::from))
    }

    /// Delete the user's token; the next obtain call issues a fresh one.
    pub async fn revoke(&self, user_id: i32) -> Result<bool> {
        let result = AuthTokens::delete_many()
            .filter(auth_tokens::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete auth token")?;

        Ok(result.rows_affected > 0)
    }
}

/// Generate a random token key (40 character hex string)
#[must_use]
pub fn generate_token_key() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 20] = rng.random();

    bytes.iter().fold(String::with_capacity(40), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}
