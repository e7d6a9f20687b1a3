//! Domain service for orders.

use thiserror::Error;

use crate::models::order::{Order, OrderFilter};

/// Errors specific to order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Menu {0} does not exist")]
    MenuNotFound(i32),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for OrderError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for OrderError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait OrderService: Send + Sync {
    /// Records an order for `user_id` against `menu_id`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::MenuNotFound`] when the menu does not exist and
    /// [`OrderError::Validation`] for an over-long observation.
    async fn place_order(
        &self,
        user_id: i32,
        menu_id: i32,
        observation: Option<String>,
    ) -> Result<Order, OrderError>;

    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<Order>, OrderError>;
}
