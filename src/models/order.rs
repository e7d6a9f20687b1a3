use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::orders;

/// Longest observation accepted on an order.
pub const MAX_OBSERVATION_LEN: usize = 255;

/// A user's request against a specific menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub menu_id: i32,
    pub observation: String,
    pub created_at: DateTime<Utc>,
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            menu_id: model.menu_id,
            observation: model.observation,
            created_at: model.created_at,
        }
    }
}

/// Which orders a listing should return.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderFilter {
    /// Restrict to one user's orders.
    pub user_id: Option<i32>,
    /// Restrict to orders against one menu.
    pub menu_id: Option<i32>,
}
