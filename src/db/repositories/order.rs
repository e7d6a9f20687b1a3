use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::entities::{orders, prelude::*};
use crate::models::order::{Order, OrderFilter};

pub struct OrderRepository {
    conn: DatabaseConnection,
}

impl OrderRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Returns `None` when the menu does not exist.
    pub async fn create(
        &self,
        user_id: i32,
        menu_id: i32,
        observation: &str,
    ) -> Result<Option<Order>> {
        let txn = self.conn.begin().await?;

        if Menus::find_by_id(menu_id)
            .one(&txn)
            .await
            .context("Failed to query menu for order")?
            .is_none()
        {
            return Ok(None);
        }

        let model = orders::ActiveModel {
            user_id: Set(user_id),
            menu_id: Set(menu_id),
            observation: Set(observation.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert order")?;

        txn.commit().await?;
        Ok(Some(Order::from(model)))
    }

    pub async fn list(&self, filter: OrderFilter) -> Result<Vec<Order>> {
        let mut query = Orders::find();

        if let Some(user_id) = filter.user_id {
            query = query.filter(orders::Column::UserId.eq(user_id));
        }
        if let Some(menu_id) = filter.menu_id {
            query = query.filter(orders::Column::MenuId.eq(menu_id));
        }

        let rows = query
            .order_by_desc(orders::Column::CreatedAt)
            .order_by_desc(orders::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list orders")?;

        Ok(rows.into_iter().map(Order::from).collect())
    }
}
