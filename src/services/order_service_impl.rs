//! `SeaORM` implementation of the `OrderService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::models::order::{MAX_OBSERVATION_LEN, Order, OrderFilter};
use crate::services::order_service::{OrderError, OrderService};

pub struct SeaOrmOrderService {
    store: Store,
}

impl SeaOrmOrderService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OrderService for SeaOrmOrderService {
    async fn place_order(
        &self,
        user_id: i32,
        menu_id: i32,
        observation: Option<String>,
    ) -> Result<Order, OrderError> {
        let observation = observation.unwrap_or_default();
        if observation.chars().count() > MAX_OBSERVATION_LEN {
            return Err(OrderError::Validation(format!(
                "Observation cannot exceed {MAX_OBSERVATION_LEN} characters"
            )));
        }

        let order = self
            .store
            .create_order(user_id, menu_id, &observation)
            .await?
            .ok_or(OrderError::MenuNotFound(menu_id))?;

        metrics::counter!("dailymenu_orders_placed_total").increment(1);
        info!(order_id = order.id, user_id, menu_id, "Order placed");
        Ok(order)
    }

    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<Order>, OrderError> {
        Ok(self.store.list_orders(filter).await?)
    }
}
