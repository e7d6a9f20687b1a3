use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;

use super::auth::AuthUser;
use super::validation::parse_id;
use super::{ApiError, AppState, CreateOrderRequest, OrderDto, OrderListQuery};
use crate::models::order::OrderFilter;
use crate::services::OrderError;

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::MenuNotFound(_) | OrderError::Validation(_) => {
                Self::validation(err.to_string())
            }
            OrderError::Database(msg) => Self::DatabaseError(msg),
            OrderError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// POST /orders
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderDto>), ApiError> {
    let Json(payload) = payload?;

    let order = state
        .order_service()
        .place_order(user.id, payload.menu, payload.observation)
        .await?;

    Ok((StatusCode::CREATED, Json(OrderDto::from(order))))
}

/// GET /orders
/// Staff see every order, everyone else only their own.
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    query: Result<Query<OrderListQuery>, QueryRejection>,
) -> Result<Json<Vec<OrderDto>>, ApiError> {
    let Query(query) = query?;
    let filter = OrderFilter {
        user_id: (!user.is_staff).then_some(user.id),
        menu_id: parse_id("menu", query.menu.as_deref())?,
    };

    let orders = state.order_service().list_orders(filter).await?;

    Ok(Json(orders.into_iter().map(OrderDto::from).collect()))
}
