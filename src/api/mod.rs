use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::Layer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::{AuthService, MenuService, OrderService};
use crate::state::SharedState;

pub mod auth;
mod error;
mod menus;
mod observability;
mod options;
mod orders;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn menu_service(&self) -> &Arc<dyn MenuService> {
        &self.shared.menu_service
    }

    #[must_use]
    pub fn order_service(&self) -> &Arc<dyn OrderService> {
        &self.shared.order_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().read().await.server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/health", get(system::health))
        .route("/metrics", get(system::get_metrics))
        .route("/users", post(auth::register))
        .route(
            "/users/token",
            post(auth::obtain_token).delete(auth::revoke_token),
        )
        .route("/users/me", get(auth::get_me).patch(auth::update_me))
        .route(
            "/options",
            get(options::list_options).post(options::create_option),
        )
        .route("/options/{id}", get(options::get_option))
        .route("/menus", get(menus::list_menus).post(menus::create_menu))
        .route("/menus/today", get(menus::get_today_menu))
        .route(
            "/menus/{id}",
            get(menus::get_menu)
                .patch(menus::patch_menu)
                .put(menus::put_menu)
                .delete(menus::delete_menu),
        )
        .route(
            "/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .layer(middleware::from_fn(observability::logging_middleware))
        .with_state(state);

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(
            observability::security_headers_middleware,
        ))
}

/// The router with trailing slashes trimmed before routing, so `/api/menus/`
/// and `/api/menus` reach the same handler.
pub async fn app(state: Arc<AppState>) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state).await)
}
