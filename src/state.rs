use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, MenuService, OrderService, SeaOrmAuthService, SeaOrmMenuService,
    SeaOrmOrderService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub menu_service: Arc<dyn MenuService>,

    pub order_service: Arc<dyn OrderService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::from_config(&config).await?;
        Ok(Self::with_store(config, store))
    }

    /// Wire the services around an already connected store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let config = Arc::new(RwLock::new(config));

        let auth_service = Arc::new(SeaOrmAuthService::new(store.clone(), config.clone()))
            as Arc<dyn AuthService + Send + Sync + 'static>;

        let menu_service = Arc::new(SeaOrmMenuService::new(store.clone(), config.clone()))
            as Arc<dyn MenuService + Send + Sync + 'static>;

        let order_service = Arc::new(SeaOrmOrderService::new(store.clone()))
            as Arc<dyn OrderService + Send + Sync + 'static>;

        Self {
            config,
            store,
            auth_service,
            menu_service,
            order_service,
        }
    }
}
