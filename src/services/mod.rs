pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, Registration};
pub use auth_service_impl::SeaOrmAuthService;

pub mod menu_service;
pub mod menu_service_impl;
pub use menu_service::{MenuError, MenuService};
pub use menu_service_impl::SeaOrmMenuService;

pub mod order_service;
pub mod order_service_impl;
pub use order_service::{OrderError, OrderService};
pub use order_service_impl::SeaOrmOrderService;
