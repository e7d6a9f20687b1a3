pub mod prelude;

pub mod auth_tokens;
pub mod menu_options;
pub mod menus;
pub mod options;
pub mod orders;
pub mod users;
