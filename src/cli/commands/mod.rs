//! Command handlers for the CLI

pub mod create_user;
pub mod menus;

pub use create_user::{cmd_create_user, cmd_set_active};
pub use menus::cmd_list_menus;
