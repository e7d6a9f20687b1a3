pub mod menu;
pub mod options;
pub mod order;
pub mod token;
pub mod user;
