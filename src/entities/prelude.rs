pub use super::auth_tokens::Entity as AuthTokens;
pub use super::menu_options::Entity as MenuOptions;
pub use super::menus::Entity as Menus;
pub use super::options::Entity as Options;
pub use super::orders::Entity as Orders;
pub use super::users::Entity as Users;
