use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::db::User;
use crate::models::menu::{Menu, MenuOption};
use crate::models::order::Order;

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Serialize)]
pub struct OptionDto {
    pub id: i32,
    pub description: String,
}

impl From<MenuOption> for OptionDto {
    fn from(option: MenuOption) -> Self {
        Self {
            id: option.id,
            description: option.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateOptionRequest {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OptionListQuery {
    pub assigned_only: Option<String>,
}

// ============================================================================
// Menus
// ============================================================================

/// Menu with its options as bare ids.
#[derive(Debug, Serialize)]
pub struct MenuDto {
    pub id: i32,
    pub name: String,
    pub date: NaiveDate,
    pub options: Vec<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<Menu> for MenuDto {
    fn from(menu: Menu) -> Self {
        Self {
            options: menu.option_ids(),
            id: menu.id,
            name: menu.name,
            date: menu.date,
            created_at: menu.created_at,
        }
    }
}

/// Menu with its options expanded.
#[derive(Debug, Serialize)]
pub struct MenuDetailDto {
    pub id: i32,
    pub name: String,
    pub date: NaiveDate,
    pub options: Vec<OptionDto>,
    pub created_at: DateTime<Utc>,
}

impl From<Menu> for MenuDetailDto {
    fn from(menu: Menu) -> Self {
        Self {
            id: menu.id,
            name: menu.name,
            date: menu.date,
            options: menu.options.into_iter().map(OptionDto::from).collect(),
            created_at: menu.created_at,
        }
    }
}

/// Body for create, patch and put. Which fields are required depends on the
/// verb.
#[derive(Debug, Default, Deserialize)]
pub struct MenuRequest {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub options: Option<Vec<i32>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MenuListQuery {
    pub options: Option<String>,
}

// ============================================================================
// Orders
// ============================================================================

#[derive(Debug, Serialize)]
pub struct OrderDto {
    pub id: i32,
    pub user: i32,
    pub menu: i32,
    pub observation: String,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user: order.user_id,
            menu: order.menu_id,
            observation: order.observation,
            created_at: order.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub menu: i32,
    #[serde(default)]
    pub observation: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub menu: Option<String>,
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub is_staff: bool,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            is_staff: user.is_staff,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

// ============================================================================
// System
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}
