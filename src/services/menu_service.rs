//! Domain service for options and menus.
//!
//! Owns the menu policy (option bounds, one menu per day) and the replace
//! semantics of the menu/option relation.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::menu::{Menu, MenuChanges, MenuDraft, MenuFilter, MenuOption};

/// Errors specific to option and menu operations.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Menu {0} not found")]
    MenuNotFound(i32),

    #[error("Option {0} not found")]
    OptionNotFound(i32),

    #[error("No menu for {0}")]
    NoMenuForDate(NaiveDate),

    #[error("{0}")]
    Validation(String),

    #[error("Unknown option ids: {0:?}")]
    UnknownOptions(Vec<i32>),

    #[error("A menu already exists for {0}")]
    DateTaken(NaiveDate),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for MenuError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for MenuError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for options and menus.
#[async_trait::async_trait]
pub trait MenuService: Send + Sync {
    /// Lists options, optionally only those linked to at least one menu.
    async fn list_options(&self, assigned_only: bool) -> Result<Vec<MenuOption>, MenuError>;

    async fn get_option(&self, id: i32) -> Result<MenuOption, MenuError>;

    /// # Errors
    ///
    /// Returns [`MenuError::Validation`] for a blank description.
    async fn create_option(&self, description: &str) -> Result<MenuOption, MenuError>;

    async fn list_menus(&self, filter: &MenuFilter) -> Result<Vec<Menu>, MenuError>;

    async fn get_menu(&self, id: i32) -> Result<Menu, MenuError>;

    /// The menu dated on the server's local date.
    async fn get_menu_for_date(&self, date: NaiveDate) -> Result<Menu, MenuError>;

    /// # Errors
    ///
    /// Returns [`MenuError::UnknownOptions`] when any option id does not
    /// exist, [`MenuError::DateTaken`] when the date already has a menu and
    /// [`MenuError::Validation`] when the option count breaks policy.
    async fn create_menu(&self, draft: MenuDraft) -> Result<Menu, MenuError>;

    /// Applies `changes`; a provided option list replaces the current one.
    async fn update_menu(&self, id: i32, changes: MenuChanges) -> Result<Menu, MenuError>;

    async fn delete_menu(&self, id: i32) -> Result<(), MenuError>;
}
