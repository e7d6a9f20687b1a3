//! `SeaORM` implementation of the `MenuService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::{Config, MenuPolicyConfig};
use crate::db::Store;
use crate::models::menu::{
    MAX_MENU_NAME_LEN, Menu, MenuChanges, MenuDraft, MenuFilter, MenuOption, dedup_ids,
};
use crate::services::menu_service::{MenuError, MenuService};

pub struct SeaOrmMenuService {
    store: Store,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmMenuService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }

    async fn policy(&self) -> MenuPolicyConfig {
        self.config.read().await.menu_policy.clone()
    }
}

fn validate_name(name: &str) -> Result<(), MenuError> {
    if name.trim().is_empty() {
        return Err(MenuError::Validation("Menu name cannot be blank".to_string()));
    }
    if name.chars().count() > MAX_MENU_NAME_LEN {
        return Err(MenuError::Validation(format!(
            "Menu name cannot exceed {MAX_MENU_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_option_count(option_ids: &[i32], policy: &MenuPolicyConfig) -> Result<(), MenuError> {
    let count = dedup_ids(option_ids).len();

    if count > policy.max_options {
        return Err(MenuError::Validation(format!(
            "A menu can have at most {} options, got {count}",
            policy.max_options
        )));
    }
    if count < policy.min_options {
        return Err(MenuError::Validation(format!(
            "A menu needs at least {} options, got {count}",
            policy.min_options
        )));
    }
    Ok(())
}

#[async_trait]
impl MenuService for SeaOrmMenuService {
    async fn list_options(&self, assigned_only: bool) -> Result<Vec<MenuOption>, MenuError> {
        Ok(self.store.list_options(assigned_only).await?)
    }

    async fn get_option(&self, id: i32) -> Result<MenuOption, MenuError> {
        self.store
            .get_option(id)
            .await?
            .ok_or(MenuError::OptionNotFound(id))
    }

    async fn create_option(&self, description: &str) -> Result<MenuOption, MenuError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(MenuError::Validation(
                "Option description cannot be blank".to_string(),
            ));
        }

        let option = self.store.create_option(description).await?;
        info!(option_id = option.id, "Option created");
        Ok(option)
    }

    async fn list_menus(&self, filter: &MenuFilter) -> Result<Vec<Menu>, MenuError> {
        Ok(self.store.list_menus(filter).await?)
    }

    async fn get_menu(&self, id: i32) -> Result<Menu, MenuError> {
        self.store
            .get_menu(id)
            .await?
            .ok_or(MenuError::MenuNotFound(id))
    }

    async fn get_menu_for_date(&self, date: NaiveDate) -> Result<Menu, MenuError> {
        self.store
            .get_menu_by_date(date)
            .await?
            .ok_or(MenuError::NoMenuForDate(date))
    }

    async fn create_menu(&self, draft: MenuDraft) -> Result<Menu, MenuError> {
        let policy = self.policy().await;

        validate_name(&draft.name)?;
        validate_option_count(&draft.option_ids, &policy)?;

        let menu = self
            .store
            .create_menu(draft, policy.one_menu_per_day)
            .await?;

        metrics::counter!("dailymenu_menus_created_total").increment(1);
        info!(menu_id = menu.id, date = %menu.date, options = menu.options.len(), "Menu created");
        Ok(menu)
    }

    async fn update_menu(&self, id: i32, changes: MenuChanges) -> Result<Menu, MenuError> {
        // A missing menu reports 404 even when the payload is also invalid
        if self.store.get_menu(id).await?.is_none() {
            return Err(MenuError::MenuNotFound(id));
        }

        let policy = self.policy().await;

        if let Some(name) = &changes.name {
            validate_name(name)?;
        }
        if let Some(option_ids) = &changes.option_ids {
            validate_option_count(option_ids, &policy)?;
        }

        let menu = self
            .store
            .update_menu(id, changes, policy.one_menu_per_day)
            .await?;

        info!(menu_id = menu.id, "Menu updated");
        Ok(menu)
    }

    async fn delete_menu(&self, id: i32) -> Result<(), MenuError> {
        if !self.store.delete_menu(id).await? {
            return Err(MenuError::MenuNotFound(id));
        }

        info!(menu_id = id, "Menu deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Today's menu").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(MAX_MENU_NAME_LEN)).is_ok());
        assert!(validate_name(&"x".repeat(MAX_MENU_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_option_count_counts_distinct_ids() {
        let policy = MenuPolicyConfig {
            max_options: 2,
            min_options: 0,
            one_menu_per_day: true,
        };

        assert!(validate_option_count(&[], &policy).is_ok());
        assert!(validate_option_count(&[1, 1, 2, 2], &policy).is_ok());
        assert!(matches!(
            validate_option_count(&[1, 2, 3], &policy),
            Err(MenuError::Validation(_))
        ));
    }

    #[test]
    fn test_option_count_lower_bound() {
        let policy = MenuPolicyConfig {
            max_options: 4,
            min_options: 1,
            one_menu_per_day: false,
        };

        assert!(validate_option_count(&[], &policy).is_err());
        assert!(validate_option_count(&[5], &policy).is_ok());
    }
}
