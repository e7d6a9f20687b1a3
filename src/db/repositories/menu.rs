use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait, sea_query::Query,
};

use crate::entities::{menu_options, menus, options, prelude::*};
use crate::models::menu::{Menu, MenuChanges, MenuDraft, MenuFilter, MenuOption, dedup_ids};
use crate::services::menu_service::MenuError;

pub struct MenuRepository {
    conn: DatabaseConnection,
}

impl MenuRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Menus newest date first, each with its options loaded.
    pub async fn list(&self, filter: &MenuFilter) -> Result<Vec<Menu>> {
        let mut query = Menus::find();

        if !filter.option_ids.is_empty() {
            query = query.filter(
                menus::Column::Id.in_subquery(
                    Query::select()
                        .column(menu_options::Column::MenuId)
                        .from(MenuOptions)
                        .and_where(menu_options::Column::OptionId.is_in(filter.option_ids.clone()))
                        .to_owned(),
                ),
            );
        }

        let rows = query
            .order_by_desc(menus::Column::Date)
            .order_by_desc(menus::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list menus")?;

        with_options(&self.conn, rows)
            .await
            .context("Failed to load menu options")
    }

    pub async fn get(&self, id: i32) -> Result<Option<Menu>> {
        let Some(row) = Menus::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query menu")?
        else {
            return Ok(None);
        };

        let mut loaded = with_options(&self.conn, vec![row])
            .await
            .context("Failed to load menu options")?;
        Ok(loaded.pop())
    }

    pub async fn get_by_date(&self, date: NaiveDate) -> Result<Option<Menu>> {
        let Some(row) = Menus::find()
            .filter(menus::Column::Date.eq(date))
            .order_by_asc(menus::Column::Id)
            .one(&self.conn)
            .await
            .context("Failed to query menu by date")?
        else {
            return Ok(None);
        };

        let mut loaded = with_options(&self.conn, vec![row])
            .await
            .context("Failed to load menu options")?;
        Ok(loaded.pop())
    }

    /// Insert a menu and its option links in one transaction.
    pub async fn create(&self, draft: MenuDraft, one_menu_per_day: bool) -> Result<Menu, MenuError> {
        let txn = self.conn.begin().await?;

        if one_menu_per_day {
            ensure_date_free(&txn, draft.date, None).await?;
        }

        let option_ids = dedup_ids(&draft.option_ids);
        ensure_options_exist(&txn, &option_ids).await?;

        let menu = menus::ActiveModel {
            name: Set(draft.name),
            date: Set(draft.date),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        link_options(&txn, menu.id, &option_ids).await?;

        let created = with_options(&txn, vec![menu])
            .await?
            .pop()
            .ok_or_else(|| MenuError::Internal("Failed to load created menu".to_string()))?;

        txn.commit().await?;
        Ok(created)
    }

    /// Apply changes in one transaction. A provided option list replaces the
    /// existing links rather than merging with them.
    pub async fn update(
        &self,
        id: i32,
        changes: MenuChanges,
        one_menu_per_day: bool,
    ) -> Result<Menu, MenuError> {
        let txn = self.conn.begin().await?;

        let existing = Menus::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(MenuError::MenuNotFound(id))?;

        if one_menu_per_day
            && let Some(date) = changes.date
            && date != existing.date
        {
            ensure_date_free(&txn, date, Some(id)).await?;
        }

        let current = existing.clone();
        let mut active: menus::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(date) = changes.date {
            active.date = Set(date);
        }

        let updated = if active.is_changed() {
            active.update(&txn).await?
        } else {
            current
        };

        if let Some(ids) = changes.option_ids {
            let option_ids = dedup_ids(&ids);
            ensure_options_exist(&txn, &option_ids).await?;

            MenuOptions::delete_many()
                .filter(menu_options::Column::MenuId.eq(id))
                .exec(&txn)
                .await?;

            link_options(&txn, id, &option_ids).await?;
        }

        let menu = with_options(&txn, vec![updated])
            .await?
            .pop()
            .ok_or_else(|| MenuError::Internal("Failed to load updated menu".to_string()))?;

        txn.commit().await?;
        Ok(menu)
    }

    /// Links and dependent orders go with the menu through the foreign key
    /// cascades; options are left alone.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Menus::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete menu")?;

        Ok(result.rows_affected > 0)
    }
}

async fn with_options<C: ConnectionTrait>(
    db: &C,
    rows: Vec<menus::Model>,
) -> Result<Vec<Menu>, DbErr> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = rows.iter().map(|m| m.id).collect();
    let links = MenuOptions::find()
        .filter(menu_options::Column::MenuId.is_in(ids))
        .find_also_related(Options)
        .order_by_asc(menu_options::Column::OptionId)
        .all(db)
        .await?;

    let mut by_menu: HashMap<i32, Vec<MenuOption>> = HashMap::new();
    for (link, option) in links {
        if let Some(option) = option {
            by_menu
                .entry(link.menu_id)
                .or_default()
                .push(MenuOption::from(option));
        }
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let options = by_menu.remove(&row.id).unwrap_or_default();
            Menu::from_parts(row, options)
        })
        .collect())
}

async fn ensure_date_free<C: ConnectionTrait>(
    db: &C,
    date: NaiveDate,
    exclude: Option<i32>,
) -> Result<(), MenuError> {
    let mut query = Menus::find().filter(menus::Column::Date.eq(date));
    if let Some(id) = exclude {
        query = query.filter(menus::Column::Id.ne(id));
    }

    if query.count(db).await? > 0 {
        return Err(MenuError::DateTaken(date));
    }
    Ok(())
}

async fn ensure_options_exist<C: ConnectionTrait>(db: &C, ids: &[i32]) -> Result<(), MenuError> {
    if ids.is_empty() {
        return Ok(());
    }

    let found: Vec<i32> = Options::find()
        .filter(options::Column::Id.is_in(ids.to_vec()))
        .all(db)
        .await?
        .into_iter()
        .map(|o| o.id)
        .collect();

    let missing: Vec<i32> = ids
        .iter()
        .copied()
        .filter(|id| !found.contains(id))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MenuError::UnknownOptions(missing))
    }
}

async fn link_options<C: ConnectionTrait>(
    db: &C,
    menu_id: i32,
    option_ids: &[i32],
) -> Result<(), DbErr> {
    if option_ids.is_empty() {
        return Ok(());
    }

    let rows: Vec<menu_options::ActiveModel> = option_ids
        .iter()
        .map(|option_id| menu_options::ActiveModel {
            menu_id: Set(menu_id),
            option_id: Set(*option_id),
        })
        .collect();

    MenuOptions::insert_many(rows)
        .exec_without_returning(db)
        .await?;

    Ok(())
}
