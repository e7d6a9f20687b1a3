use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::Query,
};

use crate::entities::{menu_options, options, prelude::*};
use crate::models::menu::MenuOption;

pub struct OptionRepository {
    conn: DatabaseConnection,
}

impl OptionRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All options, description descending. With `assigned_only` the result
    /// is narrowed to options linked to at least one menu; the subquery keeps
    /// each option to a single row.
    pub async fn list(&self, assigned_only: bool) -> Result<Vec<MenuOption>> {
        let mut query = Options::find();

        if assigned_only {
            query = query.filter(
                options::Column::Id.in_subquery(
                    Query::select()
                        .column(menu_options::Column::OptionId)
                        .from(MenuOptions)
                        .to_owned(),
                ),
            );
        }

        let rows = query
            .order_by_desc(options::Column::Description)
            .order_by_asc(options::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list options")?;

        Ok(rows.into_iter().map(MenuOption::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<MenuOption>> {
        let row = Options::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query option")?;

        Ok(row.map(MenuOption::from))
    }

    pub async fn create(&self, description: &str) -> Result<MenuOption> {
        let model = options::ActiveModel {
            description: Set(description.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert option")?;

        Ok(MenuOption::from(model))
    }
}
