use crate::config::{Config, SecurityConfig};
use crate::models::menu::{Menu, MenuChanges, MenuDraft, MenuFilter, MenuOption};
use crate::models::order::{Order, OrderFilter};
use crate::services::menu_service::MenuError;
use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::user::{NewUser, User};

/// Process-wide handle on the database. Cheap to clone; every clone shares
/// the same connection pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn from_config(config: &Config) -> Result<Self> {
        Self::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every pooled connection to an in-memory SQLite URL opens its own
        // empty database, so the pool is pinned to one connection.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        // Recycling the only connection would drop an in-memory database.
        if !in_memory {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn token_repo(&self) -> repositories::token::TokenRepository {
        repositories::token::TokenRepository::new(self.conn.clone())
    }

    fn option_repo(&self) -> repositories::options::OptionRepository {
        repositories::options::OptionRepository::new(self.conn.clone())
    }

    fn menu_repo(&self) -> repositories::menu::MenuRepository {
        repositories::menu::MenuRepository::new(self.conn.clone())
    }

    fn order_repo(&self) -> repositories::order::OrderRepository {
        repositories::order::OrderRepository::new(self.conn.clone())
    }

    // Users & tokens

    pub async fn create_user(&self, user: NewUser) -> Result<User> {
        self.user_repo().create(user).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn get_user_with_password(&self, email: &str) -> Result<Option<(User, String)>> {
        self.user_repo().get_by_email_with_password(email).await
    }

    pub async fn update_user_profile(
        &self,
        id: i32,
        name: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Option<User>> {
        self.user_repo()
            .update_profile(id, name, password_hash)
            .await
    }

    pub async fn set_user_active(&self, email: &str, active: bool) -> Result<Option<User>> {
        self.user_repo().set_active(email, active).await
    }

    pub async fn touch_last_login(&self, id: i32) -> Result<()> {
        self.user_repo().touch_last_login(id).await
    }

    pub async fn get_or_create_token(&self, user_id: i32) -> Result<String> {
        self.token_repo().get_or_create(user_id).await
    }

    pub async fn get_user_by_token(&self, key: &str) -> Result<Option<User>> {
        self.token_repo().find_user(key).await
    }

    pub async fn revoke_token(&self, user_id: i32) -> Result<bool> {
        self.token_repo().revoke(user_id).await
    }

    // Options

    pub async fn list_options(&self, assigned_only: bool) -> Result<Vec<MenuOption>> {
        self.option_repo().list(assigned_only).await
    }

    pub async fn get_option(&self, id: i32) -> Result<Option<MenuOption>> {
        self.option_repo().get(id).await
    }

    pub async fn create_option(&self, description: &str) -> Result<MenuOption> {
        self.option_repo().create(description).await
    }

    // Menus

    pub async fn list_menus(&self, filter: &MenuFilter) -> Result<Vec<Menu>> {
        self.menu_repo().list(filter).await
    }

    pub async fn get_menu(&self, id: i32) -> Result<Option<Menu>> {
        self.menu_repo().get(id).await
    }

    pub async fn get_menu_by_date(&self, date: NaiveDate) -> Result<Option<Menu>> {
        self.menu_repo().get_by_date(date).await
    }

    pub async fn create_menu(
        &self,
        draft: MenuDraft,
        one_menu_per_day: bool,
    ) -> Result<Menu, MenuError> {
        self.menu_repo().create(draft, one_menu_per_day).await
    }

    pub async fn update_menu(
        &self,
        id: i32,
        changes: MenuChanges,
        one_menu_per_day: bool,
    ) -> Result<Menu, MenuError> {
        self.menu_repo()
            .update(id, changes, one_menu_per_day)
            .await
    }

    pub async fn delete_menu(&self, id: i32) -> Result<bool> {
        self.menu_repo().delete(id).await
    }

    // Orders

    pub async fn create_order(
        &self,
        user_id: i32,
        menu_id: i32,
        observation: &str,
    ) -> Result<Option<Order>> {
        self.order_repo()
            .create(user_id, menu_id, observation)
            .await
    }

    pub async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<Order>> {
        self.order_repo().list(filter).await
    }
}

/// Whether a store error was caused by a unique constraint, for example a
/// second row with the same email.
#[must_use]
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause.downcast_ref::<DbErr>().is_some_and(|db_err| {
            matches!(db_err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        })
    })
}

/// Hash on the blocking pool; Argon2 is deliberately slow.
pub async fn hash_password_blocking(password: &str, config: &SecurityConfig) -> Result<String> {
    let password = password.to_string();
    let config = config.clone();
    tokio::task::spawn_blocking(move || repositories::user::hash_password(&password, Some(&config)))
        .await
        .map_err(|e| anyhow::anyhow!("Password hashing task panicked: {e}"))?
}

pub async fn verify_password_blocking(password: &str, password_hash: &str) -> Result<bool> {
    let password = password.to_string();
    let password_hash = password_hash.to_string();
    tokio::task::spawn_blocking(move || {
        repositories::user::verify_password(&password, &password_hash)
    })
    .await
    .map_err(|e| anyhow::anyhow!("Password verification task panicked: {e}"))?
}
