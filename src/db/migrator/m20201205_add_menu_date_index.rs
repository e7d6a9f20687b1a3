use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Menu listings sort by date and the one-menu-per-day check filters on it
        manager
            .create_index(
                Index::create()
                    .name("idx_menus_date")
                    .table(Menus::Table)
                    .col(Menus::Date)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_menu_options_option_id")
                    .table(MenuOptions::Table)
                    .col(MenuOptions::OptionId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_menu_options_option_id")
                    .table(MenuOptions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_menus_date")
                    .table(Menus::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Menus {
    Table,
    Date,
}

#[derive(DeriveIden)]
enum MenuOptions {
    Table,
    OptionId,
}
