use sea_orm_migration::prelude::*;

mod m20201116_initial;
mod m20201205_add_menu_date_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20201116_initial::Migration),
            Box::new(m20201205_add_menu_date_index::Migration),
        ]
    }
}
