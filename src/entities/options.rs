use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "options")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::menu_options::Entity")]
    MenuOptions,
}

impl Related<super::menu_options::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuOptions.def()
    }
}

impl Related<super::menus::Entity> for Entity {
    fn to() -> RelationDef {
        super::menu_options::Relation::Menu.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::menu_options::Relation::Options.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
