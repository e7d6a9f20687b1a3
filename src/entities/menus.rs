use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "menus")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    pub date: Date,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::menu_options::Entity")]
    MenuOptions,
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
}

impl Related<super::menu_options::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuOptions.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::options::Entity> for Entity {
    fn to() -> RelationDef {
        super::menu_options::Relation::Options.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::menu_options::Relation::Menu.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
