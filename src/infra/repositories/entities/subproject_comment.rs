//! Sub-project comment database entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subproject_comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub subproject_id: i32,
    pub author_manager_id: Option<i32>,
    pub text: Option<String>,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub file_url: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
