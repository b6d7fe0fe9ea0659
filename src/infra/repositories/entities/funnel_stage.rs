//! Funnel stage database entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "funnel_stages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub funnel_id: i32,
    pub name: String,
    /// Sort key within the funnel; values need not be contiguous
    #[sea_orm(column_name = "sort_order")]
    pub order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
