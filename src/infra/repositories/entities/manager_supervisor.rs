//! Supervisor adjacency edge: `manager_id` reports to `supervisor_id`.
//!
//! Many-to-many, not a tree; a manager may have several supervisors.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "manager_supervisors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub manager_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub supervisor_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
