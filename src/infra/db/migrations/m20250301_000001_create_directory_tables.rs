//! Migration: managers, supervision edges, counterparties, and the goods
//! catalog (units, warehouses, products, stock, services).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Managers::Table)
                    .col(
                        ColumnDef::new(Managers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Managers::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Managers::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Managers::FirstName).string().not_null())
                    .col(ColumnDef::new(Managers::LastName).string().not_null())
                    .col(ColumnDef::new(Managers::Role).string().not_null())
                    .col(
                        ColumnDef::new(Managers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Managers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ManagerSupervisors::Table)
                    .col(
                        ColumnDef::new(ManagerSupervisors::ManagerId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ManagerSupervisors::SupervisorId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ManagerSupervisors::ManagerId)
                            .col(ManagerSupervisors::SupervisorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ManagerSupervisors::Table, ManagerSupervisors::ManagerId)
                            .to(Managers::Table, Managers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ManagerSupervisors::Table, ManagerSupervisors::SupervisorId)
                            .to(Managers::Table, Managers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Counterparties::Table)
                    .col(
                        ColumnDef::new(Counterparties::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Counterparties::Name).string().not_null())
                    .col(ColumnDef::new(Counterparties::Kind).string().not_null())
                    .col(
                        ColumnDef::new(Counterparties::ResponsibleManagerId)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Counterparties::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Counterparties::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Counterparties::Table, Counterparties::ResponsibleManagerId)
                            .to(Managers::Table, Managers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Units::Table)
                    .col(
                        ColumnDef::new(Units::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Units::Name).string().not_null())
                    .col(ColumnDef::new(Units::Abbreviation).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Warehouses::Table)
                    .col(
                        ColumnDef::new(Warehouses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Warehouses::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .col(
                        ColumnDef::new(Products::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Name).string().not_null())
                    .col(
                        ColumnDef::new(Products::Price)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Products::UnitId).integer().null())
                    .col(
                        ColumnDef::new(Products::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Products::Table, Products::UnitId)
                            .to(Units::Table, Units::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductStocks::Table)
                    .col(ColumnDef::new(ProductStocks::ProductId).integer().not_null())
                    .col(
                        ColumnDef::new(ProductStocks::WarehouseId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductStocks::Quantity)
                            .decimal_len(12, 3)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ProductStocks::ProductId)
                            .col(ProductStocks::WarehouseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProductStocks::Table, ProductStocks::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProductStocks::Table, ProductStocks::WarehouseId)
                            .to(Warehouses::Table, Warehouses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .col(
                        ColumnDef::new(Services::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Services::Name).string().not_null())
                    .col(
                        ColumnDef::new(Services::Price)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Services::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Services::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductStocks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Warehouses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Units::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Counterparties::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ManagerSupervisors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Managers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Managers {
    Table,
    Id,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    Role,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ManagerSupervisors {
    Table,
    ManagerId,
    SupervisorId,
}

#[derive(Iden)]
enum Counterparties {
    Table,
    Id,
    Name,
    Kind,
    ResponsibleManagerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Units {
    Table,
    Id,
    Name,
    Abbreviation,
}

#[derive(Iden)]
enum Warehouses {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
    Name,
    Price,
    UnitId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ProductStocks {
    Table,
    ProductId,
    WarehouseId,
    Quantity,
}

#[derive(Iden)]
enum Services {
    Table,
    Id,
    Name,
    Price,
    CreatedAt,
    UpdatedAt,
}
