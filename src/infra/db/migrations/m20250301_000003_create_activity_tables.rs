//! Migration: sales with line items, tasks, and both comment tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .col(
                        ColumnDef::new(Sales::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sales::CounterpartyId).integer().not_null())
                    .col(
                        ColumnDef::new(Sales::ResponsibleManagerId)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Sales::SaleDate).date().not_null())
                    .col(ColumnDef::new(Sales::Status).string().not_null())
                    .col(ColumnDef::new(Sales::DeferredPaymentDate).date().null())
                    .col(ColumnDef::new(Sales::ProjectId).integer().null())
                    .col(
                        ColumnDef::new(Sales::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Sales::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Sales::Table, Sales::CounterpartyId)
                            .to(Counterparties::Table, Counterparties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Sales::Table, Sales::ResponsibleManagerId)
                            .to(Managers::Table, Managers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Sales::Table, Sales::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SaleProducts::Table)
                    .col(
                        ColumnDef::new(SaleProducts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SaleProducts::SaleId).integer().not_null())
                    .col(ColumnDef::new(SaleProducts::ProductId).integer().not_null())
                    .col(
                        ColumnDef::new(SaleProducts::Quantity)
                            .decimal_len(12, 3)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SaleProducts::Table, SaleProducts::SaleId)
                            .to(Sales::Table, Sales::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SaleProducts::Table, SaleProducts::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sale_products_sale_id")
                    .table(SaleProducts::Table)
                    .col(SaleProducts::SaleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SaleServices::Table)
                    .col(
                        ColumnDef::new(SaleServices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SaleServices::SaleId).integer().not_null())
                    .col(ColumnDef::new(SaleServices::ServiceId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(SaleServices::Table, SaleServices::SaleId)
                            .to(Sales::Table, Sales::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SaleServices::Table, SaleServices::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sale_services_sale_id")
                    .table(SaleServices::Table)
                    .col(SaleServices::SaleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .col(
                        ColumnDef::new(Tasks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tasks::Title).string().not_null())
                    .col(ColumnDef::new(Tasks::Description).text().null())
                    .col(ColumnDef::new(Tasks::ResponsibleManagerId).integer().null())
                    .col(ColumnDef::new(Tasks::CreatorManagerId).integer().null())
                    .col(ColumnDef::new(Tasks::ProjectId).integer().null())
                    .col(ColumnDef::new(Tasks::SubprojectId).integer().null())
                    .col(ColumnDef::new(Tasks::DueDate).date().null())
                    .col(ColumnDef::new(Tasks::Status).string().not_null())
                    .col(
                        ColumnDef::new(Tasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tasks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tasks::Table, Tasks::ResponsibleManagerId)
                            .to(Managers::Table, Managers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tasks::Table, Tasks::CreatorManagerId)
                            .to(Managers::Table, Managers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tasks::Table, Tasks::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tasks::Table, Tasks::SubprojectId)
                            .to(Subprojects::Table, Subprojects::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectComments::Table)
                    .col(
                        ColumnDef::new(ProjectComments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProjectComments::ProjectId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectComments::AuthorManagerId)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(ProjectComments::Text).text().null())
                    .col(ColumnDef::new(ProjectComments::FileName).string().null())
                    .col(ColumnDef::new(ProjectComments::FileType).string().null())
                    .col(ColumnDef::new(ProjectComments::FileUrl).string().null())
                    .col(
                        ColumnDef::new(ProjectComments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProjectComments::Table, ProjectComments::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProjectComments::Table, ProjectComments::AuthorManagerId)
                            .to(Managers::Table, Managers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SubprojectComments::Table)
                    .col(
                        ColumnDef::new(SubprojectComments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SubprojectComments::SubprojectId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubprojectComments::AuthorManagerId)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(SubprojectComments::Text).text().null())
                    .col(ColumnDef::new(SubprojectComments::FileName).string().null())
                    .col(ColumnDef::new(SubprojectComments::FileType).string().null())
                    .col(ColumnDef::new(SubprojectComments::FileUrl).string().null())
                    .col(
                        ColumnDef::new(SubprojectComments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SubprojectComments::Table, SubprojectComments::SubprojectId)
                            .to(Subprojects::Table, Subprojects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                SubprojectComments::Table,
                                SubprojectComments::AuthorManagerId,
                            )
                            .to(Managers::Table, Managers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SubprojectComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SaleServices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SaleProducts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sales::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Sales {
    Table,
    Id,
    CounterpartyId,
    ResponsibleManagerId,
    SaleDate,
    Status,
    DeferredPaymentDate,
    ProjectId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum SaleProducts {
    Table,
    Id,
    SaleId,
    ProductId,
    Quantity,
}

#[derive(Iden)]
enum SaleServices {
    Table,
    Id,
    SaleId,
    ServiceId,
}

#[derive(Iden)]
enum Tasks {
    Table,
    Id,
    Title,
    Description,
    ResponsibleManagerId,
    CreatorManagerId,
    ProjectId,
    SubprojectId,
    DueDate,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ProjectComments {
    Table,
    Id,
    ProjectId,
    AuthorManagerId,
    Text,
    FileName,
    FileType,
    FileUrl,
    CreatedAt,
}

#[derive(Iden)]
enum SubprojectComments {
    Table,
    Id,
    SubprojectId,
    AuthorManagerId,
    Text,
    FileName,
    FileType,
    FileUrl,
    CreatedAt,
}

#[derive(Iden)]
enum Counterparties {
    Table,
    Id,
}

#[derive(Iden)]
enum Managers {
    Table,
    Id,
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
}

#[derive(Iden)]
enum Services {
    Table,
    Id,
}

#[derive(Iden)]
enum Subprojects {
    Table,
    Id,
}
