//! Migration: funnels, stages, projects with their co-owner and service
//! join tables, sub-project statuses, and sub-projects.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Funnels::Table)
                    .col(
                        ColumnDef::new(Funnels::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Funnels::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FunnelStages::Table)
                    .col(
                        ColumnDef::new(FunnelStages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FunnelStages::FunnelId).integer().not_null())
                    .col(ColumnDef::new(FunnelStages::Name).string().not_null())
                    .col(ColumnDef::new(FunnelStages::SortOrder).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(FunnelStages::Table, FunnelStages::FunnelId)
                            .to(Funnels::Table, Funnels::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_funnel_stages_funnel_id")
                    .table(FunnelStages::Table)
                    .col(FunnelStages::FunnelId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .col(
                        ColumnDef::new(Projects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::Name).string().not_null())
                    .col(
                        ColumnDef::new(Projects::ForecastAmount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Projects::CounterpartyId).integer().null())
                    .col(
                        ColumnDef::new(Projects::MainResponsibleManagerId)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Projects::FunnelId).integer().null())
                    .col(ColumnDef::new(Projects::FunnelStageId).integer().null())
                    .col(
                        ColumnDef::new(Projects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Projects::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Projects::Table, Projects::CounterpartyId)
                            .to(Counterparties::Table, Counterparties::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Projects::Table, Projects::MainResponsibleManagerId)
                            .to(Managers::Table, Managers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Projects::Table, Projects::FunnelId)
                            .to(Funnels::Table, Funnels::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Projects::Table, Projects::FunnelStageId)
                            .to(FunnelStages::Table, FunnelStages::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectManagers::Table)
                    .col(
                        ColumnDef::new(ProjectManagers::ProjectId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectManagers::ManagerId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ProjectManagers::ProjectId)
                            .col(ProjectManagers::ManagerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProjectManagers::Table, ProjectManagers::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProjectManagers::Table, ProjectManagers::ManagerId)
                            .to(Managers::Table, Managers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectServices::Table)
                    .col(
                        ColumnDef::new(ProjectServices::ProjectId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectServices::ServiceId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectServices::Quantity)
                            .decimal_len(12, 3)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ProjectServices::ProjectId)
                            .col(ProjectServices::ServiceId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProjectServices::Table, ProjectServices::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProjectServices::Table, ProjectServices::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SubprojectStatuses::Table)
                    .col(
                        ColumnDef::new(SubprojectStatuses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SubprojectStatuses::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subprojects::Table)
                    .col(
                        ColumnDef::new(Subprojects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subprojects::Name).string().not_null())
                    .col(
                        ColumnDef::new(Subprojects::Cost)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Subprojects::Status).string().not_null())
                    .col(ColumnDef::new(Subprojects::ProjectId).integer().not_null())
                    .col(
                        ColumnDef::new(Subprojects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Subprojects::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Subprojects::Table, Subprojects::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subprojects_project_id")
                    .table(Subprojects::Table)
                    .col(Subprojects::ProjectId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subprojects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubprojectStatuses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectServices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectManagers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FunnelStages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Funnels::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Funnels {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum FunnelStages {
    Table,
    Id,
    FunnelId,
    Name,
    SortOrder,
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
    Name,
    ForecastAmount,
    CounterpartyId,
    MainResponsibleManagerId,
    FunnelId,
    FunnelStageId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ProjectManagers {
    Table,
    ProjectId,
    ManagerId,
}

#[derive(Iden)]
enum ProjectServices {
    Table,
    ProjectId,
    ServiceId,
    Quantity,
}

#[derive(Iden)]
enum SubprojectStatuses {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Subprojects {
    Table,
    Id,
    Name,
    Cost,
    Status,
    ProjectId,
    CreatedAt,
    UpdatedAt,
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
enum Services {
    Table,
    Id,
}
