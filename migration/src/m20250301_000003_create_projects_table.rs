use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `projects` table and its columns.
#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    OwnerId,
    ProjectName,
    Description,
    Location,
    LocationType,
    Budget,
    Timeline,
    CreatorTypes,
    Tags,
    ContactEmail,
    ContactLinkedin,
    ContactInstagram,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Projects::ProjectName).string().not_null())
                    .col(ColumnDef::new(Projects::Description).text().not_null())
                    .col(ColumnDef::new(Projects::Location).string().null())
                    .col(ColumnDef::new(Projects::LocationType).string().not_null())
                    .col(ColumnDef::new(Projects::Budget).string().not_null())
                    .col(ColumnDef::new(Projects::Timeline).string().not_null())
                    .col(ColumnDef::new(Projects::CreatorTypes).json_binary().not_null())
                    .col(ColumnDef::new(Projects::Tags).json_binary().not_null())
                    .col(ColumnDef::new(Projects::ContactEmail).string().null())
                    .col(ColumnDef::new(Projects::ContactLinkedin).string().null())
                    .col(ColumnDef::new(Projects::ContactInstagram).string().null())
                    .col(
                        ColumnDef::new(Projects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Projects::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_owner_id")
                            .from(Projects::Table, Projects::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}
