use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Projects {
    Table,
    OwnerId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Claims {
    Table,
    CreatorId,
}

#[derive(DeriveIden)]
enum Portfolios {
    Table,
    IsPublished,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on projects.owner_id for the client dashboard
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_owner_id")
                    .table(Projects::Table)
                    .col(Projects::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Index on projects.created_at for newest-first browsing
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_created_at")
                    .table(Projects::Table)
                    .col(Projects::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index on claims.creator_id for the creator dashboard
        manager
            .create_index(
                Index::create()
                    .name("idx_claims_creator_id")
                    .table(Claims::Table)
                    .col(Claims::CreatorId)
                    .to_owned(),
            )
            .await?;

        // Index on portfolios.is_published for browsing
        manager
            .create_index(
                Index::create()
                    .name("idx_portfolios_is_published")
                    .table(Portfolios::Table)
                    .col(Portfolios::IsPublished)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_projects_owner_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_projects_created_at").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_claims_creator_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_portfolios_is_published").to_owned())
            .await?;

        Ok(())
    }
}
