use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_repository_item::RepositoryItem;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Every listing scans one item type
        manager
            .create_index(
                Index::create()
                    .name("idx_repository_item_type")
                    .table(RepositoryItem::Table)
                    .col(RepositoryItem::ItemType)
                    .col(RepositoryItem::Id)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_repository_item_type").table(RepositoryItem::Table).to_owned())
            .await
    }
}
