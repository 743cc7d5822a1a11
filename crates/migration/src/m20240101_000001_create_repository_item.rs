//! Create `repository_item` table.
//! Every entity type shares this table; properties live in a JSONB column.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RepositoryItem::Table)
                    .if_not_exists()
                    .col(pk_auto(RepositoryItem::Id))
                    .col(string_len(RepositoryItem::ItemType, 32).not_null())
                    .col(json_binary(RepositoryItem::Properties).not_null())
                    .col(timestamp_with_time_zone(RepositoryItem::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(RepositoryItem::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(RepositoryItem::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum RepositoryItem { Table, Id, ItemType, Properties, CreatedAt, UpdatedAt }
