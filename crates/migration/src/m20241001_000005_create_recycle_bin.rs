//! Create `recycle_bin` table.
//! Each row keeps the full JSON state of a deleted student or location.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecycleBin::Table)
                    .if_not_exists()
                    .col(uuid(RecycleBin::RecordId).primary_key())
                    .col(string_len(RecycleBin::Kind, 16))
                    .col(json_binary(RecycleBin::Data))
                    .col(timestamp_with_time_zone(RecycleBin::DeletedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(RecycleBin::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum RecycleBin { Table, RecordId, Kind, Data, DeletedAt }
