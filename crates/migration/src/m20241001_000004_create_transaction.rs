//! Create `transaction` table (append-only payment attempts).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transaction::Table)
                    .if_not_exists()
                    .col(uuid(Transaction::RecordId).primary_key())
                    .col(string_null(Transaction::PaymentId))
                    .col(string_null(Transaction::OrderId))
                    .col(string_null(Transaction::StudentId))
                    .col(string_null(Transaction::StudentName))
                    .col(double_null(Transaction::Amount))
                    .col(string_null(Transaction::Status))
                    .col(timestamp_with_time_zone(Transaction::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Transaction::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Transaction {
    Table,
    RecordId,
    PaymentId,
    OrderId,
    StudentId,
    StudentName,
    Amount,
    Status,
    CreatedAt,
}
