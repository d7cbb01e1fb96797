//! Create `report` table (immutable billing snapshots).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(uuid(Report::RecordId).primary_key())
                    .col(string_null(Report::StudentId))
                    .col(string_null(Report::Phone))
                    .col(string_null(Report::Name))
                    .col(string_null(Report::RollNo))
                    .col(string_null(Report::StudentClass))
                    .col(string_null(Report::ParentName))
                    .col(string_null(Report::Address))
                    .col(string_null(Report::Location))
                    .col(double_null(Report::TotalDue))
                    .col(double_null(Report::AmountPaid))
                    .col(string_null(Report::Status))
                    .col(string_null(Report::Dob))
                    .col(timestamp_with_time_zone(Report::GeneratedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Report::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Report {
    Table,
    RecordId,
    StudentId,
    Phone,
    Name,
    RollNo,
    StudentClass,
    ParentName,
    Address,
    Location,
    TotalDue,
    AmountPaid,
    Status,
    Dob,
    GeneratedAt,
}
