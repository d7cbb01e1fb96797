//! Create `student` table.
//! Payment and location-change logs are stored as JSON arrays on the row.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(uuid(Student::RecordId).primary_key())
                    .col(string_null(Student::Id))
                    .col(string_null(Student::Name))
                    .col(string_null(Student::RollNo))
                    .col(string_null(Student::Address))
                    .col(string_null(Student::Email))
                    .col(string_null(Student::Phone))
                    .col(string_null(Student::ParentName))
                    .col(string_null(Student::StudentClass))
                    .col(date_null(Student::Dob))
                    .col(string_null(Student::Location))
                    .col(double_null(Student::AmountPaid))
                    .col(double_null(Student::TotalDue))
                    .col(string_null(Student::Status))
                    .col(timestamp_with_time_zone_null(Student::LastUpdated))
                    .col(json_binary(Student::Payments))
                    .col(json_binary(Student::LocationHistory))
                    .col(timestamp_with_time_zone_null(Student::ReportGenerated))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Student::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Student {
    Table,
    RecordId,
    Id,
    Name,
    RollNo,
    Address,
    Email,
    Phone,
    ParentName,
    StudentClass,
    Dob,
    Location,
    AmountPaid,
    TotalDue,
    Status,
    LastUpdated,
    Payments,
    LocationHistory,
    ReportGenerated,
}
