use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Student: natural key lookup (phone, dob). Not unique: restores may
        // legitimately bring back a second row for the same pair.
        manager
            .create_index(
                Index::create()
                    .name("idx_student_phone_dob")
                    .table(Student::Table)
                    .col(Student::Phone)
                    .col(Student::Dob)
                    .to_owned(),
            )
            .await?;

        // Location: external id lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_location_external_id")
                    .table(Location::Table)
                    .col(Location::Id)
                    .to_owned(),
            )
            .await?;

        // RecycleBin: listed newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_recycle_bin_deleted_at")
                    .table(RecycleBin::Table)
                    .col(RecycleBin::DeletedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_recycle_bin_deleted_at").table(RecycleBin::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_location_external_id").table(Location::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_student_phone_dob").table(Student::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Student { Table, Phone, Dob }

#[derive(DeriveIden)]
enum Location { Table, Id }

#[derive(DeriveIden)]
enum RecycleBin { Table, DeletedAt }
