use sea_orm_migration::prelude::*;

use super::m20251020_000001_create_accounts_tables::{Students, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Requirements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Requirements::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Requirements::Name).string().not_null())
                    .col(
                        ColumnDef::new(Requirements::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Requirements::IsRequired)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Requirements::Slug)
                            .string_len(64)
                            .null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentRequirements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentRequirements::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentRequirements::StudentId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentRequirements::RequirementId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentRequirements::Status)
                            .string_len(16)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(StudentRequirements::FilePath).string().null())
                    .col(
                        ColumnDef::new(StudentRequirements::UploadedAt)
                            .timestamp()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentRequirements::SubmittedAt)
                            .timestamp()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentRequirements::VerifiedAt)
                            .timestamp()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentRequirements::VerifiedBy)
                            .integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_requirements_student")
                            .from(StudentRequirements::Table, StudentRequirements::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_requirements_requirement")
                            .from(
                                StudentRequirements::Table,
                                StudentRequirements::RequirementId,
                            )
                            .to(Requirements::Table, Requirements::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_requirements_verifier")
                            .from(StudentRequirements::Table, StudentRequirements::VerifiedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One tracking row per (student, requirement); materialization relies on it.
        manager
            .create_index(
                Index::create()
                    .name("uq_student_requirements_student_requirement")
                    .table(StudentRequirements::Table)
                    .col(StudentRequirements::StudentId)
                    .col(StudentRequirements::RequirementId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_requirements_requirement_id")
                    .table(StudentRequirements::Table)
                    .col(StudentRequirements::RequirementId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_student_requirements_requirement_id")
                    .table(StudentRequirements::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("uq_student_requirements_student_requirement")
                    .table(StudentRequirements::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(StudentRequirements::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Requirements::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Requirements {
    Table,
    Id,
    Name,
    Description,
    IsRequired,
    Slug,
}

#[derive(DeriveIden)]
enum StudentRequirements {
    Table,
    Id,
    StudentId,
    RequirementId,
    Status,
    FilePath,
    UploadedAt,
    SubmittedAt,
    VerifiedAt,
    VerifiedBy,
}
