use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::Role).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Users::Status)
                            .string_len(16)
                            .not_null()
                            .default("Active"),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Companies::Name).string().not_null())
                    .col(ColumnDef::new(Companies::Address).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Companies::ContactPerson)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Companies::ContactNo)
                            .string_len(64)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Companies::Email).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Companies::Status)
                            .string_len(16)
                            .not_null()
                            .default("Active"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Students::UserId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Students::StudentNo)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::Course).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Students::YearLevel)
                            .string_len(16)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Students::Section)
                            .string_len(64)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Students::ContactNo)
                            .string_len(64)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Students::Address).string().not_null().default(""))
                    .col(ColumnDef::new(Students::CompanyId).integer().null())
                    .col(
                        ColumnDef::new(Students::DeploymentStatus)
                            .string_len(32)
                            .not_null()
                            .default("Not Deployed"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_user")
                            .from(Students::Table, Students::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_company")
                            .from(Students::Table, Students::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OjtAdvisors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OjtAdvisors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OjtAdvisors::UserId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(OjtAdvisors::Department).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ojt_advisors_user")
                            .from(OjtAdvisors::Table, OjtAdvisors::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CompanyAdvisors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompanyAdvisors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CompanyAdvisors::UserId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(CompanyAdvisors::CompanyId).integer().null())
                    .col(ColumnDef::new(CompanyAdvisors::Position).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_advisors_user")
                            .from(CompanyAdvisors::Table, CompanyAdvisors::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_advisors_company")
                            .from(CompanyAdvisors::Table, CompanyAdvisors::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CompanyAdvisors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OjtAdvisors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    Name,
    Email,
    Password,
    Role,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Companies {
    Table,
    Id,
    Name,
    Address,
    ContactPerson,
    ContactNo,
    Email,
    Status,
}

#[derive(DeriveIden)]
pub enum Students {
    Table,
    Id,
    UserId,
    StudentNo,
    Course,
    YearLevel,
    Section,
    ContactNo,
    Address,
    CompanyId,
    DeploymentStatus,
}

#[derive(DeriveIden)]
pub enum OjtAdvisors {
    Table,
    Id,
    UserId,
    Department,
}

#[derive(DeriveIden)]
enum CompanyAdvisors {
    Table,
    Id,
    UserId,
    CompanyId,
    Position,
}
