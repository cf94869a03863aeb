use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create ac_users table. Both mobile_number and email_address carry
        // unique indexes so duplicate checks happen in the store, not in a
        // read-then-write sequence in the handlers.
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Name))
                    .col(string(Users::MobileNumber).unique_key())
                    .col(string(Users::EmailAddress).unique_key())
                    .col(string(Users::Password))
                    .col(integer(Users::Active).default(0))
                    .col(string_len_null(Users::Otp, 8))
                    .col(string_null(Users::PasswordResetCode))
                    .col(integer(Users::Status).default(1))
                    .col(timestamp_with_time_zone(Users::CreatedAt))
                    .col(timestamp_with_time_zone(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "ac_users")]
    Table,
    Id,
    Name,
    MobileNumber,
    EmailAddress,
    Password,
    Active,
    Otp,
    PasswordResetCode,
    Status,
    CreatedAt,
    UpdatedAt,
}
