use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmailVerificationCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmailVerificationCodes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EmailVerificationCodes::Email)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmailVerificationCodes::Code)
                            .string_len(6)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmailVerificationCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmailVerificationCodes::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmailVerificationCodes::Verified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // Serves the newest-matching lookup on redemption.
        manager
            .create_index(
                Index::create()
                    .table(EmailVerificationCodes::Table)
                    .col(EmailVerificationCodes::Email)
                    .col(EmailVerificationCodes::CreatedAt)
                    .name("idx_email_verification_codes_email_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(EmailVerificationCodes::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum EmailVerificationCodes {
    Table,
    Id,
    Email,
    Code,
    CreatedAt,
    ExpiresAt,
    Verified,
}
