use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScanCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScanCodes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScanCodes::Payload).text().not_null())
                    .col(ColumnDef::new(ScanCodes::MaxScans).integer().not_null())
                    .col(
                        ColumnDef::new(ScanCodes::ScanCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ScanCodes::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScanCodes::Status).string_len(16).not_null())
                    .col(ColumnDef::new(ScanCodes::InactiveReason).string_len(16))
                    .col(
                        ColumnDef::new(ScanCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .check(Expr::col(ScanCodes::MaxScans).gt(0))
                    .check(Expr::col(ScanCodes::ScanCount).gte(0))
                    .check(Expr::col(ScanCodes::ScanCount).lte(Expr::col(ScanCodes::MaxScans)))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScanCodes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ScanCodes {
    Table,
    Id,
    Payload,
    MaxScans,
    ScanCount,
    ExpiresAt,
    Status,
    InactiveReason,
    CreatedAt,
}
