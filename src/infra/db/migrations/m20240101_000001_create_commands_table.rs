//! Migration: Create the commands table.

use sea_orm_migration::prelude::*;

use crate::config::PLATFORM_MAX_LENGTH;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Commands::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Commands::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Commands::HowTo).text().not_null())
                    .col(
                        ColumnDef::new(Commands::Platform)
                            .string_len(PLATFORM_MAX_LENGTH)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Commands::CommandLine).text().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Commands::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Commands {
    Table,
    Id,
    HowTo,
    Platform,
    CommandLine,
}
