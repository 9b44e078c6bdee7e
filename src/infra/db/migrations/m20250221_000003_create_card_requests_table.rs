//! Migration: Create the card_requests table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CardRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CardRequests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CardRequests::BranchName).string_len(255).not_null())
                    .col(ColumnDef::new(CardRequests::CardType).string_len(100).not_null())
                    .col(ColumnDef::new(CardRequests::Quantity).integer().not_null())
                    .col(
                        ColumnDef::new(CardRequests::DateRequested)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(CardRequests::Initiator).uuid().not_null())
                    .col(
                        ColumnDef::new(CardRequests::CardCharges)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CardRequests::Batch)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(CardRequests::Status)
                            .string_len(50)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(CardRequests::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CardRequests::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_card_requests_initiator")
                            .from(CardRequests::Table, CardRequests::Initiator)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CardRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CardRequests {
    Table,
    Id,
    BranchName,
    CardType,
    Quantity,
    DateRequested,
    Initiator,
    CardCharges,
    Batch,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
