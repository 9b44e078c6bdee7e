//! Migration: Create the card_profiles table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CardProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CardProfiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CardProfiles::CardName).string_len(255).not_null())
                    .col(ColumnDef::new(CardProfiles::Description).text())
                    .col(ColumnDef::new(CardProfiles::BinPrefix).string_len(10).not_null())
                    .col(ColumnDef::new(CardProfiles::CardScheme).string_len(50).not_null())
                    .col(ColumnDef::new(CardProfiles::Expiration).integer().not_null())
                    .col(ColumnDef::new(CardProfiles::Currency).string_len(10).not_null())
                    .col(ColumnDef::new(CardProfiles::BranchBlacklist).string_len(255))
                    .col(
                        ColumnDef::new(CardProfiles::Fees)
                            .json_binary()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(CardProfiles::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(CardProfiles::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CardProfiles::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_card_profiles_user_id")
                            .from(CardProfiles::Table, CardProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CardProfiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CardProfiles {
    Table,
    Id,
    CardName,
    Description,
    BinPrefix,
    CardScheme,
    Expiration,
    Currency,
    BranchBlacklist,
    Fees,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
