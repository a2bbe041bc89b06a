use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::Expr;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Faucet listings; `url` uniqueness is the only structural invariant
        manager
            .create_table(
                Table::create()
                    .table(Faucets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Faucets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Faucets::Name).string().not_null())
                    .col(ColumnDef::new(Faucets::Url).string().not_null().unique_key())
                    .col(ColumnDef::new(Faucets::TokenSymbol).string().null())
                    .col(ColumnDef::new(Faucets::TokenContractAddress).string().null())
                    .col(ColumnDef::new(Faucets::Network).string().null())
                    .col(ColumnDef::new(Faucets::PayoutFrequency).string().null())
                    .col(
                        ColumnDef::new(Faucets::Status)
                            .string()
                            .not_null()
                            .default("under_review"),
                    )
                    .col(
                        ColumnDef::new(Faucets::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Faucets::Notes).string().null())
                    .col(
                        ColumnDef::new(Faucets::DateAdded)
                            .string()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Faucets::LastUpdated)
                            .string()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Faucets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Faucets {
    Table,
    Id,
    Name,
    Url,
    TokenSymbol,
    TokenContractAddress,
    Network,
    PayoutFrequency,
    Status,
    IsVerified,
    Notes,
    DateAdded,
    LastUpdated,
}
