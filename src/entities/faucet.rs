//! Faucet listing entity backing the public catalog.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "faucets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// Listing URL, unique across all rows
    #[sea_orm(unique)]
    pub url: String,
    pub token_symbol: Option<String>,
    pub token_contract_address: Option<String>,
    pub network: Option<String>,
    pub payout_frequency: Option<String>,
    /// Free-text review status, `under_review` on submission
    pub status: String,
    /// Stored as 0/1 by SQLite
    pub is_verified: bool,
    pub notes: Option<String>,
    pub date_added: String,
    pub last_updated: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
