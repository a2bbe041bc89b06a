use serde::Serialize;

use crate::entities::faucet;

/// Wire shape of a catalog entry. `is_verified` keeps its persisted 0/1 form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaucetView {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub token_symbol: Option<String>,
    pub token_contract_address: Option<String>,
    pub network: Option<String>,
    pub payout_frequency: Option<String>,
    pub status: String,
    pub is_verified: u8,
    pub notes: Option<String>,
    pub date_added: String,
    pub last_updated: String,
}

impl From<faucet::Model> for FaucetView {
    fn from(model: faucet::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            url: model.url,
            token_symbol: model.token_symbol,
            token_contract_address: model.token_contract_address,
            network: model.network,
            payout_frequency: model.payout_frequency,
            status: model.status,
            is_verified: u8::from(model.is_verified),
            notes: model.notes,
            date_added: model.date_added,
            last_updated: model.last_updated,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FaucetListResponse {
    pub faucets: Vec<FaucetView>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub message: String,
    #[serde(rename = "faucetId")]
    pub faucet_id: i64,
}
