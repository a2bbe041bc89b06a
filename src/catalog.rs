//! Read side of the directory: verified listings only.

use serde::Deserialize;

use crate::models::faucet::FaucetView;
use crate::store::{FaucetFilters, FaucetStore, StoreError};

/// Client-facing filter parameters. `token` matches `token_symbol`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CatalogQuery {
    pub token: Option<String>,
    pub network: Option<String>,
    pub status: Option<String>,
}

impl CatalogQuery {
    /// Empty values are treated the same as omitted ones.
    pub fn into_filters(self) -> FaucetFilters {
        FaucetFilters {
            token_symbol: non_empty(self.token),
            network: non_empty(self.network),
            status: non_empty(self.status),
        }
    }
}

pub async fn list_verified(
    store: &FaucetStore,
    query: CatalogQuery,
) -> Result<Vec<FaucetView>, StoreError> {
    let rows = store.query(&query.into_filters()).await?;
    Ok(rows.into_iter().map(FaucetView::from).collect())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
