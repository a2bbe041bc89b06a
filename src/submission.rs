//! Write side of the directory: untrusted submissions land unverified.

use std::fmt;

use sea_orm::DbErr;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use tracing::info;

use crate::store::{FaucetStore, NewFaucet, StoreError};

/// Fields a client may submit. `status` and `is_verified` keys in the body
/// are ignored.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FaucetSubmission {
    pub name: Option<String>,
    pub url: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub token_symbol: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub token_contract_address: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub network: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub payout_frequency: Option<String>,
}

/// Optional fields keep whatever scalar the client sent, rendered as text.
/// `null` maps to `None`; arrays and objects are rejected.
fn scalar_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number, boolean or null")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
            Ok(Some(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(ScalarVisitor)
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("faucet name and url are required")]
    Validation,
    #[error("faucet url has already been submitted")]
    Conflict,
    #[error("storage error: {0}")]
    Storage(DbErr),
}

impl From<StoreError> for SubmissionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => Self::Conflict,
            StoreError::Database(err) => Self::Storage(err),
        }
    }
}

impl FaucetSubmission {
    /// `name` and `url` must be present and non-empty. No trimming is applied.
    pub fn validate(self) -> Result<NewFaucet, SubmissionError> {
        let name = self.name.filter(|v| !v.is_empty());
        let url = self.url.filter(|v| !v.is_empty());
        let (Some(name), Some(url)) = (name, url) else {
            return Err(SubmissionError::Validation);
        };

        Ok(NewFaucet {
            name,
            url,
            token_symbol: self.token_symbol,
            token_contract_address: self.token_contract_address,
            network: self.network,
            payout_frequency: self.payout_frequency,
        })
    }
}

pub async fn submit(
    store: &FaucetStore,
    submission: FaucetSubmission,
) -> Result<i64, SubmissionError> {
    let faucet = submission.validate()?;
    let url = faucet.url.clone();
    let id = store.insert(faucet).await?;
    info!("Faucet submitted for review: {url} (id {id})");
    Ok(id)
}
