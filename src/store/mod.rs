//! Persistence for faucet listings.
//!
//! A single SQLite connection is opened at startup and shared by every
//! request. The `faucets.url` unique index is the only serialization point
//! between concurrent submissions.

use chrono::Utc;
use migration::MigratorTrait;
use sea_orm::{
    ActiveValue, ColumnTrait, Condition, ConnectOptions, Database, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, SqlErr,
};

use crate::config::DatabaseConfig;
use crate::entities::faucet;

/// Status assigned to every freshly submitted listing.
pub const STATUS_UNDER_REVIEW: &str = "under_review";

/// Matches SQLite's `CURRENT_TIMESTAMP` rendering.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("faucet url already exists")]
    Conflict,
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl StoreError {
    /// The only place a backend error is classified as a duplicate url.
    /// `id` is assigned by SQLite, so a unique violation on insert can only
    /// come from the `url` index.
    fn from_insert(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict,
            _ => Self::Database(err),
        }
    }
}

/// Fields accepted for a new listing. Review state is not part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewFaucet {
    pub name: String,
    pub url: String,
    pub token_symbol: Option<String>,
    pub token_contract_address: Option<String>,
    pub network: Option<String>,
    pub payout_frequency: Option<String>,
}

/// Exact-match filters applied on top of `is_verified = true`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaucetFilters {
    pub token_symbol: Option<String>,
    pub network: Option<String>,
    pub status: Option<String>,
}

#[derive(Clone)]
pub struct FaucetStore {
    database: DatabaseConnection,
}

impl FaucetStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        Self::connect_url(&config.url()).await
    }

    pub async fn connect_url(url: &str) -> Result<Self, DbErr> {
        assert!(!url.is_empty(), "Database URL must be specified");
        let mut options = ConnectOptions::new(url.to_string());
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(true)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        let database = Database::connect(options).await?;
        Ok(Self { database })
    }

    /// Creates the `faucets` table when absent. Existing rows are untouched.
    pub async fn ensure_schema(&self) -> Result<(), DbErr> {
        migration::Migrator::up(&self.database, None).await
    }

    pub async fn insert(&self, faucet: NewFaucet) -> Result<i64, StoreError> {
        assert!(!faucet.name.is_empty(), "Faucet name must be validated");
        assert!(!faucet.url.is_empty(), "Faucet url must be validated");

        let now = Utc::now().format(TIMESTAMP_FORMAT).to_string();
        let model = faucet::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(faucet.name),
            url: ActiveValue::Set(faucet.url),
            token_symbol: ActiveValue::Set(faucet.token_symbol),
            token_contract_address: ActiveValue::Set(faucet.token_contract_address),
            network: ActiveValue::Set(faucet.network),
            payout_frequency: ActiveValue::Set(faucet.payout_frequency),
            status: ActiveValue::Set(STATUS_UNDER_REVIEW.to_string()),
            is_verified: ActiveValue::Set(false),
            notes: ActiveValue::Set(None),
            date_added: ActiveValue::Set(now.clone()),
            last_updated: ActiveValue::Set(now),
        };

        let inserted = faucet::Entity::insert(model)
            .exec(&self.database)
            .await
            .map_err(StoreError::from_insert)?;
        Ok(inserted.last_insert_id)
    }

    pub async fn query(&self, filters: &FaucetFilters) -> Result<Vec<faucet::Model>, StoreError> {
        let mut condition = Condition::all().add(faucet::Column::IsVerified.eq(true));
        if let Some(token_symbol) = filters.token_symbol.as_deref() {
            condition = condition.add(faucet::Column::TokenSymbol.eq(token_symbol));
        }
        if let Some(network) = filters.network.as_deref() {
            condition = condition.add(faucet::Column::Network.eq(network));
        }
        if let Some(status) = filters.status.as_deref() {
            condition = condition.add(faucet::Column::Status.eq(status));
        }

        let rows = faucet::Entity::find()
            .filter(condition)
            .order_by_asc(faucet::Column::Id)
            .all(&self.database)
            .await?;
        Ok(rows)
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        self.database.ping().await
    }

    pub async fn close(self) -> Result<(), DbErr> {
        self.database.close().await
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{all_rows, mark_verified, memory_store};
    use super::*;

    fn new_faucet(name: &str, url: &str) -> NewFaucet {
        NewFaucet {
            name: name.to_string(),
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids_and_review_state() {
        let store = memory_store().await;
        let first = store
            .insert(new_faucet("Alpha", "https://alpha.example"))
            .await
            .expect("first insert");
        let second = store
            .insert(new_faucet("Beta", "https://beta.example"))
            .await
            .expect("second insert");
        assert!(second > first);

        let rows = all_rows(&store).await;
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.status, STATUS_UNDER_REVIEW);
            assert!(!row.is_verified);
            assert_eq!(row.date_added, row.last_updated);
            assert!(row.notes.is_none());
        }
    }

    #[tokio::test]
    async fn duplicate_url_is_conflict() {
        let store = memory_store().await;
        store
            .insert(new_faucet("Alpha", "https://alpha.example"))
            .await
            .expect("first insert");
        let err = store
            .insert(new_faucet("Alpha again", "https://alpha.example"))
            .await
            .expect_err("duplicate rejected");
        assert!(matches!(err, StoreError::Conflict), "got {err:?}");
        assert_eq!(all_rows(&store).await.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_duplicate_inserts_admit_exactly_one() {
        let store = memory_store().await;
        let (left, right) = tokio::join!(
            store.insert(new_faucet("Left", "https://race.example")),
            store.insert(new_faucet("Right", "https://race.example")),
        );
        let outcomes = [left, right];
        let successes = outcomes.iter().filter(|r| r.is_ok()).count();
        let conflicts = outcomes
            .iter()
            .filter(|r| matches!(r, Err(StoreError::Conflict)))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(conflicts, 1);
    }

    #[tokio::test]
    async fn query_excludes_unverified_rows() {
        let store = memory_store().await;
        let hidden = store
            .insert(new_faucet("Hidden", "https://hidden.example"))
            .await
            .expect("insert");
        let shown = store
            .insert(new_faucet("Shown", "https://shown.example"))
            .await
            .expect("insert");
        mark_verified(&store, shown).await;

        let rows = store
            .query(&FaucetFilters::default())
            .await
            .expect("query succeeds");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, shown);
        assert!(rows.iter().all(|row| row.id != hidden));

        let filtered = store
            .query(&FaucetFilters {
                status: Some(STATUS_UNDER_REVIEW.to_string()),
                ..Default::default()
            })
            .await
            .expect("query succeeds");
        assert!(filtered.iter().all(|row| row.id != hidden));
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let store = memory_store().await;
        let id = store
            .insert(new_faucet("Alpha", "https://alpha.example"))
            .await
            .expect("insert");

        store.ensure_schema().await.expect("second run succeeds");

        let rows = all_rows(&store).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].name, "Alpha");
    }
}
