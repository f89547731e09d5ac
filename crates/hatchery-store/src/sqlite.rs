//! Embedded `SQLite` store.
//!
//! The collection lives in a single local database file. Uses [`sqlx`] with
//! runtime query construction (not compile-time checked) so no database is
//! needed at build time. All queries are parameterized.

use core::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use hatchery_economy::UNMAPPED_RARITY;
use hatchery_types::{Creature, CreatureId, CreatureStatus, Evolution, ImagePayload, Rarity};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StoreError;
use crate::store::CreatureStore;

/// Default maximum number of connections in the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 4;

/// Default connection timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default balance seeded into a fresh wallet.
const DEFAULT_STARTING_BALANCE: u64 = 100;

/// Configuration for the `SQLite` store.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// `SQLite` connection URL.
    ///
    /// Format: `sqlite://path/to/hatchery.db` or `sqlite::memory:`
    pub url: String,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Balance written when the wallet row does not exist yet.
    pub starting_balance: u64,
}

impl SqliteConfig {
    /// Create a new configuration from a database URL.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_owned(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            starting_balance: DEFAULT_STARTING_BALANCE,
        }
    }

    /// Configuration for a private in-memory database.
    ///
    /// Limited to one connection: every `SQLite` memory connection is its
    /// own database.
    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:").with_max_connections(1)
    }

    /// Set the maximum number of connections.
    #[must_use]
    pub const fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the balance seeded into a fresh wallet.
    #[must_use]
    pub const fn with_starting_balance(mut self, balance: u64) -> Self {
        self.starting_balance = balance;
        self
    }
}

/// Handle to the embedded `SQLite` database.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database, run migrations, and seed
    /// the wallet with the starting balance if it has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the URL cannot be parsed.
    /// Returns [`StoreError::Sqlite`] or [`StoreError::Migration`] if the
    /// database cannot be opened or migrated.
    pub async fn open(config: &SqliteConfig) -> Result<Self, StoreError> {
        let connect_options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| StoreError::Config(format!("Invalid database URL: {e}")))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout)
            .connect_with(connect_options)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        store.seed_wallet(config.starting_balance).await?;

        tracing::info!(
            url = config.url,
            max_connections = config.max_connections,
            "Opened SQLite store"
        );

        Ok(store)
    }

    /// Run all pending migrations from the `migrations/` directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Migration`] if any migration fails.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::debug!("SQLite migrations completed");
        Ok(())
    }

    /// Return a reference to the underlying [`SqlitePool`].
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close all connections in the pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("SQLite pool closed");
    }

    async fn seed_wallet(&self, starting_balance: u64) -> Result<(), StoreError> {
        let balance = balance_to_db(starting_balance)?;
        sqlx::query("INSERT OR IGNORE INTO wallet (id, balance) VALUES (1, ?1)")
            .bind(balance)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

impl CreatureStore for SqliteStore {
    async fn get_all_creatures(&self) -> Result<Vec<Creature>, StoreError> {
        let rows = sqlx::query_as::<_, CreatureRow>(
            r"SELECT id, name, rarity, status, description, image, created_at, evolution
              FROM creatures
              ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Creature::try_from).collect()
    }

    async fn add_creature(&self, creature: &Creature) -> Result<(), StoreError> {
        let image = serde_json::to_string(&creature.image)?;
        let evolution = creature
            .evolution
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r"INSERT INTO creatures (id, name, rarity, status, description, image, created_at, evolution)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(creature.id.to_string())
        .bind(&creature.name)
        .bind(creature.rarity.label())
        .bind(creature.status.label())
        .bind(&creature.description)
        .bind(image)
        .bind(creature.created_at)
        .bind(evolution)
        .execute(&self.pool)
        .await?;

        tracing::debug!(creature_id = %creature.id, "Inserted creature");
        Ok(())
    }

    async fn update_creature(&self, creature: &Creature) -> Result<(), StoreError> {
        let image = serde_json::to_string(&creature.image)?;
        let evolution = creature
            .evolution
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let result = sqlx::query(
            r"UPDATE creatures
              SET name = ?2, rarity = ?3, status = ?4, description = ?5,
                  image = ?6, created_at = ?7, evolution = ?8
              WHERE id = ?1",
        )
        .bind(creature.id.to_string())
        .bind(&creature.name)
        .bind(creature.rarity.label())
        .bind(creature.status.label())
        .bind(&creature.description)
        .bind(image)
        .bind(creature.created_at)
        .bind(evolution)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(creature.id));
        }

        tracing::debug!(creature_id = %creature.id, "Updated creature");
        Ok(())
    }

    async fn get_balance(&self) -> Result<u64, StoreError> {
        let balance: Option<i64> = sqlx::query_scalar("SELECT balance FROM wallet WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;

        let balance = balance.ok_or_else(|| StoreError::Corrupt("wallet row missing".to_owned()))?;
        u64::try_from(balance)
            .map_err(|e| StoreError::Corrupt(format!("negative balance {balance}: {e}")))
    }

    async fn set_balance(&self, balance: u64) -> Result<(), StoreError> {
        let value = balance_to_db(balance)?;
        sqlx::query(
            r"INSERT INTO wallet (id, balance) VALUES (1, ?1)
              ON CONFLICT (id) DO UPDATE SET balance = excluded.balance",
        )
        .bind(value)
        .execute(&self.pool)
        .await?;

        tracing::debug!(balance, "Persisted balance");
        Ok(())
    }
}

/// `SQLite` integers are signed; reject balances that do not fit.
fn balance_to_db(balance: u64) -> Result<i64, StoreError> {
    i64::try_from(balance)
        .map_err(|e| StoreError::Config(format!("balance {balance} out of range: {e}")))
}

// =============================================================================
// Row types
// =============================================================================

/// A row from the `creatures` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct CreatureRow {
    id: String,
    name: String,
    rarity: String,
    status: String,
    description: String,
    image: String,
    created_at: DateTime<Utc>,
    evolution: Option<String>,
}

impl TryFrom<CreatureRow> for Creature {
    type Error = StoreError;

    fn try_from(row: CreatureRow) -> Result<Self, Self::Error> {
        let id = CreatureId::from_str(&row.id)
            .map_err(|e| StoreError::Corrupt(format!("creature id {:?}: {e}", row.id)))?;
        // Legacy rows may carry labels outside the tier list.
        let rarity = Rarity::from_str(&row.rarity).unwrap_or_else(|e| {
            tracing::warn!(creature_id = %id, error = %e, "unmapped rarity label");
            UNMAPPED_RARITY
        });
        let status = CreatureStatus::from_str(&row.status)
            .map_err(|e| StoreError::Corrupt(format!("creature {id}: {e}")))?;
        let image: ImagePayload = serde_json::from_str(&row.image)?;
        let evolution: Option<Evolution> = row
            .evolution
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(Self {
            id,
            name: row.name,
            rarity,
            status,
            description: row.description,
            image,
            created_at: row.created_at,
            evolution,
        })
    }
}
