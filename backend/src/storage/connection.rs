use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool, Transaction};
use std::fmt;
use std::str::FromStr;
use tracing::info;

// The database URL for the production database
pub const DEFAULT_DATABASE_URL: &str = "sqlite:address_book.db";

/// Which tables the store defines.
///
/// `Flat` stores contacts only. `WithChildren` adds the `hobby` and `pet`
/// tables, each owned by a contact through a cascading foreign key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVariant {
    Flat,
    #[default]
    WithChildren,
}

impl SchemaVariant {
    pub fn has_children(self) -> bool {
        matches!(self, SchemaVariant::WithChildren)
    }

    /// Tables owned by this variant, children before their parent
    pub fn tables(self) -> &'static [&'static str] {
        match self {
            SchemaVariant::Flat => &["contact"],
            SchemaVariant::WithChildren => &["hobby", "pet", "contact"],
        }
    }
}

impl FromStr for SchemaVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "flat" => Ok(SchemaVariant::Flat),
            "with_children" => Ok(SchemaVariant::WithChildren),
            other => Err(anyhow::anyhow!(
                "unknown schema variant '{}' (expected 'flat' or 'with_children')",
                other
            )),
        }
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVariant::Flat => write!(f, "flat"),
            SchemaVariant::WithChildren => write!(f, "with_children"),
        }
    }
}

/// DbConnection owns the SQLite pool and the schema of the active variant
#[derive(Clone)]
pub struct DbConnection {
    pool: SqlitePool,
    variant: SchemaVariant,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str, variant: SchemaVariant) -> Result<Self> {
        Self::connect(url, variant, SqlitePoolOptions::new()).await
    }

    /// Open a private shared-cache in-memory database.
    ///
    /// The pool keeps one connection open for its whole lifetime so the
    /// database is not dropped when connections go idle.
    pub async fn init_in_memory(variant: SchemaVariant) -> Result<Self> {
        let db_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", db_id);

        let pool_options = SqlitePoolOptions::new()
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
        Self::connect(&db_url, variant, pool_options).await
    }

    async fn connect(url: &str, variant: SchemaVariant, pool_options: SqlitePoolOptions) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url)
                .await
                .with_context(|| format!("Failed to create database at {}", url))?;
        }

        // Cascading deletes depend on foreign key enforcement
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database url {}", url))?
            .foreign_keys(true);

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;

        Self::setup_schema(&pool, variant).await?;
        info!("Database ready at {} ({} schema)", url, variant);

        Ok(Self { pool, variant })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn variant(&self) -> SchemaVariant {
        self.variant
    }

    /// Start a transaction. Dropping it without `commit` rolls it back.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool, variant: SchemaVariant) -> Result<()> {
        // AUTOINCREMENT keeps ids from being reused after a delete
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contact (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                street TEXT,
                city TEXT,
                state TEXT,
                zip TEXT,
                phone TEXT,
                email TEXT,
                birthday TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_contact_name
            ON contact(last_name, first_name);
            "#,
        )
        .execute(pool)
        .await?;

        if !variant.has_children() {
            return Ok(());
        }

        for table in ["hobby", "pet"] {
            sqlx::query(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    contact_id INTEGER NOT NULL,
                    FOREIGN KEY (contact_id) REFERENCES contact (id) ON DELETE CASCADE
                );
                "#
            ))
            .execute(pool)
            .await?;

            sqlx::query(&format!(
                r#"
                CREATE INDEX IF NOT EXISTS idx_{table}_contact_id
                ON {table}(contact_id);
                "#
            ))
            .execute(pool)
            .await?;
        }

        Ok(())
    }
}
