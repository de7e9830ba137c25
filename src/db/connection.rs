// Database Connection Pool
// Manages PostgreSQL and SQLite connection pools with sqlx

use crate::db::config::{DatabaseConfig, DatabaseType};
use crate::error::HubError;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Pool, Postgres, Row, Sqlite};
use std::str::FromStr;
use std::time::Duration;

/// QueryBuilder that handles placeholder syntax differences between databases.
/// PostgreSQL uses $1, $2, $3... while SQLite uses ?, ?, ?...
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    db_type: DatabaseType,
    param_count: usize,
}

impl QueryBuilder {
    /// Create a new query builder for the given database type
    pub fn new(db_type: DatabaseType) -> Self {
        Self {
            db_type,
            param_count: 0,
        }
    }

    /// Get the next placeholder for the current database type
    pub fn placeholder(&mut self) -> String {
        self.param_count += 1;
        match self.db_type {
            DatabaseType::Postgres => format!("${}", self.param_count),
            DatabaseType::Sqlite => "?".to_string(),
        }
    }

    /// Generate N placeholders separated by commas
    pub fn placeholders(&mut self, count: usize) -> String {
        (0..count)
            .map(|_| self.placeholder())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Reset the placeholder counter
    pub fn reset(&mut self) {
        self.param_count = 0;
    }

    /// Build an INSERT query with the correct placeholders
    pub fn insert_query(&mut self, table: &str, columns: &[&str]) -> String {
        self.reset();
        let cols = columns.join(", ");
        let placeholders = self.placeholders(columns.len());
        format!("INSERT INTO {} ({}) VALUES ({})", table, cols, placeholders)
    }

    /// Build an `UPDATE table SET a = ?, b = ? WHERE key = ?` query.
    /// The key placeholder comes last.
    pub fn update_query(&mut self, table: &str, columns: &[&str], key_col: &str) -> String {
        self.reset();
        let assignments = columns
            .iter()
            .map(|col| format!("{} = {}", col, self.placeholder()))
            .collect::<Vec<_>>()
            .join(", ");
        let key = self.placeholder();
        format!(
            "UPDATE {} SET {} WHERE {} = {}",
            table, assignments, key_col, key
        )
    }

    /// Build a SELECT query with WHERE clause
    pub fn select_where_query(&mut self, table: &str, columns: &str, where_col: &str) -> String {
        self.reset();
        let placeholder = self.placeholder();
        format!(
            "SELECT {} FROM {} WHERE {} = {}",
            columns, table, where_col, placeholder
        )
    }
}

/// Database pool enum supporting both PostgreSQL and SQLite
#[derive(Clone)]
pub enum DatabasePool {
    Postgres(Pool<Postgres>),
    Sqlite(Pool<Sqlite>),
}

/// Map a failed write, keeping UNIQUE violations distinguishable
fn write_error(e: sqlx::Error) -> HubError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => {
            HubError::UniqueViolation(db_err.message().to_string())
        }
        _ => HubError::DatabaseError(format!("Query failed: {}", e)),
    }
}

impl DatabasePool {
    /// Create a new database pool from configuration
    pub async fn new(config: &DatabaseConfig) -> crate::Result<Self> {
        let pool = match config.db_type {
            DatabaseType::Postgres => {
                let connection_string = config.connection_string()?;
                let max_connections = config.max_connections.unwrap_or(10);

                let pool = sqlx::postgres::PgPoolOptions::new()
                    .max_connections(max_connections)
                    .acquire_timeout(Duration::from_secs(30))
                    .connect(&connection_string)
                    .await
                    .map_err(|e| {
                        HubError::DatabaseError(format!("PostgreSQL connection failed: {}", e))
                    })?;

                DatabasePool::Postgres(pool)
            }
            DatabaseType::Sqlite => {
                let connection_string = config.connection_string()?;

                let connect_options =
                    sqlx::sqlite::SqliteConnectOptions::from_str(&connection_string)
                        .map_err(|e| {
                            HubError::DatabaseError(format!(
                                "Failed to parse SQLite connection string: {}",
                                e
                            ))
                        })?
                        .create_if_missing(true)
                        .foreign_keys(true);

                let pool = sqlx::sqlite::SqlitePoolOptions::new()
                    .max_connections(1) // SQLite is single-writer
                    .acquire_timeout(Duration::from_secs(30))
                    .connect_with(connect_options)
                    .await
                    .map_err(|e| {
                        HubError::DatabaseError(format!("SQLite connection failed: {}", e))
                    })?;

                DatabasePool::Sqlite(pool)
            }
        };

        Ok(pool)
    }

    /// Get database type
    pub fn db_type(&self) -> DatabaseType {
        match self {
            DatabasePool::Postgres(_) => DatabaseType::Postgres,
            DatabasePool::Sqlite(_) => DatabaseType::Sqlite,
        }
    }

    /// Close the connection pool
    pub async fn close(&self) {
        match self {
            DatabasePool::Postgres(pool) => pool.close().await,
            DatabasePool::Sqlite(pool) => pool.close().await,
        }
    }

    /// Create a QueryBuilder for this pool's database type
    pub fn query_builder(&self) -> QueryBuilder {
        QueryBuilder::new(self.db_type())
    }

    /// Round-trip a trivial query to verify the connection
    pub async fn ping(&self) -> crate::Result<()> {
        match self {
            DatabasePool::Postgres(pool) => {
                sqlx::query("SELECT 1").fetch_one(pool).await.map_err(|e| {
                    HubError::DatabaseError(format!("Database health check failed: {}", e))
                })?;
            }
            DatabasePool::Sqlite(pool) => {
                sqlx::query("SELECT 1").fetch_one(pool).await.map_err(|e| {
                    HubError::DatabaseError(format!("Database health check failed: {}", e))
                })?;
            }
        }
        Ok(())
    }

    /// Execute a statement and return the number of affected rows
    pub async fn execute(&self, query: &str, bindings: Vec<BindValue>) -> crate::Result<u64> {
        let affected = match self {
            DatabasePool::Postgres(pool) => {
                let mut q = sqlx::query(query);
                for binding in bindings {
                    q = binding.bind_postgres(q);
                }
                q.execute(pool).await.map_err(write_error)?.rows_affected()
            }
            DatabasePool::Sqlite(pool) => {
                let mut q = sqlx::query(query);
                for binding in bindings {
                    q = binding.bind_sqlite(q);
                }
                q.execute(pool).await.map_err(write_error)?.rows_affected()
            }
        };
        Ok(affected)
    }

    /// Execute a SELECT query and map every row into `T`
    pub async fn fetch_all_as<T>(&self, query: &str, bindings: Vec<BindValue>) -> crate::Result<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        match self {
            DatabasePool::Postgres(pool) => {
                let mut q = sqlx::query(query);
                for binding in bindings {
                    q = binding.bind_postgres(q);
                }
                let rows = q
                    .fetch_all(pool)
                    .await
                    .map_err(|e| HubError::DatabaseError(format!("Query failed: {}", e)))?;
                rows.iter()
                    .map(|row| <T as FromRow<'_, PgRow>>::from_row(row))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| HubError::DatabaseError(format!("Row decode failed: {}", e)).into())
            }
            DatabasePool::Sqlite(pool) => {
                let mut q = sqlx::query(query);
                for binding in bindings {
                    q = binding.bind_sqlite(q);
                }
                let rows = q
                    .fetch_all(pool)
                    .await
                    .map_err(|e| HubError::DatabaseError(format!("Query failed: {}", e)))?;
                rows.iter()
                    .map(|row| <T as FromRow<'_, SqliteRow>>::from_row(row))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| HubError::DatabaseError(format!("Row decode failed: {}", e)).into())
            }
        }
    }

    /// Execute a SELECT query and map the first row, if any, into `T`
    pub async fn fetch_optional_as<T>(
        &self,
        query: &str,
        bindings: Vec<BindValue>,
    ) -> crate::Result<Option<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        match self {
            DatabasePool::Postgres(pool) => {
                let mut q = sqlx::query(query);
                for binding in bindings {
                    q = binding.bind_postgres(q);
                }
                let row = q
                    .fetch_optional(pool)
                    .await
                    .map_err(|e| HubError::DatabaseError(format!("Query failed: {}", e)))?;
                row.as_ref()
                    .map(|row| <T as FromRow<'_, PgRow>>::from_row(row))
                    .transpose()
                    .map_err(|e| HubError::DatabaseError(format!("Row decode failed: {}", e)).into())
            }
            DatabasePool::Sqlite(pool) => {
                let mut q = sqlx::query(query);
                for binding in bindings {
                    q = binding.bind_sqlite(q);
                }
                let row = q
                    .fetch_optional(pool)
                    .await
                    .map_err(|e| HubError::DatabaseError(format!("Query failed: {}", e)))?;
                row.as_ref()
                    .map(|row| <T as FromRow<'_, SqliteRow>>::from_row(row))
                    .transpose()
                    .map_err(|e| HubError::DatabaseError(format!("Row decode failed: {}", e)).into())
            }
        }
    }

    /// Execute a query returning a single integer column (e.g. `COUNT(*)`)
    pub async fn fetch_count(&self, query: &str, bindings: Vec<BindValue>) -> crate::Result<i64> {
        match self {
            DatabasePool::Postgres(pool) => {
                let mut q = sqlx::query(query);
                for binding in bindings {
                    q = binding.bind_postgres(q);
                }
                let row = q
                    .fetch_one(pool)
                    .await
                    .map_err(|e| HubError::DatabaseError(format!("Query failed: {}", e)))?;
                Ok(row.get::<i64, _>(0))
            }
            DatabasePool::Sqlite(pool) => {
                let mut q = sqlx::query(query);
                for binding in bindings {
                    q = binding.bind_sqlite(q);
                }
                let row = q
                    .fetch_one(pool)
                    .await
                    .map_err(|e| HubError::DatabaseError(format!("Query failed: {}", e)))?;
                Ok(row.get::<i64, _>(0))
            }
        }
    }
}

/// Enum to hold different bind value types for database-agnostic query binding
#[derive(Debug, Clone)]
pub enum BindValue {
    Int64(i64),
    Int32(i32),
    String(String),
    Bool(bool),
    OptInt32(Option<i32>),
    OptString(Option<String>),
    DateTime(DateTime<Utc>),
    OptDateTime(Option<DateTime<Utc>>),
}

impl BindValue {
    /// Bind this value to a Postgres query
    fn bind_postgres<'q>(
        self,
        query: sqlx::query::Query<'q, Postgres, sqlx::postgres::PgArguments>,
    ) -> sqlx::query::Query<'q, Postgres, sqlx::postgres::PgArguments> {
        match self {
            BindValue::Int64(v) => query.bind(v),
            BindValue::Int32(v) => query.bind(v),
            BindValue::String(v) => query.bind(v),
            BindValue::Bool(v) => query.bind(v),
            BindValue::OptInt32(v) => query.bind(v),
            BindValue::OptString(v) => query.bind(v),
            BindValue::DateTime(v) => query.bind(v),
            BindValue::OptDateTime(v) => query.bind(v),
        }
    }

    /// Bind this value to a SQLite query
    fn bind_sqlite<'q>(
        self,
        query: sqlx::query::Query<'q, Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    ) -> sqlx::query::Query<'q, Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
        match self {
            BindValue::Int64(v) => query.bind(v),
            BindValue::Int32(v) => query.bind(v),
            BindValue::String(v) => query.bind(v),
            BindValue::Bool(v) => query.bind(v),
            BindValue::OptInt32(v) => query.bind(v),
            BindValue::OptString(v) => query.bind(v),
            BindValue::DateTime(v) => query.bind(v),
            BindValue::OptDateTime(v) => query.bind(v),
        }
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        BindValue::String(v.to_string())
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        BindValue::String(v)
    }
}

impl From<&String> for BindValue {
    fn from(v: &String) -> Self {
        BindValue::String(v.clone())
    }
}

impl From<Option<String>> for BindValue {
    fn from(v: Option<String>) -> Self {
        BindValue::OptString(v)
    }
}

impl From<&Option<String>> for BindValue {
    fn from(v: &Option<String>) -> Self {
        BindValue::OptString(v.clone())
    }
}

impl From<bool> for BindValue {
    fn from(v: bool) -> Self {
        BindValue::Bool(v)
    }
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        BindValue::Int64(v)
    }
}

impl From<i32> for BindValue {
    fn from(v: i32) -> Self {
        BindValue::Int32(v)
    }
}

impl From<Option<i32>> for BindValue {
    fn from(v: Option<i32>) -> Self {
        BindValue::OptInt32(v)
    }
}

impl From<DateTime<Utc>> for BindValue {
    fn from(v: DateTime<Utc>) -> Self {
        BindValue::DateTime(v)
    }
}

impl From<Option<DateTime<Utc>>> for BindValue {
    fn from(v: Option<DateTime<Utc>>) -> Self {
        BindValue::OptDateTime(v)
    }
}
