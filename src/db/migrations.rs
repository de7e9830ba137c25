// Database Migrations
// Handles sqlx migrations for both PostgreSQL and SQLite

use crate::db::connection::DatabasePool;
use crate::error::HubError;
use sqlx::migrate::Migrator;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Run database migrations from the backend-specific directory
pub async fn run_migrations(pool: &DatabasePool, migrations_path: &Path) -> crate::Result<()> {
    if !migrations_path.exists() {
        return Err(HubError::DatabaseError(format!(
            "Migrations directory not found: {}",
            migrations_path.display()
        ))
        .into());
    }

    match pool {
        DatabasePool::Postgres(pg_pool) => {
            let migrator = Migrator::new(migrations_path).await.map_err(|e| {
                HubError::DatabaseError(format!("Failed to create migrator: {}", e))
            })?;

            migrator.run(pg_pool).await.map_err(|e| {
                HubError::DatabaseError(format!("PostgreSQL migration failed: {}", e))
            })?;
        }
        DatabasePool::Sqlite(sqlite_pool) => {
            run_sqlite_migrations_manual(sqlite_pool, migrations_path).await?;
        }
    }

    info!("Database migrations applied from {}", migrations_path.display());
    Ok(())
}

/// Parse the numeric version prefix of a migration file name
/// (`20250301000001_core_tables.sql` -> 20250301000001)
pub fn migration_version(filename: &str) -> Option<i64> {
    let digits: String = filename
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '_')
        .filter(|c| c.is_ascii_digit())
        .collect();

    digits.parse().ok()
}

/// Manually run SQLite migrations by executing SQL files directly
async fn run_sqlite_migrations_manual(
    pool: &sqlx::SqlitePool,
    migrations_path: &Path,
) -> crate::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS _sqlx_migrations (
            version BIGINT PRIMARY KEY,
            description TEXT NOT NULL,
            installed_on TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            success BOOLEAN NOT NULL,
            execution_time BIGINT NOT NULL,
            checksum BLOB NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| HubError::DatabaseError(format!("Failed to create migrations table: {}", e)))?;

    let mut migration_files: Vec<PathBuf> = fs::read_dir(migrations_path)
        .map_err(|e| {
            HubError::DatabaseError(format!("Failed to read migrations directory: {}", e))
        })?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "sql") {
                Some(path)
            } else {
                None
            }
        })
        .collect();

    migration_files.sort();

    for migration_file in migration_files {
        let filename = migration_file
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| HubError::DatabaseError("Invalid migration filename".to_string()))?
            .to_string();

        let version = migration_version(&filename).ok_or_else(|| {
            HubError::DatabaseError(format!(
                "Failed to parse migration version from {}",
                filename
            ))
        })?;

        let already_run: bool =
            sqlx::query_scalar("SELECT COUNT(*) > 0 FROM _sqlx_migrations WHERE version = ?")
                .bind(version)
                .fetch_one(pool)
                .await
                .map_err(|e| {
                    HubError::DatabaseError(format!("Failed to check migration status: {}", e))
                })?;

        if already_run {
            debug!("Skipping applied migration {}", filename);
            continue;
        }

        let sql_content = fs::read_to_string(&migration_file).map_err(|e| {
            HubError::DatabaseError(format!(
                "Failed to read migration file {}: {}",
                filename, e
            ))
        })?;

        let mut tx = pool.begin().await.map_err(|e| {
            HubError::DatabaseError(format!("Failed to start migration {}: {}", filename, e))
        })?;

        // Statements are separated by ';' (no triggers or procedures in these files)
        for statement in sql_content.split(';').filter(|s| !is_blank_sql(s)) {
            sqlx::query(statement).execute(&mut *tx).await.map_err(|e| {
                HubError::DatabaseError(format!(
                    "Failed to execute migration {}: {}",
                    filename, e
                ))
            })?;
        }

        let checksum_placeholder = vec![0u8; 16];
        sqlx::query(
            "INSERT INTO _sqlx_migrations (version, description, success, execution_time, checksum) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(version)
        .bind(&filename)
        .bind(true)
        .bind(0i64)
        .bind(&checksum_placeholder)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            HubError::DatabaseError(format!("Failed to record migration {}: {}", filename, e))
        })?;

        tx.commit().await.map_err(|e| {
            HubError::DatabaseError(format!("Failed to commit migration {}: {}", filename, e))
        })?;

        info!("Applied migration {}", filename);
    }

    Ok(())
}

/// True when a statement fragment holds only whitespace and `--` comments
fn is_blank_sql(fragment: &str) -> bool {
    fragment
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with("--"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::config::DatabaseConfig;

    #[test]
    fn test_migration_version() {
        assert_eq!(
            migration_version("20250301000001_core_tables.sql"),
            Some(20250301000001)
        );
        assert_eq!(migration_version("core_tables.sql"), None);
    }

    #[test]
    fn test_blank_sql_fragments() {
        assert!(is_blank_sql("\n  -- trailing comment\n"));
        assert!(!is_blank_sql("-- comment\nCREATE TABLE x (id TEXT)"));
    }

    #[tokio::test]
    async fn test_sqlite_migrations_are_idempotent() {
        let config = DatabaseConfig::sqlite(PathBuf::from(":memory:"));
        let pool = DatabasePool::new(&config).await.unwrap();
        let dir = config.backend_migrations_dir();

        run_migrations(&pool, &dir).await.unwrap();
        run_migrations(&pool, &dir).await.unwrap();

        let services = pool
            .fetch_count("SELECT COUNT(*) FROM services", vec![])
            .await
            .unwrap();
        assert_eq!(services, 0);

        pool.close().await;
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let config = DatabaseConfig::sqlite(PathBuf::from(":memory:"));
        let pool = DatabasePool::new(&config).await.unwrap();

        let err = run_migrations(&pool, Path::new("does/not/exist"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Migrations directory not found"));
    }
}
