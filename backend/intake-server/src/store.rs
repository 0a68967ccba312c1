use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use intake_auth::{
    AccessType, PermissionGrant, PermissionStore, PermissionStoreError, ResourceType,
    TemplateGrant,
};
use log::warn;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Permission store backed by a local sqlite database.
///
/// The grant tables are written by the administration tooling; this process
/// only reads them. Identity comparison is case-insensitive.
pub struct SqlitePermissionStore {
    pool: SqlitePool,
}

impl SqlitePermissionStore {
    pub async fn connect(path: &Path) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(
                SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                    .busy_timeout(std::time::Duration::from_secs(5)),
            )
            .await?;

        Self::ensure_schema(&pool).await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS permission_grants (
                identity TEXT NOT NULL,
                resource_type TEXT NOT NULL,
                resource_key TEXT NOT NULL,
                access_type TEXT NOT NULL
            )",
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS template_grants (
                identity TEXT NOT NULL,
                template_id TEXT NOT NULL,
                access_type TEXT NOT NULL
            )",
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_permission_grants_identity
             ON permission_grants (identity COLLATE NOCASE)",
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_template_grants_identity
             ON template_grants (identity COLLATE NOCASE)",
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

fn store_error(e: sqlx::Error) -> PermissionStoreError {
    PermissionStoreError {
        message: e.to_string(),
    }
}

#[async_trait]
impl PermissionStore for SqlitePermissionStore {
    async fn grants_for(
        &self,
        identity: &str,
    ) -> Result<Vec<PermissionGrant>, PermissionStoreError> {
        let rows = sqlx::query(
            "SELECT resource_type, resource_key, access_type
             FROM permission_grants
             WHERE identity = ?1 COLLATE NOCASE",
        )
        .bind(identity)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        let mut grants = Vec::with_capacity(rows.len());
        for row in rows {
            let type_str: String = row.get("resource_type");
            let access_str: String = row.get("access_type");

            // Closed enums: a row that does not parse is a data error,
            // not a new capability.
            let (Ok(resource_type), Ok(access_type)) = (
                ResourceType::from_str(&type_str),
                AccessType::from_str(&access_str),
            ) else {
                warn!(
                    "Skipping unparseable grant for '{}': {}:{}",
                    identity, type_str, access_str
                );
                continue;
            };

            grants.push(PermissionGrant {
                resource_type,
                resource_key: row.get("resource_key"),
                access_type,
            });
        }

        Ok(grants)
    }

    async fn template_grants_for(
        &self,
        identity: &str,
    ) -> Result<Vec<TemplateGrant>, PermissionStoreError> {
        let rows = sqlx::query(
            "SELECT template_id, access_type
             FROM template_grants
             WHERE identity = ?1 COLLATE NOCASE",
        )
        .bind(identity)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        let mut grants = Vec::with_capacity(rows.len());
        for row in rows {
            let access_str: String = row.get("access_type");

            let Ok(access_type) = AccessType::from_str(&access_str) else {
                warn!(
                    "Skipping unparseable template grant for '{}': {}",
                    identity, access_str
                );
                continue;
            };

            grants.push(TemplateGrant {
                template_id: row.get("template_id"),
                access_type,
            });
        }

        Ok(grants)
    }
}
