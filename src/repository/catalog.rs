//! Device type and manufacturer repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::CatalogStore;
use crate::{
    error::{AppError, AppResult},
    models::{
        catalog::{CatalogEntry, CatalogKind},
        status::Status,
    },
};

/// PostgreSQL storage for one catalog table
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: Pool<Postgres>,
    kind: CatalogKind,
}

impl PgCatalogRepository {
    pub fn new(pool: Pool<Postgres>, kind: CatalogKind) -> Self {
        Self { pool, kind }
    }

    fn not_found(&self, id: i32) -> AppError {
        AppError::NotFound(format!("{} {} does not exist in database", self.kind, id))
    }
}

#[async_trait]
impl CatalogStore for PgCatalogRepository {
    async fn list(&self, active_only: bool) -> AppResult<Vec<CatalogEntry>> {
        let query = if active_only {
            format!(
                "SELECT id, name, status FROM {} WHERE status = 'active' ORDER BY id",
                self.kind.table()
            )
        } else {
            format!("SELECT id, name, status FROM {} ORDER BY id", self.kind.table())
        };
        let rows = sqlx::query_as::<_, CatalogEntry>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<CatalogEntry>> {
        let query = format!("SELECT id, name, status FROM {} WHERE id = $1", self.kind.table());
        let row = sqlx::query_as::<_, CatalogEntry>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Option<CatalogEntry>> {
        let query = format!(
            "SELECT id, name, status FROM {} WHERE LOWER(name) = LOWER($1) ORDER BY id LIMIT 1",
            self.kind.table()
        );
        let row = sqlx::query_as::<_, CatalogEntry>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, name: &str) -> AppResult<CatalogEntry> {
        let query = format!(
            "INSERT INTO {} (name, status) VALUES ($1, $2) RETURNING id, name, status",
            self.kind.table()
        );
        let row = sqlx::query_as::<_, CatalogEntry>(&query)
            .bind(name)
            .bind(Status::Active)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_name(&self, id: i32, name: &str) -> AppResult<()> {
        let query = format!("UPDATE {} SET name = $1 WHERE id = $2", self.kind.table());
        let result = sqlx::query(&query)
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(self.not_found(id));
        }
        Ok(())
    }

    async fn update_status(&self, id: i32, status: Status) -> AppResult<()> {
        let query = format!("UPDATE {} SET status = $1 WHERE id = $2", self.kind.table());
        let result = sqlx::query(&query)
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(self.not_found(id));
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let query = format!("DELETE FROM {} WHERE id = $1", self.kind.table());
        let result = sqlx::query(&query)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(self.not_found(id));
        }
        Ok(())
    }
}
