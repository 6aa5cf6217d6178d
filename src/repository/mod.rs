//! Repository layer for database operations
//!
//! Handlers never talk to a connection directly: they go through the
//! [`CatalogStore`] and [`EquipmentStore`] traits so the PostgreSQL
//! implementation can be swapped for the in-memory one.

pub mod catalog;
pub mod equipment;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        catalog::{CatalogEntry, CatalogKind},
        equipment::{Equipment, EquipmentChanges, EquipmentFilter, NewEquipment, Page},
        status::Status,
    },
};

/// Storage for one catalog table (`device_type` or `manufacturer`)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All rows ordered by id, optionally only the active ones
    async fn list(&self, active_only: bool) -> AppResult<Vec<CatalogEntry>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<CatalogEntry>>;

    /// Case-insensitive name lookup
    async fn get_by_name(&self, name: &str) -> AppResult<Option<CatalogEntry>>;

    /// Insert a new active row
    async fn insert(&self, name: &str) -> AppResult<CatalogEntry>;

    async fn update_name(&self, id: i32, name: &str) -> AppResult<()>;

    async fn update_status(&self, id: i32, status: Status) -> AppResult<()>;

    /// Hard delete. Not reachable from the HTTP surface.
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Storage for the `serial_numbers` table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquipmentStore: Send + Sync {
    /// Rows matching `filter`, ordered by `auto_id`
    async fn list(&self, filter: &EquipmentFilter, page: Page) -> AppResult<Vec<Equipment>>;

    async fn get_by_id(&self, auto_id: i32) -> AppResult<Option<Equipment>>;

    async fn get_by_serial_number(&self, serial_number: &str) -> AppResult<Option<Equipment>>;

    /// Insert a new active unit
    async fn insert(&self, data: &NewEquipment) -> AppResult<Equipment>;

    async fn update_serial_number(&self, auto_id: i32, serial_number: &str) -> AppResult<()>;

    /// Rewrite serial number, device type and manufacturer in one statement
    async fn update(&self, auto_id: i32, changes: &EquipmentChanges) -> AppResult<()>;

    async fn update_status(&self, auto_id: i32, status: Status) -> AppResult<()>;
}

/// Injected stores for the three tables
#[derive(Clone)]
pub struct Repository {
    pub device_types: Arc<dyn CatalogStore>,
    pub manufacturers: Arc<dyn CatalogStore>,
    pub equipment: Arc<dyn EquipmentStore>,
    pool: Option<Pool<Postgres>>,
}

impl Repository {
    /// Create a repository backed by the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            device_types: Arc::new(catalog::PgCatalogRepository::new(
                pool.clone(),
                CatalogKind::DeviceType,
            )),
            manufacturers: Arc::new(catalog::PgCatalogRepository::new(
                pool.clone(),
                CatalogKind::Manufacturer,
            )),
            equipment: Arc::new(equipment::PgEquipmentRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Create a repository over empty in-memory tables
    pub fn in_memory() -> Self {
        Self::from_stores(
            Arc::new(memory::MemoryCatalogStore::new(CatalogKind::DeviceType)),
            Arc::new(memory::MemoryCatalogStore::new(CatalogKind::Manufacturer)),
            Arc::new(memory::MemoryEquipmentStore::new()),
        )
    }

    pub fn from_stores(
        device_types: Arc<dyn CatalogStore>,
        manufacturers: Arc<dyn CatalogStore>,
        equipment: Arc<dyn EquipmentStore>,
    ) -> Self {
        Self {
            device_types,
            manufacturers,
            equipment,
            pool: None,
        }
    }

    /// Store for the given catalog kind
    pub fn catalog(&self, kind: CatalogKind) -> Arc<dyn CatalogStore> {
        match kind {
            CatalogKind::DeviceType => self.device_types.clone(),
            CatalogKind::Manufacturer => self.manufacturers.clone(),
        }
    }

    /// Check that the backing database answers
    pub async fn ping(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }
}
