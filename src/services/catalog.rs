//! Device type and manufacturer service
//!
//! Both entities follow the same contract, so one service type is
//! instantiated once per [`CatalogKind`].

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{
        catalog::{CatalogEntry, CatalogKind},
        status::Status,
    },
    repository::{CatalogStore, Repository},
};

use super::{
    input::{optional_text, require_text},
    lookup::{Identifier, LookupService, Uniqueness},
};

#[derive(Clone)]
pub struct CatalogService {
    kind: CatalogKind,
    store: Arc<dyn CatalogStore>,
    lookup: LookupService,
}

impl CatalogService {
    pub fn new(kind: CatalogKind, repository: &Repository, lookup: LookupService) -> Self {
        Self {
            kind,
            store: repository.catalog(kind),
            lookup,
        }
    }

    /// All records ordered by id
    pub async fn list(&self, active_only: bool) -> AppResult<Vec<CatalogEntry>> {
        self.store.list(active_only).await
    }

    /// Get a record by id or name
    pub async fn get(&self, identifier: &Identifier) -> AppResult<CatalogEntry> {
        self.lookup.require(self.kind, identifier).await
    }

    /// Create a record; its name must be unused under case-insensitive comparison
    pub async fn create(&self, name: Option<&str>) -> AppResult<CatalogEntry> {
        let name = require_text("name", name)?.trim();

        if let Uniqueness::Duplicate(existing) = self
            .lookup
            .check_name_uniqueness(self.kind, name, None)
            .await?
        {
            return Err(AppError::Duplicate(format!(
                "{} already exists with name {}",
                self.kind, existing.name
            )));
        }

        let entry = self.store.insert(name).await?;
        tracing::info!("Created {} {} ({})", self.kind, entry.id, entry.name);
        Ok(entry)
    }

    /// Partial update. Every present field is validated before the first
    /// write; name and status are then written as separate statements.
    pub async fn update(
        &self,
        id: i32,
        name: Option<&str>,
        status: Option<&str>,
    ) -> AppResult<CatalogEntry> {
        let name = optional_text(name).map(str::trim);
        let status = optional_text(status);
        if name.is_none() && status.is_none() {
            return Err(AppError::MissingField(
                "at least one of name or status must be provided".to_string(),
            ));
        }

        let current = self.lookup.require(self.kind, &Identifier::Id(id)).await?;

        let status = status.map(str::parse::<Status>).transpose()?;

        if let Some(name) = name {
            if let Uniqueness::Duplicate(existing) = self
                .lookup
                .check_name_uniqueness(self.kind, name, Some(id))
                .await?
            {
                return Err(AppError::Duplicate(format!(
                    "{} already exists with name {}",
                    self.kind, existing.name
                )));
            }
        }

        if let Some(name) = name {
            if name != current.name {
                self.store.update_name(id, name).await?;
            }
        }
        if let Some(status) = status {
            self.store.update_status(id, status).await?;
        }
        tracing::info!("Updated {} {}", self.kind, id);

        self.lookup.require(self.kind, &Identifier::Id(id)).await
    }

    /// Name-only update
    pub async fn rename(&self, id: i32, name: Option<&str>) -> AppResult<CatalogEntry> {
        let name = require_text("name", name)?;
        self.update(id, Some(name), None).await
    }

    /// Status-only update
    pub async fn set_status(&self, id: i32, status: Option<&str>) -> AppResult<CatalogEntry> {
        let status = require_text("status", status)?;
        self.update(id, None, Some(status)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        memory::{MemoryCatalogStore, MemoryEquipmentStore},
        MockCatalogStore,
    };

    fn service(kind: CatalogKind) -> CatalogService {
        let repository = Repository::in_memory();
        let lookup = LookupService::new(repository.clone());
        CatalogService::new(kind, &repository, lookup)
    }

    fn service_over(store: MockCatalogStore) -> CatalogService {
        let repository = Repository::from_stores(
            Arc::new(store),
            Arc::new(MemoryCatalogStore::new(CatalogKind::Manufacturer)),
            Arc::new(MemoryEquipmentStore::new()),
        );
        let lookup = LookupService::new(repository.clone());
        CatalogService::new(CatalogKind::DeviceType, &repository, lookup)
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let devices = service(CatalogKind::DeviceType);
        let created = devices.create(Some("computer")).await.unwrap();
        assert_eq!(created.status, Status::Active);

        let all = devices.list(false).await.unwrap();
        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    async fn test_create_rejects_case_variant() {
        let manufacturers = service(CatalogKind::Manufacturer);
        manufacturers.create(Some("Apple")).await.unwrap();

        for variant in ["apple", "APPLE", "aPpLe"] {
            assert!(matches!(
                manufacturers.create(Some(variant)).await,
                Err(AppError::Duplicate(_))
            ));
        }
        assert_eq!(manufacturers.list(false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let devices = service(CatalogKind::DeviceType);
        assert!(matches!(
            devices.create(None).await,
            Err(AppError::MissingField(_))
        ));
        assert!(matches!(
            devices.create(Some("   ")).await,
            Err(AppError::MissingField(_))
        ));
    }

    #[tokio::test]
    async fn test_update_checks_in_order() {
        let devices = service(CatalogKind::DeviceType);
        assert!(matches!(
            devices.update(1, None, None).await,
            Err(AppError::MissingField(_))
        ));
        assert!(matches!(
            devices.update(1, Some("tablet"), None).await,
            Err(AppError::NotFound(_))
        ));

        let computer = devices.create(Some("computer")).await.unwrap();
        assert!(matches!(
            devices.update(computer.id, Some("laptop"), Some("garbage")).await,
            Err(AppError::InvalidEnum(_))
        ));
        // a rejected status leaves the name untouched too
        let unchanged = devices.get(&Identifier::Id(computer.id)).await.unwrap();
        assert_eq!(unchanged, computer);
    }

    #[tokio::test]
    async fn test_update_fields_independently() {
        let devices = service(CatalogKind::DeviceType);
        let computer = devices.create(Some("computer")).await.unwrap();

        let renamed = devices.update(computer.id, Some("laptop"), None).await.unwrap();
        assert_eq!(renamed.name, "laptop");
        assert_eq!(renamed.status, Status::Active);

        let retired = devices.set_status(computer.id, Some("inactive")).await.unwrap();
        assert_eq!(retired.name, "laptop");
        assert_eq!(retired.status, Status::Inactive);

        assert!(devices.list(true).await.unwrap().is_empty());
        assert_eq!(devices.list(false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rename_to_taken_name() {
        let devices = service(CatalogKind::DeviceType);
        devices.create(Some("computer")).await.unwrap();
        let tablet = devices.create(Some("tablet")).await.unwrap();

        assert!(matches!(
            devices.rename(tablet.id, Some("Computer")).await,
            Err(AppError::Duplicate(_))
        ));
        // changing only the case of its own name is fine
        let renamed = devices.rename(tablet.id, Some("Tablet")).await.unwrap();
        assert_eq!(renamed.name, "Tablet");
    }

    #[tokio::test]
    async fn test_get_by_name() {
        let devices = service(CatalogKind::DeviceType);
        let computer = devices.create(Some("computer")).await.unwrap();
        let found = devices
            .get(&Identifier::Name("Computer".into()))
            .await
            .unwrap();
        assert_eq!(found, computer);
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_retried() {
        let mut store = MockCatalogStore::new();
        store
            .expect_get_by_id()
            .times(1)
            .returning(|_| Err(AppError::StorageUnavailable("connection refused".into())));

        let devices = service_over(store);
        let err = devices.update(1, None, Some("inactive")).await.unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
    }

    #[tokio::test]
    async fn test_invalid_status_never_writes() {
        let mut store = MockCatalogStore::new();
        store.expect_get_by_id().returning(|id| {
            Ok(Some(CatalogEntry {
                id,
                name: "computer".into(),
                status: Status::Active,
            }))
        });
        store.expect_update_status().never();
        store.expect_update_name().never();

        let devices = service_over(store);
        assert!(matches!(
            devices.update(1, None, Some("retired")).await,
            Err(AppError::InvalidEnum(_))
        ));
    }
}
