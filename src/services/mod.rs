//! Business logic services

pub mod catalog;
pub mod equipment;
pub mod input;
pub mod lookup;

use crate::{models::catalog::CatalogKind, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub lookup: lookup::LookupService,
    pub device_types: catalog::CatalogService,
    pub manufacturers: catalog::CatalogService,
    pub equipment: equipment::EquipmentService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        let lookup = lookup::LookupService::new(repository.clone());
        Self {
            device_types: catalog::CatalogService::new(
                CatalogKind::DeviceType,
                &repository,
                lookup.clone(),
            ),
            manufacturers: catalog::CatalogService::new(
                CatalogKind::Manufacturer,
                &repository,
                lookup.clone(),
            ),
            equipment: equipment::EquipmentService::new(&repository, lookup.clone()),
            lookup,
            repository,
        }
    }

    /// Service for the given catalog kind
    pub fn catalog(&self, kind: CatalogKind) -> &catalog::CatalogService {
        match kind {
            CatalogKind::DeviceType => &self.device_types,
            CatalogKind::Manufacturer => &self.manufacturers,
        }
    }

    /// Check that storage answers
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        self.repository.ping().await
    }
}
