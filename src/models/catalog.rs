//! Device type and manufacturer models
//!
//! Both tables share one shape (`id`, `name`, `status`), so they share one
//! record type; [`CatalogKind`] tells them apart.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::status::Status;

/// Which catalog table a record or operation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    DeviceType,
    Manufacturer,
}

impl CatalogKind {
    pub fn table(&self) -> &'static str {
        match self {
            CatalogKind::DeviceType => "device_type",
            CatalogKind::Manufacturer => "manufacturer",
        }
    }

    /// Human label used in messages ("device type 3 ...")
    pub fn label(&self) -> &'static str {
        match self {
            CatalogKind::DeviceType => "device type",
            CatalogKind::Manufacturer => "manufacturer",
        }
    }

    /// Path segment under `/api/v1`
    pub fn resource(&self) -> &'static str {
        match self {
            CatalogKind::DeviceType => "device",
            CatalogKind::Manufacturer => "manufacturer",
        }
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Device type or manufacturer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CatalogEntry {
    pub id: i32,
    /// Unique under case-insensitive comparison
    pub name: String,
    pub status: Status,
}

/// Category of equipment (e.g. "computer")
pub type DeviceType = CatalogEntry;

/// Maker or brand of equipment (e.g. "Apple")
pub type Manufacturer = CatalogEntry;

/// List device types / manufacturers
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CatalogListQuery {
    /// Only return active records (default: false)
    pub active_only: Option<String>,
}

/// Create device type / manufacturer request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateCatalogEntry {
    pub name: Option<String>,
}

/// Partial update request; at least one field is required
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCatalogEntry {
    pub name: Option<String>,
    /// `active` or `inactive`
    pub status: Option<String>,
}
