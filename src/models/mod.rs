//! Data models for the equipment inventory

pub mod catalog;
pub mod equipment;
pub mod status;

// Re-export commonly used types
pub use catalog::{CatalogEntry, CatalogKind, DeviceType, Manufacturer};
pub use equipment::{Equipment, EquipmentFilter, Page, SerialMatch, SerialNumber};
pub use status::Status;
