//! Equipment service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{
        catalog::CatalogKind,
        equipment::{
            Equipment, EquipmentChanges, EquipmentFilter, NewEquipment, Page, SerialMatch,
            SerialNumber,
        },
    },
    repository::{EquipmentStore, Repository},
};

use super::{
    input::{require_id, require_status, require_text},
    lookup::{Identifier, Lookup, LookupService},
};

#[derive(Clone)]
pub struct EquipmentService {
    store: Arc<dyn EquipmentStore>,
    lookup: LookupService,
}

impl EquipmentService {
    pub fn new(repository: &Repository, lookup: LookupService) -> Self {
        Self {
            store: repository.equipment.clone(),
            lookup,
        }
    }

    /// Page of equipment ordered by auto id; inactive units only with `include_all`
    pub async fn list(&self, page: Page, include_all: bool) -> AppResult<Vec<Equipment>> {
        let filter = EquipmentFilter {
            active_only: !include_all,
            ..Default::default()
        };
        self.store.list(&filter, page).await
    }

    pub async fn get_by_id(&self, auto_id: i32) -> AppResult<Equipment> {
        self.require_equipment(auto_id).await
    }

    /// Exact serial number lookup
    pub async fn get_by_serial_number(&self, sn: &str) -> AppResult<Equipment> {
        let (serial_number, existing) = self.lookup.validate_serial_number(sn).await?;
        existing.require(|| not_found_serial(&serial_number))
    }

    /// Literal substring search; an empty result is not an error
    pub async fn search_by_pattern(&self, fragment: &str, page: Page) -> AppResult<Vec<Equipment>> {
        self.search(fragment, None, None, page).await
    }

    pub async fn filter_by_device_type(
        &self,
        device_type_id: i32,
        page: Page,
    ) -> AppResult<Vec<Equipment>> {
        self.filter_by(Some(device_type_id), None, page).await
    }

    pub async fn filter_by_manufacturer(
        &self,
        manufacturer_id: i32,
        page: Page,
    ) -> AppResult<Vec<Equipment>> {
        self.filter_by(None, Some(manufacturer_id), page).await
    }

    pub async fn filter_by_both(
        &self,
        device_type_id: i32,
        manufacturer_id: i32,
        page: Page,
    ) -> AppResult<Vec<Equipment>> {
        self.filter_by(Some(device_type_id), Some(manufacturer_id), page)
            .await
    }

    /// Exact serial number that must also belong to the given device type
    pub async fn get_by_serial_and_device_type(
        &self,
        sn: &str,
        device_type_id: i32,
    ) -> AppResult<Equipment> {
        self.get_by_serial_within(sn, Some(device_type_id), None)
            .await
    }

    /// Exact serial number that must also belong to the given manufacturer
    pub async fn get_by_serial_and_manufacturer(
        &self,
        sn: &str,
        manufacturer_id: i32,
    ) -> AppResult<Equipment> {
        self.get_by_serial_within(sn, None, Some(manufacturer_id))
            .await
    }

    pub async fn get_by_serial_and_both(
        &self,
        sn: &str,
        device_type_id: i32,
        manufacturer_id: i32,
    ) -> AppResult<Equipment> {
        self.get_by_serial_within(sn, Some(device_type_id), Some(manufacturer_id))
            .await
    }

    /// Substring search restricted to one device type and manufacturer
    pub async fn search_by_pattern_and_both(
        &self,
        fragment: &str,
        device_type_id: i32,
        manufacturer_id: i32,
        page: Page,
    ) -> AppResult<Vec<Equipment>> {
        self.search(fragment, Some(device_type_id), Some(manufacturer_id), page)
            .await
    }

    /// Register a unit. Checks run in a fixed order and the first failure
    /// wins: serial format, serial uniqueness, device type, manufacturer.
    pub async fn create(
        &self,
        sn: &str,
        device_type_id: i32,
        manufacturer_id: i32,
    ) -> AppResult<Equipment> {
        let serial_number = self.require_new_serial_number(sn).await?;
        self.require_parent(CatalogKind::DeviceType, device_type_id)
            .await?;
        self.require_parent(CatalogKind::Manufacturer, manufacturer_id)
            .await?;
        self.insert(serial_number, device_type_id, manufacturer_id)
            .await
    }

    /// [`create`](Self::create) over raw request fields. An id is only read
    /// once every earlier check has passed, so a bad serial number is
    /// reported even when the ids are missing or malformed.
    pub async fn create_from_input(
        &self,
        sn: Option<&str>,
        device_id: Option<&str>,
        manufacturer_id: Option<&str>,
    ) -> AppResult<Equipment> {
        let sn = require_text("sn", sn)?;
        let serial_number = self.require_new_serial_number(sn).await?;

        let device_type_id = require_id("device_id", device_id)?;
        self.require_parent(CatalogKind::DeviceType, device_type_id)
            .await?;
        let manufacturer_id = require_id("manufacturer_id", manufacturer_id)?;
        self.require_parent(CatalogKind::Manufacturer, manufacturer_id)
            .await?;

        self.insert(serial_number, device_type_id, manufacturer_id)
            .await
    }

    /// Give a unit a new serial number
    pub async fn update_serial_number(
        &self,
        auto_id: i32,
        new_sn: Option<&str>,
    ) -> AppResult<Equipment> {
        let current = self.require_equipment(auto_id).await?;
        let new_sn = require_text("serial number", new_sn)?;

        let (serial_number, existing) = self.lookup.validate_serial_number(new_sn).await?;
        match existing {
            Lookup::Found(other) if other.auto_id != auto_id => {
                return Err(duplicate_serial(&serial_number));
            }
            Lookup::Found(_) => {
                tracing::debug!("Equipment {} already carries {}", auto_id, serial_number);
                return Ok(current);
            }
            Lookup::NotFound => {}
        }

        self.store
            .update_serial_number(auto_id, serial_number.as_str())
            .await?;
        tracing::info!(
            "Renamed equipment {} from {} to {}",
            auto_id,
            current.serial_number,
            serial_number
        );
        self.require_equipment(auto_id).await
    }

    /// Move a unit to another device type and manufacturer. `sn` must be the
    /// unit's current serial number, so a client holding stale data is turned
    /// away instead of overwriting someone else's change.
    pub async fn update_equipment(
        &self,
        auto_id: i32,
        sn: &str,
        device_type_id: i32,
        manufacturer_id: i32,
    ) -> AppResult<Equipment> {
        let current = self.require_equipment(auto_id).await?;
        if current.serial_number != sn {
            return Err(AppError::NotFound(format!(
                "equipment {} does not carry serial number {}",
                auto_id, sn
            )));
        }
        self.require_parent(CatalogKind::DeviceType, device_type_id)
            .await?;
        self.require_parent(CatalogKind::Manufacturer, manufacturer_id)
            .await?;

        let changes = EquipmentChanges {
            serial_number: current.serial_number,
            device_type_id,
            manufacturer_id,
        };
        self.store.update(auto_id, &changes).await?;
        tracing::info!(
            "Updated equipment {} (device type {}, manufacturer {})",
            auto_id,
            device_type_id,
            manufacturer_id
        );
        self.require_equipment(auto_id).await
    }

    pub async fn update_status(&self, auto_id: i32, status: Option<&str>) -> AppResult<Equipment> {
        self.require_equipment(auto_id).await?;
        let status = require_status(status)?;

        self.store.update_status(auto_id, status).await?;
        tracing::info!("Set equipment {} {}", auto_id, status);
        self.require_equipment(auto_id).await
    }

    async fn require_equipment(&self, auto_id: i32) -> AppResult<Equipment> {
        self.lookup
            .resolve_equipment(auto_id)
            .await?
            .require(|| format!("equipment {} does not exist in database", auto_id))
    }

    async fn require_new_serial_number(&self, sn: &str) -> AppResult<SerialNumber> {
        let (serial_number, existing) = self.lookup.validate_serial_number(sn).await?;
        if existing.is_found() {
            return Err(duplicate_serial(&serial_number));
        }
        Ok(serial_number)
    }

    async fn insert(
        &self,
        serial_number: SerialNumber,
        device_type_id: i32,
        manufacturer_id: i32,
    ) -> AppResult<Equipment> {
        let equipment = self
            .store
            .insert(&NewEquipment {
                serial_number,
                device_type_id,
                manufacturer_id,
            })
            .await?;
        tracing::info!(
            "Created equipment {} ({})",
            equipment.auto_id,
            equipment.serial_number
        );
        Ok(equipment)
    }

    async fn require_parent(&self, kind: CatalogKind, id: i32) -> AppResult<()> {
        self.lookup.require(kind, &Identifier::Id(id)).await?;
        Ok(())
    }

    async fn require_parents(
        &self,
        device_type_id: Option<i32>,
        manufacturer_id: Option<i32>,
    ) -> AppResult<()> {
        if let Some(id) = manufacturer_id {
            self.require_parent(CatalogKind::Manufacturer, id).await?;
        }
        if let Some(id) = device_type_id {
            self.require_parent(CatalogKind::DeviceType, id).await?;
        }
        Ok(())
    }

    async fn filter_by(
        &self,
        device_type_id: Option<i32>,
        manufacturer_id: Option<i32>,
        page: Page,
    ) -> AppResult<Vec<Equipment>> {
        self.require_parents(device_type_id, manufacturer_id)
            .await?;
        let filter = EquipmentFilter {
            device_type_id,
            manufacturer_id,
            ..Default::default()
        };
        self.store.list(&filter, page).await
    }

    async fn search(
        &self,
        fragment: &str,
        device_type_id: Option<i32>,
        manufacturer_id: Option<i32>,
        page: Page,
    ) -> AppResult<Vec<Equipment>> {
        let fragment = require_text("serial number", Some(fragment))?;
        self.require_parents(device_type_id, manufacturer_id)
            .await?;
        let filter = EquipmentFilter {
            device_type_id,
            manufacturer_id,
            serial: Some(SerialMatch::Contains(fragment.to_string())),
            ..Default::default()
        };
        self.store.list(&filter, page).await
    }

    async fn get_by_serial_within(
        &self,
        sn: &str,
        device_type_id: Option<i32>,
        manufacturer_id: Option<i32>,
    ) -> AppResult<Equipment> {
        let serial_number = SerialNumber::parse(sn)?;
        self.require_parents(device_type_id, manufacturer_id)
            .await?;
        let filter = EquipmentFilter {
            device_type_id,
            manufacturer_id,
            serial: Some(SerialMatch::Exact(serial_number.to_string())),
            ..Default::default()
        };
        self.store
            .list(&filter, Page::SINGLE)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "no equipment with serial number {} matches the given device type and manufacturer",
                    serial_number
                ))
            })
    }
}

fn not_found_serial(serial_number: &SerialNumber) -> String {
    format!(
        "equipment with serial number {} does not exist in database",
        serial_number
    )
}

fn duplicate_serial(serial_number: &SerialNumber) -> AppError {
    AppError::Duplicate(format!(
        "equipment with serial number {} already exists",
        serial_number
    ))
}
