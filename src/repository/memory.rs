//! In-memory storage
//!
//! Mirrors the schema's unique constraints (case-insensitive catalog names,
//! serial numbers) so handlers observe the same failures as with PostgreSQL.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CatalogStore, EquipmentStore};
use crate::{
    error::{AppError, AppResult},
    models::{
        catalog::{CatalogEntry, CatalogKind},
        equipment::{Equipment, EquipmentChanges, EquipmentFilter, NewEquipment, Page},
        status::Status,
    },
};

struct Table<T> {
    rows: Vec<T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

pub struct MemoryCatalogStore {
    kind: CatalogKind,
    table: RwLock<Table<CatalogEntry>>,
}

impl MemoryCatalogStore {
    pub fn new(kind: CatalogKind) -> Self {
        Self {
            kind,
            table: RwLock::new(Table::default()),
        }
    }

    fn not_found(&self, id: i32) -> AppError {
        AppError::NotFound(format!("{} {} does not exist in database", self.kind, id))
    }

    fn name_taken(&self, rows: &[CatalogEntry], name: &str, except: Option<i32>) -> bool {
        let lowered = name.to_lowercase();
        rows.iter()
            .any(|row| Some(row.id) != except && row.name.to_lowercase() == lowered)
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn list(&self, active_only: bool) -> AppResult<Vec<CatalogEntry>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|row| !active_only || row.status.is_active())
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<CatalogEntry>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Option<CatalogEntry>> {
        let lowered = name.to_lowercase();
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .find(|row| row.name.to_lowercase() == lowered)
            .cloned())
    }

    async fn insert(&self, name: &str) -> AppResult<CatalogEntry> {
        let mut table = self.table.write().await;
        if self.name_taken(&table.rows, name, None) {
            return Err(AppError::Duplicate(format!(
                "{} {} already exists",
                self.kind, name
            )));
        }
        let entry = CatalogEntry {
            id: table.allocate_id(),
            name: name.to_string(),
            status: Status::Active,
        };
        table.rows.push(entry.clone());
        Ok(entry)
    }

    async fn update_name(&self, id: i32, name: &str) -> AppResult<()> {
        let mut table = self.table.write().await;
        if self.name_taken(&table.rows, name, Some(id)) {
            return Err(AppError::Duplicate(format!(
                "{} {} already exists",
                self.kind, name
            )));
        }
        let row = table
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| self.not_found(id))?;
        row.name = name.to_string();
        Ok(())
    }

    async fn update_status(&self, id: i32, status: Status) -> AppResult<()> {
        let mut table = self.table.write().await;
        let row = table
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| self.not_found(id))?;
        row.status = status;
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|row| row.id != id);
        if table.rows.len() == before {
            return Err(self.not_found(id));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryEquipmentStore {
    table: RwLock<Table<Equipment>>,
}

impl MemoryEquipmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(auto_id: i32) -> AppError {
    AppError::NotFound(format!("equipment {} does not exist in database", auto_id))
}

fn serial_taken(rows: &[Equipment], serial_number: &str, except: Option<i32>) -> bool {
    rows.iter()
        .any(|row| Some(row.auto_id) != except && row.serial_number == serial_number)
}

fn duplicate_serial(serial_number: &str) -> AppError {
    AppError::Duplicate(format!(
        "equipment with serial number {} already exists",
        serial_number
    ))
}

#[async_trait]
impl EquipmentStore for MemoryEquipmentStore {
    async fn list(&self, filter: &EquipmentFilter, page: Page) -> AppResult<Vec<Equipment>> {
        let table = self.table.read().await;
        // rows are appended with increasing ids, so insertion order is auto_id order
        Ok(table
            .rows
            .iter()
            .filter(|row| filter.matches(row))
            .skip(page.offset.max(0) as usize)
            .take(page.limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, auto_id: i32) -> AppResult<Option<Equipment>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|row| row.auto_id == auto_id).cloned())
    }

    async fn get_by_serial_number(&self, serial_number: &str) -> AppResult<Option<Equipment>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .find(|row| row.serial_number == serial_number)
            .cloned())
    }

    async fn insert(&self, data: &NewEquipment) -> AppResult<Equipment> {
        let mut table = self.table.write().await;
        if serial_taken(&table.rows, data.serial_number.as_str(), None) {
            return Err(duplicate_serial(data.serial_number.as_str()));
        }
        let equipment = Equipment {
            auto_id: table.allocate_id(),
            device_type_id: data.device_type_id,
            manufacturer_id: data.manufacturer_id,
            serial_number: data.serial_number.to_string(),
            status: Status::Active,
        };
        table.rows.push(equipment.clone());
        Ok(equipment)
    }

    async fn update_serial_number(&self, auto_id: i32, serial_number: &str) -> AppResult<()> {
        let mut table = self.table.write().await;
        if serial_taken(&table.rows, serial_number, Some(auto_id)) {
            return Err(duplicate_serial(serial_number));
        }
        let row = table
            .rows
            .iter_mut()
            .find(|row| row.auto_id == auto_id)
            .ok_or_else(|| not_found(auto_id))?;
        row.serial_number = serial_number.to_string();
        Ok(())
    }

    async fn update(&self, auto_id: i32, changes: &EquipmentChanges) -> AppResult<()> {
        let mut table = self.table.write().await;
        if serial_taken(&table.rows, &changes.serial_number, Some(auto_id)) {
            return Err(duplicate_serial(&changes.serial_number));
        }
        let row = table
            .rows
            .iter_mut()
            .find(|row| row.auto_id == auto_id)
            .ok_or_else(|| not_found(auto_id))?;
        row.serial_number = changes.serial_number.clone();
        row.device_type_id = changes.device_type_id;
        row.manufacturer_id = changes.manufacturer_id;
        Ok(())
    }

    async fn update_status(&self, auto_id: i32, status: Status) -> AppResult<()> {
        let mut table = self.table.write().await;
        let row = table
            .rows
            .iter_mut()
            .find(|row| row.auto_id == auto_id)
            .ok_or_else(|| not_found(auto_id))?;
        row.status = status;
        Ok(())
    }
}
