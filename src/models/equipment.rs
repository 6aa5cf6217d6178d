//! Equipment model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::status::Status;
use crate::error::{AppError, AppResult};

/// Equipment unit, stored in the `serial_numbers` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub auto_id: i32,
    /// References `device_type.id` (checked by the application, not by a foreign key)
    pub device_type_id: i32,
    /// References `manufacturer.id` (checked by the application, not by a foreign key)
    pub manufacturer_id: i32,
    #[schema(example = "SN-123456")]
    pub serial_number: String,
    pub status: Status,
}

/// A serial number that passed format validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerialNumber(String);

impl SerialNumber {
    pub const PREFIX: &'static str = "SN-";
    pub const MAX_LEN: usize = 64;

    /// Check the `SN-` prefix and the 64 character bound
    pub fn parse(raw: &str) -> AppResult<Self> {
        if raw.is_empty() {
            return Err(AppError::MissingField("missing serial number".to_string()));
        }
        if !raw.starts_with(Self::PREFIX) {
            return Err(AppError::InvalidFormat(format!(
                "serial number must start with {}",
                Self::PREFIX
            )));
        }
        if raw.chars().count() > Self::MAX_LEN {
            return Err(AppError::InvalidFormat(format!(
                "serial number cannot be longer than {} characters",
                Self::MAX_LEN
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serial number constraint in an equipment query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerialMatch {
    Exact(String),
    /// Literal substring, matched anywhere in the serial number
    Contains(String),
}

/// Conditions for an equipment query; `None` fields are unconstrained
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentFilter {
    pub device_type_id: Option<i32>,
    pub manufacturer_id: Option<i32>,
    pub serial: Option<SerialMatch>,
    pub active_only: bool,
}

impl EquipmentFilter {
    /// Whether a record satisfies the filter (used by in-memory storage)
    pub fn matches(&self, equipment: &Equipment) -> bool {
        if self.active_only && !equipment.status.is_active() {
            return false;
        }
        if self
            .device_type_id
            .is_some_and(|id| id != equipment.device_type_id)
        {
            return false;
        }
        if self
            .manufacturer_id
            .is_some_and(|id| id != equipment.manufacturer_id)
        {
            return false;
        }
        match &self.serial {
            Some(SerialMatch::Exact(sn)) => equipment.serial_number == *sn,
            Some(SerialMatch::Contains(fragment)) => {
                equipment.serial_number.contains(fragment.as_str())
            }
            None => true,
        }
    }
}

/// Limit/offset window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Window large enough to hold any single-record lookup
    pub const SINGLE: Page = Page { limit: 1, offset: 0 };
}

/// Validated input for an equipment insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEquipment {
    pub serial_number: SerialNumber,
    pub device_type_id: i32,
    pub manufacturer_id: i32,
}

/// Combined rewrite of the identifying fields of a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentChanges {
    pub serial_number: String,
    pub device_type_id: i32,
    pub manufacturer_id: i32,
}

/// Paged equipment listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct EquipmentPageQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
    /// Include inactive equipment (default: false)
    pub all: Option<String>,
}

/// Limit/offset window for filtered listings
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Lookup by auto id (`GET /equipment/id?id=`)
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct EquipmentIdQuery {
    pub id: Option<String>,
}

/// Lookup by serial number (`GET /equipment/sn?sn=`)
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SerialNumberQuery {
    pub sn: Option<String>,
}

/// Create equipment request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateEquipmentRequest {
    #[schema(example = "SN-123456")]
    pub sn: Option<String>,
    #[serde(alias = "device")]
    pub device_id: Option<String>,
    #[serde(alias = "manufacturer")]
    pub manufacturer_id: Option<String>,
}

/// Rename request (`PATCH /equipment/sn`)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSerialNumberRequest {
    pub id: Option<String>,
    pub sn: Option<String>,
}

/// Combined update request (`PATCH /equipment`)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEquipmentRequest {
    pub id: Option<String>,
    /// Must equal the unit's current serial number
    pub sn: Option<String>,
    pub device_id: Option<String>,
    pub manufacturer_id: Option<String>,
}

/// Status update request (`PATCH /equipment/{id}/status`)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// `active` or `inactive`
    pub status: Option<String>,
}
