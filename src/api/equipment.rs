//! Equipment API endpoints

use axum::extract::{Path, State};

use super::{
    envelope::{created, ok, Created, ErrorEnvelope, Reply, WithAction},
    params::Params,
};
use crate::{
    models::equipment::{
        CreateEquipmentRequest, Equipment, EquipmentIdQuery, EquipmentPageQuery, PageQuery,
        SerialNumberQuery, UpdateEquipmentRequest, UpdateSerialNumberRequest, UpdateStatusRequest,
    },
    services::input::{parse_flag, parse_id, require_id, require_page, require_text},
    AppState,
};

const LIST: &str = "GET /api/v1/equipment?limit=&offset=";
const BY_ID: &str = "GET /api/v1/equipment/id?id=";
const BY_SN: &str = "GET /api/v1/equipment/sn?sn=";
const DEVICES: &str = "GET /api/v1/device";
const MANUFACTURERS: &str = "GET /api/v1/manufacturer";

/// List equipment ordered by auto id
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    params(EquipmentPageQuery),
    responses(
        (status = 200, description = "Page of equipment", body = Vec<Equipment>),
        (status = 400, description = "Missing or invalid limit/offset", body = ErrorEnvelope)
    )
)]
pub async fn list_equipment(
    State(state): State<AppState>,
    Params(query): Params<EquipmentPageQuery>,
) -> Reply<Vec<Equipment>> {
    let page = require_page(query.limit.as_deref(), query.offset.as_deref()).action(LIST)?;
    let include_all = parse_flag("all", query.all.as_deref()).action(LIST)?;
    let equipment = state
        .services
        .equipment
        .list(page, include_all)
        .await
        .action(LIST)?;
    Ok(ok(equipment))
}

/// Get equipment by auto id
#[utoipa::path(
    get,
    path = "/equipment/id",
    tag = "equipment",
    params(EquipmentIdQuery),
    responses(
        (status = 200, description = "Equipment", body = Equipment),
        (status = 400, description = "Missing id or unknown equipment", body = ErrorEnvelope)
    )
)]
pub async fn get_equipment_by_id(
    State(state): State<AppState>,
    Params(query): Params<EquipmentIdQuery>,
) -> Reply<Equipment> {
    let id = require_id("id", query.id.as_deref()).action(BY_ID)?;
    let equipment = state.services.equipment.get_by_id(id).await.action(BY_ID)?;
    Ok(ok(equipment))
}

/// Get equipment by exact serial number
#[utoipa::path(
    get,
    path = "/equipment/sn",
    tag = "equipment",
    params(SerialNumberQuery),
    responses(
        (status = 200, description = "Equipment", body = Equipment),
        (status = 400, description = "Malformed or unknown serial number", body = ErrorEnvelope)
    )
)]
pub async fn get_equipment_by_serial_number(
    State(state): State<AppState>,
    Params(query): Params<SerialNumberQuery>,
) -> Reply<Equipment> {
    let sn = require_text("sn", query.sn.as_deref()).action(BY_SN)?;
    let equipment = state
        .services
        .equipment
        .get_by_serial_number(sn)
        .await
        .action(BY_SN)?;
    Ok(ok(equipment))
}

/// Search equipment whose serial number contains a fragment
#[utoipa::path(
    get,
    path = "/equipment/sn-like/{sn}",
    tag = "equipment",
    params(("sn" = String, Path, description = "Serial number fragment"), PageQuery),
    responses(
        (status = 200, description = "Matching equipment, possibly empty", body = Vec<Equipment>),
        (status = 400, description = "Invalid parameters", body = ErrorEnvelope)
    )
)]
pub async fn search_equipment(
    State(state): State<AppState>,
    Path(sn): Path<String>,
    Params(query): Params<PageQuery>,
) -> Reply<Vec<Equipment>> {
    let action = format!("GET /api/v1/equipment/sn-like/{}?limit=&offset=", sn);
    let page = require_page(query.limit.as_deref(), query.offset.as_deref()).action(&action)?;
    let equipment = state
        .services
        .equipment
        .search_by_pattern(&sn, page)
        .await
        .action(&action)?;
    Ok(ok(equipment))
}

/// List equipment of one manufacturer
#[utoipa::path(
    get,
    path = "/equipment/manufacturer/{manufacturer_id}",
    tag = "equipment",
    params(("manufacturer_id" = i32, Path, description = "Manufacturer id"), PageQuery),
    responses(
        (status = 200, description = "Equipment of the manufacturer", body = Vec<Equipment>),
        (status = 400, description = "Invalid parameters or unknown manufacturer", body = ErrorEnvelope)
    )
)]
pub async fn list_equipment_by_manufacturer(
    State(state): State<AppState>,
    Path(manufacturer_id): Path<String>,
    Params(query): Params<PageQuery>,
) -> Reply<Vec<Equipment>> {
    let manufacturer_id = parse_id("manufacturer_id", &manufacturer_id).action(MANUFACTURERS)?;
    let page = require_page(query.limit.as_deref(), query.offset.as_deref()).action(LIST)?;
    let equipment = state
        .services
        .equipment
        .filter_by_manufacturer(manufacturer_id, page)
        .await
        .action(MANUFACTURERS)?;
    Ok(ok(equipment))
}

/// List equipment of one device type
#[utoipa::path(
    get,
    path = "/equipment/device/{device_id}",
    tag = "equipment",
    params(("device_id" = i32, Path, description = "Device type id"), PageQuery),
    responses(
        (status = 200, description = "Equipment of the device type", body = Vec<Equipment>),
        (status = 400, description = "Invalid parameters or unknown device type", body = ErrorEnvelope)
    )
)]
pub async fn list_equipment_by_device_type(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Params(query): Params<PageQuery>,
) -> Reply<Vec<Equipment>> {
    let device_id = parse_id("device_id", &device_id).action(DEVICES)?;
    let page = require_page(query.limit.as_deref(), query.offset.as_deref()).action(LIST)?;
    let equipment = state
        .services
        .equipment
        .filter_by_device_type(device_id, page)
        .await
        .action(DEVICES)?;
    Ok(ok(equipment))
}

/// List equipment of one device type and manufacturer
#[utoipa::path(
    get,
    path = "/equipment/device/{device_id}/manufacturer/{manufacturer_id}",
    tag = "equipment",
    params(
        ("device_id" = i32, Path, description = "Device type id"),
        ("manufacturer_id" = i32, Path, description = "Manufacturer id"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Matching equipment", body = Vec<Equipment>),
        (status = 400, description = "Invalid parameters or unknown parent", body = ErrorEnvelope)
    )
)]
pub async fn list_equipment_by_device_type_and_manufacturer(
    State(state): State<AppState>,
    Path((device_id, manufacturer_id)): Path<(String, String)>,
    Params(query): Params<PageQuery>,
) -> Reply<Vec<Equipment>> {
    let device_id = parse_id("device_id", &device_id).action(DEVICES)?;
    let manufacturer_id = parse_id("manufacturer_id", &manufacturer_id).action(MANUFACTURERS)?;
    let page = require_page(query.limit.as_deref(), query.offset.as_deref()).action(LIST)?;
    let equipment = state
        .services
        .equipment
        .filter_by_both(device_id, manufacturer_id, page)
        .await
        .action(LIST)?;
    Ok(ok(equipment))
}

/// Get equipment by serial number within a device type
#[utoipa::path(
    get,
    path = "/equipment/sn/{sn}/device/{device_id}",
    tag = "equipment",
    params(
        ("sn" = String, Path, description = "Serial number"),
        ("device_id" = i32, Path, description = "Device type id")
    ),
    responses(
        (status = 200, description = "Equipment", body = Equipment),
        (status = 400, description = "Invalid parameters or no match", body = ErrorEnvelope)
    )
)]
pub async fn get_equipment_by_serial_number_and_device_type(
    State(state): State<AppState>,
    Path((sn, device_id)): Path<(String, String)>,
) -> Reply<Equipment> {
    let device_id = parse_id("device_id", &device_id).action(DEVICES)?;
    let equipment = state
        .services
        .equipment
        .get_by_serial_and_device_type(&sn, device_id)
        .await
        .action(BY_SN)?;
    Ok(ok(equipment))
}

/// Get equipment by serial number within a manufacturer
#[utoipa::path(
    get,
    path = "/equipment/sn/{sn}/manufacturer/{manufacturer_id}",
    tag = "equipment",
    params(
        ("sn" = String, Path, description = "Serial number"),
        ("manufacturer_id" = i32, Path, description = "Manufacturer id")
    ),
    responses(
        (status = 200, description = "Equipment", body = Equipment),
        (status = 400, description = "Invalid parameters or no match", body = ErrorEnvelope)
    )
)]
pub async fn get_equipment_by_serial_number_and_manufacturer(
    State(state): State<AppState>,
    Path((sn, manufacturer_id)): Path<(String, String)>,
) -> Reply<Equipment> {
    let manufacturer_id = parse_id("manufacturer_id", &manufacturer_id).action(MANUFACTURERS)?;
    let equipment = state
        .services
        .equipment
        .get_by_serial_and_manufacturer(&sn, manufacturer_id)
        .await
        .action(BY_SN)?;
    Ok(ok(equipment))
}

/// Get equipment by serial number within a manufacturer and device type
#[utoipa::path(
    get,
    path = "/equipment/sn/{sn}/manufacturer/{manufacturer_id}/device/{device_id}",
    tag = "equipment",
    params(
        ("sn" = String, Path, description = "Serial number"),
        ("manufacturer_id" = i32, Path, description = "Manufacturer id"),
        ("device_id" = i32, Path, description = "Device type id")
    ),
    responses(
        (status = 200, description = "Equipment", body = Equipment),
        (status = 400, description = "Invalid parameters or no match", body = ErrorEnvelope)
    )
)]
pub async fn get_equipment_by_serial_number_and_both(
    State(state): State<AppState>,
    Path((sn, manufacturer_id, device_id)): Path<(String, String, String)>,
) -> Reply<Equipment> {
    let manufacturer_id = parse_id("manufacturer_id", &manufacturer_id).action(MANUFACTURERS)?;
    let device_id = parse_id("device_id", &device_id).action(DEVICES)?;
    let equipment = state
        .services
        .equipment
        .get_by_serial_and_both(&sn, device_id, manufacturer_id)
        .await
        .action(BY_SN)?;
    Ok(ok(equipment))
}

/// Search by serial number fragment within a manufacturer and device type
#[utoipa::path(
    get,
    path = "/equipment/sn-like/{sn}/manufacturer/{manufacturer_id}/device/{device_id}",
    tag = "equipment",
    params(
        ("sn" = String, Path, description = "Serial number fragment"),
        ("manufacturer_id" = i32, Path, description = "Manufacturer id"),
        ("device_id" = i32, Path, description = "Device type id"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Matching equipment, possibly empty", body = Vec<Equipment>),
        (status = 400, description = "Invalid parameters or unknown parent", body = ErrorEnvelope)
    )
)]
pub async fn search_equipment_by_both(
    State(state): State<AppState>,
    Path((sn, manufacturer_id, device_id)): Path<(String, String, String)>,
    Params(query): Params<PageQuery>,
) -> Reply<Vec<Equipment>> {
    let manufacturer_id = parse_id("manufacturer_id", &manufacturer_id).action(MANUFACTURERS)?;
    let device_id = parse_id("device_id", &device_id).action(DEVICES)?;
    let page = require_page(query.limit.as_deref(), query.offset.as_deref()).action(LIST)?;
    let equipment = state
        .services
        .equipment
        .search_by_pattern_and_both(&sn, device_id, manufacturer_id, page)
        .await
        .action(LIST)?;
    Ok(ok(equipment))
}

/// Register new equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    request_body(content = CreateEquipmentRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Invalid serial number, duplicate or unknown parent", body = ErrorEnvelope)
    )
)]
pub async fn create_equipment(
    State(state): State<AppState>,
    Params(data): Params<CreateEquipmentRequest>,
) -> Created<Equipment> {
    const CREATE: &str = "POST /api/v1/equipment";
    let equipment = state
        .services
        .equipment
        .create_from_input(
            data.sn.as_deref(),
            data.device_id.as_deref(),
            data.manufacturer_id.as_deref(),
        )
        .await
        .action(CREATE)?;
    Ok(created(equipment))
}

/// Change the serial number of a unit
#[utoipa::path(
    patch,
    path = "/equipment/sn",
    tag = "equipment",
    request_body(content = UpdateSerialNumberRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Serial number changed", body = Equipment),
        (status = 400, description = "Unknown unit, invalid or duplicate serial number", body = ErrorEnvelope)
    )
)]
pub async fn update_serial_number(
    State(state): State<AppState>,
    Params(data): Params<UpdateSerialNumberRequest>,
) -> Reply<Equipment> {
    const RENAME: &str = "PATCH /api/v1/equipment/sn";
    let id = require_id("id", data.id.as_deref()).action(RENAME)?;
    let equipment = state
        .services
        .equipment
        .update_serial_number(id, data.sn.as_deref())
        .await
        .action(RENAME)?;
    Ok(ok(equipment))
}

/// Move a unit to another device type and manufacturer
#[utoipa::path(
    patch,
    path = "/equipment",
    tag = "equipment",
    request_body(content = UpdateEquipmentRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 400, description = "Unknown unit, stale serial number or unknown parent", body = ErrorEnvelope)
    )
)]
pub async fn update_equipment(
    State(state): State<AppState>,
    Params(data): Params<UpdateEquipmentRequest>,
) -> Reply<Equipment> {
    const UPDATE: &str = "PATCH /api/v1/equipment?id=&sn=&device_id=&manufacturer_id=";
    let id = require_id("id", data.id.as_deref()).action(UPDATE)?;
    let sn = require_text("sn", data.sn.as_deref()).action(UPDATE)?;
    let device_id = require_id("device_id", data.device_id.as_deref()).action(UPDATE)?;
    let manufacturer_id =
        require_id("manufacturer_id", data.manufacturer_id.as_deref()).action(UPDATE)?;

    let equipment = state
        .services
        .equipment
        .update_equipment(id, sn, device_id, manufacturer_id)
        .await
        .action(UPDATE)?;
    Ok(ok(equipment))
}

/// Change the status of a unit
#[utoipa::path(
    patch,
    path = "/equipment/{id}/status",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment auto id")),
    request_body(content = UpdateStatusRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Status changed", body = Equipment),
        (status = 400, description = "Unknown unit or invalid status", body = ErrorEnvelope)
    )
)]
pub async fn update_equipment_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Params(data): Params<UpdateStatusRequest>,
) -> Reply<Equipment> {
    let action = format!("PATCH /api/v1/equipment/{}/status", id);
    let id = parse_id("id", &id).action(&action)?;
    let equipment = state
        .services
        .equipment
        .update_status(id, data.status.as_deref())
        .await
        .action(&action)?;
    Ok(ok(equipment))
}
