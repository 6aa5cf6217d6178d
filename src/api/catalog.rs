//! Device type and manufacturer endpoints
//!
//! `/device` and `/manufacturer` expose the same operations; each route is a
//! thin handler over the shared implementation below.

use axum::extract::{Path, State};

use super::{
    envelope::{created, ok, Created, ErrorEnvelope, Reply, WithAction},
    params::Params,
};
use crate::{
    models::catalog::{
        CatalogEntry, CatalogKind, CatalogListQuery, CreateCatalogEntry, UpdateCatalogEntry,
    },
    services::{
        input::{parse_flag, parse_id},
        lookup::Identifier,
    },
    AppState,
};

fn hint(kind: CatalogKind, method: &str, suffix: &str) -> String {
    format!("{} /api/v1/{}{}", method, kind.resource(), suffix)
}

async fn list(kind: CatalogKind, state: AppState, query: CatalogListQuery) -> Reply<Vec<CatalogEntry>> {
    let action = hint(kind, "GET", "");
    let active_only = parse_flag("active_only", query.active_only.as_deref()).action(&action)?;
    let entries = state
        .services
        .catalog(kind)
        .list(active_only)
        .await
        .action(&action)?;
    Ok(ok(entries))
}

async fn get(kind: CatalogKind, state: AppState, id: String) -> Reply<CatalogEntry> {
    let action = hint(kind, "GET", "");
    let identifier = Identifier::parse(&id).action(&action)?;
    let entry = state
        .services
        .catalog(kind)
        .get(&identifier)
        .await
        .action(&action)?;
    Ok(ok(entry))
}

async fn create(kind: CatalogKind, state: AppState, data: CreateCatalogEntry) -> Created<CatalogEntry> {
    let entry = state
        .services
        .catalog(kind)
        .create(data.name.as_deref())
        .await
        .action(hint(kind, "POST", ""))?;
    Ok(created(entry))
}

async fn update(
    kind: CatalogKind,
    state: AppState,
    id: String,
    data: UpdateCatalogEntry,
) -> Reply<CatalogEntry> {
    let action = hint(kind, "PATCH", &format!("/{}", id));
    let id = parse_id("id", &id).action(&action)?;
    let entry = state
        .services
        .catalog(kind)
        .update(id, data.name.as_deref(), data.status.as_deref())
        .await
        .action(&action)?;
    Ok(ok(entry))
}

async fn rename(kind: CatalogKind, state: AppState, id: String, data: UpdateCatalogEntry) -> Reply<CatalogEntry> {
    let action = hint(kind, "PATCH", &format!("/{}/name", id));
    let id = parse_id("id", &id).action(&action)?;
    let entry = state
        .services
        .catalog(kind)
        .rename(id, data.name.as_deref())
        .await
        .action(&action)?;
    Ok(ok(entry))
}

async fn set_status(
    kind: CatalogKind,
    state: AppState,
    id: String,
    data: UpdateCatalogEntry,
) -> Reply<CatalogEntry> {
    let action = hint(kind, "PATCH", &format!("/{}/status", id));
    let id = parse_id("id", &id).action(&action)?;
    let entry = state
        .services
        .catalog(kind)
        .set_status(id, data.status.as_deref())
        .await
        .action(&action)?;
    Ok(ok(entry))
}

// ---------------------------------------------------------------------------
// Device types
// ---------------------------------------------------------------------------

/// List device types
#[utoipa::path(
    get,
    path = "/device",
    tag = "device",
    params(CatalogListQuery),
    responses(
        (status = 200, description = "Device types ordered by id", body = Vec<CatalogEntry>),
        (status = 400, description = "Invalid parameter", body = ErrorEnvelope),
        (status = 500, description = "Storage failure", body = ErrorEnvelope)
    )
)]
pub async fn list_device_types(
    State(state): State<AppState>,
    Params(query): Params<CatalogListQuery>,
) -> Reply<Vec<CatalogEntry>> {
    list(CatalogKind::DeviceType, state, query).await
}

/// Get a device type by id or name
#[utoipa::path(
    get,
    path = "/device/{id}",
    tag = "device",
    params(("id" = String, Path, description = "Device type id or name")),
    responses(
        (status = 200, description = "Device type", body = CatalogEntry),
        (status = 400, description = "Device type not found", body = ErrorEnvelope)
    )
)]
pub async fn get_device_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Reply<CatalogEntry> {
    get(CatalogKind::DeviceType, state, id).await
}

/// Create a device type
#[utoipa::path(
    post,
    path = "/device",
    tag = "device",
    request_body(content = CreateCatalogEntry, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Device type created", body = CatalogEntry),
        (status = 400, description = "Missing or duplicate name", body = ErrorEnvelope)
    )
)]
pub async fn create_device_type(
    State(state): State<AppState>,
    Params(data): Params<CreateCatalogEntry>,
) -> Created<CatalogEntry> {
    create(CatalogKind::DeviceType, state, data).await
}

/// Update the name and/or status of a device type
#[utoipa::path(
    patch,
    path = "/device/{id}",
    tag = "device",
    params(("id" = i32, Path, description = "Device type id")),
    request_body(content = UpdateCatalogEntry, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Device type updated", body = CatalogEntry),
        (status = 400, description = "Invalid update", body = ErrorEnvelope)
    )
)]
pub async fn update_device_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Params(data): Params<UpdateCatalogEntry>,
) -> Reply<CatalogEntry> {
    update(CatalogKind::DeviceType, state, id, data).await
}

/// Rename a device type
#[utoipa::path(
    patch,
    path = "/device/{id}/name",
    tag = "device",
    params(("id" = i32, Path, description = "Device type id")),
    request_body(content = UpdateCatalogEntry, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Device type renamed", body = CatalogEntry),
        (status = 400, description = "Invalid name", body = ErrorEnvelope)
    )
)]
pub async fn rename_device_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Params(data): Params<UpdateCatalogEntry>,
) -> Reply<CatalogEntry> {
    rename(CatalogKind::DeviceType, state, id, data).await
}

/// Change the status of a device type
#[utoipa::path(
    patch,
    path = "/device/{id}/status",
    tag = "device",
    params(("id" = i32, Path, description = "Device type id")),
    request_body(content = UpdateCatalogEntry, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Device type status changed", body = CatalogEntry),
        (status = 400, description = "Invalid status", body = ErrorEnvelope)
    )
)]
pub async fn set_device_type_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Params(data): Params<UpdateCatalogEntry>,
) -> Reply<CatalogEntry> {
    set_status(CatalogKind::DeviceType, state, id, data).await
}

// ---------------------------------------------------------------------------
// Manufacturers
// ---------------------------------------------------------------------------

/// List manufacturers
#[utoipa::path(
    get,
    path = "/manufacturer",
    tag = "manufacturer",
    params(CatalogListQuery),
    responses(
        (status = 200, description = "Manufacturers ordered by id", body = Vec<CatalogEntry>),
        (status = 400, description = "Invalid parameter", body = ErrorEnvelope),
        (status = 500, description = "Storage failure", body = ErrorEnvelope)
    )
)]
pub async fn list_manufacturers(
    State(state): State<AppState>,
    Params(query): Params<CatalogListQuery>,
) -> Reply<Vec<CatalogEntry>> {
    list(CatalogKind::Manufacturer, state, query).await
}

/// Get a manufacturer by id or name
#[utoipa::path(
    get,
    path = "/manufacturer/{id}",
    tag = "manufacturer",
    params(("id" = String, Path, description = "Manufacturer id or name")),
    responses(
        (status = 200, description = "Manufacturer", body = CatalogEntry),
        (status = 400, description = "Manufacturer not found", body = ErrorEnvelope)
    )
)]
pub async fn get_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Reply<CatalogEntry> {
    get(CatalogKind::Manufacturer, state, id).await
}

/// Create a manufacturer
#[utoipa::path(
    post,
    path = "/manufacturer",
    tag = "manufacturer",
    request_body(content = CreateCatalogEntry, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Manufacturer created", body = CatalogEntry),
        (status = 400, description = "Missing or duplicate name", body = ErrorEnvelope)
    )
)]
pub async fn create_manufacturer(
    State(state): State<AppState>,
    Params(data): Params<CreateCatalogEntry>,
) -> Created<CatalogEntry> {
    create(CatalogKind::Manufacturer, state, data).await
}

/// Update the name and/or status of a manufacturer
#[utoipa::path(
    patch,
    path = "/manufacturer/{id}",
    tag = "manufacturer",
    params(("id" = i32, Path, description = "Manufacturer id")),
    request_body(content = UpdateCatalogEntry, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Manufacturer updated", body = CatalogEntry),
        (status = 400, description = "Invalid update", body = ErrorEnvelope)
    )
)]
pub async fn update_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Params(data): Params<UpdateCatalogEntry>,
) -> Reply<CatalogEntry> {
    update(CatalogKind::Manufacturer, state, id, data).await
}

/// Rename a manufacturer
#[utoipa::path(
    patch,
    path = "/manufacturer/{id}/name",
    tag = "manufacturer",
    params(("id" = i32, Path, description = "Manufacturer id")),
    request_body(content = UpdateCatalogEntry, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Manufacturer renamed", body = CatalogEntry),
        (status = 400, description = "Invalid name", body = ErrorEnvelope)
    )
)]
pub async fn rename_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Params(data): Params<UpdateCatalogEntry>,
) -> Reply<CatalogEntry> {
    rename(CatalogKind::Manufacturer, state, id, data).await
}

/// Change the status of a manufacturer
#[utoipa::path(
    patch,
    path = "/manufacturer/{id}/status",
    tag = "manufacturer",
    params(("id" = i32, Path, description = "Manufacturer id")),
    request_body(content = UpdateCatalogEntry, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Manufacturer status changed", body = CatalogEntry),
        (status = 400, description = "Invalid status", body = ErrorEnvelope)
    )
)]
pub async fn set_manufacturer_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Params(data): Params<UpdateCatalogEntry>,
) -> Reply<CatalogEntry> {
    set_status(CatalogKind::Manufacturer, state, id, data).await
}
