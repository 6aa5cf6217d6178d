//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{catalog, equipment, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Equipment Inventory API",
        version = "1.0.0",
        description = "Device types, manufacturers and equipment units. Every response is wrapped in a {Status, MSG, Action} envelope; the schemas below describe MSG."
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Device types
        catalog::list_device_types,
        catalog::get_device_type,
        catalog::create_device_type,
        catalog::update_device_type,
        catalog::rename_device_type,
        catalog::set_device_type_status,
        // Manufacturers
        catalog::list_manufacturers,
        catalog::get_manufacturer,
        catalog::create_manufacturer,
        catalog::update_manufacturer,
        catalog::rename_manufacturer,
        catalog::set_manufacturer_status,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment_by_id,
        equipment::get_equipment_by_serial_number,
        equipment::search_equipment,
        equipment::list_equipment_by_manufacturer,
        equipment::list_equipment_by_device_type,
        equipment::list_equipment_by_device_type_and_manufacturer,
        equipment::get_equipment_by_serial_number_and_device_type,
        equipment::get_equipment_by_serial_number_and_manufacturer,
        equipment::get_equipment_by_serial_number_and_both,
        equipment::search_equipment_by_both,
        equipment::create_equipment,
        equipment::update_serial_number,
        equipment::update_equipment,
        equipment::update_equipment_status,
    ),
    components(
        schemas(
            crate::models::status::Status,
            // Device types / manufacturers
            crate::models::catalog::CatalogEntry,
            crate::models::catalog::CatalogListQuery,
            crate::models::catalog::CreateCatalogEntry,
            crate::models::catalog::UpdateCatalogEntry,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentPageQuery,
            crate::models::equipment::PageQuery,
            crate::models::equipment::EquipmentIdQuery,
            crate::models::equipment::SerialNumberQuery,
            crate::models::equipment::CreateEquipmentRequest,
            crate::models::equipment::UpdateSerialNumberRequest,
            crate::models::equipment::UpdateEquipmentRequest,
            crate::models::equipment::UpdateStatusRequest,
            // Health
            health::HealthResponse,
            // Errors
            crate::api::envelope::ErrorEnvelope,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "device", description = "Device type management"),
        (name = "manufacturer", description = "Manufacturer management"),
        (name = "equipment", description = "Equipment units identified by serial number")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
