//! API handlers for the equipment inventory REST endpoints

pub mod catalog;
pub mod envelope;
pub mod equipment;
pub mod health;
pub mod openapi;
pub mod params;

use std::time::Duration;

use axum::{
    http::{
        header::{ALLOW, CONTENT_TYPE},
        Method, StatusCode,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};
use envelope::ApiError;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Device types
        .route(
            "/device",
            get(catalog::list_device_types).post(catalog::create_device_type),
        )
        .route(
            "/device/:id",
            get(catalog::get_device_type).patch(catalog::update_device_type),
        )
        .route("/device/:id/name", patch(catalog::rename_device_type))
        .route("/device/:id/status", patch(catalog::set_device_type_status))
        // Manufacturers
        .route(
            "/manufacturer",
            get(catalog::list_manufacturers).post(catalog::create_manufacturer),
        )
        .route(
            "/manufacturer/:id",
            get(catalog::get_manufacturer).patch(catalog::update_manufacturer),
        )
        .route("/manufacturer/:id/name", patch(catalog::rename_manufacturer))
        .route(
            "/manufacturer/:id/status",
            patch(catalog::set_manufacturer_status),
        )
        // Equipment
        .route(
            "/equipment",
            get(equipment::list_equipment)
                .post(equipment::create_equipment)
                .patch(equipment::update_equipment),
        )
        .route("/equipment/id", get(equipment::get_equipment_by_id))
        .route(
            "/equipment/sn",
            get(equipment::get_equipment_by_serial_number).patch(equipment::update_serial_number),
        )
        .route("/equipment/sn-like/:sn", get(equipment::search_equipment))
        .route(
            "/equipment/manufacturer/:manufacturer_id",
            get(equipment::list_equipment_by_manufacturer),
        )
        .route(
            "/equipment/device/:device_id",
            get(equipment::list_equipment_by_device_type),
        )
        .route(
            "/equipment/device/:device_id/manufacturer/:manufacturer_id",
            get(equipment::list_equipment_by_device_type_and_manufacturer),
        )
        .route(
            "/equipment/sn/:sn/device/:device_id",
            get(equipment::get_equipment_by_serial_number_and_device_type),
        )
        .route(
            "/equipment/sn/:sn/manufacturer/:manufacturer_id",
            get(equipment::get_equipment_by_serial_number_and_manufacturer),
        )
        .route(
            "/equipment/sn/:sn/manufacturer/:manufacturer_id/device/:device_id",
            get(equipment::get_equipment_by_serial_number_and_both),
        )
        .route(
            "/equipment/sn-like/:sn/manufacturer/:manufacturer_id/device/:device_id",
            get(equipment::search_equipment_by_both),
        )
        .route("/equipment/:id/status", patch(equipment::update_equipment_status))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .fallback(endpoint_not_found)
        .layer(TimeoutLayer::new(timeout))
        .layer(middleware::map_response(envelope_bare_errors))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn endpoint_not_found() -> ApiError {
    AppError::EndpointNotFound.into()
}

/// Wrap the bodiless 405 and 408 responses axum and tower-http produce
async fn envelope_bare_errors(response: Response) -> Response {
    if response.headers().contains_key(CONTENT_TYPE) {
        return response;
    }
    let error = match response.status() {
        StatusCode::METHOD_NOT_ALLOWED => AppError::MethodNotAllowed,
        StatusCode::REQUEST_TIMEOUT => AppError::RequestTimeout,
        _ => return response,
    };

    let mut enveloped = ApiError::from(error).into_response();
    if let Some(allow) = response.headers().get(ALLOW) {
        enveloped.headers_mut().insert(ALLOW, allow.clone());
    }
    enveloped
}
