use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use equipment_inventory::{
    api::create_router, config::AppConfig, repository::Repository, services::Services, AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

struct TestApp {
    state: AppState,
}

impl TestApp {
    fn new() -> Self {
        let state = AppState {
            config: Arc::new(AppConfig::default()),
            services: Arc::new(Services::new(Repository::in_memory())),
        };
        Self { state }
    }

    /// Device type 1 "computer" and manufacturer 1 "Apple"
    async fn seeded() -> Self {
        let app = Self::new();
        app.form("POST", "/api/v1/device", "name=computer").await;
        app.form("POST", "/api/v1/manufacturer", "name=Apple").await;
        app
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = create_router(self.state.clone())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn form(&self, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

fn assert_error(body: &Value) {
    assert_eq!(body["Status"], "ERROR");
    assert!(body["MSG"].is_string());
    assert!(body["Action"].is_string());
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Status"], "ok");
    assert_eq!(body["Action"], "none");
    assert_eq!(body["MSG"]["status"], "healthy");

    let (status, _) = app.get("/api/v1/ready").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_endpoint() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/v1/gadgets").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body);
    assert_eq!(body["MSG"], "endpoint not found");
}

#[tokio::test]
async fn test_wrong_method_gets_envelope() {
    let app = TestApp::new();

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/v1/device")
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_error(&body);
    assert_eq!(body["MSG"], "method not allowed");
}

#[tokio::test]
async fn test_create_and_list_device_types() {
    let app = TestApp::new();

    let (status, body) = app.form("POST", "/api/v1/device", "name=computer").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["MSG"]["id"], 1);
    assert_eq!(body["MSG"]["status"], "active");

    let (status, body) = app.form("POST", "/api/v1/device", "name=COMPUTER").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body);
    assert_eq!(body["Action"], "POST /api/v1/device");

    let (status, body) = app.get("/api/v1/device").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["MSG"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_requires_name() {
    let app = TestApp::new();

    let (status, body) = app.form("POST", "/api/v1/manufacturer", "").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["MSG"], "missing name");
}

#[tokio::test]
async fn test_get_device_type_by_id_or_name() {
    let app = TestApp::seeded().await;

    let (status, by_id) = app.get("/api/v1/device/1").await;
    assert_eq!(status, StatusCode::OK);
    let (_, by_name) = app.get("/api/v1/device/Computer").await;
    assert_eq!(by_id, by_name);

    let (status, body) = app.get("/api/v1/device/42").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["MSG"], "device type 42 does not exist in database");
}

#[tokio::test]
async fn test_patch_manufacturer() {
    let app = TestApp::seeded().await;

    let (status, body) = app
        .form("PATCH", "/api/v1/manufacturer/1", "name=Apple Inc.&status=inactive")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["MSG"]["name"], "Apple Inc.");
    assert_eq!(body["MSG"]["status"], "inactive");

    let (_, body) = app.get("/api/v1/manufacturer?active_only=true").await;
    assert!(body["MSG"].as_array().unwrap().is_empty());

    let (status, _) = app.form("PATCH", "/api/v1/manufacturer/1", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_garbage_status_keeps_state() {
    let app = TestApp::seeded().await;

    let (status, body) = app
        .form("PATCH", "/api/v1/device/1/status", "status=garbage")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["MSG"], "status must be either active or inactive");

    let (_, body) = app.get("/api/v1/device/1").await;
    assert_eq!(body["MSG"]["status"], "active");
}

#[tokio::test]
async fn test_create_equipment_round_trip() {
    let app = TestApp::seeded().await;

    let (status, created) = app
        .form(
            "POST",
            "/api/v1/equipment",
            "sn=SN-TEST1&device_id=1&manufacturer_id=1",
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["MSG"]["status"], "active");

    let (status, body) = app.get("/api/v1/equipment/sn?sn=SN-TEST1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["MSG"]["serial_number"], "SN-TEST1");
    assert_eq!(body["MSG"]["device_type_id"], 1);
    assert_eq!(body["MSG"]["manufacturer_id"], 1);

    let (_, again) = app.get("/api/v1/equipment/sn?sn=SN-TEST1").await;
    assert_eq!(body, again);

    let (_, by_id) = app.get("/api/v1/equipment/id?id=1").await;
    assert_eq!(by_id["MSG"], body["MSG"]);
}

#[tokio::test]
async fn test_create_equipment_accepts_json() {
    let app = TestApp::seeded().await;

    let (status, body) = app
        .json(
            "POST",
            "/api/v1/equipment",
            json!({"sn": "SN-JSON", "device_id": 1, "manufacturer_id": 1}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["MSG"]["serial_number"], "SN-JSON");
}

#[tokio::test]
async fn test_create_equipment_failures() {
    let app = TestApp::seeded().await;

    let (status, body) = app
        .form("POST", "/api/v1/equipment", "sn=XX-1&device_id=1&manufacturer_id=1")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["MSG"], "serial number must start with SN-");

    let (status, body) = app
        .form("POST", "/api/v1/equipment", "sn=SN-1&device_id=5&manufacturer_id=1")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["MSG"], "device type 5 does not exist in database");

    let (status, body) = app
        .form("POST", "/api/v1/equipment", "sn=SN-1&device_id=1&manufacturer_id=5")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["MSG"], "manufacturer 5 does not exist in database");

    let (status, body) = app
        .form("POST", "/api/v1/equipment", "sn=SN-1&device_id=one&manufacturer_id=1")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["MSG"], "device_id is not a positive number");

    let (_, body) = app.get("/api/v1/equipment?limit=10&offset=0&all=true").await;
    assert!(body["MSG"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_equipment_checks_serial_before_ids() {
    let app = TestApp::seeded().await;

    let (status, body) = app.form("POST", "/api/v1/equipment", "sn=BAD").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["MSG"], "serial number must start with SN-");
    assert_eq!(body["Action"], "POST /api/v1/equipment");

    app.form("POST", "/api/v1/equipment", "sn=SN-1&device_id=1&manufacturer_id=1")
        .await;
    let (status, body) = app
        .form("POST", "/api/v1/equipment", "sn=SN-1&device_id=abc&manufacturer_id=1")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["MSG"], "equipment with serial number SN-1 already exists");

    let (status, body) = app.form("POST", "/api/v1/equipment", "sn=SN-2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["MSG"], "missing device_id");

    let (_, body) = app.get("/api/v1/equipment?limit=10&offset=0&all=true").await;
    assert_eq!(body["MSG"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_equipment_action_hints() {
    let app = TestApp::seeded().await;
    app.form("POST", "/api/v1/equipment", "sn=SN-1&device_id=1&manufacturer_id=1")
        .await;

    let (status, body) = app.get("/api/v1/equipment/id?id=9").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["Action"], "GET /api/v1/equipment/id?id=");

    for form in [
        "sn=SN-1&device_id=1&manufacturer_id=1",
        "id=1&device_id=1&manufacturer_id=1",
        "id=1&sn=SN-OLD&device_id=1&manufacturer_id=1",
    ] {
        let (status, body) = app.form("PATCH", "/api/v1/equipment", form).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["Action"],
            "PATCH /api/v1/equipment?id=&sn=&device_id=&manufacturer_id="
        );
    }
}

#[tokio::test]
async fn test_create_device_type_from_multipart() {
    let app = TestApp::new();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/device")
        .header(CONTENT_TYPE, "multipart/form-data; boundary=BOUNDARY")
        .body(Body::from(
            "--BOUNDARY\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nscanner\r\n--BOUNDARY--\r\n",
        ))
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["MSG"]["name"], "scanner");
    assert!(body["MSG"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_equipment_paging() {
    let app = TestApp::seeded().await;
    for i in 1..=25 {
        let (status, _) = app
            .form(
                "POST",
                "/api/v1/equipment",
                &format!("sn=SN-{:03}&device_id=1&manufacturer_id=1", i),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app.get("/api/v1/equipment?limit=10&offset=0").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["MSG"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["auto_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, (1..=10).collect::<Vec<i64>>());

    let (status, body) = app.get("/api/v1/equipment?limit=10").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["MSG"], "missing offset");

    let (status, _) = app.get("/api/v1/equipment?limit=0&offset=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_equipment_filters() {
    let app = TestApp::seeded().await;
    app.form("POST", "/api/v1/device", "name=tablet").await;
    app.form("POST", "/api/v1/equipment", "sn=SN-AB-1&device_id=1&manufacturer_id=1")
        .await;
    app.form("POST", "/api/v1/equipment", "sn=SN-CD-2&device_id=2&manufacturer_id=1")
        .await;

    let (_, body) = app
        .get("/api/v1/equipment/sn-like/AB?limit=10&offset=0")
        .await;
    assert_eq!(body["MSG"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .get("/api/v1/equipment/sn-like/ZZ?limit=10&offset=0")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["MSG"].as_array().unwrap().is_empty());

    let (_, body) = app
        .get("/api/v1/equipment/device/2?limit=10&offset=0")
        .await;
    assert_eq!(body["MSG"][0]["serial_number"], "SN-CD-2");

    let (_, body) = app
        .get("/api/v1/equipment/manufacturer/1?limit=10&offset=0")
        .await;
    assert_eq!(body["MSG"].as_array().unwrap().len(), 2);

    let (status, _) = app
        .get("/api/v1/equipment/manufacturer/9?limit=10&offset=0")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app
        .get("/api/v1/equipment/device/1/manufacturer/1?limit=10&offset=0")
        .await;
    assert_eq!(body["MSG"][0]["serial_number"], "SN-AB-1");

    let (status, body) = app
        .get("/api/v1/equipment/sn/SN-CD-2/manufacturer/1/device/2")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["MSG"]["auto_id"], 2);

    let (status, _) = app.get("/api/v1/equipment/sn/SN-CD-2/device/1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app
        .get("/api/v1/equipment/sn-like/-/manufacturer/1/device/1?limit=10&offset=0")
        .await;
    assert_eq!(body["MSG"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_equipment_endpoints() {
    let app = TestApp::seeded().await;
    app.form("POST", "/api/v1/device", "name=tablet").await;
    app.form("POST", "/api/v1/equipment", "sn=SN-1&device_id=1&manufacturer_id=1")
        .await;
    app.form("POST", "/api/v1/equipment", "sn=SN-2&device_id=1&manufacturer_id=1")
        .await;

    let (status, body) = app.form("PATCH", "/api/v1/equipment/sn", "id=1&sn=SN-2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["Action"], "PATCH /api/v1/equipment/sn");

    let (status, body) = app
        .form("PATCH", "/api/v1/equipment/sn", "id=1&sn=SN-1-NEW")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["MSG"]["serial_number"], "SN-1-NEW");

    let (status, _) = app
        .form(
            "PATCH",
            "/api/v1/equipment",
            "id=1&sn=SN-1&device_id=2&manufacturer_id=1",
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .form(
            "PATCH",
            "/api/v1/equipment",
            "id=1&sn=SN-1-NEW&device_id=2&manufacturer_id=1",
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["MSG"]["device_type_id"], 2);

    let (status, body) = app
        .form("PATCH", "/api/v1/equipment/1/status", "status=inactive")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["MSG"]["status"], "inactive");

    let (status, body) = app
        .form("PATCH", "/api/v1/equipment/2/status", "status=lost")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body);
    let (_, body) = app.get("/api/v1/equipment/id?id=2").await;
    assert_eq!(body["MSG"]["status"], "active");

    let (_, body) = app.get("/api/v1/equipment?limit=10&offset=0").await;
    assert_eq!(body["MSG"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_json_body() {
    let app = TestApp::new();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/device")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\":"))
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body);
}
