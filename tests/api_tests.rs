use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{get, patch, post};
use axum::Json;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_availability_endpoint_accepts_json() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rental/availability")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "vehicle": "Avanza Blanco",
                        "start_date": "2024-06-01",
                        "end_date": "2024-06-05"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_availability_endpoint_rejects_get() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/rental/availability")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_booking_request_status_route_shape() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/api/booking-request/8c0e3f4e-9a1d-4a51-9f5a-0d62a4c3a111/status")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "status": "confirmed",
                        "staff_id": "11111111-2222-3333-4444-555555555555"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// Función helper para crear la app de test con la misma forma de rutas
// que el router real (handlers stub, sin base de datos)
fn create_test_app() -> axum::Router {
    axum::Router::new()
        .route("/health", get(|| async { Json(json!({ "status": "healthy" })) }))
        .route(
            "/api/rental/availability",
            post(|| async { Json(json!({ "available": true, "conflicts": [] })) }),
        )
        .route(
            "/api/booking-request/:id/status",
            patch(|| async { Json(json!({ "success": true })) }),
        )
        .route(
            "/api/calendar",
            get(|| async { Json(json!([])) }),
        )
}
