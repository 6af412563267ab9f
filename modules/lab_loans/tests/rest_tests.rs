//! REST router tests over in-memory repositories

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use lab_loans::LabLoansModule;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;
use common::*;

fn app() -> Router {
    let module = LabLoansModule::default();
    module.init_with_repositories(mock_repositories());
    module.register_rest(Router::new()).unwrap()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, path: &str, body: Value) -> Value {
    let (status, value) = send(app, Method::POST, path, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "POST {} -> {}", path, value);
    value
}

#[tokio::test]
async fn test_health_on_both_routes() {
    print_test_header(
        "test_health_on_both_routes",
        &["GET /health and /api/health always report UP"],
    );
    let app = app();

    for uri in ["/health", "/api/health", "/health"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "UP");
        assert_eq!(body["application"], "TILAB");
        assert_eq!(body["version"], "0.0.1-SNAPSHOT");

        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(
            chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f").is_ok(),
            "local timestamp without offset: {}",
            timestamp
        );
    }
}

#[tokio::test]
async fn test_create_and_read_back() {
    let app = app();

    let curso = create(&app, "/api/cursos", json!({"nombre": "Redes", "codigo": "RC-1"})).await;
    assert_eq!(curso["id"], 1);

    let (status, fetched) = send(&app, Method::GET, "/api/cursos/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, curso);

    let (status, list) = send(&app, Method::GET, "/api/cursos?skip=0&limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
    assert_eq!(list["items"][0]["codigo"], "RC-1");
}

#[tokio::test]
async fn test_missing_field_is_bad_request() {
    let app = app();

    let (status, problem) = send(&app, Method::POST, "/api/componentes", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["status"], 400);
    assert!(problem["detail"].as_str().unwrap().contains("nombre"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/componentes",
        Some(json!({"nombre": 12})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_statuses() {
    print_test_header(
        "test_error_statuses",
        &["404 unknown id, 422 unknown reference, 409 duplicate code"],
    );
    let app = app();

    let (status, problem) = send(&app, Method::GET, "/api/kits/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(problem["instance"], "/api/kits/42");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/secciones",
        Some(json!({"nombre": "A", "profesor": "Rosa", "curso_id": 999})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    create(&app, "/api/cursos", json!({"nombre": "Redes", "codigo": "RC-1"})).await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/cursos",
        Some(json!({"nombre": "Otro", "codigo": "RC-1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_loan_flow_and_traversal() {
    print_test_header(
        "test_loan_flow_and_traversal",
        &["Build a loan over HTTP and walk its associations"],
    );
    let app = app();

    let curso = create(&app, "/api/cursos", json!({"nombre": "Redes", "codigo": "RC-1"})).await;
    let seccion = create(
        &app,
        "/api/secciones",
        json!({"nombre": "A", "profesor": "Rosa", "curso_id": curso["id"]}),
    )
    .await;
    let alumno = create(
        &app,
        "/api/alumnos",
        json!({"codigo": "20231234", "nombres": "Luis", "apellidos": "Mamani", "seccion_id": seccion["id"]}),
    )
    .await;
    let kit = create(&app, "/api/kits", json!({"nombre": "Kit de Arduino"})).await;
    let componente = create(
        &app,
        "/api/componentes",
        json!({"nombre": "Multimetro", "requiere_numero_serie": true}),
    )
    .await;
    create(
        &app,
        "/api/kit-componentes",
        json!({"kit_id": kit["id"], "componente_id": componente["id"], "cantidad": 2}),
    )
    .await;
    let jornada = create(
        &app,
        "/api/jornadas",
        json!({"fecha": "2025-04-14", "curso_id": curso["id"], "seccion_id": seccion["id"]}),
    )
    .await;
    assert_eq!(jornada["fecha"], "2025-04-14");

    let prestamo = create(
        &app,
        "/api/prestamos",
        json!({"jornada_id": jornada["id"], "alumno_id": alumno["id"], "estado": "PRESTADO"}),
    )
    .await;
    let detalle = create(
        &app,
        "/api/detalles-prestamo",
        json!({"prestamo_id": prestamo["id"], "kit_id": kit["id"], "cantidad": 1}),
    )
    .await;
    assert_eq!(detalle["componente_id"], Value::Null);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/detalles-prestamo",
        Some(json!({"prestamo_id": prestamo["id"], "kit_id": kit["id"], "componente_id": componente["id"], "cantidad": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, detalles) = send(&app, Method::GET, "/api/prestamos/1/detalles", None).await;
    assert_eq!(detalles["total"], 1);

    let (_, prestamos) = send(&app, Method::GET, "/api/jornadas/1/prestamos", None).await;
    assert_eq!(prestamos["items"][0]["estado"], "PRESTADO");

    let (_, alumnos) = send(&app, Method::GET, "/api/secciones/1/alumnos", None).await;
    assert_eq!(alumnos["items"][0]["codigo"], "20231234");

    let (_, composition) = send(&app, Method::GET, "/api/kits/1/componentes", None).await;
    assert_eq!(composition["items"][0]["cantidad"], 2);
    assert_eq!(composition["items"][0]["componente"]["nombre"], "Multimetro");

    let (status, _) = send(&app, Method::GET, "/api/alumnos/99/prestamos", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_and_delete() {
    let app = app();
    create(&app, "/api/kits", json!({"nombre": "Kit"})).await;

    let (status, kit) = send(
        &app,
        Method::PUT,
        "/api/kits/1",
        Some(json!({"nombre": "Kit de Redes", "descripcion": "Switch y cables"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kit["descripcion"], "Switch y cables");

    let (status, body) = send(&app, Method::DELETE, "/api/kits/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::DELETE, "/api/kits/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document() {
    let app = app();

    let (status, doc) = send(&app, Method::GET, "/api/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "TILAB");
    assert!(doc["components"]["schemas"]["AlumnoDto"].is_object());
}

#[tokio::test]
async fn test_unparsable_path_and_query_are_problems() {
    print_test_header(
        "test_unparsable_path_and_query_are_problems",
        &["Bad ids and paging parameters answer 400 with Problem Details"],
    );
    let app = app();
    create(&app, "/api/cursos", json!({"nombre": "Redes", "codigo": "RC-1"})).await;

    for uri in [
        "/api/kits/abc",
        "/api/cursos?skip=-1",
        "/api/cursos?limit=muchos",
        "/api/cursos/uno/secciones",
        "/api/cursos/1/secciones?skip=-5",
        "/api/kits/1/componentes?limit=-1",
    ] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/problem+json",
            "{}",
            uri
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let problem: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(problem["status"], 400, "{}", uri);
    }

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/api/cursos/xyz")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
