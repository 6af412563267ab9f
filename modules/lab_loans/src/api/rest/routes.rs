//! Route registration

use super::{
    dto::*,
    error::{map_path_rejection, map_query_rejection, Problem},
    handlers, openapi,
    resource::RestResource,
};
use crate::config::Config;
use crate::contract::*;
use crate::domain::Service;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;

/// Register all REST routes
pub fn register_routes(
    router: Router,
    service: Arc<Service>,
    config: Arc<Config>,
) -> anyhow::Result<Router> {
    let router = router
        // Health
        .route("/health", get(health_handler))
        .route("/api/health", get(health_handler))
        .route("/api/openapi.json", get(openapi_handler));

    // Resource CRUD
    let router = crud::<Curso>(router);
    let router = crud::<Seccion>(router);
    let router = crud::<Alumno>(router);
    let router = crud::<Componente>(router);
    let router = crud::<Kit>(router);
    let router = crud::<KitComponente>(router);
    let router = crud::<JornadaPrestamo>(router);
    let router = crud::<Prestamo>(router);
    let router = crud::<DetallePrestamo>(router);

    // Association traversal
    let router = nested::<Curso, Seccion>(router, "secciones");
    let router = nested::<Curso, JornadaPrestamo>(router, "jornadas");
    let router = nested::<Seccion, Alumno>(router, "alumnos");
    let router = nested::<Seccion, JornadaPrestamo>(router, "jornadas");
    let router = nested::<Alumno, Prestamo>(router, "prestamos");
    let router = nested::<JornadaPrestamo, Prestamo>(router, "prestamos");
    let router = nested::<Prestamo, DetallePrestamo>(router, "detalles");

    let router = router
        .route(
            &format!("/api/{}/{{id}}/componentes", Kit::PATH),
            get(kit_composition_handler),
        )
        // Add service and config as extensions for handlers
        .layer(Extension(service))
        .layer(Extension(config));

    Ok(router)
}

fn crud<T: RestResource>(router: Router) -> Router {
    router
        .route(
            &format!("/api/{}", T::PATH),
            get(list_handler::<T>).post(create_handler::<T>),
        )
        .route(
            &format!("/api/{}/{{id}}", T::PATH),
            get(get_handler::<T>)
                .put(update_handler::<T>)
                .delete(delete_handler::<T>),
        )
}

fn nested<P, C>(router: Router, segment: &str) -> Router
where
    P: RestResource,
    C: RestResource + LinkedBy<P>,
{
    router.route(
        &format!("/api/{}/{{id}}/{}", P::PATH, segment),
        get(list_children_handler::<P, C>),
    )
}

// ===== Handler wrappers that extract service and config from Extension =====

async fn list_handler<T: RestResource>(
    Extension(service): Extension<Arc<Service>>,
    Extension(config): Extension<Arc<Config>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ListResponse<T::Response>>, Problem> {
    handlers::list::<T>(service, config, query.map_err(map_query_rejection)?).await
}

async fn get_handler<T: RestResource>(
    Extension(service): Extension<Arc<Service>>,
    path: Result<Path<Id>, PathRejection>,
) -> Result<Json<T::Response>, Problem> {
    handlers::get::<T>(service, path.map_err(map_path_rejection)?).await
}

async fn create_handler<T: RestResource>(
    Extension(service): Extension<Arc<Service>>,
    body: Result<Json<T::Request>, JsonRejection>,
) -> Result<(StatusCode, Json<T::Response>), Problem> {
    handlers::create::<T>(service, body).await
}

async fn update_handler<T: RestResource>(
    Extension(service): Extension<Arc<Service>>,
    path: Result<Path<Id>, PathRejection>,
    body: Result<Json<T::Request>, JsonRejection>,
) -> Result<Json<T::Response>, Problem> {
    handlers::update::<T>(service, path.map_err(map_path_rejection)?, body).await
}

async fn delete_handler<T: RestResource>(
    Extension(service): Extension<Arc<Service>>,
    path: Result<Path<Id>, PathRejection>,
) -> Result<StatusCode, Problem> {
    handlers::delete::<T>(service, path.map_err(map_path_rejection)?).await
}

async fn list_children_handler<P, C>(
    Extension(service): Extension<Arc<Service>>,
    Extension(config): Extension<Arc<Config>>,
    path: Result<Path<Id>, PathRejection>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ListResponse<C::Response>>, Problem>
where
    P: RestResource,
    C: RestResource + LinkedBy<P>,
{
    let path = path.map_err(map_path_rejection)?;
    let query = query.map_err(map_query_rejection)?;
    handlers::list_children::<P, C>(service, config, path, query).await
}

async fn kit_composition_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(config): Extension<Arc<Config>>,
    path: Result<Path<Id>, PathRejection>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ListResponse<KitLineDto>>, Problem> {
    let path = path.map_err(map_path_rejection)?;
    let query = query.map_err(map_query_rejection)?;
    handlers::kit_composition(service, config, path, query).await
}

async fn health_handler() -> Json<HealthDto> {
    handlers::health().await
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi::api_doc())
}
