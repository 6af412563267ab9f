//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_domain_error, map_json_rejection, Problem},
    resource::RestResource,
};
use crate::config::Config;
use crate::contract::*;
use crate::domain::Service;
use axum::{
    extract::{rejection::JsonRejection, Path, Query},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

// ===== Resource CRUD =====

/// List records of one resource
pub async fn list<T: RestResource>(
    service: Arc<Service>,
    config: Arc<Config>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<T::Response>>, Problem> {
    let page = config.page(query.skip, query.limit);
    let records = service.list::<T>(page).await.map_err(map_domain_error)?;

    let items: Vec<T::Response> = records.into_iter().map(Into::into).collect();
    Ok(Json(items.into()))
}

/// Get a specific record
pub async fn get<T: RestResource>(
    service: Arc<Service>,
    Path(id): Path<Id>,
) -> Result<Json<T::Response>, Problem> {
    let record = service
        .get::<T>(id)
        .await
        .map_err(|e| map_domain_error(e).with_instance(format!("/api/{}/{}", T::PATH, id)))?;

    Ok(Json(record.into()))
}

/// Create a new record
pub async fn create<T: RestResource>(
    service: Arc<Service>,
    body: Result<Json<T::Request>, JsonRejection>,
) -> Result<(StatusCode, Json<T::Response>), Problem> {
    let Json(req) = body.map_err(map_json_rejection)?;

    let record = service
        .create::<T>(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Replace all fields of a record
pub async fn update<T: RestResource>(
    service: Arc<Service>,
    Path(id): Path<Id>,
    body: Result<Json<T::Request>, JsonRejection>,
) -> Result<Json<T::Response>, Problem> {
    let Json(req) = body.map_err(map_json_rejection)?;

    let record = service
        .update::<T>(id, req.into())
        .await
        .map_err(|e| map_domain_error(e).with_instance(format!("/api/{}/{}", T::PATH, id)))?;

    Ok(Json(record.into()))
}

/// Delete a record
pub async fn delete<T: RestResource>(
    service: Arc<Service>,
    Path(id): Path<Id>,
) -> Result<StatusCode, Problem> {
    service
        .delete::<T>(id)
        .await
        .map_err(|e| map_domain_error(e).with_instance(format!("/api/{}/{}", T::PATH, id)))?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Association traversal =====

/// List child records of a parent
pub async fn list_children<P, C>(
    service: Arc<Service>,
    config: Arc<Config>,
    Path(parent_id): Path<Id>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<C::Response>>, Problem>
where
    P: RestResource,
    C: RestResource + LinkedBy<P>,
{
    let page = config.page(query.skip, query.limit);
    let records = service
        .children::<P, C>(Ref::new(parent_id), page)
        .await
        .map_err(map_domain_error)?;

    let items: Vec<C::Response> = records.into_iter().map(Into::into).collect();
    Ok(Json(items.into()))
}

/// Composition of a kit with each component loaded
pub async fn kit_composition(
    service: Arc<Service>,
    config: Arc<Config>,
    Path(kit_id): Path<Id>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<KitLineDto>>, Problem> {
    let page = config.page(query.skip, query.limit);
    let lines = service
        .kit_composition(Ref::new(kit_id), page)
        .await
        .map_err(map_domain_error)?;

    let items: Vec<KitLineDto> = lines.into_iter().map(Into::into).collect();
    Ok(Json(items.into()))
}

// ===== Health =====

/// Application name reported by the health check
pub const APPLICATION: &str = "TILAB";

/// Build version reported by the health check
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Liveness report; always `UP`
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthDto))
)]
pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "UP".to_string(),
        application: APPLICATION.to_string(),
        timestamp: chrono::Local::now().naive_local(),
        version: VERSION.to_string(),
    })
}
