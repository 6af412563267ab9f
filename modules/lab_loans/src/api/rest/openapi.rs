//! OpenAPI document served at `/api/openapi.json`

use super::dto::*;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "TILAB", description = "Laboratory equipment loans"),
    paths(super::handlers::health),
    components(schemas(
        CursoDto,
        CursoRequest,
        SeccionDto,
        SeccionRequest,
        AlumnoDto,
        AlumnoRequest,
        ComponenteDto,
        ComponenteRequest,
        KitDto,
        KitRequest,
        KitComponenteDto,
        KitComponenteRequest,
        KitLineDto,
        JornadaPrestamoDto,
        JornadaPrestamoRequest,
        PrestamoDto,
        PrestamoRequest,
        DetallePrestamoDto,
        DetallePrestamoRequest,
        ListQuery,
        HealthDto,
    )),
    tags((name = "health", description = "Liveness check"))
)]
struct ApiDoc;

pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    doc
}
