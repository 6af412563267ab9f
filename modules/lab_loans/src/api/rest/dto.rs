//! REST DTOs with serde derives for HTTP API
//!
//! Request bodies carry every field as optional so that a missing field is
//! reported by domain validation rather than by the JSON extractor.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ===== Course DTOs =====

/// Course response DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CursoDto {
    pub id: i32,
    #[schema(example = "Redes de Computadoras")]
    pub nombre: String,
    #[schema(example = "RC-2025")]
    pub codigo: String,
}

/// Course create/update request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CursoRequest {
    pub nombre: Option<String>,
    pub codigo: Option<String>,
}

/// Section response DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeccionDto {
    pub id: i32,
    #[schema(example = "A")]
    pub nombre: String,
    pub profesor: String,
    pub curso_id: i32,
}

/// Section create/update request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SeccionRequest {
    pub nombre: Option<String>,
    pub profesor: Option<String>,
    pub curso_id: Option<i32>,
}

// ===== Student DTOs =====

/// Student response DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AlumnoDto {
    pub id: i32,
    /// Student code, unique across all students
    #[schema(example = "20231234")]
    pub codigo: String,
    pub nombres: String,
    pub apellidos: String,
    pub seccion_id: i32,
}

/// Student create/update request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AlumnoRequest {
    pub codigo: Option<String>,
    pub nombres: Option<String>,
    pub apellidos: Option<String>,
    pub seccion_id: Option<i32>,
}

// ===== Equipment DTOs =====

/// Component response DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ComponenteDto {
    pub id: i32,
    #[schema(example = "Multimetro digital")]
    pub nombre: String,
    pub requiere_numero_serie: bool,
}

/// Component create/update request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ComponenteRequest {
    pub nombre: Option<String>,
    /// Defaults to `false`
    pub requiere_numero_serie: Option<bool>,
}

/// Kit response DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KitDto {
    pub id: i32,
    #[schema(example = "Kit de Arduino")]
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

/// Kit create/update request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct KitRequest {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
}

/// Kit composition line response DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KitComponenteDto {
    pub id: i32,
    pub kit_id: i32,
    pub componente_id: i32,
    #[schema(example = 2)]
    pub cantidad: i32,
}

/// Kit composition line create/update request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct KitComponenteRequest {
    pub kit_id: Option<i32>,
    pub componente_id: Option<i32>,
    pub cantidad: Option<i32>,
}

/// Kit composition line with its component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KitLineDto {
    pub id: i32,
    pub kit_id: i32,
    pub cantidad: i32,
    pub componente: ComponenteDto,
}

// ===== Loan DTOs =====

/// Loan session response DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct JornadaPrestamoDto {
    pub id: i32,
    #[schema(value_type = String, format = Date, example = "2025-04-14")]
    pub fecha: NaiveDate,
    pub curso_id: i32,
    pub seccion_id: i32,
}

/// Loan session create/update request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct JornadaPrestamoRequest {
    #[schema(value_type = Option<String>, format = Date)]
    pub fecha: Option<NaiveDate>,
    pub curso_id: Option<i32>,
    pub seccion_id: Option<i32>,
}

/// Loan response DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PrestamoDto {
    pub id: i32,
    pub jornada_id: i32,
    pub alumno_id: i32,
    #[schema(example = "PRESTADO")]
    pub estado: String,
}

/// Loan create/update request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PrestamoRequest {
    pub jornada_id: Option<i32>,
    pub alumno_id: Option<i32>,
    pub estado: Option<String>,
}

/// Loan line item response DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DetallePrestamoDto {
    pub id: i32,
    pub prestamo_id: i32,
    /// Set when the line hands out a kit
    pub kit_id: Option<i32>,
    /// Set when the line hands out a single component
    pub componente_id: Option<i32>,
    pub cantidad: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_serie: Option<String>,
}

/// Loan line item create/update request; exactly one of `kit_id`/`componente_id`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DetallePrestamoRequest {
    pub prestamo_id: Option<i32>,
    pub kit_id: Option<i32>,
    pub componente_id: Option<i32>,
    pub cantidad: Option<i32>,
    pub numero_serie: Option<String>,
}

// ===== Common DTOs =====

/// Pagination query parameters
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ListQuery {
    /// Number of records to skip
    pub skip: Option<u64>,
    /// Maximum number of records to return
    pub limit: Option<u64>,
}

/// One page of records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,

    /// Number of items in this page
    pub total: usize,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    #[schema(example = "UP")]
    pub status: String,
    #[schema(example = "TILAB")]
    pub application: String,
    /// Server local time, no offset
    #[schema(value_type = String, example = "2025-04-14T09:30:00.123")]
    pub timestamp: NaiveDateTime,
    #[schema(example = "0.0.1-SNAPSHOT")]
    pub version: String,
}
