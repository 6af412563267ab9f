//! HTTP binding of each resource: path segment and wire types

use super::dto::*;
use crate::contract::*;
use crate::domain::Managed;
use serde::{de::DeserializeOwned, Serialize};

/// A resource exposed as `/api/{PATH}` and `/api/{PATH}/{id}`
pub trait RestResource: Managed {
    const PATH: &'static str;

    /// Create/update body
    type Request: DeserializeOwned + Into<Self::Draft> + Send + 'static;

    type Response: Serialize + From<Record<Self>> + Send + 'static;
}

impl RestResource for Curso {
    const PATH: &'static str = "cursos";
    type Request = CursoRequest;
    type Response = CursoDto;
}

impl RestResource for Seccion {
    const PATH: &'static str = "secciones";
    type Request = SeccionRequest;
    type Response = SeccionDto;
}

impl RestResource for Alumno {
    const PATH: &'static str = "alumnos";
    type Request = AlumnoRequest;
    type Response = AlumnoDto;
}

impl RestResource for Componente {
    const PATH: &'static str = "componentes";
    type Request = ComponenteRequest;
    type Response = ComponenteDto;
}

impl RestResource for Kit {
    const PATH: &'static str = "kits";
    type Request = KitRequest;
    type Response = KitDto;
}

impl RestResource for KitComponente {
    const PATH: &'static str = "kit-componentes";
    type Request = KitComponenteRequest;
    type Response = KitComponenteDto;
}

impl RestResource for JornadaPrestamo {
    const PATH: &'static str = "jornadas";
    type Request = JornadaPrestamoRequest;
    type Response = JornadaPrestamoDto;
}

impl RestResource for Prestamo {
    const PATH: &'static str = "prestamos";
    type Request = PrestamoRequest;
    type Response = PrestamoDto;
}

impl RestResource for DetallePrestamo {
    const PATH: &'static str = "detalles-prestamo";
    type Request = DetallePrestamoRequest;
    type Response = DetallePrestamoDto;
}
