//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs
//!
//! Writes rejected by a storage constraint carry a [`ConstraintViolation`]
//! inside the returned `anyhow::Error` so the service can map them.

use crate::contract::*;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A write rejected by a storage-level constraint
#[derive(Debug, thiserror::Error)]
pub enum ConstraintViolation {
    /// Unique index already holds the key
    #[error("unique constraint violated: {0}")]
    Unique(String),

    /// Referenced row is missing, or the row is still referenced
    #[error("foreign key constraint violated: {0}")]
    ForeignKey(String),
}

/// Persistence contract of one resource
#[async_trait]
pub trait Repository<T: Resource>: Send + Sync {
    /// Insert validated fields, returning the record with its generated id
    async fn insert(&self, fields: &T) -> Result<Record<T>>;

    /// Find a record by identifier
    async fn find_by_id(&self, id: Id) -> Result<Option<Record<T>>>;

    /// Find the record holding a unique key (see `Resource::unique_key`)
    async fn find_by_unique_key(&self, key: &str) -> Result<Option<Record<T>>>;

    /// List records ordered by id
    async fn list(&self, page: Page) -> Result<Vec<Record<T>>>;

    /// List records pointing at a parent, ordered by id
    async fn list_linked(&self, link: T::Link, page: Page) -> Result<Vec<Record<T>>>;

    /// Count records pointing at a parent
    async fn count_linked(&self, link: T::Link) -> Result<u64>;

    /// Replace all fields of an existing record; `None` if it does not exist
    async fn update(&self, record: &Record<T>) -> Result<Option<Record<T>>>;

    /// Delete a record; `false` if it did not exist
    async fn delete(&self, id: Id) -> Result<bool>;

    /// Delete every record pointing at a parent, returning how many were removed
    async fn delete_linked(&self, link: T::Link) -> Result<u64>;

    /// Check if a record exists
    async fn exists(&self, id: Id) -> Result<bool>;
}

/// One repository per resource
#[derive(Clone)]
pub struct Repositories {
    pub cursos: Arc<dyn Repository<Curso>>,
    pub secciones: Arc<dyn Repository<Seccion>>,
    pub alumnos: Arc<dyn Repository<Alumno>>,
    pub componentes: Arc<dyn Repository<Componente>>,
    pub kits: Arc<dyn Repository<Kit>>,
    pub kit_componentes: Arc<dyn Repository<KitComponente>>,
    pub jornadas: Arc<dyn Repository<JornadaPrestamo>>,
    pub prestamos: Arc<dyn Repository<Prestamo>>,
    pub detalles: Arc<dyn Repository<DetallePrestamo>>,
}
