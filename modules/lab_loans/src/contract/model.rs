//! Contract models for lab loans
//!
//! These models are transport-agnostic and used by every layer of the module.
//! NO serde derives - these are pure domain models.

use chrono::NaiveDate;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::Deref;

/// Surrogate identity assigned by storage on insert
pub type Id = i32;

/// Lazily-resolved reference to another record.
///
/// Only the identifier travels with the owning record; the referenced record
/// is loaded on demand through `Service::resolve`.
pub struct Ref<T> {
    id: Id,
    _target: PhantomData<fn() -> T>,
}

impl<T> Ref<T> {
    pub const fn new(id: Id) -> Self {
        Self {
            id,
            _target: PhantomData,
        }
    }

    pub const fn id(&self) -> Id {
        self.id
    }
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Ref<T> {}

impl<T> PartialEq for Ref<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Ref<T> {}

impl<T> Hash for Ref<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ref({})", self.id)
    }
}

impl<T> From<Id> for Ref<T> {
    fn from(id: Id) -> Self {
        Self::new(id)
    }
}

/// A persisted record: generated identity plus validated fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<T> {
    pub id: Id,
    pub fields: T,
}

impl<T> Record<T> {
    pub fn new(id: Id, fields: T) -> Self {
        Self { id, fields }
    }

    /// Reference pointing at this record
    pub fn reference(&self) -> Ref<T> {
        Ref::new(self.id)
    }

    pub fn into_fields(self) -> T {
        self.fields
    }
}

impl<T> Deref for Record<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.fields
    }
}

/// Offset/limit pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
}

impl Page {
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, 100)
    }
}

// ===== Courses and sections =====

/// Course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curso {
    pub nombre: String,
    /// Unique course code
    pub codigo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursoDraft {
    pub nombre: Option<String>,
    pub codigo: Option<String>,
}

/// Course section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seccion {
    pub nombre: String,
    pub profesor: String,
    pub curso: Ref<Curso>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeccionDraft {
    pub nombre: Option<String>,
    pub profesor: Option<String>,
    pub curso: Option<Ref<Curso>>,
}

/// Student enrolled in a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alumno {
    /// Unique student code
    pub codigo: String,
    pub nombres: String,
    pub apellidos: String,
    pub seccion: Ref<Seccion>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlumnoDraft {
    pub codigo: Option<String>,
    pub nombres: Option<String>,
    pub apellidos: Option<String>,
    pub seccion: Option<Ref<Seccion>>,
}

// ===== Equipment =====

/// Individual equipment part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Componente {
    pub nombre: String,
    pub requiere_numero_serie: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponenteDraft {
    pub nombre: Option<String>,
    /// Absent means `false`
    pub requiere_numero_serie: Option<bool>,
}

/// Bundle of components loaned as a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kit {
    pub nombre: String,
    pub descripcion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KitDraft {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
}

/// How many units of a component belong to a kit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitComponente {
    pub kit: Ref<Kit>,
    pub componente: Ref<Componente>,
    pub cantidad: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KitComponenteDraft {
    pub kit: Option<Ref<Kit>>,
    pub componente: Option<Ref<Componente>>,
    pub cantidad: Option<i32>,
}

/// A composition line of a kit with its component loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitLine {
    pub linea: Record<KitComponente>,
    pub componente: Record<Componente>,
}

// ===== Loans =====

/// Scheduled loan session for a course section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JornadaPrestamo {
    pub fecha: NaiveDate,
    pub curso: Ref<Curso>,
    pub seccion: Ref<Seccion>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JornadaPrestamoDraft {
    pub fecha: Option<NaiveDate>,
    pub curso: Option<Ref<Curso>>,
    pub seccion: Option<Ref<Seccion>>,
}

/// One loan transaction of a student within a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prestamo {
    pub jornada: Ref<JornadaPrestamo>,
    pub alumno: Ref<Alumno>,
    /// Free-text status; no value set or transitions are enforced
    pub estado: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrestamoDraft {
    pub jornada: Option<Ref<JornadaPrestamo>>,
    pub alumno: Option<Ref<Alumno>>,
    pub estado: Option<String>,
}

/// What a loan line hands out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Articulo {
    Kit(Ref<Kit>),
    Componente(Ref<Componente>),
}

impl Articulo {
    pub fn kit(&self) -> Option<Ref<Kit>> {
        match self {
            Self::Kit(kit) => Some(*kit),
            Self::Componente(_) => None,
        }
    }

    pub fn componente(&self) -> Option<Ref<Componente>> {
        match self {
            Self::Componente(componente) => Some(*componente),
            Self::Kit(_) => None,
        }
    }
}

/// One line item within a loan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetallePrestamo {
    pub prestamo: Ref<Prestamo>,
    pub articulo: Articulo,
    pub cantidad: i32,
    pub numero_serie: Option<String>,
}

/// Incoming line item; exactly one of `kit`/`componente` must be present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetallePrestamoDraft {
    pub prestamo: Option<Ref<Prestamo>>,
    pub kit: Option<Ref<Kit>>,
    pub componente: Option<Ref<Componente>>,
    pub cantidad: Option<i32>,
    pub numero_serie: Option<String>,
}

// ===== Association links =====

/// Link type of resources that hold no foreign keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unlinked {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeccionLink {
    Curso(Ref<Curso>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlumnoLink {
    Seccion(Ref<Seccion>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KitComponenteLink {
    Kit(Ref<Kit>),
    Componente(Ref<Componente>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JornadaLink {
    Curso(Ref<Curso>),
    Seccion(Ref<Seccion>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrestamoLink {
    Jornada(Ref<JornadaPrestamo>),
    Alumno(Ref<Alumno>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetalleLink {
    Prestamo(Ref<Prestamo>),
    Kit(Ref<Kit>),
    Componente(Ref<Componente>),
}
