//! Lab Loans Module
//!
//! Laboratory equipment loans for TILAB: students, course sections, kits and
//! components, loan sessions, loans and their line items.

// Public exports
pub mod contract;
pub use contract::{
    Alumno, Articulo, Componente, Curso, DetallePrestamo, Id, JornadaPrestamo, Kit,
    KitComponente, LoansError, Page, Prestamo, Record, Ref, Seccion,
};

pub mod config;
pub use config::Config;

pub mod module;
pub use module::LabLoansModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
