//! Domain layer - business logic and services

pub mod policy;
pub mod repository;
pub mod service;
pub mod validation;

pub use policy::Managed;
pub use repository::{ConstraintViolation, Repositories, Repository};
pub use service::Service;
