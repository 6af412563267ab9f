//! REST API layer

pub mod dto;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod openapi;
pub mod resource;
pub mod routes;
