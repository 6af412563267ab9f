//! Transport layers

pub mod rest;
