//! Data transfer objects shared between routes and services.

pub mod api;
pub mod leads;
pub mod settings;
