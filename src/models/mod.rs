//! Database models shared across the leads repository.

#[cfg(feature = "server")]
pub mod config;
pub mod lead;
pub mod saved_view;
pub mod tenant_settings;
