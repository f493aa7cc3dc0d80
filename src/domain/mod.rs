//! Domain aggregates exposed by the leads service layer.

pub mod caller;
pub mod lead;
pub mod saved_view;
pub mod tenant;
pub mod types;
