//! DTOs exposed by the JSON API.

use serde::Deserialize;

/// Query parameters accepted by `/api/v1/leads`.
#[derive(Debug, Default, Deserialize)]
pub struct LeadsQuery {
    #[serde(default)]
    pub offset: usize,
    /// Defaults to the hub's page size.
    pub limit: Option<usize>,
}
