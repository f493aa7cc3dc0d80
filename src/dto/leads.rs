//! DTOs used by the lead list page.

use serde::{Deserialize, Serialize};

use crate::domain::lead::Lead;
use crate::domain::saved_view::SavedView;
use crate::listing::filter::Tab;

/// List filter carried in the index query string and echoed back by bulk
/// forms, so bulk actions see the same visible set the user saw.
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListFilterParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<String>,
    /// Saved view to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Number of leads already loaded; the page loads at least this many.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded: Option<usize>,
}

/// Data required to render the main index template.
#[derive(Debug, Serialize)]
pub struct IndexPageData {
    /// Visible leads in list order.
    pub leads: Vec<Lead>,
    /// Leads accumulated before filtering.
    pub loaded: usize,
    /// Total reported by the store.
    pub total: usize,
    pub has_more: bool,
    /// `loaded` value for the "load more" link.
    pub next_loaded: usize,
    pub tab: Tab,
    pub search: String,
    pub active_view: Option<i32>,
    pub views: Vec<SavedView>,
    /// Whether tabs and bulk actions are offered.
    pub privileged: bool,
    pub is_admin: bool,
}
