//! Hub-scoped configuration loaded explicitly at the start of each request.

use serde::{Deserialize, Serialize};

use crate::domain::types::{CountryCode, HubId, TypeConstraintError};

/// Page size used when a hub has not configured one.
pub const DEFAULT_PAGE_SIZE: usize = 50;
/// Upper bound for a configured page size.
pub const MAX_PAGE_SIZE: usize = 500;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TenantSettings {
    pub hub_id: HubId,
    /// Calling code prepended to imported phones that lack a `+`.
    pub default_country_code: CountryCode,
    /// Number of leads fetched per "load more".
    pub page_size: usize,
}

impl TenantSettings {
    /// Settings used for hubs that never saved their own.
    pub fn defaults(hub_id: HubId) -> Self {
        Self {
            hub_id,
            default_country_code: CountryCode::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn try_new(
        hub_id: HubId,
        default_country_code: &str,
        page_size: usize,
    ) -> Result<Self, TypeConstraintError> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(TypeConstraintError::InvalidValue(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(Self {
            hub_id,
            default_country_code: CountryCode::new(default_country_code)?,
            page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_page_size() {
        let hub = HubId::new(1).unwrap();
        assert!(TenantSettings::try_new(hub, "+1", 0).is_err());
        assert!(TenantSettings::try_new(hub, "+1", MAX_PAGE_SIZE + 1).is_err());
        let settings = TenantSettings::try_new(hub, "44", 25).unwrap();
        assert_eq!(settings.default_country_code.as_str(), "+44");
        assert_eq!(settings.page_size, 25);
    }
}
