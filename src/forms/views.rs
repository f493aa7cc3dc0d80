//! Form for saving the current filters as a named view.

use serde::Deserialize;

use crate::domain::lead::LeadStatus;
use crate::domain::saved_view::{DateRange, NewSavedView, ViewFilter};
use crate::domain::types::{HubId, OwnerRef, SavedViewName};
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize)]
pub struct AddViewForm {
    #[serde(default)]
    pub name: String,
    /// Repeated checkbox values.
    #[serde(default)]
    pub statuses: Vec<String>,
    /// Comma separated source labels.
    #[serde(default)]
    pub sources: String,
    #[serde(default)]
    pub date_range: String,
}

impl AddViewForm {
    pub fn from_bytes(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|e| FormError::Encoding(e.to_string()))
    }

    pub fn into_new_view(self, hub_id: HubId, owner: OwnerRef) -> Result<NewSavedView, FormError> {
        let name = SavedViewName::new(self.name)?;

        let mut statuses = self
            .statuses
            .iter()
            .map(|status| status.parse::<LeadStatus>())
            .collect::<Result<Vec<_>, _>>()?;
        statuses.dedup();

        let mut sources: Vec<String> = self
            .sources
            .split(',')
            .map(|source| ammonia::clean(source).trim().to_string())
            .filter(|source| !source.is_empty())
            .collect();
        sources.sort_unstable();
        sources.dedup();

        let date_range = self.date_range.parse::<DateRange>().unwrap_or_default();

        Ok(NewSavedView::new(
            hub_id,
            owner,
            name,
            ViewFilter {
                statuses,
                sources,
                date_range,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::TypeConstraintError;

    fn owner() -> OwnerRef {
        OwnerRef::new("rep@example.com").unwrap()
    }

    #[test]
    fn parses_repeated_statuses_and_sources() {
        let form = AddViewForm::from_bytes(
            b"name=Hot&statuses=Qualified&statuses=Won&sources=Website%2C+Referral%2C&date_range=month",
        )
        .unwrap();

        let view = form.into_new_view(HubId::new(1).unwrap(), owner()).unwrap();

        assert_eq!(view.name.as_str(), "Hot");
        assert_eq!(
            view.filter.statuses,
            vec![LeadStatus::Qualified, LeadStatus::Won]
        );
        assert_eq!(view.filter.sources, vec!["Referral", "Website"]);
        assert_eq!(view.filter.date_range, DateRange::Month);
    }

    #[test]
    fn empty_name_is_rejected() {
        let form = AddViewForm {
            name: "   ".to_string(),
            ..AddViewForm::default()
        };

        let err = form.into_new_view(HubId::new(1).unwrap(), owner()).unwrap_err();

        assert!(matches!(
            err,
            FormError::InvalidValue(TypeConstraintError::EmptyString)
        ));
    }

    #[test]
    fn unknown_range_means_all() {
        let form = AddViewForm {
            name: "Any".to_string(),
            date_range: "decade".to_string(),
            ..AddViewForm::default()
        };

        let view = form.into_new_view(HubId::new(1).unwrap(), owner()).unwrap();

        assert_eq!(view.filter.date_range, DateRange::All);
        assert!(view.filter.statuses.is_empty());
    }
}
