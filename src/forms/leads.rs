//! Forms for creating, editing and bulk-editing leads.

use serde::Deserialize;
use validator::Validate;

use crate::domain::lead::{LeadStatus, NewLead, UpdateLead};
use crate::domain::types::{
    CompanyName, CountryCode, HubId, LeadEmail, LeadId, LeadName, LeadSource, OwnerRef,
    PhoneNumber,
};
use crate::dto::leads::ListFilterParams;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for adding a single lead.
pub struct AddLeadForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for updating an existing lead.
pub struct SaveLeadForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub source: String,
    /// Checkbox: stamp the lead as contacted now.
    #[serde(default)]
    pub contacted: Option<String>,
}

/// Fields shared by the add and save forms after validation.
struct LeadFields {
    name: LeadName,
    email: LeadEmail,
    phone: Option<PhoneNumber>,
    company: Option<CompanyName>,
    status: LeadStatus,
    source: LeadSource,
}

fn lead_fields(
    name: &str,
    email: &str,
    phone: &str,
    company: &str,
    status: &str,
    source: &str,
    country_code: &CountryCode,
) -> Result<LeadFields, FormError> {
    let phone = match phone.trim() {
        "" => None,
        value => Some(PhoneNumber::with_country_code(value, country_code)?),
    };
    let company = match company.trim() {
        "" => None,
        value => Some(CompanyName::new(value)?),
    };
    let status = match status.trim() {
        "" => LeadStatus::default(),
        value => value.parse()?,
    };

    Ok(LeadFields {
        name: LeadName::new(name)?,
        email: LeadEmail::new(email)?,
        phone,
        company,
        status,
        source: LeadSource::new(source),
    })
}

impl AddLeadForm {
    /// Validates the form and converts it into a domain [`NewLead`].
    pub fn into_new_lead(
        self,
        hub_id: HubId,
        country_code: &CountryCode,
    ) -> Result<NewLead, FormError> {
        self.validate()?;
        let fields = lead_fields(
            &self.name,
            &self.email,
            &self.phone,
            &self.company,
            &self.status,
            &self.source,
            country_code,
        )?;
        Ok(NewLead::new(
            hub_id,
            fields.name,
            fields.email,
            fields.phone,
            fields.company,
            fields.status,
            fields.source,
        ))
    }
}

impl SaveLeadForm {
    pub fn lead_id(&self) -> Result<LeadId, FormError> {
        LeadId::new(self.id).map_err(|_| FormError::InvalidLeadId)
    }

    /// Validates the form and converts it into a domain [`UpdateLead`].
    /// `previous_contact` is kept unless the contacted box was ticked.
    pub fn into_update(
        self,
        country_code: &CountryCode,
        previous_contact: Option<chrono::NaiveDateTime>,
    ) -> Result<UpdateLead, FormError> {
        self.validate()?;
        let fields = lead_fields(
            &self.name,
            &self.email,
            &self.phone,
            &self.company,
            &self.status,
            &self.source,
            country_code,
        )?;
        let last_contacted_at = match self.contacted {
            Some(_) => Some(chrono::Utc::now().naive_utc()),
            None => previous_contact,
        };
        Ok(UpdateLead {
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            company: fields.company,
            status: fields.status,
            source: fields.source,
            last_contacted_at,
        })
    }
}

/// Bulk action posted from the list: the checked ids, the owner for
/// assignments and the filter the list was rendered with.
#[derive(Debug, Default, Deserialize)]
pub struct BulkLeadsForm {
    #[serde(default)]
    pub ids: Vec<i32>,
    /// Target owner email for assignments; blank means unassign.
    #[serde(default)]
    pub owner: String,
    pub tab: Option<String>,
    pub view: Option<i32>,
    pub search: Option<String>,
    pub loaded: Option<usize>,
}

/// Parsed [`BulkLeadsForm`].
pub struct BulkLeadsPayload {
    pub ids: Vec<LeadId>,
    pub owner: Option<OwnerRef>,
    pub filter: ListFilterParams,
}

impl BulkLeadsForm {
    /// Decodes a urlencoded body where `ids` may repeat.
    pub fn from_bytes(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|e| FormError::Encoding(e.to_string()))
    }
}

impl TryFrom<BulkLeadsForm> for BulkLeadsPayload {
    type Error = FormError;

    fn try_from(form: BulkLeadsForm) -> Result<Self, Self::Error> {
        let mut ids = form
            .ids
            .into_iter()
            .map(|id| LeadId::new(id).map_err(|_| FormError::InvalidLeadId))
            .collect::<Result<Vec<_>, _>>()?;
        ids.sort_unstable();
        ids.dedup();

        let owner = match form.owner.trim() {
            "" => None,
            value => Some(OwnerRef::new(value.to_lowercase())?),
        };

        Ok(Self {
            ids,
            owner,
            filter: ListFilterParams {
                tab: form.tab,
                view: form.view,
                search: form.search,
                loaded: form.loaded,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::TypeConstraintError;

    fn add_form(status: &str) -> AddLeadForm {
        AddLeadForm {
            name: "  Ann  ".to_string(),
            email: "Ann@Example.com".to_string(),
            phone: "98765 43210".to_string(),
            company: " ".to_string(),
            status: status.to_string(),
            source: "".to_string(),
        }
    }

    #[test]
    fn add_form_builds_new_lead() {
        let code = CountryCode::new("91").unwrap();
        let lead = add_form("qualified")
            .into_new_lead(HubId::new(3).unwrap(), &code)
            .unwrap();

        assert_eq!(lead.name.as_str(), "Ann");
        assert_eq!(lead.email.as_str(), "ann@example.com");
        assert_eq!(lead.phone.unwrap().as_str(), "+919876543210");
        assert_eq!(lead.company, None);
        assert_eq!(lead.status, LeadStatus::Qualified);
        assert_eq!(lead.source.as_str(), LeadSource::MANUAL);
    }

    #[test]
    fn add_form_rejects_unknown_status() {
        let err = add_form("maybe")
            .into_new_lead(HubId::new(3).unwrap(), &CountryCode::default())
            .unwrap_err();

        assert!(matches!(
            err,
            FormError::InvalidValue(TypeConstraintError::UnknownStatus(_))
        ));
    }

    #[test]
    fn add_form_rejects_bad_email() {
        let mut form = add_form("");
        form.email = "nope".to_string();

        let err = form
            .into_new_lead(HubId::new(3).unwrap(), &CountryCode::default())
            .unwrap_err();

        assert!(matches!(err, FormError::Validation(_)));
    }

    #[test]
    fn save_form_keeps_previous_contact_unless_ticked() {
        let previous = chrono::NaiveDate::from_ymd_opt(2026, 1, 2)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let form = SaveLeadForm {
            id: 5,
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            phone: String::new(),
            company: "Acme".to_string(),
            status: "Won".to_string(),
            source: "Referral".to_string(),
            contacted: None,
        };

        let update = form
            .into_update(&CountryCode::default(), Some(previous))
            .unwrap();

        assert_eq!(update.last_contacted_at, Some(previous));
        assert_eq!(update.company.unwrap().as_str(), "Acme");
        assert_eq!(update.status, LeadStatus::Won);
    }

    #[test]
    fn bulk_form_reads_repeated_ids() {
        let form = BulkLeadsForm::from_bytes(
            b"ids=3&ids=1&ids=3&owner=Rep%40Example.com&tab=my&search=ann&loaded=100",
        )
        .unwrap();

        let payload = BulkLeadsPayload::try_from(form).unwrap();

        assert_eq!(
            payload.ids.iter().map(|id| id.get()).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(payload.owner.unwrap().as_str(), "rep@example.com");
        assert_eq!(payload.filter.tab.as_deref(), Some("my"));
        assert_eq!(payload.filter.search.as_deref(), Some("ann"));
        assert_eq!(payload.filter.loaded, Some(100));
    }

    #[test]
    fn bulk_form_rejects_non_positive_ids() {
        let form = BulkLeadsForm::from_bytes(b"ids=0").unwrap();
        assert!(matches!(
            BulkLeadsPayload::try_from(form),
            Err(FormError::InvalidLeadId)
        ));
    }
}
