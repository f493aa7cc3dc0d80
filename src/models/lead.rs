use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::lead::{
    Lead as DomainLead, NewLead as DomainNewLead, UpdateLead as DomainUpdateLead,
};
use crate::domain::types::{
    CompanyName, HubId, LeadEmail, LeadId, LeadName, LeadSource, PhoneNumber,
    TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::leads)]
/// Diesel model for [`crate::domain::lead::Lead`].
pub struct Lead {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: String,
    pub source: String,
    pub assigned_to: Option<String>,
    pub last_contacted_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::leads)]
/// Insertable form of [`Lead`].
pub struct NewLead<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub company: Option<&'a str>,
    pub status: &'a str,
    pub source: &'a str,
    pub assigned_to: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::leads)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Lead`] record.
pub struct UpdateLead<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub company: Option<&'a str>,
    pub status: &'a str,
    pub source: &'a str,
    pub last_contacted_at: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Lead> for DomainLead {
    type Error = TypeConstraintError;

    fn try_from(lead: Lead) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LeadId::try_from(lead.id)?,
            hub_id: HubId::try_from(lead.hub_id)?,
            name: LeadName::new(lead.name)?,
            email: LeadEmail::new(lead.email)?,
            phone: lead.phone.map(PhoneNumber::new).transpose()?,
            company: lead
                .company
                .filter(|c| !c.trim().is_empty())
                .map(CompanyName::new)
                .transpose()?,
            status: lead.status.parse()?,
            source: LeadSource::new(lead.source),
            assigned_to: lead.assigned_to,
            last_contacted_at: lead.last_contacted_at,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewLead> for NewLead<'a> {
    fn from(lead: &'a DomainNewLead) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            hub_id: lead.hub_id.get(),
            name: lead.name.as_str(),
            email: lead.email.as_str(),
            phone: lead.phone.as_ref().map(PhoneNumber::as_str),
            company: lead.company.as_ref().map(CompanyName::as_str),
            status: lead.status.as_str(),
            source: lead.source.as_str(),
            assigned_to: lead.assigned_to.as_ref().map(|owner| owner.as_str()),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> From<&'a DomainUpdateLead> for UpdateLead<'a> {
    fn from(lead: &'a DomainUpdateLead) -> Self {
        Self {
            name: lead.name.as_str(),
            email: lead.email.as_str(),
            phone: lead.phone.as_ref().map(PhoneNumber::as_str),
            company: lead.company.as_ref().map(CompanyName::as_str),
            status: lead.status.as_str(),
            source: lead.source.as_str(),
            last_contacted_at: lead.last_contacted_at,
            updated_at: Utc::now().naive_utc(),
        }
    }
}
