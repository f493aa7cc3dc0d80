use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CompanyName, HubId, LeadEmail, LeadId, LeadName, LeadSource, OwnerRef, PhoneNumber,
    TypeConstraintError,
};

/// Owner value reserved for leads that were explicitly left without an owner.
pub const UNASSIGNED_OWNER: &str = "unassigned";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Proposal,
    Won,
    Lost,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 6] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Proposal,
        LeadStatus::Won,
        LeadStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::Proposal => "Proposal",
            LeadStatus::Won => "Won",
            LeadStatus::Lost => "Lost",
        }
    }
}

impl Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = TypeConstraintError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        LeadStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| TypeConstraintError::UnknownStatus(needle.to_string()))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: LeadId,
    pub hub_id: HubId,
    pub name: LeadName,
    pub email: LeadEmail,
    pub phone: Option<PhoneNumber>,
    pub company: Option<CompanyName>,
    pub status: LeadStatus,
    pub source: LeadSource,
    /// Owner reference. `None` and [`UNASSIGNED_OWNER`] both mean nobody owns
    /// the lead.
    pub assigned_to: Option<String>,
    pub last_contacted_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Lead {
    /// True when the owner field is missing, blank or holds the sentinel.
    pub fn is_unassigned(&self) -> bool {
        match self.assigned_to.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(owner) => owner == UNASSIGNED_OWNER,
        }
    }

    pub fn is_assigned_to(&self, owner: &str) -> bool {
        !self.is_unassigned() && self.assigned_to.as_deref() == Some(owner)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewLead {
    pub hub_id: HubId,
    pub name: LeadName,
    pub email: LeadEmail,
    pub phone: Option<PhoneNumber>,
    pub company: Option<CompanyName>,
    pub status: LeadStatus,
    pub source: LeadSource,
    pub assigned_to: Option<OwnerRef>,
}

impl NewLead {
    #[must_use]
    pub fn new(
        hub_id: HubId,
        name: LeadName,
        email: LeadEmail,
        phone: Option<PhoneNumber>,
        company: Option<CompanyName>,
        status: LeadStatus,
        source: LeadSource,
    ) -> Self {
        Self {
            hub_id,
            name,
            email,
            phone,
            company,
            status,
            source,
            assigned_to: None,
        }
    }

    #[must_use]
    pub fn assigned_to(mut self, owner: OwnerRef) -> Self {
        self.assigned_to = Some(owner);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateLead {
    pub name: LeadName,
    pub email: LeadEmail,
    pub phone: Option<PhoneNumber>,
    pub company: Option<CompanyName>,
    pub status: LeadStatus,
    pub source: LeadSource,
    pub last_contacted_at: Option<NaiveDateTime>,
}
