//! Lead fixtures shared by the listing tests.

use std::ops::RangeInclusive;

use chrono::{Duration, NaiveDateTime, Utc};

use crate::domain::lead::{Lead, LeadStatus};
use crate::domain::types::{HubId, LeadEmail, LeadId, LeadName, LeadSource};
use crate::listing::page::LeadPage;

pub struct LeadBuilder {
    lead: Lead,
}

impl LeadBuilder {
    pub fn new(id: i32) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            lead: Lead {
                id: LeadId::new(id).unwrap(),
                hub_id: HubId::new(1).unwrap(),
                name: LeadName::new(format!("Lead {id}")).unwrap(),
                email: LeadEmail::new(format!("lead{id}@example.com")).unwrap(),
                phone: None,
                company: None,
                status: LeadStatus::New,
                source: LeadSource::default(),
                assigned_to: None,
                last_contacted_at: None,
                created_at: now - Duration::minutes(i64::from(id)),
                updated_at: now,
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.lead.name = LeadName::new(name).unwrap();
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.lead.email = LeadEmail::new(email).unwrap();
        self
    }

    pub fn owner(mut self, owner: &str) -> Self {
        self.lead.assigned_to = Some(owner.to_string());
        self
    }

    pub fn status(mut self, status: LeadStatus) -> Self {
        self.lead.status = status;
        self
    }

    pub fn source(mut self, source: &str) -> Self {
        self.lead.source = LeadSource::new(source);
        self
    }

    pub fn created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.lead.created_at = created_at;
        self
    }

    pub fn build(self) -> Lead {
        self.lead
    }
}

pub fn lead(id: i32) -> Lead {
    LeadBuilder::new(id).build()
}

pub fn page_of(ids: RangeInclusive<i32>, offset: usize, total: usize) -> LeadPage {
    LeadPage::new(ids.map(lead).collect(), offset, total)
}
