//! Repository implementation for leads.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::caller::Caller;
use crate::domain::lead::{Lead, NewLead, UNASSIGNED_OWNER, UpdateLead};
use crate::domain::types::{HubId, LeadId, OwnerRef};
use crate::listing::page::LeadPage;
use crate::models::lead::{
    Lead as DbLead, NewLead as DbNewLead, UpdateLead as DbUpdateLead,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, LeadPageQuery, LeadReader, LeadWriter};
use crate::schema::leads;

/// Leads of the hub the caller may see. Plain users only see their own.
fn visible_leads<'a>(hub_id: HubId, caller: &'a Caller) -> leads::BoxedQuery<'a, Sqlite> {
    let mut query = leads::table
        .filter(leads::hub_id.eq(hub_id.get()))
        .into_boxed();
    if !caller.role.is_privileged() {
        query = query.filter(leads::assigned_to.eq(caller.id.as_str()));
    }
    query
}

fn into_domain(rows: Vec<DbLead>) -> RepositoryResult<Vec<Lead>> {
    rows.into_iter()
        .map(|row| Lead::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl LeadReader for DieselRepository {
    fn fetch_lead_page(&self, query: &LeadPageQuery) -> RepositoryResult<LeadPage> {
        if query.limit == 0 {
            return Err(RepositoryError::ValidationError(
                "page limit must be positive".to_string(),
            ));
        }

        let (Ok(offset), Ok(limit)) = (i64::try_from(query.offset), i64::try_from(query.limit))
        else {
            return Err(RepositoryError::ValidationError(
                "page window is out of range".to_string(),
            ));
        };

        let mut conn = self.conn()?;

        let total: i64 = visible_leads(query.hub_id, &query.caller)
            .count()
            .get_result(&mut conn)?;

        let rows = visible_leads(query.hub_id, &query.caller)
            .order((leads::created_at.desc(), leads::id.desc()))
            .limit(limit)
            .offset(offset)
            .select(DbLead::as_select())
            .load::<DbLead>(&mut conn)?;

        log::debug!(
            "Fetched {} leads at offset {} of {total} for hub#{}",
            rows.len(),
            query.offset,
            query.hub_id
        );

        Ok(LeadPage::new(
            into_domain(rows)?,
            query.offset,
            total as usize,
        ))
    }

    fn get_lead_by_id(&self, id: LeadId, hub_id: HubId) -> RepositoryResult<Option<Lead>> {
        let mut conn = self.conn()?;
        let row = leads::table
            .filter(leads::id.eq(id.get()))
            .filter(leads::hub_id.eq(hub_id.get()))
            .select(DbLead::as_select())
            .first::<DbLead>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(Some(Lead::try_from(row).map_err(RepositoryError::from)?)),
            None => Ok(None),
        }
    }

    fn list_all_leads(&self, hub_id: HubId, caller: &Caller) -> RepositoryResult<Vec<Lead>> {
        let mut conn = self.conn()?;
        let rows = visible_leads(hub_id, caller)
            .order((leads::created_at.desc(), leads::id.desc()))
            .select(DbLead::as_select())
            .load::<DbLead>(&mut conn)?;

        into_domain(rows)
    }
}

impl LeadWriter for DieselRepository {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead> {
        let mut conn = self.conn()?;
        let insertable: DbNewLead = new_lead.into();

        let row = diesel::insert_into(leads::table)
            .values(&insertable)
            .returning(DbLead::as_returning())
            .get_result::<DbLead>(&mut conn)?;

        Lead::try_from(row).map_err(RepositoryError::from)
    }

    fn update_lead(
        &self,
        id: LeadId,
        hub_id: HubId,
        updates: &UpdateLead,
    ) -> RepositoryResult<Lead> {
        let mut conn = self.conn()?;
        let changes: DbUpdateLead = updates.into();

        let row = diesel::update(
            leads::table
                .filter(leads::id.eq(id.get()))
                .filter(leads::hub_id.eq(hub_id.get())),
        )
        .set(&changes)
        .returning(DbLead::as_returning())
        .get_result::<DbLead>(&mut conn)?;

        Lead::try_from(row).map_err(RepositoryError::from)
    }

    fn assign_leads(
        &self,
        hub_id: HubId,
        ids: &[LeadId],
        owner: Option<OwnerRef>,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();
        let owner = owner.map_or_else(|| UNASSIGNED_OWNER.to_string(), OwnerRef::into_inner);

        let affected = diesel::update(
            leads::table
                .filter(leads::hub_id.eq(hub_id.get()))
                .filter(leads::id.eq_any(raw_ids)),
        )
        .set((
            leads::assigned_to.eq(owner),
            leads::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_leads(&self, hub_id: HubId, ids: &[LeadId]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();

        let affected = diesel::delete(
            leads::table
                .filter(leads::hub_id.eq(hub_id.get()))
                .filter(leads::id.eq_any(raw_ids)),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_all_leads(&self, hub_id: HubId) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(leads::table.filter(leads::hub_id.eq(hub_id.get())))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
