use pushkind_leads::domain::caller::{Caller, CallerRole};
use pushkind_leads::domain::lead::{LeadStatus, NewLead, UNASSIGNED_OWNER, UpdateLead};
use pushkind_leads::domain::saved_view::{DateRange, NewSavedView, ViewFilter};
use pushkind_leads::domain::tenant::TenantSettings;
use pushkind_leads::domain::types::{
    HubId, LeadEmail, LeadName, LeadSource, OwnerRef, SavedViewName,
};
use pushkind_leads::listing::page::PageRequest;
use pushkind_leads::listing::session::LeadListSession;
use pushkind_leads::repository::errors::RepositoryError;
use pushkind_leads::repository::{
    DieselRepository, LeadPageQuery, LeadReader, LeadWriter, SavedViewReader, SavedViewWriter,
    TenantSettingsReader, TenantSettingsWriter,
};

mod common;

fn hub(id: i32) -> HubId {
    HubId::new(id).unwrap()
}

fn new_lead(hub_id: i32, i: usize, owner: Option<&str>) -> NewLead {
    let lead = NewLead::new(
        hub(hub_id),
        LeadName::new(format!("Lead {i}")).unwrap(),
        LeadEmail::new(format!("lead{i}@example.com")).unwrap(),
        None,
        None,
        LeadStatus::New,
        LeadSource::default(),
    );
    match owner {
        Some(owner) => lead.assigned_to(OwnerRef::new(owner).unwrap()),
        None => lead,
    }
}

fn admin() -> Caller {
    Caller::new("boss@example.com", CallerRole::Admin)
}

fn rep() -> Caller {
    Caller::new("rep@example.com", CallerRole::User)
}

#[test]
fn test_lead_pages_are_newest_first_and_windowed() {
    let test_db = common::TestDb::new("test_lead_pages.db");
    let repo = DieselRepository::new(test_db.pool());

    for i in 0..5 {
        repo.create_lead(&new_lead(1, i, None)).unwrap();
    }
    repo.create_lead(&new_lead(2, 99, None)).unwrap();

    let first = repo
        .fetch_lead_page(&LeadPageQuery::new(hub(1), admin()).window(0, 2))
        .unwrap();
    assert_eq!(first.total, 5);
    assert!(first.has_more);
    assert_eq!(first.records[0].name.as_str(), "Lead 4");
    assert_eq!(first.records[1].name.as_str(), "Lead 3");

    let last = repo
        .fetch_lead_page(&LeadPageQuery::new(hub(1), admin()).window(4, 2))
        .unwrap();
    assert_eq!(last.records.len(), 1);
    assert_eq!(last.records[0].name.as_str(), "Lead 0");
    assert!(!last.has_more);

    let beyond = repo
        .fetch_lead_page(&LeadPageQuery::new(hub(1), admin()).window(10, 2))
        .unwrap();
    assert!(beyond.records.is_empty());
    assert_eq!(beyond.total, 5);
}

#[test]
fn test_zero_limit_is_rejected() {
    let test_db = common::TestDb::new("test_zero_limit.db");
    let repo = DieselRepository::new(test_db.pool());

    let result = repo.fetch_lead_page(&LeadPageQuery::new(hub(1), admin()).window(0, 0));
    assert!(matches!(result, Err(RepositoryError::ValidationError(_))));
}

#[test]
fn test_out_of_range_offset_is_rejected() {
    let test_db = common::TestDb::new("test_out_of_range_offset.db");
    let repo = DieselRepository::new(test_db.pool());
    for i in 0..3 {
        repo.create_lead(&new_lead(1, i, None)).unwrap();
    }

    let result =
        repo.fetch_lead_page(&LeadPageQuery::new(hub(1), admin()).window(usize::MAX, 10));
    assert!(matches!(result, Err(RepositoryError::ValidationError(_))));

    let result =
        repo.fetch_lead_page(&LeadPageQuery::new(hub(1), admin()).window(0, usize::MAX));
    assert!(matches!(result, Err(RepositoryError::ValidationError(_))));
}

#[test]
fn test_plain_users_only_see_their_leads() {
    let test_db = common::TestDb::new("test_plain_users_visibility.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_lead(&new_lead(1, 1, Some("rep@example.com")))
        .unwrap();
    repo.create_lead(&new_lead(1, 2, Some("other@example.com")))
        .unwrap();
    repo.create_lead(&new_lead(1, 3, None)).unwrap();

    let page = repo
        .fetch_lead_page(&LeadPageQuery::new(hub(1), rep()).window(0, 10))
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.records[0].email.as_str(), "lead1@example.com");

    assert_eq!(repo.list_all_leads(hub(1), &admin()).unwrap().len(), 3);
    assert_eq!(repo.list_all_leads(hub(1), &rep()).unwrap().len(), 1);
}

#[test]
fn test_assign_update_and_delete_leads() {
    let test_db = common::TestDb::new("test_assign_update_delete.db");
    let repo = DieselRepository::new(test_db.pool());

    let a = repo.create_lead(&new_lead(1, 1, None)).unwrap();
    let b = repo.create_lead(&new_lead(1, 2, None)).unwrap();
    let foreign = repo.create_lead(&new_lead(2, 3, None)).unwrap();

    let owner = OwnerRef::new("rep@example.com").unwrap();
    let assigned = repo
        .assign_leads(hub(1), &[a.id, b.id, foreign.id], Some(owner))
        .unwrap();
    assert_eq!(assigned, 2);
    let a = repo.get_lead_by_id(a.id, hub(1)).unwrap().unwrap();
    assert!(a.is_assigned_to("rep@example.com"));

    repo.assign_leads(hub(1), &[b.id], None).unwrap();
    let b = repo.get_lead_by_id(b.id, hub(1)).unwrap().unwrap();
    assert_eq!(b.assigned_to.as_deref(), Some(UNASSIGNED_OWNER));
    assert!(b.is_unassigned());

    let updates = UpdateLead {
        name: LeadName::new("Alicia").unwrap(),
        email: a.email.clone(),
        phone: None,
        company: None,
        status: LeadStatus::Qualified,
        source: a.source.clone(),
        last_contacted_at: None,
    };
    let updated = repo.update_lead(a.id, hub(1), &updates).unwrap();
    assert_eq!(updated.name.as_str(), "Alicia");
    assert_eq!(updated.status, LeadStatus::Qualified);
    assert_eq!(updated.assigned_to.as_deref(), Some("rep@example.com"));

    assert_eq!(repo.delete_leads(hub(1), &[a.id, foreign.id]).unwrap(), 1);
    assert!(repo.get_lead_by_id(a.id, hub(1)).unwrap().is_none());
    assert!(repo.get_lead_by_id(foreign.id, hub(2)).unwrap().is_some());

    assert_eq!(repo.delete_all_leads(hub(1)).unwrap(), 1);
    assert_eq!(repo.list_all_leads(hub(1), &admin()).unwrap().len(), 0);
}

#[test]
fn test_session_loads_through_store() {
    let test_db = common::TestDb::new("test_session_loads.db");
    let repo = DieselRepository::new(test_db.pool());

    for i in 0..7 {
        repo.create_lead(&new_lead(1, i, None)).unwrap();
    }

    let mut session = LeadListSession::new(hub(1), admin(), 3);
    session.load_initial(&repo).unwrap();
    assert_eq!(session.visible().len(), 3);
    assert!(session.has_more_to_load());

    assert_eq!(
        session.begin_load_more().unwrap(),
        PageRequest {
            offset: 3,
            limit: 3
        }
    );
    let page = repo
        .fetch_lead_page(&LeadPageQuery::new(hub(1), admin()).window(3, 3))
        .unwrap();
    assert_eq!(session.complete_load_more(Ok(page)).unwrap(), 3);

    session.load_at_least(&repo, 100).unwrap();
    assert_eq!(session.visible().len(), 7);
    assert!(!session.has_more_to_load());
}

#[test]
fn test_saved_views_are_owned_and_scoped() {
    let test_db = common::TestDb::new("test_saved_views.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = OwnerRef::new("rep@example.com").unwrap();
    let stranger = OwnerRef::new("other@example.com").unwrap();

    let filter = ViewFilter {
        statuses: vec![LeadStatus::Won, LeadStatus::Lost],
        sources: vec!["Import".to_string()],
        date_range: DateRange::Month,
    };
    let view = repo
        .create_saved_view(&NewSavedView::new(
            hub(1),
            owner.clone(),
            SavedViewName::new("Closed deals").unwrap(),
            filter.clone(),
        ))
        .unwrap();
    assert_eq!(view.filter, filter);

    let views = repo.list_saved_views(hub(1), &owner).unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].name.as_str(), "Closed deals");
    assert!(repo.list_saved_views(hub(1), &stranger).unwrap().is_empty());
    assert!(repo.get_saved_view(view.id, hub(2)).unwrap().is_none());

    assert_eq!(repo.delete_saved_view(view.id, hub(1), &stranger).unwrap(), 0);
    assert_eq!(repo.delete_saved_view(view.id, hub(1), &owner).unwrap(), 1);
    assert!(repo.get_saved_view(view.id, hub(1)).unwrap().is_none());
}

#[test]
fn test_tenant_settings_upsert() {
    let test_db = common::TestDb::new("test_tenant_settings.db");
    let repo = DieselRepository::new(test_db.pool());

    assert!(repo.get_tenant_settings(hub(3)).unwrap().is_none());

    let settings = TenantSettings::try_new(hub(3), "+44", 25).unwrap();
    repo.save_tenant_settings(&settings).unwrap();
    assert_eq!(repo.get_tenant_settings(hub(3)).unwrap(), Some(settings));

    let changed = TenantSettings::try_new(hub(3), "+1", 100).unwrap();
    repo.save_tenant_settings(&changed).unwrap();
    assert_eq!(repo.get_tenant_settings(hub(3)).unwrap(), Some(changed));
}
