//! Chunked bulk creation of imported leads.

use std::io::Read;
use std::thread;

use crate::domain::lead::NewLead;
use crate::domain::types::{CountryCode, HubId, OwnerRef};
use crate::import::{ImportError, ImportSummary, RowError, RowErrorKind, parse_leads};
use crate::repository::LeadWriter;

/// Number of creates allowed in flight at once.
pub const IMPORT_BATCH_SIZE: usize = 20;

/// Creates `leads` one by one, [`IMPORT_BATCH_SIZE`] at a time. Every chunk
/// runs concurrently and is awaited before the next one starts. A failed
/// create is reported as a skipped row and never stops the rest.
pub fn create_in_batches<R>(repo: &R, leads: &[NewLead]) -> ImportSummary
where
    R: LeadWriter + Sync + ?Sized,
{
    let mut summary = ImportSummary::default();

    for chunk in leads.chunks(IMPORT_BATCH_SIZE) {
        let outcomes: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = chunk
                .iter()
                .map(|lead| scope.spawn(move || repo.create_lead(lead)))
                .collect();
            handles.into_iter().map(|handle| handle.join()).collect()
        });

        for (lead, outcome) in chunk.iter().zip(outcomes) {
            match outcome {
                Ok(Ok(_)) => summary.added += 1,
                Ok(Err(err)) => {
                    log::error!("Failed to import lead {}: {err}", lead.email);
                    summary
                        .errors
                        .push(RowError::new(0, RowErrorKind::NotSaved(err.to_string())));
                }
                Err(_) => {
                    log::error!("Import worker panicked for lead {}", lead.email);
                    summary.errors.push(RowError::new(
                        0,
                        RowErrorKind::NotSaved("worker panicked".to_string()),
                    ));
                }
            }
        }
    }

    summary
}

/// Parses `input` and creates every valid row. Leads are assigned to `owner`
/// when given.
pub fn import_leads<R, I>(
    repo: &R,
    input: I,
    hub_id: HubId,
    country_code: &CountryCode,
    owner: Option<&OwnerRef>,
) -> Result<ImportSummary, ImportError>
where
    R: LeadWriter + Sync + ?Sized,
    I: Read,
{
    let parsed = parse_leads(input, hub_id, country_code)?;

    let leads: Vec<NewLead> = match owner {
        Some(owner) => parsed
            .leads
            .into_iter()
            .map(|lead| lead.assigned_to(owner.clone()))
            .collect(),
        None => parsed.leads,
    };

    let mut summary = create_in_batches(repo, &leads);
    let mut errors = parsed.errors;
    errors.append(&mut summary.errors);
    summary.errors = errors;

    log::info!("Imported leads into hub#{hub_id}: {summary}");

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;

    use super::*;
    use crate::domain::lead::{Lead, UpdateLead};
    use crate::domain::types::LeadId;
    use crate::repository::errors::{RepositoryError, RepositoryResult};

    /// Records created leads and the peak number of concurrent creates.
    #[derive(Default)]
    struct RecordingWriter {
        created: Mutex<Vec<NewLead>>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        reject_email: Option<&'static str>,
    }

    impl LeadWriter for RecordingWriter {
        fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(current, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(2));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if Some(new_lead.email.as_str()) == self.reject_email {
                return Err(RepositoryError::ConstraintViolation("duplicate".to_string()));
            }

            let mut created = self.created.lock().unwrap();
            created.push(new_lead.clone());
            let now = Utc::now().naive_utc();
            Ok(Lead {
                id: LeadId::new(created.len() as i32).unwrap(),
                hub_id: new_lead.hub_id,
                name: new_lead.name.clone(),
                email: new_lead.email.clone(),
                phone: new_lead.phone.clone(),
                company: new_lead.company.clone(),
                status: new_lead.status,
                source: new_lead.source.clone(),
                assigned_to: new_lead.assigned_to.clone().map(String::from),
                last_contacted_at: None,
                created_at: now,
                updated_at: now,
            })
        }

        fn update_lead(&self, _: LeadId, _: HubId, _: &UpdateLead) -> RepositoryResult<Lead> {
            Err(RepositoryError::NotFound)
        }

        fn assign_leads(&self, _: HubId, _: &[LeadId], _: Option<OwnerRef>) -> RepositoryResult<usize> {
            Ok(0)
        }

        fn delete_leads(&self, _: HubId, _: &[LeadId]) -> RepositoryResult<usize> {
            Ok(0)
        }

        fn delete_all_leads(&self, _: HubId) -> RepositoryResult<usize> {
            Ok(0)
        }
    }

    fn csv_with(rows: usize) -> String {
        let mut csv = String::from("Name,Email\n");
        for i in 0..rows {
            csv.push_str(&format!("Lead {i},lead{i}@example.com\n"));
        }
        csv
    }

    #[test]
    fn creates_in_bounded_chunks() {
        let repo = RecordingWriter::default();
        let csv = csv_with(45);

        let summary = import_leads(
            &repo,
            csv.as_bytes(),
            HubId::new(1).unwrap(),
            &CountryCode::default(),
            None,
        )
        .unwrap();

        assert_eq!(summary.added, 45);
        assert_eq!(repo.created.lock().unwrap().len(), 45);
        assert!(repo.peak.load(Ordering::SeqCst) <= IMPORT_BATCH_SIZE);
    }

    #[test]
    fn failed_creates_are_counted_as_skipped() {
        let repo = RecordingWriter {
            reject_email: Some("lead3@example.com"),
            ..RecordingWriter::default()
        };
        let csv = format!("{}Nameless,\n", csv_with(5));

        let summary = import_leads(
            &repo,
            csv.as_bytes(),
            HubId::new(1).unwrap(),
            &CountryCode::default(),
            None,
        )
        .unwrap();

        assert_eq!(summary.to_string(), "4 added, 2 skipped");
    }

    #[test]
    fn owner_is_applied_to_every_lead() {
        let repo = RecordingWriter::default();
        let owner = OwnerRef::new("rep@example.com").unwrap();

        import_leads(
            &repo,
            csv_with(3).as_bytes(),
            HubId::new(1).unwrap(),
            &CountryCode::default(),
            Some(&owner),
        )
        .unwrap();

        assert!(
            repo.created
                .lock()
                .unwrap()
                .iter()
                .all(|lead| lead.assigned_to.as_ref() == Some(&owner))
        );
    }
}
