//! Turns an uploaded CSV file into validated [`NewLead`] values.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::lead::{LeadStatus, NewLead};
use crate::domain::types::{
    CompanyName, CountryCode, HubId, LeadEmail, LeadName, LeadSource, PhoneNumber,
};
use crate::import::columns::{
    COMPANY_ALIASES, EMAIL_ALIASES, NAME_ALIASES, PHONE_ALIASES, STATUS_ALIASES, resolve_field,
};
use crate::import::{ImportError, RowError, RowErrorKind};

/// Rows that parsed into leads and rows that were skipped.
#[derive(Debug, Default)]
pub struct ParsedImport {
    pub leads: Vec<NewLead>,
    pub errors: Vec<RowError>,
}

/// Reads every row of `input`. Only an unreadable header fails the whole
/// file; bad rows are collected in [`ParsedImport::errors`].
pub fn parse_leads<R: Read>(
    input: R,
    hub_id: HubId,
    country_code: &CountryCode,
) -> Result<ParsedImport, ImportError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let mut parsed = ParsedImport::default();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                let line = err.position().map(|p| p.line()).unwrap_or_default();
                parsed
                    .errors
                    .push(RowError::new(line, RowErrorKind::Malformed(err.to_string())));
                continue;
            }
        };
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        match parse_row(&headers, &record, hub_id, country_code) {
            Ok(lead) => parsed.leads.push(lead),
            Err(kind) => parsed.errors.push(RowError::new(line, kind)),
        }
    }

    Ok(parsed)
}

fn parse_row(
    headers: &StringRecord,
    record: &StringRecord,
    hub_id: HubId,
    country_code: &CountryCode,
) -> Result<NewLead, RowErrorKind> {
    let name = resolve_field(headers, record, NAME_ALIASES).ok_or(RowErrorKind::MissingName)?;
    let email = resolve_field(headers, record, EMAIL_ALIASES).ok_or(RowErrorKind::MissingEmail)?;

    let phone = resolve_field(headers, record, PHONE_ALIASES)
        .map(|value| PhoneNumber::with_country_code(&value, country_code))
        .transpose()?;
    let company = resolve_field(headers, record, COMPANY_ALIASES)
        .map(CompanyName::new)
        .transpose()?;
    let status = match resolve_field(headers, record, STATUS_ALIASES) {
        Some(value) => value.parse::<LeadStatus>()?,
        None => LeadStatus::New,
    };

    Ok(NewLead::new(
        hub_id,
        LeadName::new(name)?,
        LeadEmail::new(email)?,
        phone,
        company,
        status,
        LeadSource::new(LeadSource::IMPORT),
    ))
}
