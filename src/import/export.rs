//! CSV export of leads and the empty import template.

use csv::{QuoteStyle, WriterBuilder};

use crate::domain::lead::Lead;
use crate::import::ImportError;
use crate::import::columns::EXPORT_HEADER;

const TEMPLATE_ROW: [&str; 5] = ["Jane Doe", "jane@example.com", "+919876543210", "Acme", "New"];

/// Header row followed by `rows`, every data field quoted so spreadsheets
/// keep phone numbers as text.
fn write_csv<I>(rows: I) -> Result<Vec<u8>, ImportError>
where
    I: IntoIterator<Item = [String; 5]>,
{
    let mut header = WriterBuilder::new().from_writer(Vec::new());
    header.write_record(EXPORT_HEADER)?;
    let buffer = header.into_inner().map_err(|e| e.into_error())?;

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(buffer);
    for row in rows {
        writer.write_record(&row)?;
    }
    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}

fn lead_row(lead: &Lead) -> [String; 5] {
    [
        lead.name.to_string(),
        lead.email.to_string(),
        lead.phone.as_ref().map(ToString::to_string).unwrap_or_default(),
        lead.company.as_ref().map(ToString::to_string).unwrap_or_default(),
        lead.status.to_string(),
    ]
}

pub fn export_leads_csv(leads: &[Lead]) -> Result<Vec<u8>, ImportError> {
    write_csv(leads.iter().map(lead_row))
}

/// Import template with one sample row.
pub fn template_csv() -> Result<Vec<u8>, ImportError> {
    write_csv([TEMPLATE_ROW.map(str::to_string)])
}
