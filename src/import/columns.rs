//! Header aliases and the field resolver used when reading CSV rows.

use csv::StringRecord;

pub const NAME_ALIASES: &[&str] = &["Name", "Full Name"];
pub const EMAIL_ALIASES: &[&str] = &["Email"];
pub const PHONE_ALIASES: &[&str] = &["Phone", "Mobile"];
pub const COMPANY_ALIASES: &[&str] = &["Company"];
pub const STATUS_ALIASES: &[&str] = &["Status"];

/// Column order of exported files and of the import template.
pub const EXPORT_HEADER: [&str; 5] = ["Name", "Email", "Phone", "Company", "Status"];

/// Returns the first non-empty trimmed value among the columns named by
/// `aliases`, tried in order. Header names compare case-insensitively.
pub fn resolve_field(headers: &StringRecord, row: &StringRecord, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(alias))
            .and_then(|index| row.get(index))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn headers_match_case_insensitively() {
        let headers = record(&["EMAIL", " name "]);
        let row = record(&["a@b.io", "Ann"]);

        assert_eq!(resolve_field(&headers, &row, EMAIL_ALIASES).as_deref(), Some("a@b.io"));
        assert_eq!(resolve_field(&headers, &row, NAME_ALIASES).as_deref(), Some("Ann"));
    }

    #[test]
    fn later_alias_used_when_earlier_is_blank() {
        let headers = record(&["Phone", "Mobile"]);
        let row = record(&["  ", "98765 43210"]);

        assert_eq!(
            resolve_field(&headers, &row, PHONE_ALIASES).as_deref(),
            Some("98765 43210")
        );
    }

    #[test]
    fn missing_column_resolves_to_none() {
        let headers = record(&["Name"]);
        let row = record(&["Ann"]);

        assert_eq!(resolve_field(&headers, &row, COMPANY_ALIASES), None);
    }

    #[test]
    fn short_rows_resolve_to_none() {
        let headers = record(&["Name", "Email"]);
        let row = record(&["Ann"]);

        assert_eq!(resolve_field(&headers, &row, EMAIL_ALIASES), None);
    }
}
