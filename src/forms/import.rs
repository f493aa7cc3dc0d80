use std::fs::File;

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};

use crate::domain::types::CountryCode;
use crate::forms::FormError;

#[derive(MultipartForm)]
/// Uploaded CSV file with an optional calling code for local phone numbers.
pub struct UploadLeadsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
    pub country_code: Option<Text<String>>,
}

impl UploadLeadsForm {
    /// Calling code from the form, or `fallback` when left blank.
    pub fn country_code(&self, fallback: &CountryCode) -> Result<CountryCode, FormError> {
        match self.country_code.as_deref().map(|code| code.trim()) {
            None | Some("") => Ok(fallback.clone()),
            Some(code) => Ok(CountryCode::new(code)?),
        }
    }

    pub fn reopen(&self) -> std::io::Result<File> {
        self.csv.file.reopen()
    }
}
