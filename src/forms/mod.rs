//! Form definitions backing the lead routes.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod import;
pub mod leads;
pub mod settings;
pub mod views;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid form encoding: {0}")]
    Encoding(String),

    #[error("invalid lead id")]
    InvalidLeadId,

    #[error("{0}")]
    InvalidValue(#[from] TypeConstraintError),
}
