//! The user on whose behalf the lead list is queried and filtered.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CallerRole {
    Admin,
    Manager,
    /// Plain user; only sees leads assigned to them.
    User,
}

impl CallerRole {
    pub fn is_privileged(&self) -> bool {
        matches!(self, CallerRole::Admin | CallerRole::Manager)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Caller {
    /// Owner reference of the caller, compared against `Lead::assigned_to`.
    pub id: String,
    pub role: CallerRole,
}

impl Caller {
    pub fn new(id: impl Into<String>, role: CallerRole) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}
