//! Employee record model.
//!
//! # Responsibility
//! - Define the canonical employee shape keyed by a generated `id`.
//! - Validate required fields before the store mutates anything.
//!
//! # Invariants
//! - `id` and `registered_at` are assigned once at creation and never change.
//! - `matricula` and `login` are unique across all employee records; the
//!   store enforces this, not the model.
//! - `branch`/`department`/`sector` are soft references into the reference
//!   lists; no existence check is performed on them.

use crate::model::{require, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted employee record.
///
/// Text fields arrive already uppercased by the caller; the store treats
/// them as opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Stable opaque identifier, generated at creation.
    pub id: String,
    /// Badge number, the natural key for employee records.
    pub matricula: String,
    pub full_name: String,
    pub branch: String,
    pub login: String,
    /// Stored in plain form; hashing is out of scope for this system.
    pub password: String,
    pub department: String,
    pub sector: String,
    /// Creation timestamp, ISO-8601 on the wire.
    pub registered_at: DateTime<Utc>,
}

/// Creation request: an employee record before `id`/`registered_at` exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub matricula: String,
    pub full_name: String,
    pub branch: String,
    pub login: String,
    pub password: String,
    pub department: String,
    pub sector: String,
}

impl NewEmployee {
    /// Rejects blank required fields before any id is spent on the request.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("matricula", &self.matricula)?;
        require("full_name", &self.full_name)?;
        require("login", &self.login)?;
        require("password", &self.password)?;
        Ok(())
    }

    /// Builds the persisted record once identity and timestamp are assigned.
    pub(crate) fn into_record(self, id: String, registered_at: DateTime<Utc>) -> EmployeeRecord {
        EmployeeRecord {
            id,
            matricula: self.matricula,
            full_name: self.full_name,
            branch: self.branch,
            login: self.login,
            password: self.password,
            department: self.department,
            sector: self.sector,
            registered_at,
        }
    }
}

impl EmployeeRecord {
    /// Update-path validation: same required fields plus a non-blank id.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("id", &self.id)?;
        require("matricula", &self.matricula)?;
        require("full_name", &self.full_name)?;
        require("login", &self.login)?;
        require("password", &self.password)?;
        Ok(())
    }
}
