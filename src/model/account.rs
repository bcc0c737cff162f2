//! System access account model.
//!
//! # Responsibility
//! - Define the login credential shape that gates the application.
//! - Keep access accounts fully separate from employee records.
//!
//! # Invariants
//! - `login` is unique across accounts (exact string compare on creation).
//! - The account collection never drops below one entry; the store enforces
//!   the floor, not the model.

use crate::model::{require, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operating role attached to an access account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full access, including account management.
    Admin,
    /// Day-to-day registration work.
    Operator,
}

/// Persisted system access account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessAccount {
    /// Stable opaque identifier, generated at creation.
    pub id: String,
    pub name: String,
    pub login: String,
    /// Stored in plain form; hashing is out of scope for this system.
    pub password: String,
    pub role: Role,
    /// Creation timestamp, ISO-8601 on the wire.
    pub created_at: DateTime<Utc>,
}

/// Creation request: an account before `id`/`created_at` exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub login: String,
    pub password: String,
    pub role: Role,
}

impl NewAccount {
    /// Rejects blank required fields before any id is spent on the request.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("login", &self.login)?;
        require("password", &self.password)?;
        Ok(())
    }

    /// Builds the persisted account once identity and timestamp are assigned.
    pub(crate) fn into_account(self, id: String, created_at: DateTime<Utc>) -> AccessAccount {
        AccessAccount {
            id,
            name: self.name,
            login: self.login,
            password: self.password,
            role: self.role,
            created_at,
        }
    }
}
