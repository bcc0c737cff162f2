//! Store services and the registry facade.
//!
//! # Responsibility
//! - Orchestrate slot reads/writes into the employee, access-account and
//!   reference-list stores.
//! - Define the shared result contract every fallible operation returns.
//!
//! # Invariants
//! - Every operation is a whole-slot read, validate, mutate, write sequence;
//!   there is no partial update.
//! - Failures are returned as [`StoreError`] values, never thrown; callers
//!   branch on the variant and may show the `Display` message as-is.

use crate::db::DbError;
use crate::model::ValidationError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod account_service;
pub mod employee_service;
pub mod reference_service;
pub mod registry;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation failure.
///
/// The variant is the machine-readable kind; the `Display` text is the
/// human-readable message shown to the operator.
#[derive(Debug)]
pub enum StoreError {
    /// Persistence transport failure.
    Db(DbError),
    /// A persisted blob could not be decoded.
    InvalidData {
        slot: &'static str,
        message: String,
    },
    /// A required field was blank.
    Validation(ValidationError),
    /// The matricula is already used by another employee record.
    DuplicateMatricula(String),
    /// The login is already used within the same collection.
    DuplicateLogin(String),
    /// No record with the given id exists; the caller's view is stale.
    NotFound(String),
    /// Deleting the last remaining access account is not allowed.
    LastAccount,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData { slot, message } => {
                write!(f, "invalid persisted data in slot `{slot}`: {message}")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateMatricula(matricula) => {
                write!(f, "matricula {matricula} is already registered")
            }
            Self::DuplicateLogin(login) => write!(f, "login {login} is already in use"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::LastAccount => {
                write!(f, "cannot delete the only remaining system account")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Decodes one slot blob, mapping parse failures to [`StoreError::InvalidData`].
pub(crate) fn decode_slot<T: DeserializeOwned>(slot: &'static str, raw: &str) -> StoreResult<T> {
    serde_json::from_str(raw).map_err(|err| StoreError::InvalidData {
        slot,
        message: err.to_string(),
    })
}

/// Encodes one collection for slot storage.
pub(crate) fn encode_slot<T: Serialize>(slot: &'static str, value: &T) -> StoreResult<String> {
    serde_json::to_string(value).map_err(|err| StoreError::InvalidData {
        slot,
        message: err.to_string(),
    })
}
