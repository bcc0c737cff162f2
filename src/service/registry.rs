//! Registry facade: the single entry point collaborators use.
//!
//! # Responsibility
//! - Compose the three stores over one persistence backend.
//! - Own the id-generation and clock capabilities injected into write paths.
//!
//! # Invariants
//! - Each sub-store seeds its defaults strictly on first read, never
//!   eagerly at construction.
//! - Every created entity receives a freshly generated opaque id, never
//!   derived from content and never reused after deletion.
//! - No operation touches more than one logical collection.

use crate::db::{open_db, open_db_in_memory};
use crate::model::reference::ReferenceKind;
use crate::repo::kv_repo::{KvRepository, SqliteKvRepository};
use crate::service::account_service::AccountService;
use crate::service::employee_service::EmployeeService;
use crate::service::reference_service::ReferenceService;
use crate::service::StoreResult;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Capability producing fresh opaque entity ids.
///
/// Injected so tests can pin deterministic ids; production uses
/// [`UuidIdGenerator`].
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

/// Random v4 UUID ids, the production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Capability producing creation timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, the production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Facade over the employee, access-account and reference-list stores.
pub struct Registry<R: KvRepository> {
    repo: R,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl Registry<SqliteKvRepository> {
    /// Opens a file-backed registry, migrating the schema as needed.
    pub fn open(path: impl AsRef<std::path::Path>) -> StoreResult<Self> {
        let conn = open_db(path)?;
        Ok(Self::new(SqliteKvRepository::new(conn)))
    }

    /// Opens an in-memory registry. State is lost on drop.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self::new(SqliteKvRepository::new(conn)))
    }
}

impl<R: KvRepository> Registry<R> {
    /// Builds a registry with production id and clock capabilities.
    pub fn new(repo: R) -> Self {
        Self::with_parts(repo, Box::new(UuidIdGenerator), Box::new(SystemClock))
    }

    /// Builds a registry with caller-provided capabilities.
    ///
    /// Intended for tests that need deterministic ids and timestamps.
    pub fn with_parts(repo: R, ids: Box<dyn IdGenerator>, clock: Box<dyn Clock>) -> Self {
        Self { repo, ids, clock }
    }

    /// Employee record store.
    pub fn employees(&self) -> EmployeeService<'_, R> {
        EmployeeService::new(&self.repo, self.ids.as_ref(), self.clock.as_ref())
    }

    /// System access account store.
    pub fn accounts(&self) -> AccountService<'_, R> {
        AccountService::new(&self.repo, self.ids.as_ref(), self.clock.as_ref())
    }

    /// Reference list store for the given kind.
    pub fn reference_list(&self, kind: ReferenceKind) -> ReferenceService<'_, R> {
        ReferenceService::new(&self.repo, kind)
    }

    pub fn branches(&self) -> ReferenceService<'_, R> {
        self.reference_list(ReferenceKind::Branch)
    }

    pub fn departments(&self) -> ReferenceService<'_, R> {
        self.reference_list(ReferenceKind::Department)
    }

    pub fn sectors(&self) -> ReferenceService<'_, R> {
        self.reference_list(ReferenceKind::Sector)
    }
}
