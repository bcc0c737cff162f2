//! Employee record store.
//!
//! # Responsibility
//! - CRUD over employee records keyed by generated id.
//! - Enforce matricula and login uniqueness on every write path.
//!
//! # Invariants
//! - No two records share a `matricula`; no two records share a `login`.
//!   Conflicting writes are rejected and leave the collection unchanged.
//! - A single example record is seeded on first access; a persisted empty
//!   collection (after `delete_all`) is never re-seeded.
//! - `update` replaces the record in place, preserving list position.

use crate::model::employee::{EmployeeRecord, NewEmployee};
use crate::repo::kv_repo::KvRepository;
use crate::service::registry::{Clock, IdGenerator};
use crate::service::{decode_slot, encode_slot, StoreError, StoreResult};
use log::{info, warn};

const EMPLOYEES_SLOT: &str = "k_system_employees";

/// Store view over the employee collection.
pub struct EmployeeService<'a, R: KvRepository> {
    repo: &'a R,
    ids: &'a dyn IdGenerator,
    clock: &'a dyn Clock,
}

impl<'a, R: KvRepository> EmployeeService<'a, R> {
    pub(crate) fn new(repo: &'a R, ids: &'a dyn IdGenerator, clock: &'a dyn Clock) -> Self {
        Self { repo, ids, clock }
    }

    /// Returns the full employee snapshot, seeding the example record on
    /// first access.
    pub fn get_all(&self) -> StoreResult<Vec<EmployeeRecord>> {
        self.load_or_seed()
    }

    /// Existence probe on the matricula natural key, used by callers for
    /// live validation before submission.
    pub fn matricula_exists(&self, matricula: &str) -> StoreResult<bool> {
        let records = self.load_or_seed()?;
        Ok(records.iter().any(|record| record.matricula == matricula))
    }

    /// Registers a new employee, assigning a fresh id and timestamp.
    ///
    /// # Errors
    /// - [`StoreError::Validation`] when a required field is blank.
    /// - [`StoreError::DuplicateMatricula`] / [`StoreError::DuplicateLogin`]
    ///   on uniqueness conflicts; the collection is left unchanged.
    pub fn add(&self, new: NewEmployee) -> StoreResult<EmployeeRecord> {
        new.validate()?;
        let mut records = self.load_or_seed()?;

        if records.iter().any(|record| record.matricula == new.matricula) {
            warn!(
                "event=employee_add module=service status=rejected reason=duplicate_matricula matricula={}",
                new.matricula
            );
            return Err(StoreError::DuplicateMatricula(new.matricula));
        }
        if records.iter().any(|record| record.login == new.login) {
            warn!(
                "event=employee_add module=service status=rejected reason=duplicate_login login={}",
                new.login
            );
            return Err(StoreError::DuplicateLogin(new.login));
        }

        let record = new.into_record(self.ids.next_id(), self.clock.now());
        records.push(record.clone());
        self.persist(&records)?;
        info!(
            "event=employee_add module=service status=ok id={} matricula={}",
            record.id, record.matricula
        );
        Ok(record)
    }

    /// Replaces the record with the same id, re-validating uniqueness
    /// against every other record.
    pub fn update(&self, updated: EmployeeRecord) -> StoreResult<()> {
        updated.validate()?;
        let mut records = self.load_or_seed()?;

        let index = match records.iter().position(|record| record.id == updated.id) {
            Some(index) => index,
            None => return Err(StoreError::NotFound(updated.id)),
        };
        if records
            .iter()
            .any(|record| record.matricula == updated.matricula && record.id != updated.id)
        {
            return Err(StoreError::DuplicateMatricula(updated.matricula));
        }
        if records
            .iter()
            .any(|record| record.login == updated.login && record.id != updated.id)
        {
            return Err(StoreError::DuplicateLogin(updated.login));
        }

        let id = updated.id.clone();
        records[index] = updated;
        self.persist(&records)?;
        info!("event=employee_update module=service status=ok id={id}");
        Ok(())
    }

    /// Removes one record by id.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let mut records = self.load_or_seed()?;
        let before = records.len();
        records.retain(|record| record.id != id);

        if records.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.persist(&records)?;
        info!("event=employee_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Unconditionally clears the collection. The empty snapshot is
    /// persisted, so later reads do not re-seed.
    pub fn delete_all(&self) -> StoreResult<()> {
        self.persist(&Vec::new())?;
        info!("event=employee_delete_all module=service status=ok");
        Ok(())
    }

    /// Returns records whose branch matches exactly.
    pub fn find_by_branch(&self, branch: &str) -> StoreResult<Vec<EmployeeRecord>> {
        let mut records = self.load_or_seed()?;
        records.retain(|record| record.branch == branch);
        Ok(records)
    }

    /// Case-insensitive substring search across the listable text fields.
    /// A blank term returns the full snapshot.
    pub fn search(&self, term: &str) -> StoreResult<Vec<EmployeeRecord>> {
        let term = term.trim().to_lowercase();
        let mut records = self.load_or_seed()?;
        if term.is_empty() {
            return Ok(records);
        }

        records.retain(|record| {
            record.full_name.to_lowercase().contains(&term)
                || record.matricula.contains(&term)
                || record.branch.to_lowercase().contains(&term)
                || record.department.to_lowercase().contains(&term)
                || record.sector.to_lowercase().contains(&term)
                || record.login.to_lowercase().contains(&term)
        });
        Ok(records)
    }

    fn load_or_seed(&self) -> StoreResult<Vec<EmployeeRecord>> {
        if let Some(raw) = self.repo.read(EMPLOYEES_SLOT)? {
            return decode_slot(EMPLOYEES_SLOT, &raw);
        }

        let seeded = vec![self.seed_record()];
        self.persist(&seeded)?;
        info!("event=employee_seed module=service status=ok count=1");
        Ok(seeded)
    }

    fn persist(&self, records: &Vec<EmployeeRecord>) -> StoreResult<()> {
        let raw = encode_slot(EMPLOYEES_SLOT, records)?;
        self.repo.write(EMPLOYEES_SLOT, &raw)?;
        Ok(())
    }

    fn seed_record(&self) -> EmployeeRecord {
        EmployeeRecord {
            id: "1".to_string(),
            matricula: "1001".to_string(),
            full_name: "FUNCIONARIO EXEMPLO".to_string(),
            branch: "MATRIZ".to_string(),
            login: "FUNC.1".to_string(),
            password: "123".to_string(),
            department: "TECNOLOGIA DA INFORMAÇÃO".to_string(),
            sector: "INFRAESTRUTURA".to_string(),
            registered_at: self.clock.now(),
        }
    }
}
