//! Reference list store for branch, department and sector values.
//!
//! # Responsibility
//! - Seed, list, extend and shrink one flat reference list per kind.
//!
//! # Invariants
//! - Values are trimmed and uppercased before insertion; a list never holds
//!   duplicates post-normalization.
//! - Insertion order is preserved; no other ordering guarantee.
//! - `remove` matches the trimmed argument exactly against stored entries.
//!   Stored entries are already uppercased, so a lowercase argument removes
//!   nothing and returns `false` (see DESIGN.md).

use crate::model::reference::{normalize_value, ReferenceKind};
use crate::model::ValidationError;
use crate::repo::kv_repo::KvRepository;
use crate::service::{decode_slot, encode_slot, StoreError, StoreResult};
use log::info;

/// Store view over one reference list.
pub struct ReferenceService<'a, R: KvRepository> {
    repo: &'a R,
    kind: ReferenceKind,
}

impl<'a, R: KvRepository> ReferenceService<'a, R> {
    pub(crate) fn new(repo: &'a R, kind: ReferenceKind) -> Self {
        Self { repo, kind }
    }

    /// The list this view operates on.
    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    /// Returns the current list, seeding the built-in defaults on first
    /// access.
    pub fn get(&self) -> StoreResult<Vec<String>> {
        self.load_or_seed()
    }

    /// Normalizes and appends one value.
    ///
    /// Returns `false` when the normalized value already exists (the list is
    /// unchanged), `true` when it was appended and persisted.
    pub fn add(&self, value: &str) -> StoreResult<bool> {
        let normalized = normalize_value(value);
        if normalized.is_empty() {
            return Err(StoreError::Validation(ValidationError::EmptyField("value")));
        }

        let mut values = self.load_or_seed()?;
        if values.contains(&normalized) {
            return Ok(false);
        }

        values.push(normalized);
        self.persist(&values)?;
        info!(
            "event=reference_add module=service status=ok list={}",
            self.kind.label()
        );
        Ok(true)
    }

    /// Removes the entry matching the trimmed argument exactly.
    ///
    /// Returns `false` when nothing matched (no-op), `true` when the entry
    /// was removed and the list persisted.
    pub fn remove(&self, value: &str) -> StoreResult<bool> {
        let target = value.trim();
        let mut values = self.load_or_seed()?;
        let before = values.len();
        values.retain(|item| item != target);

        if values.len() == before {
            return Ok(false);
        }

        self.persist(&values)?;
        info!(
            "event=reference_remove module=service status=ok list={}",
            self.kind.label()
        );
        Ok(true)
    }

    fn load_or_seed(&self) -> StoreResult<Vec<String>> {
        let slot = self.kind.slot_key();
        if let Some(raw) = self.repo.read(slot)? {
            return decode_slot(slot, &raw);
        }

        let seeded: Vec<String> = self
            .kind
            .defaults()
            .iter()
            .map(|value| (*value).to_string())
            .collect();
        self.persist(&seeded)?;
        info!(
            "event=reference_seed module=service status=ok list={} count={}",
            self.kind.label(),
            seeded.len()
        );
        Ok(seeded)
    }

    fn persist(&self, values: &Vec<String>) -> StoreResult<()> {
        let slot = self.kind.slot_key();
        let raw = encode_slot(slot, values)?;
        self.repo.write(slot, &raw)?;
        Ok(())
    }
}
