//! System access account store.
//!
//! # Responsibility
//! - CRUD over the login accounts that gate the application.
//! - Enforce login uniqueness and the one-account floor.
//! - Authenticate operator credentials.
//!
//! # Invariants
//! - Login uniqueness on `add` is an exact string compare; authentication
//!   matches the login case-insensitively (documented quirk, see DESIGN.md).
//! - The floor check runs before the existence check, so any delete while a
//!   single account remains reports `LastAccount`.

use crate::model::account::{AccessAccount, NewAccount, Role};
use crate::repo::kv_repo::KvRepository;
use crate::service::registry::{Clock, IdGenerator};
use crate::service::{decode_slot, encode_slot, StoreError, StoreResult};
use log::{info, warn};

const ACCOUNTS_SLOT: &str = "k_system_access_accounts";

/// Store view over the access account collection.
pub struct AccountService<'a, R: KvRepository> {
    repo: &'a R,
    ids: &'a dyn IdGenerator,
    clock: &'a dyn Clock,
}

impl<'a, R: KvRepository> AccountService<'a, R> {
    pub(crate) fn new(repo: &'a R, ids: &'a dyn IdGenerator, clock: &'a dyn Clock) -> Self {
        Self { repo, ids, clock }
    }

    /// Returns the full account snapshot, seeding the two built-in
    /// administrator accounts on first access.
    pub fn get_all(&self) -> StoreResult<Vec<AccessAccount>> {
        self.load_or_seed()
    }

    /// Creates a new access account with a fresh id and timestamp.
    ///
    /// # Errors
    /// - [`StoreError::Validation`] when a required field is blank.
    /// - [`StoreError::DuplicateLogin`] when the exact login already exists.
    pub fn add(&self, new: NewAccount) -> StoreResult<AccessAccount> {
        new.validate()?;
        let mut accounts = self.load_or_seed()?;

        if accounts.iter().any(|account| account.login == new.login) {
            warn!(
                "event=account_add module=service status=rejected reason=duplicate_login login={}",
                new.login
            );
            return Err(StoreError::DuplicateLogin(new.login));
        }

        let account = new.into_account(self.ids.next_id(), self.clock.now());
        accounts.push(account.clone());
        self.persist(&accounts)?;
        info!(
            "event=account_add module=service status=ok id={} login={}",
            account.id, account.login
        );
        Ok(account)
    }

    /// Revokes one account by id.
    ///
    /// # Errors
    /// - [`StoreError::LastAccount`] while the collection holds a single
    ///   entry, regardless of the id passed.
    /// - [`StoreError::NotFound`] when the id does not exist.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let mut accounts = self.load_or_seed()?;
        if accounts.len() <= 1 {
            warn!("event=account_delete module=service status=rejected reason=last_account");
            return Err(StoreError::LastAccount);
        }

        let before = accounts.len();
        accounts.retain(|account| account.id != id);
        if accounts.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.persist(&accounts)?;
        info!("event=account_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Matches credentials against the stored accounts.
    ///
    /// The login compare is case-insensitive, the password compare exact;
    /// the first matching account wins. No lockout, no rate limiting.
    pub fn authenticate(&self, login: &str, password: &str) -> StoreResult<Option<AccessAccount>> {
        let accounts = self.load_or_seed()?;
        let login_upper = login.to_uppercase();

        let matched = accounts
            .into_iter()
            .find(|account| account.login.to_uppercase() == login_upper && account.password == password);

        match &matched {
            Some(account) => info!(
                "event=authenticate module=service status=ok id={}",
                account.id
            ),
            None => warn!("event=authenticate module=service status=denied"),
        }
        Ok(matched)
    }

    fn load_or_seed(&self) -> StoreResult<Vec<AccessAccount>> {
        if let Some(raw) = self.repo.read(ACCOUNTS_SLOT)? {
            return decode_slot(ACCOUNTS_SLOT, &raw);
        }

        let seeded = self.seed_accounts();
        self.persist(&seeded)?;
        info!(
            "event=account_seed module=service status=ok count={}",
            seeded.len()
        );
        Ok(seeded)
    }

    fn persist(&self, accounts: &Vec<AccessAccount>) -> StoreResult<()> {
        let raw = encode_slot(ACCOUNTS_SLOT, accounts)?;
        self.repo.write(ACCOUNTS_SLOT, &raw)?;
        Ok(())
    }

    fn seed_accounts(&self) -> Vec<AccessAccount> {
        let now = self.clock.now();
        vec![
            AccessAccount {
                id: "admin-01".to_string(),
                name: "ADMINISTRADOR".to_string(),
                login: "ADMIN".to_string(),
                password: "123".to_string(),
                role: Role::Admin,
                created_at: now,
            },
            AccessAccount {
                id: "admin-02".to_string(),
                name: "WILLAMS".to_string(),
                login: "WILLAMS".to_string(),
                password: "1235".to_string(),
                role: Role::Admin,
                created_at: now,
            },
        ]
    }
}
