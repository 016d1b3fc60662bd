//! In-memory [`UserStore`] adapter.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{StoreError, UserStore};
use crate::domain::user::{EmailAddress, User, UserId};

use super::{poisoned_read, poisoned_write};

/// Linear-scan user store over a lock-guarded vector.
///
/// Record count stays small enough in this deployment that indexed lookup
/// is not worth the bookkeeping; every query is a scan in insertion order.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    records: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn commit(records: &mut [User], user: &User, expected_revision: u64) -> Result<(), StoreError> {
        let slot = records
            .iter_mut()
            .find(|candidate| candidate.id == user.id)
            .ok_or(StoreError::Missing)?;
        if slot.revision != expected_revision {
            return Err(StoreError::RevisionMismatch {
                expected: expected_revision,
                actual: slot.revision,
            });
        }
        *slot = user.clone();
        Ok(())
    }

    fn revision_of(records: &[User], id: &UserId) -> Result<u64, StoreError> {
        records
            .iter()
            .find(|candidate| candidate.id == *id)
            .map(|candidate| candidate.revision)
            .ok_or(StoreError::Missing)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let records = self.records.read().map_err(poisoned_read)?;
        Ok(records.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, StoreError> {
        let records = self.records.read().map_err(poisoned_read)?;
        Ok(records.iter().find(|user| user.email == *email).cloned())
    }

    async fn find_by_reset_token(&self, digest: &str) -> Result<Option<User>, StoreError> {
        let records = self.records.read().map_err(poisoned_read)?;
        Ok(records
            .iter()
            .find(|user| user.reset_token_digest.as_deref() == Some(digest))
            .cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(poisoned_write)?;
        if records.iter().any(|existing| existing.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        records.push(user.clone());
        Ok(())
    }

    async fn save(&self, user: &User, expected_revision: u64) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(poisoned_write)?;
        Self::commit(&mut records, user, expected_revision)
    }

    async fn save_pair(
        &self,
        first: &User,
        first_expected: u64,
        second: &User,
        second_expected: u64,
    ) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(poisoned_write)?;
        // Both revision checks run before either write so a failed second
        // check cannot leave a half-committed pair.
        let first_actual = Self::revision_of(&records, &first.id)?;
        let second_actual = Self::revision_of(&records, &second.id)?;
        if first_actual != first_expected {
            return Err(StoreError::RevisionMismatch {
                expected: first_expected,
                actual: first_actual,
            });
        }
        if second_actual != second_expected {
            return Err(StoreError::RevisionMismatch {
                expected: second_expected,
                actual: second_actual,
            });
        }
        Self::commit(&mut records, first, first_expected)?;
        Self::commit(&mut records, second, second_expected)
    }

    async fn search_first_name(
        &self,
        needle: &str,
        limit: usize,
    ) -> Result<Vec<User>, StoreError> {
        let records = self.records.read().map_err(poisoned_read)?;
        Ok(records
            .iter()
            .filter(|user| user.first_name.to_lowercase().contains(needle))
            .take(limit)
            .cloned()
            .collect())
    }
}
