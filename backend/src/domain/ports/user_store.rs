//! Record store port for user records.

use async_trait::async_trait;

use crate::domain::user::{EmailAddress, User, UserId};

use super::StoreError;

/// Port for user record storage and retrieval.
///
/// # Revision Semantics
///
/// - New records are committed via [`UserStore::insert`] and start at
///   revision 1.
/// - [`UserStore::save`] only succeeds when `expected_revision` matches the
///   committed revision; the caller sets `user.revision` to the new value
///   (`expected_revision + 1`) before saving. The store does not
///   auto-increment.
/// - [`UserStore::save_pair`] applies the same check to two records and
///   commits both or neither. This is the edge transaction the friend graph
///   relies on: a failure between the two sides must not be observable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a user by id. Returns `None` for unknown ids.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    /// Fetch a user by normalised email address.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, StoreError>;

    /// Fetch the user holding the given reset-token digest, if any.
    async fn find_by_reset_token(&self, digest: &str) -> Result<Option<User>, StoreError>;

    /// Commit a brand-new record.
    ///
    /// Fails with [`StoreError::DuplicateEmail`] when another record already
    /// holds the same normalised address.
    async fn insert(&self, user: &User) -> Result<(), StoreError>;

    /// Commit an updated record with an optimistic concurrency check.
    async fn save(&self, user: &User, expected_revision: u64) -> Result<(), StoreError>;

    /// Commit two updated records atomically (both or neither).
    async fn save_pair(
        &self,
        first: &User,
        first_expected: u64,
        second: &User,
        second_expected: u64,
    ) -> Result<(), StoreError>;

    /// Case-insensitive literal substring search over first names.
    ///
    /// `needle` must already be lowercased; result ordering is
    /// store-defined and capped at `limit`.
    async fn search_first_name(&self, needle: &str, limit: usize)
    -> Result<Vec<User>, StoreError>;
}

/// Fixture implementation for tests that do not exercise user storage.
///
/// Lookups miss, searches are empty, and every write is accepted and
/// discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserStore;

#[async_trait]
impl UserStore for FixtureUserStore {
    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(None)
    }

    async fn find_by_email(&self, _email: &EmailAddress) -> Result<Option<User>, StoreError> {
        Ok(None)
    }

    async fn find_by_reset_token(&self, _digest: &str) -> Result<Option<User>, StoreError> {
        Ok(None)
    }

    async fn insert(&self, _user: &User) -> Result<(), StoreError> {
        Ok(())
    }

    async fn save(&self, _user: &User, _expected_revision: u64) -> Result<(), StoreError> {
        Ok(())
    }

    async fn save_pair(
        &self,
        _first: &User,
        _first_expected: u64,
        _second: &User,
        _second_expected: u64,
    ) -> Result<(), StoreError> {
        Ok(())
    }

    async fn search_first_name(
        &self,
        _needle: &str,
        _limit: usize,
    ) -> Result<Vec<User>, StoreError> {
        Ok(Vec::new())
    }
}
