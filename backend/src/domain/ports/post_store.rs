//! Record store port for feed posts.

use async_trait::async_trait;

use crate::domain::post::{Post, PostId};
use crate::domain::user::UserId;

use super::StoreError;

/// Denormalised author fields rewritten by the profile-sync fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorFields {
    /// Replacement given name.
    pub first_name: String,
    /// Replacement family name.
    pub last_name: String,
    /// Replacement location.
    pub location: String,
}

/// Port for post storage and retrieval.
///
/// Revision semantics match [`super::UserStore`]: the caller bumps
/// `post.revision` before a [`PostStore::save`] and passes the revision it
/// read as `expected_revision`. [`PostStore::update_author_fields`] is the
/// bulk `updateMany` used by profile sync; it rewrites the snapshot fields
/// on every post by the author in one store operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Fetch a post by id. Returns `None` for unknown ids.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, StoreError>;

    /// Every post in store insertion order (no pagination by design).
    async fn all(&self) -> Result<Vec<Post>, StoreError>;

    /// Every post authored by `author`, in store insertion order.
    async fn find_by_author(&self, author: &UserId) -> Result<Vec<Post>, StoreError>;

    /// Commit a brand-new post.
    async fn insert(&self, post: &Post) -> Result<(), StoreError>;

    /// Commit an updated post with an optimistic concurrency check.
    async fn save(&self, post: &Post, expected_revision: u64) -> Result<(), StoreError>;

    /// Overwrite the denormalised author fields on all posts by `author`.
    ///
    /// Returns the number of posts rewritten.
    async fn update_author_fields(
        &self,
        author: &UserId,
        fields: &AuthorFields,
    ) -> Result<u64, StoreError>;
}

/// Fixture implementation for tests that do not exercise post storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePostStore;

#[async_trait]
impl PostStore for FixturePostStore {
    async fn find_by_id(&self, _id: &PostId) -> Result<Option<Post>, StoreError> {
        Ok(None)
    }

    async fn all(&self) -> Result<Vec<Post>, StoreError> {
        Ok(Vec::new())
    }

    async fn find_by_author(&self, _author: &UserId) -> Result<Vec<Post>, StoreError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _post: &Post) -> Result<(), StoreError> {
        Ok(())
    }

    async fn save(&self, _post: &Post, _expected_revision: u64) -> Result<(), StoreError> {
        Ok(())
    }

    async fn update_author_fields(
        &self,
        _author: &UserId,
        _fields: &AuthorFields,
    ) -> Result<u64, StoreError> {
        Ok(0)
    }
}
