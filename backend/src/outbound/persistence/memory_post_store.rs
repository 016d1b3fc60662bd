//! In-memory [`PostStore`] adapter.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{AuthorFields, PostStore, StoreError};
use crate::domain::post::{Post, PostId};
use crate::domain::user::UserId;

use super::{poisoned_read, poisoned_write};

/// Linear-scan post store over a lock-guarded vector.
///
/// Insertion order is the feed order; no secondary indexes are kept.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    records: RwLock<Vec<Post>>,
}

impl MemoryPostStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, StoreError> {
        let records = self.records.read().map_err(poisoned_read)?;
        Ok(records.iter().find(|post| post.id == *id).cloned())
    }

    async fn all(&self) -> Result<Vec<Post>, StoreError> {
        let records = self.records.read().map_err(poisoned_read)?;
        Ok(records.clone())
    }

    async fn find_by_author(&self, author: &UserId) -> Result<Vec<Post>, StoreError> {
        let records = self.records.read().map_err(poisoned_read)?;
        Ok(records
            .iter()
            .filter(|post| post.author_id == *author)
            .cloned()
            .collect())
    }

    async fn insert(&self, post: &Post) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(poisoned_write)?;
        records.push(post.clone());
        Ok(())
    }

    async fn save(&self, post: &Post, expected_revision: u64) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(poisoned_write)?;
        let slot = records
            .iter_mut()
            .find(|candidate| candidate.id == post.id)
            .ok_or(StoreError::Missing)?;
        if slot.revision != expected_revision {
            return Err(StoreError::RevisionMismatch {
                expected: expected_revision,
                actual: slot.revision,
            });
        }
        *slot = post.clone();
        Ok(())
    }

    async fn update_author_fields(
        &self,
        author: &UserId,
        fields: &AuthorFields,
    ) -> Result<u64, StoreError> {
        let mut records = self.records.write().map_err(poisoned_write)?;
        let mut rewritten = 0;
        for post in records.iter_mut().filter(|post| post.author_id == *author) {
            post.author_first_name = fields.first_name.clone();
            post.author_last_name = fields.last_name.clone();
            post.author_location = fields.location.clone();
            post.revision += 1;
            rewritten += 1;
        }
        Ok(rewritten)
    }
}
