//! Post records for the denormalised feed.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::user::{User, UserId};

/// Stable post identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
    /// Generate a new random [`PostId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for PostId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A feed post with its like-set and comment log.
///
/// The `author_*` fields are a point-in-time denormalised copy of the
/// author's [`User`] record taken at creation; only the profile-sync fan-out
/// rewrites them afterwards. Posts have no edit path of their own.
///
/// ## Invariants
/// - `likes` has set semantics: membership is the like; there is no
///   "present but false" state.
/// - `comments` is append-only and order-preserving. Entries are opaque
///   `"Name: text"` display strings for compatibility with existing
///   clients; a structured `{author_id, text, created_at}` record would be
///   the better design were the wire format free to change.
/// - `revision` increments on every committed write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Stable identifier.
    pub id: PostId,
    /// Id of the authoring user.
    pub author_id: UserId,
    /// Author's given name at creation (or last profile sync).
    pub author_first_name: String,
    /// Author's family name at creation (or last profile sync).
    pub author_last_name: String,
    /// Author's location at creation (or last profile sync).
    pub author_location: String,
    /// Author's picture reference snapshotted at creation.
    pub author_picture_ref: String,
    /// Post body.
    pub description: String,
    /// Optional attached picture reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture_ref: Option<String>,
    /// Ids of users who currently like this post.
    pub likes: HashSet<UserId>,
    /// Append-only, insertion-ordered comment log.
    pub comments: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optimistic concurrency stamp; bumped before each save.
    pub revision: u64,
}

impl Post {
    /// Build a new post, snapshotting the author's denormalised fields.
    pub fn compose(author: &User, description: String, picture_ref: Option<String>) -> Self {
        Self {
            id: PostId::random(),
            author_id: author.id,
            author_first_name: author.first_name.clone(),
            author_last_name: author.last_name.clone(),
            author_location: author.location.clone(),
            author_picture_ref: author.picture_ref.clone(),
            description,
            picture_ref,
            likes: HashSet::new(),
            comments: Vec::new(),
            created_at: Utc::now(),
            revision: 1,
        }
    }

    /// Flip `user`'s like: remove it when present, insert it when absent.
    ///
    /// Returns `true` when the post is liked after the toggle.
    pub fn toggle_like(&mut self, user: UserId) -> bool {
        if self.likes.remove(&user) {
            false
        } else {
            self.likes.insert(user);
            true
        }
    }
}
