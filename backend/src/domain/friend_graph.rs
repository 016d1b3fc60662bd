//! Friend graph service: symmetric friendship edges between users.
//!
//! A friendship is one logical edge mirrored in both users' `friends`
//! vectors. Every mutation commits both sides through the store's pair
//! transaction, so the symmetry invariant (`a` lists `b` iff `b` lists `a`)
//! holds after every successful call and no asymmetric state is ever
//! committed.

use std::sync::Arc;

use crate::domain::ports::{StoreError, UserStore};
use crate::domain::user::{FriendSummary, User, UserId};
use crate::domain::Error;

/// Bounded optimistic retries before a concurrent toggle surfaces as a
/// conflict.
const MAX_WRITE_ATTEMPTS: usize = 3;

/// Service owning all friendship-edge mutations.
#[derive(Clone)]
pub struct FriendGraphService {
    users: Arc<dyn UserStore>,
}

impl FriendGraphService {
    /// Create the service over a user store.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Toggle the friendship edge between `self_id` and `target_id`.
    ///
    /// The acting user must be `self_id`; befriending yourself is always
    /// invalid. An existing edge is removed, a missing edge is inserted,
    /// and both records commit atomically. Returns the caller's updated
    /// friend list as public projections.
    pub async fn toggle_friendship(
        &self,
        actor: &UserId,
        self_id: &UserId,
        target_id: &UserId,
    ) -> Result<Vec<FriendSummary>, Error> {
        if actor != self_id {
            return Err(Error::forbidden("you can only update your own friends list"));
        }
        if self_id == target_id {
            return Err(Error::invalid_request("you cannot add yourself as a friend"));
        }

        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let mut user = self.require_user(self_id).await?;
            let mut friend = self.require_user(target_id).await?;
            let user_expected = user.revision;
            let friend_expected = friend.revision;

            if user.is_friend_of(target_id) {
                user.friends.retain(|id| id != target_id);
                friend.friends.retain(|id| id != self_id);
            } else {
                user.friends.push(*target_id);
                friend.friends.push(*self_id);
            }
            user.revision = user_expected + 1;
            friend.revision = friend_expected + 1;

            match self
                .users
                .save_pair(&user, user_expected, &friend, friend_expected)
                .await
            {
                Ok(()) => {
                    tracing::debug!(
                        user = %self_id,
                        friend = %target_id,
                        now_friends = user.is_friend_of(target_id),
                        "friendship toggled"
                    );
                    return self.project_friends(&user).await;
                }
                Err(StoreError::RevisionMismatch { .. }) if attempt < MAX_WRITE_ATTEMPTS => {
                    tracing::debug!(user = %self_id, attempt, "friendship toggle raced; retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(Error::conflict(
            "friend list changed concurrently; please retry",
        ))
    }

    /// The public projections of every friend of `user_id`.
    ///
    /// Dangling ids (friends whose account no longer resolves) are skipped
    /// rather than surfaced as errors.
    pub async fn list_friends(&self, user_id: &UserId) -> Result<Vec<FriendSummary>, Error> {
        let user = self.require_user(user_id).await?;
        self.project_friends(&user).await
    }

    async fn require_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn project_friends(&self, user: &User) -> Result<Vec<FriendSummary>, Error> {
        let mut friends = Vec::with_capacity(user.friends.len());
        for id in &user.friends {
            match self.users.find_by_id(id).await.map_err(Error::from)? {
                Some(friend) => friends.push(FriendSummary::from(&friend)),
                None => tracing::debug!(friend = %id, "skipping dangling friend reference"),
            }
        }
        Ok(friends)
    }
}
