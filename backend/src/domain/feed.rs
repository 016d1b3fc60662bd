//! Post feed service: creation, listing, likes, and comments.

use std::sync::Arc;

use crate::domain::post::{Post, PostId};
use crate::domain::ports::{PostStore, StoreError, UserStore};
use crate::domain::user::UserId;
use crate::domain::Error;

/// Bounded optimistic retries before a concurrent write surfaces as a
/// conflict.
const MAX_WRITE_ATTEMPTS: usize = 3;

/// Label used when a commenter's account no longer resolves.
const FALLBACK_COMMENTER: &str = "User";

/// Service owning all post mutations and feed reads.
#[derive(Clone)]
pub struct PostFeedService {
    posts: Arc<dyn PostStore>,
    users: Arc<dyn UserStore>,
}

impl PostFeedService {
    /// Create the service over the post and user stores.
    pub fn new(posts: Arc<dyn PostStore>, users: Arc<dyn UserStore>) -> Self {
        Self { posts, users }
    }

    /// Create a post, snapshotting the author's denormalised fields.
    ///
    /// Returns the entire feed after insertion. That is deliberate: the
    /// contract is "whole current feed in stored order", not a page.
    pub async fn create_post(
        &self,
        author_id: &UserId,
        description: String,
        picture_ref: Option<String>,
    ) -> Result<Vec<Post>, Error> {
        let author = self
            .users
            .find_by_id(author_id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| Error::not_found("user not found"))?;

        let post = Post::compose(&author, description, picture_ref);
        self.posts.insert(&post).await.map_err(Error::from)?;
        tracing::info!(post = %post.id, author = %author_id, "post created");
        self.feed().await
    }

    /// Every post in store insertion order.
    pub async fn feed(&self) -> Result<Vec<Post>, Error> {
        self.posts.all().await.map_err(Error::from)
    }

    /// Every post authored by `author_id`, in store insertion order.
    pub async fn user_posts(&self, author_id: &UserId) -> Result<Vec<Post>, Error> {
        self.posts
            .find_by_author(author_id)
            .await
            .map_err(Error::from)
    }

    /// Toggle `user_id`'s like on a post and return the updated post.
    ///
    /// The read-modify-write is revision-checked so two users toggling the
    /// same post concurrently cannot clobber each other's entries.
    pub async fn toggle_like(&self, post_id: &PostId, user_id: &UserId) -> Result<Post, Error> {
        self.mutate_post(post_id, |post| {
            let liked = post.toggle_like(*user_id);
            tracing::debug!(post = %post.id, user = %user_id, liked, "like toggled");
            Ok(())
        })
        .await
    }

    /// Append a comment and return the updated post.
    ///
    /// Empty or whitespace-only text is rejected before any store access.
    /// The commenter's display name is resolved at append time; a missing
    /// account falls back to a generic label instead of failing the append.
    pub async fn add_comment(
        &self,
        post_id: &PostId,
        user_id: &UserId,
        text: &str,
    ) -> Result<Post, Error> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_request("comment text is required"));
        }

        let name = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(Error::from)?
            .map_or_else(|| FALLBACK_COMMENTER.to_owned(), |u| u.display_name());
        let entry = format!("{name}: {trimmed}");

        self.mutate_post(post_id, |post| {
            post.comments.push(entry.clone());
            Ok(())
        })
        .await
    }

    /// Revision-checked read-modify-write loop shared by the post
    /// mutations.
    async fn mutate_post<F>(&self, post_id: &PostId, mut mutate: F) -> Result<Post, Error>
    where
        F: FnMut(&mut Post) -> Result<(), Error>,
    {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let mut post = self
                .posts
                .find_by_id(post_id)
                .await
                .map_err(Error::from)?
                .ok_or_else(|| Error::not_found("post not found"))?;
            let expected = post.revision;

            mutate(&mut post)?;
            post.revision = expected + 1;

            match self.posts.save(&post, expected).await {
                Ok(()) => return Ok(post),
                Err(StoreError::RevisionMismatch { .. }) if attempt < MAX_WRITE_ATTEMPTS => {
                    tracing::debug!(post = %post_id, attempt, "post write raced; retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(Error::conflict("post changed concurrently; please retry"))
    }
}
