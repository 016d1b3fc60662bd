//! Profile service: validated edits and denormalised fan-out.
//!
//! Posts carry a snapshot of their author's name and location. Whenever a
//! profile edit commits, the changed fields are pushed to every post by
//! that author in one bulk store operation, synchronously, so the feed
//! never shows a stale name for longer than the editing request itself.

use std::sync::Arc;

use url::Url;

use crate::domain::ports::{AuthorFields, PostStore, StoreError, UserStore};
use crate::domain::user::{UserId, UserProfile};
use crate::domain::Error;

/// Bounded optimistic retries before a concurrent edit surfaces as a
/// conflict.
const MAX_WRITE_ATTEMPTS: usize = 3;

/// Hosts accepted for the Twitter/X profile link.
const TWITTER_HOSTS: &[&str] = &["twitter.com", "x.com"];
/// Hosts accepted for the LinkedIn profile link.
const LINKEDIN_HOSTS: &[&str] = &["linkedin.com"];

/// A requested profile edit, as received from the client.
///
/// Absent fields arrive as empty strings and clear the stored value
/// (except the names, which must stay non-empty).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileEdit {
    /// Replacement given name; required.
    pub first_name: String,
    /// Replacement family name; required.
    pub last_name: String,
    /// Replacement location.
    pub location: String,
    /// Replacement occupation.
    pub occupation: String,
    /// Replacement Twitter/X URL; empty clears it.
    pub twitter_url: String,
    /// Replacement LinkedIn URL; empty clears it.
    pub linkedin_url: String,
}

/// Service owning profile reads, validated edits, and the post fan-out.
#[derive(Clone)]
pub struct ProfileService {
    users: Arc<dyn UserStore>,
    posts: Arc<dyn PostStore>,
}

impl ProfileService {
    /// Create the service over the user and post stores.
    pub fn new(users: Arc<dyn UserStore>, posts: Arc<dyn PostStore>) -> Self {
        Self { users, posts }
    }

    /// Fetch a profile projection.
    ///
    /// The email address is included only when `actor` is looking at their
    /// own profile.
    pub async fn get_profile(&self, actor: &UserId, user_id: &UserId) -> Result<UserProfile, Error> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| Error::not_found("user not found"))?;

        if actor == user_id {
            Ok(UserProfile::for_self(&user))
        } else {
            Ok(UserProfile::for_other(&user))
        }
    }

    /// Apply a validated profile edit and fan the changed author fields out
    /// to the user's posts.
    ///
    /// All validation happens before any persistence; a rejected edit
    /// leaves both the user record and the feed untouched.
    pub async fn apply_profile_edit(
        &self,
        actor: &UserId,
        user_id: &UserId,
        edit: &ProfileEdit,
    ) -> Result<UserProfile, Error> {
        if actor != user_id {
            return Err(Error::forbidden("you can only update your own profile"));
        }

        let first_name = edit.first_name.trim();
        let last_name = edit.last_name.trim();
        let location = edit.location.trim();
        let occupation = edit.occupation.trim();
        let twitter_url = edit.twitter_url.trim();
        let linkedin_url = edit.linkedin_url.trim();

        if first_name.is_empty() || last_name.is_empty() {
            return Err(Error::invalid_request(
                "first name and last name are required",
            ));
        }
        if !host_is_allowed(twitter_url, TWITTER_HOSTS)
            || !host_is_allowed(linkedin_url, LINKEDIN_HOSTS)
        {
            return Err(Error::invalid_request(
                "provide valid Twitter/X and LinkedIn profile URLs, or leave them empty",
            ));
        }

        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let mut user = self
                .users
                .find_by_id(user_id)
                .await
                .map_err(Error::from)?
                .ok_or_else(|| Error::not_found("user not found"))?;
            let expected = user.revision;

            user.first_name = first_name.to_owned();
            user.last_name = last_name.to_owned();
            user.location = location.to_owned();
            user.occupation = occupation.to_owned();
            user.twitter_url = non_empty(twitter_url);
            user.linkedin_url = non_empty(linkedin_url);
            user.revision = expected + 1;

            match self.users.save(&user, expected).await {
                Ok(()) => {
                    let rewritten = self
                        .posts
                        .update_author_fields(
                            user_id,
                            &AuthorFields {
                                first_name: user.first_name.clone(),
                                last_name: user.last_name.clone(),
                                location: user.location.clone(),
                            },
                        )
                        .await
                        .map_err(Error::from)?;
                    tracing::info!(user = %user_id, rewritten, "profile edit fanned out to posts");
                    return Ok(UserProfile::for_self(&user));
                }
                Err(StoreError::RevisionMismatch { .. }) if attempt < MAX_WRITE_ATTEMPTS => {
                    tracing::debug!(user = %user_id, attempt, "profile edit raced; retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(Error::conflict("profile changed concurrently; please retry"))
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

/// Whether `value` is empty (always allowed) or an http(s) URL whose host,
/// lowercased and with one leading `www.` stripped, is in `allowed`.
fn host_is_allowed(value: &str, allowed: &[&str]) -> bool {
    if value.is_empty() {
        return true;
    }
    let Ok(parsed) = Url::parse(value) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    allowed.contains(&host)
}

#[cfg(test)]
mod tests;
