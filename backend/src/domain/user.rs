//! User records and their public projections.
//!
//! A [`User`] is the canonical stored record, including credential material
//! that must never reach a client. Handlers return [`FriendSummary`] or
//! [`UserProfile`] projections instead; the credential and reset-token
//! fields have no representation in either projection, so they cannot leak.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validate and construct a [`UserId`] from its string form.
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw).map(Self)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors raised by [`EmailAddress::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailValidationError {
    /// The address was empty after trimming.
    Empty,
    /// The address is not of the `local@domain` shape.
    Malformed,
}

impl fmt::Display for EmailValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "email address must not be empty"),
            Self::Malformed => write!(f, "email address must look like local@domain"),
        }
    }
}

impl std::error::Error for EmailValidationError {}

/// A normalised email address.
///
/// Parsing trims surrounding whitespace and lowercases the address, so two
/// [`EmailAddress`] values compare equal exactly when the store must treat
/// them as the same account (case-insensitive uniqueness).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate a raw address.
    pub fn parse(raw: &str) -> Result<Self, EmailValidationError> {
        let normalised = raw.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        let mut parts = normalised.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(EmailValidationError::Malformed);
        }
        Ok(Self(normalised))
    }

    /// The normalised address as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Canonical stored user record.
///
/// ## Invariants
/// - `friends` is symmetric across records and never contains the owner's
///   own id; only the friend-graph service mutates it, always committing
///   both sides through one store transaction.
/// - `friends` contains no duplicates; insertion order is preserved so
///   friend listings are stable.
/// - `revision` increments on every committed write, enabling the stores'
///   optimistic concurrency checks.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Given name; non-empty after trimming.
    pub first_name: String,
    /// Family name; non-empty after trimming.
    pub last_name: String,
    /// Unique, case-insensitively normalised address.
    pub email: EmailAddress,
    /// Argon2 PHC-format password hash. Never serialised.
    pub password_hash: String,
    /// Free-form location string.
    pub location: String,
    /// Free-form occupation string.
    pub occupation: String,
    /// Opaque reference to the profile picture.
    pub picture_ref: String,
    /// Ids of befriended users, insertion-ordered, duplicate-free.
    pub friends: Vec<UserId>,
    /// Optional Twitter/X profile URL (allow-listed hosts only).
    pub twitter_url: Option<String>,
    /// Optional LinkedIn profile URL (allow-listed host only).
    pub linkedin_url: Option<String>,
    /// Display counter seeded at registration.
    pub viewed_profile: u32,
    /// Display counter seeded at registration.
    pub impressions: u32,
    /// SHA-256 hex digest of an outstanding password-reset token.
    pub reset_token_digest: Option<String>,
    /// Expiry of the outstanding reset token.
    pub reset_token_expires: Option<DateTime<Utc>>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Optimistic concurrency stamp; bumped before each save.
    pub revision: u64,
}

impl User {
    /// Whether `other` is currently in this user's friend set.
    pub fn is_friend_of(&self, other: &UserId) -> bool {
        self.friends.contains(other)
    }

    /// Display name used in comment labels: `"First Last"`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Debug assertion helper: `friends` holds no duplicates and not `id`.
    pub fn friends_are_well_formed(&self) -> bool {
        let unique: HashSet<&UserId> = self.friends.iter().collect();
        unique.len() == self.friends.len() && !unique.contains(&self.id)
    }
}

/// Public-safe projection of a friend entry.
///
/// This is the fixed shape returned by friend listings, friendship toggles,
/// and directory search. Credential and counter fields are deliberately
/// absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FriendSummary {
    /// Stable identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Free-form occupation string.
    pub occupation: String,
    /// Free-form location string.
    pub location: String,
    /// Opaque reference to the profile picture.
    pub picture_ref: String,
}

impl From<&User> for FriendSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            occupation: user.occupation.clone(),
            location: user.location.clone(),
            picture_ref: user.picture_ref.clone(),
        }
    }
}

/// Public projection of a full profile.
///
/// `email` is populated only when the profile belongs to the acting user;
/// other viewers receive the same shape with `email` omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Stable identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Opaque reference to the profile picture.
    pub picture_ref: String,
    /// Ids of befriended users.
    pub friends: Vec<UserId>,
    /// Free-form location string.
    pub location: String,
    /// Free-form occupation string.
    pub occupation: String,
    /// Optional Twitter/X profile URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,
    /// Optional LinkedIn profile URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    /// Display counter.
    pub viewed_profile: u32,
    /// Display counter.
    pub impressions: u32,
    /// Present only when the profile belongs to the acting user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailAddress>,
}

impl UserProfile {
    /// Projection for the record owner, including the email address.
    pub fn for_self(user: &User) -> Self {
        let mut profile = Self::for_other(user);
        profile.email = Some(user.email.clone());
        profile
    }

    /// Projection for any other viewer; email is stripped.
    pub fn for_other(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            picture_ref: user.picture_ref.clone(),
            friends: user.friends.clone(),
            location: user.location.clone(),
            occupation: user.occupation.clone(),
            twitter_url: user.twitter_url.clone(),
            linkedin_url: user.linkedin_url.clone(),
            viewed_profile: user.viewed_profile,
            impressions: user.impressions,
            email: None,
        }
    }
}
