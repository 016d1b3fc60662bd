//! Driven ports for the hexagonal boundary.
//!
//! The record store from the system design is expressed as two repository
//! ports ([`UserStore`], [`PostStore`]) sharing one error vocabulary, plus a
//! [`Mailer`] port for password-reset delivery. Adapters live under
//! `outbound/`; tests substitute mockall doubles or the in-memory adapters.

mod mailer;
mod post_store;
mod user_store;

#[cfg(test)]
pub use mailer::MockMailer;
pub use mailer::{FixtureMailer, Mailer, MailerError};
#[cfg(test)]
pub use post_store::MockPostStore;
pub use post_store::{AuthorFields, FixturePostStore, PostStore};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{FixtureUserStore, UserStore};

use crate::domain::Error;

/// Errors raised by record store adapters.
///
/// `RevisionMismatch` is the optimistic-concurrency signal: services retry
/// the read-modify-write a bounded number of times before surfacing a
/// conflict to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or its lock was poisoned.
    #[error("record store unavailable: {message}")]
    Unavailable {
        /// Adapter-specific description.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("record store query failed: {message}")]
    Query {
        /// Adapter-specific description.
        message: String,
    },
    /// The addressed record does not exist.
    #[error("record not found")]
    Missing,
    /// Optimistic concurrency check failed.
    #[error("revision mismatch: expected {expected}, found {actual}")]
    RevisionMismatch {
        /// Revision the writer read before mutating.
        expected: u64,
        /// Revision currently committed in the store.
        actual: u64,
    },
    /// An account with the given email already exists.
    #[error("an account with this email already exists")]
    DuplicateEmail,
}

impl From<StoreError> for Error {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Unavailable { message } => {
                Error::internal(format!("record store unavailable: {message}"))
            }
            StoreError::Query { message } => {
                Error::internal(format!("record store query failed: {message}"))
            }
            StoreError::Missing => Error::not_found("record not found"),
            StoreError::RevisionMismatch { .. } => {
                Error::conflict("record changed concurrently; please retry")
            }
            StoreError::DuplicateEmail => {
                Error::conflict("an account with this email already exists; please log in")
            }
        }
    }
}
