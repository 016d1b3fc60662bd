//! Outbound mail delivery port.

use async_trait::async_trait;

use crate::domain::user::EmailAddress;

/// Errors raised by mail adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailerError {
    /// The message could not be handed to the transport.
    #[error("mail delivery failed: {message}")]
    Delivery {
        /// Adapter-specific description.
        message: String,
    },
}

/// Port for sending password-reset messages.
///
/// The reset URL embeds the raw token; only its digest is persisted, so the
/// mail transport is the single place the raw token travels through.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a password-reset message pointing at `reset_url`.
    async fn send_password_reset(
        &self,
        to: &EmailAddress,
        reset_url: &str,
    ) -> Result<(), MailerError>;
}

/// Fixture mailer that accepts and discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMailer;

#[async_trait]
impl Mailer for FixtureMailer {
    async fn send_password_reset(
        &self,
        _to: &EmailAddress,
        _reset_url: &str,
    ) -> Result<(), MailerError> {
        Ok(())
    }
}
