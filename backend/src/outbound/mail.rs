//! Log-only mail adapter.

use async_trait::async_trait;

use crate::domain::ports::{Mailer, MailerError};
use crate::domain::user::EmailAddress;

/// [`Mailer`] that records deliveries in the structured log.
///
/// There is no SMTP transport in this deployment; the reset URL lands in
/// the operator's log stream instead, which is enough for the supported
/// self-hosted setups. The raw token is in the URL, so the log target is
/// split out to let operators route or drop it separately.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_password_reset(
        &self,
        to: &EmailAddress,
        reset_url: &str,
    ) -> Result<(), MailerError> {
        tracing::info!(
            target: "backend::mail",
            to = %to,
            reset_url,
            "password reset requested"
        );
        Ok(())
    }
}
