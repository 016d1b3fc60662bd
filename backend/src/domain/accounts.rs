//! Account service: registration, login, and the password-reset flow.
//!
//! The HTTP layer owns sessions; this service only proves identity and
//! mutates credential material. Login failures are deliberately uniform so
//! responses cannot be used to probe which addresses hold accounts, and the
//! forgot-password path answers identically whether or not the address is
//! known.

use std::sync::Arc;

use chrono::Duration;
use mockable::Clock;
use rand::Rng;

use crate::domain::credentials;
use crate::domain::ports::{Mailer, MailerError, StoreError, UserStore};
use crate::domain::user::{EmailAddress, User, UserId, UserProfile};
use crate::domain::Error;

/// How long a reset token stays redeemable.
const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Upper bound (exclusive) for the display counters seeded at
/// registration.
const SEED_COUNTER_CEILING: u32 = 10_000;

/// A registration request, as received from the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAccount {
    /// Given name; required.
    pub first_name: String,
    /// Family name; required.
    pub last_name: String,
    /// Address to register; normalised before use.
    pub email: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
    /// Free-form location string.
    pub location: String,
    /// Free-form occupation string.
    pub occupation: String,
    /// Opaque reference to the profile picture.
    pub picture_ref: String,
}

/// Service owning account lifecycle operations.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    mailer: Arc<dyn Mailer>,
    clock: Arc<dyn Clock>,
    client_url: String,
}

impl AccountService {
    /// Create the service.
    ///
    /// `client_url` is the web client's base URL; reset links are built
    /// against it.
    pub fn new(
        users: Arc<dyn UserStore>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
        client_url: String,
    ) -> Self {
        Self {
            users,
            mailer,
            clock,
            client_url,
        }
    }

    /// Register a new account and return its owner projection.
    pub async fn register(&self, request: &NewAccount) -> Result<UserProfile, Error> {
        let first_name = request.first_name.trim();
        let last_name = request.last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(Error::invalid_request(
                "first name and last name are required",
            ));
        }
        let email = EmailAddress::parse(&request.email)
            .map_err(|err| Error::invalid_request(format!("invalid email: {err}")))?;
        if request.password.is_empty() {
            return Err(Error::invalid_request("password is required"));
        }

        // Checked up front for a friendly message; the store's unique
        // constraint still backstops a racing registration.
        if self
            .users
            .find_by_email(&email)
            .await
            .map_err(Error::from)?
            .is_some()
        {
            return Err(StoreError::DuplicateEmail.into());
        }

        let password_hash = credentials::hash_password(&request.password)?;
        let mut rng = rand::thread_rng();
        let user = User {
            id: UserId::random(),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email,
            password_hash,
            location: request.location.trim().to_owned(),
            occupation: request.occupation.trim().to_owned(),
            picture_ref: request.picture_ref.clone(),
            friends: Vec::new(),
            twitter_url: None,
            linkedin_url: None,
            viewed_profile: rng.gen_range(0..SEED_COUNTER_CEILING),
            impressions: rng.gen_range(0..SEED_COUNTER_CEILING),
            reset_token_digest: None,
            reset_token_expires: None,
            created_at: self.clock.utc(),
            revision: 1,
        };

        self.users.insert(&user).await.map_err(Error::from)?;
        tracing::info!(user = %user.id, "account registered");
        Ok(UserProfile::for_self(&user))
    }

    /// Verify credentials and return the owner projection.
    ///
    /// Every failure mode (malformed address, unknown address, wrong
    /// password) produces the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, Error> {
        let invalid = || Error::unauthorized("invalid email or password");

        let email = EmailAddress::parse(email).map_err(|_| invalid())?;
        let user = self
            .users
            .find_by_email(&email)
            .await
            .map_err(Error::from)?
            .ok_or_else(invalid)?;
        if !credentials::verify_password(&user.password_hash, password) {
            return Err(invalid());
        }

        tracing::info!(user = %user.id, "login succeeded");
        Ok(UserProfile::for_self(&user))
    }

    /// Start a password reset for `email`.
    ///
    /// Succeeds without side effects when the address is unknown or
    /// malformed; callers must present the same message either way.
    pub async fn forgot_password(&self, email: &str) -> Result<(), Error> {
        let Ok(email) = EmailAddress::parse(email) else {
            return Ok(());
        };
        let Some(mut user) = self
            .users
            .find_by_email(&email)
            .await
            .map_err(Error::from)?
        else {
            return Ok(());
        };

        let reset = credentials::generate_reset_token();
        let expected = user.revision;
        user.reset_token_digest = Some(reset.digest);
        user.reset_token_expires =
            Some(self.clock.utc() + Duration::hours(RESET_TOKEN_TTL_HOURS));
        user.revision = expected + 1;
        self.users
            .save(&user, expected)
            .await
            .map_err(Error::from)?;

        let reset_url = format!("{}/reset-password?token={}", self.client_url, reset.token);
        self.mailer
            .send_password_reset(&user.email, &reset_url)
            .await
            .map_err(|MailerError::Delivery { message }| {
                Error::internal(format!("failed to send reset email: {message}"))
            })?;

        tracing::info!(user = %user.id, "password reset initiated");
        Ok(())
    }

    /// Redeem a reset token and set a new password.
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<(), Error> {
        if token.is_empty() || password.is_empty() {
            return Err(Error::invalid_request(
                "token and new password are required",
            ));
        }

        let stale = || Error::invalid_request("reset token is invalid or has expired");

        let digest = credentials::digest_token(token);
        let mut user = self
            .users
            .find_by_reset_token(&digest)
            .await
            .map_err(Error::from)?
            .ok_or_else(stale)?;
        let expires = user.reset_token_expires.ok_or_else(stale)?;
        if expires <= self.clock.utc() {
            return Err(stale());
        }

        let expected = user.revision;
        user.password_hash = credentials::hash_password(password)?;
        user.reset_token_digest = None;
        user.reset_token_expires = None;
        user.revision = expected + 1;
        self.users
            .save(&user, expected)
            .await
            .map_err(Error::from)?;

        tracing::info!(user = %user.id, "password reset completed");
        Ok(())
    }
}
