//! Password hashing and reset-token material.
//!
//! Argon2id in PHC string format for password storage; reset tokens are
//! 32 random bytes handed out hex-encoded, with only their SHA-256 digest
//! persisted so a leaked store cannot redeem outstanding tokens.

use argon2::password_hash::rand_core::OsRng as PasswordRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::domain::Error;

const RESET_TOKEN_BYTES: usize = 32;

/// A freshly generated reset token and its storable digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetToken {
    /// Hex-encoded raw token; travels only inside the reset URL.
    pub token: String,
    /// SHA-256 hex digest; the only form the store keeps.
    pub digest: String,
}

/// Hash a password with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut PasswordRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| Error::internal(format!("password hashing failed: {err}")))
}

/// Verify a candidate password against a stored PHC hash.
///
/// Unparseable hashes verify as `false` rather than erroring; a corrupt
/// credential must behave like a wrong password, not a server fault.
pub fn verify_password(stored_hash: &str, candidate: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Generate a fresh reset token alongside its digest.
pub fn generate_reset_token() -> ResetToken {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    let token = hex::encode(bytes);
    let digest = digest_token(&token);
    ResetToken { token, digest }
}

/// Digest a raw token the way the store indexes it.
pub fn digest_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("correct horse battery staple").expect("hashing succeeds");
        assert!(verify_password(&hash, "correct horse battery staple"));
        assert!(!verify_password(&hash, "wrong password"));
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("same input").expect("hashing succeeds");
        let second = hash_password("same input").expect("hashing succeeds");
        assert_ne!(first, second);
    }

    #[test]
    fn corrupt_hash_verifies_false() {
        assert!(!verify_password("not-a-phc-string", "anything"));
    }

    #[test]
    fn reset_token_digest_matches_digest_fn() {
        let reset = generate_reset_token();
        assert_eq!(reset.token.len(), RESET_TOKEN_BYTES * 2);
        assert_eq!(digest_token(&reset.token), reset.digest);
        assert_ne!(reset.token, reset.digest);
    }

    #[test]
    fn tokens_are_unique() {
        let first = generate_reset_token();
        let second = generate_reset_token();
        assert_ne!(first.token, second.token);
    }
}
