//! HTTP server configuration derived from the environment.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::Key;
use tracing::warn;

/// Default bind address when `BIND_ADDR` is unset.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Default client base URL when `CLIENT_URL` is unset.
const DEFAULT_CLIENT_URL: &str = "http://localhost:3000";

/// Configuration for creating the HTTP server.
///
/// Read from the environment:
/// - `BIND_ADDR`: socket address to listen on.
/// - `SESSION_KEY_FILE`: path to the session signing key material.
/// - `SESSION_ALLOW_EPHEMERAL=1`: permit a generated key when the file is
///   unreadable (always permitted in debug builds).
/// - `SESSION_COOKIE_SECURE=0`: disable the cookie `Secure` flag for plain
///   HTTP deployments.
/// - `CLIENT_URL`: web client base URL used in password-reset links.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) client_url: String,
}

impl ServerConfig {
    /// Build the configuration from environment variables.
    ///
    /// # Errors
    /// Fails when `BIND_ADDR` does not parse or when the session key file
    /// is unreadable in a release build without `SESSION_ALLOW_EPHEMERAL`.
    pub fn from_env() -> std::io::Result<Self> {
        let bind_addr: SocketAddr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
            .parse()
            .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

        let key_path =
            env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
        let key = match std::fs::read(&key_path) {
            Ok(bytes) => Key::derive_from(&bytes),
            Err(e) => {
                let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
                if cfg!(debug_assertions) || allow_dev {
                    warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                    Key::generate()
                } else {
                    return Err(std::io::Error::other(format!(
                        "failed to read session key at {key_path}: {e}"
                    )));
                }
            }
        };

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|v| v != "0")
            .unwrap_or(true);

        let client_url = env::var("CLIENT_URL").unwrap_or_else(|_| DEFAULT_CLIENT_URL.to_owned());

        Ok(Self {
            key,
            cookie_secure,
            bind_addr,
            client_url,
        })
    }

    /// Construct a configuration directly, bypassing the environment.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, bind_addr: SocketAddr, client_url: String) -> Self {
        Self {
            key,
            cookie_secure,
            bind_addr,
            client_url,
        }
    }

    /// The socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
