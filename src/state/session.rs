/// Login gate
///
/// The session flag is read once at startup and written on every
/// login/logout. Credential checking sits behind `Authenticator` so the
/// static pair can be swapped for a backend-verified scheme.

use tracing::{info, warn};

use super::storage::Storage;

/// Storage key of the session flag
pub const SESSION_KEY: &str = "isLoggedIn";

/// Decides whether a username/password pair is accepted
pub trait Authenticator: Send {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// A single fixed credential pair, compared exactly (case-sensitive)
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new("Admin", "Admin")
    }
}

impl Authenticator for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

/// The logged-in flag and where it is persisted
pub struct Session {
    storage: Box<dyn Storage>,
    authenticator: Box<dyn Authenticator>,
    logged_in: bool,
}

impl Session {
    /// Restore the session flag from `storage`.
    pub fn restore(storage: Box<dyn Storage>, authenticator: Box<dyn Authenticator>) -> Self {
        let logged_in = storage.get(SESSION_KEY).as_deref() == Some("true");
        Self {
            storage,
            authenticator,
            logged_in,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Returns `true` and persists the flag when the credentials are accepted.
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        if !self.authenticator.verify(username, password) {
            warn!("🔒 Rejected login attempt for '{}'", username);
            return false;
        }

        info!("🔓 '{}' logged in", username);
        self.set_logged_in(true);
        true
    }

    pub fn logout(&mut self) {
        info!("🔒 Logged out");
        self.set_logged_in(false);
    }

    fn set_logged_in(&mut self, value: bool) {
        self.logged_in = value;
        if let Err(e) = self.storage.set(SESSION_KEY, if value { "true" } else { "false" }) {
            warn!("⚠️  Could not persist session flag: {}", e);
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("logged_in", &self.logged_in)
            .finish()
    }
}
