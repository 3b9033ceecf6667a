use std::fmt;

use serde::Deserialize;

use crate::error::MonitorError;

/// The shared username/password pair guarding the dashboard.
///
/// This is a plaintext equality check with no hashing, lockout or rate limiting.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "modelación".to_string(),
            password: "sistemas".to_string(),
        }
    }
}

// Keeps the password out of `{:?}` logging.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Credentials {
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Per-window session state, owned by `AppState` and handed to the renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn {
        username: String,
    },
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Session::LoggedIn { username } => Some(username),
            Session::LoggedOut => None,
        }
    }

    /// Attempt to log in. On mismatch the session is left unchanged by the
    /// caller and may be retried without limit.
    pub fn login(
        self,
        credentials: &Credentials,
        username: &str,
        password: &str,
    ) -> Result<Session, MonitorError> {
        if credentials.matches(username, password) {
            log::info!("User {username:?} logged in");
            Ok(Session::LoggedIn {
                username: username.to_string(),
            })
        } else {
            log::warn!("Rejected login for {username:?}");
            Err(MonitorError::InvalidCredentials)
        }
    }

    pub fn logout(self) -> Session {
        if let Session::LoggedIn { username } = &self {
            log::info!("User {username:?} logged out");
        }
        Session::LoggedOut
    }
}
