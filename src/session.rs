//! Bearer session persisted between invocations.
//!
//! The session is an explicit value handed to the HTTP client. Only the
//! [`SessionStore`] reads or writes the file behind it.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AdminError, Result};

pub const ADMIN_ROLE: &str = "admin";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    /// Fail unless the session belongs to an admin account.
    pub fn require_admin(self) -> Result<Self> {
        if self.is_admin() {
            Ok(self)
        } else {
            Err(AdminError::NotAdmin(self.role))
        }
    }
}

/// Owns the on-disk location of the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store next to the config file.
    pub fn default_location() -> Result<Self> {
        Config::config_dir().map(|dir| Self::new(dir.join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents =
            std::fs::read_to_string(&self.path).map_err(|e| AdminError::ConfigRead {
                path: self.path.clone(),
                source: e,
            })?;

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| AdminError::SessionParse {
                path: self.path.clone(),
                source: e,
            })
    }

    /// Resolve the active session, letting `TEAMADM_TOKEN` bypass the file.
    pub fn resolve(&self) -> Result<Session> {
        if let Ok(token) = std::env::var("TEAMADM_TOKEN") {
            if !token.trim().is_empty() {
                return Ok(Session {
                    token,
                    role: ADMIN_ROLE.to_string(),
                    email: None,
                });
            }
        }

        self.load()?.ok_or(AdminError::NoSession)
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(session).map_err(|e| {
            AdminError::SessionParse {
                path: self.path.clone(),
                source: e,
            }
        })?;
        write_private(&self.path, &contents)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Remove the stored session. Missing files are not an error.
    pub fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "session cleared"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to clear session"),
        }
    }
}

/// Write a file only the owner can read. An existing file is truncated and
/// has its mode tightened too.
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents.as_bytes())
}
