use std::path::PathBuf;
use thiserror::Error;

use crate::types::{TeamAction, TeamId};

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("{message}")]
    Validation { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Session expired or invalid. Run 'teamadm login' to sign in again")]
    Unauthorized,

    #[error("Not logged in. Run 'teamadm login' or set TEAMADM_TOKEN")]
    NoSession,

    #[error("Email is required")]
    MissingEmail,

    #[error("Signed in as '{0}', but this command needs an admin account")]
    NotAdmin(String),

    #[error("Failed to read {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Failed to parse session file at {path}: {source}")]
    SessionParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Team {0} is not on the current page")]
    TeamNotVisible(TeamId),

    #[error("Team {0} not found")]
    TeamNotFound(TeamId),

    #[error("Cannot {} team {id}: payment is not pending", action.label())]
    ActionUnavailable { id: TeamId, action: TeamAction },

    /// The failure was already shown to the user as a notification.
    #[error("Command failed")]
    Reported,
}

impl AdminError {
    /// Failures that should drop the stored session.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AdminError::Unauthorized)
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;
