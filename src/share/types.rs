//! Error and dialog types for sharing and invites.

use thiserror::Error;

/// Shown instead of a link when the log is empty.
pub const NOTHING_TO_SHARE_MESSAGE: &str = "Please draw some annotations first before sharing.";
/// Shown when the annotations could not be stored.
pub const SHARE_FAILED_MESSAGE: &str = "Error generating share URL";
/// Shown when a shared set could not be loaded.
pub const NO_ANNOTATIONS_FOUND_MESSAGE: &str = "No annotations found";
/// Shown when the host reports an empty session id.
pub const SESSION_ID_MISSING_MESSAGE: &str = "Could not get session ID";
/// Shown when asking the host for the session failed.
pub const SESSION_ID_ERROR_MESSAGE: &str = "Error getting session ID";

/// Errors that can occur while sharing, loading or inviting.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Nothing to share: the annotation log is empty")]
    NothingToShare,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Share store returned HTTP {0}")]
    Status(u16),

    #[error("No annotations stored under id '{0}'")]
    NotFound(String),

    #[error("Shared payload is not an array")]
    NotAnArray,

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid share link: {0}")]
    InvalidLink(String),

    #[error("Session info returned an empty session id")]
    MissingSessionId,

    #[error("Session info unavailable: {0}")]
    SessionInfo(String),
}

impl ShareError {
    /// Text for the share dialog when publishing failed.
    pub fn share_message(&self) -> &'static str {
        match self {
            ShareError::NothingToShare => NOTHING_TO_SHARE_MESSAGE,
            _ => SHARE_FAILED_MESSAGE,
        }
    }

    /// Text for the invite dialog when no link could be built.
    pub fn invite_message(&self) -> &'static str {
        match self {
            ShareError::MissingSessionId => SESSION_ID_MISSING_MESSAGE,
            _ => SESSION_ID_ERROR_MESSAGE,
        }
    }
}

/// Content of the modal the host shows after a share or invite request.
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    /// A share link, with the viewport size it was created for
    ShareLink {
        link: String,
        width: u32,
        height: u32,
    },
    /// A live-session invite link
    InviteLink(String),
    /// A plain message (nothing to share, or an error)
    Message(String),
}

impl Dialog {
    /// Copyable link, if the dialog carries one.
    pub fn link(&self) -> Option<&str> {
        match self {
            Dialog::ShareLink { link, .. } | Dialog::InviteLink(link) => Some(link),
            Dialog::Message(_) => None,
        }
    }

    /// Subtitle shown under a share link.
    pub fn resolution_note(&self) -> Option<String> {
        match self {
            Dialog::ShareLink { width, height, .. } => {
                Some(format!("Created for {width}x{height} resolution"))
            }
            _ => None,
        }
    }
}
