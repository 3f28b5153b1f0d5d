//! Error handling for RoomKit
//!
//! Every editing failure is soft: it is reported to the user as status text
//! and leaves the canonical state untouched. The variants below map one to one
//! onto those status outcomes.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Editing error type
///
/// Returned by editor operations that were rejected. The `Display` text is the
/// status line shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// A wall or door with (near) zero length, or a rectangle too large to fill
    #[error("{element} {problem}")]
    InvalidGeometry {
        /// Human readable element name ("Wall", "Door", "Area").
        element: String,
        problem: String,
    },

    /// A wall or door whose endpoints match an existing one
    #[error("{element} already exists")]
    DuplicateGeometry {
        /// Human readable element name ("Wall", "Door").
        element: String,
    },

    /// The operation would not change anything
    #[error("{message}")]
    EmptyOperation {
        /// Description of what was empty.
        message: String,
    },

    /// The current selection does not support the operation
    #[error("{message}")]
    SelectionUnavailable {
        /// Guidance for the user.
        message: String,
    },

    /// The selected element no longer exists
    #[error("{message}")]
    StaleReference {
        /// Explanation shown when the selection is cleared.
        message: String,
    },

    /// A texture input that is not an image
    #[error("Unsupported texture type: {mime}")]
    UnsupportedInput {
        /// The offered MIME type (or "unknown").
        mime: String,
    },

    /// Reading the texture image failed
    #[error("Failed to load texture: {reason}")]
    ResourceReadFailure {
        /// The underlying failure.
        reason: String,
    },
}

impl EditError {
    pub fn invalid_geometry(element: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            element: element.into(),
            problem: "is too short".to_string(),
        }
    }

    /// A rectangle covering more than `limit` cells.
    pub fn oversized(element: impl Into<String>, limit: usize) -> Self {
        Self::InvalidGeometry {
            element: element.into(),
            problem: format!("is too large (more than {} blocks)", limit),
        }
    }

    pub fn duplicate_geometry(element: impl Into<String>) -> Self {
        Self::DuplicateGeometry {
            element: element.into(),
        }
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self::EmptyOperation {
            message: message.into(),
        }
    }

    pub fn selection_unavailable(message: impl Into<String>) -> Self {
        Self::SelectionUnavailable {
            message: message.into(),
        }
    }

    pub fn stale(message: impl Into<String>) -> Self {
        Self::StaleReference {
            message: message.into(),
        }
    }

    pub fn unsupported_input(mime: impl Into<String>) -> Self {
        Self::UnsupportedInput { mime: mime.into() }
    }

    pub fn read_failure(reason: impl Into<String>) -> Self {
        Self::ResourceReadFailure {
            reason: reason.into(),
        }
    }

    /// Check if this is an empty-operation outcome
    pub fn is_empty_operation(&self) -> bool {
        matches!(self, EditError::EmptyOperation { .. })
    }
}

/// Cell key parse error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The key is not of the form `"x,y"`
    #[error("Malformed cell key: {key}")]
    Malformed {
        /// The offending key text.
        key: String,
    },

    /// A coordinate parsed but is NaN or infinite
    #[error("Non-finite coordinate in cell key: {key}")]
    NonFinite {
        /// The offending key text.
        key: String,
    },
}

/// Main error type for RoomKit
#[derive(Error, Debug)]
pub enum Error {
    /// Editing error
    #[error(transparent)]
    Edit(#[from] EditError),

    /// Cell key error
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an editing error
    pub fn is_edit_error(&self) -> bool {
        matches!(self, Error::Edit(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
