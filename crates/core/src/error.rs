// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shiftcycle_domain::DomainError;
use thiserror::Error;

/// Failure reported by a storage collaborator.
///
/// Store implementations convert their own errors into this type; the
/// engine then tags it with the CRUD step that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The kind of a failed engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Decode,
    Create,
    Read,
    Update,
    Delete,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Decode => "decode",
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors returned by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Input broke a structural or business rule. Nothing was written.
    #[error("{0}")]
    Validation(DomainError),
    /// A stored pattern could not be decoded.
    #[error("{0}")]
    Decode(DomainError),
    #[error("Failed to create pattern: {0}")]
    Create(String),
    #[error("Failed to read pattern: {0}")]
    Read(String),
    #[error("Failed to update pattern: {0}")]
    Update(String),
    #[error("Failed to delete pattern: {0}")]
    Delete(String),
    /// A referenced record does not exist.
    #[error("{resource} '{id}' not found")]
    NotFound {
        /// Kind of record, e.g. `"Assignment"`.
        resource: &'static str,
        id: String,
    },
}

impl CoreError {
    /// Returns the failure kind. `NotFound` is a read failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Create(_) => ErrorKind::Create,
            Self::Read(_) | Self::NotFound { .. } => ErrorKind::Read,
            Self::Update(_) => ErrorKind::Update,
            Self::Delete(_) => ErrorKind::Delete,
        }
    }

    /// Maps a decoder error: a rule of another recurrence kind is a
    /// validation failure, anything else is a decode failure.
    #[must_use]
    pub fn from_decode(err: DomainError) -> Self {
        match err {
            DomainError::NotCustomPattern => Self::Validation(err),
            other => Self::Decode(other),
        }
    }

    pub(crate) fn not_found(resource: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err)
    }
}
