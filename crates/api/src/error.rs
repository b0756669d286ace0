// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use shiftcycle::{CoreError, ErrorKind};
use shiftcycle_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
/// Every variant reports a stable [`ApiError::kind`] alongside its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A stored pattern could not be decoded.
    UnreadablePattern {
        /// A description of the defect.
        message: String,
    },
    /// The storage collaborator failed.
    StorageFailure {
        /// The CRUD step that failed: `create`, `read`, `update` or `delete`.
        operation: &'static str,
        /// A description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the stable failure kind reported to callers.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DomainRuleViolation { .. } | Self::InvalidInput { .. } => {
                ErrorKind::Validation.as_str()
            }
            Self::ResourceNotFound { .. } => ErrorKind::Read.as_str(),
            Self::UnreadablePattern { .. } => ErrorKind::Decode.as_str(),
            Self::StorageFailure { operation, .. } => *operation,
            Self::Internal { .. } => "internal",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::UnreadablePattern { message } => {
                write!(f, "Stored pattern is unreadable: {message}")
            }
            Self::StorageFailure { operation, message } => {
                write!(f, "Storage {operation} failed: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

fn invalid_input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: String::from(field),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// Errors tied to a single request field become `InvalidInput`; rules over
/// the pattern as a whole become `DomainRuleViolation`.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidName(_) => invalid_input("name", &err),
        DomainError::StartDateTooEarly { .. } | DomainError::StartDateTooLate { .. } => {
            invalid_input("anchor_date", &err)
        }
        DomainError::InvalidEndDate { .. } => invalid_input("end_date", &err),
        DomainError::InvalidPreviewLength { .. } => invalid_input("preview_days", &err),
        DomainError::DateParseError { .. } | DomainError::DateArithmeticOverflow { .. } => {
            invalid_input("date", &err)
        }
        DomainError::InvalidStatus(_) => invalid_input("status", &err),
        DomainError::EmptyPattern
        | DomainError::TooShort { .. }
        | DomainError::TooLong { .. }
        | DomainError::NonSequential { .. }
        | DomainError::MissingShiftReference { .. }
        | DomainError::UnknownShiftReference { .. }
        | DomainError::NotCustomPattern
        | DomainError::CorruptPattern { .. } => ApiError::DomainRuleViolation {
            rule: String::from(err.rule()),
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    let kind: ErrorKind = err.kind();
    match err {
        CoreError::Validation(domain_err) => translate_domain_error(domain_err),
        CoreError::Decode(domain_err) => ApiError::UnreadablePattern {
            message: domain_err.to_string(),
        },
        CoreError::NotFound { resource, id } => ApiError::ResourceNotFound {
            resource_type: String::from(resource),
            message: format!("{resource} '{id}' does not exist"),
        },
        CoreError::Create(message)
        | CoreError::Read(message)
        | CoreError::Update(message)
        | CoreError::Delete(message) => ApiError::StorageFailure {
            operation: kind.as_str(),
            message,
        },
    }
}
