/// Shared error types for the ticket form
///
/// Design Philosophy:
/// - Standardized error codes so the surface, the runtime and the logs agree
/// - Categorized by error domain (Validation, Network, Internal)
/// - Context field carries the detail that never reaches the buyer
///
/// Usage:
/// - Surface checks report one ServiceError per rejected field
/// - Submission failures are logged as ServiceError before the generic notice
/// - Error codes follow pattern: <CATEGORY>_<SPECIFIC>_<DETAIL>
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error categories that map to logging severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// Buyer input rejected before submission
    Validation,

    /// Ticket intake unreachable or refusing the request
    Network,

    /// Unexpected failures: bad responses, missing clipboard, configuration
    Internal,
}

impl ErrorCategory {
    /// Map error category to log level
    pub fn log_level(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "warn",
            ErrorCategory::Network => "error",
            ErrorCategory::Internal => "error",
        }
    }
}

/// Standard error codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCode(pub &'static str);

impl ErrorCode {
    // Validation errors
    pub const VALIDATION_MISSING_FULL_NAME: ErrorCode = ErrorCode("VALIDATION_MISSING_FULL_NAME");
    pub const VALIDATION_INVALID_PHONE: ErrorCode = ErrorCode("VALIDATION_INVALID_PHONE");
    pub const VALIDATION_INVALID_REFERENCE: ErrorCode = ErrorCode("VALIDATION_INVALID_REFERENCE");
    pub const VALIDATION_UNKNOWN_SELECTION: ErrorCode = ErrorCode("VALIDATION_UNKNOWN_SELECTION");

    // Network errors
    pub const NETWORK_INTAKE_UNAVAILABLE: ErrorCode = ErrorCode("NETWORK_INTAKE_UNAVAILABLE");
    pub const NETWORK_INTAKE_REJECTED: ErrorCode = ErrorCode("NETWORK_INTAKE_REJECTED");

    // Internal errors
    pub const INTERNAL_DESERIALIZATION: ErrorCode = ErrorCode("INTERNAL_DESERIALIZATION");
    pub const INTERNAL_CLIPBOARD: ErrorCode = ErrorCode("INTERNAL_CLIPBOARD");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Standardized error structure
///
/// - Structured error code for programmatic handling
/// - Human-readable message, shown inline for validation errors
/// - Optional context for debugging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceError {
    /// Error category (determines log level)
    pub category: ErrorCategory,

    /// Structured error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context (field names, status codes, causes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl ServiceError {
    pub fn new(category: ErrorCategory, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            category,
            code: code.as_str().to_string(),
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    // Validation error constructors
    pub fn missing_full_name() -> Self {
        Self::new(
            ErrorCategory::Validation,
            ErrorCode::VALIDATION_MISSING_FULL_NAME,
            "Ingresa tu nombre y apellido",
        )
        .with_context("field: full_name")
    }

    pub fn invalid_phone(digits: usize) -> Self {
        Self::new(
            ErrorCategory::Validation,
            ErrorCode::VALIDATION_INVALID_PHONE,
            "El teléfono debe tener 7 dígitos después de la operadora",
        )
        .with_context(format!("field: phone_local_number, digits: {}", digits))
    }

    pub fn invalid_reference(digits: usize) -> Self {
        Self::new(
            ErrorCategory::Validation,
            ErrorCode::VALIDATION_INVALID_REFERENCE,
            "La referencia debe tener 6 dígitos",
        )
        .with_context(format!("field: payment_reference, digits: {}", digits))
    }

    pub fn unknown_selection(error: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Validation,
            ErrorCode::VALIDATION_UNKNOWN_SELECTION,
            "Opción no disponible",
        )
        .with_context(error.to_string())
    }

    // Network error constructors
    pub fn intake_unavailable(error: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Network,
            ErrorCode::NETWORK_INTAKE_UNAVAILABLE,
            "Ticket intake unavailable",
        )
        .with_context(error.to_string())
    }

    pub fn intake_rejected(status: u16) -> Self {
        Self::new(
            ErrorCategory::Network,
            ErrorCode::NETWORK_INTAKE_REJECTED,
            "Ticket intake rejected the submission",
        )
        .with_context(format!("status: {}", status))
    }

    // Internal error constructors
    pub fn deserialization_error(error: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Internal,
            ErrorCode::INTERNAL_DESERIALIZATION,
            "Deserialization error",
        )
        .with_context(error.to_string())
    }

    pub fn clipboard_error(error: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Internal,
            ErrorCode::INTERNAL_CLIPBOARD,
            "Clipboard write failed",
        )
        .with_context(error.to_string())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "[{}] {}: {}", self.code, self.message, context)
        } else {
            write!(f, "[{}] {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ServiceError {}
