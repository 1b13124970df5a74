use shared::errors::ServiceError;
use shared::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("No clipboard configured")]
    ClipboardUnavailable,

    #[error("Clipboard command failed: {0}")]
    ClipboardCommand(String),

    #[error("Clipboard I/O error: {0}")]
    ClipboardIo(#[from] std::io::Error),

    #[error("Ticket intake request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Ticket intake rejected submission with status {0}")]
    Rejected(u16),

    #[error("Invalid ticket intake response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Invalid selection: {0}")]
    Selection(#[from] ValidationError),
}

impl FormError {
    /// Classify for structured logging
    pub fn to_service_error(&self) -> ServiceError {
        match self {
            FormError::ClipboardUnavailable
            | FormError::ClipboardCommand(_)
            | FormError::ClipboardIo(_) => ServiceError::clipboard_error(self),
            FormError::Transport(e) => ServiceError::intake_unavailable(e),
            FormError::Rejected(status) => ServiceError::intake_rejected(*status),
            FormError::InvalidResponse(e) => ServiceError::deserialization_error(e),
            FormError::Selection(e) => ServiceError::unknown_selection(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::errors::ErrorCategory;

    #[test]
    fn test_classification() {
        let error = FormError::Rejected(503).to_service_error();
        assert_eq!(error.category, ErrorCategory::Network);
        assert_eq!(error.code, "NETWORK_INTAKE_REJECTED");

        let error = FormError::ClipboardUnavailable.to_service_error();
        assert_eq!(error.code, "INTERNAL_CLIPBOARD");

        let error = FormError::Selection(ValidationError::UnknownBank("9999".into()))
            .to_service_error();
        assert_eq!(error.category, ErrorCategory::Validation);
        assert!(error.to_string().contains("9999"));
    }
}
