use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceWiseError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Backend returned {status} for {endpoint}{}", fmt_detail(.detail))]
    ApiStatusError {
        status: u16,
        endpoint: String,
        detail: Option<String>,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Sign in required to {action}")]
    AuthRequiredError { action: String },

    #[error("Client state error: {message}")]
    StateError { message: String },
}

pub type Result<T> = std::result::Result<T, PriceWiseError>;

fn fmt_detail(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Backend,
    Configuration,
    Validation,
    Authentication,
    Storage,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PriceWiseError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn auth_required(action: impl Into<String>) -> Self {
        Self::AuthRequiredError {
            action: action.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) => ErrorCategory::Network,
            Self::ApiStatusError { .. } => ErrorCategory::Backend,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::AuthRequiredError { .. } => ErrorCategory::Authentication,
            Self::IoError(_) | Self::StateError { .. } => ErrorCategory::Storage,
            Self::CsvError(_) | Self::SerializationError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路或後端暫時性錯誤，可重試
            Self::ApiError(_) => ErrorSeverity::Medium,
            Self::ApiStatusError { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            Self::ApiStatusError { .. } => ErrorSeverity::High,
            Self::ValidationError { .. } | Self::AuthRequiredError { .. } => ErrorSeverity::High,
            Self::CsvError(_) | Self::SerializationError(_) => ErrorSeverity::High,
            Self::StateError { .. } => ErrorSeverity::High,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(e) if e.is_timeout() => {
                "The PriceWise backend took too long to answer.".to_string()
            }
            Self::ApiError(_) => "Could not reach the PriceWise backend.".to_string(),
            Self::ApiStatusError { status, .. } if *status >= 500 => {
                "The PriceWise backend is having trouble right now.".to_string()
            }
            Self::ApiStatusError { status: 404, .. } => {
                "The requested item was not found.".to_string()
            }
            Self::ApiStatusError { status, .. } => {
                format!("The backend rejected the request (HTTP {}).", status)
            }
            Self::AuthRequiredError { action } => format!("Please sign in to {}.", action),
            Self::ValidationError { message } => message.clone(),
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => format!("Configuration problem: {}", self),
            Self::StateError { .. } | Self::IoError(_) => {
                "Could not read or write the local PriceWise state.".to_string()
            }
            Self::CsvError(_) | Self::SerializationError(_) => {
                "Received data in an unexpected format.".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the backend is running and --api-url points to it",
            ErrorCategory::Backend => "Try again later; run `pricewise health` to check the backend",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::Validation => "Check the command arguments and try again",
            ErrorCategory::Authentication => "Run `pricewise login --user-id <id> --email <email>` first",
            ErrorCategory::Storage => "Check permissions of the state directory (--state-dir)",
            ErrorCategory::Data => "The backend may be a different version; check its logs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_are_retryable() {
        let err = PriceWiseError::ApiStatusError {
            status: 503,
            endpoint: "/api/v1/products/search".to_string(),
            detail: None,
        };
        assert_eq!(err.category(), ErrorCategory::Backend);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.user_friendly_message().contains("trouble"));
    }

    #[test]
    fn test_status_error_display_includes_detail() {
        let err = PriceWiseError::ApiStatusError {
            status: 500,
            endpoint: "/api/v1/tracker/track".to_string(),
            detail: Some("'product_id'".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Backend returned 500 for /api/v1/tracker/track: 'product_id'"
        );
    }

    #[test]
    fn test_auth_required_message() {
        let err = PriceWiseError::auth_required("view saved items");
        assert_eq!(err.category(), ErrorCategory::Authentication);
        assert_eq!(err.user_friendly_message(), "Please sign in to view saved items.");
    }
}
