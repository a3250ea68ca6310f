use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Presentation source not found: {location}")]
    SourceNotFound { location: String },

    #[error("Request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Document '{name}' is not valid JSON: {source}")]
    MalformedDocument {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Presentation contents unusable: {reason}")]
    InvalidContents { reason: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

/// 錯誤嚴重程度，CLI 依此決定退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ResolveError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ResolveError::ApiError(_) | ResolveError::HttpStatus { .. } => ErrorSeverity::Medium,
            ResolveError::SourceNotFound { .. } => ErrorSeverity::Medium,
            ResolveError::ConfigValidationError { .. }
            | ResolveError::InvalidConfigValueError { .. }
            | ResolveError::MissingConfigError { .. } => ErrorSeverity::High,
            ResolveError::MalformedDocument { .. } | ResolveError::InvalidContents { .. } => {
                ErrorSeverity::High
            }
            ResolveError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ResolveError::ConfigValidationError { .. }
                | ResolveError::InvalidConfigValueError { .. }
                | ResolveError::MissingConfigError { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ResolveError::ApiError(_) | ResolveError::HttpStatus { .. } => {
                "Check the network connection and the repository access token, then retry"
            }
            ResolveError::SourceNotFound { .. } => {
                "Verify the repository, branch and folder path of the presentation"
            }
            ResolveError::MalformedDocument { .. } => "Fix the JSON syntax of the reported document",
            ResolveError::InvalidContents { .. } => {
                "List the content file names as an array under \"contents\" in presentation.json"
            }
            ResolveError::IoError(_) => "Check that the local folder exists and is readable",
            _ => "Review the resolver configuration file and command line flags",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ResolveError::MalformedDocument { name, .. } => {
                format!("The document '{}' could not be parsed", name)
            }
            ResolveError::SourceNotFound { location } => {
                format!("No presentation found at {}", location)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_of_config_errors() {
        let err = ResolveError::MissingConfigError {
            field: "source.owner".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.is_config_error());
    }

    #[test]
    fn test_malformed_document_message() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ResolveError::MalformedDocument {
            name: "presentation.json".to_string(),
            source,
        };
        assert!(err.to_string().contains("presentation.json"));
        assert_eq!(
            err.user_friendly_message(),
            "The document 'presentation.json' could not be parsed"
        );
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_invalid_contents_is_not_a_config_error() {
        let err = ResolveError::InvalidContents {
            reason: "presentation config does not list any contents".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(!err.is_config_error());
    }
}
