use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Malformed source '{source_name}': {reason}")]
    MalformedSource { source_name: String, reason: String },

    #[error("Missing value for required day '{day}'")]
    MissingDay { day: String },

    #[error("Cannot coerce value '{value}' for day '{day}' to an integer: {reason}")]
    ValueCoercion {
        day: String,
        value: String,
        reason: String,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Configuration,
    Io,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,      // 警告，但成功
            ErrorSeverity::Medium => 2,   // 重試錯誤
            ErrorSeverity::High => 1,     // 處理錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

impl EtlError {
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSource {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::MalformedSource { .. } | EtlError::CsvError(_) => ErrorCategory::Input,
            EtlError::MissingDay { .. } | EtlError::ValueCoercion { .. } => ErrorCategory::Data,
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            EtlError::IoError(_) => ErrorCategory::Io,
            EtlError::SerializationError(_) | EtlError::ZipError(_) => ErrorCategory::Output,
        }
    }

    /// 嚴重程度決定 CLI 的退出碼
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::MalformedSource { .. } => {
                "Make sure the file has a header row, a value row and a 'description' column"
            }
            EtlError::MissingDay { .. } => {
                "Provide every weekday (mon..fri), directly or through a range such as 'mon-thu'"
            }
            EtlError::ValueCoercion { .. } => "Day values must be whole numbers",
            EtlError::CsvError(_) => "Check the file is valid CSV",
            EtlError::IoError(_) => "Check that the paths exist and are readable/writable",
            EtlError::SerializationError(_) | EtlError::ZipError(_) => {
                "Check available disk space and output permissions"
            }
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Could not read input: {}", self),
            ErrorCategory::Data => format!("Invalid data: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Io => format!("File system problem: {}", self),
            ErrorCategory::Output => format!("Could not write report: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_are_high_severity() {
        let missing = EtlError::MissingDay {
            day: "wed".to_string(),
        };
        assert_eq!(missing.category(), ErrorCategory::Data);
        assert_eq!(missing.severity(), ErrorSeverity::High);

        let malformed = EtlError::malformed("1.csv", "expected 2 rows, found 1");
        assert_eq!(malformed.category(), ErrorCategory::Input);
        assert!(malformed.to_string().contains("1.csv"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = EtlError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().starts_with("File system problem"));
    }
}
