use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Geocoding request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Geocoding lookup for '{name}' timed out")]
    LookupTimeout { name: String },

    #[error("Geocoding service returned HTTP {status} for '{name}'")]
    GeocoderStatus { name: String, status: u16 },

    #[error("Geocoding response error: {message}")]
    Geocoder { message: String },

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
    Network,
    Io,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MapError::ApiError(_)
            | MapError::LookupTimeout { .. }
            | MapError::GeocoderStatus { .. } => ErrorCategory::Network,
            MapError::IoError(_) => ErrorCategory::Io,
            MapError::CsvError(_) | MapError::SerializationError(_) | MapError::Geocoder { .. } => {
                ErrorCategory::Data
            }
            MapError::ConfigValidationError { .. }
            | MapError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 查詢失敗只會跳過單筆記錄
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MapError::ApiError(_) | MapError::LookupTimeout { .. } => {
                "Check network connectivity or raise --timeout-secs"
            }
            MapError::GeocoderStatus { .. } => {
                "Check the geocoder endpoint and that the User-Agent is accepted"
            }
            MapError::Geocoder { .. } => "Verify the endpoint speaks the Nominatim search API",
            MapError::IoError(_) => {
                "Make sure the input file exists and the output directory is writable"
            }
            MapError::CsvError(_) => "Check that the report path is writable",
            MapError::SerializationError(_) => "Check the marker names for invalid data",
            MapError::ConfigValidationError { .. } | MapError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MapError::IoError(e) => format!("File access failed: {}", e),
            MapError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
