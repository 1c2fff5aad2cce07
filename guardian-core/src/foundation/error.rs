use secp256k1::Error as SecpError;
use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    SerializationError,
    EncodingError,
    NetworkError,
    TransportError,
    ConfigError,
    MetricsError,
    CryptoError,
    LoggingError,
    InvalidQuorumCertificate,
    Message,
}

#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum GuardianError {
    #[error("{format} serialization error: {details}")]
    SerializationError { format: String, details: String },

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("transport error during {operation}: {details}")]
    TransportError { operation: String, details: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("metrics error during {operation}: {details}")]
    MetricsError { operation: String, details: String },

    #[error("crypto error during {operation}: {details}")]
    CryptoError { operation: String, details: String },

    #[error("logger initialization failed: {0}")]
    LoggingError(String),

    /// Quorum certificate bytes or fields do not fit the binary layout.
    #[error("invalid quorum certificate: {0}")]
    InvalidQuorumCertificate(String),

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, GuardianError>;

impl GuardianError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GuardianError::SerializationError { .. } => ErrorCode::SerializationError,
            GuardianError::EncodingError(_) => ErrorCode::EncodingError,
            GuardianError::NetworkError(_) => ErrorCode::NetworkError,
            GuardianError::TransportError { .. } => ErrorCode::TransportError,
            GuardianError::ConfigError(_) => ErrorCode::ConfigError,
            GuardianError::MetricsError { .. } => ErrorCode::MetricsError,
            GuardianError::CryptoError { .. } => ErrorCode::CryptoError,
            GuardianError::LoggingError(_) => ErrorCode::LoggingError,
            GuardianError::InvalidQuorumCertificate(_) => ErrorCode::InvalidQuorumCertificate,
            GuardianError::Message(_) => ErrorCode::Message,
        }
    }

    pub fn context(&self) -> ErrorContext {
        ErrorContext { code: self.code(), message: self.to_string() }
    }

    pub fn transport(operation: impl Into<String>, details: impl Into<String>) -> Self {
        GuardianError::TransportError { operation: operation.into(), details: details.into() }
    }

    pub fn metrics(operation: impl Into<String>, details: impl Into<String>) -> Self {
        GuardianError::MetricsError { operation: operation.into(), details: details.into() }
    }
}

impl From<hex::FromHexError> for GuardianError {
    fn from(err: hex::FromHexError) -> Self {
        GuardianError::EncodingError(format!("hex decode error: {}", err))
    }
}

impl From<bincode::Error> for GuardianError {
    fn from(err: bincode::Error) -> Self {
        GuardianError::SerializationError { format: "bincode".to_string(), details: err.to_string() }
    }
}

impl From<io::Error> for GuardianError {
    fn from(err: io::Error) -> Self {
        GuardianError::Message(format!("io error: {}", err))
    }
}

impl From<SecpError> for GuardianError {
    fn from(err: SecpError) -> Self {
        GuardianError::CryptoError { operation: "secp256k1".to_string(), details: err.to_string() }
    }
}

impl From<figment::Error> for GuardianError {
    fn from(err: figment::Error) -> Self {
        GuardianError::ConfigError(format!("config extraction failed: {}", err))
    }
}

impl From<prometheus::Error> for GuardianError {
    fn from(err: prometheus::Error) -> Self {
        GuardianError::MetricsError { operation: "prometheus".to_string(), details: err.to_string() }
    }
}

#[macro_export]
macro_rules! serde_err {
    ($fmt:expr, $err:expr) => {
        $crate::foundation::GuardianError::SerializationError { format: $fmt.into(), details: $err.to_string() }
    };
}

// NOTE: Avoid adding generic "stringly" error conversions here.
// Use structured `GuardianError` variants at the call site to preserve context.
