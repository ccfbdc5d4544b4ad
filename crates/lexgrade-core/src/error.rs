//! Error types for lexgrade-core.
//!
//! The analysis engine itself is infallible: degenerate input produces
//! zeroed metrics rather than an error. The types here cover configuration
//! loading and the retargeting loop that drives an external text service.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors reported by a [`TextService`](crate::retarget::TextService) implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service call failed.
    #[error("text service request failed: {message}")]
    Request {
        /// Description of the failure, as reported by the service.
        message: String,
    },

    /// The service answered with no usable text.
    #[error("text service returned an empty response")]
    EmptyResponse,
}

/// Result type alias using [`ServiceError`].
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors that end a retargeting loop without any analysed candidate.
#[derive(Error, Debug)]
pub enum RetargetError {
    /// The attempt limit was zero.
    #[error("attempt limit must be at least 1")]
    NoAttempts,

    /// Every attempt failed at the service.
    #[error("all {attempts} attempts failed; last error: {last}")]
    AllAttemptsFailed {
        /// Number of attempts made.
        attempts: usize,
        /// The error from the final attempt.
        #[source]
        last: ServiceError,
    },
}

/// Result type alias using [`RetargetError`].
pub type RetargetResult<T> = Result<T, RetargetError>;
