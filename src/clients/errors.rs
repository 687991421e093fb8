//! Error types for API request processing.
//!
//! This module contains the error taxonomy that all request failures are
//! normalized into. Server-reported errors, retry exhaustion, and request
//! validation failures all surface through [`ApiError`].
//!
//! # Error Handling
//!
//! Every failure crosses the client boundary as an `ApiError`; there are no
//! sentinel return values. Only the absence of any usable response (connection
//! failure, timeout, unrecognized content type) is retried internally before
//! becoming [`ApiError::AttemptsExhausted`].
//!
//! # Example
//!
//! ```rust,ignore
//! use plenty_api::ApiError;
//!
//! match client.get("/items", Default::default()).await {
//!     Ok(body) => println!("items: {body:?}"),
//!     Err(ApiError::InvalidCredentials) => {
//!         eprintln!("re-provision API user and password");
//!     }
//!     Err(ApiError::Validation { message, .. }) => {
//!         eprintln!("validation failed: {message}");
//!     }
//!     Err(ApiError::AttemptsExhausted { attempts }) => {
//!         eprintln!("no response after {attempts} attempts");
//!     }
//!     Err(other) => eprintln!("request failed: {other}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when a request fails validation before it is sent.
///
/// No network call is made when this error is raised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRequestError {
    /// The request path is empty.
    #[error("Cannot send a request without a path.")]
    EmptyPath,
}

/// Unified error type for all API request failures.
///
/// Use pattern matching to handle specific failure kinds. The first four
/// variants form the server-facing taxonomy; the rest cover client-side
/// validation and transport plumbing.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API rejected the configured user/password. Fatal, never retried;
    /// the caller must re-provision credentials.
    #[error("invalid credentials: the API rejected the configured user and password")]
    InvalidCredentials,

    /// The API reported field-level validation errors. The message is a
    /// comma-joined list of every field error in the payload.
    #[error("validation failed: {message}")]
    Validation {
        /// Human-readable join of all field errors.
        message: String,
        /// The original error payload as returned by the API.
        payload: serde_json::Value,
    },

    /// Any other error reported by the API.
    #[error("API error: {message}")]
    Api {
        /// The `error.message` value from the payload, if present.
        message: String,
        /// The original error payload as returned by the API.
        payload: serde_json::Value,
    },

    /// No usable response was received within the retry ceiling.
    #[error("unable to get valid response after {attempts} attempts")]
    AttemptsExhausted {
        /// The number of attempts that were made.
        attempts: u32,
    },

    /// The pagination safety ceiling was reached before the server signalled
    /// the last page.
    #[error("page limit of {limit} exceeded while paginating; the server never signalled the last page")]
    PageLimitExceeded {
        /// The configured page ceiling.
        limit: u32,
    },

    /// Request validation failed before any network call.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequestError),

    /// A response with a JSON content type could not be decoded. Fatal,
    /// not retried.
    #[error("failed to decode JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Network or connection error surfaced outside the retry loop
    /// (the login exchange is a single attempt).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
