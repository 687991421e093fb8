//! Error types for client configuration.
//!
//! This module contains error types used for configuration and validation
//! failures raised before any network call takes place.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use plenty_api::{ApiUser, ConfigError};
//!
//! let result = ApiUser::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiUser)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API user cannot be empty.
    #[error("API user cannot be empty. Please provide a valid Plentymarkets API user.")]
    EmptyApiUser,

    /// API password cannot be empty.
    #[error("API password cannot be empty. Please provide a valid Plentymarkets API password.")]
    EmptyApiPassword,

    /// Site URL is invalid.
    #[error("Invalid site URL '{url}'. Please provide a valid URL with scheme and host (e.g., 'https://shop.example.com').")]
    InvalidSiteUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_user_error_message() {
        let error = ConfigError::EmptyApiUser;
        let message = error.to_string();
        assert!(message.contains("API user cannot be empty"));
    }

    #[test]
    fn test_invalid_site_url_error_message() {
        let error = ConfigError::InvalidSiteUrl {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("scheme and host"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "api_user" };
        let message = error.to_string();
        assert!(message.contains("api_user"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyApiUser;
        let _: &dyn std::error::Error = &error;
    }
}
