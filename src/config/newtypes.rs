//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use std::fmt;

use crate::error::ConfigError;

/// A validated Plentymarkets API user.
///
/// This newtype ensures the user name is non-empty and provides type safety
/// to prevent accidental misuse of raw strings.
///
/// # Example
///
/// ```rust
/// use plenty_api::ApiUser;
///
/// let user = ApiUser::new("shop-api-user").unwrap();
/// assert_eq!(user.as_ref(), "shop-api-user");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUser(String);

impl ApiUser {
    /// Creates a new validated API user.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiUser`] if the user name is empty.
    pub fn new(user: impl Into<String>) -> Result<Self, ConfigError> {
        let user = user.into();
        if user.is_empty() {
            return Err(ConfigError::EmptyApiUser);
        }
        Ok(Self(user))
    }
}

impl AsRef<str> for ApiUser {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated Plentymarkets API password.
///
/// This newtype ensures the password is non-empty and masks its value
/// in debug output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `ApiPassword(*****)` instead of the actual password.
///
/// # Example
///
/// ```rust
/// use plenty_api::ApiPassword;
///
/// let password = ApiPassword::new("my-password").unwrap();
/// assert_eq!(format!("{:?}", password), "ApiPassword(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiPassword(String);

impl ApiPassword {
    /// Creates a new validated API password.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiPassword`] if the password is empty.
    pub fn new(password: impl Into<String>) -> Result<Self, ConfigError> {
        let password = password.into();
        if password.is_empty() {
            return Err(ConfigError::EmptyApiPassword);
        }
        Ok(Self(password))
    }
}

impl AsRef<str> for ApiPassword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiPassword(*****)")
    }
}

/// A validated Plentymarkets site URL.
///
/// This newtype validates the URL on construction and precomputes the
/// origin (`scheme://host[:port]`) that all REST request URLs are built
/// from. Any path or query component of the configured URL is ignored,
/// only scheme, host, and port are kept.
///
/// # Example
///
/// ```rust
/// use plenty_api::SiteUrl;
///
/// let site = SiteUrl::new("https://shop.example.com/some/path").unwrap();
/// assert_eq!(site.origin(), "https://shop.example.com");
///
/// // An explicit port is preserved
/// let site = SiteUrl::new("http://localhost:8080").unwrap();
/// assert_eq!(site.origin(), "http://localhost:8080");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteUrl {
    url: String,
    origin: String,
}

impl SiteUrl {
    /// Creates a new validated site URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSiteUrl`] if the URL cannot be parsed
    /// or has no `http`/`https` scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let parsed = reqwest::Url::parse(&url)
            .map_err(|_| ConfigError::InvalidSiteUrl { url: url.clone() })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidSiteUrl { url });
        }
        let Some(host) = parsed.host_str() else {
            return Err(ConfigError::InvalidSiteUrl { url });
        };

        let origin = parsed.port().map_or_else(
            || format!("{}://{host}", parsed.scheme()),
            |port| format!("{}://{host}:{port}", parsed.scheme()),
        );

        Ok(Self { url, origin })
    }

    /// Returns the origin (`scheme://host[:port]`) of this site URL.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

impl AsRef<str> for SiteUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}
