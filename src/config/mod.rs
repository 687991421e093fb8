//! Configuration types for the Plentymarkets API client.
//!
//! This module provides the core configuration types used to initialize
//! the client for API communication with a Plentymarkets system.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiConfig`]: The main configuration struct holding credentials and client settings
//! - [`ApiConfigBuilder`]: A builder for constructing [`ApiConfig`] instances
//! - [`ApiUser`]: A validated API user newtype
//! - [`ApiPassword`]: A validated API password newtype with masked debug output
//! - [`SiteUrl`]: A validated Plentymarkets site URL
//! - [`TokenStore`]: The bearer token state managed by the client
//!
//! # Example
//!
//! ```rust
//! use plenty_api::{ApiConfig, ApiUser, ApiPassword, SiteUrl};
//!
//! let config = ApiConfig::builder()
//!     .api_user(ApiUser::new("my-api-user").unwrap())
//!     .api_password(ApiPassword::new("my-password").unwrap())
//!     .site_url(SiteUrl::new("https://shop.example.com").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{ApiPassword, ApiUser, SiteUrl};

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::ConfigError;

/// Default request timeout for a single network call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default safety ceiling on the number of pages fetched per paginated call.
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Configuration for the Plentymarkets API client.
///
/// This struct holds the API credentials, the site URL that all request
/// URLs are derived from, and client behavior settings. Credential presence
/// is validated fail-fast when the configuration is built, so a client
/// constructed from an `ApiConfig` always has a user and password available
/// for the login exchange.
///
/// # Thread Safety
///
/// `ApiConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use plenty_api::{ApiConfig, ApiUser, ApiPassword, SiteUrl};
///
/// let config = ApiConfig::builder()
///     .api_user(ApiUser::new("my-api-user").unwrap())
///     .api_password(ApiPassword::new("my-password").unwrap())
///     .site_url(SiteUrl::new("https://shop.example.com").unwrap())
///     .timeout(Duration::from_secs(10))
///     .log(true)
///     .build()
///     .unwrap();
///
/// assert!(config.log());
/// ```
#[derive(Clone, Debug)]
pub struct ApiConfig {
    api_user: ApiUser,
    api_password: ApiPassword,
    site_url: SiteUrl,
    log: bool,
    timeout: Duration,
    max_pages: u32,
}

impl ApiConfig {
    /// Creates a new builder for constructing an `ApiConfig`.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }

    /// Returns the API user.
    #[must_use]
    pub const fn api_user(&self) -> &ApiUser {
        &self.api_user
    }

    /// Returns the API password.
    #[must_use]
    pub const fn api_password(&self) -> &ApiPassword {
        &self.api_password
    }

    /// Returns the site URL.
    #[must_use]
    pub const fn site_url(&self) -> &SiteUrl {
        &self.site_url
    }

    /// Returns whether request/response tracing is enabled.
    #[must_use]
    pub const fn log(&self) -> bool {
        self.log
    }

    /// Returns the per-request network timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the safety ceiling on pages fetched per paginated call.
    #[must_use]
    pub const fn max_pages(&self) -> u32 {
        self.max_pages
    }
}

/// Builder for constructing [`ApiConfig`] instances.
///
/// The `api_user`, `api_password`, and `site_url` fields are required;
/// [`build`](Self::build) fails with [`ConfigError::MissingRequiredField`]
/// if any of them is missing.
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    api_user: Option<ApiUser>,
    api_password: Option<ApiPassword>,
    site_url: Option<SiteUrl>,
    log: bool,
    timeout: Option<Duration>,
    max_pages: Option<u32>,
}

impl ApiConfigBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the API user (required).
    #[must_use]
    pub fn api_user(mut self, api_user: ApiUser) -> Self {
        self.api_user = Some(api_user);
        self
    }

    /// Sets the API password (required).
    #[must_use]
    pub fn api_password(mut self, api_password: ApiPassword) -> Self {
        self.api_password = Some(api_password);
        self
    }

    /// Sets the site URL (required).
    #[must_use]
    pub fn site_url(mut self, site_url: SiteUrl) -> Self {
        self.site_url = Some(site_url);
        self
    }

    /// Enables or disables request/response tracing (default: disabled).
    #[must_use]
    pub const fn log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    /// Sets the per-request network timeout (default: 30 seconds).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the safety ceiling on pages fetched per paginated call
    /// (default: 1000).
    #[must_use]
    pub const fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Builds the [`ApiConfig`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_user`,
    /// `api_password`, or `site_url` has not been set.
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let api_user = self
            .api_user
            .ok_or(ConfigError::MissingRequiredField { field: "api_user" })?;
        let api_password = self.api_password.ok_or(ConfigError::MissingRequiredField {
            field: "api_password",
        })?;
        let site_url = self
            .site_url
            .ok_or(ConfigError::MissingRequiredField { field: "site_url" })?;

        Ok(ApiConfig {
            api_user,
            api_password,
            site_url,
            log: self.log,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            max_pages: self.max_pages.unwrap_or(DEFAULT_MAX_PAGES),
        })
    }
}

/// Bearer token state for an authenticated client.
///
/// The store holds the access token, the refresh token, and the expiry
/// instant returned by the login exchange. The access token and expiry are
/// always set and cleared together, so [`tokens_valid`](Self::tokens_valid)
/// only answers `true` while a non-expired token is present.
///
/// The client keeps the store behind a mutex so the validity check, the
/// login exchange, and the token write form one critical section.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenStore {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl TokenStore {
    /// Returns `true` while an access token is present and not yet expired.
    #[must_use]
    pub fn tokens_valid(&self) -> bool {
        match (&self.access_token, self.expires_at) {
            (Some(_), Some(expires_at)) => Utc::now() < expires_at,
            _ => false,
        }
    }

    /// Stores a fresh set of tokens from a login exchange.
    pub fn set(
        &mut self,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_at: DateTime<Utc>,
    ) {
        self.access_token = Some(access_token.into());
        self.refresh_token = refresh_token;
        self.expires_at = Some(expires_at);
    }

    /// Clears all stored tokens.
    pub fn clear(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
        self.expires_at = None;
    }

    /// Returns the stored access token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Returns the stored refresh token, if any.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Returns the stored expiry instant, if any.
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Token values are masked, only presence and expiry are shown.
        f.debug_struct("TokenStore")
            .field("access_token", &self.access_token.as_ref().map(|_| "*****"))
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "*****"),
            )
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
