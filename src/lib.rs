//! # Plentymarkets API Rust client
//!
//! A Rust client for the Plentymarkets REST API, providing type-safe
//! configuration, bearer-token lifecycle management, transient-failure
//! retry, and pagination handling.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ApiConfig`] and [`ApiConfigBuilder`]
//! - Validated newtypes for credentials and the site URL
//! - Automatic login exchange and token refresh before each request
//! - A bounded retry loop for attempts that produced no usable response
//! - Normalization of the API's heterogeneous error payloads into [`ApiError`]
//! - Page-number pagination, eager or driven by a per-page consumer
//!
//! Per-resource endpoint definitions (items, orders, warehouses, ...) are
//! thin callers of this layer: they resolve a path and hand the verb and
//! parameters to [`PlentyClient`].
//!
//! ## Quick Start
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
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use plenty_api::{PlentyClient, HttpMethod, ParsedBody};
//! use serde_json::Map;
//!
//! let client = PlentyClient::new(config);
//!
//! // Eager GET: fetches page 1 and flattens a nested array result
//! let items = client.get("/items", Map::new()).await?;
//!
//! // Walk all pages with a consumer
//! client
//!     .get_paginated("/orders", Map::new(), |entries| {
//!         for order in entries {
//!             println!("{order}");
//!         }
//!     })
//!     .await?;
//!
//! // Create a resource
//! let mut body = Map::new();
//! body.insert("typeId".to_string(), 1.into());
//! let created = client.post("/orders", body).await?;
//! ```
//!
//! ## Error Handling
//!
//! Every failure surfaces as an [`ApiError`]:
//!
//! ```rust,ignore
//! match client.get("/items", Map::new()).await {
//!     Ok(body) => { /* handle ParsedBody */ }
//!     Err(ApiError::InvalidCredentials) => { /* re-provision credentials */ }
//!     Err(ApiError::Validation { message, .. }) => { /* field errors */ }
//!     Err(ApiError::Api { message, .. }) => { /* other server error */ }
//!     Err(ApiError::AttemptsExhausted { .. }) => { /* no response after retries */ }
//!     Err(other) => { /* transport/validation plumbing */ }
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Credentials are instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: The client is `Send + Sync`; token refresh is one
//!   critical section
//! - **Async-first**: Designed for use with the Tokio async runtime

pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use clients::{
    ApiError, ApiRequest, ApiRequestBuilder, Headers, HttpMethod, InvalidRequestError,
    PageEnvelope, ParsedBody, PlentyClient, RawResponse, ShortPeriodLimit, ThrottlePolicy,
    ACCEPT_HEADER, ATTEMPT_COUNT, REST_PREFIX,
};
pub use config::{ApiConfig, ApiConfigBuilder, ApiPassword, ApiUser, SiteUrl, TokenStore};
pub use error::ConfigError;
