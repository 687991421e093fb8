//! Request orchestration for Plentymarkets API communication.
//!
//! This module provides the client layer that every per-resource endpoint
//! definition calls into. It handles authentication, retries, response
//! parsing, error normalization, and pagination.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`PlentyClient`]: The async client orchestrating every logical request
//! - [`ApiRequest`]: One logical API operation (verb, path, params)
//! - [`ParsedBody`]: A parsed response payload (JSON, binary, or empty)
//! - [`PageEnvelope`]: The paginated-list response shape
//! - [`ApiError`]: The unified error taxonomy
//! - [`ThrottlePolicy`]: Pluggable pre-attempt rate-limit hook
//!
//! # Example
//!
//! ```rust,ignore
//! use plenty_api::{ApiConfig, ApiUser, ApiPassword, SiteUrl, PlentyClient};
//! use serde_json::Map;
//!
//! let config = ApiConfig::builder()
//!     .api_user(ApiUser::new("my-api-user")?)
//!     .api_password(ApiPassword::new("my-password")?)
//!     .site_url(SiteUrl::new("https://shop.example.com")?)
//!     .build()?;
//!
//! let client = PlentyClient::new(config);
//! let body = client.get("/items", Map::new()).await?;
//! ```
//!
//! # Retry Behavior
//!
//! Each logical request is given up to [`ATTEMPT_COUNT`] attempts. Only the
//! absence of a usable response (connection failure, timeout, unrecognized
//! content type) triggers another attempt; any error reported by the API
//! propagates immediately. When all attempts are exhausted the call fails
//! with [`ApiError::AttemptsExhausted`].

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{ApiError, InvalidRequestError};
pub use http_client::{PlentyClient, ThrottlePolicy, ACCEPT_HEADER, ATTEMPT_COUNT, REST_PREFIX};
pub use http_request::{ApiRequest, ApiRequestBuilder, HttpMethod};
pub use http_response::{Headers, PageEnvelope, ParsedBody, RawResponse, ShortPeriodLimit};
