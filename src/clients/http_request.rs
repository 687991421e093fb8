//! Request types for the Plentymarkets API client.
//!
//! This module provides the [`ApiRequest`] type and its builder for
//! describing one logical API operation.

use std::fmt;

use serde_json::{Map, Value};

use crate::clients::errors::InvalidRequestError;

/// HTTP methods recognized by the client.
///
/// Any other verb is unrepresentable; callers pick a variant instead of
/// passing a string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partially updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` for methods whose parameters are serialized as a JSON
    /// body. GET and DELETE send parameters as a query string instead.
    #[must_use]
    pub const fn sends_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// One logical API operation: a verb, a resolved path, and a parameter map.
///
/// The request is immutable once built; retries replay the same request.
/// The path is expected to already have its placeholders resolved by the
/// per-resource caller, with or without a leading slash.
///
/// # Example
///
/// ```rust
/// use plenty_api::{ApiRequest, HttpMethod};
/// use serde_json::json;
///
/// let request = ApiRequest::builder(HttpMethod::Get, "/items")
///     .param("with", "variations")
///     .build()
///     .unwrap();
///
/// let create = ApiRequest::builder(HttpMethod::Post, "/orders")
///     .param("typeId", 1)
///     .param("plentyId", json!(1000))
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The resolved resource path, relative to the `/rest` prefix.
    pub path: String,
    /// Parameters, sent as query string (GET/DELETE) or JSON body (others).
    pub params: Map<String, Value>,
}

impl ApiRequest {
    /// Creates a new builder for constructing an `ApiRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> ApiRequestBuilder {
        ApiRequestBuilder::new(method, path)
    }

    /// Validates the request, ensuring it can be sent.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError::EmptyPath`] if the path is empty.
    pub fn verify(&self) -> Result<(), InvalidRequestError> {
        if self.path.is_empty() {
            return Err(InvalidRequestError::EmptyPath);
        }
        Ok(())
    }
}

/// Builder for constructing [`ApiRequest`] instances.
#[derive(Debug)]
pub struct ApiRequestBuilder {
    method: HttpMethod,
    path: String,
    params: Map<String, Value>,
}

impl ApiRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Map::new(),
        }
    }

    /// Adds a single parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Merges a whole parameter map into the request.
    #[must_use]
    pub fn params(mut self, params: Map<String, Value>) -> Self {
        self.params.extend(params);
        self
    }

    /// Builds the [`ApiRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError`] if the request fails validation.
    pub fn build(self) -> Result<ApiRequest, InvalidRequestError> {
        let request = ApiRequest {
            method: self.method,
            path: self.path,
            params: self.params,
        };
        request.verify()?;
        Ok(request)
    }
}
