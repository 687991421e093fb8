//! The Plentymarkets API client.
//!
//! This module provides [`PlentyClient`], which orchestrates every logical
//! request: it refreshes the bearer token when needed, retries attempts that
//! produced no usable response, parses and error-checks the payload, and
//! walks paginated result sets.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::clients::errors::ApiError;
use crate::clients::http_request::{ApiRequest, HttpMethod};
use crate::clients::http_response::{Headers, PageEnvelope, ParsedBody, RawResponse};
use crate::config::{ApiConfig, TokenStore};

/// Number of attempts one logical request is given before it fails with
/// [`ApiError::AttemptsExhausted`].
pub const ATTEMPT_COUNT: u32 = 3;

/// Path prefix shared by every REST endpoint.
pub const REST_PREFIX: &str = "/rest";

/// The versioned media type every request accepts.
pub const ACCEPT_HEADER: &str = "application/x.plentymarkets.v1+json";

const LOGIN_PATH: &str = "/login";

/// Pluggable pre-attempt throttle check.
///
/// Called before every attempt with the headers of the previous attempt's
/// response (`None` on the first attempt of a call). Returning a duration
/// makes the client sleep that long before issuing the attempt. No policy
/// is installed by default.
///
/// [`ShortPeriodLimit`](crate::clients::ShortPeriodLimit) parses the
/// rate-limit headers a policy would typically consult.
pub trait ThrottlePolicy: Send + Sync {
    /// Returns how long to wait before the next attempt, if at all.
    fn delay_before_attempt(&self, previous: Option<&Headers>) -> Option<Duration>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expires_in: i64,
}

/// Async client for the Plentymarkets REST API.
///
/// The client owns the credential configuration and the bearer token state.
/// Before any logical request it checks token validity and performs the
/// `/login` exchange when needed; the check-login-write sequence is one
/// critical section, so concurrent callers never double-issue logins.
///
/// # Thread Safety
///
/// `PlentyClient` is `Send + Sync`; share it across tasks behind an `Arc`.
///
/// # Example
///
/// ```rust,ignore
/// use plenty_api::{ApiConfig, ApiUser, ApiPassword, SiteUrl, PlentyClient};
/// use serde_json::Map;
///
/// let config = ApiConfig::builder()
///     .api_user(ApiUser::new("my-api-user")?)
///     .api_password(ApiPassword::new("my-password")?)
///     .site_url(SiteUrl::new("https://shop.example.com")?)
///     .build()?;
///
/// let client = PlentyClient::new(config);
///
/// // Eager single request
/// let items = client.get("/items", Map::new()).await?;
///
/// // Per-page consumer
/// client
///     .get_paginated("/orders", Map::new(), |entries| {
///         println!("got {} orders", entries.len());
///     })
///     .await?;
/// ```
pub struct PlentyClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    config: ApiConfig,
    tokens: Mutex<TokenStore>,
    throttle: Option<Arc<dyn ThrottlePolicy>>,
}

// Verify PlentyClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PlentyClient>();
};

impl std::fmt::Debug for PlentyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlentyClient")
            .field("config", &self.config)
            .field("throttle", &self.throttle.as_ref().map(|_| "<policy>"))
            .finish_non_exhaustive()
    }
}

impl PlentyClient {
    /// Creates a new client for the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config,
            tokens: Mutex::new(TokenStore::default()),
            throttle: None,
        }
    }

    /// Installs a throttle policy consulted before every attempt.
    #[must_use]
    pub fn with_throttle_policy(mut self, policy: Arc<dyn ThrottlePolicy>) -> Self {
        self.throttle = Some(policy);
        self
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Returns `true` while a non-expired access token is stored.
    pub async fn tokens_valid(&self) -> bool {
        self.tokens.lock().await.tokens_valid()
    }

    /// Seeds the token store, e.g. with tokens restored from elsewhere.
    /// A seeded valid token suppresses the login exchange.
    pub async fn set_tokens(
        &self,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_at: chrono::DateTime<Utc>,
    ) {
        self.tokens
            .lock()
            .await
            .set(access_token, refresh_token, expires_at);
    }

    /// Drops all stored tokens; the next request logs in again.
    pub async fn clear_tokens(&self) {
        self.tokens.lock().await.clear();
    }

    /// Issues one logical request through the full pipeline: authentication
    /// gate, retry loop, transport, parse, and error normalization.
    ///
    /// GET and DELETE send `params` as a query string; POST, PUT, and PATCH
    /// serialize them as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] without any network call if the
    /// path is empty, any normalized server error as soon as it is raised,
    /// or [`ApiError::AttemptsExhausted`] after [`ATTEMPT_COUNT`] attempts
    /// without a usable response.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        params: Map<String, Value>,
    ) -> Result<ParsedBody, ApiError> {
        let request = ApiRequest::builder(method, path).params(params).build()?;
        self.send(&request).await
    }

    /// Issues a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn post(&self, path: &str, body: Map<String, Value>) -> Result<ParsedBody, ApiError> {
        self.request(HttpMethod::Post, path, body).await
    }

    /// Issues a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn put(&self, path: &str, body: Map<String, Value>) -> Result<ParsedBody, ApiError> {
        self.request(HttpMethod::Put, path, body).await
    }

    /// Issues a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn patch(&self, path: &str, body: Map<String, Value>) -> Result<ParsedBody, ApiError> {
        self.request(HttpMethod::Patch, path, body).await
    }

    /// Issues a DELETE request with query parameters.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn delete(
        &self,
        path: &str,
        params: Map<String, Value>,
    ) -> Result<ParsedBody, ApiError> {
        self.request(HttpMethod::Delete, path, params).await
    }

    /// Issues a single GET request with `page = 1` merged into the
    /// parameters and returns whatever the pipeline produced, flattening a
    /// JSON array one level.
    ///
    /// This deliberately fetches only the first page; use
    /// [`get_paginated`](Self::get_paginated) to walk the whole result set.
    /// A caller-supplied `page` parameter overrides the default.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn get(&self, path: &str, params: Map<String, Value>) -> Result<ParsedBody, ApiError> {
        let mut merged = Map::new();
        merged.insert("page".to_string(), Value::from(1));
        merged.extend(params);

        let body = self.request(HttpMethod::Get, path, merged).await?;
        Ok(match body {
            ParsedBody::Json(Value::Array(items)) => {
                ParsedBody::Json(Value::Array(flatten_one_level(items)))
            }
            other => other,
        })
    }

    /// Walks a paginated GET result set, feeding each page's entries to the
    /// consumer until the server signals the last page.
    ///
    /// The `page` parameter starts at 1 and increments by one per fetch,
    /// overriding any caller-supplied `page`. A server that never sets
    /// `isLastPage` is cut off at the configured
    /// [`max_pages`](crate::ApiConfig::max_pages) ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PageLimitExceeded`] when the ceiling is reached;
    /// otherwise see [`request`](Self::request).
    pub async fn get_paginated<F>(
        &self,
        path: &str,
        params: Map<String, Value>,
        mut consumer: F,
    ) -> Result<(), ApiError>
    where
        F: FnMut(Vec<Value>),
    {
        let mut page: u32 = 1;
        loop {
            if page > self.config.max_pages() {
                return Err(ApiError::PageLimitExceeded {
                    limit: self.config.max_pages(),
                });
            }

            let mut merged = params.clone();
            merged.insert("page".to_string(), Value::from(page));

            let body = self.request(HttpMethod::Get, path, merged).await?;
            let envelope = body.as_json().map(PageEnvelope::from_value).unwrap_or_default();

            if self.config.log() {
                tracing::debug!(
                    page,
                    entries = envelope.entries.len(),
                    last = envelope.is_last_page,
                    path,
                    "fetched page"
                );
            }

            let is_last_page = envelope.is_last_page;
            consumer(envelope.entries);
            if is_last_page {
                return Ok(());
            }
            page += 1;
        }
    }

    /// Runs the retry loop around one logical request.
    async fn send(&self, request: &ApiRequest) -> Result<ParsedBody, ApiError> {
        self.login_check().await?;

        let url = self.base_url(&request.path);
        let mut previous_headers: Option<Headers> = None;

        for attempt in 1..=ATTEMPT_COUNT {
            if let Some(policy) = &self.throttle {
                if let Some(delay) = policy.delay_before_attempt(previous_headers.as_ref()) {
                    tokio::time::sleep(delay).await;
                }
            }

            let token = self.tokens.lock().await.access_token().map(String::from);
            match self
                .perform(request.method, &url, &request.params, token.as_deref())
                .await
            {
                Ok((body, headers)) => {
                    if !body.is_empty() {
                        return Ok(body);
                    }
                    // Unrecognized content type counts as "no response".
                    previous_headers = Some(headers);
                }
                Err(ApiError::Network(error)) => {
                    tracing::debug!(attempt, %error, path = %request.path, "attempt failed");
                    previous_headers = None;
                }
                Err(raised) => return Err(raised),
            }
        }

        Err(ApiError::AttemptsExhausted {
            attempts: ATTEMPT_COUNT,
        })
    }

    /// The authentication gate: refreshes tokens under one lock so
    /// concurrent callers cannot race on the read-login-write sequence.
    async fn login_check(&self) -> Result<(), ApiError> {
        let mut tokens = self.tokens.lock().await;
        if tokens.tokens_valid() {
            return Ok(());
        }

        // Login itself is a single attempt, never retried.
        let login = self.login().await?;
        tokens.set(
            login.access_token,
            login.refresh_token,
            Utc::now() + chrono::Duration::seconds(login.expires_in),
        );
        Ok(())
    }

    async fn login(&self) -> Result<LoginResponse, ApiError> {
        if self.config.log() {
            tracing::debug!(
                username = self.config.api_user().as_ref(),
                "performing login exchange (password redacted)"
            );
        }

        let mut params = Map::new();
        params.insert(
            "username".to_string(),
            Value::String(self.config.api_user().as_ref().to_string()),
        );
        params.insert(
            "password".to_string(),
            Value::String(self.config.api_password().as_ref().to_string()),
        );

        let url = self.base_url(LOGIN_PATH);
        let (body, _headers) = self
            .perform(HttpMethod::Post, &url, &params, None)
            .await?;

        let Some(value) = body.into_json() else {
            return Err(ApiError::Api {
                message: "login exchange returned no usable response".to_string(),
                payload: Value::Null,
            });
        };
        Ok(serde_json::from_value(value)?)
    }

    /// Executes exactly one physical HTTP call and parses the response.
    async fn perform(
        &self,
        method: HttpMethod,
        url: &str,
        params: &Map<String, Value>,
        token: Option<&str>,
    ) -> Result<(ParsedBody, Headers), ApiError> {
        let mut builder = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Patch => self.client.patch(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        builder = builder
            .header("Content-Type", "application/json")
            .header("Accept", ACCEPT_HEADER);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }

        if method.sends_body() {
            builder = builder.json(&Value::Object(params.clone()));
        } else if !params.is_empty() {
            builder = builder.query(&query_pairs(params));
        }

        if self.config.log() {
            tracing::debug!(%method, url, "issuing request");
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = parse_response_headers(response.headers());
        let content_type = headers
            .get("content-type")
            .and_then(|values| values.first())
            .cloned()
            .unwrap_or_default();
        let body = response.bytes().await?.to_vec();

        if self.config.log() {
            tracing::debug!(status, %content_type, url, "received response");
        }

        let raw = RawResponse {
            status,
            headers: headers.clone(),
            content_type,
            body,
        };
        Ok((raw.parse()?, headers))
    }

    /// Builds an absolute URL from the site origin, the `/rest` prefix, and
    /// the request path.
    fn base_url(&self, path: &str) -> String {
        let origin = self.config.site_url().origin();
        if path.starts_with('/') {
            format!("{origin}{REST_PREFIX}{path}")
        } else {
            format!("{origin}{REST_PREFIX}/{path}")
        }
    }
}

/// Converts a parameter map into query string pairs. String values are used
/// as-is; everything else is serialized compactly.
fn query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}

fn flatten_one_level(items: Vec<Value>) -> Vec<Value> {
    items
        .into_iter()
        .flat_map(|item| match item {
            Value::Array(inner) => inner,
            other => vec![other],
        })
        .collect()
}

/// Parses response headers into lowercase-keyed multi-value form.
fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> Headers {
    let mut result = Headers::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}
