//! Response parsing and error normalization.
//!
//! This module turns a raw HTTP response into a [`ParsedBody`] by branching
//! on the content type, and normalizes the heterogeneous error payloads the
//! Plentymarkets API returns into the [`ApiError`] taxonomy.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::clients::errors::ApiError;

/// Response headers, keyed by lowercase header name. Headers may carry
/// multiple values.
pub type Headers = HashMap<String, Vec<String>>;

/// A raw HTTP response from one physical attempt.
///
/// Produced by the transport executor and consumed by [`RawResponse::parse`]
/// within the same attempt.
#[derive(Clone, Debug)]
pub struct RawResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: Headers,
    /// The `Content-Type` header value, empty if absent.
    pub content_type: String,
    /// The response body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Parses the body according to its content type.
    ///
    /// - JSON content types are decoded and checked for embedded error
    ///   markers.
    /// - PDF content passes through untouched as [`ParsedBody::Binary`].
    /// - Anything else yields [`ParsedBody::Empty`], which the retry loop
    ///   treats as "no response".
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] if a JSON body cannot be decoded, or the
    /// normalized [`ApiError`] if the decoded payload reports an error.
    pub fn parse(self) -> Result<ParsedBody, ApiError> {
        if self.content_type.starts_with("application/json") {
            let value: Value = serde_json::from_slice(&self.body)?;
            check_for_errors(&value)?;
            Ok(ParsedBody::Json(value))
        } else if self.content_type.starts_with("application/pdf") {
            Ok(ParsedBody::Binary(self.body))
        } else {
            Ok(ParsedBody::Empty)
        }
    }
}

/// A parsed response body.
///
/// Downstream code must match on the tag before use; there is no implicit
/// coercion between the variants.
#[derive(Clone, Debug, PartialEq)]
pub enum ParsedBody {
    /// A decoded JSON value (object, array, or scalar).
    Json(Value),
    /// A binary payload, e.g. a generated PDF document.
    Binary(Vec<u8>),
    /// No usable payload; the response had an unrecognized content type.
    Empty,
}

impl ParsedBody {
    /// Returns `true` if this body carries no usable payload.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the decoded JSON value, if this is a JSON body.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Consumes the body and returns the decoded JSON value, if any.
    #[must_use]
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// The paginated-list envelope returned by GET endpoints.
///
/// Missing fields fall back to defaults (`entries: []`,
/// `isLastPage: false`), so a server that omits the last-page flag keeps
/// the pagination walker looping until the configured page ceiling.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct PageEnvelope {
    /// The entries of this page.
    #[serde(default)]
    pub entries: Vec<Value>,
    /// Whether this is the last page of the result set.
    #[serde(default, rename = "isLastPage")]
    pub is_last_page: bool,
    /// The 1-based page number as reported by the server.
    #[serde(default)]
    pub page: i64,
}

impl PageEnvelope {
    /// Reads the envelope out of a decoded JSON value.
    ///
    /// Payloads that do not match the envelope shape at all produce the
    /// default envelope rather than an error.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

/// Short-period rate limit information parsed from the
/// `X-Plenty-Global-Short-Period-*` response headers.
///
/// The client does not act on these values itself; they are provided to
/// [`ThrottlePolicy`](crate::clients::ThrottlePolicy) implementations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShortPeriodLimit {
    /// Calls left in the current short period.
    pub calls_left: u32,
    /// Seconds until the short period resets.
    pub seconds_left: u32,
}

impl ShortPeriodLimit {
    /// Parses the short-period limit headers, if both are present.
    #[must_use]
    pub fn from_headers(headers: &Headers) -> Option<Self> {
        let first = |name: &str| {
            headers
                .get(name)
                .and_then(|values| values.first())
                .and_then(|value| value.parse().ok())
        };
        Some(Self {
            calls_left: first("x-plenty-global-short-period-calls-left")?,
            seconds_left: first("x-plenty-global-short-period-decay")?,
        })
    }
}

/// Decides whether a decoded JSON value represents an API error.
///
/// A single-element array is tolerated as success even if its element
/// carries an `error` key; an array with more than one element is inspected
/// through its first element.
pub(crate) fn check_for_errors(value: &Value) -> Result<(), ApiError> {
    if is_blank(value) {
        return Ok(());
    }

    let candidate = match value {
        Value::Array(items) if items.len() == 1 => return Ok(()),
        Value::Array(items) => &items[0],
        other => other,
    };

    let Some(error) = candidate.get("error") else {
        return Ok(());
    };

    // Checked before anything else: this is the only kind that signals
    // "re-authenticate" upstream.
    if error.as_str() == Some("invalid_credentials") {
        return Err(ApiError::InvalidCredentials);
    }

    if let Some(message) = flatten_validation_errors(candidate.get("validation_errors")) {
        return Err(ApiError::Validation {
            message,
            payload: candidate.clone(),
        });
    }

    let message = candidate
        .pointer("/error/message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Err(ApiError::Api {
        message,
        payload: candidate.clone(),
    })
}

/// Flattens a `validation_errors` value into one comma-joined message.
///
/// Handles both the map-of-arrays shape (`{"field": ["msg"]}`) and the
/// array-of-maps shape (`[{"field": ["msg"]}]`). Returns `None` when the
/// value is absent or contains no messages.
fn flatten_validation_errors(value: Option<&Value>) -> Option<String> {
    let mut messages = Vec::new();
    collect_messages(value?, &mut messages);
    if messages.is_empty() {
        return None;
    }
    Some(messages.join(", "))
}

fn collect_messages(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(message) => out.push(message.clone()),
        Value::Array(items) => {
            for item in items {
                collect_messages(item, out);
            }
        }
        Value::Object(map) => {
            for nested in map.values() {
                collect_messages(nested, out);
            }
        }
        Value::Number(number) => out.push(number.to_string()),
        Value::Bool(_) | Value::Null => {}
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(content_type: &str, body: &[u8]) -> RawResponse {
        RawResponse {
            status: 200,
            headers: Headers::new(),
            content_type: content_type.to_string(),
            body: body.to_vec(),
        }
    }

    #[test]
    fn test_json_content_type_is_decoded() {
        let body = raw("application/json", br#"{"id": 1}"#).parse().unwrap();
        assert_eq!(body, ParsedBody::Json(json!({"id": 1})));
    }

    #[test]
    fn test_json_content_type_with_charset_is_decoded() {
        let body = raw("application/json;charset=utf-8", br#"[1, 2]"#)
            .parse()
            .unwrap();
        assert_eq!(body, ParsedBody::Json(json!([1, 2])));
    }

    #[test]
    fn test_undecodable_json_is_a_parse_error() {
        let result = raw("application/json", b"not json").parse();
        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[test]
    fn test_pdf_passes_through_untouched() {
        let bytes = b"%PDF-1.4 fake document";
        let body = raw("application/pdf", bytes).parse().unwrap();
        assert_eq!(body, ParsedBody::Binary(bytes.to_vec()));
    }

    #[test]
    fn test_unknown_content_type_yields_empty() {
        let body = raw("text/html", b"<html></html>").parse().unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn test_blank_values_are_not_errors() {
        assert!(check_for_errors(&Value::Null).is_ok());
        assert!(check_for_errors(&json!({})).is_ok());
        assert!(check_for_errors(&json!([])).is_ok());
        assert!(check_for_errors(&json!("")).is_ok());
    }

    #[test]
    fn test_single_element_array_is_tolerated_as_success() {
        let value = json!([{"error": "something"}]);
        assert!(check_for_errors(&value).is_ok());
    }

    #[test]
    fn test_longer_array_is_inspected_through_first_element() {
        let value = json!([
            {"error": {"message": "boom"}},
            {"id": 2}
        ]);
        let result = check_for_errors(&value);
        assert!(matches!(
            result,
            Err(ApiError::Api { message, .. }) if message == "boom"
        ));
    }

    #[test]
    fn test_value_without_error_key_is_success() {
        assert!(check_for_errors(&json!({"id": 5, "name": "item"})).is_ok());
    }

    #[test]
    fn test_invalid_credentials_wins_over_validation_errors() {
        let value = json!({
            "error": "invalid_credentials",
            "validation_errors": {"field": ["required"]}
        });
        assert!(matches!(
            check_for_errors(&value),
            Err(ApiError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_validation_errors_win_over_error_message() {
        let value = json!({
            "error": {"message": "x"},
            "validation_errors": {"field": ["required"]}
        });
        let result = check_for_errors(&value);
        assert!(matches!(
            result,
            Err(ApiError::Validation { message, .. }) if message == "required"
        ));
    }

    #[test]
    fn test_validation_errors_map_of_arrays_is_joined() {
        let value = json!({
            "error": {"message": "unused"},
            "validation_errors": {
                "name": ["name is required"],
                "price": ["price must be positive", "price missing"]
            }
        });
        match check_for_errors(&value) {
            Err(ApiError::Validation { message, .. }) => {
                assert!(message.contains("name is required"));
                assert!(message.contains("price must be positive"));
                assert!(message.contains("price missing"));
                assert_eq!(message.matches(", ").count(), 2);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_errors_array_of_maps_is_joined() {
        let value = json!({
            "error": {"message": "unused"},
            "validation_errors": [
                {"name": ["name is required"]},
                {"price": ["price must be positive"]}
            ]
        });
        match check_for_errors(&value) {
            Err(ApiError::Validation { message, .. }) => {
                assert_eq!(message, "name is required, price must be positive");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_validation_errors_fall_back_to_error_message() {
        let value = json!({
            "error": {"message": "fallback"},
            "validation_errors": {}
        });
        assert!(matches!(
            check_for_errors(&value),
            Err(ApiError::Api { message, .. }) if message == "fallback"
        ));
    }

    #[test]
    fn test_error_without_message_yields_empty_message() {
        let value = json!({"error": {"code": 500}});
        assert!(matches!(
            check_for_errors(&value),
            Err(ApiError::Api { message, .. }) if message.is_empty()
        ));
    }

    #[test]
    fn test_page_envelope_from_full_payload() {
        let envelope = PageEnvelope::from_value(&json!({
            "entries": [{"id": 1}, {"id": 2}],
            "isLastPage": true,
            "page": 3
        }));
        assert_eq!(envelope.entries.len(), 2);
        assert!(envelope.is_last_page);
        assert_eq!(envelope.page, 3);
    }

    #[test]
    fn test_page_envelope_tolerates_missing_fields() {
        let envelope = PageEnvelope::from_value(&json!({"entries": []}));
        assert!(envelope.entries.is_empty());
        assert!(!envelope.is_last_page);

        // A non-envelope payload degrades to the default.
        let envelope = PageEnvelope::from_value(&json!([1, 2, 3]));
        assert_eq!(envelope, PageEnvelope::default());
    }

    #[test]
    fn test_short_period_limit_parsing() {
        let mut headers = Headers::new();
        headers.insert(
            "x-plenty-global-short-period-calls-left".to_string(),
            vec!["8".to_string()],
        );
        headers.insert(
            "x-plenty-global-short-period-decay".to_string(),
            vec!["2".to_string()],
        );

        let limit = ShortPeriodLimit::from_headers(&headers).unwrap();
        assert_eq!(limit.calls_left, 8);
        assert_eq!(limit.seconds_left, 2);
    }

    #[test]
    fn test_short_period_limit_requires_both_headers() {
        let mut headers = Headers::new();
        headers.insert(
            "x-plenty-global-short-period-calls-left".to_string(),
            vec!["8".to_string()],
        );
        assert!(ShortPeriodLimit::from_headers(&headers).is_none());
        assert!(ShortPeriodLimit::from_headers(&Headers::new()).is_none());
    }
}
