//! Tests for the public request/response types.
//!
//! These tests cover request building, response body tags, the pagination
//! envelope, and type exports, without touching the network.

use serde_json::{json, Map};

use plenty_api::{
    ApiRequest, HttpMethod, InvalidRequestError, PageEnvelope, ParsedBody, ShortPeriodLimit,
    ATTEMPT_COUNT, REST_PREFIX,
};

#[test]
fn test_attempt_ceiling_and_prefix_constants() {
    assert_eq!(ATTEMPT_COUNT, 3);
    assert_eq!(REST_PREFIX, "/rest");
}

#[test]
fn test_request_builder_produces_immutable_request() {
    let request = ApiRequest::builder(HttpMethod::Get, "/items/5/variations")
        .param("with", "stock")
        .param("page", 2)
        .build()
        .unwrap();

    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.path, "/items/5/variations");
    assert_eq!(request.params.get("with"), Some(&json!("stock")));
    assert_eq!(request.params.get("page"), Some(&json!(2)));
}

#[test]
fn test_request_builder_rejects_empty_path() {
    let result = ApiRequest::builder(HttpMethod::Delete, "").build();
    assert!(matches!(result, Err(InvalidRequestError::EmptyPath)));
}

#[test]
fn test_request_params_merge() {
    let mut extra = Map::new();
    extra.insert("itemsPerPage".to_string(), json!(50));

    let request = ApiRequest::builder(HttpMethod::Get, "/orders")
        .params(extra)
        .build()
        .unwrap();

    assert_eq!(request.params.get("itemsPerPage"), Some(&json!(50)));
}

#[test]
fn test_parsed_body_tags() {
    assert!(ParsedBody::Empty.is_empty());
    assert!(!ParsedBody::Json(json!(null)).is_empty());
    assert!(!ParsedBody::Binary(vec![1, 2, 3]).is_empty());

    assert_eq!(
        ParsedBody::Json(json!({"id": 1})).as_json(),
        Some(&json!({"id": 1}))
    );
    assert!(ParsedBody::Binary(vec![]).as_json().is_none());
    assert_eq!(ParsedBody::Json(json!(7)).into_json(), Some(json!(7)));
    assert!(ParsedBody::Empty.into_json().is_none());
}

#[test]
fn test_page_envelope_deserializes_wire_names() {
    let envelope = PageEnvelope::from_value(&json!({
        "entries": [{"id": 1}],
        "isLastPage": true,
        "page": 1
    }));

    assert_eq!(envelope.entries, vec![json!({"id": 1})]);
    assert!(envelope.is_last_page);
    assert_eq!(envelope.page, 1);
}

#[test]
fn test_short_period_limit_from_headers() {
    let mut headers = plenty_api::Headers::new();
    headers.insert(
        "x-plenty-global-short-period-calls-left".to_string(),
        vec!["3".to_string()],
    );
    headers.insert(
        "x-plenty-global-short-period-decay".to_string(),
        vec!["7".to_string()],
    );

    let limit = ShortPeriodLimit::from_headers(&headers).unwrap();
    assert_eq!(limit.calls_left, 3);
    assert_eq!(limit.seconds_left, 7);
}

#[test]
fn test_types_exported_at_crate_root() {
    // Verify types are accessible from the crate root
    let _: fn(plenty_api::PlentyClient) = |_| {};
    let _: fn(plenty_api::ApiError) = |_| {};
    let _: fn(plenty_api::ApiConfig) = |_| {};
}

#[test]
fn test_types_exported_from_clients_module() {
    let _: fn(plenty_api::clients::PlentyClient) = |_| {};
    let _: fn(plenty_api::clients::ApiError) = |_| {};
}
