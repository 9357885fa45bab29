//! Shared HTTP response helpers.
//!
//! Centralizes status-code classification (401, 403, 429 with `Retry-After`
//! parsing, other non-success → [`ApiError::Api`]) and envelope decoding so
//! endpoint modules stay focused on request construction and response mapping.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// The backend's response wrapper.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **401** → [`ApiError::Unauthorized`]
/// - **403** → [`ApiError::Forbidden`] with the server's message
/// - **429** → [`ApiError::RateLimited`] with `Retry-After` header parsing
///   (falls back to 60 s if absent or unparseable)
/// - **Other non-success** → [`ApiError::Api`] with the server's `message`
///   field, or the raw body when it is not JSON.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status == 401 {
        return Err(ApiError::Unauthorized);
    }
    if status == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(ApiError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = server_message(&body);
        if status == 403 {
            return Err(ApiError::Forbidden { message });
        }
        return Err(ApiError::Api {
            status: Some(status.as_u16()),
            message,
        });
    }
    Ok(resp)
}

/// Check the status, then decode the body as an envelope or bare value.
pub async fn read_data<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let resp = check_response(resp).await?;
    let body = resp.bytes().await?;
    decode_envelope(&body)
}

/// Send, check the status, and return the raw body.
pub async fn read_bytes(builder: reqwest::RequestBuilder) -> Result<Vec<u8>, ApiError> {
    let resp = check_response(builder.send().await?).await?;
    Ok(resp.bytes().await?.to_vec())
}

/// Decode a response body that is either `{ success, message, data }` or a
/// bare JSON value.
///
/// `success: false` that still carries `data` is accepted (logged at warn).
/// `success: false` without `data` becomes [`ApiError::Api`] with the
/// server's message.
///
/// # Errors
///
/// Returns [`ApiError::Parse`] when the body is not JSON or the payload does
/// not match `T`.
pub fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(body).map_err(|e| ApiError::Parse(e.to_string()))?
    };

    if !is_envelope(&value) {
        return from_value(value);
    }

    let envelope: Envelope<Value> =
        serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))?;
    match (envelope.success, envelope.data) {
        (Some(false), Some(data)) if !data.is_null() => {
            tracing::warn!(
                message = envelope.message.as_deref().unwrap_or_default(),
                "envelope reports success=false but carries data; using it",
            );
            from_value(data)
        }
        (Some(false), _) => Err(ApiError::Api {
            status: None,
            message: envelope.message.unwrap_or_default(),
        }),
        (_, data) => from_value(data.unwrap_or(Value::Null)),
    }
}

fn is_envelope(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.contains_key("success") || map.contains_key("data"))
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Prefer a JSON `message` (or `error`) field; otherwise the trimmed body.
fn server_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(Value::String(message)) = map.get(key) {
                return message.clone();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.starts_with('<') {
        // HTML error page from a proxy; not worth showing.
        return String::new();
    }
    trimmed.chars().take(200).collect()
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mock_response(status: u16) -> reqwest::Response {
        mock_response_with_body(status, "")
    }

    fn mock_response_with_body(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    fn mock_response_with_retry_after(status: u16, value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Retry-After", value)
                .body("")
                .unwrap(),
        )
    }

    #[test]
    fn parse_retry_after_from_header() {
        let resp = mock_response_with_retry_after(429, "120");
        assert_eq!(parse_retry_after(&resp), 120);
    }

    #[test]
    fn parse_retry_after_missing_header() {
        let resp = mock_response(429);
        assert_eq!(parse_retry_after(&resp), 60);
    }

    #[test]
    fn parse_retry_after_non_numeric() {
        let resp = mock_response_with_retry_after(429, "not-a-number");
        assert_eq!(parse_retry_after(&resp), 60);
    }

    #[tokio::test]
    async fn check_response_rate_limited_with_header() {
        let resp = mock_response_with_retry_after(429, "30");
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[tokio::test]
    async fn check_response_unauthorized() {
        let err = check_response(mock_response(401)).await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn check_response_forbidden_keeps_message() {
        let resp = mock_response_with_body(403, r#"{"success":false,"message":"Token expired"}"#);
        let err = check_response(resp).await.unwrap_err();
        match err {
            ApiError::Forbidden { message } => assert_eq!(message, "Token expired"),
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn check_response_api_error_prefers_server_message() {
        let resp = mock_response_with_body(500, r#"{"message":"Database unavailable"}"#);
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            &err,
            ApiError::Api { status: Some(500), message } if message == "Database unavailable"
        ));
        assert_eq!(err.user_message(), "Database unavailable");
    }

    #[tokio::test]
    async fn check_response_html_body_falls_back_to_default() {
        let resp = mock_response_with_body(502, "<html><body>Bad Gateway</body></html>");
        let err = check_response(resp).await.unwrap_err();
        assert_eq!(err.user_message(), "Request failed with status 502.");
    }

    #[tokio::test]
    async fn check_response_success() {
        let resp = mock_response(200);
        assert!(check_response(resp).await.is_ok());
    }

    #[tokio::test]
    async fn read_data_unwraps_envelope() {
        let resp = mock_response_with_body(200, r#"{"success":true,"data":[1,2,3]}"#);
        let data: Vec<u32> = read_data(resp).await.unwrap();
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[test]
    fn decode_bare_array() {
        let data: Vec<String> = decode_envelope(br#"["a","b"]"#).unwrap();
        assert_eq!(data, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn decode_failed_envelope_with_data() {
        let data: Vec<u32> =
            decode_envelope(br#"{"success":false,"message":"partial","data":[7]}"#).unwrap();
        assert_eq!(data, vec![7]);
    }

    #[test]
    fn decode_failed_envelope_without_data() {
        let err = decode_envelope::<Vec<u32>>(br#"{"success":false,"message":"No building"}"#)
            .unwrap_err();
        assert!(matches!(
            &err,
            ApiError::Api { status: None, message } if message == "No building"
        ));
    }

    #[test]
    fn decode_empty_body_as_unit() {
        let () = decode_envelope(b"").unwrap();
        let () = decode_envelope(br#"{"success":true}"#).unwrap();
    }

    #[test]
    fn decode_invalid_json_is_parse_error() {
        let err = decode_envelope::<Vec<u32>>(b"{nope").unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }
}
