//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::routing::MAX_LISTING_FORM_BYTES;

/// The largest body the middleware buffers. Listing forms are the largest
/// requests, and item images the largest responses.
const MAX_BODY_BYTES: usize = MAX_LISTING_FORM_BYTES;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and logged in full at the `debug` level.
/// Passwords in form bodies are redacted, and binary bodies such as image
/// uploads and downloads are only logged by size.
///
/// Request bodies larger than the listing form limit are rejected with
/// `413 Payload Too Large` before they reach the router.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!("Could not read request body: {error}");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    let body_text = display_body(&parts.headers, &body_bytes);
    let body_text = if is_form(&parts.headers) {
        let redacted = redact_password(&body_text, "password");
        redact_password(&redacted, "confirm_password")
    } else {
        body_text
    };
    log_request(&parts, &body_text);

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_response(&parts, &display_body(&parts.headers, &body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

fn content_type(headers: &HeaderMap) -> &str {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn is_form(headers: &HeaderMap) -> bool {
    content_type(headers).starts_with("application/x-www-form-urlencoded")
}

fn is_binary(headers: &HeaderMap) -> bool {
    let content_type = content_type(headers);

    content_type.starts_with("multipart/form-data")
        || content_type.starts_with("image/")
        || content_type.starts_with("application/octet-stream")
}

fn display_body(headers: &HeaderMap, body: &Bytes) -> String {
    if is_binary(headers) {
        format!("<{} bytes of {}>", body.len(), content_type(headers))
    } else {
        String::from_utf8_lossy(body).to_string()
    }
}

fn redact_password(form_text: &str, field_name: &str) -> String {
    let key = format!("{field_name}=");
    let start = form_text
        .match_indices(&key)
        .map(|(index, _)| index)
        .find(|&index| index == 0 || form_text[..index].ends_with('&'));

    let start = match start {
        Some(password_pos) => password_pos,
        None => return form_text.to_string(),
    };

    let end = form_text[start..]
        .find('&')
        .map(|end| start + end)
        .unwrap_or(form_text.len());

    format!(
        "{}{}********{}",
        &form_text[..start],
        key,
        &form_text[end..]
    )
}

const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The longest prefix of `body` that is at most [LOG_BODY_LENGTH_LIMIT] bytes
/// and ends on a char boundary.
fn truncated(body: &str) -> &str {
    let mut end = LOG_BODY_LENGTH_LIMIT.min(body.len());

    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

fn log_request(headers: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {headers:#?}\nbody: {:}...",
            truncated(body)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {headers:#?}\nbody: {body:?}");
    }
}

fn log_response(headers: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {headers:#?}\nbody: {:}...",
            truncated(body)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {headers:#?}\nbody: {body:?}");
    }
}

#[cfg(test)]
mod logging_tests {
    use axum::{
        Router,
        body::Bytes,
        extract::DefaultBodyLimit,
        http::{HeaderMap, HeaderValue, StatusCode, header::CONTENT_TYPE},
        middleware,
        routing::post,
    };
    use axum_test::TestServer;

    use super::{MAX_BODY_BYTES, display_body, logging_middleware, redact_password, truncated};

    #[test]
    fn redacts_password_field() {
        let form = "user_id=1&password=hunter2&redirect_url=%2Fitems";

        assert_eq!(
            redact_password(form, "password"),
            "user_id=1&password=********&redirect_url=%2Fitems"
        );
    }

    #[test]
    fn redacts_only_exact_field() {
        let form = "confirm_password=hunter2&password=hunter2";

        let redacted = redact_password(form, "password");
        let redacted = redact_password(&redacted, "confirm_password");

        assert_eq!(redacted, "confirm_password=********&password=********");
    }

    #[test]
    fn binary_bodies_are_summarised() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("image/png"));

        let text = display_body(&headers, &Bytes::from_static(&[0, 1, 2, 3]));

        assert_eq!(text, "<4 bytes of image/png>");
    }

    #[test]
    fn truncates_on_char_boundary() {
        let text = "あ".repeat(30);

        let got = truncated(&text);

        assert!(got.len() <= 64);
        assert!(text.starts_with(got));
    }

    #[tokio::test]
    async fn passes_body_through() {
        let app = Router::new()
            .route("/echo", post(|body: String| async move { body }))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server.post("/echo").text("hello").await;

        response.assert_status_ok();
        response.assert_text("hello");
    }

    #[tokio::test]
    async fn oversized_request_body_is_rejected() {
        let app = Router::new()
            .route("/api/log_in", post(|| async { "logged in" }))
            .layer(DefaultBodyLimit::max(1024))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server
            .post("/api/log_in")
            .bytes(Bytes::from(vec![b'a'; MAX_BODY_BYTES + 1]))
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn request_body_at_limit_passes_through() {
        let app = Router::new()
            .route("/echo", post(|body: Bytes| async move { body.len().to_string() }))
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server
            .post("/echo")
            .bytes(Bytes::from(vec![b'a'; MAX_BODY_BYTES]))
            .await;

        response.assert_status_ok();
        response.assert_text(MAX_BODY_BYTES.to_string());
    }
}
