//! Forwarding to the backend and verbatim relay of its response.

use axum::body::Body;
use axum::http::{HeaderMap, Response, StatusCode, header};
use axum::response::IntoResponse;
use serde_json::Value;
use thiserror::Error;

/// Transport headers the relay's own HTTP stack must own on each leg.
/// Bodies are re-serialized, so content-length is recomputed as well.
const SKIP_HEADERS: &[&str] = &[
    "host",
    "connection",
    "keep-alive",
    "transfer-encoding",
    "proxy-connection",
    "te",
    "upgrade",
    "content-length",
];

/// Failures on the backend leg of the relay.
///
/// None of these are retried or translated into a domain error body; each
/// surfaces to the caller as the relay's uniform 502 error response.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The backend call itself failed (unreachable, timeout, protocol error).
    #[error("Backend request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The request body could not be re-serialized as JSON text.
    #[error("Failed to serialize request body: {0}")]
    RequestBody(serde_json::Error),

    /// The backend declared application/json but the body would not parse.
    #[error("Backend declared JSON but returned an unparseable body: {0}")]
    BackendBody(serde_json::Error),

    /// The relayed response could not be assembled.
    #[error("Failed to build relayed response: {0}")]
    Response(#[from] axum::http::Error),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("relay failure: {self}");
        let body = serde_json::json!({
            "error": {
                "type": "relay_failure",
                "message": self.to_string(),
            }
        });
        (
            StatusCode::BAD_GATEWAY,
            [(header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

/// POST the request to the backend at `<backend base URL> + <path>`,
/// carrying the mutated headers and the body re-serialized as JSON text.
pub async fn forward(
    client: &reqwest::Client,
    backend_url: &str,
    path: &str,
    headers: HeaderMap,
    body: &Value,
) -> Result<reqwest::Response, RelayError> {
    let mut outbound = HeaderMap::new();
    for (name, value) in &headers {
        if !SKIP_HEADERS.contains(&name.as_str()) {
            outbound.append(name.clone(), value.clone());
        }
    }

    let url = format!("{}{}", backend_url.trim_end_matches('/'), path);
    let body_text = serde_json::to_string(body).map_err(RelayError::RequestBody)?;

    let response = client
        .post(url)
        .headers(outbound)
        .body(body_text)
        .send()
        .await?;

    Ok(response)
}

/// Relay the backend response: status and headers verbatim, body decoded as
/// structured JSON when the backend declares exactly `application/json`,
/// raw text otherwise. The full body is buffered before relay.
pub async fn relay_response(response: reqwest::Response) -> Result<Response<Body>, RelayError> {
    let status = response.status();
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        == Some("application/json");

    let mut builder = Response::builder().status(status);
    for (name, value) in response.headers() {
        if !SKIP_HEADERS.contains(&name.as_str()) {
            builder = builder.header(name, value);
        }
    }

    let bytes = response.bytes().await?;
    let body = if is_json {
        let parsed: Value = serde_json::from_slice(&bytes).map_err(RelayError::BackendBody)?;
        Body::from(serde_json::to_vec(&parsed).map_err(RelayError::BackendBody)?)
    } else {
        Body::from(bytes)
    };

    Ok(builder.body(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_list_covers_transport_headers() {
        assert!(SKIP_HEADERS.contains(&"host"));
        assert!(SKIP_HEADERS.contains(&"connection"));
        assert!(SKIP_HEADERS.contains(&"transfer-encoding"));
        assert!(SKIP_HEADERS.contains(&"content-length"));
        // The prefer header must never be skipped; the backend may echo it.
        assert!(!SKIP_HEADERS.contains(&"prefer"));
    }

    #[test]
    fn relay_error_surfaces_as_bad_gateway() {
        let err = RelayError::BackendBody(serde_json::from_str::<Value>("{").unwrap_err());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
