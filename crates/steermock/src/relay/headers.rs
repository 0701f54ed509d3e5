//! Header translation between the inbound request and the outbound call.

use axum::http::HeaderMap;

/// Copy every inbound header with a non-empty value into a fresh outbound
/// set. Names and values pass through unchanged; empty values are skipped.
pub fn translate_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut outbound = HeaderMap::new();
    for (name, value) in inbound {
        if !value.is_empty() {
            outbound.append(name.clone(), value.clone());
        }
    }
    outbound
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn copies_non_empty_headers_verbatim() {
        let mut inbound = HeaderMap::new();
        inbound.insert("content-type", HeaderValue::from_static("application/json"));
        inbound.insert("x-request-id", HeaderValue::from_static("abc-123"));

        let outbound = translate_headers(&inbound);

        assert_eq!(outbound.len(), 2);
        assert_eq!(outbound.get("content-type").unwrap(), "application/json");
        assert_eq!(outbound.get("x-request-id").unwrap(), "abc-123");
    }

    #[test]
    fn skips_empty_values() {
        let mut inbound = HeaderMap::new();
        inbound.insert("x-empty", HeaderValue::from_static(""));
        inbound.insert("x-present", HeaderValue::from_static("v"));

        let outbound = translate_headers(&inbound);

        assert_eq!(outbound.len(), 1);
        assert!(outbound.get("x-empty").is_none());
        assert_eq!(outbound.get("x-present").unwrap(), "v");
    }

    #[test]
    fn preserves_repeated_headers() {
        let mut inbound = HeaderMap::new();
        inbound.append("accept", HeaderValue::from_static("application/json"));
        inbound.append("accept", HeaderValue::from_static("text/plain"));

        let outbound = translate_headers(&inbound);

        let values: Vec<_> = outbound.get_all("accept").iter().collect();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn empty_input_produces_empty_output() {
        assert!(translate_headers(&HeaderMap::new()).is_empty());
    }
}
