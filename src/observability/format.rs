//! Value formatting for event records.
//!
//! # Responsibilities
//! - Flatten multi-valued headers into one string per name
//! - Limit body size before it reaches the log
//! - Parse raw query strings into ordered value lists

use std::collections::BTreeMap;

use axum::http::HeaderMap;

/// Bodies larger than this many bytes are not logged.
pub const BODY_LIMIT: usize = 2 * 1024;

/// Flatten headers, joining repeated values with `", "` in arrival order.
///
/// Returns `None` for an empty map so the field is omitted instead of
/// serialized as `{}`.
pub fn format_headers(headers: &HeaderMap) -> Option<BTreeMap<String, String>> {
    if headers.is_empty() {
        return None;
    }

    let flattened = headers
        .keys()
        .map(|name| {
            let joined = headers
                .get_all(name)
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(", ");
            (name.as_str().to_string(), joined)
        })
        .collect();

    Some(flattened)
}

/// Render a body as text, replacing it with a notice when it exceeds [`BODY_LIMIT`].
pub fn format_body(body: &[u8]) -> String {
    if body.is_empty() {
        return String::new();
    }
    if body.len() > BODY_LIMIT {
        return format!(
            "not logged: body size ({} bytes) is bigger than limit ({} bytes)",
            body.len(),
            BODY_LIMIT
        );
    }
    String::from_utf8_lossy(body).into_owned()
}

/// Parse a raw query string into a key → ordered values mapping.
pub fn format_query(raw: Option<&str>) -> BTreeMap<String, Vec<String>> {
    let mut query: BTreeMap<String, Vec<String>> = BTreeMap::new();
    if let Some(raw) = raw {
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            query.entry(key.into_owned()).or_default().push(value.into_owned());
        }
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_headers_joined_in_order() {
        let mut headers = HeaderMap::new();
        headers.append("x", HeaderValue::from_static("a"));
        headers.append("x", HeaderValue::from_static("b"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let flat = format_headers(&headers).unwrap();
        assert_eq!(flat.get("x").map(String::as_str), Some("a, b"));
        assert_eq!(
            flat.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(flat.len(), 2);
    }

    #[test]
    fn test_empty_headers_omitted() {
        assert!(format_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_body_at_limit_is_verbatim() {
        let body = "a".repeat(BODY_LIMIT);
        assert_eq!(format_body(body.as_bytes()), body);
        assert_eq!(format_body(b"hi"), "hi");
        assert_eq!(format_body(b""), "");
    }

    #[test]
    fn test_body_over_limit_is_replaced() {
        let body = "secret".repeat(BODY_LIMIT);
        let formatted = format_body(body.as_bytes());
        assert!(!formatted.contains("secret"));
        assert_eq!(
            formatted,
            format!(
                "not logged: body size ({} bytes) is bigger than limit (2048 bytes)",
                body.len()
            )
        );

        let one_over = vec![b'x'; BODY_LIMIT + 1];
        assert!(format_body(&one_over).starts_with("not logged"));
    }

    #[test]
    fn test_query_keeps_value_order() {
        let query = format_query(Some("b=2&a=1&b=3&empty="));
        assert_eq!(query["a"], vec!["1"]);
        assert_eq!(query["b"], vec!["2", "3"]);
        assert_eq!(query["empty"], vec![""]);
        assert!(format_query(None).is_empty());
    }
}
