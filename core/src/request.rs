use std::borrow::Cow;

use http::header::HeaderName;
use http::HeaderMap;
use http::Method;

use crate::{Error, Result};

/// Signing view of a request.
///
/// Borrows everything from `http::request::Parts`, the request itself is never
/// modified while building the string to sign.
#[derive(Debug)]
pub struct SigningRequest<'a> {
    /// HTTP method.
    pub method: &'a Method,
    /// HTTP scheme, `http` if the uri carries none.
    pub scheme: &'a str,
    /// HTTP host without port.
    pub host: &'a str,
    /// HTTP path and query, always starting with `/`.
    pub path_and_query: Cow<'a, str>,
    /// HTTP headers.
    pub headers: &'a HeaderMap,
}

impl<'a> SigningRequest<'a> {
    /// Build a signing view from http::request::Parts.
    pub fn build(parts: &'a http::request::Parts) -> Result<Self> {
        let uri = &parts.uri;
        let host = uri
            .host()
            .ok_or_else(|| Error::request_invalid("request without host is invalid for signing"))?;

        let path_and_query = match uri.path_and_query().map(|v| v.as_str()) {
            None | Some("") => Cow::Borrowed("/"),
            Some(v) if v.starts_with('?') => Cow::Owned(format!("/{v}")),
            Some(v) => Cow::Borrowed(v),
        };

        Ok(SigningRequest {
            method: &parts.method,
            scheme: uri.scheme_str().unwrap_or("http"),
            host,
            path_and_query,
            headers: &parts.headers,
        })
    }

    /// Get all values of a header concatenated without separator.
    ///
    /// Returns `None` if header not found. Bytes outside utf-8 are replaced
    /// with `U+FFFD`.
    pub fn header_get_concat(&self, key: &HeaderName) -> Option<String> {
        let mut values = self.headers.get_all(key).iter().peekable();
        values.peek()?;

        let mut s = String::new();
        for v in values {
            s.push_str(&String::from_utf8_lossy(v.as_bytes()));
        }
        Some(s)
    }

    /// Normalize header value.
    ///
    /// Leading and trailing whitespace is trimmed and every inner run of
    /// whitespace is collapsed into a single space.
    pub fn header_value_normalize(v: &str) -> String {
        let mut s = String::with_capacity(v.len());
        for (idx, part) in v.split_whitespace().enumerate() {
            if idx != 0 {
                s.push(' ');
            }
            s.push_str(part);
        }

        s
    }
}
