use std::fmt::Write;

use edgesign_core::{Body, Error, Result, SigningRequest};
use http::header::HeaderName;
use log::debug;

use crate::body_hash::hash_body;

/// A header included in the signature.
///
/// Keeps the configured spelling for the canonical string next to the parsed name
/// used for lookup.
#[derive(Debug, Clone)]
pub struct SignedHeader {
    name: String,
    key: HeaderName,
}

impl SignedHeader {
    /// Parse a configured header name.
    pub fn parse(name: &str) -> Result<Self> {
        let key = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            Error::config_invalid(format!("include header {name:?} is not a valid header name"))
                .with_source(e)
        })?;

        Ok(Self {
            name: name.to_string(),
            key,
        })
    }
}

/// Construct the canonical request.
///
/// ## Format
///
/// ```text
/// METHOD + "\t" +
/// scheme + "\t" +
/// host + "\t" +
/// path and query + "\t" +
/// canonicalized headers + "\t" +
/// body hash + "\t"
/// ```
///
/// Headers are checked before the body is touched, a missing header never costs
/// a body read.
pub fn canonical_request(
    req: &SigningRequest,
    headers: &[SignedHeader],
    body: &mut Body,
    max_body_hash_size: Option<u64>,
) -> Result<String> {
    let headers = canonicalize_headers(req, headers)?;
    let body_hash = hash_body(req.method, body, max_body_hash_size)?;

    let mut s = String::new();
    write!(
        &mut s,
        "{}\t{}\t{}\t{}\t{}\t{}\t",
        req.method.as_str().to_ascii_uppercase(),
        req.scheme.to_ascii_lowercase(),
        req.host.to_ascii_lowercase(),
        req.path_and_query,
        headers,
        body_hash,
    )?;

    debug!("canonical request: {s:?}");
    Ok(s)
}

/// Canonicalize headers in configured order as `name:value` without separator.
fn canonicalize_headers(req: &SigningRequest, headers: &[SignedHeader]) -> Result<String> {
    let mut s = String::new();
    for h in headers {
        let value = req.header_get_concat(&h.key).ok_or_else(|| {
            Error::header_missing(format!("header {} is required for signing", h.name))
        })?;

        s.push_str(&h.name);
        s.push(':');
        s.push_str(&SigningRequest::header_value_normalize(&value));
    }

    Ok(s)
}
