//! EdgeGrid request signer
use std::fmt::Write;
use std::sync::Arc;

use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::header::CONTENT_TYPE;
use http::header::DATE;
use http::HeaderValue;
use log::{debug, warn};

use super::constants::*;
use crate::canonical::{canonical_request, SignedHeader};
use crate::{Config, Credential, ProvideNonce, UuidNonce};
use edgesign_core::hash::base64_hmac_sha256;
use edgesign_core::time::{format_timestamp, now, parse_http_date, DateTime};
use edgesign_core::{Body, Context, Error, Result, SignRequest, SigningRequest};

/// RequestSigner that implements EdgeGrid authentication (`EG1-HMAC-SHA256`).
///
/// As a [`SignRequest`] it works in two phases:
///
/// - Before sending: force the configured content type on requests with a body,
///   drop any caller supplied `Authorization` and set a freshly generated one.
/// - After receiving: if the response failed and carries a parseable `Date`,
///   report [`edgesign_core::ErrorKind::ClockSkewExceeded`] when the remote
///   clock is more than 30 seconds away from ours.
///
/// Signing keeps no state between requests, a single signer can be shared by
/// any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credential: Credential,
    headers: Vec<SignedHeader>,
    max_body_hash_size: Option<u64>,
    content_type: Option<HeaderValue>,
    nonce: Arc<dyn ProvideNonce>,
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a signer from config.
    ///
    /// Returns [`edgesign_core::ErrorKind::ConfigInvalid`] if a credential field is
    /// missing or empty, an included header name is invalid, or the content type
    /// is not a valid header value.
    pub fn new(config: Config) -> Result<Self> {
        let credential = Credential::from_config(&config)?;
        let headers = config
            .include_headers
            .iter()
            .map(|v| SignedHeader::parse(v))
            .collect::<Result<Vec<_>>>()?;
        let content_type = match config.request_content_type.as_deref() {
            None | Some("") => None,
            Some(v) => Some(HeaderValue::from_str(v).map_err(|e| {
                Error::config_invalid(format!("request content type {v:?} is invalid"))
                    .with_source(e)
            })?),
        };

        Ok(Self {
            credential,
            headers,
            max_body_hash_size: config.max_body_hash_size,
            content_type,
            nonce: Arc::new(UuidNonce),
            time: None,
        })
    }

    /// Replace the nonce source.
    pub fn with_nonce(mut self, nonce: impl ProvideNonce) -> Self {
        self.nonce = Arc::new(nonce);
        self
    }

    /// Specify the signing time.
    ///
    /// The same time is used as local clock while checking responses.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Generate the `Authorization` header value for a request.
    ///
    /// The body is hashed for every method but `GET` and left at the position
    /// it had before the call.
    pub fn generate(&self, parts: &http::request::Parts, body: &mut Body) -> Result<String> {
        let timestamp = format_timestamp(self.time.unwrap_or_else(now));

        let req = SigningRequest::build(parts)?;
        let canonical = canonical_request(&req, &self.headers, body, self.max_body_hash_size)?;

        let auth_data = auth_data(&self.credential, &timestamp, &self.nonce.nonce())?;
        debug!("auth data: {auth_data}");

        let signing_key = signing_key(&self.credential.client_secret, &timestamp);
        let signature = signature(&signing_key, &canonical, &auth_data);

        Ok(format!("{auth_data}signature={signature}"))
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut http::request::Parts,
        body: &mut Body,
    ) -> Result<()> {
        if !body.is_empty() {
            if let Some(v) = &self.content_type {
                req.headers.insert(CONTENT_TYPE, v.clone());
            }
        }

        req.headers.remove(AUTHORIZATION);
        let mut value: HeaderValue = self.generate(req, body)?.parse()?;
        value.set_sensitive(true);
        req.headers.insert(AUTHORIZATION, value);

        Ok(())
    }

    fn check_response(&self, _ctx: &Context, resp: &http::response::Parts) -> Result<()> {
        if resp.status.is_success() {
            return Ok(());
        }
        let Some(date) = resp.headers.get(DATE) else {
            return Ok(());
        };
        let remote = match date.to_str().map_err(Error::from).and_then(parse_http_date) {
            Ok(v) => v,
            Err(err) => {
                debug!("response date is not parseable, skip clock skew check: {err}");
                return Ok(());
            }
        };

        let local = self.time.unwrap_or_else(now);
        let skew = (local - remote).num_milliseconds().abs();
        if skew > MAX_CLOCK_SKEW_SECONDS * 1000 {
            warn!(
                "request failed with {} and remote date {remote} is {skew}ms away from local date {local}",
                resp.status
            );
            return Err(Error::clock_skew_exceeded(format!(
                "local date is more than {MAX_CLOCK_SKEW_SECONDS}s out of sync with remote server"
            )));
        }

        Ok(())
    }
}

/// Construct auth data.
///
/// ```text
/// EG1-HMAC-SHA256 client_token=<t>;access_token=<a>;timestamp=<ts>;nonce=<n>;
/// ```
fn auth_data(cred: &Credential, timestamp: &str, nonce: &str) -> Result<String> {
    let mut s = String::new();
    write!(
        &mut s,
        "{EG1_HMAC_SHA256} client_token={};access_token={};timestamp={timestamp};nonce={};",
        cred.client_token,
        cred.access_token,
        nonce.to_lowercase(),
    )?;

    Ok(s)
}

/// Derive the per-request signing key from client secret and timestamp.
fn signing_key(client_secret: &str, timestamp: &str) -> String {
    base64_hmac_sha256(client_secret.as_bytes(), timestamp.as_bytes())
}

/// Sign canonical request followed by auth data with the signing key.
fn signature(signing_key: &str, canonical_request: &str, auth_data: &str) -> String {
    base64_hmac_sha256(
        signing_key.as_bytes(),
        format!("{canonical_request}{auth_data}").as_bytes(),
    )
}
