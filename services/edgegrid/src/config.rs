use std::fmt::{Debug, Formatter};

use log::warn;

use super::constants::*;
use edgesign_core::{utils::Redact, Context};

/// Config carries all the configuration for EdgeGrid signing.
///
/// A config is only a description, it's validated once by
/// [`crate::RequestSigner::new`] and never mutated afterwards.
#[derive(Clone)]
pub struct Config {
    /// `client_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `AKAMAI_CLIENT_TOKEN`
    pub client_token: Option<String>,
    /// `access_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `AKAMAI_ACCESS_TOKEN`
    pub access_token: Option<String>,
    /// `client_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `AKAMAI_CLIENT_SECRET`
    pub client_secret: Option<String>,
    /// Headers included in the signature, in this order.
    ///
    /// Loaded from env value `AKAMAI_INCLUDE_HEADERS` (comma separated) if empty.
    pub include_headers: Vec<String>,
    /// Max bytes of the body covered by the body hash.
    ///
    /// `None` or `Some(0)` hashes the whole body. Loaded from env value
    /// `AKAMAI_MAX_BODY_HASH_SIZE` if unset.
    pub max_body_hash_size: Option<u64>,
    /// Content type forced on every request that carries a body.
    ///
    /// Defaults to `application/json`, `None` or an empty string leaves the
    /// request's content type untouched. Loaded from env value
    /// `AKAMAI_REQUEST_CONTENT_TYPE` if it's still the default.
    pub request_content_type: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_token: None,
            access_token: None,
            client_secret: None,
            include_headers: Vec::new(),
            max_body_hash_size: None,
            request_content_type: Some(DEFAULT_REQUEST_CONTENT_TYPE.to_string()),
        }
    }
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set client_token
    pub fn with_client_token(mut self, client_token: impl Into<String>) -> Self {
        self.client_token = Some(client_token.into());
        self
    }

    /// Set access_token
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Set client_secret
    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Set include_headers
    pub fn with_include_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Set max_body_hash_size
    pub fn with_max_body_hash_size(mut self, size: u64) -> Self {
        self.max_body_hash_size = Some(size);
        self
    }

    /// Set request_content_type, `None` disables the content type overwrite.
    pub fn with_request_content_type(mut self, content_type: Option<String>) -> Self {
        self.request_content_type = content_type;
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(AKAMAI_CLIENT_TOKEN) {
            self.client_token.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AKAMAI_ACCESS_TOKEN) {
            self.access_token.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AKAMAI_CLIENT_SECRET) {
            self.client_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AKAMAI_INCLUDE_HEADERS) {
            if self.include_headers.is_empty() {
                self.include_headers = v
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
            }
        }
        if let Some(v) = ctx.env_var(AKAMAI_MAX_BODY_HASH_SIZE) {
            match v.trim().parse::<u64>() {
                Ok(size) if size > 0 => {
                    self.max_body_hash_size.get_or_insert(size);
                }
                _ => warn!("{AKAMAI_MAX_BODY_HASH_SIZE} is not a positive integer: {v:?}, ignored"),
            }
        }
        if let Some(v) = ctx.env_var(AKAMAI_REQUEST_CONTENT_TYPE) {
            if self.request_content_type.as_deref() == Some(DEFAULT_REQUEST_CONTENT_TYPE) {
                self.request_content_type = Some(v);
            }
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("client_token", &self.client_token.as_ref().map(Redact::from))
            .field("access_token", &self.access_token.as_ref().map(Redact::from))
            .field("client_secret", &self.client_secret.as_ref().map(Redact::from))
            .field("include_headers", &self.include_headers)
            .field("max_body_hash_size", &self.max_body_hash_size)
            .field("request_content_type", &self.request_content_type)
            .finish()
    }
}
