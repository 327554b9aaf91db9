// Algorithm identifier of the auth header.
pub const EG1_HMAC_SHA256: &str = "EG1-HMAC-SHA256";

pub const DEFAULT_REQUEST_CONTENT_TYPE: &str = "application/json";

// Remote `Date` may diverge from local time by at most this many seconds.
pub const MAX_CLOCK_SKEW_SECONDS: i64 = 30;

// Env values
pub const AKAMAI_CLIENT_TOKEN: &str = "AKAMAI_CLIENT_TOKEN";
pub const AKAMAI_ACCESS_TOKEN: &str = "AKAMAI_ACCESS_TOKEN";
pub const AKAMAI_CLIENT_SECRET: &str = "AKAMAI_CLIENT_SECRET";
pub const AKAMAI_INCLUDE_HEADERS: &str = "AKAMAI_INCLUDE_HEADERS";
pub const AKAMAI_MAX_BODY_HASH_SIZE: &str = "AKAMAI_MAX_BODY_HASH_SIZE";
pub const AKAMAI_REQUEST_CONTENT_TYPE: &str = "AKAMAI_REQUEST_CONTENT_TYPE";
