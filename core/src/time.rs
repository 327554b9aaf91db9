//! Time related utils.

use crate::Error;
use chrono::Utc;

/// DateTime in UTC, the only timezone edgesign works with.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into EdgeGrid timestamp: `20220313T07:20:04+0000`
pub fn format_timestamp(t: DateTime) -> String {
    t.format("%Y%m%dT%H:%M:%S+0000").to_string()
}

/// Format time into http date: `Sun, 06 Nov 1994 08:49:37 GMT`
///
/// ## Note
///
/// HTTP date is slightly different from RFC2822.
///
/// - Timezone is fixed to GMT.
/// - Day must be 2 digit.
pub fn format_http_date(t: DateTime) -> String {
    t.format("%a, %d %b %Y %T GMT").to_string()
}

/// Parse the value of a `Date` header.
///
/// Accepts http dates (RFC2822 with the `GMT` zone) and RFC3339.
pub fn parse_http_date(s: &str) -> crate::Result<DateTime> {
    let s = s.trim();
    chrono::DateTime::parse_from_rfc2822(s)
        .or_else(|_| chrono::DateTime::parse_from_rfc3339(s))
        .map(|v| v.with_timezone(&Utc))
        .map_err(|e| Error::unexpected(format!("parse date {s:?} failed")).with_source(e))
}
