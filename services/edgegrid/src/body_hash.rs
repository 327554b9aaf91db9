use std::io::{Read, SeekFrom};

use edgesign_core::hash::base64_encode;
use edgesign_core::{Body, Error, Result};
use http::Method;
use log::debug;
use sha2::{Digest, Sha256};

/// Compute the body hash of a request.
///
/// - `GET` requests (in any letter case) and requests without body always
///   hash to `""`.
/// - Otherwise hash at most `max_size` bytes from the body's current position
///   (the whole remaining body if `max_size` is `None` or `0`), then seek back
///   to where hashing started so the body can still be transmitted.
pub fn hash_body(method: &Method, body: &mut Body, max_size: Option<u64>) -> Result<String> {
    if method.as_str().eq_ignore_ascii_case("GET") {
        return Ok(String::new());
    }
    let Some(r) = body.as_seekable()? else {
        return Ok(String::new());
    };

    let start = r
        .stream_position()
        .map_err(|e| Error::stream_not_seekable("get body stream position failed").with_source(e))?;

    let mut hasher = Sha256::new();
    let limit = max_size.filter(|v| *v > 0).unwrap_or(u64::MAX);
    let n = std::io::copy(&mut (&mut *r).take(limit), &mut hasher)
        .map_err(|e| Error::stream_unreadable("read body stream for hashing failed").with_source(e))?;

    r.seek(SeekFrom::Start(start))
        .map_err(|e| Error::stream_not_seekable("rewind body stream failed").with_source(e))?;

    debug!("body hash computed over {n} bytes");
    Ok(base64_encode(hasher.finalize().as_slice()))
}
