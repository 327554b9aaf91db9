use std::collections::HashMap;
use std::io::{Cursor, Seek, SeekFrom};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use bytes::Bytes;
use chrono::{TimeDelta, TimeZone, Utc};
use edgesign_core::time::{format_http_date, DateTime};
use edgesign_core::{Body, Context, ErrorKind, HttpSend, Result, Signer, StaticEnv};
use edgesign_edgegrid::{Config, RequestSigner, StaticNonce};
use hmac::{Hmac, Mac};
use http::header::{AUTHORIZATION, CONTENT_TYPE, DATE};
use http::StatusCode;
use log::debug;
use pretty_assertions::assert_eq;
use sha2::{Digest, Sha256};

const NONCE: &str = "11111111-1111-1111-1111-111111111111";
const TIMESTAMP: &str = "20240101T00:00:00+0000";

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn test_time() -> DateTime {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn hmac_base64(key: &[u8], content: &[u8]) -> String {
    let mut h = Hmac::<Sha256>::new_from_slice(key).unwrap();
    h.update(content);
    BASE64_STANDARD.encode(h.finalize().into_bytes())
}

/// Compute the expected header straight from the protocol formulas.
fn expected_header(canonical: &str) -> String {
    let auth_data = format!(
        "EG1-HMAC-SHA256 client_token=a;access_token=b;timestamp={TIMESTAMP};nonce={NONCE};"
    );
    let signing_key = hmac_base64(b"s", TIMESTAMP.as_bytes());
    let signature = hmac_base64(
        signing_key.as_bytes(),
        format!("{canonical}{auth_data}").as_bytes(),
    );
    format!("{auth_data}signature={signature}")
}

/// In-memory transport recording every forwarded request.
#[derive(Debug, Clone)]
struct MockHttpSend {
    status: StatusCode,
    date: Option<String>,
    requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
}

impl MockHttpSend {
    fn new(status: StatusCode, date: Option<String>) -> Self {
        Self {
            status,
            date,
            requests: Arc::default(),
        }
    }

    fn requests(&self) -> Vec<http::Request<Bytes>> {
        self.requests.lock().unwrap().drain(..).collect()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        debug!("mock received request: {req:?}");
        self.requests.lock().unwrap().push(req);

        let mut resp = http::Response::builder().status(self.status);
        if let Some(date) = &self.date {
            resp = resp.header(DATE, date);
        }
        Ok(resp.body(Bytes::from_static(b"{}"))?)
    }
}

fn test_signer(mock: &MockHttpSend, cfg: Config) -> Signer {
    let builder = RequestSigner::new(cfg)
        .expect("config must be valid")
        .with_time(test_time())
        .with_nonce(StaticNonce::new(NONCE));
    Signer::new(Context::new().with_http_send(mock.clone()), builder)
}

fn test_config() -> Config {
    Config::new()
        .with_client_token("a")
        .with_access_token("b")
        .with_client_secret("s")
}

#[tokio::test]
async fn test_sign_get() -> Result<()> {
    init_logger();
    let mock = MockHttpSend::new(StatusCode::OK, None);
    let signer = test_signer(&mock, test_config());

    let req = http::Request::get("https://x.test/p?q=1").body(Body::empty())?;
    let resp = signer.send(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let reqs = mock.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(
        reqs[0].headers()[AUTHORIZATION].to_str()?,
        expected_header("GET\thttps\tx.test\t/p?q=1\t\t\t")
    );
    // No body, no content type.
    assert!(reqs[0].headers().get(CONTENT_TYPE).is_none());
    Ok(())
}

#[tokio::test]
async fn test_sign_post_with_headers_and_truncated_body() -> Result<()> {
    init_logger();
    let mock = MockHttpSend::new(StatusCode::CREATED, None);
    let signer = test_signer(
        &mock,
        test_config()
            .with_include_headers(["X-Custom"])
            .with_max_body_hash_size(4),
    );

    let req = http::Request::post("https://x.test/items")
        .header("X-Custom", " a   b\tc ")
        .header(AUTHORIZATION, "Bearer leaked")
        .body(Body::from("0123456789"))?;
    signer.send(req).await?;

    let reqs = mock.requests();
    assert_eq!(reqs.len(), 1);

    let body_hash = BASE64_STANDARD.encode(Sha256::digest(b"0123"));
    assert_eq!(
        reqs[0].headers()[AUTHORIZATION].to_str()?,
        expected_header(&format!(
            "POST\thttps\tx.test\t/items\tX-Custom:a b c\t{body_hash}\t"
        ))
    );
    assert_eq!(reqs[0].headers().get_all(AUTHORIZATION).iter().count(), 1);
    assert_eq!(reqs[0].headers()[CONTENT_TYPE], "application/json");
    // The whole body is still transmitted.
    assert_eq!(reqs[0].body(), &Bytes::from_static(b"0123456789"));
    Ok(())
}

#[tokio::test]
async fn test_sign_keeps_body_position() -> Result<()> {
    let mock = MockHttpSend::new(StatusCode::OK, None);
    let signer = test_signer(&mock, test_config());

    let mut cursor = Cursor::new(b"ignored:payload".to_vec());
    cursor.seek(SeekFrom::Start(8))?;

    let (mut parts, mut body) = http::Request::put("https://x.test/p")
        .body(Body::from_seekable(cursor))?
        .into_parts();
    signer.sign(&mut parts, &mut body).await?;

    let body_hash = BASE64_STANDARD.encode(Sha256::digest(b"payload"));
    assert_eq!(
        parts.headers[AUTHORIZATION].to_str()?,
        expected_header(&format!("PUT\thttps\tx.test\t/p\t\t{body_hash}\t"))
    );
    assert_eq!(body.into_bytes()?, Bytes::from_static(b"payload"));
    Ok(())
}

#[tokio::test]
async fn test_missing_header_is_not_forwarded() -> Result<()> {
    let mock = MockHttpSend::new(StatusCode::OK, None);
    let signer = test_signer(&mock, test_config().with_include_headers(["X-Required"]));

    let req = http::Request::get("https://x.test/p").body(Body::empty())?;
    let err = signer.send(req).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::HeaderMissing);
    assert!(mock.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unseekable_body() -> Result<()> {
    let mock = MockHttpSend::new(StatusCode::OK, None);
    let signer = test_signer(&mock, test_config());

    let req = http::Request::post("https://x.test/p").body(Body::from_reader(&b"payload"[..]))?;
    let err = signer.send(req).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StreamNotSeekable);
    assert!(mock.requests().is_empty());

    // GET never hashes its body, a one-shot reader is fine.
    let req = http::Request::get("https://x.test/p").body(Body::from_reader(&b"payload"[..]))?;
    signer.send(req).await?;
    assert_eq!(mock.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_clock_skew_on_failed_response() -> Result<()> {
    init_logger();
    let date = format_http_date(test_time() + TimeDelta::seconds(45));
    let mock = MockHttpSend::new(StatusCode::UNAUTHORIZED, Some(date));
    let signer = test_signer(&mock, test_config());

    let req = http::Request::get("https://x.test/p").body(Body::empty())?;
    let err = signer.send(req).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ClockSkewExceeded);
    // The request was forwarded exactly once, never retried.
    assert_eq!(mock.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_failed_response_within_skew_is_returned() -> Result<()> {
    let date = format_http_date(test_time() - TimeDelta::seconds(10));
    let mock = MockHttpSend::new(StatusCode::UNAUTHORIZED, Some(date));
    let signer = test_signer(&mock, test_config());

    let req = http::Request::get("https://x.test/p").body(Body::empty())?;
    let resp = signer.send(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body(), &Bytes::from_static(b"{}"));
    Ok(())
}

#[tokio::test]
async fn test_successful_response_skips_skew_check() -> Result<()> {
    let date = format_http_date(test_time() + TimeDelta::hours(2));
    let mock = MockHttpSend::new(StatusCode::OK, Some(date));
    let signer = test_signer(&mock, test_config());

    let req = http::Request::get("https://x.test/p").body(Body::empty())?;
    assert_eq!(signer.send(req).await?.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_config_from_env() -> Result<()> {
    let ctx = Context::new().with_env(StaticEnv {
        envs: HashMap::from([
            ("AKAMAI_CLIENT_TOKEN".to_string(), "a".to_string()),
            ("AKAMAI_ACCESS_TOKEN".to_string(), "b".to_string()),
            ("AKAMAI_CLIENT_SECRET".to_string(), "s".to_string()),
        ]),
    });
    let config = Config::new().from_env(&ctx);

    let mock = MockHttpSend::new(StatusCode::OK, None);
    let signer = test_signer(&mock, config);

    let req = http::Request::get("https://x.test/p?q=1").body(Body::empty())?;
    signer.send(req).await?;
    assert_eq!(
        mock.requests()[0].headers()[AUTHORIZATION].to_str()?,
        expected_header("GET\thttps\tx.test\t/p?q=1\t\t\t")
    );
    Ok(())
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = RequestSigner::new(Config::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
}

async fn post_item(signer: Signer, i: usize) -> Result<http::Response<Bytes>> {
    let req = http::Request::post(format!("https://x.test/items/{i}"))
        .body(Body::from(format!("payload-{i}")))?;
    signer.send(req).await
}

#[tokio::test]
async fn test_concurrent_signing() -> Result<()> {
    let mock = MockHttpSend::new(StatusCode::OK, None);
    let signer = Signer::new(
        Context::new().with_http_send(mock.clone()),
        RequestSigner::new(test_config())?,
    );

    let mut tasks = Vec::new();
    for i in 0..8 {
        tasks.push(tokio::spawn(post_item(signer.clone(), i)));
    }
    for task in tasks {
        task.await.expect("task must not panic")?;
    }

    let reqs = mock.requests();
    assert_eq!(reqs.len(), 8);
    let nonces: std::collections::HashSet<_> = reqs
        .iter()
        .map(|r| {
            let auth = r.headers()[AUTHORIZATION].to_str().unwrap().to_string();
            auth.split(";nonce=").nth(1).unwrap()[..36].to_string()
        })
        .collect();
    assert_eq!(nonces.len(), 8);
    Ok(())
}
