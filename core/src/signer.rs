use crate::{Body, Context, Result, SignRequest};
use bytes::Bytes;
use log::debug;
use std::sync::Arc;

/// Signer is the main struct used to sign and forward requests.
#[derive(Clone, Debug)]
pub struct Signer {
    ctx: Context,
    builder: Arc<dyn SignRequest>,
}

impl Signer {
    /// Create a new signer.
    pub fn new(ctx: Context, builder: impl SignRequest) -> Self {
        Self {
            ctx,
            builder: Arc::new(builder),
        }
    }

    /// Sign the request without sending it.
    pub async fn sign(&self, req: &mut http::request::Parts, body: &mut Body) -> Result<()> {
        self.builder.sign_request(&self.ctx, req, body).await
    }

    /// Sign the request, forward it to the context's transport exactly once,
    /// then check the response.
    ///
    /// Dropping the returned future cancels both signing and forwarding.
    pub async fn send(&self, req: http::Request<Body>) -> Result<http::Response<Bytes>> {
        let (mut parts, mut body) = req.into_parts();
        self.sign(&mut parts, &mut body).await?;

        let req = http::Request::from_parts(parts, body.into_bytes()?);
        let (parts, body) = self.ctx.http_send(req).await?.into_parts();
        debug!("received response with status {}", parts.status);

        self.builder.check_response(&self.ctx, &parts)?;
        Ok(http::Response::from_parts(parts, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, HttpSend};
    use http::header::AUTHORIZATION;
    use http::StatusCode;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct FixedAuth;

    #[async_trait::async_trait]
    impl SignRequest for FixedAuth {
        async fn sign_request(
            &self,
            _: &Context,
            req: &mut http::request::Parts,
            _: &mut Body,
        ) -> Result<()> {
            req.headers.insert(AUTHORIZATION, "fixed".parse()?);
            Ok(())
        }

        fn check_response(&self, _: &Context, resp: &http::response::Parts) -> Result<()> {
            if resp.status == StatusCode::IM_A_TEAPOT {
                return Err(crate::Error::unexpected("teapot"));
            }
            Ok(())
        }
    }

    #[derive(Debug, Default, Clone)]
    struct Recorder {
        status: u16,
        seen: Arc<Mutex<Vec<http::Request<Bytes>>>>,
    }

    #[async_trait::async_trait]
    impl HttpSend for Recorder {
        async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            self.seen.lock().unwrap().push(req);
            Ok(http::Response::builder()
                .status(self.status)
                .body(Bytes::from_static(b"ok"))?)
        }
    }

    #[tokio::test]
    async fn test_send_signs_and_forwards_once() -> Result<()> {
        let recorder = Recorder {
            status: 200,
            ..Default::default()
        };
        let signer = Signer::new(Context::new().with_http_send(recorder.clone()), FixedAuth);

        let req = http::Request::post("https://example.com/p").body(Body::from("payload"))?;
        let resp = signer.send(req).await?;
        assert_eq!(resp.status(), StatusCode::OK);

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].headers()[AUTHORIZATION], "fixed");
        assert_eq!(seen[0].body(), &Bytes::from_static(b"payload"));
        Ok(())
    }

    #[tokio::test]
    async fn test_send_surfaces_response_check() -> Result<()> {
        let recorder = Recorder {
            status: 418,
            ..Default::default()
        };
        let signer = Signer::new(Context::new().with_http_send(recorder), FixedAuth);

        let req = http::Request::get("https://example.com/p").body(Body::empty())?;
        let err = signer.send(req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        Ok(())
    }
}
