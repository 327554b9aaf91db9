use crate::{Body, Context, Result};
use std::fmt::Debug;

/// SignRequest is the trait used by signer to sign a request and inspect its response.
///
/// Signing happens in two phases around the transport:
///
/// - [`SignRequest::sign_request`] transforms the request before it's sent.
/// - [`SignRequest::check_response`] inspects the response after it's received.
///
/// Both phases run exactly once per request, so an implementation can be composed
/// into any client middleware chain.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + 'static {
    /// Sign the request in place.
    ///
    /// ## Body
    ///
    /// The body may be read while signing but must be left at the position it
    /// had before the call, since the same body is transmitted afterwards.
    async fn sign_request(
        &self,
        ctx: &Context,
        req: &mut http::request::Parts,
        body: &mut Body,
    ) -> Result<()>;

    /// Check the response of a signed request.
    ///
    /// Returning an error turns the whole request into a failure.
    fn check_response(&self, ctx: &Context, resp: &http::response::Parts) -> Result<()> {
        let _ = (ctx, resp);
        Ok(())
    }
}
