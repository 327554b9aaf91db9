//! Signer for EdgeGrid (`EG1-HMAC-SHA256`) authenticated APIs.
//!
//! ## Example
//!
//! ```no_run
//! use edgesign_core::{Body, Context, OsEnv, Result, Signer};
//! use edgesign_edgegrid::{Config, RequestSigner};
//!
//! # async fn example(ctx: Context) -> Result<()> {
//! let config = Config::new().from_env(&Context::new().with_env(OsEnv));
//! let signer = Signer::new(ctx, RequestSigner::new(config)?);
//!
//! let req = http::Request::post("https://akab-xxx.luna.akamaiapis.net/ccu/v3/invalidate/url")
//!     .body(Body::from(r#"{"objects":["https://example.com/"]}"#))?;
//! let resp = signer.send(req).await?;
//! println!("purge status: {}", resp.status());
//! # Ok(())
//! # }
//! ```

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod nonce;
pub use nonce::{ProvideNonce, StaticNonce, UuidNonce};

mod body_hash;
pub use body_hash::hash_body;

mod canonical;

mod sign_request;
pub use sign_request::RequestSigner;
