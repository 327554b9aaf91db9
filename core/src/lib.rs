//! Core components for signing EdgeGrid API requests.
//!
//! This crate provides the foundational types and traits shared by the
//! edgesign service crates.
//!
//! ## Overview
//!
//! - **Context**: holds the transport ([`HttpSend`]) and environment ([`Env`]) implementations
//! - **Body**: a request body that may be hashed and rewound before transmission
//! - **SignRequest**: a two-phase signing stage (pre-send transform, post-receive check)
//! - **Signer**: composes a [`SignRequest`] with the context's transport
//!
//! ## Example
//!
//! ```no_run
//! use edgesign_core::{Body, Context, Result, SignRequest, Signer};
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! struct MyBuilder;
//!
//! #[async_trait]
//! impl SignRequest for MyBuilder {
//!     async fn sign_request(
//!         &self,
//!         _ctx: &Context,
//!         req: &mut http::request::Parts,
//!         _body: &mut Body,
//!     ) -> Result<()> {
//!         req.headers.insert(http::header::AUTHORIZATION, "token".parse()?);
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let signer = Signer::new(Context::new(), MyBuilder);
//!
//! let (mut parts, mut body) = http::Request::get("https://example.com")
//!     .body(Body::empty())?
//!     .into_parts();
//! signer.sign(&mut parts, &mut body).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time formatting and parsing utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};

mod body;
pub use body::{Body, SeekRead};

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};

mod api;
pub use api::SignRequest;
mod request;
pub use request::SigningRequest;
mod signer;
pub use signer::Signer;
