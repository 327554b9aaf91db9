use std::fmt::Debug;

use uuid::Uuid;

/// ProvideNonce is the source of the single-use nonce of every signature.
///
/// Implementations must return a fresh value on every call unless they are
/// used for testing.
pub trait ProvideNonce: Debug + Send + Sync + 'static {
    /// Return a nonce for one signing operation.
    fn nonce(&self) -> String;
}

/// UuidNonce returns a random v4 uuid in its lowercase hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidNonce;

impl ProvideNonce for UuidNonce {
    fn nonce(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// StaticNonce always returns the same nonce.
///
/// # Note
///
/// A repeated nonce makes signatures replayable, only use this for testing.
#[derive(Debug, Clone)]
pub struct StaticNonce(String);

impl StaticNonce {
    /// Create a new StaticNonce.
    pub fn new(nonce: impl Into<String>) -> Self {
        Self(nonce.into())
    }
}

impl ProvideNonce for StaticNonce {
    fn nonce(&self) -> String {
        self.0.clone()
    }
}
