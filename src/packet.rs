//! Interest and Data packet types.
//!
//! [`Interest`] is the outgoing request: a name plus the timing parameters
//! for the exchange. It is built once per call and never mutated after being
//! handed to the session. [`Data`] is the incoming response: the responder's
//! name plus the raw content payload. A `Data` is only lent to a response
//! handler for the duration of one decode callback; anything the handler
//! keeps must be copied out before the callback returns.

use std::time::Duration;

use bytes::Bytes;

use crate::name::Name;

/// Default lifetime for an expressed interest.
pub const DEFAULT_INTEREST_LIFETIME: Duration = Duration::from_millis(3000);

/// A named request for content.
#[derive(Debug, Clone)]
pub struct Interest {
    name: Name,
    lifetime: Duration,
    must_be_fresh: bool,
}

impl Interest {
    /// Create an interest with the default lifetime and `must_be_fresh`
    /// unset.
    pub fn new(name: Name) -> Self {
        Self {
            name,
            lifetime: DEFAULT_INTEREST_LIFETIME,
            must_be_fresh: false,
        }
    }

    /// Set how long the exchange may wait for a response.
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Require the responder to supply non-stale content.
    pub fn with_must_be_fresh(mut self, must_be_fresh: bool) -> Self {
        self.must_be_fresh = must_be_fresh;
        self
    }

    /// The requested name.
    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The exchange lifetime.
    #[inline]
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Whether cached content is acceptable.
    #[inline]
    pub fn must_be_fresh(&self) -> bool {
        self.must_be_fresh
    }
}

/// A response carrying content for a previously expressed interest.
#[derive(Debug, Clone)]
pub struct Data {
    name: Name,
    content: Bytes,
}

impl Data {
    /// Create a data packet from a name and content payload.
    pub fn new(name: Name, content: impl Into<Bytes>) -> Self {
        Self {
            name,
            content: content.into(),
        }
    }

    /// The responder's name for this content.
    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The raw content payload.
    #[inline]
    pub fn content(&self) -> &[u8] {
        &self.content
    }
}
