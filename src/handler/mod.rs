//! Response handlers - per-request-kind decode logic.
//!
//! A handler is the unit of logic that knows what one kind of response
//! looks like: it owns the decoded state accumulated for a request, knows
//! when the exchange is finished, and knows how to decode one incoming
//! payload. The session feeds it data and timeout events; the engine reads
//! its completion flags and finally takes the decoded value.
//!
//! Each handler is consumed by exactly one request and is not reused.
//!
//! # Example
//!
//! ```
//! use ndn_sensor_client::handler::{ResponseHandler, ScalarHandler};
//! use ndn_sensor_client::name::Name;
//! use ndn_sensor_client::packet::Data;
//! use ndn_sensor_client::wire;
//!
//! let mut handler = ScalarHandler::new();
//! let data = Data::new(Name::parse("/sensor/7/data"), wire::encode_f64(21.5).to_vec());
//! handler.on_data(&data).unwrap();
//!
//! assert!(handler.is_done());
//! assert_eq!(handler.value(), Some(21.5));
//! ```

mod discovery;
mod link_quality;
mod scalar;

pub use discovery::DiscoveryHandler;
pub use link_quality::{LinkQualityHandler, LINK_QUALITY_RECORD_SIZE};
pub use scalar::ScalarHandler;

use crate::error::WireError;
use crate::packet::Data;

/// Per-request response logic.
///
/// The payload handed to [`on_data`](ResponseHandler::on_data) is only valid
/// for the duration of the call; implementations copy out everything they
/// keep before returning.
pub trait ResponseHandler: Send {
    /// Decode one incoming payload into the handler's state.
    ///
    /// On success the handler is done; completion only becomes observable
    /// after the decode has fully landed. On a bounds failure the caller
    /// aborts the handler and propagates the error as a decode failure.
    fn on_data(&mut self, data: &Data) -> Result<(), WireError>;

    /// Record that the request's lifetime elapsed without a response.
    fn on_timeout(&mut self);

    /// Whether the exchange has finished (successfully or not).
    fn is_done(&self) -> bool;

    /// Whether the exchange finished because of a timeout.
    fn had_timeout(&self) -> bool;

    /// Mark the exchange finished without a decoded value.
    fn abort(&mut self);
}

/// Completion flags shared by all handler variants.
///
/// Both flags are monotonic within one request: once set they are never
/// cleared.
#[derive(Debug, Clone, Copy, Default)]
pub struct Completion {
    done: bool,
    timed_out: bool,
}

impl Completion {
    /// Fresh flags: not done, not timed out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the exchange finished.
    ///
    /// Must be the last action of a decode step, so that a concurrent
    /// poll never observes a half-decoded state.
    #[inline]
    pub fn finish(&mut self) {
        self.done = true;
    }

    /// Mark the exchange timed out (which also finishes it).
    #[inline]
    pub fn time_out(&mut self) {
        self.timed_out = true;
        self.done = true;
    }

    /// Whether the exchange has finished.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Whether the exchange timed out.
    #[inline]
    pub fn had_timeout(&self) -> bool {
        self.timed_out
    }
}
