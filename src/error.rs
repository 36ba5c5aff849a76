//! Error types for ndn-sensor-client.
//!
//! Errors are layered the same way the crate is: [`WireError`] for payload
//! decoding, [`FaceError`] for the transport collaborator, and
//! [`NdnClientError`] for the classified outcome of one request. Only the
//! request engine performs classification; the lower layers surface raw
//! conditions.

use thiserror::Error;

/// Error produced by the wire decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// The requested byte range does not fit inside the payload.
    #[error("requested {length} bytes at offset {offset}, but content has {size}")]
    OutOfBounds {
        /// Byte offset the read started at.
        offset: usize,
        /// Number of bytes requested.
        length: usize,
        /// Total payload size.
        size: usize,
    },
}

/// Distinguishable I/O failures raised by a [`Face`](crate::face::Face).
///
/// These mirror the exceptions a forwarder connection can raise: the remote
/// refusing the connection, a previously-good stream breaking, and the
/// handle being closed from another task.
#[derive(Debug, Error)]
pub enum FaceError {
    /// The forwarder endpoint is unreachable.
    #[error("connection refused: {0}")]
    Refused(#[source] std::io::Error),

    /// A previously working connection broke (reset, broken pipe).
    #[error("stream broken: {0}")]
    Broken(#[source] std::io::Error),

    /// The connection handle was closed asynchronously.
    #[error("face closed asynchronously")]
    Closed,

    /// Any other transport-layer failure.
    #[error("face failure: {0}")]
    Other(String),
}

/// Error surfaced by [`FaceSession::poll_once`](crate::session::FaceSession::poll_once).
///
/// A poll can fail in two distinct ways: the transport itself failed, or a
/// delivered payload did not decode. The engine maps each to a different
/// outcome, so they stay separate here.
#[derive(Debug, Error)]
pub enum PollError {
    /// The underlying face raised an I/O failure.
    #[error(transparent)]
    Face(#[from] FaceError),

    /// The response handler rejected the payload.
    #[error(transparent)]
    Decode(#[from] WireError),
}

/// Classified outcome of a failed request.
///
/// Exactly one of these (or a decoded value) is reported per
/// [`RequestEngine::execute`](crate::engine::RequestEngine::execute) call.
#[derive(Debug, Error)]
pub enum NdnClientError {
    /// No data arrived within the interest lifetime.
    #[error("no data received within the interest lifetime")]
    Timeout,

    /// A response arrived but its payload did not decode.
    #[error("response decode failed: {0}")]
    Decode(#[from] WireError),

    /// The forwarder endpoint refused the connection.
    #[error("failed to connect to the forwarder: {0}")]
    ConnectionRefused(#[source] std::io::Error),

    /// The forwarder connection broke mid-exchange. The session has already
    /// been torn down for reconnect by the time this is reported.
    #[error("forwarder connection reset: {0}")]
    StreamBroken(#[source] std::io::Error),

    /// Anything unrecognized, with the original cause kept for diagnostics.
    #[error("unknown failure: {source}")]
    Unknown {
        /// The underlying cause.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl NdnClientError {
    /// The error code reported over the method-call surface.
    pub fn code(&self) -> &'static str {
        match self {
            NdnClientError::Timeout => "NDN_TIMEOUT",
            NdnClientError::ConnectionRefused(_) | NdnClientError::StreamBroken(_) => {
                "NDN_CONNECTION_ERROR"
            }
            NdnClientError::Decode(_) | NdnClientError::Unknown { .. } => "NDN_UNKNOWN",
        }
    }
}

/// Result type alias using NdnClientError.
pub type Result<T> = std::result::Result<T, NdnClientError>;
