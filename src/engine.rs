//! Request engine: drives one Interest/Data exchange end to end.
//!
//! One [`execute`](RequestEngine::execute) call moves through a fixed
//! sequence: build the interest, hand it to the session, then cooperatively
//! poll until the response handler reports completion or the interest
//! lifetime elapses. Every call resolves to exactly one outcome: the decoded
//! handler on success, or one of [`NdnClientError`]'s variants. Nothing is
//! retried within a call; the caller decides whether to issue a new one.
//!
//! The poll loop suspends with a short [`tokio::time::sleep`] between
//! iterations, so it yields to other tasks while still resolving within one
//! poll interval of the handler finishing. Faces may deliver their own
//! timeout events; the engine additionally enforces the lifetime as a
//! deadline so a silent face can never leave a call unresolved.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::{FaceError, NdnClientError, PollError, Result};
use crate::handler::ResponseHandler;
use crate::name::Name;
use crate::packet::Interest;
use crate::session::FaceSession;

/// How long the poll loop yields between iterations.
pub const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Executes one request at a time against an owned [`FaceSession`].
pub struct RequestEngine {
    session: FaceSession,
    poll_interval: Duration,
}

impl RequestEngine {
    /// Create an engine around a session.
    pub fn new(session: FaceSession) -> Self {
        Self {
            session,
            poll_interval: POLL_INTERVAL,
        }
    }

    /// Override the poll interval (mainly useful in tests).
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// The underlying session, for reconfiguration between calls.
    #[inline]
    pub fn session_mut(&mut self) -> &mut FaceSession {
        &mut self.session
    }

    /// Execute one exchange: express an interest for `name` and drive
    /// `handler` until it completes or `lifetime` elapses.
    ///
    /// Returns the handler, with its decoded state, on success.
    ///
    /// # Errors
    ///
    /// - [`NdnClientError::Timeout`] when nothing arrived in time.
    /// - [`NdnClientError::Decode`] when a response payload was malformed.
    /// - [`NdnClientError::ConnectionRefused`] when the forwarder endpoint
    ///   is unreachable; the session is left as-is.
    /// - [`NdnClientError::StreamBroken`] when a previously-good connection
    ///   failed; the session has already been torn down for reconnect, so
    ///   the next call can succeed without reconfiguration.
    /// - [`NdnClientError::Unknown`] for anything unrecognized, carrying
    ///   the original cause.
    pub async fn execute<H>(
        &mut self,
        name: Name,
        mut handler: H,
        lifetime: Duration,
        must_be_fresh: bool,
    ) -> Result<H>
    where
        H: ResponseHandler,
    {
        let interest = Interest::new(name)
            .with_lifetime(lifetime)
            .with_must_be_fresh(must_be_fresh);
        debug!(name = %interest.name(), ?lifetime, "expressing interest");

        self.session.send(&interest).map_err(classify)?;

        let deadline = Instant::now() + lifetime;
        loop {
            self.session.poll_once(&mut handler).map_err(|err| match err {
                PollError::Face(face_err) => classify(face_err),
                PollError::Decode(wire_err) => NdnClientError::Decode(wire_err),
            })?;

            if handler.is_done() {
                break;
            }
            if Instant::now() >= deadline {
                handler.on_timeout();
                break;
            }
            sleep(self.poll_interval).await;
        }

        if handler.had_timeout() {
            debug!(name = %interest.name(), "interest timed out");
            return Err(NdnClientError::Timeout);
        }

        debug!(name = %interest.name(), "exchange completed");
        Ok(handler)
    }
}

/// Map a raw face failure to the reported outcome.
fn classify(err: FaceError) -> NdnClientError {
    match err {
        FaceError::Refused(io) => NdnClientError::ConnectionRefused(io),
        FaceError::Broken(io) => NdnClientError::StreamBroken(io),
        other => NdnClientError::Unknown {
            source: Box::new(other),
        },
    }
}
