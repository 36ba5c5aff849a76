//! Transport session: exclusive ownership of one forwarder connection.
//!
//! [`FaceSession`] owns the live [`Face`] handle plus the endpoint
//! configuration it was built from. All access goes through `&mut self`,
//! which serializes exchanges by construction: one call's send/poll
//! sequence finishes (or fails) before the next can begin, and a
//! reconfiguration can never interleave with an in-flight poll.
//!
//! Face creation is lazy. [`reset`](FaceSession::reset) releases the old
//! handle immediately and records the new target; the replacement is opened
//! by the next send. The same mechanism recovers from a broken stream: the
//! dead handle is dropped on the spot, the endpoint is kept, and the next
//! call reconnects without manual reconfiguration.

use tracing::{debug, warn};

use crate::error::{FaceError, PollError};
use crate::face::{Endpoint, Face, FaceEvent, FaceProvider};
use crate::handler::ResponseHandler;
use crate::packet::Interest;

/// Owns one live forwarder connection and its endpoint configuration.
pub struct FaceSession {
    provider: Box<dyn FaceProvider>,
    endpoint: Option<Endpoint>,
    face: Option<Box<dyn Face>>,
}

impl FaceSession {
    /// Create a session using the local default connection method.
    pub fn new(provider: Box<dyn FaceProvider>) -> Self {
        Self {
            provider,
            endpoint: None,
            face: None,
        }
    }

    /// Create a session targeting a remote endpoint.
    pub fn with_endpoint(provider: Box<dyn FaceProvider>, endpoint: Endpoint) -> Self {
        Self {
            provider,
            endpoint: Some(endpoint),
            face: None,
        }
    }

    /// The endpoint the session currently targets, if any.
    #[inline]
    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoint.as_ref()
    }

    /// Begin an exchange for `interest`.
    ///
    /// At most one exchange is in flight per session; the engine drives it
    /// to completion with [`poll_once`](Self::poll_once) before sending
    /// again.
    pub fn send(&mut self, interest: &Interest) -> Result<(), FaceError> {
        let face = self.face()?;
        match face.express_interest(interest) {
            Ok(()) => Ok(()),
            Err(err) => Err(self.recover(err)),
        }
    }

    /// Pump the face once and dispatch ready events to `handler`.
    ///
    /// A payload that fails to decode aborts the handler and surfaces as
    /// [`PollError::Decode`]; a transport failure surfaces as
    /// [`PollError::Face`] after any recovery teardown.
    pub fn poll_once(&mut self, handler: &mut dyn ResponseHandler) -> Result<(), PollError> {
        let face = self.face()?;
        let events = match face.process_events() {
            Ok(events) => events,
            Err(err) => return Err(self.recover(err).into()),
        };

        for event in events {
            match event {
                FaceEvent::Data(data) => {
                    if let Err(err) = handler.on_data(&data) {
                        handler.abort();
                        return Err(err.into());
                    }
                }
                FaceEvent::Timeout => handler.on_timeout(),
            }
        }

        Ok(())
    }

    /// Replace the endpoint configuration.
    ///
    /// The current handle is released before the new target is recorded;
    /// the replacement connection is opened by the next send. Passing an
    /// equal endpoint leaves the session in an equivalent state.
    pub fn reset(&mut self, endpoint: Option<Endpoint>) {
        debug!(old = ?self.endpoint, new = ?endpoint, "resetting face session");
        self.face = None;
        self.endpoint = endpoint;
    }

    /// The live face, created on demand from the current endpoint config.
    fn face(&mut self) -> Result<&mut dyn Face, FaceError> {
        if self.face.is_none() {
            debug!(endpoint = ?self.endpoint, "opening face");
            self.face = Some(self.provider.create(self.endpoint.as_ref())?);
        }
        Ok(self
            .face
            .as_deref_mut()
            .expect("face was just created"))
    }

    /// Tear down after a transport failure, keeping the session usable.
    ///
    /// A broken stream means the handle is dead; it is dropped here, with
    /// the last known endpoint kept, so the next call reconnects. Other
    /// failures leave the handle alone.
    fn recover(&mut self, err: FaceError) -> FaceError {
        if matches!(err, FaceError::Broken(_)) {
            warn!(endpoint = ?self.endpoint, "stream broken, dropping face for reconnect");
            self.face = None;
        }
        err
    }
}
