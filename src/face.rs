//! The transport collaborator boundary.
//!
//! A [`Face`] is one logical connection to an NDN forwarding daemon. The
//! crate does not implement the forwarder wire protocol itself; concrete
//! faces (TCP to a remote forwarder, a local daemon socket, an in-memory
//! test double) plug in behind the [`Face`] and [`FaceProvider`] traits,
//! and everything above depends only on this contract:
//!
//! - express an interest, beginning one exchange
//! - pump the face once, collecting delivered [`FaceEvent`]s
//! - raise distinguishable I/O failures ([`FaceError`])
//!
//! Event delivery is polled rather than callback-driven; the session pulls
//! events out and dispatches them to the active response handler.

use std::fmt;

use crate::error::FaceError;
use crate::packet::{Data, Interest};

/// A remote forwarder endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Forwarder host name or address.
    pub host: String,
    /// Forwarder TCP port.
    pub port: u16,
}

impl Endpoint {
    /// Create an endpoint from host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// One event delivered by a face while pumping.
#[derive(Debug)]
pub enum FaceEvent {
    /// A data packet answering the in-flight interest.
    Data(Data),
    /// The in-flight interest's lifetime elapsed inside the transport.
    Timeout,
}

/// One live connection to a forwarder.
pub trait Face: Send {
    /// Begin an exchange for `interest`. At most one exchange is in flight
    /// per face at a time.
    fn express_interest(&mut self, interest: &Interest) -> Result<(), FaceError>;

    /// Drive the face's event loop once, without blocking, and return
    /// whatever events became ready.
    fn process_events(&mut self) -> Result<Vec<FaceEvent>, FaceError>;
}

/// Creates [`Face`]s for a given endpoint configuration.
///
/// `None` means the local default forwarder connection method.
pub trait FaceProvider: Send {
    /// Open a new face bound to `endpoint`.
    fn create(&mut self, endpoint: Option<&Endpoint>) -> Result<Box<dyn Face>, FaceError>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted in-memory faces for unit tests.

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;

    /// One scripted reaction to a `process_events` call.
    pub(crate) enum Step {
        Deliver(Vec<FaceEvent>),
        Fail(FaceError),
    }

    /// A face that replays a fixed script, then goes quiet.
    #[derive(Default)]
    pub(crate) struct ScriptedFace {
        steps: VecDeque<Step>,
        express_failure: Option<FaceError>,
        expressed: Arc<Mutex<Vec<Interest>>>,
    }

    impl ScriptedFace {
        pub(crate) fn new(steps: Vec<Step>) -> Self {
            Self {
                steps: steps.into(),
                ..Self::default()
            }
        }

        /// Interests expressed through this face, in order; keep a clone
        /// before moving the face into a session.
        pub(crate) fn expressed_log(&self) -> Arc<Mutex<Vec<Interest>>> {
            self.expressed.clone()
        }

        /// A face that answers the next interest with a single data packet.
        pub(crate) fn answering(data: Data) -> Self {
            Self::new(vec![Step::Deliver(vec![FaceEvent::Data(data)])])
        }

        /// A face whose `express_interest` fails immediately.
        pub(crate) fn failing_express(err: FaceError) -> Self {
            Self {
                express_failure: Some(err),
                ..Self::default()
            }
        }
    }

    impl Face for ScriptedFace {
        fn express_interest(&mut self, interest: &Interest) -> Result<(), FaceError> {
            if let Some(err) = self.express_failure.take() {
                return Err(err);
            }
            self.expressed
                .lock()
                .expect("expressed log lock")
                .push(interest.clone());
            Ok(())
        }

        fn process_events(&mut self) -> Result<Vec<FaceEvent>, FaceError> {
            match self.steps.pop_front() {
                Some(Step::Deliver(events)) => Ok(events),
                Some(Step::Fail(err)) => Err(err),
                None => Ok(Vec::new()),
            }
        }
    }

    /// Hands out scripted faces in order and records every creation.
    pub(crate) struct ScriptedProvider {
        faces: VecDeque<ScriptedFace>,
        created: Arc<AtomicUsize>,
        endpoints_seen: Arc<Mutex<Vec<Option<Endpoint>>>>,
    }

    impl ScriptedProvider {
        pub(crate) fn new(faces: Vec<ScriptedFace>) -> Self {
            Self {
                faces: faces.into(),
                created: Arc::new(AtomicUsize::new(0)),
                endpoints_seen: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Counter of faces created so far; keep a clone before moving the
        /// provider into a session.
        pub(crate) fn created_counter(&self) -> Arc<AtomicUsize> {
            self.created.clone()
        }

        /// Endpoint configs passed to `create`, in order.
        pub(crate) fn endpoints_log(&self) -> Arc<Mutex<Vec<Option<Endpoint>>>> {
            self.endpoints_seen.clone()
        }
    }

    impl FaceProvider for ScriptedProvider {
        fn create(&mut self, endpoint: Option<&Endpoint>) -> Result<Box<dyn Face>, FaceError> {
            self.created.fetch_add(1, Ordering::SeqCst);
            self.endpoints_seen
                .lock()
                .expect("endpoint log lock")
                .push(endpoint.cloned());
            match self.faces.pop_front() {
                Some(face) => Ok(Box::new(face)),
                None => Ok(Box::<ScriptedFace>::default()),
            }
        }
    }

    pub(crate) fn broken() -> FaceError {
        FaceError::Broken(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "broken pipe",
        ))
    }

    pub(crate) fn refused() -> FaceError {
        FaceError::Refused(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ))
    }
}
