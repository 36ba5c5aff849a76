//! # ndn-sensor-client
//!
//! Client-side Interest/Data exchange engine for an NDN sensor network.
//!
//! A mobile host issues named, content-addressed requests ("Interests")
//! through a forwarder connection ("Face") and interprets the binary
//! responses ("Data") it gets back, under timeout, reconnect, and
//! partial-failure constraints.
//!
//! ## Architecture
//!
//! - **Wire decoder** ([`wire`]): pure, bounds-checked payload decoding,
//!   with the firmware's reversed scalar byte order.
//! - **Response handlers** ([`handler`]): per-request-kind decode logic
//!   that accumulates decoded state and reports completion.
//! - **Transport session** ([`session`]): exclusive ownership of one live
//!   face handle, with lazy reconnect after stream failures.
//! - **Request engine** ([`engine`]): drives one exchange end to end and
//!   classifies the outcome.
//! - **Method bridge** ([`bridge`]): the host-facing call surface mapping
//!   method names and JSON arguments onto engine calls.
//!
//! Concrete forwarder transports plug in behind the [`face::Face`] and
//! [`face::FaceProvider`] traits.
//!
//! ## Example
//!
//! ```ignore
//! use ndn_sensor_client::{FaceSession, MethodBridge, MethodCall, RequestEngine};
//!
//! let session = FaceSession::new(Box::new(my_face_provider));
//! let mut bridge = MethodBridge::new(RequestEngine::new(session));
//!
//! let call = MethodCall::new("getScalar").with_arg("path", "/esp/sensor/3");
//! let outcome = bridge.handle(&call).await;
//! ```

pub mod bridge;
pub mod engine;
pub mod error;
pub mod face;
pub mod handler;
pub mod name;
pub mod packet;
pub mod session;
pub mod wire;

pub use bridge::{MethodBridge, MethodCall, MethodOutcome};
pub use engine::RequestEngine;
pub use error::{FaceError, NdnClientError, PollError, Result, WireError};
pub use face::{Endpoint, Face, FaceEvent, FaceProvider};
pub use handler::{DiscoveryHandler, LinkQualityHandler, ResponseHandler, ScalarHandler};
pub use name::{Component, Name};
pub use packet::{Data, Interest};
pub use session::FaceSession;
