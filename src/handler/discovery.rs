//! Handler for auto-discovery responses.
//!
//! A discovery response comes in one of two shapes. Most responders answer
//! with a payload of NUL-separated path strings naming the content they
//! serve. The forwarder itself instead answers with a sentinel `"1"` as the
//! trailing name component and no usable payload. Either way the responder
//! encodes a numeric response identifier into the second-to-last name
//! component, which lets the caller correlate answers when it probes with a
//! list of already-visited ids.

use tracing::debug;

use crate::error::WireError;
use crate::handler::{Completion, ResponseHandler};
use crate::packet::Data;
use crate::wire;

/// Trailing name component marking "the responder is the forwarder itself".
const FORWARDER_SENTINEL: &str = "1";

/// A sentinel answer carries at least this many name components.
const SENTINEL_MIN_NAME_LEN: usize = 4;

/// Accumulates discovered paths from discovery responses.
#[derive(Debug, Default)]
pub struct DiscoveryHandler {
    completion: Completion,
    response_id: Option<i64>,
    paths: Vec<String>,
    is_forwarder: bool,
}

impl DiscoveryHandler {
    /// Create a handler with an empty path list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Numeric identifier the responder encoded into its name, if any.
    #[inline]
    pub fn response_id(&self) -> Option<i64> {
        self.response_id
    }

    /// The discovered paths, in arrival order.
    #[inline]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Whether the answer came from the forwarder itself.
    #[inline]
    pub fn is_forwarder(&self) -> bool {
        self.is_forwarder
    }

    /// Take the accumulated path list out of the handler.
    pub fn into_paths(self) -> Vec<String> {
        self.paths
    }
}

impl ResponseHandler for DiscoveryHandler {
    fn on_data(&mut self, data: &Data) -> Result<(), WireError> {
        let name = data.name();
        debug!(name = %name, "discovery response");

        let is_sentinel = name.len() >= SENTINEL_MIN_NAME_LEN
            && name.get(-1).and_then(|c| c.as_str()) == Some(FORWARDER_SENTINEL);

        if is_sentinel {
            self.is_forwarder = true;
        } else {
            let content = wire::content_slice(data.content(), data.content().len(), 0)?;
            self.paths.extend(
                String::from_utf8_lossy(&content)
                    .split('\0')
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_owned),
            );
        }

        // The id component is text; a malformed one means "no id", not an error.
        self.response_id = name.get(-2).and_then(|c| c.as_number());

        self.completion.finish();
        Ok(())
    }

    fn on_timeout(&mut self) {
        self.completion.time_out();
    }

    fn is_done(&self) -> bool {
        self.completion.is_done()
    }

    fn had_timeout(&self) -> bool {
        self.completion.had_timeout()
    }

    fn abort(&mut self) {
        self.completion.finish();
    }
}
