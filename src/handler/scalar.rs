//! Handler for single scalar sensor readings.

use crate::error::WireError;
use crate::handler::{Completion, ResponseHandler};
use crate::packet::Data;
use crate::wire;

/// Decodes an 8-byte payload as one f64 measurement.
#[derive(Debug, Default)]
pub struct ScalarHandler {
    completion: Completion,
    value: Option<f64>,
}

impl ScalarHandler {
    /// Create a handler with no decoded value.
    pub fn new() -> Self {
        Self::default()
    }

    /// The decoded measurement, if one arrived.
    #[inline]
    pub fn value(&self) -> Option<f64> {
        self.value
    }
}

impl ResponseHandler for ScalarHandler {
    fn on_data(&mut self, data: &Data) -> Result<(), WireError> {
        let bytes = wire::content_slice(data.content(), wire::F64_WIDTH, 0)?;
        self.value = Some(wire::decode_f64(&bytes)?);
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
