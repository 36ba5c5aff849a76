//! Handler for link-quality table responses.

use std::collections::HashMap;

use tracing::warn;

use crate::error::WireError;
use crate::handler::{Completion, ResponseHandler};
use crate::packet::Data;
use crate::wire;

/// Size of one packed link-quality record: an 8-byte neighbor key followed
/// by a 4-byte quality value.
pub const LINK_QUALITY_RECORD_SIZE: usize = wire::I64_WIDTH + wire::F32_WIDTH;

/// Decodes a packed table of (neighbor id, link quality) records.
///
/// The payload is a sequence of 12-byte records. A repeated key overwrites
/// the earlier value. A trailing partial record is ignored; the responder's
/// table is still usable without it.
#[derive(Debug, Default)]
pub struct LinkQualityHandler {
    completion: Completion,
    qualities: HashMap<i64, f32>,
}

impl LinkQualityHandler {
    /// Create a handler with an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The decoded neighbor-to-quality table.
    #[inline]
    pub fn qualities(&self) -> &HashMap<i64, f32> {
        &self.qualities
    }

    /// Take the table out of the handler.
    pub fn into_qualities(self) -> HashMap<i64, f32> {
        self.qualities
    }
}

impl ResponseHandler for LinkQualityHandler {
    fn on_data(&mut self, data: &Data) -> Result<(), WireError> {
        let content = data.content();
        let records = content.len() / LINK_QUALITY_RECORD_SIZE;
        let trailing = content.len() % LINK_QUALITY_RECORD_SIZE;
        if trailing != 0 {
            warn!(
                trailing,
                total = content.len(),
                "ignoring trailing partial link-quality record"
            );
        }

        for i in 0..records {
            let base = i * LINK_QUALITY_RECORD_SIZE;
            let key = wire::decode_i64(&wire::content_slice(content, wire::I64_WIDTH, base)?)?;
            let value = wire::decode_f32(&wire::content_slice(
                content,
                wire::F32_WIDTH,
                base + wire::I64_WIDTH,
            )?)?;
            self.qualities.insert(key, value);
        }

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
