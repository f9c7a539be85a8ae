//! Sources of decoded tap events.
use std::io::BufRead;

use tracing::trace;

use crate::errors::SourceError;
use crate::event::TapEvent;

/// Pull-based supplier of decoded tap events.
///
/// Implementations return `SourceError::EndOfInput` once the stream is exhausted; any other error
/// ends the session.
#[cfg_attr(any(test, feature = "testutils"), mockall::automock)]
pub trait EventSource {
    fn next_event(&mut self) -> Result<TapEvent, SourceError>;
}

/// Reads one JSON-encoded [`TapEvent`] per line; blank lines are skipped.
pub struct JsonLinesSource<R> {
    reader: R,
    buf: String,
    line: usize,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        JsonLinesSource { reader, buf: String::new(), line: 0 }
    }
}

impl<R: BufRead> EventSource for JsonLinesSource<R> {
    fn next_event(&mut self) -> Result<TapEvent, SourceError> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Err(SourceError::EndOfInput);
            }
            self.line += 1;

            let data = self.buf.trim();
            if data.is_empty() {
                continue;
            }

            trace!(line = self.line, "decoding tap event");
            return serde_json::from_str(data)
                .map_err(|err| SourceError::Decode { line: self.line, reason: err.to_string() });
        }
    }
}
