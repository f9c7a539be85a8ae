use thiserror::Error;

/// Why the event source could not hand over another event.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The stream is exhausted; this is how a tap session normally ends.
    #[error("end of input")]
    EndOfInput,

    #[error("could not decode tap event on line {line}: {reason}")]
    Decode { line: usize, reason: String },

    #[error("could not read tap stream: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure writing rendered output.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("could not write tap output: {0}")]
    Io(#[from] std::io::Error),
}
