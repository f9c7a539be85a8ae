//! The tap consumer loop.
//!
//! Pulls one event at a time from an [`EventSource`], renders it and writes it out.  Rendering
//! problems stay local to their event (see [`render_json`](crate::render::render_json)); a source
//! failure other than end-of-input is logged and ends the session.  Either way, everything rendered
//! so far is flushed before returning.
use std::io::{
    BufWriter,
    Write,
};

use tracing::{
    debug,
    error,
    info,
};

use crate::display::DisplayEvent;
use crate::errors::{
    SourceError,
    StreamError,
};
use crate::render::Renderer;
use crate::source::EventSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The source ran dry.
    EndOfInput,
    /// The source reported a decode or transport failure.
    SourceFailed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamSummary {
    pub rendered: usize,
    pub termination: Termination,
}

pub fn consume<S, W>(source: &mut S, sink: W, renderer: &Renderer) -> Result<StreamSummary, StreamError>
where
    S: EventSource + ?Sized,
    W: Write,
{
    let mut out = BufWriter::new(sink);
    let mut rendered = 0;

    let termination = loop {
        debug!("waiting for data...");
        match source.next_event() {
            Ok(event) => {
                let display = DisplayEvent::from(&event);
                writeln!(out, "{}", renderer.render(&display))?;
                rendered += 1;
            },
            Err(SourceError::EndOfInput) => {
                debug!("tap stream ended");
                break Termination::EndOfInput;
            },
            Err(err) => {
                error!("{err}");
                break Termination::SourceFailed;
            },
        }
    };

    out.flush()?;
    info!(rendered, ?termination, "tap session finished");
    Ok(StreamSummary { rendered, termination })
}
