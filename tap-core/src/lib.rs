//! # tap-core
//!
//! Event model and renderers for live proxy traffic taps.  Decoded tap events are classified into
//! a [`DisplayEvent`](display::DisplayEvent) and rendered as a compact line, a wide line annotated
//! with Kubernetes resource labels, or an indented JSON document; [`stream::consume`] drives that
//! pipeline over an [`EventSource`](source::EventSource).
pub mod addr;
pub mod display;
pub mod errors;
pub mod event;
pub mod k8s;
pub mod logging;
pub mod render;
pub mod source;
pub mod stream;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use display::DisplayEvent;
pub use errors::{
    SourceError,
    StreamError,
};
pub use event::TapEvent;
pub use render::{
    OutputMode,
    Renderer,
};
pub use source::{
    EventSource,
    JsonLinesSource,
};
pub use stream::{
    consume,
    StreamSummary,
    Termination,
};
