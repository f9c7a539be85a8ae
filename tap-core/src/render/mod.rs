//! Turns a [`DisplayEvent`] into one output record.
//!
//! The three output modes are independent functions over the same input; [`Renderer`] only picks
//! which one to call.
mod json;
mod line;

pub use json::render_json;
pub use line::render_line;

use crate::display::DisplayEvent;
use crate::k8s::ShortNames;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputMode {
    Compact,
    /// Compact output plus resource/pod/namespace annotations for the given canonical kind.
    Wide { resource_kind: String },
    Json,
}

#[derive(Clone, Debug)]
pub struct Renderer {
    mode: OutputMode,
    short_names: ShortNames,
}

impl Renderer {
    pub fn new(mode: OutputMode) -> Self {
        Renderer { mode, short_names: ShortNames::default() }
    }

    pub fn with_short_names(mut self, short_names: ShortNames) -> Self {
        self.short_names = short_names;
        self
    }

    pub fn mode(&self) -> &OutputMode {
        &self.mode
    }

    pub fn render(&self, event: &DisplayEvent) -> String {
        match &self.mode {
            OutputMode::Compact => render_line(event, None, &self.short_names),
            OutputMode::Wide { resource_kind } => render_line(event, Some(resource_kind), &self.short_names),
            OutputMode::Json => render_json(event),
        }
    }
}

#[cfg(test)]
mod tests;
