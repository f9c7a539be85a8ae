use tracing::warn;

use crate::display::DisplayEvent;

/// Render an event as an indented JSON document.
///
/// A serialization failure is reported inline in place of the event, so one bad event doesn't end
/// the tap session.
pub fn render_json(event: &DisplayEvent) -> String {
    match serde_json::to_string_pretty(event) {
        Ok(json) => json,
        Err(err) => {
            warn!("could not serialize tap event: {err}");
            format!("Error marshalling JSON: {err}")
        },
    }
}
