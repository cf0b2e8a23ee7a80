use super::dates::{DateKey, DateState};
use super::model::Event;
use tracing::info;

/// An event is past only when its whole range lies strictly before the
/// cutoff. A still-unresolved on-demand event is never past: missing
/// information must not drop it from the feed.
pub fn is_past(event: &Event, cutoff: &DateKey) -> bool {
    match &event.schedule {
        DateState::OnDemand => false,
        DateState::Dated { from, to } => from < cutoff && to < cutoff,
    }
}

/// Drops elapsed events, preserving the listing order of the rest.
pub fn discard_past_events(events: Vec<Event>, cutoff: &DateKey) -> Vec<Event> {
    let total = events.len();
    let current: Vec<Event> = events
        .into_iter()
        .filter(|event| !is_past(event, cutoff))
        .collect();

    info!("Filtered out {} past events", total - current.len());

    current
}
