use std::collections::HashSet;

use crate::events::model::{EventKind, SpaceWeatherEvent};

/// Events per page of the mixed feed.
pub const PAGE_SIZE: usize = 5;

/// Newest first; events without a readable time go last, keeping their relative order.
pub fn sort_newest_first(events: &mut [SpaceWeatherEvent]) {
    events.sort_by_cached_key(|e| std::cmp::Reverse(e.timestamp()));
}

/// Tags each per-kind feed with its kind and merges them newest first.
pub fn merge_feeds(
    feeds: impl IntoIterator<Item = (EventKind, Vec<SpaceWeatherEvent>)>,
) -> Vec<SpaceWeatherEvent> {
    let mut events: Vec<_> = feeds
        .into_iter()
        .flat_map(|(kind, evs)| evs.into_iter().map(move |e| e.with_kind(kind)))
        .collect();
    sort_newest_first(&mut events);
    events
}

/// Drops later events whose [`SpaceWeatherEvent::document_id`] was already seen.
pub fn dedupe_by_document_id(events: Vec<SpaceWeatherEvent>) -> Vec<SpaceWeatherEvent> {
    let mut seen = HashSet::new();
    events
        .into_iter()
        .filter(|e| seen.insert(e.document_id()))
        .collect()
}

/// Zero-based page `page` of `events` (empty past the end).
pub fn page(events: &[SpaceWeatherEvent], page: usize) -> &[SpaceWeatherEvent] {
    let start = page.saturating_mul(PAGE_SIZE).min(events.len());
    let end = start.saturating_add(PAGE_SIZE).min(events.len());
    &events[start..end]
}

/// Most recent event of `kind`, as served by the per-kind routes.
pub fn latest_of_kind(events: &[SpaceWeatherEvent], kind: EventKind) -> Option<&SpaceWeatherEvent> {
    events
        .iter()
        .filter(|e| e.kind == Some(kind))
        .reduce(|best, e| if e.timestamp() > best.timestamp() { e } else { best })
}

#[cfg(test)]
#[path = "../../tests/unit/events/feed.rs"]
mod tests;
