//! Space-weather events as served to the page.
//!
//! Fetching is left to the host; this module only models the JSON and the ordering, paging and
//! card text the page applies to it.

/// Card text per event.
pub mod card;
/// Ordering, merging and paging.
pub mod feed;
/// Event kinds and the event record.
pub mod model;
