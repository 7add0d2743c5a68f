//! Soleil is a space-weather event client with an infinite-scroll parallax background.
//!
//! The crate centers on the parallax engine: two (or more) decorative layers are each paired with
//! a clone, and every display refresh both are translated by the scroll offset wrapped into one
//! viewport height, so the layers appear to repeat forever.
//!
//! # Overview
//!
//! 1. **Configure**: [`ParallaxConfig`] names the scroll container and each layer's selector,
//!    speed and [`BaseTransform`].
//! 2. **Initialize**: [`ParallaxEngine::init`] resolves every element through a [`Document`] and
//!    inserts the clones. Missing elements fail fast, before anything is mutated.
//! 3. **Run**: [`FrameLoop::start`] places the layers once, registers the engine with a
//!    [`FrameScheduler`] and returns a [`FrameLoopHandle`] that stops it.
//!
//! [`MemoryDocument`] and [`ManualScheduler`] host the engine headlessly; with the `web` feature
//! on `wasm32` the browser host drives a real page through `requestAnimationFrame`.
//!
//! The [`events`] module models the JSON the page renders next to the effect.
#![forbid(unsafe_code)]

mod foundation;

/// Space-weather event model.
pub mod events;
/// Collaborators the engine consumes.
pub mod host;
/// Parallax engine and its frame loop.
pub mod parallax;

pub use events::card::EventCard;
pub use events::feed::{
    PAGE_SIZE, dedupe_by_document_id, latest_of_kind, merge_feeds, page, sort_newest_first,
};
pub use events::model::{EventKind, SpaceWeatherEvent, page_api_path, parse_event_time};
pub use foundation::core::{Affine, FrameIndex, ScrollSample, Vec2};
pub use foundation::error::{SoleilError, SoleilResult};
pub use host::manual::ManualScheduler;
pub use host::memory::{MemoryDocument, NodeId};
pub use host::{Document, FrameCallback, FrameRequestId, FrameScheduler};
pub use parallax::config::{LayerSpec, ParallaxConfig};
pub use parallax::engine::{FrameOutcome, ParallaxEngine};
pub use parallax::frame_loop::{FrameLoop, FrameLoopHandle, StopReason};
pub use parallax::offset::{LayerPlacement, wrapped_offset};
pub use parallax::transform::{BaseTransform, CssNum, TransformFn};
