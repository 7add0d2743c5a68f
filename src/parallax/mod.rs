//! Infinite vertical parallax.
//!
//! Each configured layer is paired with a clone inserted right after it. Every frame the pair is
//! translated by `(scroll_y * speed) mod viewport_h`, the clone sitting exactly one viewport
//! above the primary, so one of the two always covers the space the other is leaving.

/// Layer and scroll-container configuration.
pub mod config;
/// The engine owning the layer registry.
pub mod engine;
/// Scheduler registration and the stop handle.
pub mod frame_loop;
/// Offset wrapping.
pub mod offset;
/// CSS transform lists.
pub mod transform;
