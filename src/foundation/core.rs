use crate::foundation::error::{SoleilError, SoleilResult};

pub use kurbo::{Affine, Vec2};

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Host input read at the start of a frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollSample {
    pub scroll_y: f64,
    pub viewport_h: f64, // must be > 0
}

impl ScrollSample {
    pub fn new(scroll_y: f64, viewport_h: f64) -> SoleilResult<Self> {
        if !scroll_y.is_finite() {
            return Err(SoleilError::host("scroll offset must be finite"));
        }
        if !viewport_h.is_finite() || viewport_h <= 0.0 {
            return Err(SoleilError::host(
                "viewport height must be finite and > 0",
            ));
        }
        Ok(Self {
            scroll_y,
            viewport_h,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
