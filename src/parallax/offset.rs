//! Scroll-offset wrapping.

use crate::foundation::core::ScrollSample;

/// `(scroll_y * speed) mod viewport_h`, bounded into `[0, viewport_h)`.
///
/// Negative products (overscroll) wrap from the top instead of producing a negative offset.
/// `viewport_h` must be finite and > 0; see [`ScrollSample::new`]. A product too large to
/// represent pins the layer at `0` rather than poisoning the transform with `NaN`.
#[inline]
pub fn wrapped_offset(scroll_y: f64, speed: f64, viewport_h: f64) -> f64 {
    let product = scroll_y * speed;
    if !product.is_finite() {
        return 0.0;
    }
    let r = product.rem_euclid(viewport_h);
    // rem_euclid rounds up to the modulus for tiny negative inputs.
    if r >= viewport_h { 0.0 } else { r }
}

/// Where one layer's primary and clone sit for a given scroll sample.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LayerPlacement {
    pub offset: f64,
    pub primary_y: f64,
    pub clone_y: f64,
}

impl LayerPlacement {
    pub fn at(sample: ScrollSample, speed: f64) -> Self {
        let offset = wrapped_offset(sample.scroll_y, speed, sample.viewport_h);
        Self {
            offset,
            primary_y: offset,
            clone_y: offset - sample.viewport_h,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parallax/offset.rs"]
mod tests;
