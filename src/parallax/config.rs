use std::collections::BTreeSet;

use crate::foundation::error::{SoleilError, SoleilResult};
use crate::parallax::transform::BaseTransform;

/// One parallax layer: which element to clone and drive, and how fast it moves.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerSpec {
    pub key: String,
    pub selector: String,
    pub speed: f64, // multiplier on scroll offset
    #[serde(default)]
    pub base_transform: BaseTransform,
}

impl LayerSpec {
    pub fn new(
        key: impl Into<String>,
        selector: impl Into<String>,
        speed: f64,
        base_transform: BaseTransform,
    ) -> Self {
        Self {
            key: key.into(),
            selector: selector.into(),
            speed,
            base_transform,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallaxConfig {
    /// Element whose scroll offset drives every layer.
    pub scroll_container: String,
    pub layers: Vec<LayerSpec>,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            scroll_container: ".wrapper".to_string(),
            layers: vec![
                LayerSpec::new(
                    "background",
                    ".background",
                    0.2,
                    BaseTransform::from_depth_unchecked(-10.0, 2.0),
                ),
                LayerSpec::new(
                    "foreground",
                    ".foreground",
                    0.5,
                    BaseTransform::from_depth_unchecked(-5.0, 1.5),
                ),
            ],
        }
    }
}

impl ParallaxConfig {
    pub fn from_json_str(s: &str) -> SoleilResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> SoleilResult<()> {
        if self.scroll_container.trim().is_empty() {
            return Err(SoleilError::config("scrollContainer selector must be non-empty"));
        }
        if self.layers.is_empty() {
            return Err(SoleilError::config("at least one layer is required"));
        }

        let mut keys = BTreeSet::new();
        for layer in &self.layers {
            if layer.key.trim().is_empty() {
                return Err(SoleilError::config("layer key must be non-empty"));
            }
            if !keys.insert(layer.key.as_str()) {
                return Err(SoleilError::config(format!(
                    "duplicate layer key '{}'",
                    layer.key
                )));
            }
            if layer.selector.trim().is_empty() {
                return Err(SoleilError::config(format!(
                    "layer '{}' selector must be non-empty",
                    layer.key
                )));
            }
            if !layer.speed.is_finite() {
                return Err(SoleilError::config(format!(
                    "layer '{}' speed must be finite",
                    layer.key
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parallax/config.rs"]
mod tests;
