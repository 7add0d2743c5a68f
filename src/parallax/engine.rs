use crate::foundation::core::{FrameIndex, ScrollSample};
use crate::foundation::error::{SoleilError, SoleilResult};
use crate::host::Document;
use crate::parallax::config::ParallaxConfig;
use crate::parallax::offset::LayerPlacement;
use crate::parallax::transform::{BaseTransform, write_layer_css};

#[derive(Clone, Debug)]
struct Layer<E> {
    key: String,
    primary: E,
    clone: E,
    speed: f64,
    base: BaseTransform,
    base_css: String, // pre-rendered `base`
}

/// Result of one per-frame update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// Every layer was repositioned for this sample.
    Applied(ScrollSample),
    /// The scroll container or viewport is gone; nothing was written.
    SourceLost,
}

/// Drives the primary/clone pair of every configured layer from the scroll offset.
///
/// Built once per document with [`ParallaxEngine::init`], which clones each layer element in
/// place; [`ParallaxEngine::update`] is then called once per display refresh.
#[derive(Clone, Debug)]
pub struct ParallaxEngine<E> {
    scroll_container: E,
    layers: Vec<Layer<E>>,
    css_buf: String,
    frames_applied: FrameIndex,
}

impl<E: Clone + std::fmt::Debug> ParallaxEngine<E> {
    /// Resolves every selector in `config`, then clones each layer element as its next sibling.
    ///
    /// All lookups happen before the first clone, so a missing element leaves `document`
    /// untouched.
    #[tracing::instrument(skip_all, fields(layers = config.layers.len()))]
    pub fn init<D>(document: &mut D, config: &ParallaxConfig) -> SoleilResult<Self>
    where
        D: Document<Element = E>,
    {
        config.validate()?;

        let scroll_container = document
            .query_selector(&config.scroll_container)
            .ok_or_else(|| SoleilError::missing_scroll_container(&config.scroll_container))?;

        let primaries = config
            .layers
            .iter()
            .map(|layer| {
                document
                    .query_selector(&layer.selector)
                    .ok_or_else(|| SoleilError::missing_layer(&layer.key, &layer.selector))
            })
            .collect::<SoleilResult<Vec<_>>>()?;

        let mut layers = Vec::with_capacity(config.layers.len());
        let mut longest_base = 0usize;
        for (layer, primary) in config.layers.iter().zip(primaries) {
            let clone = document.clone_after(&primary)?;
            tracing::debug!(layer = %layer.key, ?primary, ?clone, "cloned parallax layer");
            let base_css = layer.base_transform.to_string();
            longest_base = longest_base.max(base_css.len());
            layers.push(Layer {
                key: layer.key.clone(),
                primary,
                clone,
                speed: layer.speed,
                base: layer.base_transform.clone(),
                base_css,
            });
        }

        Ok(Self {
            scroll_container,
            layers,
            // Room for " translateY(-<digits>.<3 digits>px)" so frames never reallocate.
            css_buf: String::with_capacity(longest_base + 48),
            frames_applied: FrameIndex(0),
        })
    }

    /// Reads the scroll offset and viewport height for this frame.
    pub fn sample<D>(&self, document: &D) -> Option<ScrollSample>
    where
        D: Document<Element = E>,
    {
        let scroll_y = document.scroll_top(&self.scroll_container)?;
        let viewport_h = document.viewport_height()?;
        ScrollSample::new(scroll_y, viewport_h).ok()
    }

    /// One animation frame: sample the host, then reposition every primary and clone.
    pub fn update<D>(&mut self, document: &mut D) -> SoleilResult<FrameOutcome>
    where
        D: Document<Element = E>,
    {
        let Some(sample) = self.sample(document) else {
            return Ok(FrameOutcome::SourceLost);
        };
        self.apply(document, sample)?;
        Ok(FrameOutcome::Applied(sample))
    }

    /// Writes the transforms for `sample` without reading the host.
    pub fn apply<D>(&mut self, document: &mut D, sample: ScrollSample) -> SoleilResult<()>
    where
        D: Document<Element = E>,
    {
        for layer in &self.layers {
            let p = LayerPlacement::at(sample, layer.speed);
            write_layer_css(&mut self.css_buf, &layer.base_css, p.primary_y);
            document.set_transform(&layer.primary, &self.css_buf)?;
            write_layer_css(&mut self.css_buf, &layer.base_css, p.clone_y);
            document.set_transform(&layer.clone, &self.css_buf)?;
        }
        self.frames_applied = self.frames_applied.next();
        Ok(())
    }

    /// Per-layer placements for `sample`, in configuration order.
    pub fn placements(
        &self,
        sample: ScrollSample,
    ) -> impl Iterator<Item = (&str, LayerPlacement)> + '_ {
        self.layers
            .iter()
            .map(move |l| (l.key.as_str(), LayerPlacement::at(sample, l.speed)))
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.layers.iter().map(|l| l.key.as_str())
    }

    /// `(primary, clone)` elements of the layer named `key`.
    pub fn elements(&self, key: &str) -> Option<(&E, &E)> {
        self.layers
            .iter()
            .find(|l| l.key == key)
            .map(|l| (&l.primary, &l.clone))
    }

    pub fn base_transform(&self, key: &str) -> Option<&BaseTransform> {
        self.layers.iter().find(|l| l.key == key).map(|l| &l.base)
    }

    pub fn scroll_container(&self) -> &E {
        &self.scroll_container
    }

    pub fn frames_applied(&self) -> FrameIndex {
        self.frames_applied
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parallax/engine.rs"]
mod tests;
