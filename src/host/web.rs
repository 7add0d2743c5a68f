use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::foundation::error::{SoleilError, SoleilResult};
use crate::host::slots::CallbackSlots;
use crate::host::{Document, FrameCallback, FrameRequestId, FrameScheduler};
use crate::parallax::config::ParallaxConfig;
use crate::parallax::engine::ParallaxEngine;
use crate::parallax::frame_loop::{FrameLoop, FrameLoopHandle};

fn js_err(what: &str, e: JsValue) -> SoleilError {
    SoleilError::host(format!("{what}: {e:?}"))
}

/// The page's `window.document`.
#[derive(Debug)]
pub struct WebDocument {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl WebDocument {
    pub fn from_window() -> SoleilResult<Self> {
        let window = web_sys::window().ok_or_else(|| SoleilError::host("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| SoleilError::host("window has no document"))?;
        Ok(Self { window, document })
    }
}

impl Document for WebDocument {
    type Element = web_sys::Element;

    fn query_selector(&self, selector: &str) -> Option<web_sys::Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn clone_after(&mut self, element: &web_sys::Element) -> SoleilResult<web_sys::Element> {
        let parent = element
            .parent_node()
            .ok_or_else(|| SoleilError::host("cannot clone an element without a parent"))?;
        let copy = element
            .clone_node_with_deep(true)
            .map_err(|e| js_err("cloneNode", e))?;
        parent
            .insert_before(&copy, element.next_sibling().as_ref())
            .map_err(|e| js_err("insertBefore", e))?;
        copy.dyn_into::<web_sys::Element>()
            .map_err(|_| SoleilError::host("cloned node is not an element"))
    }

    fn set_transform(&mut self, element: &web_sys::Element, css: &str) -> SoleilResult<()> {
        let el = element
            .dyn_ref::<web_sys::HtmlElement>()
            .ok_or_else(|| SoleilError::host("layer is not an HTML element"))?;
        el.style()
            .set_property("transform", css)
            .map_err(|e| js_err("style.transform", e))
    }

    fn scroll_top(&self, element: &web_sys::Element) -> Option<f64> {
        element
            .is_connected()
            .then(|| f64::from(element.scroll_top()))
    }

    fn viewport_height(&self) -> Option<f64> {
        self.window.inner_height().ok()?.as_f64()
    }
}

/// `requestAnimationFrame` / `cancelAnimationFrame`.
///
/// Each request owns a `Closure`; it is freed on cancel, or on the next request or cancel after it
/// has fired.
#[derive(Debug)]
pub struct RafScheduler {
    window: web_sys::Window,
    slots: CallbackSlots<Closure<dyn FnMut()>>,
}

impl RafScheduler {
    pub fn from_window() -> SoleilResult<Self> {
        let window = web_sys::window().ok_or_else(|| SoleilError::host("no global window"))?;
        Ok(Self {
            window,
            slots: CallbackSlots::new(),
        })
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, callback: FrameCallback) -> SoleilResult<FrameRequestId> {
        self.slots.purge();

        let own_id = Rc::new(Cell::new(None::<FrameRequestId>));
        let fired = self.slots.sink();
        let closure = {
            let own_id = Rc::clone(&own_id);
            let mut callback = Some(callback);
            Closure::wrap(Box::new(move || {
                if let Some(callback) = callback.take() {
                    callback();
                }
                if let Some(id) = own_id.get() {
                    fired.mark(id);
                }
            }) as Box<dyn FnMut()>)
        };

        let raw = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .map_err(|e| js_err("requestAnimationFrame", e))?;
        let id = FrameRequestId(u64::from(raw as u32));
        own_id.set(Some(id));
        self.slots.insert(id, closure);
        Ok(id)
    }

    fn cancel_frame(&self, id: FrameRequestId) {
        if let Err(e) = self.window.cancel_animation_frame(id.0 as i32) {
            tracing::warn!(error = ?e, "cancelAnimationFrame failed");
        }
        self.slots.cancel(id);
        self.slots.purge();
    }
}

/// JS-facing stop handle.
#[wasm_bindgen]
pub struct ParallaxHandle {
    inner: FrameLoopHandle,
}

#[wasm_bindgen]
impl ParallaxHandle {
    pub fn stop(&self) {
        self.inner.stop();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    #[wasm_bindgen(js_name = framesApplied)]
    pub fn frames_applied(&self) -> f64 {
        self.inner.frames_applied().0 as f64
    }
}

/// Starts the parallax effect with the built-in layer setup.
#[wasm_bindgen(js_name = initInfiniteParallax)]
pub fn init_infinite_parallax() -> Result<ParallaxHandle, JsValue> {
    start(&ParallaxConfig::default()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Starts the parallax effect from a JSON [`ParallaxConfig`].
#[wasm_bindgen(js_name = initInfiniteParallaxWithConfig)]
pub fn init_infinite_parallax_with_config(json: &str) -> Result<ParallaxHandle, JsValue> {
    ParallaxConfig::from_json_str(json)
        .and_then(|cfg| start(&cfg))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn start(config: &ParallaxConfig) -> SoleilResult<ParallaxHandle> {
    let mut document = WebDocument::from_window()?;
    let engine = ParallaxEngine::init(&mut document, config)?;
    let scheduler = Rc::new(RafScheduler::from_window()?);
    let inner = FrameLoop::start(engine, Rc::new(RefCell::new(document)), scheduler)?;
    Ok(ParallaxHandle { inner })
}
