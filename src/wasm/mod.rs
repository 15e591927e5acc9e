//! WASM bindings for the pager

use crate::document::{BlockNode, Flow};
use crate::input::{PagingMode, TapZone};
use crate::layout::{FontFamily, MeasureSurface, Typography, Viewport};
use crate::{Pager, PagerConfig, PagerError};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
extern "C" {
    /// Hidden off-screen container supplied by the host page.
    ///
    /// It must share the visible page's width, padding and typography so that
    /// measured heights match what the reader sees.
    pub type JsSurface;

    #[wasm_bindgen(method, js_name = clear)]
    fn js_clear(this: &JsSurface);

    /// Append a rendered copy of the block described by `node_json`
    #[wasm_bindgen(method, js_name = append)]
    fn js_append(this: &JsSurface, node_json: &str);

    #[wasm_bindgen(method, js_name = removeLast)]
    fn js_remove_last(this: &JsSurface);

    /// Synchronous height read; forces a reflow
    #[wasm_bindgen(method, js_name = contentHeight)]
    fn js_content_height(this: &JsSurface) -> f64;

    #[wasm_bindgen(method, js_name = setViewport)]
    fn js_set_viewport(this: &JsSurface, width: f32, height: f32);

    #[wasm_bindgen(method, js_name = applyTypography)]
    fn js_apply_typography(this: &JsSurface, font_size_px: f32, family: &str);
}

impl MeasureSurface for JsSurface {
    fn clear(&mut self) {
        self.js_clear();
    }

    fn push(&mut self, node: &BlockNode) {
        match serde_json::to_string(node) {
            Ok(json) => self.js_append(&json),
            Err(e) => log::warn!("failed to serialize block for measuring: {}", e),
        }
    }

    fn pop(&mut self) {
        self.js_remove_last();
    }

    fn content_height(&mut self) -> f32 {
        self.js_content_height() as f32
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.js_set_viewport(viewport.width, viewport.height);
    }

    fn set_typography(&mut self, typography: &Typography) {
        let family = match typography.family {
            FontFamily::Serif => "serif",
            FontFamily::Sans => "sans",
        };
        self.js_apply_typography(typography.font_size_px, family);
    }
}

fn to_js(err: PagerError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// WASM-exposed pager wrapper.
///
/// Every state change queues render patches; the host drains them with
/// `takePatches` and applies them to the visible track.
#[wasm_bindgen]
pub struct WasmPager {
    pager: Pager<JsSurface>,
}

#[wasm_bindgen]
impl WasmPager {
    /// Create a pager over `blocks_json` and run the first layout.
    ///
    /// A missing surface yields an inert pager.
    #[wasm_bindgen(constructor)]
    pub fn new(
        surface: Option<JsSurface>,
        blocks_json: &str,
        width: f32,
        height: f32,
        config_json: Option<String>,
    ) -> Result<WasmPager, JsValue> {
        let flow = Flow::from_json(blocks_json).map_err(to_js)?;
        let config = match config_json {
            Some(json) => PagerConfig::from_json(&json).map_err(to_js)?,
            None => PagerConfig::default(),
        };
        let mut surface = surface;
        if let Some(surface) = surface.as_mut() {
            surface.set_typography(&config.typography);
        }
        let viewport = Viewport::new(width, height);
        let pager = Pager::new(surface, flow, viewport, config, now_ms());
        Ok(Self { pager })
    }

    pub fn next(&mut self) {
        self.pager.next();
    }

    pub fn previous(&mut self) {
        self.pager.previous();
    }

    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&mut self, index: usize, animate: bool) {
        self.pager.go_to(index, animate);
    }

    /// Jump to a fragment such as `#toc-3`; false when unknown
    #[wasm_bindgen(js_name = goToAnchor)]
    pub fn go_to_anchor(&mut self, fragment: &str) -> bool {
        self.pager.tick(now_ms());
        self.pager.go_to_anchor(fragment)
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32) -> bool {
        self.pager.pointer_down(x)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32) {
        self.pager.pointer_move(x);
    }

    /// `x` is absent for touch end
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: Option<f32>) {
        self.pager.pointer_up(x);
    }

    /// Tap a named zone (`prev` or `next`)
    pub fn tap(&mut self, zone: &str) -> Result<(), JsValue> {
        let zone = TapZone::from_name(zone)
            .ok_or_else(|| to_js(PagerError::UnknownTapZone(zone.to_string())))?;
        self.pager.tap(zone);
        Ok(())
    }

    #[wasm_bindgen(js_name = tapAt)]
    pub fn tap_at(&mut self, x: f32) {
        self.pager.tap_at(x);
    }

    /// Returns true when the key was handled and its default should be prevented
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str) -> bool {
        self.pager.key_down(key)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.pager.resize(now_ms(), Viewport::new(width, height));
    }

    /// Drive timers; call from `requestAnimationFrame` or a short interval
    pub fn tick(&mut self, now_ms: f64) {
        self.pager.tick(now_ms);
    }

    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = PagingMode::from_name(mode).map_err(to_js)?;
        self.pager.set_mode(mode);
        Ok(())
    }

    #[wasm_bindgen(js_name = setFontSize)]
    pub fn set_font_size(&mut self, font_size_px: f32) {
        let typography = Typography {
            font_size_px,
            ..self.pager.config().typography
        };
        self.pager.set_typography(typography);
    }

    #[wasm_bindgen(js_name = setReadingFont)]
    pub fn set_reading_font(&mut self, family: &str) -> Result<(), JsValue> {
        let family = FontFamily::from_name(family)
            .ok_or_else(|| to_js(PagerError::UnknownFont(family.to_string())))?;
        let typography = Typography {
            family,
            ..self.pager.config().typography
        };
        self.pager.set_typography(typography);
        Ok(())
    }

    /// Replace the document
    #[wasm_bindgen(js_name = loadBlocks)]
    pub fn load_blocks(&mut self, blocks_json: &str) -> Result<(), JsValue> {
        let flow = Flow::from_json(blocks_json).map_err(to_js)?;
        self.pager.set_flow(flow);
        Ok(())
    }

    pub fn relayout(&mut self) {
        self.pager.relayout();
    }

    #[wasm_bindgen(js_name = pageCount)]
    pub fn page_count(&self) -> usize {
        self.pager.page_count()
    }

    #[wasm_bindgen(js_name = currentPage)]
    pub fn current_page(&self) -> usize {
        self.pager.current_page()
    }

    /// Indicator text such as `3 / 12`
    #[wasm_bindgen(js_name = indicatorText)]
    pub fn indicator_text(&self) -> String {
        let (current, total) = self.pager.indicator();
        format!("{} / {}", current, total)
    }

    #[wasm_bindgen(js_name = isAttached)]
    pub fn is_attached(&self) -> bool {
        self.pager.is_attached()
    }

    /// Page contents for rendering (JSON)
    #[wasm_bindgen(js_name = pagesJson)]
    pub fn pages_json(&self) -> String {
        self.pager.display_list().to_json()
    }

    /// Table of contents with resolved pages (JSON)
    #[wasm_bindgen(js_name = tocJson)]
    pub fn toc_json(&self) -> String {
        serde_json::to_string(&self.pager.table_of_contents()).unwrap_or_else(|e| {
            log::warn!("failed to serialize table of contents: {}", e);
            String::from("[]")
        })
    }

    /// Drain queued render patches (JSON)
    #[wasm_bindgen(js_name = takePatches)]
    pub fn take_patches(&mut self) -> String {
        self.pager.take_patches().to_json()
    }
}
