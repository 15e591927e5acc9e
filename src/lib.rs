//! Flow-Pager: paginated reading core
//!
//! This crate turns a linear flow of block nodes into viewport-sized pages:
//! - Measured layout against a live container, splitting oversized paragraphs
//!   with a logarithmic number of reflow probes
//! - Anchor index mapping chapter ids to the page that holds them
//! - Page transport with clamped navigation, highlights and fragment updates
//! - Swipe, tap and keyboard input plus debounced resize re-layout

pub mod config;
pub mod document;
pub mod error;
pub mod input;
pub mod layout;
pub mod navigation;
pub mod render;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::{JsSurface, WasmPager};

// Re-export primary types
pub use config::PagerConfig;
pub use document::{AnchorId, BlockKind, BlockNode, Flow, TocEntry};
pub use error::PagerError;
pub use input::{GestureController, NavIntent, NavKey, PagingMode, ResizeDebouncer, TapZone};
pub use layout::{
    AnchorIndex, FontFamily, LayoutEngine, MeasureSurface, MetricsSurface, Page, Pagination,
    Typography, Viewport,
};
pub use navigation::Transport;
pub use render::{DisplayList, RenderDiff, RenderPatch, TocView};

/// The reading pager: owns the layout result, the page transport and the
/// input state for one document.
///
/// Without a surface the pager is inert and every operation is a no-op.
pub struct Pager<S: MeasureSurface = MetricsSurface> {
    flow: Flow,
    surface: Option<S>,
    viewport: Viewport,
    config: PagerConfig,
    engine: LayoutEngine,
    pagination: Pagination,
    transport: Transport,
    gestures: GestureController,
    resize: ResizeDebouncer,
    /// Last time reported by the host
    clock_ms: f64,
    /// Layout generation
    version: u64,
    outbox: RenderDiff,
}

impl<S: MeasureSurface> Pager<S> {
    /// Create a pager and run the initial layout.
    ///
    /// The surface must already be styled with `config.typography`. The
    /// starting anchor, if configured, is resolved once here at `now_ms`.
    pub fn new(
        surface: Option<S>,
        flow: Flow,
        viewport: Viewport,
        config: PagerConfig,
        now_ms: f64,
    ) -> Self {
        let mut pager = Self {
            flow,
            surface,
            viewport,
            engine: LayoutEngine::new(),
            pagination: Pagination::default(),
            transport: Transport::new(config.highlight_ms),
            gestures: GestureController::new(config.paging_mode, config.swipe),
            resize: ResizeDebouncer::new(config.resize_debounce_ms),
            clock_ms: now_ms,
            version: 0,
            outbox: RenderDiff::default(),
            config,
        };

        let Some(surface) = pager.surface.as_mut() else {
            log::warn!("pager created without a surface; all operations are no-ops");
            return pager;
        };
        surface.set_viewport(viewport);

        pager.outbox.add_patch(RenderPatch::ModeChanged {
            mode: pager.config.paging_mode,
        });
        pager.relayout();

        if let Some(anchor) = pager.config.starting_anchor.clone() {
            pager.go_to_anchor(&anchor);
        }
        pager
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Discard all pages and lay the flow out again from scratch.
    ///
    /// Resets to page 0 with a non-animated snap.
    pub fn relayout(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        self.gestures.cancel();
        self.pagination = self.engine.layout(&self.flow, surface, self.viewport.height);
        self.version += 1;
        self.outbox.version = self.version;

        let total = self.pagination.page_count();
        self.outbox.add_patch(RenderPatch::PagesRebuilt { total });
        self.transport.reset(total, &mut self.outbox);
    }

    /// Replace the document and re-lay out
    pub fn set_flow(&mut self, flow: Flow) {
        self.flow = flow;
        self.relayout();
    }

    pub fn go_to(&mut self, index: usize, animate: bool) {
        if self.is_attached() {
            self.transport.go_to(index, animate, &mut self.outbox);
        }
    }

    pub fn next(&mut self) {
        if self.is_attached() {
            self.transport.next(&mut self.outbox);
        }
    }

    pub fn previous(&mut self) {
        if self.is_attached() {
            self.transport.previous(&mut self.outbox);
        }
    }

    /// Jump to the page holding `fragment`; unknown ids are ignored
    pub fn go_to_anchor(&mut self, fragment: &str) -> bool {
        if !self.is_attached() {
            return false;
        }
        self.transport.go_to_anchor(
            fragment,
            self.pagination.anchors(),
            self.clock_ms,
            &mut self.outbox,
        )
    }

    /// Carry out a navigation intent from any input source
    pub fn apply_intent(&mut self, intent: NavIntent) {
        match intent {
            NavIntent::Next => self.next(),
            NavIntent::Previous => self.previous(),
            NavIntent::SnapBack => self.go_to(self.transport.current(), true),
        }
    }

    pub fn pointer_down(&mut self, x: f32) -> bool {
        self.is_attached() && self.gestures.pointer_down(x, self.transport.current())
    }

    pub fn pointer_move(&mut self, x: f32) {
        if let Some((base_page, delta)) = self.gestures.pointer_move(x) {
            self.transport.track_drag(base_page, delta, &mut self.outbox);
        }
    }

    pub fn pointer_up(&mut self, x: Option<f32>) {
        if let Some(intent) = self.gestures.pointer_up(x, self.viewport.width) {
            self.apply_intent(intent);
        }
    }

    pub fn tap(&mut self, zone: TapZone) {
        self.apply_intent(zone.intent());
    }

    /// Tap at a horizontal position inside the viewport
    pub fn tap_at(&mut self, x: f32) {
        self.tap(TapZone::at(x, self.viewport.width));
    }

    pub fn key(&mut self, key: NavKey) {
        self.apply_intent(key.intent());
    }

    /// Handle a DOM key name; returns whether the key was consumed
    pub fn key_down(&mut self, key: &str) -> bool {
        match NavKey::from_dom_key(key) {
            Some(key) => {
                self.key(key);
                true
            }
            None => false,
        }
    }

    /// Record a viewport resize; re-layout happens on a later `tick`
    pub fn resize(&mut self, now_ms: f64, viewport: Viewport) {
        self.clock_ms = now_ms;
        if self.is_attached() {
            self.resize.schedule(now_ms, viewport);
        }
    }

    /// Advance timers: expire highlights and fire a debounced resize
    pub fn tick(&mut self, now_ms: f64) {
        self.clock_ms = now_ms;
        self.transport.expire_highlight(now_ms, &mut self.outbox);

        if let Some(viewport) = self.resize.poll(now_ms) {
            self.viewport = viewport;
            if let Some(surface) = self.surface.as_mut() {
                surface.set_viewport(viewport);
            }
            self.relayout();
        }
    }

    pub fn set_mode(&mut self, mode: PagingMode) {
        if !self.is_attached() || mode == self.gestures.mode() {
            return;
        }
        self.gestures.set_mode(mode);
        self.config.paging_mode = mode;
        // A drag may have left the track offset
        self.transport.track_drag(self.transport.current(), 0.0, &mut self.outbox);
        self.outbox.add_patch(RenderPatch::ModeChanged { mode });
    }

    /// Change font size or family; always re-lays out
    pub fn set_typography(&mut self, typography: Typography) {
        let typography = typography.clamped();
        self.config.typography = typography;
        if let Some(surface) = self.surface.as_mut() {
            surface.set_typography(&typography);
        }
        self.relayout();
    }

    pub fn current_page(&self) -> usize {
        self.transport.current()
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count()
    }

    /// 1-based current page and total
    pub fn indicator(&self) -> (usize, usize) {
        self.transport.indicator()
    }

    pub fn pages(&self) -> &[Page] {
        self.pagination.pages()
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn anchors(&self) -> &AnchorIndex {
        self.pagination.anchors()
    }

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn mode(&self) -> PagingMode {
        self.gestures.mode()
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Headings with their current pages
    pub fn table_of_contents(&self) -> Vec<TocView> {
        let attached = self.is_attached();
        self.flow
            .table_of_contents()
            .into_iter()
            .map(|entry| TocView {
                page: attached
                    .then(|| self.pagination.anchors().page_of(&entry.anchor))
                    .flatten(),
                entry,
            })
            .collect()
    }

    pub fn display_list(&self) -> DisplayList<'_> {
        DisplayList::build(&self.pagination, self.version)
    }

    /// Drain patches accumulated since the last call
    pub fn take_patches(&mut self) -> RenderDiff {
        self.outbox.take()
    }
}
