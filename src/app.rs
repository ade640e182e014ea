use std::time::Instant;

use compact_str::CompactString;
use vello::Scene;

use crate::layout::{self, HeatmapConfig, HeatmapLayout};
use crate::market::HeatmapSnapshot;
use crate::render::scene::build_scene;
use crate::render::text::TextRenderer;
use crate::ui::input::{self, Hit, MouseState};
use crate::ui::resize::{ResizeDebouncer, ViewportSize};
use crate::ui::tooltip;

/// Inputs a layout was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LayoutKey {
    generation: u64,
    viewport: ViewportSize,
}

/// Top-level viewer state.
pub struct App {
    pub snapshot: HeatmapSnapshot,
    /// Bumped on every snapshot replacement
    generation: u64,

    pub config: HeatmapConfig,
    pub layout: Option<HeatmapLayout>,
    layout_key: Option<LayoutKey>,
    pub resize: ResizeDebouncer,

    // UI state
    pub mouse: MouseState,
    pub hover: Option<Hit>,
    pub selected_ticker: Option<CompactString>,

    // Rendering
    pub text_renderer: TextRenderer,
    pub scene: Scene,
}

impl App {
    pub fn new(snapshot: HeatmapSnapshot) -> Self {
        let mut text_renderer = TextRenderer::new();
        match text_renderer.load_system_font("default") {
            Ok(()) => tracing::info!("Loaded default system font for tile labels"),
            Err(e) => tracing::warn!("{:#}; tile labels will not be drawn", e),
        }

        Self {
            snapshot,
            generation: 0,
            config: HeatmapConfig::default(),
            layout: None,
            layout_key: None,
            resize: ResizeDebouncer::default(),
            mouse: MouseState::default(),
            hover: None,
            selected_ticker: None,
            text_renderer,
            scene: Scene::new(),
        }
    }

    /// Replace the data set; the next relayout recomputes.
    pub fn set_snapshot(&mut self, snapshot: HeatmapSnapshot) {
        self.snapshot = snapshot;
        self.generation += 1;
        self.hover = None;
    }

    pub fn viewport(&self) -> Option<ViewportSize> {
        self.resize.current()
    }

    /// First measurement after the window appears; not debounced.
    pub fn measure_viewport(&mut self, width: u32, height: u32) {
        self.resize.measure_now(ViewportSize::new(width, height));
    }

    /// Feed a window resize notification through the debouncer.
    /// Returns true if the viewport changed right away.
    pub fn notify_resize(&mut self, width: u32, height: u32, now: Instant) -> bool {
        self.resize
            .notify(ViewportSize::new(width, height), now)
            .is_some()
    }

    /// Returns true once a debounced resize has settled on a new size.
    pub fn poll_resize(&mut self, now: Instant) -> bool {
        self.resize.poll(now).is_some()
    }

    pub fn needs_relayout(&self) -> bool {
        self.current_key() != self.layout_key
    }

    fn current_key(&self) -> Option<LayoutKey> {
        self.viewport().map(|viewport| LayoutKey {
            generation: self.generation,
            viewport,
        })
    }

    /// Recompute the layout unless the (snapshot, viewport) pair is unchanged.
    /// Returns true if a new layout was computed.
    pub fn relayout(&mut self) -> bool {
        let Some(key) = self.current_key() else {
            return false;
        };
        if self.layout_key == Some(key) {
            return false;
        }

        tracing::info!(
            "Computing layout for {} sectors ({} stocks), viewport={}x{}",
            self.snapshot.sectors.len(),
            self.snapshot.stock_count(),
            key.viewport.width,
            key.viewport.height
        );
        let computed = layout::compute_heatmap_layout(
            &self.snapshot.sectors,
            key.viewport.width as f64,
            key.viewport.height as f64,
            &self.config,
        );
        self.layout = Some(computed);
        self.layout_key = Some(key);
        self.hover = self.hit_at_mouse();
        true
    }

    /// Rebuild the Vello scene from the current layout.
    pub fn rebuild_scene(&mut self) {
        let empty = HeatmapLayout::default();
        let layout = self.layout.as_ref().unwrap_or(&empty);
        build_scene(
            &mut self.scene,
            layout,
            &self.snapshot.sectors,
            self.hover,
            &mut self.text_renderer,
        );
    }

    fn hit_at_mouse(&self) -> Option<Hit> {
        self.layout
            .as_ref()
            .and_then(|layout| input::hit_test(layout, self.mouse.x, self.mouse.y))
    }

    /// Track the cursor. Returns true if the hovered tile changed.
    pub fn update_hover(&mut self, x: f32, y: f32) -> bool {
        self.mouse.x = x;
        self.mouse.y = y;
        let hit = self.hit_at_mouse();
        if hit == self.hover {
            return false;
        }
        self.hover = hit;
        true
    }

    pub fn hover_tooltip(&self) -> Option<String> {
        self.hover
            .and_then(|hit| tooltip::build_tooltip(&self.snapshot.sectors, hit))
    }

    /// Select the ticker under the cursor, if any.
    pub fn click(&mut self) -> Option<&str> {
        let Some(Hit::Stock { sector, stock }) = self.hover else {
            return None;
        };
        let ticker = self
            .snapshot
            .sectors
            .get(sector)?
            .stocks
            .get(stock)?
            .ticker
            .clone();
        tracing::info!("Selected ticker {}", ticker);
        self.selected_ticker = Some(ticker);
        self.selected_ticker.as_deref()
    }

    pub fn clear_selection(&mut self) {
        self.selected_ticker = None;
    }

    /// Window title: snapshot title plus hover details.
    pub fn title(&self) -> String {
        let base = self.snapshot.title();
        match self.hover_tooltip() {
            Some(tip) => format!("{} - {}", base, tip.replace('\n', " · ")),
            None => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::demo::demo_snapshot;
    use std::time::Duration;

    #[test]
    fn layout_is_memoized_on_snapshot_and_viewport() {
        let mut app = App::new(demo_snapshot());
        assert!(!app.relayout(), "no viewport measured yet");

        app.measure_viewport(1280, 800);
        assert!(app.needs_relayout());
        assert!(app.relayout());
        assert!(!app.needs_relayout());
        assert!(!app.relayout());

        app.set_snapshot(demo_snapshot());
        assert!(app.relayout());
        assert!(!app.relayout());
    }

    #[test]
    fn resize_only_relayouts_after_settling() {
        let mut app = App::new(demo_snapshot());
        let t0 = Instant::now();
        assert!(app.notify_resize(1000, 700, t0));
        assert!(app.relayout());

        assert!(!app.notify_resize(900, 700, t0 + Duration::from_millis(10)));
        assert!(!app.needs_relayout());
        assert!(!app.poll_resize(t0 + Duration::from_millis(50)));
        assert!(app.poll_resize(t0 + Duration::from_millis(200)));
        assert!(app.relayout());
        assert_eq!(app.layout.as_ref().unwrap().viewport.w, 900.0);
    }

    #[test]
    fn hover_and_click_select_ticker() {
        let mut app = App::new(demo_snapshot());
        app.measure_viewport(1280, 800);
        app.relayout();

        let tile = app.layout.as_ref().unwrap().sectors[0].stocks[0].clone();
        let (cx, cy) = (
            (tile.rect.x + tile.rect.w / 2.0) as f32,
            (tile.rect.y + tile.rect.h / 2.0) as f32,
        );
        assert!(app.update_hover(cx, cy));
        assert!(!app.update_hover(cx + 1.0, cy));

        let expected = app.snapshot.sectors[tile.sector].stocks[tile.stock].ticker.clone();
        assert_eq!(app.click(), Some(expected.as_str()));
        let title = app.title();
        assert!(title.contains(expected.as_str()));
        assert!(title.starts_with(&format!("{} - ", app.snapshot.title())), "{}", title);
        assert!(!title.contains('\u{2014}'));

        app.clear_selection();
        assert!(app.selected_ticker.is_none());
        assert!(app.update_hover(-10.0, -10.0));
        assert_eq!(app.click(), None);
    }
}
