pub mod color;
pub mod dampen;
pub mod squarify;
pub mod visibility;

use crate::market::{Sector, Stock};

pub use color::{change_colors, AppColor, ColorScale, TileColors};
pub use dampen::{dampen, DampenConfig};
pub use squarify::{squarify, LayoutItem, Placed};
pub use visibility::{tier_for, Visibility, VisibilityThresholds};

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Area shared with `other` (0 when they only touch).
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }
}

/// Configuration for the two-level heatmap layout.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapConfig {
    pub dampen: DampenConfig,
    pub colors: ColorScale,
    pub visibility: VisibilityThresholds,
    /// Band reserved at the top of each sector for its name and change (px)
    pub header_height: f64,
    /// Below this content size a sector is drawn as a plain block (px)
    pub min_content_width: f64,
    pub min_content_height: f64,
    /// Minimum tile edge at sector level (px)
    pub sector_min_tile: f64,
    /// Minimum tile edge at stock level (px)
    pub stock_min_tile: f64,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            dampen: DampenConfig::default(),
            colors: ColorScale::default(),
            visibility: VisibilityThresholds::default(),
            header_height: 16.0,
            min_content_width: 40.0,
            min_content_height: 14.0, // sector at least 30px tall with the header
            sector_min_tile: 0.0,
            stock_min_tile: 8.0,
        }
    }
}

/// A stock tile, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct StockTile {
    /// Index into the laid-out sector slice
    pub sector: usize,
    /// Index into that sector's `stocks`
    pub stock: usize,
    pub rect: Rect,
    pub colors: TileColors,
    pub visibility: Visibility,
}

/// A sector region and the stock tiles inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorTile {
    pub sector: usize,
    pub rect: Rect,
    /// Header band and content area; `None` for sectors too small to label.
    pub header: Option<Rect>,
    pub content: Option<Rect>,
    pub stocks: Vec<StockTile>,
}

impl SectorTile {
    pub fn is_labeled(&self) -> bool {
        self.header.is_some()
    }
}

/// The full layout result for one (sectors, viewport) pair.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeatmapLayout {
    pub viewport: Rect,
    pub sectors: Vec<SectorTile>,
}

impl HeatmapLayout {
    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    pub fn stock_tiles(&self) -> impl Iterator<Item = &StockTile> {
        self.sectors.iter().flat_map(|s| s.stocks.iter())
    }
}

/// Compute the heatmap layout with dampened market caps as mass.
///
/// Pure and deterministic: callers recompute whenever the sectors or the
/// viewport change and may memoize on that pair otherwise.
pub fn compute_heatmap_layout(
    sectors: &[Sector],
    viewport_w: f64,
    viewport_h: f64,
    config: &HeatmapConfig,
) -> HeatmapLayout {
    compute_heatmap_layout_with(sectors, viewport_w, viewport_h, config, |stock| {
        config.dampen.dampen(stock.market_cap)
    })
}

/// Two-pass layout with a caller-supplied stock mass.
///
/// The first pass splits the viewport between sectors by their summed stock mass,
/// the second splits each sector's content area (below the header) between its stocks.
pub fn compute_heatmap_layout_with<F>(
    sectors: &[Sector],
    viewport_w: f64,
    viewport_h: f64,
    config: &HeatmapConfig,
    mass: F,
) -> HeatmapLayout
where
    F: Fn(&Stock) -> f64,
{
    let viewport = Rect::new(0.0, 0.0, viewport_w.max(0.0), viewport_h.max(0.0));
    if viewport.area() <= 0.0 || sectors.is_empty() {
        tracing::debug!(
            "Empty heatmap layout ({} sectors, viewport {:.0}x{:.0})",
            sectors.len(),
            viewport.w,
            viewport.h
        );
        return HeatmapLayout {
            viewport,
            sectors: Vec::new(),
        };
    }

    let sector_items: Vec<LayoutItem<usize>> = sectors
        .iter()
        .enumerate()
        .map(|(i, sector)| LayoutItem::new(i, sector.stocks.iter().map(&mass).sum()))
        .collect();

    let placed = squarify(sector_items, viewport, config.sector_min_tile);
    let tiles: Vec<SectorTile> = placed
        .into_iter()
        .map(|p| layout_sector(p.data, &sectors[p.data], p.rect, config, &mass))
        .collect();

    tracing::info!(
        "Heatmap layout: {} of {} sectors, {} stock tiles in {:.0}x{:.0}",
        tiles.len(),
        sectors.len(),
        tiles.iter().map(|t| t.stocks.len()).sum::<usize>(),
        viewport.w,
        viewport.h
    );

    HeatmapLayout {
        viewport,
        sectors: tiles,
    }
}

fn layout_sector<F>(
    index: usize,
    sector: &Sector,
    rect: Rect,
    config: &HeatmapConfig,
    mass: &F,
) -> SectorTile
where
    F: Fn(&Stock) -> f64,
{
    let content = Rect {
        x: rect.x,
        y: rect.y + config.header_height,
        w: rect.w,
        h: (rect.h - config.header_height).max(0.0),
    };

    if content.w < config.min_content_width || content.h < config.min_content_height {
        tracing::debug!(
            "Sector '{}' too small for tiles ({:.1}x{:.1}), drawing as block",
            sector.name,
            rect.w,
            rect.h
        );
        return SectorTile {
            sector: index,
            rect,
            header: None,
            content: None,
            stocks: Vec::new(),
        };
    }

    let stock_items: Vec<LayoutItem<usize>> = sector
        .stocks
        .iter()
        .enumerate()
        .map(|(j, stock)| LayoutItem::new(j, mass(stock)))
        .collect();

    // Stocks are laid out in content-local coordinates, then moved into place
    let local = Rect::new(0.0, 0.0, content.w, content.h);
    let stocks = squarify(stock_items, local, config.stock_min_tile)
        .into_iter()
        .map(|p| {
            let stock = &sector.stocks[p.data];
            let rect = p.rect.translate(content.x, content.y);
            StockTile {
                sector: index,
                stock: p.data,
                rect,
                colors: config.colors.change_colors(stock.change),
                visibility: config.visibility.tier_for(&rect),
            }
        })
        .collect();

    SectorTile {
        sector: index,
        rect,
        header: Some(Rect::new(rect.x, rect.y, rect.w, config.header_height.min(rect.h))),
        content: Some(content),
        stocks,
    }
}
