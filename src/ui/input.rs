use crate::layout::HeatmapLayout;

/// Mouse state tracking.
#[derive(Debug, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
}

/// What lies under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hit {
    Stock { sector: usize, stock: usize },
    /// Sector header, or a sector drawn as a plain block
    Sector { sector: usize },
}

/// Hit-test: find the tile that contains the given point.
/// Floored tiles can overlap; the later (topmost drawn) one wins.
pub fn hit_test(layout: &HeatmapLayout, x: f32, y: f32) -> Option<Hit> {
    let (x, y) = (x as f64, y as f64);
    let sector = layout.sectors.iter().find(|s| s.rect.contains(x, y))?;

    if let Some(tile) = sector.stocks.iter().rev().find(|t| t.rect.contains(x, y)) {
        // Header band is drawn above the stock tiles
        let in_header = sector.header.map(|h| h.contains(x, y)).unwrap_or(false);
        if !in_header {
            return Some(Hit::Stock {
                sector: tile.sector,
                stock: tile.stock,
            });
        }
    }
    Some(Hit::Sector {
        sector: sector.sector,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute_heatmap_layout, HeatmapConfig};
    use crate::market::demo::demo_snapshot;

    #[test]
    fn finds_stock_header_and_nothing() {
        let snapshot = demo_snapshot();
        let layout =
            compute_heatmap_layout(&snapshot.sectors, 1280.0, 800.0, &HeatmapConfig::default());
        let first = &layout.sectors[0];
        let tile = &first.stocks[0];

        let cx = (tile.rect.x + tile.rect.w / 2.0) as f32;
        let cy = (tile.rect.y + tile.rect.h / 2.0) as f32;
        assert_eq!(
            hit_test(&layout, cx, cy),
            Some(Hit::Stock {
                sector: tile.sector,
                stock: tile.stock
            })
        );

        let header = first.header.unwrap();
        let hx = (header.x + 3.0) as f32;
        let hy = (header.y + 3.0) as f32;
        assert_eq!(hit_test(&layout, hx, hy), Some(Hit::Sector { sector: first.sector }));

        assert_eq!(hit_test(&layout, -5.0, 10.0), None);
        assert_eq!(hit_test(&layout, 10.0, 900.0), None);
    }
}
