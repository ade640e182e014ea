/// Diagnostic tool to verify snapshot → layout → tile pipeline
use std::path::PathBuf;

use anyhow::Context;
use sector_heatmap::layout::{compute_heatmap_layout, HeatmapConfig};
use sector_heatmap::market;
use sector_heatmap::ui::tooltip::format_change;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sector_heatmap=debug".parse()?),
        )
        .init();

    // debug-layout [snapshot.json] [width] [height]
    let mut args = std::env::args().skip(1);
    let snapshot = match args.next() {
        Some(path) if path != "-" => market::load_snapshot(&PathBuf::from(path))?,
        _ => market::demo::demo_snapshot(),
    };
    let width: f64 = args
        .next()
        .map(|w| w.parse::<f64>())
        .transpose()
        .context("width must be a number")?
        .unwrap_or(1920.0);
    let height: f64 = args
        .next()
        .map(|h| h.parse::<f64>())
        .transpose()
        .context("height must be a number")?
        .unwrap_or(1080.0);

    println!("=== DIAGNOSTIC: Snapshot → Layout Pipeline ===");
    println!(
        "\n[1] {}: {} sectors, {} stocks (generated_at='{}')",
        snapshot.title(),
        snapshot.sectors.len(),
        snapshot.stock_count(),
        snapshot.generated_at
    );

    let config = HeatmapConfig::default();
    println!("\n[2] Sector masses (dampened):");
    for sector in &snapshot.sectors {
        let mass: f64 = sector
            .stocks
            .iter()
            .map(|s| config.dampen.dampen(s.market_cap))
            .sum();
        let unknown = sector.stocks.iter().filter(|s| s.market_cap.is_none()).count();
        println!(
            "    '{}' {} - mass {:.1} ({} stocks, {} without cap)",
            sector.name,
            format_change(sector.change),
            mass,
            sector.stocks.len(),
            unknown
        );
    }

    let layout = compute_heatmap_layout(&snapshot.sectors, width, height, &config);
    println!(
        "\n[3] Layout computed in {:.0}x{:.0}: {} sectors, {} stock tiles",
        width,
        height,
        layout.sectors.len(),
        layout.stock_tiles().count()
    );

    println!("\n[4] Sector regions:");
    for tile in &layout.sectors {
        let sector = &snapshot.sectors[tile.sector];
        println!(
            "    '{}' - {:.1}x{:.1} at ({:.1}, {:.1}){}",
            sector.name,
            tile.rect.w,
            tile.rect.h,
            tile.rect.x,
            tile.rect.y,
            if tile.is_labeled() { "" } else { " [unlabeled block]" }
        );
    }

    println!("\n[5] Top 10 largest stock tiles by area:");
    let mut tiles: Vec<_> = layout.stock_tiles().collect();
    tiles.sort_by(|a, b| b.rect.area().total_cmp(&a.rect.area()));
    for (i, tile) in tiles.iter().take(10).enumerate() {
        let stock = &snapshot.sectors[tile.sector].stocks[tile.stock];
        let v = tile.visibility;
        println!(
            "    [{}] {} - {:.1}x{:.1} ({:.0}px²) at ({:.1}, {:.1}) {} fonts {:.1}/{:.1} tiers {}{}{}",
            i,
            stock.ticker,
            tile.rect.w,
            tile.rect.h,
            tile.rect.area(),
            tile.rect.x,
            tile.rect.y,
            format_change(stock.change),
            v.identifier_font_size,
            v.delta_font_size,
            if v.show_identifier { "T" } else { "-" },
            if v.show_delta { "D" } else { "-" },
            if v.show_name { "N" } else { "-" },
        );
    }

    println!("\n[6] Checking for anomalies:");
    let sector_area: f64 = layout.sectors.iter().map(|s| s.rect.area()).sum();
    let viewport_area = width * height;
    println!("    Sector area:   {:.0}px²", sector_area);
    println!("    Viewport area: {:.0}px²", viewport_area);
    if viewport_area > 0.0 {
        println!("    Coverage: {:.2}%", sector_area / viewport_area * 100.0);
    }

    let mut overlaps = 0usize;
    for sector in &layout.sectors {
        for (i, a) in sector.stocks.iter().enumerate() {
            overlaps += sector.stocks[i + 1..]
                .iter()
                .filter(|b| a.rect.intersection_area(&b.rect) > 1e-6)
                .count();
        }
    }
    println!("    Overlapping stock tile pairs (min-size floor): {}", overlaps);

    let hidden = layout
        .stock_tiles()
        .filter(|t| !t.visibility.show_identifier)
        .count();
    println!("    Tiles too small for a ticker: {}", hidden);

    Ok(())
}
