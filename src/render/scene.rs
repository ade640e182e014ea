use std::sync::Arc;

use vello::kurbo::{self, Affine, Stroke};
use vello::peniko::{Blob, Fill, Image, ImageFormat, Mix};
use vello::Scene;

use super::colors::{self, AppColor, TileColors};
use super::text::{truncate_label, TextRenderResult, TextRenderer};
use crate::layout::{HeatmapLayout, Rect, SectorTile, StockTile};
use crate::market::Sector;
use crate::ui::input::Hit;
use crate::ui::tooltip::format_change;

const FONT: &str = "default";
const HEADER_FONT_SIZE: f32 = 9.0;
const HEADER_PAD_X: f64 = 6.0;
const LINE_GAP: f64 = 2.0;
const WHITE: AppColor = AppColor::new(1.0, 1.0, 1.0);

/// Build a Vello scene from the heatmap layout.
pub fn build_scene(
    scene: &mut Scene,
    layout: &HeatmapLayout,
    sectors: &[Sector],
    hover: Option<Hit>,
    text_renderer: &mut TextRenderer,
) {
    scene.reset();
    fill_rect(scene, &layout.viewport, colors::CANVAS);

    if layout.is_empty() {
        draw_centered_line(
            scene,
            text_renderer,
            &layout.viewport,
            "No data available",
            14.0,
            WHITE.with_alpha(0.6),
        );
        return;
    }

    for tile in &layout.sectors {
        let Some(sector) = sectors.get(tile.sector) else {
            tracing::warn!("Layout references missing sector {}", tile.sector);
            continue;
        };

        if !tile.is_labeled() {
            draw_tile(scene, &tile.rect, colors::SECTOR_BLOCK, 0.5);
            continue;
        }

        // Floored tiles may spill past the sector; keep them inside it
        scene.push_layer(Mix::Clip, 1.0, Affine::IDENTITY, &to_kurbo(&tile.rect));
        for stock_tile in &tile.stocks {
            let hovered = hover
                == Some(Hit::Stock {
                    sector: stock_tile.sector,
                    stock: stock_tile.stock,
                });
            draw_stock(scene, text_renderer, sector, stock_tile, hovered);
        }
        scene.pop_layer();
        draw_sector_header(scene, text_renderer, sector, tile);
    }
}

fn draw_stock(
    scene: &mut Scene,
    text_renderer: &mut TextRenderer,
    sector: &Sector,
    tile: &StockTile,
    hovered: bool,
) {
    let Some(stock) = sector.stocks.get(tile.stock) else {
        return;
    };

    let mut tile_colors = tile.colors;
    if hovered {
        tile_colors.fill = tile_colors.fill.lighten(0.15);
    }
    draw_tile(scene, &tile.rect, tile_colors, 1.0);

    let vis = tile.visibility;
    if !vis.show_identifier {
        return;
    }

    let max_w = (tile.rect.w * 0.95) as f32;
    let mut lines: Vec<TextRenderResult> = Vec::with_capacity(3);
    if let Some(line) = text_renderer.render_text(
        &stock.ticker,
        FONT,
        vis.identifier_font_size as f32,
        WHITE,
        None,
    ) {
        lines.push(line);
    }
    if vis.show_delta {
        if let Some(line) = text_renderer.render_text(
            &format_change(stock.change),
            FONT,
            vis.delta_font_size as f32,
            WHITE.with_alpha(0.95),
            None,
        ) {
            lines.push(line);
        }
    }
    if vis.show_name {
        let name = truncate_label(&stock.name, max_w, vis.name_font_size as f32);
        if !name.is_empty() {
            if let Some(line) = text_renderer.render_text(
                &name,
                FONT,
                vis.name_font_size as f32,
                WHITE.with_alpha(0.8),
                None,
            ) {
                lines.push(line);
            }
        }
    }

    draw_stacked_lines(scene, lines, &tile.rect);
}

fn draw_sector_header(
    scene: &mut Scene,
    text_renderer: &mut TextRenderer,
    sector: &Sector,
    tile: &SectorTile,
) {
    let Some(header) = tile.header else {
        return;
    };
    fill_rect(scene, &header, colors::SECTOR_HEADER);

    let change_text = format_change(sector.change);
    let change = text_renderer.render_text(
        &change_text,
        FONT,
        HEADER_FONT_SIZE,
        colors::sector_change_text(sector.change),
        None,
    );
    let change_w = change.as_ref().map(|c| c.width as f64).unwrap_or(0.0);

    let name_room = (header.w - HEADER_PAD_X * 2.0 - change_w - 4.0) as f32;
    let name = truncate_label(&sector.name, name_room, HEADER_FONT_SIZE);
    if !name.is_empty() {
        if let Some(line) =
            text_renderer.render_text(&name, FONT, HEADER_FONT_SIZE, colors::SECTOR_TITLE, None)
        {
            let y = header.y + (header.h - line.height as f64) / 2.0;
            draw_text_to_scene(scene, line, header.x + HEADER_PAD_X, y);
        }
    }

    if let Some(line) = change {
        if change_w + HEADER_PAD_X * 2.0 <= header.w {
            let x = header.right() - HEADER_PAD_X - change_w;
            let y = header.y + (header.h - line.height as f64) / 2.0;
            draw_text_to_scene(scene, line, x, y);
        }
    }
}

/// Center a column of text lines inside `rect`.
fn draw_stacked_lines(scene: &mut Scene, lines: Vec<TextRenderResult>, rect: &Rect) {
    if lines.is_empty() {
        return;
    }
    let total_h: f64 = lines.iter().map(|l| l.height as f64).sum::<f64>()
        + LINE_GAP * (lines.len() - 1) as f64;
    let mut y = rect.y + (rect.h - total_h) / 2.0;
    for line in lines {
        let h = line.height as f64;
        let x = rect.x + (rect.w - line.width as f64) / 2.0;
        draw_text_to_scene(scene, line, x, y);
        y += h + LINE_GAP;
    }
}

fn draw_centered_line(
    scene: &mut Scene,
    text_renderer: &mut TextRenderer,
    rect: &Rect,
    text: &str,
    font_size: f32,
    color: AppColor,
) {
    if let Some(line) = text_renderer.render_text(text, FONT, font_size, color, None) {
        draw_stacked_lines(scene, vec![line], rect);
    }
}

fn to_kurbo(rect: &Rect) -> kurbo::Rect {
    kurbo::Rect::new(rect.x, rect.y, rect.right(), rect.bottom())
}

fn fill_rect(scene: &mut Scene, rect: &Rect, color: AppColor) {
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        colors::to_peniko(color),
        None,
        &to_kurbo(rect),
    );
}

/// Fill plus an inset border of `border_width`.
fn draw_tile(scene: &mut Scene, rect: &Rect, tile_colors: TileColors, border_width: f64) {
    fill_rect(scene, rect, tile_colors.fill);
    let inset = border_width / 2.0;
    if rect.w > border_width && rect.h > border_width {
        let border = kurbo::Rect::new(
            rect.x + inset,
            rect.y + inset,
            rect.right() - inset,
            rect.bottom() - inset,
        );
        scene.stroke(
            &Stroke::new(border_width),
            Affine::IDENTITY,
            colors::to_peniko(tile_colors.border),
            None,
            &border,
        );
    }
}

/// Draw rendered text to a Vello scene.
fn draw_text_to_scene(scene: &mut Scene, text_result: TextRenderResult, x: f64, y: f64) {
    for glyph in text_result.glyphs {
        if glyph.bitmap.is_empty() {
            continue;
        }

        let glyph_image = Image::new(
            Blob::new(Arc::new(glyph.bitmap)),
            ImageFormat::Rgba8,
            glyph.width as u32,
            glyph.height as u32,
        );

        let transform = Affine::translate((x + glyph.x as f64, y + glyph.y as f64));
        scene.draw_image(&glyph_image, transform);
    }
}
