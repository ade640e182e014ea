use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};
use fontdue::Font;

use super::colors::AppColor;

pub struct TextRenderer {
    fonts: HashMap<String, Font>,
    layout: Layout,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            fonts: HashMap::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }

    pub fn has_font(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    pub fn load_font_from_path(&mut self, name: &str, path: &Path) -> Result<()> {
        let font_data =
            std::fs::read(path).with_context(|| format!("failed to read font {}", path.display()))?;
        let font = Font::from_bytes(font_data, fontdue::FontSettings::default())
            .map_err(|e| anyhow!("failed to parse font {}: {}", path.display(), e))?;
        self.fonts.insert(name.to_string(), font);
        tracing::info!("Loaded text font from {}", path.display());
        Ok(())
    }

    pub fn load_system_font(&mut self, name: &str) -> Result<()> {
        let mut candidates: Vec<PathBuf> = Vec::new();

        if let Ok(windir) = std::env::var("WINDIR") {
            candidates.push(PathBuf::from(format!("{windir}\\Fonts\\segoeui.ttf")));
            candidates.push(PathBuf::from(format!("{windir}\\Fonts\\arial.ttf")));
        }
        candidates.push(PathBuf::from("/System/Library/Fonts/Supplemental/Arial.ttf"));
        candidates.push(PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"));
        candidates.push(PathBuf::from("/usr/share/fonts/TTF/DejaVuSans.ttf"));
        candidates.push(PathBuf::from("/usr/share/fonts/dejavu/DejaVuSans.ttf"));

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match self.load_font_from_path(name, &path) {
                Ok(()) => return Ok(()),
                Err(e) => tracing::debug!("Skipping font candidate: {:#}", e),
            }
        }

        Err(anyhow!("unable to load a system font from known locations"))
    }

    /// Rasterize a single line of text tinted with `color`.
    pub fn render_text(
        &mut self,
        text: &str,
        font_name: &str,
        font_size: f32,
        color: AppColor,
        max_width: Option<f32>,
    ) -> Option<TextRenderResult> {
        let font = self.fonts.get(font_name)?;

        self.layout.reset(&LayoutSettings {
            max_width,
            ..Default::default()
        });
        self.layout
            .append(&[font], &TextStyle::new(text, font_size, 0));

        let tint = [
            (color.r.clamp(0.0, 1.0) * 255.0) as u8,
            (color.g.clamp(0.0, 1.0) * 255.0) as u8,
            (color.b.clamp(0.0, 1.0) * 255.0) as u8,
        ];
        let alpha = color.a.clamp(0.0, 1.0);

        let mut glyphs = Vec::new();
        let mut width: f32 = 0.0;
        let mut height: f32 = 0.0;

        for glyph in self.layout.glyphs() {
            let (metrics, bitmap) = font.rasterize_config(GlyphRasterConfig {
                glyph_index: glyph.key.glyph_index,
                px: font_size,
                font_hash: 0,
            });

            // Grayscale coverage becomes the alpha channel of the tint
            let mut rgba_bitmap = Vec::with_capacity(bitmap.len() * 4);
            for &coverage in &bitmap {
                rgba_bitmap.extend_from_slice(&tint);
                rgba_bitmap.push((coverage as f32 * alpha) as u8);
            }

            width = width.max(glyph.x + metrics.width as f32);
            height = height.max(glyph.y + metrics.height as f32);

            glyphs.push(TextGlyph {
                x: glyph.x,
                y: glyph.y,
                width: metrics.width,
                height: metrics.height,
                bitmap: rgba_bitmap,
            });
        }

        if glyphs.is_empty() {
            return None;
        }

        Some(TextRenderResult {
            glyphs,
            width: width.ceil() as u32,
            height: height.ceil() as u32,
        })
    }
}

pub struct TextRenderResult {
    pub glyphs: Vec<TextGlyph>,
    pub width: u32,
    pub height: u32,
}

pub struct TextGlyph {
    pub x: f32,
    pub y: f32,
    pub width: usize,
    pub height: usize,
    pub bitmap: Vec<u8>, // RGBA format
}

/// Cut `text` to fit roughly `max_width` pixels, ending in "..." when shortened.
pub fn truncate_label(text: &str, max_width: f32, font_size: f32) -> String {
    let approx_char_w = (font_size * 0.58).max(1.0);
    let max_chars = (max_width / approx_char_w) as usize;
    if max_chars < 3 {
        return String::new();
    }
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 3 {
        return "...".to_string();
    }
    let truncated: String = text.chars().take(max_chars - 3).collect();
    format!("{truncated}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_names() {
        assert_eq!(truncate_label("Apple Inc.", 200.0, 10.0), "Apple Inc.");
        // 58px at 0.58 * 10 = 10 chars
        assert_eq!(truncate_label("JPMorgan Chase & Co.", 58.0, 10.0), "JPMorga...");
        assert_eq!(truncate_label("Microsoft", 10.0, 10.0), "");
    }

    #[test]
    fn missing_font_renders_nothing() {
        let mut text = TextRenderer::new();
        assert!(!text.has_font("default"));
        assert!(text
            .render_text("AAPL", "default", 12.0, AppColor::new(1.0, 1.0, 1.0), None)
            .is_none());
    }
}
