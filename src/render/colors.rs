use vello::peniko::Color;

pub use crate::layout::color::{AppColor, TileColors};

/// Convert to vello's peniko Color (AlphaColor<Srgb>).
pub fn to_peniko(color: AppColor) -> Color {
    Color::new([color.r, color.g, color.b, color.a])
}

/// Background of the sector header band.
pub const SECTOR_HEADER: AppColor = AppColor::new(0.0, 0.0, 0.0).with_alpha(0.7);
/// Sector name text in the header band.
pub const SECTOR_TITLE: AppColor = AppColor::new(1.0, 1.0, 1.0).with_alpha(0.9);
/// Sectors too small to hold stock tiles render as a plain block.
pub const SECTOR_BLOCK: TileColors = TileColors {
    fill: AppColor::new(0.0, 0.0, 0.0).with_alpha(0.3),
    border: AppColor::new(1.0, 1.0, 1.0).with_alpha(0.1),
};
/// Canvas behind the tiles.
pub const CANVAS: AppColor = AppColor::new(0.0, 0.0, 0.0).with_alpha(0.2);

/// Header text color for a sector's change (green-400 / red-400).
pub fn sector_change_text(change: f64) -> AppColor {
    if change >= 0.0 {
        AppColor::rgba8(74, 222, 128, 1.0)
    } else {
        AppColor::rgba8(248, 113, 113, 1.0)
    }
}
