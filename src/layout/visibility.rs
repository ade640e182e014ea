use super::Rect;

/// Which labels fit on a tile, and at what size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visibility {
    pub show_identifier: bool,
    pub show_delta: bool,
    pub show_name: bool,
    pub identifier_font_size: f64,
    pub delta_font_size: f64,
    pub name_font_size: f64,
}

/// Minimum (width, height) for a label tier plus font scaling rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityThresholds {
    pub identifier: (f64, f64),
    pub delta: (f64, f64),
    pub name: (f64, f64),
    /// Identifier font = min(w / div.0, h / div.1, max), at least `min`.
    pub identifier_font_div: (f64, f64),
    pub identifier_font_range: (f64, f64),
    pub delta_font_div: (f64, f64),
    pub delta_font_range: (f64, f64),
    /// Name font relative to the delta font.
    pub name_font_ratio: f64,
}

impl Default for VisibilityThresholds {
    fn default() -> Self {
        Self {
            identifier: (30.0, 20.0),
            delta: (45.0, 32.0),
            name: (70.0, 50.0),
            identifier_font_div: (4.5, 2.8),
            identifier_font_range: (7.0, 13.0),
            delta_font_div: (6.0, 4.0),
            delta_font_range: (6.0, 10.0),
            name_font_ratio: 0.85,
        }
    }
}

fn fits(rect: &Rect, (min_w, min_h): (f64, f64)) -> bool {
    rect.w >= min_w && rect.h >= min_h
}

fn scaled_font(rect: &Rect, (div_w, div_h): (f64, f64), (lo, hi): (f64, f64)) -> f64 {
    (rect.w / div_w).min(rect.h / div_h).min(hi).max(lo)
}

impl VisibilityThresholds {
    /// Tiers are cumulative: a tier is only shown when every lower tier is.
    pub fn tier_for(&self, rect: &Rect) -> Visibility {
        let show_identifier = fits(rect, self.identifier);
        let show_delta = show_identifier && fits(rect, self.delta);
        let show_name = show_delta && fits(rect, self.name);
        let delta_font_size = scaled_font(rect, self.delta_font_div, self.delta_font_range);
        Visibility {
            show_identifier,
            show_delta,
            show_name,
            identifier_font_size: scaled_font(
                rect,
                self.identifier_font_div,
                self.identifier_font_range,
            ),
            delta_font_size,
            name_font_size: delta_font_size * self.name_font_ratio,
        }
    }
}

/// [`VisibilityThresholds::tier_for`] with the default thresholds.
pub fn tier_for(rect: &Rect) -> Visibility {
    VisibilityThresholds::default().tier_for(rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(w: f64, h: f64) -> Rect {
        Rect::new(0.0, 0.0, w, h)
    }

    #[test]
    fn tiers_switch_on_at_thresholds() {
        let v = tier_for(&tile(29.9, 100.0));
        assert!(!v.show_identifier && !v.show_delta && !v.show_name);

        let v = tier_for(&tile(30.0, 20.0));
        assert!(v.show_identifier && !v.show_delta);

        let v = tier_for(&tile(45.0, 32.0));
        assert!(v.show_identifier && v.show_delta && !v.show_name);

        let v = tier_for(&tile(70.0, 50.0));
        assert!(v.show_identifier && v.show_delta && v.show_name);
    }

    #[test]
    fn higher_tiers_imply_lower_ones() {
        // Thresholds deliberately inverted on one axis
        let odd = VisibilityThresholds {
            identifier: (10.0, 40.0),
            delta: (10.0, 10.0),
            name: (10.0, 10.0),
            ..Default::default()
        };
        let v = odd.tier_for(&tile(50.0, 20.0));
        assert!(!v.show_identifier && !v.show_delta && !v.show_name);

        for w in [0.0, 31.0, 46.0, 71.0, 500.0] {
            for h in [0.0, 21.0, 33.0, 51.0, 500.0] {
                let v = tier_for(&tile(w, h));
                assert!(!v.show_delta || v.show_identifier);
                assert!(!v.show_name || v.show_delta);
            }
        }
    }

    #[test]
    fn fonts_scale_with_tile_and_clamp() {
        let big = tier_for(&tile(2000.0, 2000.0));
        assert_eq!(big.identifier_font_size, 13.0);
        assert_eq!(big.delta_font_size, 10.0);
        assert!((big.name_font_size - 8.5).abs() < 1e-12);

        let tiny = tier_for(&tile(10.0, 10.0));
        assert_eq!(tiny.identifier_font_size, 7.0);
        assert_eq!(tiny.delta_font_size, 6.0);

        // 45 / 4.5 = 10, 100 / 2.8 ≈ 35.7
        let mid = tier_for(&tile(45.0, 100.0));
        assert!((mid.identifier_font_size - 10.0).abs() < 1e-12);
        // 45 / 6 = 7.5, 100 / 4 = 25
        assert!((mid.delta_font_size - 7.5).abs() < 1e-12);
    }
}
