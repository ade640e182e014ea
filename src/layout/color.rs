/// Straight-alpha RGBA color, independent of any rendering backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl AppColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Create a lighter version (for hover highlight).
    pub fn lighten(self, amount: f32) -> Self {
        Self {
            r: (self.r + amount).min(1.0),
            g: (self.g + amount).min(1.0),
            b: (self.b + amount).min(1.0),
            a: self.a,
        }
    }
}

/// Fill and border for one tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileColors {
    pub fill: AppColor,
    pub border: AppColor,
}

/// Two-channel gain/loss color scale with saturating intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    /// Percent change at which intensity saturates.
    pub cap: f32,
    pub fill_alpha_min: f32,
    pub fill_alpha_delta: f32,
    pub border_alpha_min: f32,
    pub border_alpha_delta: f32,
    pub gain: AppColor,
    pub loss: AppColor,
    pub neutral: TileColors,
}

impl Default for ColorScale {
    fn default() -> Self {
        let gray = AppColor::rgba8(128, 128, 128, 1.0);
        Self {
            cap: 3.0,
            fill_alpha_min: 0.25,
            fill_alpha_delta: 0.35,
            border_alpha_min: 0.3,
            border_alpha_delta: 0.4,
            gain: AppColor::rgba8(34, 197, 94, 1.0),
            loss: AppColor::rgba8(239, 68, 68, 1.0),
            neutral: TileColors {
                fill: gray.with_alpha(0.2),
                border: gray.with_alpha(0.3),
            },
        }
    }
}

impl ColorScale {
    /// Colors for a percent change. Zero (and NaN) map to the neutral pair.
    pub fn change_colors(&self, change: f64) -> TileColors {
        let base = if change > 0.0 {
            self.gain
        } else if change < 0.0 {
            self.loss
        } else {
            return self.neutral;
        };
        let intensity = (change.abs() as f32 / self.cap).min(1.0);
        TileColors {
            fill: base.with_alpha(self.fill_alpha_min + intensity * self.fill_alpha_delta),
            border: base.with_alpha(self.border_alpha_min + intensity * self.border_alpha_delta),
        }
    }
}

/// [`ColorScale::change_colors`] with the default scale.
pub fn change_colors(change: f64) -> TileColors {
    ColorScale::default().change_colors(change)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_change_is_neutral() {
        let scale = ColorScale::default();
        assert_eq!(change_colors(0.0), scale.neutral);
        assert_eq!(change_colors(-0.0), scale.neutral);
        assert_eq!(change_colors(f64::NAN), scale.neutral);
        assert!((scale.neutral.fill.a - 0.2).abs() < 1e-6);
    }

    #[test]
    fn sign_selects_hue() {
        let scale = ColorScale::default();
        let up = change_colors(1.0);
        let down = change_colors(-1.0);
        assert_eq!((up.fill.r, up.fill.g, up.fill.b), (scale.gain.r, scale.gain.g, scale.gain.b));
        assert_eq!(
            (down.fill.r, down.fill.g, down.fill.b),
            (scale.loss.r, scale.loss.g, scale.loss.b)
        );
        assert_eq!(up.fill.a, down.fill.a);
    }

    #[test]
    fn alpha_saturates_at_cap() {
        let at_cap = change_colors(3.0);
        let beyond = change_colors(250.0);
        assert_eq!(at_cap, beyond);
        assert!((at_cap.fill.a - 0.6).abs() < 1e-6);
        assert!((at_cap.border.a - 0.7).abs() < 1e-6);

        let half = change_colors(-1.5);
        assert!((half.fill.a - 0.425).abs() < 1e-6);
        assert!((half.border.a - 0.5).abs() < 1e-6);
    }

    #[test]
    fn fill_alpha_stays_in_bounds() {
        for x in [-1.0e9, -7.0, -3.0, -0.01, 1.0e-9, 0.5, 2.99, 3.01, 1.0e12] {
            let a = change_colors(x).fill.a;
            assert!((0.25..=0.6 + 1e-6).contains(&a), "alpha {} for {}", a, x);
            assert!(change_colors(x).border.a > a);
        }
    }
}
