/// Square-root dampening of market capitalization into layout mass.
///
/// `mass = sqrt(cap / unit) * scale + floor`. Compressing the range keeps a
/// handful of mega-caps from swallowing their sector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampenConfig {
    /// Substituted for unknown, zero, negative or non-finite caps.
    pub reference_cap: f64,
    /// Divisor applied before the square root (billions).
    pub unit: f64,
    pub scale: f64,
    pub floor: f64,
}

impl Default for DampenConfig {
    fn default() -> Self {
        Self {
            reference_cap: 10_000_000_000.0,
            unit: 1_000_000_000.0,
            scale: 10.0,
            floor: 5.0,
        }
    }
}

impl DampenConfig {
    /// Layout mass for a raw market cap. Always strictly positive.
    pub fn dampen(&self, market_cap: Option<f64>) -> f64 {
        let cap = match market_cap {
            Some(cap) if cap > 0.0 && cap.is_finite() => cap,
            _ => self.reference_cap,
        };
        (cap / self.unit).sqrt() * self.scale + self.floor
    }
}

/// [`DampenConfig::dampen`] with the default constants.
pub fn dampen(market_cap: Option<f64>) -> f64 {
    DampenConfig::default().dampen(market_cap)
}
