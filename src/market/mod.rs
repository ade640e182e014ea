pub mod demo;

use std::path::Path;

use anyhow::{Context, Result};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A single constituent of a sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    /// Ticker symbol, unique within its sector.
    pub ticker: CompactString,
    pub name: CompactString,
    pub price: f64,
    /// Percent change over the snapshot period.
    pub change: f64,
    /// Market capitalization; `None` when the feed didn't report one.
    #[serde(default)]
    pub market_cap: Option<f64>,
}

/// A sector owns its stocks exclusively for the lifetime of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub name: CompactString,
    pub change: f64,
    #[serde(default)]
    pub stocks: Vec<Stock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeatmapPeriod {
    #[default]
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "ytd")]
    YearToDate,
}

impl HeatmapPeriod {
    pub fn label(self) -> &'static str {
        match self {
            HeatmapPeriod::OneDay => "1D",
            HeatmapPeriod::OneWeek => "1W",
            HeatmapPeriod::OneMonth => "1M",
            HeatmapPeriod::ThreeMonths => "3M",
            HeatmapPeriod::YearToDate => "YTD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatmapUniverse {
    Sp100,
    #[default]
    Sp500,
}

impl HeatmapUniverse {
    pub fn label(self) -> &'static str {
        match self {
            HeatmapUniverse::Sp100 => "S&P 100",
            HeatmapUniverse::Sp500 => "S&P 500",
        }
    }
}

/// One heatmap response as produced by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeatmapSnapshot {
    pub sectors: Vec<Sector>,
    #[serde(default)]
    pub period: HeatmapPeriod,
    #[serde(default)]
    pub universe: HeatmapUniverse,
    #[serde(default)]
    pub generated_at: String,
}

impl HeatmapSnapshot {
    pub fn stock_count(&self) -> usize {
        self.sectors.iter().map(|s| s.stocks.len()).sum()
    }

    pub fn title(&self) -> String {
        format!("{} Heatmap ({})", self.universe.label(), self.period.label())
    }
}

/// Parse a snapshot from its JSON representation.
pub fn parse_snapshot(json: &str) -> Result<HeatmapSnapshot> {
    let snapshot: HeatmapSnapshot =
        serde_json::from_str(json).context("invalid heatmap snapshot JSON")?;
    tracing::debug!(
        "Parsed snapshot: {} sectors, {} stocks, generated_at='{}'",
        snapshot.sectors.len(),
        snapshot.stock_count(),
        snapshot.generated_at
    );
    Ok(snapshot)
}

/// Read and parse a snapshot file from disk.
pub fn load_snapshot(path: &Path) -> Result<HeatmapSnapshot> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot = parse_snapshot(&json)
        .with_context(|| format!("failed to load snapshot {}", path.display()))?;
    tracing::info!(
        "Loaded snapshot from {}: {} sectors, {} stocks",
        path.display(),
        snapshot.sectors.len(),
        snapshot.stock_count()
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_response_with_null_market_cap() {
        let json = r#"{
            "sectors": [{
                "name": "Technology",
                "change": 1.25,
                "stocks": [
                    {"ticker": "AAPL", "name": "Apple Inc.", "price": 190.5, "change": 0.8, "market_cap": 2900000000000},
                    {"ticker": "XYZ", "name": "Unknown Co", "price": 12.0, "change": -2.1, "market_cap": null}
                ]
            }],
            "period": "ytd",
            "universe": "sp100",
            "generated_at": "2024-05-01T14:30:00Z"
        }"#;
        let snapshot = parse_snapshot(json).unwrap();
        assert_eq!(snapshot.sectors.len(), 1);
        assert_eq!(snapshot.period, HeatmapPeriod::YearToDate);
        assert_eq!(snapshot.universe, HeatmapUniverse::Sp100);
        let stocks = &snapshot.sectors[0].stocks;
        assert_eq!(stocks[0].ticker, "AAPL");
        assert_eq!(stocks[0].market_cap, Some(2.9e12));
        assert_eq!(stocks[1].market_cap, None);
        assert_eq!(snapshot.stock_count(), 2);
    }

    #[test]
    fn envelope_fields_default_when_missing() {
        let snapshot = parse_snapshot(r#"{"sectors": []}"#).unwrap();
        assert_eq!(snapshot.period, HeatmapPeriod::OneDay);
        assert_eq!(snapshot.universe, HeatmapUniverse::Sp500);
        assert!(snapshot.generated_at.is_empty());
        assert_eq!(snapshot.title(), "S&P 500 Heatmap (1D)");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_snapshot("{\"sectors\": 3}").is_err());
    }
}
