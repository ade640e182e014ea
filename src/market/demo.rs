use compact_str::CompactString;

use super::{HeatmapPeriod, HeatmapSnapshot, HeatmapUniverse, Sector, Stock};

// (ticker, name, price, change %, market cap in billions; negative = unreported)
type Row = (&'static str, &'static str, f64, f64, f64);

const TECHNOLOGY: &[Row] = &[
    ("AAPL", "Apple Inc.", 189.84, 0.62, 2950.0),
    ("MSFT", "Microsoft Corp.", 415.10, 1.14, 3080.0),
    ("NVDA", "NVIDIA Corp.", 887.45, 3.87, 2210.0),
    ("AVGO", "Broadcom Inc.", 1312.20, -0.41, 610.0),
    ("ORCL", "Oracle Corp.", 123.55, -1.92, 340.0),
    ("ADBE", "Adobe Inc.", 478.30, 0.0, 215.0),
    ("CRM", "Salesforce Inc.", 291.02, -3.40, 282.0),
];

const FINANCIALS: &[Row] = &[
    ("JPM", "JPMorgan Chase & Co.", 196.40, 0.35, 565.0),
    ("BAC", "Bank of America Corp.", 37.85, -0.72, 298.0),
    ("WFC", "Wells Fargo & Co.", 58.12, 1.05, 207.0),
    ("GS", "Goldman Sachs Group", 452.66, 2.20, 148.0),
    ("BRK.B", "Berkshire Hathaway", 408.90, 0.12, -1.0),
];

const HEALTH_CARE: &[Row] = &[
    ("LLY", "Eli Lilly & Co.", 771.35, -0.85, 733.0),
    ("UNH", "UnitedHealth Group", 492.18, -2.64, 453.0),
    ("JNJ", "Johnson & Johnson", 152.40, 0.28, 367.0),
    ("MRK", "Merck & Co.", 127.90, 0.91, 324.0),
];

const ENERGY: &[Row] = &[
    ("XOM", "Exxon Mobil Corp.", 118.20, -1.33, 468.0),
    ("CVX", "Chevron Corp.", 156.71, -0.58, 290.0),
    ("COP", "ConocoPhillips", 125.40, 4.10, 147.0),
];

const UTILITIES: &[Row] = &[
    ("NEE", "NextEra Energy", 69.20, 0.44, 142.0),
    ("DUK", "Duke Energy", 98.15, -0.09, 76.0),
];

fn sector(name: &str, rows: &[Row]) -> Sector {
    let stocks: Vec<Stock> = rows
        .iter()
        .map(|&(ticker, name, price, change, cap_b)| Stock {
            ticker: CompactString::from(ticker),
            name: CompactString::from(name),
            price,
            change,
            market_cap: (cap_b >= 0.0).then_some(cap_b * 1_000_000_000.0),
        })
        .collect();
    let change = if stocks.is_empty() {
        0.0
    } else {
        stocks.iter().map(|s| s.change).sum::<f64>() / stocks.len() as f64
    };
    Sector {
        name: CompactString::from(name),
        change,
        stocks,
    }
}

/// A small fixed snapshot for the viewer's fallback and the layout diagnostics.
pub fn demo_snapshot() -> HeatmapSnapshot {
    HeatmapSnapshot {
        sectors: vec![
            sector("Technology", TECHNOLOGY),
            sector("Financials", FINANCIALS),
            sector("Health Care", HEALTH_CARE),
            sector("Energy", ENERGY),
            sector("Utilities", UTILITIES),
        ],
        period: HeatmapPeriod::OneDay,
        universe: HeatmapUniverse::Sp500,
        generated_at: String::from("demo"),
    }
}
