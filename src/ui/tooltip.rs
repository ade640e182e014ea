use crate::market::{Sector, Stock};

use super::input::Hit;

/// Signed percent, e.g. `+1.25%` / `-0.40%`. Flat moves get a plus sign.
pub fn format_change(change: f64) -> String {
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{sign}{change:.2}%")
}

/// Multi-line hover text for a stock.
pub fn stock_tooltip(stock: &Stock) -> String {
    format!(
        "{} ({})\n${:.2}\n{}",
        stock.name,
        stock.ticker,
        stock.price,
        format_change(stock.change)
    )
}

pub fn sector_tooltip(sector: &Sector) -> String {
    format!("{}: {}", sector.name, format_change(sector.change))
}

/// Tooltip for whatever is under the cursor.
pub fn build_tooltip(sectors: &[Sector], hit: Hit) -> Option<String> {
    match hit {
        Hit::Stock { sector, stock } => sectors
            .get(sector)
            .and_then(|s| s.stocks.get(stock))
            .map(stock_tooltip),
        Hit::Sector { sector } => sectors.get(sector).map(sector_tooltip),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compact_str::CompactString;

    fn sample() -> Sector {
        Sector {
            name: CompactString::from("Energy"),
            change: -1.234,
            stocks: vec![Stock {
                ticker: CompactString::from("XOM"),
                name: CompactString::from("Exxon Mobil Corp."),
                price: 118.2,
                change: 0.0,
                market_cap: None,
            }],
        }
    }

    #[test]
    fn formats_signed_percent() {
        assert_eq!(format_change(1.256), "+1.26%");
        assert_eq!(format_change(0.0), "+0.00%");
        assert_eq!(format_change(-0.4), "-0.40%");
    }

    #[test]
    fn stock_and_sector_text() {
        let sectors = vec![sample()];
        assert_eq!(
            build_tooltip(&sectors, Hit::Stock { sector: 0, stock: 0 }).unwrap(),
            "Exxon Mobil Corp. (XOM)\n$118.20\n+0.00%"
        );
        assert_eq!(
            build_tooltip(&sectors, Hit::Sector { sector: 0 }).unwrap(),
            "Energy: -1.23%"
        );
        assert_eq!(build_tooltip(&sectors, Hit::Stock { sector: 0, stock: 7 }), None);
    }
}
