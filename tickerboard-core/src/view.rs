//! Row view model: quotes turned into display strings, ready to paint.
//!
//! Pure and terminal-agnostic. The TUI and the CLI both paint from this.

use crate::color::{color_for, Rgb};
use crate::data::detail_url;
use crate::domain::{Column, Quote};
use crate::format::{
    format_currency, format_dividend_yield, format_fixed2, format_magnitude, format_percent,
    format_text,
};

/// One painted table row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Cell text in [`Column::ALL`] order.
    pub cells: [String; Column::COUNT],
    /// Background for the daily-change cell; `None` leaves it unstyled.
    pub change_color: Option<Rgb>,
    pub symbol: Option<String>,
    /// Detail page link, present when the row has a symbol.
    pub detail_url: Option<String>,
}

impl RowView {
    pub fn cell(&self, column: Column) -> &str {
        &self.cells[column.index()]
    }
}

/// Build the view for one quote at 0-based `index`.
pub fn render_row(index: usize, quote: &Quote, base_url: &str) -> RowView {
    let change = quote.daily_change_percent();
    let change_color = change.filter(|pct| *pct != 0.0).map(color_for);

    let cells = Column::ALL.map(|column| match column {
        Column::Number => quote
            .number
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| (index + 1).to_string()),
        Column::Symbol => format_text(quote.symbol.as_deref()),
        Column::LongName => format_text(quote.long_name.as_deref()),
        Column::CurrentPrice => format_currency(quote.current_price),
        Column::DailyChangePercent => format_percent(change),
        Column::PreviousClose => format_currency(quote.previous_close),
        Column::MarketCap => format_magnitude(quote.market_cap.as_ref()),
        Column::Volume => format_magnitude(quote.volume.as_ref()),
        Column::SharesOutstanding => format_magnitude(quote.shares_outstanding.as_ref()),
        Column::DayHigh => format_currency(quote.day_high),
        Column::DayLow => format_currency(quote.day_low),
        Column::TrailingPe => format_fixed2(quote.trailing_pe),
        Column::DividendYield => format_dividend_yield(quote.dividend_yield),
        Column::Sector => format_text(quote.sector.as_deref()),
        Column::Weight => quote
            .weight
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| format_text(None)),
    });

    RowView {
        cells,
        change_color,
        symbol: quote.symbol.clone(),
        detail_url: quote.symbol.as_deref().map(|s| detail_url(base_url, s)),
    }
}

/// Build views for every row, preserving order.
pub fn render_rows(rows: &[Quote], base_url: &str) -> Vec<RowView> {
    rows.iter()
        .enumerate()
        .map(|(i, q)| render_row(i, q, base_url))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Magnitude, Passthrough};
    use crate::format::NA;

    const BASE: &str = "http://127.0.0.1:5000";

    fn full_quote() -> Quote {
        Quote {
            symbol: Some("AAPL".into()),
            long_name: Some("Apple Inc.".into()),
            current_price: Some(105.0),
            previous_close: Some(100.0),
            day_high: Some(106.0),
            day_low: Some(99.5),
            market_cap: Some(Magnitude::Value(3.1e12)),
            volume: Some(Magnitude::Value(51_234_567.0)),
            shares_outstanding: Some(Magnitude::Value(15.2e9)),
            trailing_pe: Some(31.456),
            dividend_yield: Some(0.0045),
            sector: Some("Technology".into()),
            weight: Some(Passthrough::Text("7.2%".into())),
            number: Some(Passthrough::Number(serde_json::Number::from(3u32))),
        }
    }

    #[test]
    fn full_row_formats_every_cell() {
        let row = render_row(0, &full_quote(), BASE);
        assert_eq!(row.cell(Column::Number), "3");
        assert_eq!(row.cell(Column::Symbol), "AAPL");
        assert_eq!(row.cell(Column::CurrentPrice), "$105.00");
        assert_eq!(row.cell(Column::DailyChangePercent), "5.00%");
        assert_eq!(row.cell(Column::MarketCap), "3.1000T");
        assert_eq!(row.cell(Column::Volume), "51.23M");
        assert_eq!(row.cell(Column::SharesOutstanding), "15.20B");
        assert_eq!(row.cell(Column::TrailingPe), "31.46");
        assert_eq!(row.cell(Column::DividendYield), "0.45%");
        assert_eq!(row.cell(Column::Weight), "7.2%");
        assert_eq!(row.change_color, Some(Rgb::GREEN));
        assert_eq!(row.detail_url.as_deref(), Some("http://127.0.0.1:5000/stocks/AAPL"));
    }

    #[test]
    fn absent_pe_only_affects_its_cell() {
        let mut q = full_quote();
        q.trailing_pe = None;
        let row = render_row(0, &q, BASE);
        assert_eq!(row.cell(Column::TrailingPe), NA);
        assert_eq!(row.cell(Column::CurrentPrice), "$105.00");
        assert_eq!(row.cell(Column::Sector), "Technology");
    }

    #[test]
    fn empty_quote_renders_placeholders() {
        let row = render_row(4, &Quote::default(), BASE);
        assert_eq!(row.cell(Column::Number), "5");
        assert_eq!(row.cell(Column::Symbol), NA);
        assert_eq!(row.cell(Column::DailyChangePercent), NA);
        assert_eq!(row.cell(Column::DividendYield), "0.00%");
        assert_eq!(row.cell(Column::Weight), NA);
        assert_eq!(row.change_color, None);
        assert_eq!(row.detail_url, None);
    }

    #[test]
    fn zero_previous_close_has_no_color() {
        let q = Quote {
            current_price: Some(105.0),
            previous_close: Some(0.0),
            ..Default::default()
        };
        let row = render_row(0, &q, BASE);
        assert_eq!(row.cell(Column::DailyChangePercent), NA);
        assert_eq!(row.change_color, None);
    }

    #[test]
    fn unchanged_price_has_no_color() {
        let q = Quote {
            current_price: Some(100.0),
            previous_close: Some(100.0),
            ..Default::default()
        };
        let row = render_row(0, &q, BASE);
        assert_eq!(row.cell(Column::DailyChangePercent), "0.00%");
        assert_eq!(row.change_color, None);
    }

    #[test]
    fn rows_keep_order() {
        let mut b = full_quote();
        b.symbol = Some("B".into());
        let mut a = full_quote();
        a.symbol = Some("A".into());
        let views = render_rows(&[b, a], BASE);
        assert_eq!(views[0].cell(Column::Symbol), "B");
        assert_eq!(views[1].cell(Column::Symbol), "A");
    }
}
