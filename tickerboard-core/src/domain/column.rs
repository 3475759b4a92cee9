//! Table columns, in display order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One column of the quote table.
///
/// `key()` is the wire field name the column sorts on; `label()` is the
/// header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Number,
    Symbol,
    LongName,
    CurrentPrice,
    DailyChangePercent,
    PreviousClose,
    MarketCap,
    Volume,
    SharesOutstanding,
    DayHigh,
    DayLow,
    TrailingPe,
    DividendYield,
    Sector,
    Weight,
}

impl Column {
    pub const COUNT: usize = 15;

    pub const ALL: [Column; Column::COUNT] = [
        Column::Number,
        Column::Symbol,
        Column::LongName,
        Column::CurrentPrice,
        Column::DailyChangePercent,
        Column::PreviousClose,
        Column::MarketCap,
        Column::Volume,
        Column::SharesOutstanding,
        Column::DayHigh,
        Column::DayLow,
        Column::TrailingPe,
        Column::DividendYield,
        Column::Sector,
        Column::Weight,
    ];

    pub fn index(self) -> usize {
        Column::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default()
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Column::ALL.get(i).copied()
    }

    pub fn key(self) -> &'static str {
        match self {
            Column::Number => "Number",
            Column::Symbol => "symbol",
            Column::LongName => "longName",
            Column::CurrentPrice => "currentPrice",
            Column::DailyChangePercent => "dailyChangePercent",
            Column::PreviousClose => "previousClose",
            Column::MarketCap => "marketCap",
            Column::Volume => "volume",
            Column::SharesOutstanding => "sharesOutstanding",
            Column::DayHigh => "dayHigh",
            Column::DayLow => "dayLow",
            Column::TrailingPe => "trailingPE",
            Column::DividendYield => "dividendYield",
            Column::Sector => "sector",
            Column::Weight => "Weight",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Column::Number => "#",
            Column::Symbol => "Symbol",
            Column::LongName => "Name",
            Column::CurrentPrice => "Price",
            Column::DailyChangePercent => "Chg %",
            Column::PreviousClose => "Prev Close",
            Column::MarketCap => "Mkt Cap",
            Column::Volume => "Volume",
            Column::SharesOutstanding => "Shares",
            Column::DayHigh => "High",
            Column::DayLow => "Low",
            Column::TrailingPe => "P/E",
            Column::DividendYield => "Div Yield",
            Column::Sector => "Sector",
            Column::Weight => "Weight",
        }
    }

    /// Columns whose values are free text rather than numbers.
    pub fn is_text(self) -> bool {
        matches!(self, Column::Symbol | Column::LongName | Column::Sector)
    }

    pub fn next(self) -> Column {
        Column::ALL[(self.index() + 1) % Column::COUNT]
    }

    pub fn prev(self) -> Column {
        Column::ALL[(self.index() + Column::COUNT - 1) % Column::COUNT]
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown column: {0}")]
pub struct UnknownColumn(pub String);

impl FromStr for Column {
    type Err = UnknownColumn;

    /// Accepts the exact sort key (`"marketCap"`) or, case-insensitively,
    /// the key or header label (`"mkt cap"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(c) = Column::ALL.iter().find(|c| c.key() == s) {
            return Ok(*c);
        }
        Column::ALL
            .iter()
            .find(|c| c.key().eq_ignore_ascii_case(s) || c.label().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}
