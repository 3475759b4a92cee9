//! Sort state and the client-side sort engine.
//!
//! Clicking a header cycles that column through descending → ascending →
//! unsorted. Unsorted means "as fetched": rows come back in the order of the
//! most recent successful response.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::{Column, Magnitude, Passthrough, Quote};

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    Descending,
    Ascending,
    #[default]
    None,
}

impl SortDirection {
    /// Query-string spelling used by the data source (`desc`/`asc`/`none`).
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Descending => "desc",
            SortDirection::Ascending => "asc",
            SortDirection::None => "none",
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Descending => " \u{2193}",
            SortDirection::Ascending => " \u{2191}",
            SortDirection::None => "",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desc" | "descending" => Ok(SortDirection::Descending),
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "none" | "" => Ok(SortDirection::None),
            other => Err(format!("unknown sort order '{other}' (expected asc, desc, none)")),
        }
    }
}

/// Active column plus direction.
///
/// `column` is only meaningful while `direction != None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub column: Option<Column>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: Column, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction,
        }
    }

    /// Apply a header click.
    ///
    /// A new column starts descending; the active column cycles
    /// descending → ascending → none → descending.
    pub fn toggle(&mut self, clicked: Column) {
        if self.column == Some(clicked) {
            self.direction = match self.direction {
                SortDirection::Descending => SortDirection::Ascending,
                SortDirection::Ascending => SortDirection::None,
                SortDirection::None => SortDirection::Descending,
            };
        } else {
            self.column = Some(clicked);
            self.direction = SortDirection::Descending;
        }
    }

    /// The column actually ordering the rows, if any.
    pub fn active(&self) -> Option<(Column, SortDirection)> {
        match (self.column, self.direction) {
            (Some(c), d) if d != SortDirection::None => Some((c, d)),
            _ => None,
        }
    }

    /// Header suffix for `column`: an arrow on the active column, empty elsewhere.
    pub fn indicator_for(&self, column: Column) -> &'static str {
        match self.active() {
            Some((c, d)) if c == column => d.arrow(),
            _ => "",
        }
    }

    /// `(sortColumn, sortOrder)` as the data source spells them.
    pub fn as_query(&self) -> (&'static str, &'static str) {
        (
            self.column.map(Column::key).unwrap_or(""),
            self.direction.as_str(),
        )
    }
}

/// Comparable value extracted from one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    /// Total order: numbers before text, numbers by `total_cmp`, text lexically.
    fn cmp_total(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

const MISSING: SortKey = SortKey::Number(0.0);

/// Extract the sort key of `column` from `quote`.
///
/// Absent values read as 0, so a missing field ties with a real zero.
/// The daily change is always recomputed from the two prices.
pub fn sort_key(quote: &Quote, column: Column) -> SortKey {
    let num = |v: Option<f64>| v.map(SortKey::Number).unwrap_or(MISSING);
    let text = |v: &Option<String>| v.clone().map(SortKey::Text).unwrap_or(MISSING);
    let magnitude = |v: &Option<Magnitude>| num(v.as_ref().and_then(Magnitude::value));

    match column {
        Column::Number => passthrough(&quote.number),
        Column::Weight => passthrough(&quote.weight),
        Column::Symbol => text(&quote.symbol),
        Column::LongName => text(&quote.long_name),
        Column::Sector => text(&quote.sector),
        Column::CurrentPrice => num(quote.current_price),
        Column::DailyChangePercent => num(quote.daily_change_percent()),
        Column::PreviousClose => num(quote.previous_close),
        Column::MarketCap => magnitude(&quote.market_cap),
        Column::Volume => magnitude(&quote.volume),
        Column::SharesOutstanding => magnitude(&quote.shares_outstanding),
        Column::DayHigh => num(quote.day_high),
        Column::DayLow => num(quote.day_low),
        Column::TrailingPe => num(quote.trailing_pe),
        Column::DividendYield => num(quote.dividend_yield),
    }
}

fn passthrough(value: &Option<Passthrough>) -> SortKey {
    match value {
        Some(p) => match p.as_f64() {
            Some(v) => SortKey::Number(v),
            None => SortKey::Text(p.to_string()),
        },
        None => MISSING,
    }
}

/// Order `rows` by `state`. Unsorted state returns the rows as given.
pub fn sort_rows(rows: &[Quote], state: &SortState) -> Vec<Quote> {
    let Some((column, direction)) = state.active() else {
        return rows.to_vec();
    };

    let mut keyed: Vec<(SortKey, Quote)> = rows
        .iter()
        .map(|q| (sort_key(q, column), q.clone()))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match direction {
        SortDirection::Ascending => a.cmp_total(b),
        SortDirection::Descending => b.cmp_total(a),
        SortDirection::None => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, q)| q).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(symbol: &str, price: Option<f64>) -> Quote {
        Quote {
            symbol: Some(symbol.into()),
            current_price: price,
            ..Default::default()
        }
    }

    fn symbols(rows: &[Quote]) -> Vec<&str> {
        rows.iter().map(|q| q.symbol.as_deref().unwrap_or("")).collect()
    }

    #[test]
    fn toggle_cycles_through_three_states() {
        let mut s = SortState::default();
        s.toggle(Column::CurrentPrice);
        assert_eq!(s, SortState::new(Column::CurrentPrice, SortDirection::Descending));
        s.toggle(Column::CurrentPrice);
        assert_eq!(s.direction, SortDirection::Ascending);
        s.toggle(Column::CurrentPrice);
        assert_eq!(s.direction, SortDirection::None);
        s.toggle(Column::CurrentPrice);
        assert_eq!(s.direction, SortDirection::Descending);
    }

    #[test]
    fn new_column_restarts_descending() {
        let mut s = SortState::new(Column::Volume, SortDirection::Ascending);
        s.toggle(Column::MarketCap);
        assert_eq!(s, SortState::new(Column::MarketCap, SortDirection::Descending));
    }

    #[test]
    fn indicator_only_on_active_column() {
        let s = SortState::new(Column::Volume, SortDirection::Ascending);
        assert_eq!(s.indicator_for(Column::Volume), " \u{2191}");
        assert_eq!(s.indicator_for(Column::MarketCap), "");
        let off = SortState::new(Column::Volume, SortDirection::None);
        assert_eq!(off.indicator_for(Column::Volume), "");
    }

    #[test]
    fn descending_puts_larger_first() {
        let rows = vec![priced("A", Some(2.0)), priced("B", Some(9.0)), priced("C", Some(5.0))];
        let sorted = sort_rows(&rows, &SortState::new(Column::CurrentPrice, SortDirection::Descending));
        assert_eq!(symbols(&sorted), vec!["B", "C", "A"]);
        let sorted = sort_rows(&rows, &SortState::new(Column::CurrentPrice, SortDirection::Ascending));
        assert_eq!(symbols(&sorted), vec!["A", "C", "B"]);
    }

    #[test]
    fn none_keeps_fetch_order() {
        let rows = vec![priced("Z", Some(1.0)), priced("A", Some(3.0)), priced("M", Some(2.0))];
        let sorted = sort_rows(&rows, &SortState::new(Column::CurrentPrice, SortDirection::None));
        assert_eq!(symbols(&sorted), vec!["Z", "A", "M"]);
        assert_eq!(sort_rows(&rows, &SortState::default()), rows);
    }

    #[test]
    fn missing_values_sort_as_zero() {
        let rows = vec![priced("NEG", Some(-1.0)), priced("GONE", None), priced("POS", Some(1.0))];
        let sorted = sort_rows(&rows, &SortState::new(Column::CurrentPrice, SortDirection::Ascending));
        assert_eq!(symbols(&sorted), vec!["NEG", "GONE", "POS"]);
    }

    #[test]
    fn daily_change_is_recomputed() {
        let up = Quote {
            symbol: Some("UP".into()),
            current_price: Some(110.0),
            previous_close: Some(100.0),
            ..Default::default()
        };
        let down = Quote {
            symbol: Some("DOWN".into()),
            current_price: Some(90.0),
            previous_close: Some(100.0),
            ..Default::default()
        };
        let flat = Quote {
            symbol: Some("FLAT".into()),
            current_price: Some(50.0),
            previous_close: Some(0.0),
            ..Default::default()
        };
        let rows = vec![down, flat, up];
        let sorted = sort_rows(
            &rows,
            &SortState::new(Column::DailyChangePercent, SortDirection::Descending),
        );
        assert_eq!(symbols(&sorted), vec!["UP", "FLAT", "DOWN"]);
    }

    #[test]
    fn text_columns_sort_lexically() {
        let rows = vec![priced("MSFT", None), priced("AAPL", None), priced("NVDA", None)];
        let sorted = sort_rows(&rows, &SortState::new(Column::Symbol, SortDirection::Ascending));
        assert_eq!(symbols(&sorted), vec!["AAPL", "MSFT", "NVDA"]);
    }

    #[test]
    fn query_spelling() {
        let s = SortState::new(Column::MarketCap, SortDirection::Descending);
        assert_eq!(s.as_query(), ("marketCap", "desc"));
        assert_eq!(SortState::default().as_query(), ("", "none"));
        assert_eq!("ASC".parse::<SortDirection>(), Ok(SortDirection::Ascending));
        assert!("sideways".parse::<SortDirection>().is_err());
    }
}
